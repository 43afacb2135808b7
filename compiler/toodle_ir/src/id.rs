//! Type node handles for the flat definition tree.

use std::fmt;

/// Index into a [`Tree`](crate::Tree)'s node arena.
///
/// Handles are only meaningful for the tree that produced them. Copying a
/// handle never copies or shares the node: ownership stays with the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// The synthetic document root of every tree.
    pub const ROOT: TypeId = TypeId(0);

    /// Create a new `TypeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        TypeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}
