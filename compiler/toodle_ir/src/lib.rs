//! 2DL IR - Definition Tree Types
//!
//! This crate contains the core data structures shared by every 2DL pass:
//! - `Expr` and `Decimal` for annotation parameters and constants
//! - `Tree`, an arena of type nodes addressed by `TypeId`
//! - `TreeBuilder`, which assembles a `Tree` from `BuildEvent`s
//! - `walk`, a single depth-first traversal with ancestor context
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: type nodes live in one `Vec`, referenced by
//!   `TypeId(u32)`. A node's `parent` is a plain handle, never an owner.
//! - **Closed node kinds**: traversal hands out a `Node` enum instead of
//!   dispatching on runtime classes.
//! - **Fatal vs accumulated**: building errors (`BuildError`) abort; schema
//!   mismatches are collected later by `toodle_schema`.

mod builder;
mod decimal;
mod expr;
mod id;
mod literal;
mod stack;
mod tree;
mod walk;

pub use builder::{BuildError, BuildEvent, LiteralToken, Scope, TreeBuilder};
pub use decimal::{Decimal, DecimalError};
pub use expr::Expr;
pub use id::TypeId;
pub use literal::{decode_string, escape_string, LiteralError};
pub use stack::ensure_sufficient_stack;
pub use tree::{Alias, Annotation, ConstBinding, Definition, Tree, TypeNode};
pub use walk::{walk, Node, Walk, WalkContext};
