//! 2DL data types.
//!
//! A [`DataTypeCatalog`] is a single-inheritance lattice of named types,
//! some of them parametric. It answers three questions:
//!
//! - [`DataTypeCatalog::is_substitute`]: can a value of one type stand in
//!   for another? Parameters are compared according to their declared
//!   [`Variance`].
//! - [`DataTypeCatalog::lowest_common_ancestor`]: the nearest type both
//!   types descend from.
//! - [`DataTypeCatalog::is_literal_of`]: does a literal expression belong to
//!   a type?
//!
//! The builtin lattice:
//!
//! ```text
//! any
//! ├── array<T: any>
//! ├── map<K: primitive, V: any>
//! └── primitive
//!     ├── string
//!     │   └── bool
//!     └── number
//!         └── int
//! ```
//!
//! The catalog is a plain value: build it once with
//! [`DataTypeCatalog::builtin`] and pass it to whoever needs it.

mod catalog;
mod data_type;

pub use catalog::{CatalogError, DataTypeCatalog, DataTypeDefinition, DataTypeParamDefinition, Variance};
pub use data_type::DataType;

/// Builtin type names.
pub mod names {
    pub const ANY: &str = "any";
    pub const ARRAY: &str = "array";
    pub const MAP: &str = "map";
    pub const PRIMITIVE: &str = "primitive";
    pub const STRING: &str = "string";
    pub const BOOL: &str = "bool";
    pub const NUMBER: &str = "number";
    pub const INT: &str = "int";
}
