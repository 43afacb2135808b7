//! Output for 2DL trees.
//!
//! - [`write_tree`] renders a tree back to 2DL source. Parsing the output
//!   yields a structurally equal tree.
//! - [`to_json`] and [`to_json_string`] export the definitions as JSON.

mod emitter;
mod json;
mod writer;

pub use emitter::{Emitter, StringEmitter};
pub use json::{export, to_json, to_json_string, Annotations, JsonDefinition, JsonType};
pub use writer::{write_tree, TreeWriter};
