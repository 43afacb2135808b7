//! Scope expansion pipeline.
//!
//! Rewrites a freshly built tree in place so later passes never see aliases
//! or constant references:
//!
//! 1. [`expand_aliases`]: type names bound by `alias` are replaced by their
//!    targets, merging the target's annotations.
//! 2. [`expand_constants`]: `$name` references in annotation parameters are
//!    replaced by the values bound by `let`.
//! 3. [`remove_aliases`] / [`remove_constants`]: the declarations are dropped.
//!
//! Lookups go from the innermost scope outward to the document root. Failing
//! lookups and cycles are fatal [`ExpandError`]s.

mod aliases;
mod constants;

pub use aliases::{expand_aliases, remove_aliases};
pub use constants::{expand_constants, remove_constants};

use toodle_ir::Tree;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    #[error("line {line}: unknown constant ${name}")]
    UnknownConstant { name: String, line: u32 },
    #[error("line {line}: cyclic alias {}", .chain.join(" -> "))]
    CyclicAlias { chain: Vec<String>, line: u32 },
    #[error("line {line}: cyclic constant {}", chain_of_vars(.chain))]
    CyclicConstant { chain: Vec<String>, line: u32 },
}

fn chain_of_vars(chain: &[String]) -> String {
    chain
        .iter()
        .map(|name| format!("${name}"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Run the whole pipeline: aliases, constants, then strip both kinds of
/// declaration.
#[tracing::instrument(level = "debug", skip_all)]
pub fn expand(tree: &mut Tree) -> Result<(), ExpandError> {
    expand_aliases(tree)?;
    expand_constants(tree)?;
    remove_aliases(tree);
    remove_constants(tree);
    Ok(())
}
