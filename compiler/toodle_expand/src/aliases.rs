//! Alias expansion and removal.

use rustc_hash::FxHashSet;
use toodle_ir::{ensure_sufficient_stack, Tree, TypeId};
use tracing::trace;

use crate::ExpandError;

/// Replace every aliased type name by its target.
///
/// Each node is resolved in `scope`: the type enclosing the definition the
/// node belongs to. Type parameters share their owner's scope; child
/// definitions are resolved in the scope of the type that declares them.
/// Annotations already present at the use site win over the target's.
pub fn expand_aliases(tree: &mut Tree) -> Result<(), ExpandError> {
    expand_node(tree, TypeId::ROOT, TypeId::ROOT, 0)
}

fn expand_node(tree: &mut Tree, id: TypeId, scope: TypeId, line: u32) -> Result<(), ExpandError> {
    ensure_sufficient_stack(|| {
        resolve(tree, id, scope, line)?;

        let params = tree[id].type_params.clone();
        for param in params {
            expand_node(tree, param, scope, line)?;
        }

        let children: Vec<(TypeId, u32)> = tree[id].children.iter().map(|d| (d.ty, d.line)).collect();
        for (child, child_line) in children {
            expand_node(tree, child, id, child_line)?;
        }
        Ok(())
    })
}

/// Follow the alias chain of one node until its name is no alias.
fn resolve(tree: &mut Tree, id: TypeId, scope: TypeId, line: u32) -> Result<(), ExpandError> {
    let mut seen = FxHashSet::default();
    let mut chain: Vec<String> = Vec::new();
    while let Some(target) = tree.lookup_alias(scope, &tree[id].name) {
        let name = tree[id].name.clone();
        chain.push(name.clone());
        if !seen.insert(name) {
            return Err(ExpandError::CyclicAlias { chain, line });
        }

        let target_name = tree[target].name.clone();
        let inherited = tree[target].annotations.clone();
        trace!(alias = %tree[id].name, target = %target_name, "expand alias");
        let node = &mut tree[id];
        node.name = target_name;
        for annotation in inherited {
            if !node.has_annotation(&annotation.name) {
                node.annotations.push(annotation);
            }
        }
    }
    Ok(())
}

/// Drop alias declarations from every reachable node.
pub fn remove_aliases(tree: &mut Tree) {
    for id in tree.reachable() {
        tree[id].aliases.clear();
    }
}
