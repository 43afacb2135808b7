//! Depth-first traversal of a definition tree.

use crate::{ensure_sufficient_stack, Definition, Tree, TypeId};

/// A node handed to the walk callback.
#[derive(Copy, Clone, Debug)]
pub enum Node<'t> {
    Definition(&'t Definition),
    Type(TypeId),
}

/// What the walk does after visiting a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Walk {
    Continue,
    /// Do not descend: for a definition, skip its type; for a type, skip its
    /// children and type parameters.
    SkipChildren,
}

/// Ancestors of the node being visited, innermost last.
#[derive(Debug, Default)]
pub struct WalkContext<'t> {
    definitions: Vec<&'t Definition>,
    types: Vec<TypeId>,
}

impl<'t> WalkContext<'t> {
    /// Nearest definition strictly enclosing a type, or enclosing a
    /// definition's parent type.
    pub fn enclosing_definition(&self) -> Option<&'t Definition> {
        self.definitions.last().copied()
    }

    /// Nearest enclosing type. `None` for top-level definitions.
    pub fn enclosing_type(&self) -> Option<TypeId> {
        self.types.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.types.len()
    }
}

/// Visit every definition and type reachable from the document root.
///
/// Order: a definition, then its type, then that type's child definitions
/// (recursively), then its type parameters. The document root itself is not
/// visited. Alias targets are not visited; expand the tree first.
pub fn walk<'t, F>(tree: &'t Tree, mut visit: F)
where
    F: FnMut(Node<'t>, &WalkContext<'t>) -> Walk,
{
    let mut cx = WalkContext::default();
    for definition in tree.definitions() {
        walk_definition(tree, definition, &mut cx, &mut visit);
    }
}

fn walk_definition<'t, F>(tree: &'t Tree, definition: &'t Definition, cx: &mut WalkContext<'t>, visit: &mut F)
where
    F: FnMut(Node<'t>, &WalkContext<'t>) -> Walk,
{
    if visit(Node::Definition(definition), cx) == Walk::SkipChildren {
        return;
    }
    cx.definitions.push(definition);
    walk_type(tree, definition.ty, cx, visit);
    cx.definitions.pop();
}

fn walk_type<'t, F>(tree: &'t Tree, id: TypeId, cx: &mut WalkContext<'t>, visit: &mut F)
where
    F: FnMut(Node<'t>, &WalkContext<'t>) -> Walk,
{
    ensure_sufficient_stack(|| {
        if visit(Node::Type(id), cx) == Walk::SkipChildren {
            return;
        }
        cx.types.push(id);
        let node = &tree[id];
        for child in &node.children {
            walk_definition(tree, child, cx, visit);
        }
        for &param in &node.type_params {
            walk_type(tree, param, cx, visit);
        }
        cx.types.pop();
    });
}

#[cfg(test)]
mod tests;
