//! Constant expansion and removal.

use toodle_ir::{ensure_sufficient_stack, Expr, Tree, TypeId};
use tracing::trace;

use crate::ExpandError;

/// Replace every `$name` in annotation parameters by the value it is bound
/// to, following chains of references. Scoping is the same as for aliases.
pub fn expand_constants(tree: &mut Tree) -> Result<(), ExpandError> {
    expand_node(tree, TypeId::ROOT, TypeId::ROOT, 0)
}

fn expand_node(tree: &mut Tree, id: TypeId, scope: TypeId, line: u32) -> Result<(), ExpandError> {
    ensure_sufficient_stack(|| {
        let resolved = {
            let view: &Tree = tree;
            view[id]
                .annotations
                .iter()
                .map(|annotation| {
                    annotation
                        .params
                        .iter()
                        .map(|param| resolve(view, scope, param, line, &mut Vec::new()))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        for (annotation, params) in tree[id].annotations.iter_mut().zip(resolved) {
            annotation.params = params;
        }

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

/// Fully resolved copy of `expr`. `chain` holds the references being
/// resolved on the current path.
fn resolve(
    tree: &Tree,
    scope: TypeId,
    expr: &Expr,
    line: u32,
    chain: &mut Vec<String>,
) -> Result<Expr, ExpandError> {
    ensure_sufficient_stack(|| match expr {
        Expr::Var(name) => {
            if chain.contains(name) {
                let mut chain = chain.clone();
                chain.push(name.clone());
                return Err(ExpandError::CyclicConstant { chain, line });
            }
            let value = tree
                .lookup_const(scope, name)
                .ok_or_else(|| ExpandError::UnknownConstant {
                    name: name.clone(),
                    line,
                })?;
            trace!(name = %name, value = %value, "expand constant");
            chain.push(name.clone());
            let resolved = resolve(tree, scope, value, line, chain);
            chain.pop();
            resolved
        }
        Expr::List(items) => items
            .iter()
            .map(|item| resolve(tree, scope, item, line, chain))
            .collect::<Result<Vec<_>, _>>()
            .map(Expr::List),
        literal => Ok(literal.clone()),
    })
}

/// Drop constant declarations from every reachable node.
pub fn remove_constants(tree: &mut Tree) {
    for id in tree.reachable() {
        tree[id].consts.clear();
    }
}
