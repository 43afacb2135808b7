//! The definition tree.
//!
//! A document is a synthetic, unnamed root type whose children are the
//! top-level definitions. Every type node lives in the tree's arena and is
//! addressed by [`TypeId`]. Ownership follows the arena layout:
//!
//! - a [`Definition`] owns exactly one type node (`ty`)
//! - a type node owns its `type_params` and the types of its `children`
//! - an [`Alias`] owns its target type node
//! - `parent` is a back-reference only
//!
//! Nodes are never freed individually. Passes that drop declarations (alias
//! removal) leave the orphaned nodes in the arena; everything that reads a
//! tree starts from the root and only sees reachable nodes.

use std::ops::{Index, IndexMut};

use crate::{ensure_sufficient_stack, Expr, TypeId};

/// A named list of parameters attached to a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub params: Vec<Expr>,
}

impl Annotation {
    pub fn new(name: impl Into<String>, params: Vec<Expr>) -> Self {
        Annotation {
            name: name.into(),
            params,
        }
    }

    /// The string parameters, skipping anything that is not a string.
    pub fn string_params(&self) -> impl Iterator<Item = &str> {
        self.params.iter().filter_map(Expr::as_str)
    }

    /// First parameter read as an integer, if it is one.
    pub fn first_int(&self) -> Option<i64> {
        self.params.first().and_then(Expr::as_int)
    }
}

/// `alias name = <type>`, visible to the declaring type and its descendants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub target: TypeId,
}

/// `let $name = <expr>`, visible to the declaring type and its descendants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstBinding {
    pub name: String,
    pub value: Expr,
}

/// A named, modified binding of an identifier to a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    /// Modifier flags in source order, without duplicates.
    pub modifiers: Vec<String>,
    pub ty: TypeId,
    /// 1-based source line of the definition's first token.
    pub line: u32,
}

impl Definition {
    pub fn new(name: impl Into<String>, modifiers: Vec<String>, ty: TypeId, line: u32) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(modifiers.len());
        for modifier in modifiers {
            if !unique.contains(&modifier) {
                unique.push(modifier);
            }
        }
        Definition {
            name: name.into(),
            modifiers: unique,
            ty,
            line,
        }
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

/// One occurrence of a named type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeNode {
    /// Reassigned by alias expansion.
    pub name: String,
    /// Unique by name, in declaration order.
    pub annotations: Vec<Annotation>,
    pub children: Vec<Definition>,
    pub type_params: Vec<TypeId>,
    pub aliases: Vec<Alias>,
    pub consts: Vec<ConstBinding>,
    /// Enclosing type; `None` only for the document root.
    pub parent: Option<TypeId>,
}

impl TypeNode {
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    /// Insert an annotation, replacing (in place) one with the same name.
    pub fn set_annotation(&mut self, annotation: Annotation) {
        match self.annotations.iter_mut().find(|a| a.name == annotation.name) {
            Some(existing) => *existing = annotation,
            None => self.annotations.push(annotation),
        }
    }

    /// Declare an alias in this scope, replacing a previous one with the same name.
    pub fn add_alias(&mut self, name: impl Into<String>, target: TypeId) {
        let name = name.into();
        match self.aliases.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.target = target,
            None => self.aliases.push(Alias { name, target }),
        }
    }

    /// Declare a constant in this scope, replacing a previous one with the same name.
    pub fn add_const(&mut self, name: impl Into<String>, value: Expr) {
        let name = name.into();
        match self.consts.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.value = value,
            None => self.consts.push(ConstBinding { name, value }),
        }
    }

    pub fn alias(&self, name: &str) -> Option<TypeId> {
        self.aliases.iter().find(|a| a.name == name).map(|a| a.target)
    }

    pub fn constant(&self, name: &str) -> Option<&Expr> {
        self.consts.iter().find(|c| c.name == name).map(|c| &c.value)
    }
}

/// Arena-backed definition tree.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<TypeNode>,
}

impl Tree {
    /// A tree holding only the unnamed document root.
    pub fn new() -> Self {
        Tree {
            nodes: vec![TypeNode::default()],
        }
    }

    #[inline]
    pub fn root(&self) -> TypeId {
        TypeId::ROOT
    }

    /// Number of nodes in the arena, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions().is_empty()
    }

    /// Allocate a new, unattached type node.
    ///
    /// Attaching it (as a definition's type, a type parameter or an alias
    /// target) is up to the caller.
    pub fn alloc(&mut self, name: impl Into<String>, parent: Option<TypeId>) -> TypeId {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("definition tree exceeds {} type nodes", u32::MAX));
        self.nodes.push(TypeNode {
            name: name.into(),
            parent,
            ..TypeNode::default()
        });
        TypeId::new(index)
    }

    /// Top-level definitions of the document.
    pub fn definitions(&self) -> &[Definition] {
        &self[TypeId::ROOT].children
    }

    pub fn parent(&self, id: TypeId) -> Option<TypeId> {
        self[id].parent
    }

    /// `id` followed by each enclosing type, outward to the root.
    pub fn scopes(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        std::iter::successors(Some(id), move |&current| self.parent(current))
    }

    /// Nearest alias named `name` visible from `scope`.
    pub fn lookup_alias(&self, scope: TypeId, name: &str) -> Option<TypeId> {
        self.scopes(scope).find_map(|s| self[s].alias(name))
    }

    /// Nearest constant named `name` visible from `scope`.
    pub fn lookup_const(&self, scope: TypeId, name: &str) -> Option<&Expr> {
        self.scopes(scope).find_map(|s| self[s].constant(name))
    }

    /// Children of `id` whose type is named `type_name`.
    pub fn children_of_type<'a>(
        &'a self,
        id: TypeId,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a Definition> + 'a {
        self[id]
            .children
            .iter()
            .filter(move |d| self[d.ty].name == type_name)
    }

    /// Every node reachable from the root through children, type parameters
    /// and alias targets, in depth-first order.
    pub fn reachable(&self) -> Vec<TypeId> {
        let mut out = Vec::new();
        let mut stack = vec![TypeId::ROOT];
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self[id];
            stack.extend(node.aliases.iter().rev().map(|a| a.target));
            stack.extend(node.type_params.iter().rev().copied());
            stack.extend(node.children.iter().rev().map(|d| d.ty));
        }
        out
    }

    /// Structural equality of the reachable trees.
    ///
    /// Arena layout and source lines are ignored; annotation order and
    /// modifier order are ignored. Names, parameters, children, type
    /// parameters, aliases and constants must match.
    pub fn same_structure(&self, other: &Tree) -> bool {
        same_node(self, TypeId::ROOT, other, TypeId::ROOT)
    }
}

fn same_node(a: &Tree, a_id: TypeId, b: &Tree, b_id: TypeId) -> bool {
    ensure_sufficient_stack(|| {
        let (x, y) = (&a[a_id], &b[b_id]);
        x.name == y.name
            && x.annotations.len() == y.annotations.len()
            && x.annotations.iter().all(|ann| y.annotation(&ann.name) == Some(ann))
            && x.consts == y.consts
            && x.type_params.len() == y.type_params.len()
            && x.type_params
                .iter()
                .zip(&y.type_params)
                .all(|(&p, &q)| same_node(a, p, b, q))
            && x.aliases.len() == y.aliases.len()
            && x.aliases
                .iter()
                .zip(&y.aliases)
                .all(|(p, q)| p.name == q.name && same_node(a, p.target, b, q.target))
            && x.children.len() == y.children.len()
            && x.children.iter().zip(&y.children).all(|(p, q)| {
                p.name == q.name
                    && p.modifiers.len() == q.modifiers.len()
                    && p.modifiers.iter().all(|m| q.has_modifier(m))
                    && same_node(a, p.ty, b, q.ty)
            })
    })
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<TypeId> for Tree {
    type Output = TypeNode;

    #[inline]
    fn index(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<TypeId> for Tree {
    #[inline]
    fn index_mut(&mut self, id: TypeId) -> &mut TypeNode {
        &mut self.nodes[id.index()]
    }
}
