#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

/// users: table { id: int; tags: array<string> }
fn sample() -> Tree {
    let mut tree = Tree::new();
    let table = tree.alloc("table", Some(TypeId::ROOT));
    tree[TypeId::ROOT]
        .children
        .push(Definition::new("users", Vec::new(), table, 1));
    let int = tree.alloc("int", Some(table));
    tree[table].children.push(Definition::new("id", Vec::new(), int, 2));
    let array = tree.alloc("array", Some(table));
    tree[table].children.push(Definition::new("tags", Vec::new(), array, 3));
    let string = tree.alloc("string", Some(array));
    tree[array].type_params.push(string);
    tree
}

fn describe(tree: &Tree, node: Node<'_>) -> String {
    match node {
        Node::Definition(def) => format!("def {}", def.name),
        Node::Type(id) => format!("type {}", tree[id].name),
    }
}

#[test]
fn test_walk_order() {
    let tree = sample();
    let mut seen = Vec::new();
    walk(&tree, |node, _| {
        seen.push(describe(&tree, node));
        Walk::Continue
    });
    assert_eq!(
        seen,
        [
            "def users",
            "type table",
            "def id",
            "type int",
            "def tags",
            "type array",
            "type string",
        ]
    );
}

#[test]
fn test_context_tracks_ancestors() {
    let tree = sample();
    let mut seen = Vec::new();
    walk(&tree, |node, cx| {
        let def = cx.enclosing_definition().map_or("-", |d| d.name.as_str());
        let ty = cx.enclosing_type().map_or("-", |t| tree[t].name.as_str());
        seen.push(format!("{} in {def}/{ty}", describe(&tree, node)));
        Walk::Continue
    });
    assert_eq!(
        seen,
        [
            "def users in -/-",
            "type table in users/-",
            "def id in users/table",
            "type int in id/table",
            "def tags in users/table",
            "type array in tags/table",
            "type string in tags/array",
        ]
    );
}

#[test]
fn test_skip_children() {
    let tree = sample();
    let mut seen = Vec::new();
    walk(&tree, |node, _| {
        seen.push(describe(&tree, node));
        match node {
            Node::Definition(def) if def.name == "id" => Walk::SkipChildren,
            Node::Type(id) if tree[id].name == "array" => Walk::SkipChildren,
            _ => Walk::Continue,
        }
    });
    assert_eq!(
        seen,
        ["def users", "type table", "def id", "def tags", "type array"]
    );
}
