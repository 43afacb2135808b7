#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use toodle_expand::{expand, expand_aliases, expand_constants, ExpandError};
use toodle_ir::{Decimal, Expr, Tree, TypeId};
use toodle_parse::parse;

fn expanded(source: &str) -> Tree {
    let mut tree = parse(source).expect("parse");
    expand(&mut tree).expect("expand");
    tree
}

fn first_type(tree: &Tree) -> &toodle_ir::TypeNode {
    &tree[tree.definitions()[0].ty]
}

fn params(tree: &Tree, annotation: &str) -> Vec<Expr> {
    first_type(tree).annotation(annotation).expect(annotation).params.clone()
}

#[test]
fn alias_chain_merges_without_overwriting() {
    let tree = expanded(
        "\
alias A = B x(1) y(2)
alias C = A
f: C y(3)",
    );
    let ty = first_type(&tree);
    assert_eq!(ty.name, "B");
    assert_eq!(params(&tree, "x"), vec![Expr::Number(Decimal::from(1))]);
    assert_eq!(params(&tree, "y"), vec![Expr::Number(Decimal::from(3))]);
}

#[test]
fn intermediate_alias_annotations_are_merged() {
    let tree = expanded(
        "\
alias A = B x(1)
alias C = A z(\"c\")
f: C",
    );
    let names: Vec<&str> = first_type(&tree).annotations.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["z", "x"]);
}

#[test]
fn aliases_in_type_params_and_nested_scopes() {
    let tree = expanded(
        "\
alias id = int
t: table {
    alias name = string maxLength(20)
    ids: array<id>
    label: name
    inner: record {
        other: name
    }
}
outside: name",
    );
    let table = tree.definitions()[0].ty;
    let children = &tree[table].children;
    let ids = &tree[children[0].ty];
    assert_eq!(tree[ids.type_params[0]].name, "int");
    assert_eq!(tree[children[1].ty].name, "string");
    let record = children[2].ty;
    assert_eq!(tree[tree[record].children[0].ty].name, "string");

    // Not visible at the document root.
    assert_eq!(tree[tree.definitions()[1].ty].name, "name");
}

#[test]
fn inner_alias_shadows_outer() {
    let tree = expanded(
        "\
alias text = string
t: table {
    alias text = int
    a: text
}
b: text",
    );
    let table = tree.definitions()[0].ty;
    assert_eq!(tree[tree[table].children[0].ty].name, "int");
    assert_eq!(tree[tree.definitions()[1].ty].name, "string");
}

#[test]
fn cyclic_alias_is_rejected() {
    let mut tree = parse("alias A = B\nalias B = A\nf: A").unwrap();
    let err = expand_aliases(&mut tree).unwrap_err();
    assert_eq!(
        err,
        ExpandError::CyclicAlias {
            chain: vec!["A".to_owned(), "B".to_owned(), "A".to_owned()],
            line: 3,
        }
    );
}

#[test]
fn self_alias_is_rejected() {
    let mut tree = parse("alias A = A\nf: A").unwrap();
    assert!(matches!(
        expand_aliases(&mut tree),
        Err(ExpandError::CyclicAlias { .. })
    ));
}

#[test]
fn unused_cycle_is_harmless() {
    let tree = expanded("alias A = B\nalias B = A\nf: int");
    assert_eq!(first_type(&tree).name, "int");
}

#[test]
fn constant_chains_and_scopes() {
    let tree = expanded(
        "\
let $size = $default
let $default = 10
t: table {
    let $size = 20
    a: string maxLength($size)
}
b: string maxLength($size)",
    );
    let table = tree.definitions()[0].ty;
    let a = &tree[tree[table].children[0].ty];
    assert_eq!(
        a.annotation("maxLength").unwrap().params,
        vec![Expr::Number(Decimal::from(20))]
    );
    let b = &tree[tree.definitions()[1].ty];
    assert_eq!(
        b.annotation("maxLength").unwrap().params,
        vec![Expr::Number(Decimal::from(10))]
    );
}

#[test]
fn constants_inside_lists() {
    let tree = expanded(
        "\
let $a = \"x\"
let $both = [$a \"y\"]
f: enum of([$both $a])",
    );
    assert_eq!(
        params(&tree, "of"),
        vec![Expr::List(vec![
            Expr::List(vec![Expr::from("x"), Expr::from("y")]),
            Expr::from("x"),
        ])]
    );
}

#[test]
fn constants_in_aliased_annotations_resolve_at_use_site() {
    let tree = expanded(
        "\
alias short = string maxLength($len)
let $len = 5
t: table {
    let $len = 8
    a: short
}
b: short",
    );
    let table = tree.definitions()[0].ty;
    let a = &tree[tree[table].children[0].ty];
    assert_eq!(
        a.annotation("maxLength").unwrap().params,
        vec![Expr::Number(Decimal::from(8))]
    );
    let b = &tree[tree.definitions()[1].ty];
    assert_eq!(
        b.annotation("maxLength").unwrap().params,
        vec![Expr::Number(Decimal::from(5))]
    );
}

#[test]
fn unknown_constant_is_fatal() {
    let mut tree = parse("a: int\nb: string x($missing)").unwrap();
    let err = expand_constants(&mut tree).unwrap_err();
    assert_eq!(
        err,
        ExpandError::UnknownConstant {
            name: "missing".to_owned(),
            line: 2,
        }
    );
    assert_eq!(err.to_string(), "line 2: unknown constant $missing");
}

#[test]
fn cyclic_constant_is_rejected() {
    let mut tree = parse("let $a = $b\nlet $b = [$a]\nf: int x($a)").unwrap();
    let err = expand_constants(&mut tree).unwrap_err();
    assert_eq!(
        err,
        ExpandError::CyclicConstant {
            chain: vec!["a".to_owned(), "b".to_owned(), "a".to_owned()],
            line: 3,
        }
    );
    assert_eq!(err.to_string(), "line 3: cyclic constant $a -> $b -> $a");
}

#[test]
fn expand_strips_declarations() {
    let tree = expanded(
        "\
alias id = int
let $n = 1
t: table {
    alias x = string
    let $m = 2
    a: x size($m)
}",
    );
    for id in tree.reachable() {
        assert!(tree[id].aliases.is_empty());
        assert!(tree[id].consts.is_empty());
    }
    assert!(tree[TypeId::ROOT].alias("id").is_none());
}

proptest! {
    #[test]
    fn alias_chains_of_any_length_resolve(len in 1usize..24) {
        let mut source = String::new();
        for i in 0..len {
            let target = if i + 1 == len { "base".to_owned() } else { format!("A{}", i + 1) };
            source.push_str(&format!("alias A{i} = {target} a{i}({i})\n"));
        }
        source.push_str("f: A0 a0(\"kept\")\n");
        let tree = expanded(&source);
        let ty = first_type(&tree);
        prop_assert_eq!(&ty.name, "base");
        prop_assert_eq!(ty.annotations.len(), len);
        prop_assert_eq!(&ty.annotation("a0").unwrap().params, &vec![Expr::from("kept")]);
    }
}
