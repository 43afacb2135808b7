//! Productions and error reporting.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use toodle_ir::{BuildError, Decimal, Expr, Tree, TypeId};

use crate::{parse, ParseError};

fn type_names(tree: &Tree) -> Vec<(String, String)> {
    tree.definitions()
        .iter()
        .map(|d| (d.name.clone(), tree[d.ty].name.clone()))
        .collect()
}

#[test]
fn test_empty_document() {
    let tree = parse("  // nothing here\n").unwrap();
    assert!(tree.is_empty());
}

#[test]
fn test_definitions_with_modifiers_and_lines() {
    let tree = parse("users: table\n\nkey required id: int").unwrap();
    assert_eq!(
        type_names(&tree),
        vec![
            ("users".to_owned(), "table".to_owned()),
            ("id".to_owned(), "int".to_owned()),
        ]
    );
    let id = &tree.definitions()[1];
    assert_eq!(id.modifiers, vec!["key", "required"]);
    assert_eq!(id.line, 3);
}

#[test]
fn test_nested_block_and_type_params() {
    let source = "\
users: table {
    id: int autoincrement
    tags: map<string, array<int>> size(10, 20)
}";
    let tree = parse(source).unwrap();
    let table = tree.definitions()[0].ty;
    let children = &tree[table].children;
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].line, 3);

    let id = &tree[children[0].ty];
    assert!(id.has_annotation("autoincrement"));
    assert!(id.annotation("autoincrement").unwrap().params.is_empty());

    let map = &tree[children[1].ty];
    assert_eq!(map.type_params.len(), 2);
    let array = &tree[map.type_params[1]];
    assert_eq!(array.name, "array");
    assert_eq!(tree[array.type_params[0]].name, "int");
    assert_eq!(
        map.annotation("size").unwrap().params,
        vec![Expr::Number(Decimal::from(10)), Expr::Number(Decimal::from(20))]
    );
}

#[test]
fn test_alias_and_const_statements() {
    let source = "\
alias id = int auto
let $names = [\"a\", \"b\" $other]
let $other = \"c\"
x: id";
    let tree = parse(source).unwrap();
    let root = &tree[TypeId::ROOT];
    let target = root.alias("id").unwrap();
    assert_eq!(tree[target].name, "int");
    assert_eq!(
        root.constant("names"),
        Some(&Expr::List(vec![
            Expr::from("a"),
            Expr::from("b"),
            Expr::Var("other".to_owned()),
        ]))
    );
    assert_eq!(type_names(&tree), vec![("x".to_owned(), "id".to_owned())]);
}

#[test]
fn test_triple_quoted_parameter() {
    let source = "doc: text comment(\"\"\"\n    |first\n    |second\n\"\"\")";
    let tree = parse(source).unwrap();
    let text = &tree[tree.definitions()[0].ty];
    assert_eq!(
        text.annotation("comment").unwrap().params,
        vec![Expr::from("first\nsecond")]
    );
}

#[test]
fn test_unexpected_token() {
    let err = parse("a: int\nb: <").unwrap_err();
    assert_eq!(err.line(), 2);
    assert!(matches!(err, ParseError::UnexpectedToken { expected: "identifier", .. }));
}

#[test]
fn test_missing_closing_brace() {
    let err = parse("a: table {\n  b: int\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedToken { expected: "'}'", ref found, .. } if found == "end of input"
    ));
}

#[test]
fn test_stray_closing_brace() {
    assert!(parse("a: int }").is_err());
}

#[test]
fn test_lexer_errors_surface() {
    let err = parse("a: int\nb: str@ng").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidToken {
            line: 2,
            text: "@".to_owned(),
        }
    );
}

#[test]
fn test_bad_literal_is_a_build_error() {
    let err = parse("a: int x(\"\\q\")").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Build {
            line: 1,
            source: BuildError::InvalidLiteral { .. },
        }
    ));
}
