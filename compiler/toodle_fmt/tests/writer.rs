#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use toodle_expand::expand;
use toodle_fmt::{write_tree, Emitter, StringEmitter, TreeWriter};
use toodle_ir::{escape_string, Tree};
use toodle_parse::parse;

fn expanded(source: &str) -> Tree {
    let mut tree = parse(source).expect("parse");
    expand(&mut tree).expect("expand");
    tree
}

const SOURCE: &str = "\
let $w = 10
alias Id = column key
key users: table comment(\"a \\\"b\\\"\") {
\tid: Id<int> size($w)
\tnested: record {
\t\tx: map<string, array<int>> tags([1 2.50 \"z\"])
\t}
}
";

#[test]
fn writes_expanded_tree_canonically() {
    let out = write_tree(&expanded(SOURCE));
    assert_eq!(
        out,
        "\
key users: table comment(\"a \\\"b\\\"\") {
\tid: column<int> size(10) key
\tnested: record {
\t\tx: map<string, array<int>> tags([1 2.50 \"z\"])
\t}
}
"
    );
}

#[test]
fn writes_aliases_and_constants_before_definitions() {
    let tree = parse(SOURCE).expect("parse");
    let out = write_tree(&tree);
    assert!(out.starts_with("alias Id = column key\nlet $w = 10\nkey users:"), "{out}");
    assert!(out.contains("\tid: Id<int> size($w)\n"), "{out}");
    assert!(parse(&out).expect("reparse").same_structure(&tree));
}

#[test]
fn empty_tree_writes_nothing() {
    assert_eq!(write_tree(&Tree::new()), "");
}

#[test]
fn writer_accepts_any_emitter() {
    struct Counting {
        inner: StringEmitter,
        lines: usize,
    }
    impl Emitter for Counting {
        fn emit(&mut self, text: &str) {
            self.inner.emit(text);
        }
        fn emit_newline(&mut self) {
            self.lines += 1;
            self.inner.emit_newline();
        }
        fn emit_indent(&mut self, level: usize) {
            self.inner.emit_indent(level);
        }
        fn emit_space(&mut self) {
            self.inner.emit_space();
        }
    }

    let tree = expanded("a: int\nb: string\nc: record {\n\td: int\n}");
    let mut out = Counting {
        inner: StringEmitter::new(),
        lines: 0,
    };
    TreeWriter::new(&tree, &mut out).write_document();
    assert_eq!(out.lines, 5);
    assert_eq!(out.inner.output(), "a: int\nb: string\nc: record {\n\td: int\n}\n");
}

// Generated documents, rendered to loosely formatted source.

#[derive(Clone, Debug)]
struct GenDef {
    modifiers: Vec<String>,
    name: String,
    ty: GenType,
}

#[derive(Clone, Debug)]
struct GenType {
    name: String,
    params: Vec<GenType>,
    annotations: Vec<(String, Vec<String>)>,
    children: Vec<GenDef>,
}

impl GenDef {
    fn render(&self, out: &mut String) {
        for modifier in &self.modifiers {
            out.push_str(modifier);
            out.push(' ');
        }
        out.push_str(&self.name);
        out.push_str(" : ");
        self.ty.render(out);
        out.push('\n');
    }
}

impl GenType {
    fn render(&self, out: &mut String) {
        out.push_str(&self.name);
        if !self.params.is_empty() {
            out.push('<');
            for (i, param) in self.params.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                param.render(out);
            }
            out.push('>');
        }
        for (name, params) in &self.annotations {
            out.push(' ');
            out.push_str(name);
            if !params.is_empty() {
                out.push('(');
                out.push_str(&params.join(","));
                out.push(')');
            }
        }
        if !self.children.is_empty() {
            out.push_str("{\n");
            for child in &self.children {
                child.render(out);
            }
            out.push('}');
        }
    }
}

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,5}".prop_filter("keyword", |s| s != "alias" && s != "let")
}

fn literal() -> impl Strategy<Value = String> {
    let scalar = prop_oneof![
        any::<i32>().prop_map(|n| n.to_string()),
        (0u32..1000, 0u32..100).prop_map(|(a, b)| format!("{a}.{b:02}")),
        "[a-z \\\\\"\n\t]{0,8}".prop_map(|s| escape_string(&s)),
    ];
    prop_oneof![
        4 => scalar.clone(),
        1 => prop::collection::vec(scalar, 0..3).prop_map(|items| format!("[{}]", items.join(" "))),
    ]
}

fn annotations() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec((ident(), prop::collection::vec(literal(), 0..3)), 0..3)
}

fn leaf_type() -> impl Strategy<Value = GenType> {
    (ident(), annotations()).prop_map(|(name, annotations)| GenType {
        name,
        params: Vec::new(),
        annotations,
        children: Vec::new(),
    })
}

fn definition() -> impl Strategy<Value = GenDef> {
    let leaf = (
        prop::collection::vec(ident(), 0..2),
        ident(),
        leaf_type(),
        prop::collection::vec(leaf_type(), 0..3),
    )
        .prop_map(|(modifiers, name, mut ty, params)| {
            ty.params = params;
            GenDef { modifiers, name, ty }
        });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (ident(), leaf_type(), prop::collection::vec(inner, 1..4)).prop_map(|(name, mut ty, children)| {
            ty.children = children;
            GenDef {
                modifiers: Vec::new(),
                name,
                ty,
            }
        })
    })
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(definition(), 0..5).prop_map(|defs| {
        let mut out = String::new();
        for def in &defs {
            def.render(&mut out);
        }
        out
    })
}

proptest! {
    #[test]
    fn written_trees_parse_back_to_the_same_structure(source in document()) {
        let tree = expanded(&source);
        let written = write_tree(&tree);
        let reparsed = expanded(&written);
        prop_assert!(reparsed.same_structure(&tree), "source:\n{}\nwritten:\n{}", source, written);
        prop_assert_eq!(write_tree(&reparsed), written);
    }
}
