//! Canonical 2DL writer.
//!
//! Each scope is written as its aliases, then its constants, then its
//! definitions, one per line and indented with tabs. Annotations keep their
//! stored order; parameters are written in source form.

use toodle_ir::{ensure_sufficient_stack, Definition, Tree, TypeId};

use crate::emitter::{Emitter, StringEmitter};

/// Render a whole tree as 2DL source.
pub fn write_tree(tree: &Tree) -> String {
    let mut emitter = StringEmitter::with_capacity(tree.len() * 16);
    TreeWriter::new(tree, &mut emitter).write_document();
    emitter.output()
}

/// Writes a tree to an [`Emitter`].
pub struct TreeWriter<'t, 'e, E: Emitter> {
    tree: &'t Tree,
    out: &'e mut E,
    indent: usize,
}

impl<'t, 'e, E: Emitter> TreeWriter<'t, 'e, E> {
    pub fn new(tree: &'t Tree, out: &'e mut E) -> Self {
        TreeWriter { tree, out, indent: 0 }
    }

    pub fn write_document(&mut self) {
        self.write_scope(self.tree.root());
    }

    fn write_scope(&mut self, id: TypeId) {
        let tree = self.tree;
        let node = &tree[id];
        for alias in &node.aliases {
            self.out.emit_indent(self.indent);
            self.out.emit("alias ");
            self.out.emit(&alias.name);
            self.out.emit(" = ");
            self.write_type(alias.target);
            self.out.emit_newline();
        }
        for binding in &node.consts {
            self.out.emit_indent(self.indent);
            self.out.emit("let $");
            self.out.emit(&binding.name);
            self.out.emit(" = ");
            self.out.emit(&binding.value.to_literal());
            self.out.emit_newline();
        }
        for definition in &node.children {
            self.write_definition(definition);
        }
    }

    fn write_definition(&mut self, definition: &Definition) {
        self.out.emit_indent(self.indent);
        for modifier in &definition.modifiers {
            self.out.emit(modifier);
            self.out.emit_space();
        }
        self.out.emit(&definition.name);
        self.out.emit(": ");
        self.write_type(definition.ty);
        self.out.emit_newline();
    }

    fn write_type(&mut self, id: TypeId) {
        ensure_sufficient_stack(|| {
            let tree = self.tree;
            let node = &tree[id];
            self.out.emit(&node.name);

            if let Some((first, rest)) = node.type_params.split_first() {
                self.out.emit("<");
                self.write_type(*first);
                for &param in rest {
                    self.out.emit(", ");
                    self.write_type(param);
                }
                self.out.emit(">");
            }

            for annotation in &node.annotations {
                self.out.emit_space();
                self.out.emit(&annotation.name);
                if !annotation.params.is_empty() {
                    let params: Vec<String> = annotation.params.iter().map(|p| p.to_literal()).collect();
                    self.out.emit("(");
                    self.out.emit(&params.join(", "));
                    self.out.emit(")");
                }
            }

            if !(node.children.is_empty() && node.aliases.is_empty() && node.consts.is_empty()) {
                self.out.emit(" {");
                self.out.emit_newline();
                self.indent += 1;
                self.write_scope(id);
                self.indent -= 1;
                self.out.emit_indent(self.indent);
                self.out.emit("}");
            }
        });
    }
}
