//! The per-node checks run by [`Validator::validate`](crate::Validator::validate).

use toodle_ir::{walk, Annotation, Definition, Expr, Node, Tree, TypeId, Walk, WalkContext};
use toodle_types::DataType;

use crate::{Validator, Violation};

pub(crate) fn check(validator: &Validator<'_>, document: &Tree) -> Vec<Violation> {
    let mut checker = Checker {
        validator,
        document,
        violations: Vec::new(),
    };
    walk(document, |node, cx| match node {
        Node::Definition(def) => checker.definition(def, cx),
        Node::Type(id) => checker.ty(id, cx),
    });
    checker.violations
}

struct Checker<'v, 's, 'd> {
    validator: &'v Validator<'s>,
    document: &'d Tree,
    violations: Vec<Violation>,
}

impl<'s> Checker<'_, 's, '_> {
    fn report(&mut self, line: u32, message: String) {
        tracing::trace!(line, %message, "violation");
        self.violations.push(Violation { line, message });
    }

    /// Modifiers are checked against the schema of the enclosing type.
    fn definition(&mut self, def: &Definition, cx: &WalkContext<'_>) -> Walk {
        let parent_schema = if let Some(parent) = cx.enclosing_type() {
            let document = self.document;
            let parent_name = &document[parent].name;
            let Some(schema) = self.validator.schema_for(parent_name) else {
                self.report(def.line, format!("Unknown type: {parent_name}"));
                return Walk::SkipChildren;
            };
            Some(schema)
        } else {
            None
        };
        let allowed = self.validator.allowed_modifiers(parent_schema);
        for modifier in &def.modifiers {
            if !allowed.contains(modifier.as_str()) {
                self.report(def.line, format!("{}: Invalid modifier: {modifier}", def.name));
            }
        }
        Walk::Continue
    }

    fn ty(&mut self, id: TypeId, cx: &WalkContext<'_>) -> Walk {
        let Some(def) = cx.enclosing_definition() else {
            return Walk::Continue;
        };
        let document = self.document;
        let ty_name = &document[id].name;
        let Some(schema) = self.validator.schema_for(ty_name) else {
            self.report(def.line, format!("Unknown type: {ty_name}"));
            return Walk::Continue;
        };
        self.abstract_type(def, id, schema);
        self.type_param_count(def, id, schema);
        self.composite(def, id, schema);
        self.annotations(def, id, schema);
        Walk::Continue
    }

    fn abstract_type(&mut self, def: &Definition, id: TypeId, schema: TypeId) {
        if self.validator.schema_tree()[schema].has_annotation("abstract") {
            let document = self.document;
            let name = &document[id].name;
            self.report(
                def.line,
                format!("{}: cannot be defined of type '{name}' because '{name}' is abstract.", def.name),
            );
        }
    }

    fn type_param_count(&mut self, def: &Definition, id: TypeId, schema: TypeId) {
        let schema_node = &self.validator.schema_tree()[schema];
        let bound = |name: &str| schema_node.annotation(name).and_then(Annotation::first_int);
        let exact = bound("typeParamCount");
        let min = bound("minTypeParamCount").or(exact).unwrap_or(0);
        // `None` is unbounded.
        let max = match bound("maxTypeParamCount") {
            Some(max) if max < 0 => None,
            Some(max) => Some(max),
            None => Some(exact.unwrap_or(0)),
        };

        let actual = i64::try_from(self.document[id].type_params.len()).unwrap_or(i64::MAX);
        if let Some(exact) = exact.filter(|&exact| exact != actual) {
            self.report(
                def.line,
                format!("{}: expected {exact} type parameters, got {actual}", def.name),
            );
        }
        if actual < min {
            self.report(
                def.line,
                format!("{}: expected at least {min} type parameters, got {actual}", def.name),
            );
        }
        if let Some(max) = max.filter(|&max| actual > max) {
            self.report(
                def.line,
                format!("{}: expected at most {max} type parameters, got {actual}", def.name),
            );
        }
    }

    fn composite(&mut self, def: &Definition, id: TypeId, schema: TypeId) {
        let document = self.document;
        let children = &document[id].children;
        let Some(composite) = self.validator.schema_tree()[schema].annotation("composite") else {
            if !children.is_empty() {
                self.report(def.line, format!("{}: no subdefinitions expected", def.name));
            }
            return;
        };
        let allowed: Vec<&str> = composite.string_params().collect();
        if allowed.is_empty() {
            return;
        }
        for child in children {
            let child_type = &document[child.ty].name;
            if !self.validator.is_of_any_type(child_type, allowed.iter().copied()) {
                self.report(
                    child.line,
                    format!(
                        "{}: type is {child_type}, allowed types in this context are: {}",
                        child.name,
                        allowed.join(", ")
                    ),
                );
            }
        }
    }

    fn annotations(&mut self, def: &Definition, id: TypeId, schema: TypeId) {
        let schema_tree = self.validator.schema_tree();
        let allowed = self.validator.allowed_annotations(schema);
        let document = self.document;
        let node = &document[id];

        for required in &allowed {
            if schema_tree[required.ty].has_annotation("required") && !node.has_annotation(&required.name) {
                self.report(
                    def.line,
                    format!("{}: a required annotation '{}' is missing", def.name, required.name),
                );
            }
        }

        for annotation in &node.annotations {
            let Some(annotation_def) = allowed.iter().find(|a| a.name == annotation.name) else {
                self.report(
                    def.line,
                    format!("{}: the annotation '{}' is not allowed", def.name, annotation.name),
                );
                continue;
            };
            let Some(&param_type) = schema_tree[annotation_def.ty].type_params.first() else {
                continue;
            };
            let (min, max) = match schema_tree[param_type].name.as_str() {
                "bool" => (0, 1),
                "variadic" => (0, usize::MAX),
                _ => (1, 1),
            };
            self.param_count(def, annotation, min, max);
            self.param_type(def, annotation, param_type);
        }
    }

    fn param_count(&mut self, def: &Definition, annotation: &Annotation, min: usize, max: usize) {
        let count = annotation.params.len();
        if (min..=max).contains(&count) {
            return;
        }
        let expected = if min == max {
            format!("expected {min} parameters")
        } else {
            format!("expected between {min} and {max} parameters")
        };
        self.report(
            def.line,
            format!("{}, annotation {}: {expected}, got {count}", def.name, annotation.name),
        );
    }

    fn param_type(&mut self, def: &Definition, annotation: &Annotation, expected: TypeId) {
        let expected_node = &self.validator.schema_tree()[expected];
        let prefix = format!("{}, annotation {}", def.name, annotation.name);
        match expected_node.name.as_str() {
            "any" | "primitive" => {}
            "bool" => {
                for param in annotation.params.iter().filter(|p| p.as_bool().is_none()) {
                    self.report(
                        def.line,
                        format!("{prefix}: was expecting 'true' or 'false', got '{}'", param_text(param)),
                    );
                }
            }
            scalar @ ("string" | "number" | "int") => {
                let ty = DataType::simple(scalar);
                let catalog = self.validator.catalog();
                for param in annotation.params.iter().filter(|p| !catalog.is_literal_of(p, &ty)) {
                    self.report(
                        def.line,
                        format!("{prefix}: expected {scalar} parameter, got '{}'", param_text(param)),
                    );
                }
            }
            "enum" => {
                let allowed: Vec<&str> = expected_node
                    .annotation("of")
                    .map(|of| of.string_params().collect())
                    .unwrap_or_default();
                for param in &annotation.params {
                    if param.as_str().is_some_and(|value| allowed.contains(&value)) {
                        continue;
                    }
                    self.report(
                        def.line,
                        format!(
                            "{prefix}: invalid enum value '{}'. Must be one of: {}",
                            param_text(param),
                            allowed.join(", ")
                        ),
                    );
                }
            }
            "variadic" => {
                if let Some(&item) = expected_node.type_params.first() {
                    self.param_type(def, annotation, item);
                } else {
                    self.report(def.line, format!("{prefix}: invalid type for parameters: variadic"));
                }
            }
            other => {
                self.report(def.line, format!("{prefix}: invalid type for parameters: {other}"));
            }
        }
    }
}

/// Strings without their quotes, everything else in source form.
fn param_text(param: &Expr) -> String {
    match param {
        Expr::Str(s) => s.clone(),
        other => other.to_literal(),
    }
}
