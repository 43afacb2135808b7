//! Schema validation.
//!
//! A schema is itself a 2DL document. Its top-level definitions of type
//! `type` describe the types a validated document may use; those of type
//! `modifier` list the modifiers allowed on top-level definitions:
//!
//! ```text
//! key: modifier
//! table: type composite("column") {
//!     comment: annotation<string>
//! }
//! column: type typeParamCount(1) {
//!     nullable: modifier
//!     size: annotation<int> required
//! }
//! ```
//!
//! A type schema named `*` applies to type names with no schema of their
//! own. Type schemas inherit annotations and modifiers through
//! `extends("base")`.
//!
//! [`Validator::validate`] walks the whole document and reports every
//! mismatch as a [`Violation`]; it never stops early.

mod rules;

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use toodle_ir::{Definition, Tree, TypeId};
use toodle_types::DataTypeCatalog;

/// One schema mismatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Line of the definition the mismatch was found in.
    pub line: u32,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Meta-type names with a meaning for the validator.
pub mod meta {
    pub const TYPE: &str = "type";
    pub const MODIFIER: &str = "modifier";
    pub const ANNOTATION: &str = "annotation";
    pub const WILDCARD: &str = "*";
}

/// A schema tree prepared for validating documents.
pub struct Validator<'s> {
    schema: &'s Tree,
    catalog: &'s DataTypeCatalog,
    type_schemas: FxHashMap<&'s str, TypeId>,
    global_modifiers: FxHashSet<&'s str>,
}

impl<'s> Validator<'s> {
    /// Index the top-level definitions of an expanded schema tree.
    pub fn new(schema: &'s Tree, catalog: &'s DataTypeCatalog) -> Self {
        let mut type_schemas = FxHashMap::default();
        let mut global_modifiers = FxHashSet::default();
        for def in schema.definitions() {
            match schema[def.ty].name.as_str() {
                meta::TYPE => {
                    type_schemas.insert(def.name.as_str(), def.ty);
                }
                meta::MODIFIER => {
                    global_modifiers.insert(def.name.as_str());
                }
                _ => {}
            }
        }
        tracing::debug!(
            types = type_schemas.len(),
            modifiers = global_modifiers.len(),
            "schema indexed"
        );
        Validator {
            schema,
            catalog,
            type_schemas,
            global_modifiers,
        }
    }

    /// Check every definition and type of an expanded document.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn validate(&self, document: &Tree) -> Vec<Violation> {
        let violations = rules::check(self, document);
        tracing::debug!(count = violations.len(), "validation finished");
        violations
    }

    /// Schema for `type_name`, falling back to the wildcard schema.
    pub fn schema_for(&self, type_name: &str) -> Option<TypeId> {
        self.type_schemas
            .get(type_name)
            .or_else(|| self.type_schemas.get(meta::WILDCARD))
            .copied()
    }

    /// Name given by the schema's `extends` annotation.
    pub fn base_type_name(&self, schema: TypeId) -> Option<&'s str> {
        let tree: &'s Tree = self.schema;
        tree[schema].annotation("extends")?.string_params().next()
    }

    /// `schema` followed by the schemas it extends, nearest first. Stops at
    /// an unknown base or at the first repeated schema.
    pub fn extends_chain(&self, schema: TypeId) -> Vec<TypeId> {
        let mut chain = vec![schema];
        let mut current = schema;
        while let Some(base) = self
            .base_type_name(current)
            .and_then(|name| self.type_schemas.get(name).copied())
        {
            if chain.contains(&base) {
                break;
            }
            chain.push(base);
            current = base;
        }
        chain
    }

    /// Whether `type_name` is `expected` or inherits from it through
    /// `extends`.
    pub fn is_of_type(&self, type_name: &str, expected: &str) -> bool {
        let mut seen = FxHashSet::default();
        let mut current = type_name;
        loop {
            if current == expected {
                return true;
            }
            if !seen.insert(current) {
                return false;
            }
            let Some(base) = self.schema_for(current).and_then(|s| self.base_type_name(s)) else {
                return false;
            };
            current = base;
        }
    }

    pub fn is_of_any_type<'a>(
        &self,
        type_name: &str,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        expected.into_iter().any(|e| self.is_of_type(type_name, e))
    }

    /// Annotation definitions admissible on types governed by `schema`,
    /// own ones first. On a name clash the nearest definition wins.
    pub fn allowed_annotations(&self, schema: TypeId) -> Vec<&'s Definition> {
        let tree: &'s Tree = self.schema;
        let mut seen = FxHashSet::default();
        self.extends_chain(schema)
            .into_iter()
            .flat_map(|s| tree.children_of_type(s, meta::ANNOTATION))
            .filter(|def| seen.insert(def.name.as_str()))
            .collect()
    }

    /// Modifiers allowed on definitions nested in a type governed by
    /// `parent_schema`; the global set for top-level definitions.
    pub fn allowed_modifiers(&self, parent_schema: Option<TypeId>) -> FxHashSet<&'s str> {
        match parent_schema {
            None => self.global_modifiers.clone(),
            Some(schema) => {
                let tree: &'s Tree = self.schema;
                self.extends_chain(schema)
                    .into_iter()
                    .flat_map(|s| tree.children_of_type(s, meta::MODIFIER))
                    .map(|def| def.name.as_str())
                    .collect()
            }
        }
    }

    pub fn schema_tree(&self) -> &'s Tree {
        self.schema
    }

    pub fn catalog(&self) -> &'s DataTypeCatalog {
        self.catalog
    }
}
