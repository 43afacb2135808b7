//! JSON export.
//!
//! The document becomes an array of definitions:
//!
//! ```json
//! [{"name": "id", "modifiers": ["key"],
//!   "type": {"name": "column", "typeParams": [{"name": "int"}],
//!            "annotations": {"size": [20]}}}]
//! ```
//!
//! Empty `modifiers`, `typeParams`, `subDefinitions` and `annotations` are
//! omitted. Annotation parameters become JSON scalars. Numbers are written
//! with their exact source digits and scale (`2.50` stays `2.50`), however
//! wide they are.

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use toodle_ir::{Annotation, Definition, Expr, Tree, TypeId};

#[derive(Debug, Serialize)]
pub struct JsonDefinition<'t> {
    pub name: &'t str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<&'t str>,
    #[serde(rename = "type")]
    pub ty: JsonType<'t>,
}

#[derive(Debug, Serialize)]
pub struct JsonType<'t> {
    pub name: &'t str,
    #[serde(rename = "typeParams", skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<JsonType<'t>>,
    #[serde(rename = "subDefinitions", skip_serializing_if = "Vec::is_empty")]
    pub sub_definitions: Vec<JsonDefinition<'t>>,
    #[serde(skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations<'t>,
}

/// Annotations as an object, in stored order.
#[derive(Debug)]
pub struct Annotations<'t>(&'t [Annotation]);

impl Annotations<'_> {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Annotations<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for annotation in self.0 {
            map.serialize_entry(&annotation.name, &Params(&annotation.params))?;
        }
        map.end()
    }
}

struct Params<'t>(&'t [Expr]);

impl Serialize for Params<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for param in self.0 {
            seq.serialize_element(&Param(param))?;
        }
        seq.end()
    }
}

struct Param<'t>(&'t Expr);

impl Serialize for Param<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Expr::Str(s) => serializer.serialize_str(s),
            Expr::Number(n) => n
                .to_plain_string()
                .parse::<serde_json::Number>()
                .map_err(S::Error::custom)?
                .serialize(serializer),
            Expr::Var(_) => serializer.serialize_str(&self.0.to_literal()),
            Expr::List(items) => Params(items).serialize(serializer),
        }
    }
}

/// Borrowed export view of the document's definitions.
pub fn export(tree: &Tree) -> Vec<JsonDefinition<'_>> {
    tree.definitions().iter().map(|d| export_definition(tree, d)).collect()
}

fn export_definition<'t>(tree: &'t Tree, definition: &'t Definition) -> JsonDefinition<'t> {
    JsonDefinition {
        name: &definition.name,
        modifiers: definition.modifiers.iter().map(String::as_str).collect(),
        ty: export_type(tree, definition.ty),
    }
}

fn export_type(tree: &Tree, id: TypeId) -> JsonType<'_> {
    toodle_ir::ensure_sufficient_stack(|| {
        let node = &tree[id];
        JsonType {
            name: &node.name,
            type_params: node.type_params.iter().map(|&p| export_type(tree, p)).collect(),
            sub_definitions: node.children.iter().map(|d| export_definition(tree, d)).collect(),
            annotations: Annotations(&node.annotations),
        }
    })
}

/// The document as a JSON value.
pub fn to_json(tree: &Tree) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(export(tree))
}

/// The document as JSON text, keeping annotation order.
pub fn to_json_string(tree: &Tree, pretty: bool) -> Result<String, serde_json::Error> {
    let definitions = export(tree);
    if pretty {
        serde_json::to_string_pretty(&definitions)
    } else {
        serde_json::to_string(&definitions)
    }
}
