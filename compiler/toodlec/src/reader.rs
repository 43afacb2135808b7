//! The read pipeline.

use std::fmt;

use toodle_expand::{expand, ExpandError};
use toodle_ir::Tree;
use toodle_parse::{parse, ParseError};
use toodle_schema::{Validator, Violation};
use toodle_types::DataTypeCatalog;
use tracing::{debug, info_span};

/// Schema that every schema document is checked against.
pub const META_SCHEMA: &str = include_str!("2dl-schema.2dl");

/// Which input an error came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    Document,
    Schema,
    MetaSchema,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Document => "document",
            Origin::Schema => "schema",
            Origin::MetaSchema => "meta-schema",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReadErrorKind {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Expand(#[from] ExpandError),
    #[error("2dl schema validation failed. Violations were found:{}", list(.0))]
    Validation(Vec<Violation>),
}

fn list(violations: &[Violation]) -> String {
    violations.iter().map(|v| format!("\n  - {v}")).collect()
}

/// A failed read, tagged with the input it failed on.
#[derive(Debug, thiserror::Error)]
#[error("{origin}: {kind}")]
pub struct ReadError {
    pub origin: Origin,
    pub kind: ReadErrorKind,
}

impl ReadError {
    fn new(origin: Origin, kind: impl Into<ReadErrorKind>) -> Self {
        ReadError {
            origin,
            kind: kind.into(),
        }
    }

    /// The violations of a failed validation; empty for other errors.
    pub fn violations(&self) -> &[Violation] {
        if let ReadErrorKind::Validation(violations) = &self.kind {
            violations
        } else {
            &[]
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReaderOptions {
    /// Resolve aliases and constants after parsing.
    pub expand: bool,
    /// Check schemas against the meta-schema before using them.
    pub validate_schema: bool,
    /// Meta-schema text replacing [`META_SCHEMA`].
    pub meta_schema: Option<String>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            expand: true,
            validate_schema: true,
            meta_schema: None,
        }
    }
}

/// Parses, expands and validates documents.
pub struct Reader {
    options: ReaderOptions,
    catalog: DataTypeCatalog,
}

impl Default for Reader {
    fn default() -> Self {
        Self::new(ReaderOptions::default())
    }
}

impl Reader {
    pub fn new(options: ReaderOptions) -> Self {
        Reader {
            options,
            catalog: DataTypeCatalog::builtin(),
        }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Read a document without a schema.
    pub fn read(&self, document: &str) -> Result<Tree, ReadError> {
        self.load(Origin::Document, document)
    }

    /// Read a document and check it against `schema`, which is itself
    /// checked against the meta-schema first.
    pub fn read_with_schema(&self, document: &str, schema: &str) -> Result<Tree, ReadError> {
        let schema = self.load_schema(schema)?;
        let document = self.load(Origin::Document, document)?;
        self.validate(Origin::Document, &document, &schema)?;
        Ok(document)
    }

    /// Read a schema, checking it against the meta-schema when enabled.
    pub fn load_schema(&self, schema: &str) -> Result<Tree, ReadError> {
        let schema = self.load(Origin::Schema, schema)?;
        if self.options.validate_schema {
            let meta_text = self.options.meta_schema.as_deref().unwrap_or(META_SCHEMA);
            let meta = self.load(Origin::MetaSchema, meta_text)?;
            self.validate(Origin::Schema, &schema, &meta)?;
        }
        Ok(schema)
    }

    /// Parse `text` and, unless disabled, expand it.
    pub fn load(&self, origin: Origin, text: &str) -> Result<Tree, ReadError> {
        let _span = info_span!("load", %origin).entered();
        let mut tree = parse(text).map_err(|err| ReadError::new(origin, err))?;
        if self.options.expand {
            expand(&mut tree).map_err(|err| ReadError::new(origin, err))?;
        }
        debug!(definitions = tree.definitions().len(), "loaded");
        Ok(tree)
    }

    /// Check `tree` against `schema`; `origin` names `tree` in the error.
    pub fn validate(&self, origin: Origin, tree: &Tree, schema: &Tree) -> Result<(), ReadError> {
        let violations = Validator::new(schema, &self.catalog).validate(tree);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ReadError::new(origin, ReadErrorKind::Validation(violations)))
        }
    }
}
