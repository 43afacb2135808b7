//! Recursive descent parser for 2DL.
//!
//! The parser does not build the tree itself: it reports what it recognizes
//! as [`BuildEvent`]s to a [`TreeBuilder`], which owns tree construction.
//!
//! ```text
//! document    ::= statement*
//! statement   ::= alias_def | const_def | definition
//! alias_def   ::= "alias" IDENT "=" type
//! const_def   ::= "let" VAR "=" expr
//! definition  ::= modifier* IDENT (":" type)?
//! type        ::= IDENT ("<" type ("," type)* ">")? annotation* ("{" statement* "}")?
//! annotation  ::= IDENT ("(" expr ("," expr)* ")")?
//! expr        ::= STRING | NUMBER | VAR | "[" expr* "]"
//! ```
//!
//! Annotations and definitions both start with identifiers. A run of bare
//! identifiers followed by `:` starts a definition; when the run spans
//! several lines, the definition starts at the first identifier on a new
//! line and anything before it still belongs to the previous construct.

mod cursor;
mod grammar;

pub use cursor::Cursor;

use toodle_ir::{BuildError, BuildEvent, Tree, TreeBuilder};
use toodle_lexer::{lex, TokenList};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: u32,
        expected: &'static str,
        found: String,
    },
    #[error("line {line}: unrecognized input '{text}'")]
    InvalidToken { line: u32, text: String },
    #[error("line {line}: {source}")]
    Build {
        line: u32,
        #[source]
        source: BuildError,
    },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::InvalidToken { line, .. }
            | ParseError::Build { line, .. } => *line,
        }
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    builder: TreeBuilder,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source),
            builder: TreeBuilder::new(),
        }
    }

    /// Parse the whole token stream into a tree.
    pub fn parse_document(mut self) -> Result<Tree, ParseError> {
        self.statements()?;
        if !self.cursor.is_at_end() {
            return Err(self.cursor.unexpected("definition"));
        }
        let line = self.cursor.current().line;
        self.builder
            .finish()
            .map_err(|source| ParseError::Build { line, source })
    }

    /// Forward an event to the builder, tagging failures with the current line.
    fn emit(&mut self, event: BuildEvent) -> Result<(), ParseError> {
        let line = self.cursor.previous().unwrap_or(self.cursor.current()).line;
        self.builder
            .apply(event)
            .map_err(|source| ParseError::Build { line, source })
    }
}

/// Lex and parse a source text.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let tokens = lex(source);
    tracing::trace!(tokens = tokens.len(), "lexed");
    parse_tokens(&tokens, source)
}

/// Parse an already lexed source.
pub fn parse_tokens(tokens: &TokenList, source: &str) -> Result<Tree, ParseError> {
    Parser::new(tokens, source).parse_document()
}

#[cfg(test)]
mod tests;
