//! logos token definitions.

use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum RawToken {
    #[token("alias")]
    Alias,
    #[token("let")]
    Let,

    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token(",")]
    Comma,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token("\"\"\"", triple_string)]
    TripleString,

    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    Var,

    /// `*` names the wildcard type schema.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    #[token("*")]
    Ident,
}

/// Consume everything up to and including the closing `"""`.
fn triple_string(lex: &mut Lexer<'_, RawToken>) -> bool {
    if let Some(end) = lex.remainder().find("\"\"\"") {
        lex.bump(end + 3);
        true
    } else {
        let rest = lex.remainder().len();
        lex.bump(rest);
        false
    }
}
