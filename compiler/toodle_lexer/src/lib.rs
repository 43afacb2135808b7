//! 2DL lexer.
//!
//! Turns source text into a [`TokenList`] using logos. Whitespace and
//! comments (`//` and `#` to end of line) are dropped. Unrecognized input
//! becomes [`TokenKind::Error`] tokens so the parser can report them with a
//! line number; the list always ends with [`TokenKind::Eof`].
//!
//! Token text is not copied: use [`Token::text`] with the source.

mod line_table;
mod raw_token;

use logos::Logos;

pub use line_table::LineTable;
use raw_token::RawToken;

/// Byte range of a token in the source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Clamps offsets beyond `u32::MAX`.
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        let clamp = |offset: usize| u32::try_from(offset).unwrap_or(u32::MAX);
        Span::new(clamp(range.start), clamp(range.end))
    }

    #[inline]
    pub fn range(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Alias,
    Let,
    /// `$name`
    Var,
    Number,
    /// `"..."`
    String,
    /// `"""..."""`
    TripleString,
    Colon,
    Eq,
    Comma,
    Lt,
    Gt,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable name for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Alias => "'alias'",
            TokenKind::Let => "'let'",
            TokenKind::Var => "variable",
            TokenKind::Number => "number",
            TokenKind::String | TokenKind::TripleString => "string",
            TokenKind::Colon => "':'",
            TokenKind::Eq => "'='",
            TokenKind::Comma => "','",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Error => "invalid input",
            TokenKind::Eof => "end of input",
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::String | TokenKind::TripleString | TokenKind::Var
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the token's first byte.
    pub line: u32,
}

impl Token {
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.range()).unwrap_or("")
    }
}

#[derive(Clone, Debug, Default)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, or the trailing `Eof` when out of range.
    pub fn get(&self, index: usize) -> Token {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(Token {
                kind: TokenKind::Eof,
                span: Span::default(),
                line: 1,
            })
    }

    pub fn errors(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.kind == TokenKind::Error)
    }
}

/// Tokenize a whole source text.
pub fn lex(source: &str) -> TokenList {
    let lines = LineTable::build(source);
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let kind = match result {
            Ok(raw) => convert(raw),
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token {
            kind,
            span,
            line: lines.line(span.start),
        });
    }

    let end = Span::from_range(source.len()..source.len());
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: end,
        line: lines.line(end.start),
    });
    TokenList { tokens }
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Alias => TokenKind::Alias,
        RawToken::Let => TokenKind::Let,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Number => TokenKind::Number,
        RawToken::String => TokenKind::String,
        RawToken::TripleString => TokenKind::TripleString,
        RawToken::Var => TokenKind::Var,
        RawToken::Ident => TokenKind::Ident,
    }
}
