//! Token cursor for navigating the token stream.

use toodle_lexer::{Token, TokenKind, TokenList};

use crate::ParseError;

/// Position in a [`TokenList`] plus the source it was lexed from.
///
/// The list always ends with `Eof`; reading past it keeps returning `Eof`.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Cursor {
            tokens,
            source,
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Token `offset` positions ahead of the current one.
    #[inline]
    pub fn peek(&self, offset: usize) -> Token {
        self.tokens.get(self.pos + offset)
    }

    /// The most recently consumed token, if any.
    pub fn previous(&self) -> Option<Token> {
        self.pos.checked_sub(1).map(|index| self.tokens.get(index))
    }

    #[inline]
    pub fn text(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Error for the current token, which is not what `expected` describes.
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        match token.kind {
            TokenKind::Error => ParseError::InvalidToken {
                line: token.line,
                text: self.text(token).to_owned(),
            },
            TokenKind::Eof => ParseError::UnexpectedToken {
                line: token.line,
                expected,
                found: TokenKind::Eof.describe().to_owned(),
            },
            kind => ParseError::UnexpectedToken {
                line: token.line,
                expected,
                found: format!("{} '{}'", kind.describe(), self.text(token)),
            },
        }
    }

    /// Number of consecutive identifiers starting at the current token.
    pub fn ident_run(&self) -> usize {
        let mut len = 0;
        while self.peek(len).kind == TokenKind::Ident {
            len += 1;
        }
        len
    }

    /// First offset in `from..len` whose token starts a new source line.
    pub fn line_break_in_run(&self, from: usize, len: usize) -> Option<usize> {
        (from..len).find(|&offset| {
            let previous = match offset.checked_sub(1) {
                Some(before) => Some(self.peek(before)),
                None => self.previous(),
            };
            previous.is_some_and(|p| self.peek(offset).line > p.line)
        })
    }
}
