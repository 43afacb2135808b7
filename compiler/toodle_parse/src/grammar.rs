//! Grammar productions.

use toodle_ir::{ensure_sufficient_stack, BuildEvent, LiteralToken};
use toodle_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `statement*` up to a closing `}` or the end of input.
    pub(crate) fn statements(&mut self) -> Result<(), ParseError> {
        loop {
            match self.cursor.current_kind() {
                TokenKind::Eof | TokenKind::RBrace => return Ok(()),
                TokenKind::Alias => self.alias_def()?,
                TokenKind::Let => self.const_def()?,
                TokenKind::Ident => self.definition()?,
                _ => return Err(self.cursor.unexpected("definition")),
            }
        }
    }

    fn alias_def(&mut self) -> Result<(), ParseError> {
        self.cursor.expect(TokenKind::Alias)?;
        let name = self.cursor.expect(TokenKind::Ident)?;
        let name = self.cursor.text(name).to_owned();
        self.cursor.expect(TokenKind::Eq)?;
        self.emit(BuildEvent::EnterAlias)?;
        self.ty()?;
        self.emit(BuildEvent::ExitAlias { name })
    }

    fn const_def(&mut self) -> Result<(), ParseError> {
        self.cursor.expect(TokenKind::Let)?;
        let var = self.cursor.expect(TokenKind::Var)?;
        let name = self.cursor.text(var).trim_start_matches('$').to_owned();
        self.cursor.expect(TokenKind::Eq)?;
        self.emit(BuildEvent::EnterConst)?;
        self.expr()?;
        self.emit(BuildEvent::ExitConst { name })
    }

    /// `modifier* IDENT (":" type)?`
    fn definition(&mut self) -> Result<(), ParseError> {
        let run = self.cursor.ident_run();
        let split = self.cursor.line_break_in_run(1, run);
        let len = split.unwrap_or(run);
        let typed = split.is_none() && self.cursor.peek(run).kind == TokenKind::Colon;

        let line = self.cursor.current().line;
        let mut idents = Vec::with_capacity(len);
        for _ in 0..len {
            let token = self.cursor.advance();
            idents.push(self.cursor.text(token).to_owned());
        }
        let name = idents.pop().unwrap_or_default();

        self.emit(BuildEvent::EnterDefinition)?;
        if typed {
            self.cursor.expect(TokenKind::Colon)?;
            self.ty()?;
        }
        self.emit(BuildEvent::ExitDefinition {
            modifiers: idents,
            name,
            line,
        })
    }

    /// `IDENT ("<" type ("," type)* ">")? annotation* ("{" statement* "}")?`
    fn ty(&mut self) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| {
            self.emit(BuildEvent::EnterType)?;
            let name = self.cursor.expect(TokenKind::Ident)?;
            let name = self.cursor.text(name).to_owned();

            if self.cursor.eat(TokenKind::Lt) {
                self.emit(BuildEvent::EnterTypeParamList)?;
                self.ty()?;
                while self.cursor.eat(TokenKind::Comma) {
                    self.ty()?;
                }
                self.cursor.expect(TokenKind::Gt)?;
                self.emit(BuildEvent::ExitTypeParamList)?;
            }

            while self.cursor.check(TokenKind::Ident) && !self.at_definition_start() {
                self.annotation()?;
            }

            if self.cursor.eat(TokenKind::LBrace) {
                self.statements()?;
                self.cursor.expect(TokenKind::RBrace)?;
            }

            self.emit(BuildEvent::ExitType { name })
        })
    }

    /// Whether the identifier at the cursor begins a new definition rather
    /// than an annotation of the type being parsed.
    fn at_definition_start(&self) -> bool {
        let run = self.cursor.ident_run();
        if self.cursor.peek(run).kind != TokenKind::Colon {
            return false;
        }
        matches!(self.cursor.line_break_in_run(0, run), Some(0) | None)
    }

    /// `IDENT ("(" expr ("," expr)* ")")?`
    fn annotation(&mut self) -> Result<(), ParseError> {
        let name = self.cursor.expect(TokenKind::Ident)?;
        let name = self.cursor.text(name).to_owned();
        self.emit(BuildEvent::EnterAnnotation)?;
        if self.cursor.eat(TokenKind::LParen) {
            if !self.cursor.check(TokenKind::RParen) {
                self.expr()?;
                while self.cursor.eat(TokenKind::Comma) {
                    self.expr()?;
                }
            }
            self.cursor.expect(TokenKind::RParen)?;
        }
        self.emit(BuildEvent::ExitAnnotation { name })
    }

    /// `STRING | NUMBER | VAR | "[" expr* "]"`; commas between list items
    /// are optional.
    fn expr(&mut self) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| {
            let token = self.cursor.current();
            let text = self.cursor.text(token);
            let literal = match token.kind {
                TokenKind::String | TokenKind::TripleString => LiteralToken::String(text.to_owned()),
                TokenKind::Number => LiteralToken::Number(text.to_owned()),
                TokenKind::Var => LiteralToken::Variable(text.trim_start_matches('$').to_owned()),
                TokenKind::LBracket => {
                    self.cursor.advance();
                    self.emit(BuildEvent::EnterList)?;
                    while !self.cursor.check(TokenKind::RBracket) {
                        self.expr()?;
                        self.cursor.eat(TokenKind::Comma);
                    }
                    self.cursor.advance();
                    return self.emit(BuildEvent::ExitList);
                }
                _ => return Err(self.cursor.unexpected("expression")),
            };
            self.cursor.advance();
            self.emit(BuildEvent::Literal(literal))
        })
    }
}
