//! Parser state machine and low-level operations.

use super::lexer::Token;
use super::token_kind::TokenKind;
use crate::error::{ParseError, ParseErrorKind};
use crate::span::Span;

pub(super) type PResult<T> = Result<T, ParseError>;

/// One-token-lookahead parser over a lexed selector.
///
/// Operators and combinators already absorbed their whitespace at lex time, so
/// the grammar never needs to look further than the current token (plus one peek
/// to drop trailing whitespace).
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    exec_fuel_remaining: Option<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            exec_fuel_remaining: None,
        }
    }

    /// Cap the number of tokens the parser may consume. `None` means unlimited.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel_remaining = limit;
        self
    }

    pub(super) fn current(&self) -> TokenKind {
        self.nth(0)
    }

    /// Lookahead by `n` tokens (0 = current). Returns `Eof` past the stream.
    pub(super) fn nth(&self, lookahead: usize) -> TokenKind {
        self.tokens
            .get(self.pos + lookahead)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(super) fn nth_token(&self, lookahead: usize) -> Token {
        self.tokens
            .get(self.pos + lookahead)
            .copied()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, Span::empty(self.source.len())))
    }

    pub(super) fn current_token(&self) -> Token {
        self.nth_token(0)
    }

    pub(super) fn current_span(&self) -> Span {
        self.current_token().span
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token.
    pub(super) fn bump(&mut self) -> PResult<Token> {
        self.consume_exec_fuel()?;
        let token = self.current_token();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        Ok(token)
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.at(kind) {
            return self.bump();
        }
        Err(self.unexpected(kind.describe()))
    }

    pub(super) fn skip_whitespace(&mut self) -> PResult<()> {
        while self.at(TokenKind::S) {
            self.bump()?;
        }
        Ok(())
    }

    fn consume_exec_fuel(&mut self) -> PResult<()> {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                return Err(ParseError::new(
                    ParseErrorKind::ExecFuelExhausted,
                    self.current_span(),
                ));
            }
            *remaining -= 1;
        }
        Ok(())
    }

    /// `expected X, found Y` at the current token.
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current_token();
        let found = match token.kind {
            TokenKind::Letter => format!("`{}`", token.text(self.source)),
            kind => kind.describe().to_owned(),
        };
        ParseError::new(ParseErrorKind::UnexpectedToken, token.span)
            .with_message(format!("expected {expected}, found {found}"))
    }
}
