//! Lexer for selector source.
//!
//! Produces span-based tokens; text and values are sliced from source on demand.
//!
//! ## Whitespace
//!
//! Whitespace is significant in selectors (it is the descendant combinator), but
//! only when it stands alone. After the Logos pass, whitespace next to an attribute
//! operator, an explicit combinator, or a comma is folded into that token's span,
//! so `a > b` yields one `Greater` rather than `S Greater S`. The parser can then
//! disambiguate with a single token of lookahead.
//!
//! ## Error handling
//!
//! Characters no rule accepts become one `Letter` token each; the parser reports them
//! with a precise span. The only lexical error is an unterminated quoted string.

use std::borrow::Cow;

use logos::Logos;

use super::token_kind::TokenKind;
use crate::error::{LexError, LexErrorKind};
use crate::span::Span;

/// Zero-copy token: kind + span, text retrieved via [`Token::text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Raw source slice, including any absorbed whitespace.
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.span.range()]
    }

    /// Semantic value: the unescaped name without its `#`/`.` sigil, or unescaped
    /// string contents.
    pub fn value<'src>(&self, source: &'src str) -> Cow<'src, str> {
        let text = self.text(source);
        match self.kind {
            TokenKind::Ident => unescape_name(text),
            TokenKind::Hash | TokenKind::Class => unescape_name(&text[1..]),
            TokenKind::StringLiteral => unquote(text),
            _ => Cow::Borrowed(text.trim()),
        }
    }
}

/// Tokenizes source into `Start`, the source tokens, `End`, and the `Eof` sentinel.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut raw = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(TokenKind::UnterminatedString) => {
                return Err(LexError::new(LexErrorKind::UnterminatedString, span));
            }
            Ok(kind) => raw.push(Token::new(kind, span)),
            Err(()) => {
                for (offset, ch) in lexer.slice().char_indices() {
                    let start = span.start + offset;
                    raw.push(Token::new(
                        TokenKind::Letter,
                        Span::new(start, start + ch.len_utf8()),
                    ));
                }
            }
        }
    }

    let end = source.len();
    let mut tokens = Vec::with_capacity(raw.len() + 3);
    tokens.push(Token::new(TokenKind::Start, Span::empty(0)));
    tokens.extend(absorb_whitespace(raw));
    tokens.push(Token::new(TokenKind::End, Span::empty(end)));
    tokens.push(Token::new(TokenKind::Eof, Span::empty(end)));
    Ok(tokens)
}

/// Folds each `S` into a neighbouring token that absorbs whitespace.
///
/// The preceding token wins, so in `a ~ b` the trailing space joins `~`, and in
/// `a ,b` the leading space joins `,`.
fn absorb_whitespace(raw: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(raw.len());
    let mut iter = raw.into_iter().peekable();

    while let Some(token) = iter.next() {
        if token.kind == TokenKind::S {
            if let Some(prev) = out.last_mut().filter(|t| t.kind.absorbs_whitespace()) {
                prev.span.end = token.span.end;
                continue;
            }
            if let Some(next) = iter.peek_mut().filter(|t| t.kind.absorbs_whitespace()) {
                next.span.start = token.span.start;
                continue;
            }
        }
        out.push(token);
    }

    out
}

/// Strips the quotes and resolves `\<quote>` escapes. Other backslashes are kept.
fn unquote(text: &str) -> Cow<'_, str> {
    let Some(quote) = text.chars().next() else {
        return Cow::Borrowed(text);
    };
    let inner = &text[1..text.len() - 1];
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.next_if_eq(&quote).is_some() => out.push(quote),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Resolves CSS escapes in a name: `\` with 1-6 hex digits is that code point
/// (one following whitespace is dropped), `\` with any other character is that
/// character.
fn unescape_name(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let mut code = 0u32;
        let mut digits = 0;
        while digits < 6 {
            let Some(digit) = chars.peek().and_then(|c| c.to_digit(16)) else {
                break;
            };
            code = code * 16 + digit;
            digits += 1;
            chars.next();
        }

        if digits == 0 {
            out.extend(chars.next());
            continue;
        }

        let decoded = char::from_u32(code).filter(|&c| c != '\0');
        out.push(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
        if chars.next_if_eq(&'\r').is_some() {
            chars.next_if_eq(&'\n');
        } else {
            chars.next_if(|c| matches!(*c, ' ' | '\t' | '\n' | '\x0c'));
        }
    }
    Cow::Owned(out)
}
