//! Grammar productions for selectors.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//!
//! ```text
//! selector-list   = selector ("," selector)*
//! selector        = simple-selector (combinator simple-selector)*
//! simple-selector = (IDENT | "*")? (HASH | CLASS | attribute)*     ; non-empty
//! attribute       = "[" S? IDENT S? (attr-op (IDENT | STRING) S?)? "]"
//! combinator      = S | ">" | "+" | "~"
//! ```

use super::ast::{
    Atom, AttrOperator, AttributeMatcher, AttributeSelector, Combinator, Selector, SelectorList,
    SimpleSelector, Step,
};
use super::core::{PResult, Parser};
use super::lexer::Token;
use super::token_kind::TokenKind;
use crate::error::{ParseError, ParseErrorKind};

impl Parser<'_> {
    pub fn parse(mut self) -> PResult<SelectorList> {
        self.parse_selector_list()
    }

    fn parse_selector_list(&mut self) -> PResult<SelectorList> {
        self.expect(TokenKind::Start)?;
        self.skip_whitespace()?;

        if self.at(TokenKind::End) {
            return Err(ParseError::new(
                ParseErrorKind::EmptySelectorList,
                self.current_span(),
            ));
        }

        let mut selectors = vec![self.parse_selector()?];
        while self.at(TokenKind::Comma) {
            self.bump()?;
            selectors.push(self.parse_selector()?);
        }

        if !self.at(TokenKind::End) {
            return Err(self.unexpected("`,` or end of selector"));
        }

        Ok(SelectorList { selectors })
    }

    fn parse_selector(&mut self) -> PResult<Selector> {
        let Some(first) = self.parse_simple_selector()? else {
            return Err(self.missing_simple_selector(None));
        };

        let mut steps = vec![Step {
            combinator: None,
            simple: first,
        }];

        loop {
            let combinator = match self.current() {
                TokenKind::S => {
                    // Trailing whitespace is not a combinator.
                    if self.nth(1) == TokenKind::End {
                        self.bump()?;
                        break;
                    }
                    Combinator::Descendant
                }
                TokenKind::Greater => Combinator::Child,
                TokenKind::Plus => Combinator::NextSibling,
                TokenKind::Tilde => Combinator::SubsequentSibling,
                _ => break,
            };

            let combinator_token = self.bump()?;
            let Some(simple) = self.parse_simple_selector()? else {
                return Err(self.missing_simple_selector(Some(combinator_token)));
            };

            steps.push(Step {
                combinator: Some(combinator),
                simple,
            });
        }

        Ok(Selector { steps })
    }

    /// Returns `None` when the current token cannot start a simple selector but
    /// legitimately ends one (`,`, a combinator, end of input).
    fn parse_simple_selector(&mut self) -> PResult<Option<SimpleSelector>> {
        let mut atoms = Vec::new();

        match self.current() {
            TokenKind::Ident => {
                let token = self.bump()?;
                atoms.push(Atom::Type(token.value(self.source).into_owned()));
            }
            TokenKind::Universal => {
                self.bump()?;
                atoms.push(Atom::Universal);
            }
            _ => {}
        }

        loop {
            match self.current() {
                TokenKind::Hash => {
                    let token = self.bump()?;
                    atoms.push(Atom::Id(token.value(self.source).into_owned()));
                }
                TokenKind::Class => {
                    let token = self.bump()?;
                    atoms.push(Atom::Class(token.value(self.source).into_owned()));
                }
                TokenKind::AttribOpen => {
                    atoms.push(Atom::Attribute(self.parse_attribute()?));
                }
                TokenKind::S
                | TokenKind::Comma
                | TokenKind::Greater
                | TokenKind::Plus
                | TokenKind::Tilde
                | TokenKind::End => break,
                TokenKind::Ident | TokenKind::Universal => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken,
                        self.current_span(),
                    )
                    .with_message("type and `*` selectors must come first in a simple selector"));
                }
                _ if atoms.is_empty() => {
                    return Err(self.unexpected("type, id, class, attribute, or `*` selector"));
                }
                _ => return Err(self.unexpected("selector, combinator, or `,`")),
            }
        }

        Ok((!atoms.is_empty()).then_some(SimpleSelector { atoms }))
    }

    fn parse_attribute(&mut self) -> PResult<AttributeSelector> {
        let open = self.expect(TokenKind::AttribOpen)?;
        self.skip_whitespace()?;

        let name = match self.current() {
            TokenKind::Ident => self.bump()?.value(self.source).into_owned(),
            TokenKind::End => return Err(self.unterminated_attribute(open)),
            _ => return Err(self.unexpected("attribute name")),
        };
        self.skip_whitespace()?;

        let operator = match self.current() {
            TokenKind::AttribClose => {
                self.bump()?;
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                });
            }
            TokenKind::Equal => AttrOperator::Exactly,
            TokenKind::Includes => AttrOperator::Includes,
            TokenKind::DashMatch => AttrOperator::DashMatch,
            TokenKind::PrefixMatch => AttrOperator::Prefix,
            TokenKind::SuffixMatch => AttrOperator::Suffix,
            TokenKind::SubstringMatch => AttrOperator::Substring,
            TokenKind::Letter => return Err(self.unknown_attribute_operator()),
            TokenKind::End => return Err(self.unterminated_attribute(open)),
            _ => return Err(self.unexpected("attribute operator or `]`")),
        };
        self.bump()?;

        let value = match self.current() {
            TokenKind::Ident | TokenKind::StringLiteral => {
                self.bump()?.value(self.source).into_owned()
            }
            TokenKind::End => return Err(self.unterminated_attribute(open)),
            _ => return Err(self.unexpected("attribute value")),
        };
        self.skip_whitespace()?;

        match self.current() {
            TokenKind::AttribClose => {
                self.bump()?;
            }
            TokenKind::End => return Err(self.unterminated_attribute(open)),
            _ => return Err(self.unexpected("`]`")),
        }

        Ok(AttributeSelector {
            name,
            matcher: Some(AttributeMatcher { operator, value }),
        })
    }

    /// Classify a selector position that holds no simple selector.
    fn missing_simple_selector(&self, after: Option<Token>) -> ParseError {
        let current = self.current_token();
        match (after, current.kind) {
            (None, kind) if kind.is_combinator() => {
                ParseError::new(ParseErrorKind::LeadingCombinator, current.span)
            }
            (None, TokenKind::Comma | TokenKind::End) => {
                ParseError::new(ParseErrorKind::EmptySelector, current.span)
            }
            (Some(prev), kind) if kind.is_combinator() => ParseError::new(
                ParseErrorKind::DoubledCombinator,
                prev.span.cover(current.span),
            ),
            (Some(prev), TokenKind::Comma | TokenKind::End) => {
                ParseError::new(ParseErrorKind::TrailingCombinator, prev.span)
            }
            _ => self.unexpected("type, id, class, attribute, or `*` selector"),
        }
    }

    fn unterminated_attribute(&self, open: Token) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnterminatedAttribute,
            open.span.cover(self.current_span()),
        )
    }

    /// Stray characters where an operator belongs, e.g. `!=` in `[a!=b]`.
    fn unknown_attribute_operator(&self) -> ParseError {
        let start = self.current_span();
        let mut end = start;
        let mut i = 0;
        while self.nth(i) == TokenKind::Letter {
            end = self.nth_token(i).span;
            i += 1;
        }
        if self.nth(i).is_attr_operator() {
            end = self.nth_token(i).span;
        }

        let span = start.cover(end);
        let text = self.source[span.range()].trim();
        ParseError::new(ParseErrorKind::UnknownAttributeOperator, span)
            .with_message(format!("unknown attribute operator `{text}`"))
    }
}
