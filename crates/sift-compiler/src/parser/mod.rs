//! Parser infrastructure for selectors.
//!
//! # Architecture
//!
//! Lexing and parsing are separate passes:
//!
//! - Zero-copy lexing: tokens carry spans, text is sliced from source only when an
//!   AST leaf needs it
//! - Whitespace folding: operators, combinators and commas absorb adjacent whitespace
//!   at lex time, so a lone `S` token is always the descendant combinator
//! - Fail fast: the first grammar violation is returned with its span; there is
//!   no recovery
//!
//! Exec fuel, when configured, bounds the number of tokens consumed.

pub mod ast;
pub mod lexer;
pub mod token_kind;

mod core;
mod grammar;

#[cfg(test)]
mod lexer_tests;

pub use self::core::Parser;
pub use ast::{
    Atom, AttrOperator, AttributeMatcher, AttributeSelector, Combinator, Selector, SelectorList,
    SimpleSelector, Step,
};
pub use lexer::{Token, lex};
pub use token_kind::TokenKind;

use crate::error::ParseError;

/// Parse a lexed token stream into a selector list.
pub fn parse(source: &str, tokens: Vec<Token>) -> Result<SelectorList, ParseError> {
    Parser::new(source, tokens).parse()
}
