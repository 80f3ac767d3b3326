//! sift compiler: lexer, parser, lowering, and query cache.
//!
//! This crate provides the compilation pipeline for selector strings:
//! - `parser` - logos lexer, one-token-lookahead parser, selector AST
//! - `compile` - lowering to the flat instruction stream, well-formedness checks
//! - `cache` - append-only memo of compiled queries keyed by source text
//! - `printer` - annotated-snippet rendering of lex and parse errors

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cache;
pub mod compile;
pub mod error;
pub mod parser;
pub mod printer;
pub mod span;

#[cfg(test)]
mod cache_tests;

pub use cache::{CacheStats, QueryCache, QueryCacheBuilder};
pub use compile::{compile, compile_with, lower, verify};
pub use error::{LexError, LexErrorKind, ParseError, ParseErrorKind, VerifyError};
pub use printer::ErrorPrinter;
pub use span::Span;

/// Errors that can occur while compiling a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Parse(e) => e.span,
        }
    }

    /// Render the error as an annotated snippet of `source`.
    pub fn render(&self, source: &str) -> String {
        ErrorPrinter::new(self).source(source).render()
    }
}

/// Result type for compile operations.
pub type Result<T> = std::result::Result<T, Error>;
