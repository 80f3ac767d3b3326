//! Errors produced while lexing, parsing, and verifying selectors.

use sift_bytecode::FilterOp;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unterminated string")]
    UnterminatedString,
}

/// Malformed token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Grammar violation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    UnexpectedToken,
    UnterminatedAttribute,
    UnknownAttributeOperator,
    LeadingCombinator,
    TrailingCombinator,
    DoubledCombinator,
    EmptySelector,
    EmptySelectorList,
    /// Token budget configured on the cache ran out.
    ExecFuelExhausted,
}

impl ParseErrorKind {
    pub fn default_message(self) -> &'static str {
        match self {
            Self::UnexpectedToken => "unexpected token",
            Self::UnterminatedAttribute => "unterminated attribute selector",
            Self::UnknownAttributeOperator => "unknown attribute operator",
            Self::LeadingCombinator => "selector starts with a combinator",
            Self::TrailingCombinator => "selector ends with a combinator",
            Self::DoubledCombinator => "two combinators in a row",
            Self::EmptySelector => "empty selector",
            Self::EmptySelectorList => "empty selector list",
            Self::ExecFuelExhausted => "selector exceeds the parse budget",
        }
    }
}

/// Grammar violation with the offending span.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
}

impl ParseError {
    /// Create an error carrying the kind's default message.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            message: kind.default_message().to_owned(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Structural defect in an instruction stream.
///
/// Lowering never produces these; they exist so the stream invariants can be
/// asserted in tests and debug builds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("query has no instructions")]
    Empty,

    #[error("step {ip}: instruction outside a reset/yield block")]
    OutsideBlock { ip: usize },

    #[error("step {ip}: reset inside an open block")]
    NestedReset { ip: usize },

    #[error("block opened at step {ip} is never yielded")]
    UnclosedBlock { ip: usize },

    #[error("step {ip}: operands do not fit {op}")]
    ArgsMismatch { ip: usize, op: FilterOp },
}
