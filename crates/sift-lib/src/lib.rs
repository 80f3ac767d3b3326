//! sift: CSS-style selector queries over any tree.
//!
//! A selector string is compiled once into a flat instruction stream and cached
//! by its literal text; the VM then runs it against a tree through an [`Adapter`].
//!
//! # Example
//!
//! ```
//! use sift_lib::{Document, Element};
//!
//! let mut doc = Document::new(Element::new("ul"));
//! let first = doc.append(doc.root(), Element::new("li").class("done"));
//! doc.append(doc.root(), Element::new("li"));
//!
//! let adapter = doc.adapter();
//! let done = sift_lib::select_all(doc.root(), "li.done", &adapter).unwrap();
//! assert_eq!(done, [first]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod doc;
pub mod engine;

#[cfg(test)]
mod engine_tests;

pub use doc::{Document, Element, NodeId};
pub use engine::{Engine, EngineBuilder, default_engine, select, select_all, select_iter};

pub use sift_bytecode::{CombinatorOp, CompiledQuery, FilterArgs, FilterOp, Instruction};
pub use sift_compiler::{CacheStats, ErrorPrinter, LexError, ParseError, ParseErrorKind, Span};
pub use sift_vm::{
    Adapter, AdapterBuilder, Matches, NodeAccess, NodeIter, NoopTracer, Predicate, PrintTracer,
    RuntimeError, Tracer, Verbosity,
};

/// Errors that can occur while selecting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed token in the selector.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Grammar violation in the selector.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The adapter cannot run the compiled query.
    #[error(transparent)]
    Internal(#[from] RuntimeError),
}

impl From<sift_compiler::Error> for Error {
    fn from(err: sift_compiler::Error) -> Self {
        match err {
            sift_compiler::Error::Lex(e) => Self::Lex(e),
            sift_compiler::Error::Parse(e) => Self::Parse(e),
        }
    }
}

impl Error {
    /// Source span of a selector error; `None` for adapter errors.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(e) => Some(e.span),
            Self::Parse(e) => Some(e.span),
            Self::Internal(_) => None,
        }
    }

    /// Render selector errors as an annotated snippet of `source`.
    pub fn render(&self, source: &str) -> String {
        let compile_error = match self {
            Self::Lex(e) => sift_compiler::Error::Lex(e.clone()),
            Self::Parse(e) => sift_compiler::Error::Parse(e.clone()),
            Self::Internal(e) => return e.to_string(),
        };
        ErrorPrinter::new(&compile_error).source(source).render()
    }
}

/// Result type for selection.
pub type Result<T> = std::result::Result<T, Error>;
