//! Builder-pattern printer for rendering compile errors.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::Error;
use crate::span::Span;

/// Renders an [`Error`] against the selector it came from.
pub struct ErrorPrinter<'e, 's> {
    error: &'e Error,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> ErrorPrinter<'e, 's> {
    pub fn new(error: &'e Error) -> Self {
        Self {
            error,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Origin label shown in the snippet header (e.g. a stylesheet name).
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return write!(w, "{}", self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = headline(self.error);
        let range = adjust_range(self.error.span(), source.len());

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range).label(&message));

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report = vec![Level::ERROR.primary_title(&message).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

fn headline(error: &Error) -> String {
    match error {
        Error::Lex(e) => e.kind.to_string(),
        Error::Parse(e) => e.message.clone(),
    }
}

/// Empty spans (e.g. at end of input) still need one column to point at.
fn adjust_range(span: Span, limit: usize) -> std::ops::Range<usize> {
    if span.is_empty() {
        return span.start..(span.start + 1).min(limit);
    }
    span.range()
}
