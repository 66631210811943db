//! The translator's error taxonomy.
//!
//! Four error kinds plus a catch-all. Every component in the workspace
//! raises through this type rather than `panic!`/`unwrap`: the argument
//! checker, the symbol table lookup, the sandbox evaluator, and the
//! per-target emitters all return `Result<_, TranslateError>`.

use crate::span::Span;
use std::fmt;

/// One of the four recognized error kinds, plus `Generic` for everything
/// else (sandbox failures, unsupported regex flags, malformed compile-time
/// constants).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A recognized call was given the wrong number of arguments.
    ArityMismatch,
    /// An argument failed its declared type slot, or a non-callable was invoked.
    TypeError,
    /// An identifier is not in the symbol table.
    ReferenceError,
    /// An attribute was accessed on a recognized BSON value that does not declare it.
    AttributeError,
    /// Any other failure: sandbox evaluation, bad regex flags, malformed literals.
    Generic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ArityMismatch => "arity mismatch",
            ErrorKind::TypeError => "type error",
            ErrorKind::ReferenceError => "reference error",
            ErrorKind::AttributeError => "attribute error",
            ErrorKind::Generic => "error",
        };
        f.write_str(s)
    }
}

/// A single translation failure. Translation stops at the first one raised;
/// argument checking reports the first failure and does not accumulate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslateError {
    pub kind: ErrorKind,
    pub message: String,
    pub pos: Option<Span>,
}

impl TranslateError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            pos: None,
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.pos = Some(span);
        self
    }

    pub fn arity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArityMismatch, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeError, message)
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReferenceError, message)
    }

    pub fn attribute(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AttributeError, message)
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Generic, message)
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(span) => write!(f, "{}: {} (at {}..{})", self.kind, self.message, span.start, span.end),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for TranslateError {}

pub type TranslateResult<T> = Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_span() {
        let err = TranslateError::arity("Code expects 1 or 2 arguments").at(Span::new(3, 9));
        let text = err.to_string();
        assert!(text.contains("arity mismatch"));
        assert!(text.contains("3..9"));
    }

    #[test]
    fn display_without_span_omits_position() {
        let err = TranslateError::reference("Foo is not defined");
        assert_eq!(err.to_string(), "reference error: Foo is not defined");
    }
}
