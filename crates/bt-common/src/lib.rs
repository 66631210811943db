//! Common types shared across the BSON shell transpiler workspace.
//!
//! - Source spans (`Span`, `Spanned`, `SpanBuilder`, `ByteSpan`)
//! - Numeric literal classification and parsing (`numeric`)
//! - The translator's four-kind error taxonomy (`diagnostics`)

pub mod span;
pub use span::{ByteSpan, Span, SpanBuilder, Spanned};

pub mod numeric;

pub mod diagnostics;
pub use diagnostics::{ErrorKind, TranslateError, TranslateResult};
