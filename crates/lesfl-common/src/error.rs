//! The error accumulator (C7).
//!
//! User-facing semantic errors never unwind: every failure is appended to an
//! [`ErrorSink`] and traversal continues so a single pass can report many
//! problems at once. [`FrontendError`] is reserved for conditions that are
//! not user-diagnosable — an unexpected AST shape, a builtin table that
//! fails to seed — which are genuine implementation bugs rather than source
//! errors.

use crate::Position;

/// Stable, machine-inspectable error category, layered over the plain
/// `(Position, message)` pair rather than replacing it — mirrors the
/// taxonomy of the error-handling design and `tsz_common::diagnostics`'s
/// `DiagnosticCategory` field attached to every `Diagnostic`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Redefinition,
    Undefined,
    Private,
    KindMismatch,
    ArityMismatch,
    FieldError,
    AliasCycle,
    TemplateMisuse,
    AnnotationError,
    Internal,
}

/// A single positional diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub category: ErrorCategory,
    pub position: Position,
    pub message: String,
}

impl Error {
    pub fn new(category: ErrorCategory, position: Position, message: impl Into<String>) -> Self {
        Self {
            category,
            position,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// An append-only list of accumulated errors.
#[derive(Clone, Debug, Default)]
pub struct ErrorSink {
    errors: Vec<Error>,
}

impl ErrorSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        category: ErrorCategory,
        position: Position,
        message: impl Into<String>,
    ) {
        self.errors.push(Error::new(category, position, message));
    }

    #[must_use]
    pub fn had_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

/// Fatal, non-diagnosable internal failures. These indicate a bug in this
/// crate (or a caller violating a documented precondition), not a problem
/// with the source program.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("interner exhausted: more than u32::MAX distinct identifiers")]
    InternerExhausted,
    #[error("malformed builtin table: {0}")]
    MalformedBuiltinTable(&'static str),
}
