//! Source positions.
//!
//! Every diagnostic-bearing AST node carries a [`Position`]. Unlike a byte
//! span, a `Position` is a single point (line + column within a source),
//! which is all the resolver needs to report an error location.

/// Index of a source file within a [`crate::FrontendError`]-free
/// compilation unit's source list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u32);

impl SourceId {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }
}

/// A point in a source file (0-indexed line and column).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub source: SourceId,
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub const fn new(source: SourceId, line: u32, column: u32) -> Self {
        Self {
            source,
            line,
            column,
        }
    }

    /// A position with no real source location, for synthesized nodes
    /// (e.g. builtins seeded before any source is parsed).
    #[must_use]
    pub const fn synthetic() -> Self {
        Self {
            source: SourceId(u32::MAX),
            line: 0,
            column: 0,
        }
    }

    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.source.0 == u32::MAX
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_synthetic() {
            write!(f, "<builtin>")
        } else {
            write!(f, "{}:{}:{}", self.source.0, self.line + 1, self.column + 1)
        }
    }
}
