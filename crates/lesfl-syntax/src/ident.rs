//! Identifier paths as written by a parser, and the shared resolution slot
//! attached to every name occurrence.

use lesfl_common::{KeyIdent, LocalIndex, Position};

/// A dotted path, before resolution.
///
/// `Absolute` paths start at the root module (`.foo.bar` in source);
/// `Relative` paths are resolved against the current module, the import
/// stack, and finally `predef`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentPath {
    Absolute(Vec<String>),
    Relative(Vec<String>),
}

impl IdentPath {
    #[must_use]
    pub fn segments(&self) -> &[String] {
        match self {
            IdentPath::Absolute(segments) | IdentPath::Relative(segments) => segments,
        }
    }

    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self, IdentPath::Absolute(_))
    }
}

/// One occurrence of a name in the source, carrying its as-written path and
/// the two mutually-exclusive slots the resolver fills in.
///
/// After a successful resolution exactly one of `resolved_key` /
/// `resolved_local` is `Some`; after a failed one, neither is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentOccurrence {
    pub path: IdentPath,
    pub position: Position,
    pub resolved_key: Option<KeyIdent>,
    pub resolved_local: Option<LocalIndex>,
}

impl IdentOccurrence {
    #[must_use]
    pub fn new(path: IdentPath, position: Position) -> Self {
        Self {
            path,
            position,
            resolved_key: None,
            resolved_local: None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved_key.is_some() || self.resolved_local.is_some()
    }
}
