//! Function annotations and modifiers.

use lesfl_common::Position;

/// A raw annotation as written by the parser, not yet validated or expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub position: Position,
}

/// The closed set of recognized annotation kinds, after validation.
/// `Eager`/`Lazy` and `Memoized`/`Unmemoized` are mutually exclusive within
/// one function; the `Only*` variants expand to a pair of these during
/// validation rather than being represented directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationKind {
    Eager,
    Lazy,
    Memoized,
    Unmemoized,
}

/// Whether a function body may be inlined by later phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InlineModifier {
    None,
    Inline,
}

/// Whether a lambda captures its enclosing scope.
///
/// A `Primitive` lambda pushes a closure limit: references to locals bound
/// before its entry are out of scope inside its body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionModifier {
    Normal,
    Primitive,
}
