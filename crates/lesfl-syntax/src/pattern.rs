//! Match patterns.

use lesfl_common::{FieldIndex, Position};

use crate::ident::IdentOccurrence;
use crate::value::LiteralValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    Wildcard(Position),
    Variable(String, Position),
    Literal(LiteralValue, Position),
    Tuple(Vec<Pattern>, Position),
    ConstructorPositional {
        constructor: IdentOccurrence,
        args: Vec<Pattern>,
        position: Position,
    },
    ConstructorNamed {
        constructor: IdentOccurrence,
        fields: Vec<NamedFieldPattern>,
        position: Position,
    },
}

impl Pattern {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Pattern::Wildcard(position)
            | Pattern::Variable(_, position)
            | Pattern::Literal(_, position)
            | Pattern::Tuple(_, position)
            | Pattern::ConstructorPositional { position, .. }
            | Pattern::ConstructorNamed { position, .. } => *position,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedFieldPattern {
    pub name: String,
    pub pattern: Pattern,
    pub position: Position,
    pub resolved_field: Option<FieldIndex>,
}
