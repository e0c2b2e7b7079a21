//! Compile-time constant data backing a `UserDefinedVariable`.
//!
//! Values are not executable code: there is no lambda, let, or match form
//! here, only the closed set of shapes a constant can take.

use lesfl_common::{FieldIndex, Position};

use crate::ident::IdentOccurrence;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralValue {
    Int(i64),
    Float(u64),
    Char(char),
    WChar(char),
    Str(String),
    Bool(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Literal(LiteralValue, Position),
    Tuple(Vec<Value>, Position),
    ConstructorPositional {
        constructor: IdentOccurrence,
        args: Vec<Value>,
        position: Position,
    },
    ConstructorNamed {
        constructor: IdentOccurrence,
        fields: Vec<NamedFieldValue>,
        position: Position,
    },
}

impl Value {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Value::Literal(_, position) | Value::Tuple(_, position) => *position,
            Value::ConstructorPositional { position, .. }
            | Value::ConstructorNamed { position, .. } => *position,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedFieldValue {
    pub name: String,
    pub value: Value,
    pub position: Position,
    pub resolved_field: Option<FieldIndex>,
}
