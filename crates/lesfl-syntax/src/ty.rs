//! Type-level declarations and expressions.

use lesfl_common::{Position, TypeParamIndex};

use crate::datatype::Datatype;
use crate::ident::IdentOccurrence;

/// The eight primitive scalar types seeded by the builtin adder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinTypeTag {
    Char,
    WChar,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
}

/// The two arity-1 type templates seeded by the builtin adder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinTypeTemplateTag {
    Array,
    UniqueArray,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeVariable {
    TypeSynonym(TypeExpression),
    Datatype(Datatype),
    Builtin(BuiltinTypeTag),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeFunction {
    TypeSynonym(TypeSynonymFunction),
    Datatype(DatatypeFunction),
    Builtin(BuiltinTypeFunction),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSynonymFunction {
    pub arity: u32,
    pub body: TypeExpression,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatatypeFunction {
    pub arity: u32,
    pub body: Datatype,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinTypeFunction {
    pub arity: u32,
    pub tag: BuiltinTypeTemplateTag,
}

/// A type-parameter occurrence inside a template's body. Unlike
/// `IdentOccurrence`, the only possible resolution is a `TypeParamIndex`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamRef {
    pub name: String,
    pub position: Position,
    pub resolved_index: Option<TypeParamIndex>,
}

impl TypeParamRef {
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            resolved_index: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpression {
    TypeParam(TypeParamRef),
    Named(IdentOccurrence),
    Application(IdentOccurrence, Vec<TypeExpression>),
    Function(Vec<TypeExpression>, Box<TypeExpression>),
    Tuple(Vec<TypeExpression>),
    Unique(Box<TypeExpression>),
}

impl TypeExpression {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            TypeExpression::TypeParam(param) => param.position,
            TypeExpression::Named(ident) | TypeExpression::Application(ident, _) => {
                ident.position
            }
            TypeExpression::Function(_, result) => result.position(),
            TypeExpression::Tuple(members) => members
                .first()
                .map_or_else(Position::synthetic, TypeExpression::position),
            TypeExpression::Unique(inner) => inner.position(),
        }
    }
}
