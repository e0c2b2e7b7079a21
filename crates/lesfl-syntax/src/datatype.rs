//! Algebraic datatypes and their constructors.

use crate::ty::TypeExpression;

/// `NonUnique` datatypes may mix any constructor shape; `Unique` (linear)
/// datatypes may only use function-constructors — a nullary
/// `VariableConstructor` would be a shared, duplicable constant, which a
/// unique value can never be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Datatype {
    NonUnique(Vec<Constructor>),
    Unique(Vec<Constructor>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constructor {
    Variable(VariableConstructor),
    UnnamedField(UnnamedFieldConstructor),
    NamedField(NamedFieldConstructor),
}

impl Constructor {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Constructor::Variable(c) => &c.name,
            Constructor::UnnamedField(c) => &c.name,
            Constructor::NamedField(c) => &c.name,
        }
    }
}

/// A nullary constructor: a plain named value of the datatype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableConstructor {
    pub name: String,
}

/// A constructor with positional fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnnamedFieldConstructor {
    pub name: String,
    pub fields: Vec<TypeExpression>,
}

/// A constructor with named (record-style) fields, in declaration order.
/// The name-to-index map is computed by the resolver, not stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedFieldConstructor {
    pub name: String,
    pub fields: Vec<(String, TypeExpression)>,
}

impl NamedFieldConstructor {
    #[must_use]
    pub fn field_index(&self, field_name: &str) -> Option<u32> {
        self.fields
            .iter()
            .position(|(name, _)| name == field_name)
            .map(|index| index as u32)
    }
}
