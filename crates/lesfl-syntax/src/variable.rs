//! Variable and function bodies.
//!
//! `inst_type_params`, where present, marks a definition as a template:
//! only templates may reference type-parameter expressions in their bodies.

use crate::annotation::{Annotation, FunctionModifier, InlineModifier};
use crate::datatype::Constructor;
use crate::expr::{Argument, Expression};
use crate::ident::IdentOccurrence;
use crate::ty::TypeExpression;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Variable {
    UserDefined(UserDefinedVariable),
    External(ExternalVariable),
    Alias(AliasVariable),
    Function(Function),
    Constructor(Constructor),
    Library,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDefinedVariable {
    pub type_expr: Option<TypeExpression>,
    pub value: Option<Value>,
    pub inst_type_params: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalVariable {
    pub type_expr: TypeExpression,
    pub external_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasVariable {
    pub type_expr: Option<TypeExpression>,
    pub target: IdentOccurrence,
    pub inst_type_params: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Function {
    UserDefined(UserDefinedFunction),
    External(ExternalFunction),
    Native(NativeFunction),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDefinedFunction {
    pub arguments: Vec<Argument>,
    pub result_type: Option<TypeExpression>,
    pub body: Box<Expression>,
    pub annotations: Vec<Annotation>,
    pub inline: InlineModifier,
    pub modifier: FunctionModifier,
    pub inst_type_params: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalFunction {
    pub arguments: Vec<Argument>,
    pub result_type: TypeExpression,
    pub external_name: String,
    pub inst_type_params: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeFunction {
    pub arguments: Vec<Argument>,
    pub result_type: TypeExpression,
    pub inst_type_params: Option<Vec<String>>,
}
