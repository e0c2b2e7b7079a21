//! Abstract syntax tree for the lesfl frontend.
//!
//! This crate is pure data: no lexer, no grammar, no I/O. It defines the
//! tree shape a parser must deliver to `lesfl-resolver`, and the single
//! in-place resolution slot (`IdentOccurrence`) that the resolver fills in
//! as it walks the tree.
//!
//! Every node that can originate a diagnostic carries a
//! [`lesfl_common::Position`]. Recursive fields are boxed to keep enum sizes
//! bounded.

#![forbid(unsafe_code)]

pub mod annotation;
pub mod datatype;
pub mod definition;
pub mod expr;
pub mod ident;
pub mod pattern;
pub mod ty;
pub mod value;
pub mod variable;

pub use annotation::{Annotation, AnnotationKind, FunctionModifier, InlineModifier};
pub use datatype::{
    Constructor, Datatype, NamedFieldConstructor, UnnamedFieldConstructor, VariableConstructor,
};
pub use definition::{
    AccessModifier, Definition, FunctionDefinition, FunctionInstanceDefinition, Import,
    ModuleDefinition, Source, TypeFunctionDefinition, TypeFunctionInstanceDefinition,
    TypeVariableDefinition, VariableDefinition, VariableInstanceDefinition,
};
pub use expr::{
    Argument, Binding, Case, ConstructorApplication, Expression, Lambda, Let, Match,
    NamedFieldArg, TupleBindingVariable,
};
pub use ident::{IdentOccurrence, IdentPath};
pub use pattern::{NamedFieldPattern, Pattern};
pub use ty::{
    BuiltinTypeFunction, BuiltinTypeTag, BuiltinTypeTemplateTag, DatatypeFunction, TypeExpression,
    TypeFunction, TypeParamRef, TypeVariable,
};
pub use value::{LiteralValue, NamedFieldValue, Value};
pub use variable::{
    AliasVariable, ExternalFunction, ExternalVariable, Function, NativeFunction,
    UserDefinedFunction, UserDefinedVariable, Variable,
};
