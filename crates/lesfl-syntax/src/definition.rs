//! Top-level and nested definitions.

use lesfl_common::Position;

use crate::ident::IdentOccurrence;
use crate::ty::{TypeExpression, TypeFunction, TypeVariable};
use crate::variable::{Function, Variable};

/// One parsed source file: a name (for diagnostics) plus its top-level
/// definition list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub defs: Vec<Definition>,
}

/// Public vs private visibility, as written on a definition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessModifier {
    #[default]
    None,
    Private,
}

impl AccessModifier {
    #[must_use]
    pub fn is_private(self) -> bool {
        matches!(self, AccessModifier::Private)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    Module(ModuleDefinition),
    Import(Import),
    Variable(VariableDefinition),
    VariableInstance(VariableInstanceDefinition),
    Function(FunctionDefinition),
    FunctionInstance(FunctionInstanceDefinition),
    TypeVariable(TypeVariableDefinition),
    TypeFunction(TypeFunctionDefinition),
    TypeFunctionInstance(TypeFunctionInstanceDefinition),
}

impl Definition {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Definition::Module(def) => def.position,
            Definition::Import(def) => def.position,
            Definition::Variable(def) => def.position,
            Definition::VariableInstance(def) => def.position,
            Definition::Function(def) => def.position,
            Definition::FunctionInstance(def) => def.position,
            Definition::TypeVariable(def) => def.position,
            Definition::TypeFunction(def) => def.position,
            Definition::TypeFunctionInstance(def) => def.position,
        }
    }
}

/// `module a.b.c { ... }` nests under the current module; `module
/// .a.b.c { ... }` (leading dot) is absolute and names the path from the
/// root regardless of the current module. `module . { ... }` is the
/// absolute empty path: it re-enters the root module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDefinition {
    pub path: Vec<String>,
    pub absolute: bool,
    pub defs: Vec<Definition>,
    pub position: Position,
}

/// `import a.b.c` (or a relative import, resolved against the current
/// module during the full resolution pass).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub path: IdentOccurrence,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    pub access: AccessModifier,
    pub variable: Variable,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableInstanceDefinition {
    pub target: IdentOccurrence,
    pub type_args: Vec<TypeExpression>,
    pub variable: Variable,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub name: String,
    pub access: AccessModifier,
    pub function: Function,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionInstanceDefinition {
    pub target: IdentOccurrence,
    pub type_args: Vec<TypeExpression>,
    pub function: Function,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeVariableDefinition {
    pub name: String,
    pub access: AccessModifier,
    pub type_variable: TypeVariable,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFunctionDefinition {
    pub name: String,
    pub access: AccessModifier,
    pub type_params: Vec<String>,
    pub type_function: TypeFunction,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFunctionInstanceDefinition {
    pub target: IdentOccurrence,
    pub type_args: Vec<TypeExpression>,
    pub type_params: Vec<String>,
    pub type_function: TypeFunction,
    pub position: Position,
}
