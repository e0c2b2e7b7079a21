//! Shared AST-builder helpers for integration tests.
//!
//! There is no parser in this crate; these builders assemble the same tree
//! shapes a parser would hand the resolver, so resolution can be exercised
//! directly against hand-built trees.
#![allow(dead_code)]

use lesfl_common::{Position, SourceId};
use lesfl_syntax::{
    AccessModifier, AliasVariable, Argument, Datatype, DatatypeFunction, Definition, Expression,
    Function, FunctionDefinition, FunctionModifier, IdentOccurrence, IdentPath, Import,
    InlineModifier, Lambda, LiteralValue, ModuleDefinition, Source, TypeFunction,
    TypeFunctionDefinition, TypeFunctionInstanceDefinition, UserDefinedFunction,
    UserDefinedVariable, Value, Variable, VariableDefinition,
};

pub fn pos() -> Position {
    Position::new(SourceId::new(0), 0, 0)
}

pub fn rel(segments: &[&str]) -> IdentOccurrence {
    IdentOccurrence::new(
        IdentPath::Relative(segments.iter().map(|s| s.to_string()).collect()),
        pos(),
    )
}

pub fn abs(segments: &[&str]) -> IdentOccurrence {
    IdentOccurrence::new(
        IdentPath::Absolute(segments.iter().map(|s| s.to_string()).collect()),
        pos(),
    )
}

pub fn int_value(n: i64) -> Value {
    Value::Literal(LiteralValue::Int(n), pos())
}

pub fn int_expr(n: i64) -> Expression {
    Expression::Literal(LiteralValue::Int(n), pos())
}

pub fn plain_var(name: &str, access: AccessModifier, value: Value) -> Definition {
    Definition::Variable(VariableDefinition {
        name: name.to_string(),
        access,
        variable: Variable::UserDefined(UserDefinedVariable {
            type_expr: None,
            value: Some(value),
            inst_type_params: None,
        }),
        position: pos(),
    })
}

pub fn alias_var(name: &str, target: &[&str]) -> Definition {
    Definition::Variable(VariableDefinition {
        name: name.to_string(),
        access: AccessModifier::None,
        variable: Variable::Alias(AliasVariable {
            type_expr: None,
            target: rel(target),
            inst_type_params: None,
        }),
        position: pos(),
    })
}

pub fn module(path: &[&str], absolute: bool, defs: Vec<Definition>) -> Definition {
    Definition::Module(ModuleDefinition {
        path: path.iter().map(|s| s.to_string()).collect(),
        absolute,
        defs,
        position: pos(),
    })
}

pub fn import_abs(path: &[&str]) -> Definition {
    Definition::Import(Import {
        path: abs(path),
        position: pos(),
    })
}

pub fn source(defs: Vec<Definition>) -> Source {
    Source {
        name: "test".to_string(),
        defs,
    }
}

pub fn argument(name: &str) -> Argument {
    Argument {
        name: name.to_string(),
        type_expr: None,
        position: pos(),
    }
}

pub fn plain_fn(
    name: &str,
    access: AccessModifier,
    arguments: Vec<Argument>,
    body: Expression,
) -> Definition {
    Definition::Function(FunctionDefinition {
        name: name.to_string(),
        access,
        function: Function::UserDefined(UserDefinedFunction {
            arguments,
            result_type: None,
            body: Box::new(body),
            annotations: Vec::new(),
            inline: InlineModifier::None,
            modifier: FunctionModifier::Normal,
            inst_type_params: None,
        }),
        position: pos(),
    })
}

pub fn lambda(modifier: FunctionModifier, arguments: Vec<Argument>, body: Expression) -> Lambda {
    Lambda {
        arguments,
        modifier,
        body: Box::new(body),
        position: pos(),
    }
}

pub fn ident_expr(segments: &[&str]) -> Expression {
    Expression::Ident(rel(segments))
}

pub fn datatype_fun(name: &str, access: AccessModifier, datatype: Datatype) -> Definition {
    Definition::TypeFunction(TypeFunctionDefinition {
        name: name.to_string(),
        access,
        type_params: Vec::new(),
        type_function: TypeFunction::Datatype(DatatypeFunction { arity: 0, body: datatype }),
        position: pos(),
    })
}

pub fn datatype_fun_instance(target: &[&str], datatype: Datatype) -> Definition {
    Definition::TypeFunctionInstance(TypeFunctionInstanceDefinition {
        target: abs(target),
        type_args: Vec::new(),
        type_params: Vec::new(),
        type_function: TypeFunction::Datatype(DatatypeFunction { arity: 0, body: datatype }),
        position: pos(),
    })
}
