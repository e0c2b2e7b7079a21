//! Executable expressions, let-bindings, and match cases.

use lesfl_common::{FieldIndex, Position};

use crate::annotation::FunctionModifier;
use crate::ident::IdentOccurrence;
use crate::pattern::Pattern;
use crate::ty::TypeExpression;
use crate::value::LiteralValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Ident(IdentOccurrence),
    Literal(LiteralValue, Position),
    /// A call to a builtin primitive operator (`#iadd`, `#isub`, ...). The
    /// operator name is stored without its leading `#`.
    Primitive(String, Vec<Expression>, Position),
    Application(Box<Expression>, Vec<Expression>, Position),
    Lambda(Lambda),
    Let(Let),
    Match(Match),
    Tuple(Vec<Expression>, Position),
    Constructor(ConstructorApplication),
}

impl Expression {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Expression::Ident(ident) => ident.position,
            Expression::Literal(_, position)
            | Expression::Primitive(_, _, position)
            | Expression::Application(_, _, position)
            | Expression::Tuple(_, position) => *position,
            Expression::Lambda(lambda) => lambda.position,
            Expression::Let(let_expr) => let_expr.position,
            Expression::Match(match_expr) => match_expr.position,
            Expression::Constructor(app) => app.position(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub type_expr: Option<TypeExpression>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lambda {
    pub arguments: Vec<Argument>,
    pub modifier: FunctionModifier,
    pub body: Box<Expression>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Let {
    pub bindings: Vec<(Binding, Expression)>,
    pub body: Box<Expression>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub scrutinee: Box<Expression>,
    pub cases: Vec<Case>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub pattern: Pattern,
    pub body: Expression,
    pub position: Position,
}

/// The left-hand side of one `let` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Var(String, Position),
    Tuple(Vec<TupleBindingVariable>, Position),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TupleBindingVariable {
    pub name: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructorApplication {
    Positional {
        constructor: IdentOccurrence,
        args: Vec<Expression>,
        position: Position,
    },
    Named {
        constructor: IdentOccurrence,
        fields: Vec<NamedFieldArg>,
        position: Position,
    },
}

impl ConstructorApplication {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            ConstructorApplication::Positional { position, .. }
            | ConstructorApplication::Named { position, .. } => *position,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedFieldArg {
    pub name: String,
    pub value: Expression,
    pub position: Position,
    pub resolved_field: Option<FieldIndex>,
}
