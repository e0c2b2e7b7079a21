//! The declaration pass (C5 / add_defs).
//!
//! Walks every definition list once, allocating a key for each top-level
//! module / variable / function / type-variable / type-function / instance
//! and registering it in the tree. Imports are ignored here (handled
//! entirely in the resolution pass). Instance definitions are not declared
//! here either — they attach to an already-declared template during the
//! resolution pass (4.5.7).

use tracing::{debug, span, Level};

use lesfl_common::{ErrorCategory, ErrorSink, Position};
use lesfl_syntax::{
    AccessModifier, Constructor, Datatype, Definition, FunctionDefinition, Source, TypeFunction,
    TypeFunctionDefinition, TypeVariable, TypeVariableDefinition, Variable, VariableDefinition,
};

use crate::tree::{AccessState, Tree};

/// Registers `path` and every one of its ancestors (including the root) as
/// a module. Idempotent; safe to call for a module path that is partially
/// or fully already registered.
fn register_module_chain(tree: &mut Tree, path: &[String]) {
    for len in 0..=path.len() {
        let (key, _) = tree.interner.intern(&path[..len]);
        tree.add_module(key);
    }
}

pub fn add_defs(tree: &mut Tree, errors: &mut ErrorSink, sources: &[Source]) {
    let _span = span!(Level::DEBUG, "add_defs").entered();
    let (root_key, _) = tree.interner.intern(&[]);
    tree.add_module(root_key);
    for source in sources {
        let mut module_path = Vec::new();
        declare_defs(tree, errors, &mut module_path, &source.defs);
    }
}

fn declare_defs(
    tree: &mut Tree,
    errors: &mut ErrorSink,
    module_path: &mut Vec<String>,
    defs: &[Definition],
) {
    for def in defs {
        match def {
            Definition::Import(_) => {}
            Definition::Module(module_def) => {
                let new_path = if module_def.absolute {
                    module_def.path.clone()
                } else {
                    let mut path = module_path.clone();
                    path.extend_from_slice(&module_def.path);
                    path
                };
                let _span = span!(Level::DEBUG, "module", path = %new_path.join(".")).entered();
                debug!("entering module");
                register_module_chain(tree, &new_path);
                let saved = std::mem::replace(module_path, new_path);
                declare_defs(tree, errors, module_path, &module_def.defs);
                *module_path = saved;
            }
            Definition::Variable(def) => declare_variable(tree, errors, module_path, def),
            Definition::Function(def) => declare_function(tree, errors, module_path, def),
            Definition::TypeVariable(def) => declare_type_variable(tree, errors, module_path, def),
            Definition::TypeFunction(def) => declare_type_function(tree, errors, module_path, def),
            Definition::VariableInstance(_)
            | Definition::FunctionInstance(_)
            | Definition::TypeFunctionInstance(_) => {}
        }
    }
}

fn qualify(module_path: &[String], name: &str) -> Vec<String> {
    let mut path = module_path.to_vec();
    path.push(name.to_string());
    path
}

fn declare_variable(
    tree: &mut Tree,
    errors: &mut ErrorSink,
    module_path: &[String],
    def: &VariableDefinition,
) {
    let path = qualify(module_path, &def.name);
    let (key, _) = tree.interner.intern(&path);
    let is_template = variable_is_template(&def.variable);
    if !tree.add_var(key, AccessState::Final(def.access), def.variable.clone()) {
        report_redefinition(errors, def.position, &path, is_template);
    }
}

fn declare_function(
    tree: &mut Tree,
    errors: &mut ErrorSink,
    module_path: &[String],
    def: &FunctionDefinition,
) {
    let path = qualify(module_path, &def.name);
    let (key, _) = tree.interner.intern(&path);
    let is_template = function_is_template(&def.function);
    let variable = Variable::Function(def.function.clone());
    if !tree.add_var(key, AccessState::Final(def.access), variable) {
        report_redefinition(errors, def.position, &path, is_template);
    }
}

fn declare_type_variable(
    tree: &mut Tree,
    errors: &mut ErrorSink,
    module_path: &[String],
    def: &TypeVariableDefinition,
) {
    let path = qualify(module_path, &def.name);
    let (key, _) = tree.interner.intern(&path);
    if !tree.add_type_var(key, def.access, def.type_variable.clone()) {
        report_redefinition(errors, def.position, &path, false);
        return;
    }
    if let TypeVariable::Datatype(datatype) = &def.type_variable {
        declare_datatype_constructors(
            tree,
            errors,
            module_path,
            datatype,
            def.position,
            &path,
        );
    }
}

fn declare_type_function(
    tree: &mut Tree,
    errors: &mut ErrorSink,
    module_path: &[String],
    def: &TypeFunctionDefinition,
) {
    let path = qualify(module_path, &def.name);
    let (key, _) = tree.interner.intern(&path);
    if !tree.add_type_fun(key, def.access, def.type_function.clone()) {
        report_redefinition(errors, def.position, &path, true);
        return;
    }
    if let TypeFunction::Datatype(datatype_fun) = &def.type_function {
        declare_datatype_constructors(
            tree,
            errors,
            module_path,
            &datatype_fun.body,
            def.position,
            &path,
        );
    }
}

/// Flattens each constructor of `datatype` into a separately-keyed
/// `ConstructorVariable` in `module_path`. `datatype_path` is the owning
/// datatype's absolute path, stored as the constructor's deferred access
/// reference (finalized lazily on first reference, see `context::lookup_namespace`).
///
/// Also used from the resolution pass (4.5.7) to flatten a
/// `DatatypeFunctionInstance`'s own constructors once its target template
/// has resolved, since an instance attaches to an already-declared template
/// rather than being declared itself.
pub(crate) fn declare_datatype_constructors(
    tree: &mut Tree,
    errors: &mut ErrorSink,
    module_path: &[String],
    datatype: &Datatype,
    position: Position,
    datatype_path: &[String],
) {
    let constructors = match datatype {
        Datatype::NonUnique(constructors) => constructors,
        Datatype::Unique(constructors) => constructors,
    };
    for constructor in constructors {
        if matches!(datatype, Datatype::Unique(_)) && matches!(constructor, Constructor::Variable(_))
        {
            errors.push(
                ErrorCategory::KindMismatch,
                position,
                format!(
                    "unique datatype constructor {} must have fields",
                    constructor.name()
                ),
            );
            continue;
        }
        let path = qualify(module_path, constructor.name());
        let (key, _) = tree.interner.intern(&path);
        let variable = Variable::Constructor(constructor.clone());
        let access_state = AccessState::Pending(datatype_path.to_vec());
        if !tree.add_var(key, access_state, variable) {
            report_redefinition(errors, position, &path, false);
        }
    }
}

fn variable_is_template(variable: &Variable) -> bool {
    match variable {
        Variable::UserDefined(v) => v.inst_type_params.is_some(),
        Variable::Alias(v) => v.inst_type_params.is_some(),
        Variable::Function(f) => function_is_template(f),
        _ => false,
    }
}

fn function_is_template(function: &lesfl_syntax::Function) -> bool {
    match function {
        lesfl_syntax::Function::UserDefined(f) => f.inst_type_params.is_some(),
        lesfl_syntax::Function::External(f) => f.inst_type_params.is_some(),
        lesfl_syntax::Function::Native(f) => f.inst_type_params.is_some(),
    }
}

fn report_redefinition(errors: &mut ErrorSink, position: Position, path: &[String], is_template: bool) {
    let kind = if is_template { "template" } else { "definition" };
    errors.push(
        ErrorCategory::Redefinition,
        position,
        format!("redefinition of {kind} .{}", path.join(".")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesfl_common::SourceId;
    use lesfl_syntax::{Datatype, UserDefinedVariable, VariableConstructor};

    fn pos() -> Position {
        Position::new(SourceId::new(0), 0, 0)
    }

    fn plain_variable(name: &str) -> Definition {
        Definition::Variable(VariableDefinition {
            name: name.to_string(),
            access: AccessModifier::None,
            variable: Variable::UserDefined(UserDefinedVariable {
                type_expr: None,
                value: None,
                inst_type_params: None,
            }),
            position: pos(),
        })
    }

    #[test]
    fn add_defs_declares_a_top_level_variable() {
        let mut tree = Tree::new();
        let mut errors = ErrorSink::new();
        let sources = vec![Source {
            name: "s".to_string(),
            defs: vec![plain_variable("v")],
        }];
        add_defs(&mut tree, &mut errors, &sources);
        assert!(!errors.had_errors());
        let (key, _) = tree.interner.intern(&["v".to_string()]);
        assert!(tree.var_info(key).is_some());
    }

    #[test]
    fn add_defs_reports_redefinition() {
        let mut tree = Tree::new();
        let mut errors = ErrorSink::new();
        let sources = vec![Source {
            name: "s".to_string(),
            defs: vec![plain_variable("v"), plain_variable("v")],
        }];
        add_defs(&mut tree, &mut errors, &sources);
        assert!(errors.had_errors());
    }

    #[test]
    fn nested_module_qualifies_its_definitions() {
        let mut tree = Tree::new();
        let mut errors = ErrorSink::new();
        let sources = vec![Source {
            name: "s".to_string(),
            defs: vec![Definition::Module(lesfl_syntax::ModuleDefinition {
                path: vec!["m".to_string()],
                absolute: false,
                defs: vec![plain_variable("v")],
                position: pos(),
            })],
        }];
        add_defs(&mut tree, &mut errors, &sources);
        assert!(!errors.had_errors());
        let (key, _) = tree.interner.intern(&["m".to_string(), "v".to_string()]);
        assert!(tree.var_info(key).is_some());
        let (module_key, _) = tree.interner.intern(&["m".to_string()]);
        assert!(tree.has_module(module_key));
    }

    #[test]
    fn unique_datatype_rejects_nullary_constructor() {
        let mut tree = Tree::new();
        let mut errors = ErrorSink::new();
        let sources = vec![Source {
            name: "s".to_string(),
            defs: vec![Definition::TypeVariable(TypeVariableDefinition {
                name: "T".to_string(),
                access: AccessModifier::None,
                type_variable: TypeVariable::Datatype(Datatype::Unique(vec![Constructor::Variable(
                    VariableConstructor {
                        name: "Nullary".to_string(),
                    },
                )])),
                position: pos(),
            })],
        }];
        add_defs(&mut tree, &mut errors, &sources);
        assert!(errors.had_errors());
    }

    #[test]
    fn datatype_constructors_are_flattened_into_the_variable_namespace() {
        let mut tree = Tree::new();
        let mut errors = ErrorSink::new();
        let sources = vec![Source {
            name: "s".to_string(),
            defs: vec![Definition::TypeVariable(TypeVariableDefinition {
                name: "T".to_string(),
                access: AccessModifier::Private,
                type_variable: TypeVariable::Datatype(Datatype::NonUnique(vec![
                    Constructor::Variable(VariableConstructor {
                        name: "Ctor".to_string(),
                    }),
                ])),
                position: pos(),
            })],
        }];
        add_defs(&mut tree, &mut errors, &sources);
        assert!(!errors.had_errors());
        let (ctor_key, _) = tree.interner.intern(&["Ctor".to_string()]);
        let info = tree.var_info(ctor_key).expect("constructor declared");
        assert_eq!(
            info.pending_datatype_path(),
            Some(&["T".to_string()][..])
        );
    }
}
