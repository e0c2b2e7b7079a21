//! The resolution pass (C6).
//!
//! Runs in two sub-passes over the same definition lists: an **alias pass**
//! that resolves only imports, nested modules, and alias-variable targets
//! (so alias cycles are detectable before anything dereferences them), and
//! a **full pass** that resolves every remaining identifier occurrence,
//! local scope, closure boundary, type-parameter scope, constructor
//! application, and instance attachment.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use lesfl_common::{ErrorCategory, KeyIdent, Position};
use lesfl_syntax::{
    Binding, Case, Constructor, ConstructorApplication, Datatype, Definition, Expression,
    Function, FunctionDefinition, FunctionInstanceDefinition, IdentOccurrence, Import, Lambda,
    Let, Match, NamedFieldArg, NamedFieldConstructor, NamedFieldPattern, NamedFieldValue, Pattern,
    Source, TypeExpression, TypeFunction, TypeFunctionDefinition, TypeFunctionInstanceDefinition,
    TypeVariable, TypeVariableDefinition, Value, Variable, VariableDefinition,
    VariableInstanceDefinition,
};

use crate::annotations::validate_annotations;
use crate::context::{Namespace, Resolution, ResolverContext};
use crate::tree::Tree;

/// Runs the declaration pass, the alias pass, then the full pass over
/// `sources`, mutating every `IdentOccurrence`/field-index slot in place.
pub fn resolve(sources: &mut [Source]) -> (Tree, ResolverContext) {
    let mut tree = Tree::new();
    crate::builtins::seed_builtins(&mut tree);

    let mut ctx = ResolverContext::new();
    crate::declare::add_defs(&mut tree, &mut ctx.errors, sources);

    debug!("starting alias pass");
    for source in sources.iter_mut() {
        ctx.current_module.clear();
        ctx.push_import_frame();
        walk_defs(&mut tree, &mut ctx, &mut source.defs, Pass::Alias);
        ctx.pop_import_frame();
    }

    debug!("starting full pass");
    for source in sources.iter_mut() {
        ctx.current_module.clear();
        ctx.push_import_frame();
        walk_defs(&mut tree, &mut ctx, &mut source.defs, Pass::Full);
        ctx.pop_import_frame();
        ctx.check_stacks_empty(Position::synthetic());
    }

    (tree, ctx)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Pass {
    Alias,
    Full,
}

fn walk_defs(tree: &mut Tree, ctx: &mut ResolverContext, defs: &mut [Definition], pass: Pass) {
    for def in defs {
        match def {
            Definition::Import(import) => resolve_import(tree, ctx, import),
            Definition::Module(module_def) => {
                let new_path = if module_def.absolute {
                    module_def.path.clone()
                } else {
                    let mut full = ctx.current_module.clone();
                    full.extend_from_slice(&module_def.path);
                    full
                };
                let saved = std::mem::replace(&mut ctx.current_module, new_path);
                ctx.push_import_frame();
                walk_defs(tree, ctx, &mut module_def.defs, pass);
                ctx.pop_import_frame();
                ctx.current_module = saved;
            }
            Definition::Variable(def) => match pass {
                Pass::Alias => {
                    if matches!(def.variable, Variable::Alias(_)) {
                        resolve_variable_def(tree, ctx, def);
                    }
                }
                Pass::Full => resolve_variable_def(tree, ctx, def),
            },
            Definition::Function(def) => {
                if pass == Pass::Full {
                    resolve_function_def(tree, ctx, def);
                }
            }
            Definition::TypeVariable(def) => {
                if pass == Pass::Full {
                    resolve_type_variable_def(tree, ctx, def);
                }
            }
            Definition::TypeFunction(def) => {
                if pass == Pass::Full {
                    resolve_type_function_def(tree, ctx, def);
                }
            }
            Definition::VariableInstance(def) => {
                if pass == Pass::Full {
                    resolve_variable_instance(tree, ctx, def);
                }
            }
            Definition::FunctionInstance(def) => {
                if pass == Pass::Full {
                    resolve_function_instance(tree, ctx, def);
                }
            }
            Definition::TypeFunctionInstance(def) => {
                if pass == Pass::Full {
                    resolve_type_function_instance(tree, ctx, def);
                }
            }
        }
    }
}

fn resolve_import(tree: &mut Tree, ctx: &mut ResolverContext, import: &mut Import) {
    resolve_ident(tree, ctx, &mut import.path, Namespace::Module, false);
    if let Some(key) = import.path.resolved_key {
        let absolute = tree.interner.lookup_segments(key).to_vec();
        trace!(path = ?absolute, "import resolved");
        ctx.add_import(absolute);
    }
}

fn resolve_ident(
    tree: &mut Tree,
    ctx: &mut ResolverContext,
    ident: &mut IdentOccurrence,
    ns: Namespace,
    allow_local: bool,
) {
    let resolution = match &ident.path {
        lesfl_syntax::IdentPath::Absolute(segments) => {
            ctx.resolve_absolute(tree, ns, segments, ident.position)
        }
        lesfl_syntax::IdentPath::Relative(segments) => {
            ctx.resolve_relative(tree, ns, segments, ident.position, allow_local)
        }
    };
    match resolution {
        Some(Resolution::Local(index)) => ident.resolved_local = Some(index),
        Some(Resolution::Global(key)) => ident.resolved_key = Some(key),
        None => {}
    }
}

// ---- variable / function / type definitions ----

fn resolve_variable_def(tree: &mut Tree, ctx: &mut ResolverContext, def: &mut VariableDefinition) {
    resolve_variable_body(tree, ctx, &mut def.variable);
    // follow_alias walks the tree's own copy of each AliasVariable, made at
    // declare time before any ident had resolved — write the now-resolved
    // clone back so a later alias-chain walk sees real resolved_key slots
    // instead of the stale pre-resolution ones.
    if matches!(def.variable, Variable::Alias(_)) {
        let mut path = ctx.current_module.clone();
        path.push(def.name.clone());
        let (key, _) = tree.interner.intern(&path);
        if let Some(info) = tree.var_info_mut(key) {
            info.variable = def.variable.clone();
        }
    }
}

/// Resolves the body of a `Variable`, shared between top-level definitions
/// and instance attachments (4.5.7), which carry the same variant shapes.
fn resolve_variable_body(tree: &mut Tree, ctx: &mut ResolverContext, variable: &mut Variable) {
    match variable {
        Variable::UserDefined(v) => {
            let templated = v.inst_type_params.clone();
            if let Some(params) = &templated {
                ctx.enter_template(params);
            }
            if let Some(ty) = &mut v.type_expr {
                resolve_type_expression(tree, ctx, ty);
            }
            if let Some(value) = &mut v.value {
                resolve_value(tree, ctx, value);
            }
            if templated.is_some() {
                ctx.exit_template();
            }
        }
        Variable::External(v) => resolve_type_expression(tree, ctx, &mut v.type_expr),
        Variable::Alias(v) => {
            let templated = v.inst_type_params.clone();
            if let Some(params) = &templated {
                ctx.enter_template(params);
            }
            resolve_ident(tree, ctx, &mut v.target, Namespace::Variable, false);
            if let Some(key) = v.target.resolved_key {
                follow_alias(tree, ctx, key, v.target.position);
            }
            if let Some(ty) = &mut v.type_expr {
                resolve_type_expression(tree, ctx, ty);
            }
            if templated.is_some() {
                ctx.exit_template();
            }
        }
        Variable::Function(function) => resolve_function(tree, ctx, function),
        Variable::Constructor(_) | Variable::Library => {}
    }
}

fn resolve_function_def(tree: &mut Tree, ctx: &mut ResolverContext, def: &mut FunctionDefinition) {
    resolve_function(tree, ctx, &mut def.function);
}

fn resolve_function(tree: &mut Tree, ctx: &mut ResolverContext, function: &mut Function) {
    match function {
        Function::UserDefined(f) => {
            let templated = f.inst_type_params.clone();
            if let Some(params) = &templated {
                ctx.enter_template(params);
            }
            validate_annotations(ctx, &f.annotations);
            ctx.push_local_frame();
            ctx.clear_top_group();
            for arg in &mut f.arguments {
                if !ctx.declare_in_top_group(&arg.name) {
                    ctx.errors.push(
                        ErrorCategory::Redefinition,
                        arg.position,
                        format!("argument {} is already defined", arg.name),
                    );
                }
                ctx.push_local(&arg.name);
                if let Some(ty) = &mut arg.type_expr {
                    resolve_type_expression(tree, ctx, ty);
                }
            }
            ctx.clear_top_group();
            if let Some(ty) = &mut f.result_type {
                resolve_type_expression(tree, ctx, ty);
            }
            let primitive = matches!(f.modifier, lesfl_syntax::FunctionModifier::Primitive);
            if primitive {
                ctx.push_closure_limit();
            }
            resolve_expression(tree, ctx, &mut f.body);
            if primitive {
                ctx.pop_closure_limit();
            }
            ctx.pop_local_frame();
            if templated.is_some() {
                ctx.exit_template();
            }
        }
        Function::External(f) => {
            let templated = f.inst_type_params.clone();
            if let Some(params) = &templated {
                ctx.enter_template(params);
            }
            ctx.push_local_frame();
            ctx.clear_top_group();
            for arg in &mut f.arguments {
                ctx.declare_in_top_group(&arg.name);
                ctx.push_local(&arg.name);
                if let Some(ty) = &mut arg.type_expr {
                    resolve_type_expression(tree, ctx, ty);
                }
            }
            ctx.clear_top_group();
            resolve_type_expression(tree, ctx, &mut f.result_type);
            ctx.pop_local_frame();
            if templated.is_some() {
                ctx.exit_template();
            }
        }
        Function::Native(f) => {
            let templated = f.inst_type_params.clone();
            if let Some(params) = &templated {
                ctx.enter_template(params);
            }
            ctx.push_local_frame();
            ctx.clear_top_group();
            for arg in &mut f.arguments {
                ctx.declare_in_top_group(&arg.name);
                ctx.push_local(&arg.name);
                if let Some(ty) = &mut arg.type_expr {
                    resolve_type_expression(tree, ctx, ty);
                }
            }
            ctx.clear_top_group();
            resolve_type_expression(tree, ctx, &mut f.result_type);
            ctx.pop_local_frame();
            if templated.is_some() {
                ctx.exit_template();
            }
        }
    }
}

fn resolve_type_variable_def(
    tree: &mut Tree,
    ctx: &mut ResolverContext,
    def: &mut TypeVariableDefinition,
) {
    match &mut def.type_variable {
        TypeVariable::TypeSynonym(ty) => resolve_type_expression(tree, ctx, ty),
        TypeVariable::Datatype(datatype) => resolve_datatype(tree, ctx, datatype),
        TypeVariable::Builtin(_) => {}
    }
}

fn resolve_type_function_def(
    tree: &mut Tree,
    ctx: &mut ResolverContext,
    def: &mut TypeFunctionDefinition,
) {
    ctx.enter_template(&def.type_params);
    resolve_type_function_body(tree, ctx, &mut def.type_function);
    ctx.exit_template();
}

fn resolve_type_function_body(tree: &mut Tree, ctx: &mut ResolverContext, f: &mut TypeFunction) {
    match f {
        TypeFunction::TypeSynonym(body) => resolve_type_expression(tree, ctx, &mut body.body),
        TypeFunction::Datatype(body) => resolve_datatype(tree, ctx, &mut body.body),
        TypeFunction::Builtin(_) => {}
    }
}

fn resolve_datatype(tree: &mut Tree, ctx: &mut ResolverContext, datatype: &mut Datatype) {
    let constructors = match datatype {
        Datatype::NonUnique(constructors) | Datatype::Unique(constructors) => constructors,
    };
    for constructor in constructors {
        match constructor {
            Constructor::Variable(_) => {}
            Constructor::UnnamedField(c) => {
                for field in &mut c.fields {
                    resolve_type_expression(tree, ctx, field);
                }
            }
            Constructor::NamedField(c) => {
                for (_, field) in &mut c.fields {
                    resolve_type_expression(tree, ctx, field);
                }
            }
        }
    }
}

// ---- instance attachments (4.5.7) ----

fn resolve_variable_instance(
    tree: &mut Tree,
    ctx: &mut ResolverContext,
    def: &mut VariableInstanceDefinition,
) {
    resolve_ident(tree, ctx, &mut def.target, Namespace::Variable, false);
    for ty in &mut def.type_args {
        resolve_type_expression(tree, ctx, ty);
    }
    resolve_variable_body(tree, ctx, &mut def.variable);
    if let Some(key) = def.target.resolved_key {
        if let Some(info) = tree.var_info_mut(key) {
            info.instances.push(def.variable.clone());
        }
    }
}

fn resolve_function_instance(
    tree: &mut Tree,
    ctx: &mut ResolverContext,
    def: &mut FunctionInstanceDefinition,
) {
    resolve_ident(tree, ctx, &mut def.target, Namespace::Variable, false);
    for ty in &mut def.type_args {
        resolve_type_expression(tree, ctx, ty);
    }
    resolve_function(tree, ctx, &mut def.function);
    if let Some(key) = def.target.resolved_key {
        if let Some(info) = tree.var_info_mut(key) {
            info.instances.push(Variable::Function(def.function.clone()));
        }
    }
}

fn resolve_type_function_instance(
    tree: &mut Tree,
    ctx: &mut ResolverContext,
    def: &mut TypeFunctionInstanceDefinition,
) {
    resolve_ident(tree, ctx, &mut def.target, Namespace::TypeFunction, false);
    for ty in &mut def.type_args {
        resolve_type_expression(tree, ctx, ty);
    }
    // A DatatypeFunctionInstance's constructors are never declared in the
    // declaration pass (the instance attaches to an already-declared
    // template) — flatten them here, now that the target has resolved,
    // the same way declare_datatype_constructors flattens a plain datatype.
    if let Some(key) = def.target.resolved_key {
        if let TypeFunction::Datatype(body) = &def.type_function {
            let datatype_path = tree.interner.lookup_segments(key).to_vec();
            crate::declare::declare_datatype_constructors(
                tree,
                &mut ctx.errors,
                &ctx.current_module,
                &body.body,
                def.position,
                &datatype_path,
            );
        }
    }
    ctx.enter_template(&def.type_params);
    resolve_type_function_body(tree, ctx, &mut def.type_function);
    ctx.exit_template();
    if let Some(key) = def.target.resolved_key {
        if let Some(info) = tree.type_fun_info_mut(key) {
            info.instances.push(def.type_function.clone());
        }
    }
}

// ---- expressions, bindings, patterns, values ----

fn resolve_expression(tree: &mut Tree, ctx: &mut ResolverContext, expr: &mut Expression) {
    match expr {
        Expression::Ident(ident) => resolve_ident(tree, ctx, ident, Namespace::Variable, true),
        Expression::Literal(_, _) => {}
        Expression::Primitive(_, args, _) => {
            for arg in args {
                resolve_expression(tree, ctx, arg);
            }
        }
        Expression::Application(callee, args, _) => {
            resolve_expression(tree, ctx, callee);
            for arg in args {
                resolve_expression(tree, ctx, arg);
            }
        }
        Expression::Lambda(lambda) => resolve_lambda(tree, ctx, lambda),
        Expression::Let(let_expr) => resolve_let(tree, ctx, let_expr),
        Expression::Match(match_expr) => resolve_match(tree, ctx, match_expr),
        Expression::Tuple(items, _) => {
            for item in items {
                resolve_expression(tree, ctx, item);
            }
        }
        Expression::Constructor(app) => resolve_constructor_application(tree, ctx, app),
    }
}

fn resolve_lambda(tree: &mut Tree, ctx: &mut ResolverContext, lambda: &mut Lambda) {
    ctx.push_local_frame();
    ctx.clear_top_group();
    for arg in &mut lambda.arguments {
        if !ctx.declare_in_top_group(&arg.name) {
            ctx.errors.push(
                ErrorCategory::Redefinition,
                arg.position,
                format!("argument {} is already defined", arg.name),
            );
        }
        ctx.push_local(&arg.name);
        if let Some(ty) = &mut arg.type_expr {
            resolve_type_expression(tree, ctx, ty);
        }
    }
    ctx.clear_top_group();
    let primitive = matches!(lambda.modifier, lesfl_syntax::FunctionModifier::Primitive);
    if primitive {
        ctx.push_closure_limit();
    }
    resolve_expression(tree, ctx, &mut lambda.body);
    if primitive {
        ctx.pop_closure_limit();
    }
    ctx.pop_local_frame();
}

/// All of a `let` group's right-hand sides resolve in the *outer* scope,
/// before any of the group's own names are declared — a `let a = 1, b = a`
/// clause's `a` on the right refers to an outer `a`, never the new one.
fn resolve_let(tree: &mut Tree, ctx: &mut ResolverContext, let_expr: &mut Let) {
    ctx.push_local_frame();
    for (_, rhs) in &mut let_expr.bindings {
        resolve_expression(tree, ctx, rhs);
    }
    ctx.clear_top_group();
    for (binding, _) in &mut let_expr.bindings {
        declare_binding(ctx, binding);
    }
    ctx.clear_top_group();
    resolve_expression(tree, ctx, &mut let_expr.body);
    ctx.pop_local_frame();
}

fn declare_binding(ctx: &mut ResolverContext, binding: &mut Binding) {
    match binding {
        Binding::Var(name, position) => {
            if !ctx.declare_in_top_group(name) {
                ctx.errors.push(
                    ErrorCategory::Redefinition,
                    *position,
                    format!("variable {name} is already bound"),
                );
            }
            ctx.push_local(name);
        }
        Binding::Tuple(vars, _) => {
            for var in vars {
                if !ctx.declare_in_top_group(&var.name) {
                    ctx.errors.push(
                        ErrorCategory::Redefinition,
                        var.position,
                        format!("variable {} is already bound", var.name),
                    );
                }
                ctx.push_local(&var.name);
            }
        }
    }
}

fn resolve_match(tree: &mut Tree, ctx: &mut ResolverContext, match_expr: &mut Match) {
    resolve_expression(tree, ctx, &mut match_expr.scrutinee);
    for case in &mut match_expr.cases {
        resolve_case(tree, ctx, case);
    }
}

fn resolve_case(tree: &mut Tree, ctx: &mut ResolverContext, case: &mut Case) {
    ctx.push_local_frame();
    ctx.clear_top_group();
    resolve_pattern(tree, ctx, &mut case.pattern);
    ctx.clear_top_group();
    resolve_expression(tree, ctx, &mut case.body);
    ctx.pop_local_frame();
}

fn resolve_pattern(tree: &mut Tree, ctx: &mut ResolverContext, pattern: &mut Pattern) {
    match pattern {
        Pattern::Wildcard(_) | Pattern::Literal(_, _) => {}
        Pattern::Variable(name, position) => {
            if !ctx.declare_in_top_group(name) {
                ctx.errors.push(
                    ErrorCategory::Redefinition,
                    *position,
                    format!("variable {name} is already bound"),
                );
            }
            ctx.push_local(name);
        }
        Pattern::Tuple(items, _) => {
            for item in items {
                resolve_pattern(tree, ctx, item);
            }
        }
        Pattern::ConstructorPositional {
            constructor,
            args,
            position,
        } => {
            let resolved = resolve_constructor_ref(tree, ctx, constructor);
            for arg in args.iter_mut() {
                resolve_pattern(tree, ctx, arg);
            }
            if let Some(key) = resolved {
                check_positional_arity(tree, ctx, key, args.len(), *position);
            }
        }
        Pattern::ConstructorNamed {
            constructor,
            fields,
            position,
        } => {
            let resolved = resolve_constructor_ref(tree, ctx, constructor);
            match resolved.and_then(|key| named_field_constructor(tree, key)) {
                Some(named) => resolve_named_pattern_fields(ctx, &named, fields, *position),
                None => {
                    if resolved.is_some() {
                        ctx.errors.push(
                            ErrorCategory::KindMismatch,
                            *position,
                            "wrong constructor kind",
                        );
                    }
                    for field in fields {
                        resolve_pattern(tree, ctx, &mut field.pattern);
                    }
                }
            }
        }
    }
}

fn resolve_named_pattern_fields(
    ctx: &mut ResolverContext,
    constructor: &NamedFieldConstructor,
    fields: &mut [NamedFieldPattern],
    position: Position,
) {
    let mut seen = FxHashSet::default();
    for field in fields.iter_mut() {
        match constructor.field_index(&field.name) {
            Some(index) => {
                if !seen.insert(index) {
                    ctx.errors.push(
                        ErrorCategory::FieldError,
                        field.position,
                        format!("field {} is already specified", field.name),
                    );
                }
                field.resolved_field = Some(lesfl_common::FieldIndex::new(index));
            }
            None => {
                ctx.errors.push(
                    ErrorCategory::FieldError,
                    field.position,
                    format!(
                        "field {} undefined at constructor {}",
                        field.name, constructor.name
                    ),
                );
            }
        }
    }
    if seen.len() < constructor.fields.len() {
        ctx.errors
            .push(ErrorCategory::ArityMismatch, position, "too few fields");
    }
}

fn resolve_value(tree: &mut Tree, ctx: &mut ResolverContext, value: &mut Value) {
    match value {
        Value::Literal(_, _) => {}
        Value::Tuple(items, _) => {
            for item in items {
                resolve_value(tree, ctx, item);
            }
        }
        Value::ConstructorPositional {
            constructor,
            args,
            position,
        } => {
            let resolved = resolve_constructor_ref(tree, ctx, constructor);
            for arg in args.iter_mut() {
                resolve_value(tree, ctx, arg);
            }
            if let Some(key) = resolved {
                check_positional_arity(tree, ctx, key, args.len(), *position);
            }
        }
        Value::ConstructorNamed {
            constructor,
            fields,
            position,
        } => {
            let resolved = resolve_constructor_ref(tree, ctx, constructor);
            match resolved.and_then(|key| named_field_constructor(tree, key)) {
                Some(named) => resolve_named_value_fields(ctx, &named, fields, *position),
                None => {
                    if resolved.is_some() {
                        ctx.errors.push(
                            ErrorCategory::KindMismatch,
                            *position,
                            "wrong constructor kind",
                        );
                    }
                    for field in fields {
                        resolve_value(tree, ctx, &mut field.value);
                    }
                }
            }
        }
    }
}

fn resolve_named_value_fields(
    ctx: &mut ResolverContext,
    constructor: &NamedFieldConstructor,
    fields: &mut [NamedFieldValue],
    position: Position,
) {
    let mut seen = FxHashSet::default();
    for field in fields.iter_mut() {
        match constructor.field_index(&field.name) {
            Some(index) => {
                if !seen.insert(index) {
                    ctx.errors.push(
                        ErrorCategory::FieldError,
                        field.position,
                        format!("field {} is already specified", field.name),
                    );
                }
                field.resolved_field = Some(lesfl_common::FieldIndex::new(index));
            }
            None => {
                ctx.errors.push(
                    ErrorCategory::FieldError,
                    field.position,
                    format!(
                        "field {} undefined at constructor {}",
                        field.name, constructor.name
                    ),
                );
            }
        }
    }
    if seen.len() < constructor.fields.len() {
        ctx.errors
            .push(ErrorCategory::ArityMismatch, position, "too few fields");
    }
}

fn resolve_constructor_application(
    tree: &mut Tree,
    ctx: &mut ResolverContext,
    app: &mut ConstructorApplication,
) {
    match app {
        ConstructorApplication::Positional {
            constructor,
            args,
            position,
        } => {
            let resolved = resolve_constructor_ref(tree, ctx, constructor);
            for arg in args.iter_mut() {
                resolve_expression(tree, ctx, arg);
            }
            if let Some(key) = resolved {
                check_positional_arity(tree, ctx, key, args.len(), *position);
            }
        }
        ConstructorApplication::Named {
            constructor,
            fields,
            position,
        } => {
            let resolved = resolve_constructor_ref(tree, ctx, constructor);
            match resolved.and_then(|key| named_field_constructor(tree, key)) {
                Some(named) => resolve_named_expr_fields(ctx, &named, fields, *position),
                None => {
                    if resolved.is_some() {
                        ctx.errors.push(
                            ErrorCategory::KindMismatch,
                            *position,
                            "wrong constructor kind",
                        );
                    }
                    for field in fields {
                        resolve_expression(tree, ctx, &mut field.value);
                    }
                }
            }
        }
    }
}

fn resolve_named_expr_fields(
    ctx: &mut ResolverContext,
    constructor: &NamedFieldConstructor,
    fields: &mut [NamedFieldArg],
    position: Position,
) {
    let mut seen = FxHashSet::default();
    for field in fields.iter_mut() {
        match constructor.field_index(&field.name) {
            Some(index) => {
                if !seen.insert(index) {
                    ctx.errors.push(
                        ErrorCategory::FieldError,
                        field.position,
                        format!("field {} is already specified", field.name),
                    );
                }
                field.resolved_field = Some(lesfl_common::FieldIndex::new(index));
            }
            None => {
                ctx.errors.push(
                    ErrorCategory::FieldError,
                    field.position,
                    format!(
                        "field {} undefined at constructor {}",
                        field.name, constructor.name
                    ),
                );
            }
        }
    }
    if seen.len() < constructor.fields.len() {
        ctx.errors
            .push(ErrorCategory::ArityMismatch, position, "too few fields");
    }
}

fn named_field_constructor(tree: &Tree, key: KeyIdent) -> Option<NamedFieldConstructor> {
    match tree.var_info(key).map(|info| &info.variable) {
        Some(Variable::Constructor(Constructor::NamedField(c))) => Some(c.clone()),
        _ => None,
    }
}

fn check_positional_arity(
    tree: &Tree,
    ctx: &mut ResolverContext,
    key: KeyIdent,
    arg_count: usize,
    position: Position,
) {
    match tree.var_info(key).map(|info| &info.variable) {
        Some(Variable::Constructor(Constructor::Variable(c))) => {
            if arg_count != 0 {
                ctx.errors.push(
                    ErrorCategory::ArityMismatch,
                    position,
                    format!("constructor {} does not take fields", c.name),
                );
            }
        }
        Some(Variable::Constructor(Constructor::UnnamedField(c))) => {
            if arg_count < c.fields.len() {
                ctx.errors
                    .push(ErrorCategory::ArityMismatch, position, "too few fields");
            } else if arg_count > c.fields.len() {
                ctx.errors
                    .push(ErrorCategory::ArityMismatch, position, "too many fields");
            }
        }
        Some(Variable::Constructor(Constructor::NamedField(_))) => {
            ctx.errors.push(
                ErrorCategory::KindMismatch,
                position,
                "wrong constructor kind",
            );
        }
        _ => {}
    }
}

/// Resolves a constructor name occurrence to its variable key, follows any
/// alias chain down to the real `ConstructorVariable`, and validates that
/// the target is in fact a constructor.
fn resolve_constructor_ref(
    tree: &mut Tree,
    ctx: &mut ResolverContext,
    ident: &mut IdentOccurrence,
) -> Option<KeyIdent> {
    resolve_ident(tree, ctx, ident, Namespace::Variable, false);
    let start_key = ident.resolved_key?;
    let final_key = follow_alias(tree, ctx, start_key, ident.position)?;
    match tree.var_info(final_key).map(|info| &info.variable) {
        Some(Variable::Constructor(_)) => {
            ident.resolved_key = Some(final_key);
            Some(final_key)
        }
        Some(_) => {
            ctx.errors
                .push(ErrorCategory::KindMismatch, ident.position, "not a constructor");
            None
        }
        None => None,
    }
}

/// Follows an `AliasVariable` chain to its non-alias target, detecting
/// cycles. A template alias with non-empty instance type parameters is
/// treated as opaque and the chain stops there.
fn follow_alias(
    tree: &Tree,
    ctx: &mut ResolverContext,
    start_key: KeyIdent,
    position: Position,
) -> Option<KeyIdent> {
    let mut key = start_key;
    let mut visited = FxHashSet::default();
    loop {
        if !visited.insert(key) {
            ctx.errors.push(
                ErrorCategory::AliasCycle,
                position,
                format!(
                    "alias variable {} refers to alias cycle",
                    tree.interner.display(key)
                ),
            );
            return None;
        }
        match tree.var_info(key).map(|info| &info.variable) {
            Some(Variable::Alias(alias)) => {
                if alias
                    .inst_type_params
                    .as_ref()
                    .is_some_and(|params| !params.is_empty())
                {
                    return Some(key);
                }
                key = alias.target.resolved_key?;
            }
            _ => return Some(key),
        }
    }
}

// ---- type expressions ----

fn resolve_type_expression(tree: &mut Tree, ctx: &mut ResolverContext, ty: &mut TypeExpression) {
    match ty {
        TypeExpression::TypeParam(param) => {
            if !ctx.template_flag {
                ctx.errors.push(
                    ErrorCategory::TemplateMisuse,
                    param.position,
                    "type parameter expression outside a template",
                );
                return;
            }
            match ctx.lookup_type_param(&param.name) {
                Some(index) => param.resolved_index = Some(index),
                None => {
                    ctx.errors.push(
                        ErrorCategory::TemplateMisuse,
                        param.position,
                        format!("undefined type parameter {}", param.name),
                    );
                }
            }
        }
        TypeExpression::Named(ident) => {
            resolve_ident(tree, ctx, ident, Namespace::TypeVariable, false);
        }
        TypeExpression::Application(ident, args) => {
            resolve_ident(tree, ctx, ident, Namespace::TypeFunction, false);
            for arg in args {
                resolve_type_expression(tree, ctx, arg);
            }
        }
        TypeExpression::Function(params, result) => {
            for param in params {
                resolve_type_expression(tree, ctx, param);
            }
            resolve_type_expression(tree, ctx, result);
        }
        TypeExpression::Tuple(members) => {
            for member in members {
                resolve_type_expression(tree, ctx, member);
            }
        }
        TypeExpression::Unique(inner) => resolve_type_expression(tree, ctx, inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesfl_common::{Position, SourceId};
    use lesfl_syntax::{AccessModifier, IdentPath, LiteralValue, UserDefinedVariable};

    fn pos() -> Position {
        Position::new(SourceId::new(0), 0, 0)
    }

    #[test]
    fn plain_variable_definition_resolves_without_errors() {
        let mut sources = vec![Source {
            name: "s".to_string(),
            defs: vec![Definition::Variable(VariableDefinition {
                name: "v".to_string(),
                access: AccessModifier::None,
                variable: Variable::UserDefined(UserDefinedVariable {
                    type_expr: None,
                    value: Some(Value::Literal(LiteralValue::Int(1), pos())),
                    inst_type_params: None,
                }),
                position: pos(),
            })],
        }];
        let (_tree, ctx) = resolve(&mut sources);
        assert!(!ctx.errors.had_errors());
    }

    #[test]
    fn undefined_alias_target_is_reported() {
        let mut sources = vec![Source {
            name: "s".to_string(),
            defs: vec![Definition::Variable(VariableDefinition {
                name: "a".to_string(),
                access: AccessModifier::None,
                variable: Variable::Alias(lesfl_syntax::AliasVariable {
                    type_expr: None,
                    target: IdentOccurrence::new(
                        IdentPath::Relative(vec!["missing".to_string()]),
                        pos(),
                    ),
                    inst_type_params: None,
                }),
                position: pos(),
            })],
        }];
        let (_tree, ctx) = resolve(&mut sources);
        assert!(ctx.errors.had_errors());
    }

    #[test]
    fn alias_cycle_is_detected() {
        let mut sources = vec![Source {
            name: "s".to_string(),
            defs: vec![
                Definition::Variable(VariableDefinition {
                    name: "a".to_string(),
                    access: AccessModifier::None,
                    variable: Variable::Alias(lesfl_syntax::AliasVariable {
                        type_expr: None,
                        target: IdentOccurrence::new(
                            IdentPath::Relative(vec!["b".to_string()]),
                            pos(),
                        ),
                        inst_type_params: None,
                    }),
                    position: pos(),
                }),
                Definition::Variable(VariableDefinition {
                    name: "b".to_string(),
                    access: AccessModifier::None,
                    variable: Variable::Alias(lesfl_syntax::AliasVariable {
                        type_expr: None,
                        target: IdentOccurrence::new(
                            IdentPath::Relative(vec!["a".to_string()]),
                            pos(),
                        ),
                        inst_type_params: None,
                    }),
                    position: pos(),
                }),
            ],
        }];
        let (_tree, ctx) = resolve(&mut sources);
        assert!(ctx
            .errors
            .errors()
            .iter()
            .any(|e| e.message.contains("alias cycle")));
    }
}
