//! Integration tests exercising the resolver end to end: declaration,
//! import resolution, module nesting (relative and absolute), visibility,
//! alias cycles, and closure-limit scoping.

mod support;

use lesfl_common::LocalIndex;
use lesfl_syntax::{AccessModifier, Constructor, Datatype, Expression, FunctionModifier, VariableConstructor};
use lesfl_resolver::resolve;
use support::*;

#[test]
fn relative_reference_resolves_within_the_same_module() {
    let mut sources = vec![source(vec![
        plain_var("x", AccessModifier::None, int_value(1)),
        plain_fn("uses_x", AccessModifier::None, vec![], ident_expr(&["x"])),
    ])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(!ctx.errors.had_errors(), "{:?}", ctx.errors.errors());
}

#[test]
fn undefined_identifier_is_reported() {
    let mut sources = vec![source(vec![plain_fn(
        "uses_missing",
        AccessModifier::None,
        vec![],
        ident_expr(&["nope"]),
    )])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(ctx
        .errors
        .errors()
        .iter()
        .any(|e| e.message.contains("undefined identifier")));
}

#[test]
fn absolute_module_path_reenters_from_the_root() {
    let mut sources = vec![source(vec![module(
        &["lib"],
        false,
        vec![module(
            &["somelib2", "module3"],
            true,
            vec![plain_var("x", AccessModifier::None, int_value(1))],
        )],
    )])];
    let (tree, ctx) = resolve(&mut sources);
    assert!(!ctx.errors.had_errors(), "{:?}", ctx.errors.errors());
    let nested_under_lib = tree.interner.lookup_key(&[
        "lib".to_string(),
        "somelib2".to_string(),
        "module3".to_string(),
        "x".to_string(),
    ]);
    assert!(nested_under_lib.is_none());
    let at_root = tree.interner.lookup_key(&[
        "somelib2".to_string(),
        "module3".to_string(),
        "x".to_string(),
    ]);
    assert!(at_root.is_some());
}

#[test]
fn private_variable_referenced_through_an_import_falls_through_to_undefined() {
    // A private match at an import step is silently treated as not-found
    // (only the final predef step may report "private"), so this falls
    // through the whole relative-resolution chain and reports undefined.
    let mut sources = vec![source(vec![
        module(
            &["m"],
            false,
            vec![plain_var("v", AccessModifier::Private, int_value(1))],
        ),
        module(
            &["caller"],
            false,
            vec![
                import_abs(&["m"]),
                plain_fn("uses_v", AccessModifier::None, vec![], ident_expr(&["v"])),
            ],
        ),
    ])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(ctx
        .errors
        .errors()
        .iter()
        .any(|e| e.message.contains("undefined identifier v")));
}

#[test]
fn public_variable_referenced_through_an_import_resolves() {
    let mut sources = vec![source(vec![
        module(
            &["m"],
            false,
            vec![plain_var("v", AccessModifier::None, int_value(1))],
        ),
        module(
            &["caller"],
            false,
            vec![
                import_abs(&["m"]),
                plain_fn("uses_v", AccessModifier::None, vec![], ident_expr(&["v"])),
            ],
        ),
    ])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(!ctx.errors.had_errors(), "{:?}", ctx.errors.errors());
}

#[test]
fn alias_cycle_is_reported_with_the_expected_message_shape() {
    let mut sources = vec![source(vec![
        alias_var("a", &["b"]),
        alias_var("b", &["a"]),
    ])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(ctx
        .errors
        .errors()
        .iter()
        .any(|e| e.message.contains("alias variable") && e.message.contains("alias cycle")));
}

#[test]
fn datatype_function_instance_flattens_its_own_constructors() {
    let mut sources = vec![source(vec![
        datatype_fun(
            "Template",
            AccessModifier::Private,
            Datatype::NonUnique(Vec::new()),
        ),
        datatype_fun_instance(
            &["Template"],
            Datatype::NonUnique(vec![Constructor::Variable(VariableConstructor {
                name: "InstCtor".to_string(),
            })]),
        ),
        plain_fn(
            "uses_ctor",
            AccessModifier::None,
            vec![],
            ident_expr(&["InstCtor"]),
        ),
    ])];
    let (mut tree, ctx) = resolve(&mut sources);
    assert!(!ctx.errors.had_errors(), "{:?}", ctx.errors.errors());
    let (ctor_key, _) = tree.interner.intern(&["InstCtor".to_string()]);
    let info = tree.var_info(ctor_key).expect("instance constructor declared");
    // The instance's constructor inherits its owning template's access
    // modifier, resolved lazily through the type-function namespace.
    assert!(info.access_modifier().is_private());
}

#[test]
fn primitive_lambda_cannot_see_locals_bound_before_its_closure_limit() {
    let body = Expression::Let(lesfl_syntax::Let {
        bindings: vec![(
            lesfl_syntax::Binding::Var("captured".to_string(), pos()),
            int_expr(1),
        )],
        body: Box::new(Expression::Lambda(lambda(
            FunctionModifier::Primitive,
            vec![],
            ident_expr(&["captured"]),
        ))),
        position: pos(),
    });
    let mut sources = vec![source(vec![plain_fn(
        "outer",
        AccessModifier::None,
        vec![],
        body,
    )])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(ctx
        .errors
        .errors()
        .iter()
        .any(|e| e.message.contains("undefined identifier captured")));
}

#[test]
fn normal_lambda_can_see_locals_bound_before_it() {
    let body = Expression::Let(lesfl_syntax::Let {
        bindings: vec![(
            lesfl_syntax::Binding::Var("captured".to_string(), pos()),
            int_expr(1),
        )],
        body: Box::new(Expression::Lambda(lambda(
            FunctionModifier::Normal,
            vec![],
            ident_expr(&["captured"]),
        ))),
        position: pos(),
    });
    let mut sources = vec![source(vec![plain_fn(
        "outer",
        AccessModifier::None,
        vec![],
        body,
    )])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(!ctx.errors.had_errors(), "{:?}", ctx.errors.errors());
}

#[test]
fn function_argument_resolves_to_a_local_index() {
    let mut sources = vec![source(vec![plain_fn(
        "identity",
        AccessModifier::None,
        vec![argument("x")],
        ident_expr(&["x"]),
    )])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(!ctx.errors.had_errors(), "{:?}", ctx.errors.errors());

    let lesfl_syntax::Definition::Function(def) = &sources[0].defs[0] else {
        panic!("expected a function definition");
    };
    let lesfl_syntax::Function::UserDefined(f) = &def.function else {
        panic!("expected a user-defined function");
    };
    let Expression::Ident(ident) = f.body.as_ref() else {
        panic!("expected an identifier expression body");
    };
    assert_eq!(ident.resolved_local, Some(LocalIndex::new(0)));
}

#[test]
fn multi_segment_relative_path_never_consults_local_variables() {
    // A length > 1 relative path is never resolved against local variables,
    // only against modules — even when the first segment shadows a local.
    let mut sources = vec![source(vec![
        module(
            &["x"],
            false,
            vec![plain_var("y", AccessModifier::None, int_value(2))],
        ),
        plain_fn(
            "shadowed",
            AccessModifier::None,
            vec![argument("x")],
            ident_expr(&["x", "y"]),
        ),
    ])];
    let (_tree, ctx) = resolve(&mut sources);
    assert!(!ctx.errors.had_errors(), "{:?}", ctx.errors.errors());
}
