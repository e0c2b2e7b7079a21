//! The builtin seeder (C4).
//!
//! Runs before any parser output is consulted; seeds the root module, the
//! `stdlib` module (with its primitive types and type templates), and an
//! empty `predef` module so the resolution pass's final fallback step always
//! has a defined home to search, even when nothing has been added to it.
//!
//! The exact name/tag table is taken from the builtin type adder this crate
//! generalizes: 8 primitive scalar types and 2 arity-1 array templates.

use lesfl_syntax::{
    AccessModifier, BuiltinTypeFunction, BuiltinTypeTag, BuiltinTypeTemplateTag, TypeFunction,
    TypeVariable,
};

use crate::tree::Tree;

const PRIMITIVE_TYPES: &[(&str, BuiltinTypeTag)] = &[
    ("Char", BuiltinTypeTag::Char),
    ("WChar", BuiltinTypeTag::WChar),
    ("Int8", BuiltinTypeTag::Int8),
    ("Int16", BuiltinTypeTag::Int16),
    ("Int32", BuiltinTypeTag::Int32),
    ("Int64", BuiltinTypeTag::Int64),
    ("Float", BuiltinTypeTag::Float),
    ("Double", BuiltinTypeTag::Double),
];

const TYPE_TEMPLATES: &[(&str, BuiltinTypeTemplateTag)] = &[
    ("Array", BuiltinTypeTemplateTag::Array),
    ("UniqueArray", BuiltinTypeTemplateTag::UniqueArray),
];

pub const STDLIB_MODULE: &str = "stdlib";
pub const PREDEF_MODULE: &str = "predef";

/// Seeds `tree` with the root module, `stdlib`, `predef`, and every builtin
/// primitive type and type template. Idempotent: calling this twice on a
/// fresh tree is harmless (the second call's `add_module`/`add_type_*`
/// calls simply report "already present" and are ignored), but it is
/// intended to run exactly once, before any declaration pass.
pub fn seed_builtins(tree: &mut Tree) {
    let (root_key, _) = tree.interner.intern(&[]);
    tree.add_module(root_key);

    let (stdlib_key, _) = tree.interner.intern(&[STDLIB_MODULE.to_string()]);
    tree.add_module(stdlib_key);

    let (predef_key, _) = tree.interner.intern(&[PREDEF_MODULE.to_string()]);
    tree.add_module(predef_key);

    for &(name, tag) in PRIMITIVE_TYPES {
        let (key, _) = tree
            .interner
            .intern(&[STDLIB_MODULE.to_string(), name.to_string()]);
        tree.add_type_var(key, AccessModifier::None, TypeVariable::Builtin(tag));
    }

    for &(name, tag) in TYPE_TEMPLATES {
        let (key, _) = tree
            .interner
            .intern(&[STDLIB_MODULE.to_string(), name.to_string()]);
        tree.add_type_fun(
            key,
            AccessModifier::None,
            TypeFunction::Builtin(BuiltinTypeFunction { arity: 1, tag }),
        );
    }
}
