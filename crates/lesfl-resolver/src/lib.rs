//! Name resolution for the lesfl frontend.
//!
//! [`resolve::resolve`] is the entry point: given a mutable slice of parsed
//! [`lesfl_syntax::Source`]s, it seeds the builtin symbol table, declares
//! every top-level definition, then resolves every identifier occurrence in
//! two sub-passes. Errors never abort the pass — see
//! [`lesfl_common::ErrorSink`] — so a single call reports everything wrong
//! with a compilation unit, not just the first problem.

pub mod annotations;
pub mod builtins;
pub mod context;
pub mod declare;
pub mod interner;
pub mod resolve;
pub mod tree;

pub use context::{Namespace, Resolution, ResolverContext};
pub use lesfl_common::{Error, ErrorSink, FrontendError};
pub use resolve::resolve;
pub use tree::{AccessState, Tree, TypeFunctionInfo, TypeVariableInfo, VariableInfo};
