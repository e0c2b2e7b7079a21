//! The definition tree (C2): the interner plus the four symbol-table
//! namespaces (modules, variables, type-variables, type-functions) and the
//! ordered worklists published to later compiler phases.

use rustc_hash::{FxHashMap, FxHashSet};

use lesfl_common::KeyIdent;
use lesfl_syntax::{AccessModifier, TypeFunction, TypeVariable, Variable};

/// A constructor's access modifier may not be knowable until its owning
/// datatype (reached only by name, via a datatype-function instance) has
/// itself been declared. `Pending` defers the lookup to first reference,
/// see `VariableInfo::access_modifier`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessState {
    Final(AccessModifier),
    Pending(Vec<String>),
}

#[derive(Clone, Debug)]
pub struct VariableInfo {
    access: AccessState,
    pub variable: Variable,
    pub instances: Vec<Variable>,
}

impl VariableInfo {
    #[must_use]
    pub fn new(access: AccessState, variable: Variable) -> Self {
        Self {
            access,
            variable,
            instances: Vec::new(),
        }
    }

    #[must_use]
    pub fn must_update_access(&self) -> bool {
        matches!(self.access, AccessState::Pending(_))
    }

    /// The pending datatype path, if the access modifier has not yet been
    /// finalized. Returns `None` once `finalize_access` has run.
    #[must_use]
    pub fn pending_datatype_path(&self) -> Option<&[String]> {
        match &self.access {
            AccessState::Pending(path) => Some(path),
            AccessState::Final(_) => None,
        }
    }

    pub fn finalize_access(&mut self, access: AccessModifier) {
        self.access = AccessState::Final(access);
    }

    /// The resolved access modifier. Panics if called before
    /// `finalize_access` on a still-pending entry — callers must resolve
    /// the pending datatype reference first (see `resolve::resolve_var_access`).
    #[must_use]
    pub fn access_modifier(&self) -> AccessModifier {
        match &self.access {
            AccessState::Final(access) => *access,
            AccessState::Pending(_) => {
                unreachable!("access modifier read before pending datatype was resolved")
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct TypeVariableInfo {
    pub access: AccessModifier,
    pub type_variable: TypeVariable,
}

#[derive(Clone, Debug)]
pub struct TypeFunctionInfo {
    pub access: AccessModifier,
    pub type_function: TypeFunction,
    pub instances: Vec<TypeFunction>,
}

#[derive(Debug, Default)]
pub struct Tree {
    pub interner: crate::interner::Interner,
    modules: FxHashSet<KeyIdent>,
    var_infos: FxHashMap<KeyIdent, VariableInfo>,
    type_var_infos: FxHashMap<KeyIdent, TypeVariableInfo>,
    type_fun_infos: FxHashMap<KeyIdent, TypeFunctionInfo>,
    uncompiled_var_keys: Vec<KeyIdent>,
    uncompiled_type_var_keys: Vec<KeyIdent>,
    uncompiled_type_fun_keys: Vec<KeyIdent>,
}

impl Tree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` as a module. Returns `true` the first time a given
    /// key is added, `false` if it was already a module (not an error: the
    /// same module path may be reopened any number of times).
    pub fn add_module(&mut self, key: KeyIdent) -> bool {
        self.modules.insert(key)
    }

    #[must_use]
    pub fn has_module(&self, key: KeyIdent) -> bool {
        self.modules.contains(&key)
    }

    /// Registers a variable at `key`. Returns `false` if a variable already
    /// exists at that key (the caller must report a redefinition error and
    /// must not overwrite the existing entry).
    pub fn add_var(&mut self, key: KeyIdent, access: AccessState, variable: Variable) -> bool {
        if self.var_infos.contains_key(&key) {
            return false;
        }
        self.var_infos.insert(key, VariableInfo::new(access, variable));
        self.uncompiled_var_keys.push(key);
        true
    }

    pub fn add_type_var(
        &mut self,
        key: KeyIdent,
        access: AccessModifier,
        type_variable: TypeVariable,
    ) -> bool {
        if self.type_var_infos.contains_key(&key) {
            return false;
        }
        self.type_var_infos
            .insert(key, TypeVariableInfo { access, type_variable });
        self.uncompiled_type_var_keys.push(key);
        true
    }

    pub fn add_type_fun(
        &mut self,
        key: KeyIdent,
        access: AccessModifier,
        type_function: TypeFunction,
    ) -> bool {
        if self.type_fun_infos.contains_key(&key) {
            return false;
        }
        self.type_fun_infos.insert(
            key,
            TypeFunctionInfo {
                access,
                type_function,
                instances: Vec::new(),
            },
        );
        self.uncompiled_type_fun_keys.push(key);
        true
    }

    #[must_use]
    pub fn var_info(&self, key: KeyIdent) -> Option<&VariableInfo> {
        self.var_infos.get(&key)
    }

    pub fn var_info_mut(&mut self, key: KeyIdent) -> Option<&mut VariableInfo> {
        self.var_infos.get_mut(&key)
    }

    #[must_use]
    pub fn type_var_info(&self, key: KeyIdent) -> Option<&TypeVariableInfo> {
        self.type_var_infos.get(&key)
    }

    pub fn type_var_info_mut(&mut self, key: KeyIdent) -> Option<&mut TypeVariableInfo> {
        self.type_var_infos.get_mut(&key)
    }

    #[must_use]
    pub fn type_fun_info(&self, key: KeyIdent) -> Option<&TypeFunctionInfo> {
        self.type_fun_infos.get(&key)
    }

    pub fn type_fun_info_mut(&mut self, key: KeyIdent) -> Option<&mut TypeFunctionInfo> {
        self.type_fun_infos.get_mut(&key)
    }

    #[must_use]
    pub fn uncompiled_var_keys(&self) -> &[KeyIdent] {
        &self.uncompiled_var_keys
    }

    #[must_use]
    pub fn uncompiled_type_var_keys(&self) -> &[KeyIdent] {
        &self.uncompiled_type_var_keys
    }

    #[must_use]
    pub fn uncompiled_type_fun_keys(&self) -> &[KeyIdent] {
        &self.uncompiled_type_fun_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_module_reports_first_insertion_only() {
        let mut tree = Tree::new();
        let (key, _) = tree.interner.intern(&["a".to_string()]);
        assert!(tree.add_module(key));
        assert!(!tree.add_module(key));
        assert!(tree.has_module(key));
    }

    #[test]
    fn add_var_rejects_collisions() {
        let mut tree = Tree::new();
        let (key, _) = tree.interner.intern(&["v".to_string()]);
        assert!(tree.add_var(key, AccessState::Final(AccessModifier::None), Variable::Library));
        assert!(!tree.add_var(key, AccessState::Final(AccessModifier::None), Variable::Library));
        assert_eq!(tree.uncompiled_var_keys(), &[key]);
    }
}
