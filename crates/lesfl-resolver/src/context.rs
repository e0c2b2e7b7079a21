//! The mutable traversal context threaded through the resolution pass: the
//! module path, the imported-module stack, the local-variable stack and
//! map, the closure-limit stack, and the type-parameter scope.
//!
//! This is exclusively owned by one traversal (see the single-threaded,
//! non-suspending resource model) and never escapes it.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use lesfl_common::{ErrorCategory, ErrorSink, KeyIdent, LocalIndex, Position, TypeParamIndex};
use lesfl_syntax::AccessModifier;

use crate::builtins::PREDEF_MODULE;
use crate::tree::Tree;

/// Which symbol-table namespace an identifier occurrence is being resolved
/// against. The four namespaces are disjoint: the same dotted path may
/// legally be a module in one and a variable in another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Namespace {
    Module,
    Variable,
    TypeVariable,
    TypeFunction,
}

/// The outcome of resolving an identifier occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Local(LocalIndex),
    Global(KeyIdent),
}

enum Attempt {
    Success(Resolution),
    Private(Vec<String>),
    NotFound,
}

fn namespace_noun(ns: Namespace) -> &'static str {
    match ns {
        Namespace::Module => "module",
        Namespace::Variable => "variable",
        Namespace::TypeVariable => "type",
        Namespace::TypeFunction => "type template",
    }
}

/// Looks up `key` in `ns`, finalizing a constructor's deferred access
/// modifier on first reference (see `tree::AccessState`). Returns `None` if
/// nothing is registered at `key` in this namespace, `Some(is_private)`
/// otherwise. Module lookups never report private (modules have no
/// visibility of their own).
fn lookup_namespace(tree: &mut Tree, ns: Namespace, key: KeyIdent) -> Option<bool> {
    match ns {
        Namespace::Module => tree.has_module(key).then_some(false),
        Namespace::Variable => {
            let pending = tree
                .var_info(key)?
                .pending_datatype_path()
                .map(<[String]>::to_vec);
            if let Some(datatype_path) = pending {
                let (datatype_key, _) = tree.interner.intern(&datatype_path);
                // The owning datatype may be a plain type-variable or a
                // type-function (a datatype-function or one of its
                // instances) — the two namespaces share the key-space, so
                // exactly one of these lookups can hit.
                let access = tree
                    .type_var_info(datatype_key)
                    .map(|info| info.access)
                    .or_else(|| tree.type_fun_info(datatype_key).map(|info| info.access))
                    .unwrap_or(AccessModifier::None);
                tree.var_info_mut(key)
                    .expect("key checked present above")
                    .finalize_access(access);
            }
            Some(tree.var_info(key)?.access_modifier().is_private())
        }
        Namespace::TypeVariable => Some(tree.type_var_info(key)?.access.is_private()),
        Namespace::TypeFunction => Some(tree.type_fun_info(key)?.access.is_private()),
    }
}

pub struct ResolverContext {
    pub current_module: Vec<String>,
    imported_module_stack: Vec<Vec<Vec<String>>>,
    local_var_stack: Vec<Vec<String>>,
    local_var_map: FxHashMap<String, SmallVec<[LocalIndex; 4]>>,
    pub local_var_count: u32,
    top_local_var_set: rustc_hash::FxHashSet<String>,
    closure_limit_stack: SmallVec<[u32; 8]>,
    type_param_indices: FxHashMap<String, TypeParamIndex>,
    pub type_param_count: u32,
    pub template_flag: bool,
    pub errors: ErrorSink,
}

impl ResolverContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_module: Vec::new(),
            imported_module_stack: vec![Vec::new()],
            local_var_stack: Vec::new(),
            local_var_map: FxHashMap::default(),
            local_var_count: 0,
            top_local_var_set: rustc_hash::FxHashSet::default(),
            closure_limit_stack: SmallVec::new(),
            type_param_indices: FxHashMap::default(),
            type_param_count: 0,
            template_flag: false,
            errors: ErrorSink::new(),
        }
    }

    // ---- module path ----

    pub fn enter_module(&mut self, segment: &str) {
        self.current_module.push(segment.to_string());
    }

    pub fn enter_module_path(&mut self, path: &[String]) {
        self.current_module.extend_from_slice(path);
    }

    pub fn exit_module_path(&mut self, count: usize) {
        let new_len = self.current_module.len() - count;
        self.current_module.truncate(new_len);
    }

    // ---- imports ----

    pub fn push_import_frame(&mut self) {
        self.imported_module_stack.push(Vec::new());
    }

    pub fn pop_import_frame(&mut self) {
        self.imported_module_stack.pop();
    }

    pub fn add_import(&mut self, path: Vec<String>) {
        self.imported_module_stack
            .last_mut()
            .expect("import frame always present")
            .push(path);
    }

    // ---- local variables ----

    /// Pushes a new local-variable frame (for a function body, lambda body,
    /// let-group, or match case). Returns nothing; pair with `pop_locals`.
    pub fn push_local_frame(&mut self) {
        self.local_var_stack.push(Vec::new());
    }

    /// Declares one local in the current frame and returns its index.
    /// Does not check for duplicates within the frame — use
    /// `declare_in_top_group` for binding groups that must reject repeats.
    pub fn push_local(&mut self, name: &str) -> LocalIndex {
        let index = LocalIndex::new(self.local_var_count);
        self.local_var_count += 1;
        self.local_var_stack
            .last_mut()
            .expect("local frame always present before pushing a local")
            .push(name.to_string());
        self.local_var_map
            .entry(name.to_string())
            .or_default()
            .push(index);
        index
    }

    /// Pops the current local-variable frame, in reverse declaration order.
    pub fn pop_local_frame(&mut self) {
        let frame = self
            .local_var_stack
            .pop()
            .expect("pop_local_frame without matching push_local_frame");
        for name in frame.iter().rev() {
            if let Some(indices) = self.local_var_map.get_mut(name) {
                indices.pop();
                if indices.is_empty() {
                    self.local_var_map.remove(name);
                }
            }
            self.local_var_count -= 1;
        }
    }

    /// Marks `name` as declared in the current binding group (a single
    /// `let` clause's bindings, one pattern, one argument list); returns
    /// `false` if `name` was already declared earlier in the same group.
    pub fn declare_in_top_group(&mut self, name: &str) -> bool {
        self.top_local_var_set.insert(name.to_string())
    }

    pub fn clear_top_group(&mut self) {
        self.top_local_var_set.clear();
    }

    fn lookup_local(&self, name: &str) -> Option<LocalIndex> {
        let index = *self.local_var_map.get(name)?.last()?;
        let limit = self.closure_limit_stack.last().copied().unwrap_or(0);
        if index.index() < limit {
            None
        } else {
            Some(index)
        }
    }

    // ---- closure limits ----

    pub fn push_closure_limit(&mut self) {
        self.closure_limit_stack.push(self.local_var_count);
    }

    pub fn pop_closure_limit(&mut self) {
        self.closure_limit_stack.pop();
    }

    /// Property (4): at the end of a full traversal every stack must be
    /// empty again. Internal-error messages are appended, not panics, per
    /// the "never unwind" error policy.
    pub fn check_stacks_empty(&mut self, position: Position) {
        if !self.closure_limit_stack.is_empty() {
            self.errors.push(
                ErrorCategory::Internal,
                position,
                "internal error: closure_limit_stack isn't empty",
            );
        }
        if !self.local_var_stack.is_empty() {
            self.errors.push(
                ErrorCategory::Internal,
                position,
                "internal error: local_var_stack isn't empty",
            );
        }
        if self.template_flag || !self.type_param_indices.is_empty() {
            self.errors.push(
                ErrorCategory::Internal,
                position,
                "internal error: type_param_indices isn't empty",
            );
        }
    }

    // ---- type parameters ----

    pub fn enter_template(&mut self, names: &[String]) {
        self.template_flag = true;
        self.type_param_indices.clear();
        self.type_param_count = 0;
        for name in names {
            let index = TypeParamIndex::new(self.type_param_count);
            self.type_param_count += 1;
            self.type_param_indices.insert(name.clone(), index);
        }
    }

    pub fn exit_template(&mut self) {
        self.template_flag = false;
        self.type_param_indices.clear();
        self.type_param_count = 0;
    }

    #[must_use]
    pub fn lookup_type_param(&self, name: &str) -> Option<TypeParamIndex> {
        self.type_param_indices.get(name).copied()
    }

    /// Allocates a fresh type-parameter index for `name`, used where a
    /// template signature is allowed to introduce parameters implicitly
    /// (unannotated template argument positions).
    pub fn allocate_type_param(&mut self, name: &str) -> TypeParamIndex {
        let index = TypeParamIndex::new(self.type_param_count);
        self.type_param_count += 1;
        self.type_param_indices.insert(name.to_string(), index);
        index
    }

    // ---- identifier resolution (4.5.1) ----

    fn try_base(
        &mut self,
        tree: &mut Tree,
        ns: Namespace,
        base: &[String],
        relative: &[String],
        is_own_module: bool,
    ) -> Attempt {
        let mut full = Vec::with_capacity(base.len() + relative.len());
        full.extend_from_slice(base);
        full.extend_from_slice(relative);
        let Some(key) = tree.interner.lookup_key(&full) else {
            return Attempt::NotFound;
        };
        match lookup_namespace(tree, ns, key) {
            None => Attempt::NotFound,
            Some(private) if private && !is_own_module => Attempt::Private(full),
            Some(_) => Attempt::Success(Resolution::Global(key)),
        }
    }

    /// Resolves a relative identifier (4.5.1): local variable (length-1
    /// only), current module, imports innermost-then-newest-first, then
    /// `predef`. Pushes an error and returns `None` on failure.
    pub fn resolve_relative(
        &mut self,
        tree: &mut Tree,
        ns: Namespace,
        segments: &[String],
        position: Position,
        allow_local: bool,
    ) -> Option<Resolution> {
        if allow_local && ns == Namespace::Variable && segments.len() == 1 {
            if let Some(index) = self.lookup_local(&segments[0]) {
                return Some(Resolution::Local(index));
            }
        }

        // A private match at the current-module step or an import step is
        // silently treated as not-found and the search continues — only the
        // final predef step can reject on visibility and stop the search.
        let current_module = self.current_module.clone();
        if let Attempt::Success(res) = self.try_base(tree, ns, &current_module, segments, true) {
            return Some(res);
        }

        let frames: Vec<Vec<Vec<String>>> = self.imported_module_stack.clone();
        for frame in frames.iter().rev() {
            for base in frame.iter().rev() {
                let is_own = *base == current_module;
                if let Attempt::Success(res) = self.try_base(tree, ns, base, segments, is_own) {
                    return Some(res);
                }
            }
        }

        match self.try_base(tree, ns, &[PREDEF_MODULE.to_string()], segments, false) {
            Attempt::Success(res) => return Some(res),
            Attempt::Private(path) => {
                self.report_private(ns, &path, position);
                return None;
            }
            Attempt::NotFound => {}
        }

        self.errors.push(
            ErrorCategory::Undefined,
            position,
            format!("undefined identifier {}", segments.join(".")),
        );
        None
    }

    /// Resolves an absolute identifier: looked up exactly as written, with
    /// visibility enforced relative to the current module.
    pub fn resolve_absolute(
        &mut self,
        tree: &mut Tree,
        ns: Namespace,
        segments: &[String],
        position: Position,
    ) -> Option<Resolution> {
        let owning_module = if segments.is_empty() {
            &[][..]
        } else if ns == Namespace::Module {
            segments
        } else {
            &segments[..segments.len() - 1]
        };
        let is_own = owning_module == self.current_module.as_slice();
        match self.try_base(tree, ns, &[], segments, is_own) {
            Attempt::Success(res) => Some(res),
            Attempt::Private(path) => {
                self.report_private(ns, &path, position);
                None
            }
            Attempt::NotFound => {
                self.errors.push(
                    ErrorCategory::Undefined,
                    position,
                    format!("undefined identifier .{}", segments.join(".")),
                );
                None
            }
        }
    }

    fn report_private(&mut self, ns: Namespace, path: &[String], position: Position) {
        self.errors.push(
            ErrorCategory::Private,
            position,
            format!("{} .{} is private", namespace_noun(ns), path.join(".")),
        );
    }
}

impl Default for ResolverContext {
    fn default() -> Self {
        Self::new()
    }
}
