//! Scoped variable and mixin bindings.
//!
//! Uses a scope stack (not cloning) for scope management. Each scope links
//! to its parent for lookup; a parent never references its children.
//!
//! Mixins remember the scope they were declared in and expand inside a
//! child of that scope, so a mixin body sees the bindings visible where it
//! was written, not where it is included.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use qss_ir::Mixin;

use crate::Value;

/// Single-threaded shared scope handle (`Rc<RefCell<T>>`).
///
/// All scope allocations go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Non-owning handle to the same scope.
    #[inline]
    pub fn downgrade(&self) -> WeakScope<T> {
        WeakScope(Rc::downgrade(&self.0))
    }

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Weak counterpart of [`LocalScope`].
///
/// A mixin is stored inside the scope that declared it, so holding that
/// scope strongly would form a reference cycle.
pub struct WeakScope<T>(Weak<RefCell<T>>);

impl<T> WeakScope<T> {
    #[inline]
    pub fn upgrade(&self) -> Option<LocalScope<T>> {
        self.0.upgrade().map(LocalScope)
    }
}

impl<T> Clone for WeakScope<T> {
    fn clone(&self) -> Self {
        WeakScope(Weak::clone(&self.0))
    }
}

impl<T> fmt::Debug for WeakScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakScope")
    }
}

/// A mixin together with the scope it was declared in.
#[derive(Clone, Debug)]
pub struct MixinBinding {
    pub mixin: Rc<Mixin>,
    scope: WeakScope<Scope>,
}

impl MixinBinding {
    /// The declaring scope. Alive for as long as the binding is reachable
    /// through a lookup, since lookups start from that scope or below it.
    pub fn scope(&self) -> Option<LocalScope<Scope>> {
        self.scope.upgrade()
    }
}

/// A single scope containing variable and mixin bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    variables: FxHashMap<String, Value>,
    mixins: FxHashMap<String, MixinBinding>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Look `name` up here, then in each enclosing scope.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.variables.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Binding in this scope only.
    #[inline]
    pub fn get_local(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn lookup_mixin(&self, name: &str) -> Option<MixinBinding> {
        if let Some(binding) = self.mixins.get(name) {
            return Some(binding.clone());
        }
        self.parent.as_ref()?.borrow().lookup_mixin(name)
    }
}

/// Evaluation environment: a stack of scopes above a shared global scope.
pub struct Environment {
    /// Stack of scopes, current scope last. Never empty.
    scopes: Vec<LocalScope<Scope>>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// A fresh environment sharing this one's global scope.
    ///
    /// Top-level bindings made through the child land in the shared global
    /// scope and stay visible here.
    #[must_use]
    pub fn child(&self) -> Self {
        let global = self.global.clone();
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a scope nested in the current one.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Push a scope whose parent is `parent` instead of the current scope.
    #[inline]
    pub fn push_scope_in(&mut self, parent: LocalScope<Scope>) {
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global).clone()
    }

    /// The global scope, kept alive after evaluation for inspection.
    pub fn global(&self) -> LocalScope<Scope> {
        self.global.clone()
    }

    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .define(name, value);
    }

    pub fn define_global(&mut self, name: impl Into<String>, value: Value) {
        self.global.borrow_mut().define(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow()
            .lookup(name)
    }

    pub fn lookup_global(&self, name: &str) -> Option<Value> {
        self.global.borrow().get_local(name).cloned()
    }

    /// Register `mixin` in the current scope.
    pub fn define_mixin(&mut self, mixin: Rc<Mixin>) {
        let scope = self.current_scope();
        let binding = MixinBinding {
            mixin: Rc::clone(&mixin),
            scope: scope.downgrade(),
        };
        scope.borrow_mut().mixins.insert(mixin.name.clone(), binding);
    }

    pub fn lookup_mixin(&self, name: &str) -> Option<MixinBinding> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow()
            .lookup_mixin(name)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
