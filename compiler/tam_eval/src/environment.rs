//! Lexical environments.
//!
//! Frames are reference counted and linked to their parent, so a closure
//! keeps the frame it was created in alive after the creating call has
//! returned. Two operations mutate bindings and must not be confused:
//!
//! - `define` binds in the current frame (`let`, parameters, `func name`)
//! - `assign` updates the nearest frame that already binds the name
//!   (`x = ...`, `x += ...`, `x++`)

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tam_ir::Name;

use crate::object::Object;

/// Error returned by `Scope::assign` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// No frame in the chain binds the name.
    Undefined,
}

/// Single-threaded shared cell for scope frames.
///
/// Wraps `Rc<RefCell<T>>` so frames are only created through
/// `LocalScope::new`.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &LocalScope<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One frame of bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Object>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this frame, replacing any previous binding here.
    #[inline]
    pub fn define(&mut self, name: Name, value: Object) {
        self.bindings.insert(name, value);
    }

    /// Look `name` up in this frame, then outward.
    pub fn lookup(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &str, value: Object) -> Result<(), AssignError> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(AssignError::Undefined)
    }
}

/// Recognized options for a fresh root environment.
#[derive(Clone, Debug, Default)]
pub struct EnvOptions {
    /// Host-provided globals, bound in the root frame.
    pub globals: Vec<(Name, Object)>,
}

impl EnvOptions {
    #[must_use]
    pub fn global(mut self, name: &str, value: impl Into<Object>) -> Self {
        self.globals.push((Name::new(name), value.into()));
        self
    }
}

/// Handle to a frame and, through it, its whole parent chain.
///
/// Cloning is cheap and yields a handle to the same frame.
#[derive(Clone)]
pub struct Environment {
    frame: LocalScope<Scope>,
}

impl Environment {
    /// Root environment with `options.globals` predefined.
    pub fn new(options: EnvOptions) -> Self {
        let mut scope = Scope::new();
        for (name, value) in options.globals {
            scope.define(name, value);
        }
        Environment {
            frame: LocalScope::new(scope),
        }
    }

    /// New empty frame whose parent is this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment {
            frame: LocalScope::new(Scope::with_parent(self.frame.clone())),
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Object> {
        self.frame.borrow().lookup(name)
    }

    /// Bind in this frame (define-or-overwrite).
    #[inline]
    pub fn define(&self, name: Name, value: Object) {
        self.frame.borrow_mut().define(name, value);
    }

    /// Update the nearest frame that binds `name`.
    #[inline]
    pub fn assign(&self, name: &str, value: Object) -> Result<(), AssignError> {
        self.frame.borrow_mut().assign(name, value)
    }

    /// `true` if `name` is bound in this frame itself.
    pub fn has_own(&self, name: &str) -> bool {
        self.frame.borrow().bindings.contains_key(name)
    }

    /// Names bound in this frame, sorted.
    pub fn own_names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.frame.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// `true` when both handles refer to the same frame.
    pub fn same_frame(&self, other: &Environment) -> bool {
        self.frame.ptr_eq(&other.frame)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(EnvOptions::default())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.own_names())
            .finish_non_exhaustive()
    }
}
