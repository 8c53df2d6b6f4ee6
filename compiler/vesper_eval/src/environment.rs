//! Lexically chained variable scopes.
//!
//! An `Environment` is a cheap handle to one scope. Child scopes keep their
//! parent alive, and so do functions and classes that captured it, which is
//! what lets closures outlive the call that created them.

use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::errors::{constant_reassignment, redeclaration, unresolved_variable, EvalError};
use crate::value::{ClassValue, FunctionValue, InstanceValue, Value};

/// A single-threaded wrapper for reference-counted interior mutability.
///
/// All scope allocations go through `LocalScope::new()`. It is not
/// thread-safe: the evaluator runs on one thread.
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

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
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

/// A single scope containing variable bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    /// Names in `bindings` that reject reassignment.
    constants: FxHashSet<String>,
    parent: Option<Environment>,
    is_global: bool,
    /// Declarations land in the parent scope instead of this one.
    forwards_declarations: bool,
}

/// Handle to a scope and, through it, its ancestors.
#[derive(Clone)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// An empty root scope.
    pub fn new() -> Self {
        Environment(LocalScope::new(Scope {
            is_global: true,
            ..Scope::default()
        }))
    }

    /// A root scope with the constants `true`, `false` and `nil`.
    pub fn global() -> Self {
        let env = Self::new();
        {
            let mut scope = env.0.borrow_mut();
            for (name, value) in [
                ("true", Value::Boolean(true)),
                ("false", Value::Boolean(false)),
                ("nil", Value::Nil),
            ] {
                scope.bindings.insert(name.to_string(), value);
                scope.constants.insert(name.to_string());
            }
        }
        env
    }

    /// A new empty scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment(LocalScope::new(Scope {
            parent: Some(self.clone()),
            ..Scope::default()
        }))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    pub fn is_global(&self) -> bool {
        self.0.borrow().is_global
    }

    /// Send every later `declare` on this scope to its parent.
    ///
    /// Bindings already made here stay here. Constructors use this so that
    /// their parameters stay local while body declarations become instance
    /// data.
    pub fn forward_declarations(&self) {
        self.0.borrow_mut().forwards_declarations = true;
    }

    /// Whether both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Bind `name` in this scope, or in the parent once
    /// `forward_declarations` has been called.
    ///
    /// Ancestors are not consulted, so shadowing an outer binding is fine.
    /// The empty name is accepted and discarded.
    pub fn declare(&self, name: &str, value: Value, constant: bool) -> Result<Value, EvalError> {
        if name.is_empty() {
            return Ok(value);
        }
        let target = {
            let scope = self.0.borrow();
            scope.parent.clone().filter(|_| scope.forwards_declarations)
        };
        if let Some(parent) = target {
            return parent.declare(name, value, constant);
        }
        let mut scope = self.0.borrow_mut();
        if scope.bindings.contains_key(name) {
            return Err(redeclaration(name));
        }
        scope.bindings.insert(name.to_string(), value.clone());
        if constant {
            scope.constants.insert(name.to_string());
        }
        Ok(value)
    }

    /// The nearest scope, starting with this one, that declares `name`.
    pub fn resolve(&self, name: &str) -> Result<Environment, EvalError> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.0.borrow();
                if scope.bindings.contains_key(name) {
                    break;
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => current = parent,
                None => return Err(unresolved_variable(name)),
            }
        }
        Ok(current)
    }

    /// Read `name` through the scope chain.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        let owner = self.resolve(name)?;
        let value = owner.get_local(name);
        value.ok_or_else(|| unresolved_variable(name))
    }

    /// Read `name` from this scope only.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.0.borrow().bindings.get(name).cloned()
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.0.borrow().constants.contains(name)
    }

    /// Overwrite the nearest binding of `name`.
    ///
    /// When the slot already holds an object (or array) and the new value is
    /// also an object (or array), the slot's container takes over the new
    /// contents in place. Every alias of the old container sees the change.
    /// Assigning a container to itself does nothing.
    pub fn assign(&self, name: &str, value: Value) -> Result<Value, EvalError> {
        let owner = self.resolve(name)?;
        if owner.is_constant(name) {
            return Err(constant_reassignment(name));
        }
        let existing = owner.get_local(name);
        match (existing, &value) {
            (Some(Value::Array(slot)), Value::Array(new)) => {
                if !Rc::ptr_eq(&slot, new) {
                    let contents = new.borrow().clone();
                    *slot.borrow_mut() = contents;
                }
            }
            (Some(Value::Object(slot)), Value::Object(new)) => {
                if !Rc::ptr_eq(&slot, new) {
                    let contents = new.borrow().clone();
                    *slot.borrow_mut() = contents;
                }
            }
            _ => {
                owner
                    .0
                    .borrow_mut()
                    .bindings
                    .insert(name.to_string(), value.clone());
            }
        }
        Ok(value)
    }

    /// Store a mutated container back into the variable it was read from.
    ///
    /// Writing back the identical container is a no-op and never fails,
    /// even for constants.
    pub fn write_back(&self, name: &str, value: Value) -> Result<Value, EvalError> {
        let owner = self.resolve(name)?;
        if let Some(current) = owner.get_local(name) {
            if current.is_identical(&value) {
                return Ok(value);
            }
        }
        self.assign(name, value)
    }

    /// Bindings of this scope sorted by name, with their constant flag.
    pub fn local_bindings(&self) -> Vec<(String, Value, bool)> {
        let scope = self.0.borrow();
        let mut out: Vec<_> = scope
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone(), scope.constants.contains(name)))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Copy this scope chain so that nothing mutable is shared with the
    /// original.
    ///
    /// Objects and arrays are copied once each, keeping aliasing and cycles
    /// intact inside the copy. Functions, classes and instances are rebuilt
    /// over the copied scopes. Native functions are shared.
    #[must_use]
    pub fn deep_copy(&self) -> Environment {
        DeepCopier::default().env(self)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.bindings.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("is_global", &scope.is_global)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}

/// Memoized copy of scopes and containers, keyed by allocation address.
#[derive(Default)]
struct DeepCopier {
    envs: FxHashMap<usize, Environment>,
    values: FxHashMap<usize, Value>,
}

impl DeepCopier {
    fn env(&mut self, env: &Environment) -> Environment {
        if let Some(copy) = self.envs.get(&env.0.addr()) {
            return copy.clone();
        }
        let (parent, is_global, forwards_declarations, constants, bindings) = {
            let scope = env.0.borrow();
            let bindings: Vec<(String, Value)> = scope
                .bindings
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            (
                scope.parent.clone(),
                scope.is_global,
                scope.forwards_declarations,
                scope.constants.clone(),
                bindings,
            )
        };
        let parent = parent.map(|p| self.env(&p));
        let copy = Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            constants,
            parent,
            is_global,
            forwards_declarations,
        }));
        // Registered before the bindings so closures over this scope find it.
        self.envs.insert(env.0.addr(), copy.clone());
        for (name, value) in bindings {
            let value = self.value(&value);
            copy.0.borrow_mut().bindings.insert(name, value);
        }
        copy
    }

    fn value(&mut self, value: &Value) -> Value {
        if let Some(addr) = value.heap_addr() {
            if let Some(copy) = self.values.get(&addr) {
                return copy.clone();
            }
        }
        match value {
            Value::Array(items) => {
                let copy = Value::array(Vec::new());
                self.values.insert(value_addr(value), copy.clone());
                let originals = items.borrow().clone();
                let copied: Vec<Value> = originals.iter().map(|v| self.value(v)).collect();
                if let Value::Array(slot) = &copy {
                    *slot.borrow_mut() = copied;
                }
                copy
            }
            Value::Object(map) => {
                let copy = Value::object(FxHashMap::default());
                self.values.insert(value_addr(value), copy.clone());
                let originals: Vec<(String, Value)> = map
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                let copied: FxHashMap<String, Value> = originals
                    .into_iter()
                    .map(|(k, v)| {
                        let v = self.value(&v);
                        (k, v)
                    })
                    .collect();
                if let Value::Object(slot) = &copy {
                    *slot.borrow_mut() = copied;
                }
                copy
            }
            Value::Function(func) => Value::Function(Rc::new(FunctionValue {
                decl: Rc::clone(&func.decl),
                env: self.env(&func.env),
            })),
            Value::Class(class) => Value::Class(self.class(class)),
            Value::ClassInstance(inst) => Value::ClassInstance(Rc::new(InstanceValue {
                class: self.class(&inst.class),
                publics: inst.publics.clone(),
                data: self.env(&inst.data),
            })),
            Value::Nil
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::NativeFunction(_) => value.clone(),
        }
    }

    fn class(&mut self, class: &ClassValue) -> Rc<ClassValue> {
        Rc::new(ClassValue {
            decl: Rc::clone(&class.decl),
            env: self.env(&class.env),
        })
    }
}

fn value_addr(value: &Value) -> usize {
    value.heap_addr().unwrap_or_default()
}
