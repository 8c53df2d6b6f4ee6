//! Runtime values.
//!
//! Scalars are stored inline. Objects and arrays are shared, mutable
//! containers: cloning a `Value::Array` clones the handle, not the elements,
//! so `let b = a` aliases. Callables hold their declaration behind `Rc` plus
//! the environment they close over.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use vesper_ir::{ClassDecl, FunctionDecl};

use crate::environment::Environment;
use crate::errors::EvalResult;

/// Object payload: string keys to values, insertion order irrelevant.
pub type ObjectMap = FxHashMap<String, Value>;

/// Signature of a host-provided function.
///
/// Receives the evaluated arguments and the caller's environment.
pub type NativeFn = dyn Fn(&[Value], &Environment) -> EvalResult;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(f64),
    /// Decoded contents, without quotes.
    String(String),
    Object(Rc<RefCell<ObjectMap>>),
    Array(Rc<RefCell<Vec<Value>>>),
    Function(Rc<FunctionValue>),
    NativeFunction(Rc<NativeFunction>),
    Class(Rc<ClassValue>),
    ClassInstance(Rc<InstanceValue>),
}

/// A script function and the environment it was defined in.
pub struct FunctionValue {
    pub decl: Rc<FunctionDecl>,
    /// Captured at definition time; free variables resolve through it.
    pub env: Environment,
}

impl FunctionValue {
    /// Name for frames and display; `<anonymous>` when the function has none.
    pub fn name(&self) -> &str {
        if self.decl.is_anonymous() {
            "<anonymous>"
        } else {
            &self.decl.name
        }
    }
}

/// A host callable exposed to scripts.
pub struct NativeFunction {
    pub name: String,
    pub func: Box<NativeFn>,
}

impl NativeFunction {
    /// Invoke with already-evaluated arguments.
    pub fn call(&self, args: &[Value], env: &Environment) -> EvalResult {
        (self.func)(args, env)
    }
}

/// A class declaration and its defining environment.
pub struct ClassValue {
    pub decl: Rc<ClassDecl>,
    pub env: Environment,
}

impl ClassValue {
    pub fn name(&self) -> &str {
        &self.decl.name
    }
}

/// An instance produced by calling a class.
pub struct InstanceValue {
    pub class: Rc<ClassValue>,
    /// Member names marked `pub`.
    pub publics: FxHashSet<String>,
    /// The class-body scope: fields, methods and anything the constructor
    /// assigned into it.
    pub data: Environment,
}

impl InstanceValue {
    pub fn is_public(&self, name: &str) -> bool {
        self.publics.contains(name)
    }
}

// Factory methods

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(map: ObjectMap) -> Self {
        Value::Object(Rc::new(RefCell::new(map)))
    }

    /// Build an object from `(key, value)` pairs; later keys win.
    pub fn object_from<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn function(decl: Rc<FunctionDecl>, env: Environment) -> Self {
        Value::Function(Rc::new(FunctionValue { decl, env }))
    }

    pub fn native<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value], &Environment) -> EvalResult + 'static,
    {
        Value::NativeFunction(Rc::new(NativeFunction {
            name: name.into(),
            func: Box::new(func),
        }))
    }

    pub fn class(decl: Rc<ClassDecl>, env: Environment) -> Self {
        Value::Class(Rc::new(ClassValue { decl, env }))
    }

    pub fn instance(class: Rc<ClassValue>, publics: FxHashSet<String>, data: Environment) -> Self {
        Value::ClassInstance(Rc::new(InstanceValue {
            class,
            publics,
            data,
        }))
    }
}

// Inspection

impl Value {
    /// Kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Object(_) => "Object",
            Value::Array(_) => "Array",
            Value::Function(_) => "Function",
            Value::NativeFunction(_) => "NativeFunction",
            Value::Class(_) => "Class",
            Value::ClassInstance(_) => "ClassInstance",
        }
    }

    /// Truthiness used by `if`, `while` and the logical operators.
    ///
    /// Strings are truthy when non-empty. Every composite or callable value
    /// is truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Object(_)
            | Value::Array(_)
            | Value::Function(_)
            | Value::NativeFunction(_)
            | Value::Class(_)
            | Value::ClassInstance(_) => true,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether two values are the same heap allocation.
    ///
    /// Scalars are never identical; use `==` for them.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::NativeFunction(a), Value::NativeFunction(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::ClassInstance(a), Value::ClassInstance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Address of the shared payload, for cycle detection.
    pub(crate) fn heap_addr(&self) -> Option<usize> {
        match self {
            Value::Object(rc) => Some(Rc::as_ptr(rc).cast::<()>() as usize),
            Value::Array(rc) => Some(Rc::as_ptr(rc).cast::<()>() as usize),
            _ => None,
        }
    }
}

/// Render a number the way scripts see it: integral values without a fraction.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Structural for scalars, objects and arrays; identity for callables and
/// instances.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => self.is_identical(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut seen = Vec::new();
        write_value(f, self, &mut seen)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// `seen` holds the composites currently being printed; a repeat prints as
/// `[...]` or `{...}`.
fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, seen: &mut Vec<usize>) -> fmt::Result {
    if let Some(addr) = value.heap_addr() {
        if seen.contains(&addr) {
            return match value {
                Value::Array(_) => f.write_str("[...]"),
                _ => f.write_str("{...}"),
            };
        }
        seen.push(addr);
    }
    let result = match value {
        Value::Nil => f.write_str("nil"),
        Value::Boolean(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, seen)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => {
            let map = map.borrow();
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            f.write_str("{")?;
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                write_value(f, &map[key], seen)?;
            }
            f.write_str("}")
        }
        Value::Function(func) => write!(f, "<fn {}>", func.name()),
        Value::NativeFunction(native) => write!(f, "<native fn {}>", native.name),
        Value::Class(class) => write!(f, "<class {}>", class.name()),
        Value::ClassInstance(inst) => write!(f, "<{} instance>", inst.class.name()),
    };
    if value.heap_addr().is_some() {
        seen.pop();
    }
    result
}
