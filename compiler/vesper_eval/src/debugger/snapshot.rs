//! Frozen, thread-safe copies of interpreter state.

use std::collections::{BTreeMap, BTreeSet};

use crate::diagnostics::StackFrame;
use crate::environment::Environment;
use crate::value::Value;

/// Owned mirror of a `Value`.
///
/// Callables are kept by name only.
#[derive(Clone, Debug, PartialEq)]
pub enum SnapshotValue {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<SnapshotValue>),
    Object(BTreeMap<String, SnapshotValue>),
    Function(String),
    NativeFunction(String),
    Class(String),
    Instance {
        class: String,
        fields: BTreeMap<String, SnapshotValue>,
    },
    /// A container that is already being captured further up; cuts cycles.
    Cycle,
}

/// One scope of the environment chain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeSnapshot {
    pub bindings: BTreeMap<String, SnapshotValue>,
    pub constants: BTreeSet<String>,
    pub parent: Option<Box<ScopeSnapshot>>,
}

impl ScopeSnapshot {
    /// Copy `env` and all of its ancestors.
    pub fn capture(env: &Environment) -> Self {
        let mut capturer = Capturer::default();
        capturer.scope(env)
    }

    /// Find `name` in this scope or the nearest ancestor that has it.
    pub fn get(&self, name: &str) -> Option<&SnapshotValue> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(value) = current.bindings.get(name) {
                return Some(value);
            }
            scope = current.parent.as_deref();
        }
        None
    }

    /// Number of scopes in the chain, this one included.
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }
}

/// Debugger state recorded when a call fails.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Call stack at the time of the snapshot, most recent call first.
    pub frames: Vec<StackFrame>,
    /// Scope chain of the failing call.
    pub scope: ScopeSnapshot,
}

#[derive(Default)]
struct Capturer {
    /// Containers on the current capture path.
    in_progress: Vec<usize>,
}

impl Capturer {
    fn scope(&mut self, env: &Environment) -> ScopeSnapshot {
        let mut snapshot = ScopeSnapshot::default();
        for (name, value, constant) in env.local_bindings() {
            if constant {
                snapshot.constants.insert(name.clone());
            }
            let value = self.value(&value);
            snapshot.bindings.insert(name, value);
        }
        snapshot.parent = env.parent().map(|p| Box::new(self.scope(&p)));
        snapshot
    }

    fn value(&mut self, value: &Value) -> SnapshotValue {
        match value {
            Value::Nil => SnapshotValue::Nil,
            Value::Boolean(b) => SnapshotValue::Boolean(*b),
            Value::Number(n) => SnapshotValue::Number(*n),
            Value::String(s) => SnapshotValue::String(s.clone()),
            Value::Function(func) => SnapshotValue::Function(func.name().to_string()),
            Value::NativeFunction(native) => SnapshotValue::NativeFunction(native.name.clone()),
            Value::Class(class) => SnapshotValue::Class(class.name().to_string()),
            Value::Array(items) => {
                let addr = std::rc::Rc::as_ptr(items).cast::<()>() as usize;
                self.nested(addr, |this| {
                    let items = items.borrow().clone();
                    SnapshotValue::Array(items.iter().map(|v| this.value(v)).collect())
                })
            }
            Value::Object(map) => {
                let addr = std::rc::Rc::as_ptr(map).cast::<()>() as usize;
                self.nested(addr, |this| {
                    let entries: Vec<(String, Value)> = map
                        .borrow()
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect();
                    SnapshotValue::Object(
                        entries
                            .into_iter()
                            .map(|(k, v)| {
                                let v = this.value(&v);
                                (k, v)
                            })
                            .collect(),
                    )
                })
            }
            Value::ClassInstance(inst) => {
                let addr = std::rc::Rc::as_ptr(inst).cast::<()>() as usize;
                self.nested(addr, |this| {
                    let fields = inst
                        .data
                        .local_bindings()
                        .into_iter()
                        .map(|(name, value, _)| {
                            let value = this.value(&value);
                            (name, value)
                        })
                        .collect();
                    SnapshotValue::Instance {
                        class: inst.class.name().to_string(),
                        fields,
                    }
                })
            }
        }
    }

    fn nested(&mut self, addr: usize, f: impl FnOnce(&mut Self) -> SnapshotValue) -> SnapshotValue {
        if self.in_progress.contains(&addr) {
            return SnapshotValue::Cycle;
        }
        self.in_progress.push(addr);
        let value = f(self);
        self.in_progress.pop();
        value
    }
}
