//! Destructuring declarations.

use rustc_hash::FxHashSet;
use vesper_ir::{ArrayPattern, DestructurePattern, Expr, ObjectPattern, PatternTarget};

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{destructure_mismatch, EvalError};
use crate::value::{ObjectMap, Value};

impl Interpreter {
    /// Bind every name in `pattern` from `value` into `env`.
    pub(super) fn bind_pattern(
        &mut self,
        pattern: &DestructurePattern,
        value: Value,
        env: &Environment,
        constant: bool,
    ) -> Result<(), EvalError> {
        match pattern {
            DestructurePattern::Object(pattern) => self.bind_object(pattern, &value, env, constant),
            DestructurePattern::Array(pattern) => self.bind_array(pattern, &value, env, constant),
        }
    }

    /// Properties bind by key. A default applies when the key is missing or
    /// Nil. The rest collects every key not named by the pattern.
    fn bind_object(
        &mut self,
        pattern: &ObjectPattern,
        value: &Value,
        env: &Environment,
        constant: bool,
    ) -> Result<(), EvalError> {
        let Value::Object(map) = value else {
            return Err(destructure_mismatch("Object", value.type_name()));
        };
        let source: ObjectMap = map.borrow().clone();

        for property in &pattern.properties {
            let found = source.get(&property.key).cloned().unwrap_or(Value::Nil);
            let found = self.apply_default(found, property.default.as_ref(), env)?;
            self.bind_target(&property.target, found, env, constant)?;
        }

        if let Some(rest) = &pattern.rest {
            let named: FxHashSet<&str> = pattern
                .properties
                .iter()
                .map(|p| p.key.as_str())
                .collect();
            let remaining: ObjectMap = source
                .iter()
                .filter(|(key, _)| !named.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            env.declare(rest, Value::object(remaining), constant)?;
        }
        Ok(())
    }

    /// Elements bind by position; empty slots skip. A default applies past
    /// the end of the source. A String source destructures as its characters.
    fn bind_array(
        &mut self,
        pattern: &ArrayPattern,
        value: &Value,
        env: &Environment,
        constant: bool,
    ) -> Result<(), EvalError> {
        let items: Vec<Value> = match value {
            Value::Array(items) => items.borrow().clone(),
            Value::String(s) => s.chars().map(|c| Value::string(c.to_string())).collect(),
            other => return Err(destructure_mismatch("Array", other.type_name())),
        };

        for (index, element) in pattern.elements.iter().enumerate() {
            let Some(element) = element else { continue };
            let found = match items.get(index) {
                Some(item) => item.clone(),
                None => match &element.default {
                    Some(default) => self.eval_expr(default, env)?,
                    None => Value::Nil,
                },
            };
            self.bind_target(&element.target, found, env, constant)?;
        }

        if let Some(rest) = &pattern.rest {
            let remaining = items
                .get(pattern.elements.len()..)
                .map(<[Value]>::to_vec)
                .unwrap_or_default();
            env.declare(rest, Value::array(remaining), constant)?;
        }
        Ok(())
    }

    fn apply_default(
        &mut self,
        found: Value,
        default: Option<&Expr>,
        env: &Environment,
    ) -> Result<Value, EvalError> {
        match default {
            Some(default) if found.is_nil() => self.eval_expr(default, env),
            _ => Ok(found),
        }
    }

    fn bind_target(
        &mut self,
        target: &PatternTarget,
        value: Value,
        env: &Environment,
        constant: bool,
    ) -> Result<(), EvalError> {
        match target {
            PatternTarget::Identifier(name) => env.declare(name, value, constant).map(|_| ()),
            PatternTarget::Pattern(pattern) => self.bind_pattern(pattern, value, env, constant),
        }
    }
}
