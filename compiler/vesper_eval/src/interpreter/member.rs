//! Member reads and writes on objects, arrays and class instances.

use vesper_ir::{Expr, ExprKind, MemberProperty};

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{
    index_too_large, invalid_index, invalid_key, invalid_member_access, negative_index,
    private_member, EvalError, EvalResult,
};
use crate::value::{format_number, Value};

/// Largest length an indexed write may grow an array to.
pub(crate) const MAX_ARRAY_LEN: usize = 1 << 24;

impl Interpreter {
    /// `object.name` / `object[key]`.
    ///
    /// Missing object keys, out-of-range indices and non-public instance
    /// members all read as Nil.
    pub(super) fn eval_member(
        &mut self,
        object: &Expr,
        property: &MemberProperty,
        env: &Environment,
    ) -> EvalResult {
        let receiver = self.eval_expr(object, env)?;
        match &receiver {
            Value::Object(map) => {
                let key = self.property_key(property, env)?;
                let value = map.borrow().get(&key).cloned();
                Ok(value.unwrap_or(Value::Nil))
            }
            Value::Array(items) => {
                let index = self.array_index(property, env)?;
                let items = items.borrow();
                if index.is_nan() || index < 0.0 || index >= items.len() as f64 {
                    return Ok(Value::Nil);
                }
                Ok(items[index as usize].clone())
            }
            Value::ClassInstance(inst) => {
                let key = self.property_key(property, env)?;
                if !inst.is_public(&key) {
                    return Ok(Value::Nil);
                }
                Ok(inst.data.get_local(&key).unwrap_or(Value::Nil))
            }
            other => Err(invalid_member_access(
                other.type_name(),
                &property_label(property),
            )),
        }
    }

    /// `object.name = value` / `object[key] = value`.
    ///
    /// Arrays grow to fit the index, padding with Nil. After an indexed
    /// write through a variable, the array is written back to it.
    pub(super) fn assign_member(
        &mut self,
        object: &Expr,
        property: &MemberProperty,
        value: &Expr,
        env: &Environment,
    ) -> EvalResult {
        let value = self.eval_expr(value, env)?;
        let receiver = self.eval_expr(object, env)?;
        match &receiver {
            Value::Object(map) => {
                let key = self.property_key(property, env)?;
                map.borrow_mut().insert(key, value.clone());
            }
            Value::Array(items) => {
                let index = self.array_index(property, env)?;
                if index.is_nan() {
                    return Err(invalid_index("NaN"));
                }
                if index < 0.0 {
                    return Err(negative_index(index as i64));
                }
                if index >= MAX_ARRAY_LEN as f64 {
                    return Err(index_too_large(MAX_ARRAY_LEN));
                }
                let index = index as usize;
                {
                    let mut items = items.borrow_mut();
                    if index >= items.len() {
                        items.resize(index + 1, Value::Nil);
                    }
                    items[index] = value.clone();
                }
                if let ExprKind::Identifier(name) = &object.kind {
                    env.write_back(name, receiver.clone())?;
                }
            }
            Value::ClassInstance(inst) => {
                let key = self.property_key(property, env)?;
                if !inst.is_public(&key) {
                    return Err(private_member(&key));
                }
                inst.data.assign(&key, value.clone())?;
            }
            other => {
                return Err(invalid_member_access(
                    other.type_name(),
                    &property_label(property),
                ));
            }
        }
        Ok(value)
    }

    /// Key for object and instance access. Numbers are stringified.
    fn property_key(
        &mut self,
        property: &MemberProperty,
        env: &Environment,
    ) -> Result<String, EvalError> {
        match property {
            MemberProperty::Named(name) => Ok(name.clone()),
            MemberProperty::Computed(expr) => match self.eval_expr(expr, env)? {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(format_number(n)),
                other => Err(invalid_key(other.type_name())),
            },
        }
    }

    /// Index for array access, truncated toward zero.
    fn array_index(
        &mut self,
        property: &MemberProperty,
        env: &Environment,
    ) -> Result<f64, EvalError> {
        match property {
            MemberProperty::Named(name) => Err(invalid_member_access("Array", name)),
            MemberProperty::Computed(expr) => match self.eval_expr(expr, env)? {
                Value::Number(n) => Ok(n.trunc()),
                other => Err(invalid_index(other.type_name())),
            },
        }
    }
}

fn property_label(property: &MemberProperty) -> String {
    match property {
        MemberProperty::Named(name) => name.clone(),
        MemberProperty::Computed(_) => "[]".to_string(),
    }
}
