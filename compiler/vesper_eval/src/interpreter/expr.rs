//! Expression evaluation: operators, literals and assignment.

use vesper_ir::{BinaryOp, CompareOp, Expr, ExprKind, LogicalOp};
use vesper_stack::ensure_sufficient_stack;

use super::{spanned, Interpreter};
use crate::environment::Environment;
use crate::errors::{binary_type_mismatch, EvalError, EvalResult};
use crate::value::{ObjectMap, Value};

impl Interpreter {
    pub(super) fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        self.checkpoint(expr.node_kind(), expr.span);
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
            .map_err(|err| spanned(err, expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Assignment { target, value } => self.eval_assignment(target, value, env),
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                evaluate_binary(*op, &left, &right)
            }
            ExprKind::Compare { op, left, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                evaluate_compare(*op, &left, &right)
            }
            ExprKind::Logical { op, left, right } => {
                self.eval_logical(*op, left.as_deref(), right, env)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, expr.span, env),
            ExprKind::Member { object, property } => self.eval_member(object, property, env),
            ExprKind::Identifier(name) => env.lookup(name),
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::String(s) => Ok(Value::string(s.as_str())),
            ExprKind::Object(properties) => {
                let mut map = ObjectMap::default();
                for property in properties {
                    let value = self.eval_expr(&property.value, env)?;
                    map.insert(property.key.clone(), value);
                }
                Ok(Value::object(map))
            }
            ExprKind::Array(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.eval_expr(element, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            ExprKind::Function(decl) => Ok(Value::function(decl.clone(), env.clone())),
        }
    }

    fn eval_assignment(&mut self, target: &Expr, value: &Expr, env: &Environment) -> EvalResult {
        match &target.kind {
            ExprKind::Identifier(name) => {
                let value = self.eval_expr(value, env)?;
                env.assign(name, value)
            }
            ExprKind::Member { object, property } => {
                self.assign_member(object, property, value, env)
            }
            // The parser only produces identifier and member targets.
            _ => Err(EvalError::new(format!(
                "Invalid assignment target: {}",
                target.node_kind()
            ))),
        }
    }

    /// `&&` and `||` short-circuit. Every logical result except `??` is a
    /// Boolean.
    fn eval_logical(
        &mut self,
        op: LogicalOp,
        left: Option<&Expr>,
        right: &Expr,
        env: &Environment,
    ) -> EvalResult {
        let Some(left) = left else {
            return match op {
                LogicalOp::Not => Ok(Value::Boolean(!self.eval_expr(right, env)?.is_truthy())),
                _ => Err(EvalError::new(format!(
                    "Operator '{}' requires a left operand",
                    op.as_symbol()
                ))),
            };
        };
        let left = self.eval_expr(left, env)?;
        match op {
            LogicalOp::And => {
                if !left.is_truthy() {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(self.eval_expr(right, env)?.is_truthy()))
            }
            LogicalOp::Or => {
                if left.is_truthy() {
                    return Ok(Value::Boolean(true));
                }
                Ok(Value::Boolean(self.eval_expr(right, env)?.is_truthy()))
            }
            LogicalOp::NilCoalesce => {
                if left.is_nil() {
                    self.eval_expr(right, env)
                } else {
                    Ok(left)
                }
            }
            LogicalOp::Not => Err(EvalError::new("Operator '!' takes a single operand")),
        }
    }
}

/// Arithmetic on two Numbers, with host floating-point semantics.
///
/// Division and modulo by zero produce infinities or NaN.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(binary_type_mismatch(
            op.as_symbol(),
            left.type_name(),
            right.type_name(),
        ));
    };
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
    };
    Ok(Value::Number(result))
}

/// Comparison of two Numbers.
pub fn evaluate_compare(op: CompareOp, left: &Value, right: &Value) -> EvalResult {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(binary_type_mismatch(
            op.as_symbol(),
            left.type_name(),
            right.type_name(),
        ));
    };
    let result = match op {
        CompareOp::Eq => a == b,
        CompareOp::NotEq => a != b,
        CompareOp::Lt => a < b,
        CompareOp::LtEq => a <= b,
        CompareOp::Gt => a > b,
        CompareOp::GtEq => a >= b,
    };
    Ok(Value::Boolean(result))
}
