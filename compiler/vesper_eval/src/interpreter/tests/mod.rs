//! Interpreter tests over parsed source.
//!
//! - `operators`: arithmetic, comparison, logical operators
//! - `scoping`: declarations, assignment, closures
//! - `control_flow`: if, while, break/continue, return, try/catch
//! - `members`: objects, arrays, aliasing and write-back
//! - `classes`: instantiation, privacy, constructors
//! - `destructuring`: object and array patterns
//! - `debugging`: debugger hooks, frames and backtraces

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod members;

use crate::errors::{EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) fn run(source: &str) -> EvalResult {
    let program =
        vesper_parse::parse(source).unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"));
    Interpreter::new().evaluate_program(&program)
}

pub(super) fn eval_ok(source: &str) -> Value {
    run(source).unwrap_or_else(|e| panic!("evaluation failed for {source:?}: {e}"))
}

pub(super) fn eval_err(source: &str) -> EvalError {
    match run(source) {
        Ok(value) => panic!("expected runtime error for {source:?}, got {value}"),
        Err(e) => e,
    }
}

pub(super) fn num(n: f64) -> Value {
    Value::Number(n)
}

pub(super) fn string(s: &str) -> Value {
    Value::string(s)
}
