//! Shared helpers for phase tests.

use vesper::{Error, EvalError, Value};

/// Run `source` and return its value, panicking with the error otherwise.
pub fn run(source: &str) -> Value {
    vesper::run_source(source).unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
}

/// Run `source`, expecting any failure.
pub fn run_err(source: &str) -> Error {
    match vesper::run_source(source) {
        Ok(value) => panic!("expected {source:?} to fail, got {value}"),
        Err(err) => err,
    }
}

/// Run `source`, expecting a runtime error.
pub fn runtime_err(source: &str) -> EvalError {
    match run_err(source) {
        Error::Eval(err) => err,
        other => panic!("expected a runtime error from {source:?}, got {other}"),
    }
}

pub fn num(n: f64) -> Value {
    Value::Number(n)
}
