//! Stack growth for the recursive phases.
//!
//! The parser descends once per nesting level of an expression and the
//! evaluator once per nested node and script call. Deeply nested input or a
//! deeply recursive script would otherwise overflow the native stack long
//! before the interpreter's own call-depth limit is reached.
//!
//! Native targets grow the stack with `stacker`. On `wasm32` the closure runs
//! directly.
//!
//! ```text
//! fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
//!     ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
//! }
//! ```

/// Grow when fewer than this many bytes of stack remain.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; run `f` in place.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
