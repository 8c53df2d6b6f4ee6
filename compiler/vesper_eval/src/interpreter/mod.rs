//! Tree-walking interpreter for Vesper.
//!
//! # Architecture
//!
//! Evaluation is a recursive walk over the boxed AST. Every entry point takes
//! the `Environment` to evaluate in as an explicit argument; the interpreter
//! itself only holds configuration and bookkeeping that outlives a single
//! node:
//!
//! - `stmt.rs` - statement sequences, declarations, `if`/`while`/`try`
//! - `expr.rs` - operators, literals, assignment
//! - `member.rs` - member reads and writes on objects, arrays and instances
//! - `call.rs` - function, native and class calls
//! - `class.rs` - class instantiation
//! - `destructure.rs` - object and array patterns
//!
//! # Control flow
//!
//! `return`, `break` and `continue` are `EvalError`s tagged with a
//! `ControlFlow`. They propagate through `?` like any error. `call.rs` turns
//! `Return` back into a value, `while` consumes `Break`/`Continue`, and
//! `try`/`catch` ignores every tagged error.
//!
//! # Debugger
//!
//! With a `DebugHook` attached, `checkpoint` runs before every node. Without
//! one it is a single `None` check.

mod builder;
mod call;
mod class;
mod destructure;
mod expr;
mod member;
mod stmt;

pub use builder::InterpreterBuilder;
pub use expr::{evaluate_binary, evaluate_compare};

use std::sync::Arc;

use tracing::debug;
use vesper_ir::{NodeKind, Program, Span};

use crate::debugger::DebugHook;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::{loop_control_outside_loop, ControlFlow, EvalError, EvalResult};
use crate::value::Value;

/// Default limit on nested calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// The tree-walking interpreter.
pub struct Interpreter {
    /// Global scope programs run in.
    env: Environment,
    /// File name reported in frames and to the debugger.
    file: Arc<str>,
    call_stack: CallStack,
    /// Number of enclosing `while` bodies in the current call.
    loop_depth: usize,
    debugger: Option<Arc<dyn DebugHook>>,
}

impl Interpreter {
    /// Interpreter over a fresh global environment with default settings.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The global environment.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Current call depth.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    pub fn max_call_depth(&self) -> Option<usize> {
        self.call_stack.max_depth()
    }

    /// Define a host function in the global environment.
    pub fn define_native<F>(&self, name: &str, func: F) -> Result<Value, EvalError>
    where
        F: Fn(&[Value], &Environment) -> EvalResult + 'static,
    {
        self.env.declare(name, Value::native(name, func), true)
    }

    /// Evaluate a whole program in the global environment.
    ///
    /// The result is the value of the last statement, or the value of a
    /// top-level `return`.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.file))]
    pub fn evaluate_program(&mut self, program: &Program) -> EvalResult {
        let env = self.env.clone();
        self.checkpoint(NodeKind::Program, program.span);
        self.loop_depth = 0;
        let result = match self.eval_block(&program.body, &env) {
            Ok(value) => Ok(value),
            Err(err) => match err.control_flow {
                Some(ControlFlow::Return(value)) => Ok(value.unwrap_or(Value::Nil)),
                Some(ControlFlow::Break) => Err(loop_control_outside_loop("break")),
                Some(ControlFlow::Continue) => Err(loop_control_outside_loop("continue")),
                None => Err(self.call_stack.attach_backtrace(err)),
            },
        };
        match &result {
            Ok(value) => debug!(result = %value, "program finished"),
            Err(err) => debug!(error = %err, "program failed"),
        }
        result
    }

    /// Call any callable value from the host.
    pub fn call(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        let env = self.env.clone();
        self.call_value(callee, args, 0, &env)
    }

    /// Debugger hook run before each node.
    #[inline]
    fn checkpoint(&self, kind: NodeKind, span: Span) {
        if let Some(debugger) = &self.debugger {
            Self::debugger_checkpoint(debugger.as_ref(), &self.file, kind, span.line());
        }
    }

    fn debugger_checkpoint(debugger: &dyn DebugHook, file: &str, kind: NodeKind, line: u32) {
        debugger.set_location(file, line);
        if !debugger.is_debuggable(kind) {
            return;
        }
        if debugger.should_stop(file, line) {
            debugger.pause();
        }
        debugger.wait_if_paused(kind);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Record where an error came from, keeping the innermost span.
#[inline]
fn spanned(err: EvalError, span: Span) -> EvalError {
    if err.span.is_some() || err.is_control_flow() {
        err
    } else {
        err.with_span(span)
    }
}

#[cfg(test)]
mod tests;
