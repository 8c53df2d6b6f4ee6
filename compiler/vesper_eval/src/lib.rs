//! Vesper Eval - Tree-walking evaluator for Vesper programs.
//!
//! # Architecture
//!
//! - `Value`: the runtime value model, with shared objects and arrays
//! - `Environment`: lexically chained scopes with constant protection
//! - `EvalError` / `ControlFlow`: runtime errors and the return/break/continue
//!   signals that travel with them
//! - `CallStack`: frames for backtraces and the recursion limit
//! - `DebugHook` / `Debugger`: the debugger surface the interpreter drives
//! - `Interpreter`: the evaluator itself

mod diagnostics;
pub mod debugger;
mod environment;
pub mod errors;
pub mod interpreter;
mod value;

pub use debugger::{
    DebugHook, Debugger, ExecutionState, Location, ScopeSnapshot, Snapshot, SnapshotValue,
    StepMode,
};
pub use diagnostics::{CallStack, StackFrame};
pub use environment::{Environment, LocalScope, Scope};
pub use errors::{
    BacktraceFrame, ControlFlow, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use interpreter::{
    evaluate_binary, evaluate_compare, Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH,
};
pub use value::{
    format_number, ClassValue, FunctionValue, InstanceValue, NativeFn, NativeFunction, ObjectMap,
    Value,
};
