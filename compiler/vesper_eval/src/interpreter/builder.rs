//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::sync::Arc;

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::debugger::DebugHook;
use crate::diagnostics::CallStack;
use crate::environment::Environment;

/// Builder for creating Interpreter instances.
///
/// Defaults: file `<main>`, no debugger, a call-depth limit of
/// `DEFAULT_MAX_CALL_DEPTH`, and a fresh `Environment::global()`.
pub struct InterpreterBuilder {
    file: Option<String>,
    debugger: Option<Arc<dyn DebugHook>>,
    max_call_depth: Option<usize>,
    env: Option<Environment>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            file: None,
            debugger: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            env: None,
        }
    }

    /// File name reported in frames, backtraces and to the debugger.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>) -> Self {
        self.file = Some(name.into());
        self
    }

    /// Attach a debugger.
    #[must_use]
    pub fn debugger(mut self, debugger: Arc<dyn DebugHook>) -> Self {
        self.debugger = Some(debugger);
        self
    }

    /// Limit on nested calls; `None` for unlimited.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Run in an existing global environment instead of a fresh one.
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        Interpreter {
            env: self.env.unwrap_or_else(Environment::global),
            file: Arc::from(self.file.as_deref().unwrap_or("<main>")),
            call_stack: CallStack::new(self.max_call_depth),
            loop_depth: 0,
            debugger: self.debugger,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
