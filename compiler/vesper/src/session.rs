//! A persistent global environment across several runs.

use std::sync::Arc;

use tracing::debug;
use vesper_eval::{DebugHook, Environment, EvalResult, Interpreter, Value};

use crate::{parse_source, Error};

/// An interpreter whose globals outlive a single program.
///
/// Each `run` evaluates a whole source text against the same global
/// environment, so declarations from one run are visible to the next.
/// Redeclaring a global in a later run is an error, as it would be within
/// one program.
pub struct Session {
    interpreter: Interpreter,
}

impl Session {
    pub fn new() -> Self {
        Session {
            interpreter: Interpreter::new(),
        }
    }

    /// Session reporting `file` in frames and to the debugger.
    pub fn with_file(file: impl Into<String>) -> Self {
        Session {
            interpreter: Interpreter::builder().file(file).build(),
        }
    }

    /// Session over a custom-built interpreter.
    pub fn from_interpreter(interpreter: Interpreter) -> Self {
        Session { interpreter }
    }

    /// Session with `debugger` attached.
    pub fn with_debugger(file: impl Into<String>, debugger: Arc<dyn DebugHook>) -> Self {
        Session {
            interpreter: Interpreter::builder()
                .file(file)
                .debugger(debugger)
                .build(),
        }
    }

    /// Parse and evaluate `source` in the session's globals.
    #[tracing::instrument(level = "debug", skip_all, fields(file = self.interpreter.file()))]
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let program = parse_source(source)?;
        Ok(self.interpreter.evaluate_program(&program)?)
    }

    /// Register a host function as a global constant.
    pub fn define_native<F>(&self, name: &str, func: F) -> Result<(), Error>
    where
        F: Fn(&[Value], &Environment) -> EvalResult + 'static,
    {
        self.interpreter.define_native(name, func)?;
        Ok(())
    }

    /// Declare a global from the host.
    pub fn define(&self, name: &str, value: Value, constant: bool) -> Result<(), Error> {
        self.environment().declare(name, value, constant)?;
        Ok(())
    }

    /// Look up a global, `None` if it was never declared.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.environment().lookup(name).ok()
    }

    /// Call the global function `name` with `args`.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value, Error> {
        let callee = self.environment().lookup(name)?;
        Ok(self.interpreter.call(&callee, args)?)
    }

    pub fn environment(&self) -> &Environment {
        self.interpreter.environment()
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// An independent copy of this session.
    ///
    /// Globals are deep-copied, closures included, so nothing the fork does
    /// is visible here and vice versa. Native functions are shared. The fork
    /// keeps the file name and call-depth limit but not the debugger.
    pub fn fork(&self) -> Session {
        let env = self.environment().deep_copy();
        debug!(file = self.interpreter.file(), "forking session");
        let interpreter = Interpreter::builder()
            .environment(env)
            .file(self.interpreter.file())
            .max_call_depth(self.interpreter.max_call_depth())
            .build();
        Session { interpreter }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
