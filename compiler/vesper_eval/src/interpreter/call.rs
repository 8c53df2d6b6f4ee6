//! Call evaluation for script functions, native functions and classes.

use vesper_ir::{Expr, Span};

use super::Interpreter;
use crate::diagnostics::StackFrame;
use crate::environment::Environment;
use crate::errors::{not_callable, ControlFlow, EvalError, EvalResult};
use crate::value::{FunctionValue, Value};

impl Interpreter {
    /// Evaluate the callee, then the arguments left to right, then call.
    pub(super) fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        span: Span,
        env: &Environment,
    ) -> EvalResult {
        let callee = self.eval_expr(callee, env)?;
        let args = args
            .iter()
            .map(|arg| self.eval_expr(arg, env))
            .collect::<Result<Vec<_>, _>>()?;
        self.call_value(&callee, args, span.line(), env)
    }

    /// Dispatch on the callee's kind.
    ///
    /// Natives receive the caller's environment and get no frame of their own.
    pub(super) fn call_value(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        line: u32,
        env: &Environment,
    ) -> EvalResult {
        match callee {
            Value::NativeFunction(native) => native.call(&args, env),
            Value::Function(func) => self.call_function(func, args, line),
            Value::Class(class) => self.instantiate(class, args, line),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Run a function body in a fresh scope over its captured environment.
    ///
    /// A `return` signal becomes the call's value. Falling off the end yields
    /// the last statement's value.
    #[tracing::instrument(level = "debug", skip_all, fields(name = func.name()))]
    fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>, line: u32) -> EvalResult {
        let scope = func.env.child();
        bind_parameters(&scope, &func.decl.params, args)?;

        self.enter_frame(func.name(), line)?;
        let saved_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        let result = self.eval_block(&func.decl.body, &scope);
        self.loop_depth = saved_loop_depth;

        let result = match result {
            Ok(value) => Ok(value),
            Err(err) => match err.control_flow {
                Some(ControlFlow::Return(value)) => Ok(value.unwrap_or(Value::Nil)),
                _ => Err(self.unwinding(err, &scope)),
            },
        };
        self.leave_frame();
        result
    }

    /// Push a frame onto the call stack and the debugger.
    pub(super) fn enter_frame(&mut self, name: &str, line: u32) -> Result<(), EvalError> {
        let frame = StackFrame::new(name, self.file.clone(), line);
        if let Some(debugger) = &self.debugger {
            self.call_stack.push(frame.clone())?;
            debugger.push_frame(frame);
        } else {
            self.call_stack.push(frame)?;
        }
        Ok(())
    }

    pub(super) fn leave_frame(&mut self) {
        self.call_stack.pop();
        if let Some(debugger) = &self.debugger {
            debugger.pop_frame();
        }
    }

    /// Record a genuine error at the innermost call it passes through.
    ///
    /// Attaches the backtrace and lets the debugger snapshot the failing
    /// scope, once per error.
    pub(super) fn unwinding(&self, err: EvalError, scope: &Environment) -> EvalError {
        if err.is_control_flow() || err.backtrace.is_some() {
            return err;
        }
        if let Some(debugger) = &self.debugger {
            debugger.take_snapshot(scope);
        }
        self.call_stack.attach_backtrace(err)
    }
}

/// Bind parameters as constants. Missing arguments are Nil; extras are
/// dropped.
pub(super) fn bind_parameters(
    scope: &Environment,
    params: &[String],
    args: Vec<Value>,
) -> Result<(), EvalError> {
    let mut args = args.into_iter();
    for param in params {
        let value = args.next().unwrap_or(Value::Nil);
        scope.declare(param, value, true)?;
    }
    Ok(())
}
