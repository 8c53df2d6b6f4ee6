//! Statement evaluation.

use vesper_ir::{IfStatement, Stmt, StmtKind, TryCatch, WhileLoop};
use vesper_stack::ensure_sufficient_stack;

use super::{spanned, Interpreter};
use crate::environment::Environment;
use crate::errors::{loop_control_outside_loop, to_loop_action, EvalError, EvalResult, LoopAction};
use crate::value::Value;

impl Interpreter {
    /// Evaluate statements in order; the value is the last statement's.
    pub(super) fn eval_block(&mut self, stmts: &[Stmt], env: &Environment) -> EvalResult {
        let mut last = Value::Nil;
        for stmt in stmts {
            last = self.eval_stmt(stmt, env)?;
        }
        Ok(last)
    }

    pub(super) fn eval_stmt(&mut self, stmt: &Stmt, env: &Environment) -> EvalResult {
        self.checkpoint(stmt.node_kind(), stmt.span);
        ensure_sufficient_stack(|| self.eval_stmt_inner(stmt, env))
            .map_err(|err| spanned(err, stmt.span))
    }

    fn eval_stmt_inner(&mut self, stmt: &Stmt, env: &Environment) -> EvalResult {
        match &stmt.kind {
            StmtKind::VarDeclaration(decl) => {
                let value = match &decl.value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Nil,
                };
                env.declare(&decl.name, value, decl.constant)
            }
            StmtKind::DestructureDeclaration(decl) => {
                let value = self.eval_expr(&decl.value, env)?;
                self.bind_pattern(&decl.pattern, value.clone(), env, decl.constant)?;
                Ok(value)
            }
            StmtKind::FnDeclaration(decl) => {
                let func = Value::function(decl.clone(), env.clone());
                env.declare(&decl.name, func, false)
            }
            StmtKind::Class(decl) => {
                let class = Value::class(decl.clone(), env.clone());
                env.declare(&decl.name, class, false)
            }
            StmtKind::If(if_stmt) => self.eval_if(if_stmt, env),
            StmtKind::While(while_loop) => self.eval_while(while_loop, env),
            StmtKind::TryCatch(try_catch) => self.eval_try(try_catch, env),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => Some(self.eval_expr(expr, env)?),
                    None => None,
                };
                Err(EvalError::return_with(value))
            }
            StmtKind::Break => Err(self.loop_signal("break", EvalError::break_signal)),
            StmtKind::Continue => Err(self.loop_signal("continue", EvalError::continue_signal)),
            StmtKind::Expression(expr) => self.eval_expr(expr, env),
        }
    }

    /// The tagged signal inside a loop, a catchable error outside one.
    fn loop_signal(&self, keyword: &'static str, signal: fn() -> EvalError) -> EvalError {
        if self.loop_depth == 0 {
            loop_control_outside_loop(keyword)
        } else {
            signal()
        }
    }

    /// Runs the first branch whose condition holds, each in its own scope.
    fn eval_if(&mut self, if_stmt: &IfStatement, env: &Environment) -> EvalResult {
        if self.eval_expr(&if_stmt.condition, env)?.is_truthy() {
            return self.eval_block(&if_stmt.then_branch, &env.child());
        }
        for else_if in &if_stmt.else_ifs {
            if self.eval_expr(&else_if.condition, env)?.is_truthy() {
                return self.eval_block(&else_if.body, &env.child());
            }
        }
        match &if_stmt.else_branch {
            Some(body) => self.eval_block(body, &env.child()),
            None => Ok(Value::Nil),
        }
    }

    fn eval_while(&mut self, while_loop: &WhileLoop, env: &Environment) -> EvalResult {
        while self.eval_expr(&while_loop.condition, env)?.is_truthy() {
            let iteration = env.child();
            self.loop_depth += 1;
            let result = self.eval_block(&while_loop.body, &iteration);
            self.loop_depth -= 1;
            if let Err(err) = result {
                match to_loop_action(err) {
                    LoopAction::Continue => {}
                    LoopAction::Break => break,
                    LoopAction::Error(err) => return Err(err),
                }
            }
        }
        Ok(Value::Nil)
    }

    /// Untagged errors from the body are caught; control-flow signals pass.
    ///
    /// The catch variable holds the error's display text,
    /// `Runtime Error: <message>`.
    fn eval_try(&mut self, try_catch: &TryCatch, env: &Environment) -> EvalResult {
        let marks = self
            .debugger
            .as_ref()
            .map(|d| (d.depth(), d.snapshot_count()));
        let (call_depth, loop_depth) = (self.call_stack.depth(), self.loop_depth);

        let err = match self.eval_block(&try_catch.body, &env.child()) {
            Ok(value) => return Ok(value),
            Err(err) if err.is_control_flow() => return Err(err),
            Err(err) => err,
        };

        tracing::debug!(error = %err, "caught runtime error");
        if let (Some(debugger), Some((depth, snapshots))) = (&self.debugger, marks) {
            debugger.truncate_frames(depth);
            debugger.truncate_snapshots(snapshots);
        }
        debug_assert_eq!(self.call_stack.depth(), call_depth);
        self.loop_depth = loop_depth;

        let scope = env.child();
        if let Some(param) = &try_catch.param {
            scope.declare(param, Value::string(err.to_string()), false)?;
        }
        self.eval_block(&try_catch.handler, &scope)
    }
}
