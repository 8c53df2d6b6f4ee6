//! Class instantiation.

use std::rc::Rc;

use rustc_hash::FxHashSet;
use vesper_ir::ClassMemberKind;

use super::call::bind_parameters;
use super::Interpreter;
use crate::errors::{constructor_return, missing_constructor, ControlFlow, EvalResult};
use crate::value::{ClassValue, Value};

impl Interpreter {
    /// Build an instance of `class`.
    ///
    /// Members are evaluated into a new class-body scope over the class's
    /// defining environment. The constructor then runs in a child of that
    /// scope holding its parameters as constants. Declarations made by the
    /// constructor body land in the class-body scope, which becomes the
    /// instance's data.
    #[tracing::instrument(level = "debug", skip_all, fields(class = class.name()))]
    pub(super) fn instantiate(
        &mut self,
        class: &Rc<ClassValue>,
        args: Vec<Value>,
        line: u32,
    ) -> EvalResult {
        let decl = &class.decl;
        let constructor = decl
            .constructor()
            .cloned()
            .ok_or_else(|| missing_constructor(&decl.name))?;

        let body = class.env.child();
        let mut publics = FxHashSet::default();
        for member in &decl.members {
            match &member.kind {
                ClassMemberKind::Method(method) => {
                    let func = Value::function(method.clone(), body.clone());
                    body.declare(&method.name, func, false)?;
                }
                ClassMemberKind::Property(property) => {
                    let value = match &property.value {
                        Some(expr) => self.eval_expr(expr, &body)?,
                        None => Value::Nil,
                    };
                    body.declare(&property.name, value, property.constant)?;
                }
            }
            if member.is_public {
                publics.insert(member.name().to_string());
            }
        }

        let scope = body.child();
        bind_parameters(&scope, &constructor.params, args)?;
        scope.forward_declarations();

        self.enter_frame(class.name(), line)?;
        let saved_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        let result = self.eval_block(&constructor.body, &scope);
        self.loop_depth = saved_loop_depth;

        let result = match result {
            Ok(_) => Ok(()),
            Err(err) => match err.control_flow {
                Some(ControlFlow::Return(None)) => Ok(()),
                Some(ControlFlow::Return(Some(_))) => {
                    Err(self.unwinding(constructor_return(), &scope))
                }
                _ => Err(self.unwinding(err, &scope)),
            },
        };
        self.leave_frame();
        result?;

        Ok(Value::instance(Rc::clone(class), publics, body))
    }
}
