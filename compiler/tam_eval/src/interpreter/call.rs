//! Function and builtin calls.

use tam_ir::Name;
use tam_stack::ensure_sufficient_stack;

use super::{Evaluator, Flow, Unwind};
use crate::errors::{not_callable, recursion_limit, wrong_arg_count};
use crate::object::{CallContext, Function, Object};

impl Evaluator<'_> {
    pub(super) fn call_object(&mut self, callee: &Object, args: Vec<Object>) -> Flow {
        match callee {
            Object::Function(func) => self.call_function(func, args),
            Object::Builtin(builtin) => {
                let cx = CallContext::new(self.ctx, &self.interp.print_handler);
                match builtin.call(&cx, &args) {
                    Object::Error(err) => Err(Unwind::Error((*err).clone())),
                    value => Ok(value),
                }
            }
            other => Err(not_callable(other).into()),
        }
    }

    /// Bind parameters in a child of the captured environment and run the
    /// body. A `return` stops here.
    fn call_function(&mut self, func: &Function, args: Vec<Object>) -> Flow {
        let params = func.params();
        if params.len() != args.len() {
            return Err(wrong_arg_count(args.len(), params.len()).into());
        }
        self.check_context()?;
        if self.depth >= self.interp.max_call_depth {
            return Err(recursion_limit(self.interp.max_call_depth).into());
        }

        let env = func.env().child();
        for (param, arg) in params.iter().zip(args) {
            env.define(param.clone(), arg);
        }
        tracing::trace!(
            function = func.name().map_or("<anonymous>", Name::as_str),
            depth = self.depth,
            "call"
        );

        self.depth += 1;
        let arena = func.arena().clone();
        let result = ensure_sufficient_stack(|| self.eval_block(&arena, func.body(), &env));
        self.depth -= 1;

        match result {
            Ok(value) | Err(Unwind::Return(value)) => Ok(value),
            Err(unwind) => Err(unwind),
        }
    }
}
