//! Tree-walking interpreter.
//!
//! Every evaluation function returns `Flow`: `Ok(value)` for a normal
//! result, or an `Unwind` signal. Errors and `return` both unwind, but
//! they are distinct variants, so a function call boundary can stop a
//! `return` while letting an error continue outward.
//!
//! # Module layout
//! - `builder`: `InterpreterBuilder`
//! - `stmt`: statements, blocks and loops
//! - `expr`: expression dispatch, operators and assignment
//! - `call`: function and builtin calls

mod builder;
mod call;
mod expr;
mod stmt;

use tam_ir::Program;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use crate::builtins::BuiltinRegistry;
use crate::context::Context;
use crate::environment::Environment;
use crate::errors::{cancelled, ErrorKind, EvalError};
use crate::object::Object;
use crate::print_handler::SharedPrintHandler;

/// Non-local exit from an evaluation function.
#[derive(Debug)]
pub(crate) enum Unwind {
    /// A script error; propagates to the top.
    Error(EvalError),
    /// `return`; stopped at the nearest call boundary.
    Return(Object),
    /// `break`; stopped at the nearest loop.
    Break,
    /// `continue`; stopped at the nearest loop.
    Continue,
}

impl From<EvalError> for Unwind {
    fn from(err: EvalError) -> Self {
        Unwind::Error(err)
    }
}

pub(crate) type Flow = Result<Object, Unwind>;

/// A configured evaluator. Holds no per-run state, so one interpreter
/// can evaluate any number of programs.
pub struct Interpreter {
    registry: BuiltinRegistry,
    print_handler: SharedPrintHandler,
    max_call_depth: usize,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Interpreter with the standard builtins and stdout output.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn registry(&self) -> &BuiltinRegistry {
        &self.registry
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Evaluate `program` in `env`.
    ///
    /// The result is the value of the last top-level statement, the value
    /// of a top-level `return`, or the first error as `Object::Error`.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements().len()))]
    pub fn evaluate(&self, ctx: &Context, program: &Program, env: &Environment) -> Object {
        let mut run = Evaluator::new(self, ctx);
        let mut result = Object::Null;
        for &stmt in program.statements() {
            match run.eval_stmt(&program.arena, stmt, env) {
                Ok(value) => result = value,
                Err(Unwind::Return(value)) => return value,
                Err(Unwind::Error(err)) => {
                    tracing::debug!(error = %err, "evaluation failed");
                    return Object::from(err);
                }
                Err(Unwind::Break | Unwind::Continue) => {
                    return Object::from(EvalError::new(
                        ErrorKind::Value,
                        "loop control outside of a loop",
                    ));
                }
            }
        }
        result
    }

    /// Call a function or builtin object from the host.
    pub fn call(&self, ctx: &Context, callee: &Object, args: Vec<Object>) -> Object {
        let mut run = Evaluator::new(self, ctx);
        match run.call_object(callee, args) {
            Ok(value) | Err(Unwind::Return(value)) => value,
            Err(Unwind::Error(err)) => Object::from(err),
            Err(Unwind::Break | Unwind::Continue) => Object::Null,
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// State of a single run: the context and the current call depth.
struct Evaluator<'a> {
    interp: &'a Interpreter,
    ctx: &'a Context,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    fn new(interp: &'a Interpreter, ctx: &'a Context) -> Self {
        Evaluator {
            interp,
            ctx,
            depth: 0,
        }
    }

    /// Fail with the cancellation cause once the context is done.
    #[inline]
    fn check_context(&self) -> Result<(), Unwind> {
        match self.ctx.err() {
            None => Ok(()),
            Some(cause) => {
                tracing::debug!(%cause, depth = self.depth, "evaluation cancelled");
                Err(cancelled(cause).into())
            }
        }
    }
}
