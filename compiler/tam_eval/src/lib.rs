//! Tam Eval - tree-walking evaluator for the Tamarin scripting language.
//!
//! # Architecture
//!
//! - `Object`: the dynamically typed value every expression produces
//! - `Environment`: lexical scope frames; `let` defines in the current
//!   frame, assignment updates the nearest frame that defines the name
//! - `Interpreter`: walks a parsed `Program` under a cancellable `Context`
//! - `BuiltinRegistry`: native functions and modules, consulted after the
//!   scope chain
//! - `evaluate_binary` / `evaluate_negation`: operator dispatch on object
//!   kind pairs
//!
//! Evaluation never panics on script errors: every failure surfaces as an
//! `Object::Error` result.

mod attributes;
pub mod builtins;
mod context;
mod environment;
pub mod errors;
mod index;
pub mod interpreter;
pub mod object;
mod operators;
mod print_handler;

#[cfg(test)]
mod tests;

pub use attributes::get_attribute;
pub use builtins::BuiltinRegistry;
pub use context::{CancelHandle, Cancelled, Context};
pub use environment::{AssignError, EnvOptions, Environment, LocalScope, Scope};
pub use errors::{ErrorKind, EvalError, EvalResult};
pub use index::{get_index, get_slice, set_index};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use object::{
    Builtin, BuiltinFn, CallContext, Function, HashKey, HashPair, HashPairs, Module, Object,
    ObjectType, SetItems,
};
pub use operators::{evaluate_binary, evaluate_negation, evaluate_not};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
