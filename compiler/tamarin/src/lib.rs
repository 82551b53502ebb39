//! Tamarin - an embeddable, dynamically typed scripting language.
//!
//! ```text
//! let ctx = Context::background().with_timeout(Duration::from_secs(1));
//! let result = tamarin::eval(&ctx, "let x = 2; x * 21", &Environment::default())?;
//! assert_eq!(result.inspect(), "42");
//! ```
//!
//! `eval` uses the standard builtins and prints to stdout. Embedders that
//! need another builtin set, captured output or a different call depth
//! limit build an `Interpreter` themselves and pass it a parsed `Program`.

use std::sync::Once;

pub use tam_eval::{
    buffer_handler, silent_handler, stdout_handler, BuiltinRegistry, CallContext, CancelHandle,
    Cancelled, Context, EnvOptions, Environment, ErrorKind, EvalError, Interpreter,
    InterpreterBuilder, Module, Object, ObjectType, SharedPrintHandler,
};
pub use tam_ir::Program;
pub use tam_parse::{parse, ParseError};

/// Parse `source` and evaluate it in `env`.
///
/// A syntax error is returned as `Err` before anything runs. Script
/// errors are part of the `Ok` value as `Object::Error`.
pub fn eval(ctx: &Context, source: &str, env: &Environment) -> Result<Object, ParseError> {
    let program = parse(source).inspect_err(|err| {
        tracing::debug!(error = %err, "parse failed");
    })?;
    Ok(Interpreter::new().evaluate(ctx, &program, env))
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=tam_eval=debug`
/// or `RUST_LOG=tam_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
