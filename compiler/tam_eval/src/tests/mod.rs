//! End-to-end evaluator tests: source is parsed with `tam_parse` and run
//! through an `Interpreter`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod evaluator_tests;
mod scope_tests;

use crate::{silent_handler, Context, Environment, Interpreter, Object};

/// Evaluate `source` in a fresh environment with output discarded.
fn eval(source: &str) -> Object {
    let interp = Interpreter::builder().print_handler(silent_handler()).build();
    eval_with(&interp, &Context::background(), source)
}

fn eval_with(interp: &Interpreter, ctx: &Context, source: &str) -> Object {
    let program = tam_parse::parse(source)
        .unwrap_or_else(|err| panic!("parse failed for {source:?}: {}", err.message));
    interp.evaluate(ctx, &program, &Environment::default())
}

/// Inspect text of the result.
fn inspect(source: &str) -> String {
    eval(source).inspect()
}

/// Message of the error the script fails with.
fn error_message(source: &str) -> String {
    match eval(source) {
        Object::Error(err) => err.message().to_string(),
        other => panic!("expected an error from {source:?}, got {}", other.inspect()),
    }
}
