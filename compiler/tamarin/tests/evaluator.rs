//! Embedding API tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use tamarin::{
    buffer_handler, eval, parse, Context, EnvOptions, Environment, ErrorKind, Interpreter, Object,
};

#[test]
fn eval_returns_the_last_value() {
    let result = eval(&Context::background(), "let x = 2; x * 21", &Environment::default()).unwrap();
    assert_eq!(result.inspect(), "42");
}

#[test]
fn syntax_errors_are_returned_before_evaluation() {
    let err = eval(&Context::background(), "let = 5", &Environment::default()).unwrap_err();
    assert!(!err.message.is_empty());
}

#[test]
fn script_errors_are_values() {
    let result = eval(&Context::background(), "[1, 2, 3][99]", &Environment::default()).unwrap();
    let err = result.as_error().unwrap();
    assert_eq!(err.kind(), ErrorKind::Index);
    assert_eq!(err.message(), "index error: array index out of range: 99");
}

#[test]
fn globals_and_state_are_shared_across_calls() {
    let env = Environment::new(EnvOptions::default().global("limit", 3_i64));
    let ctx = Context::background();
    eval(&ctx, "let seen = []", &env).unwrap();
    let result = eval(
        &ctx,
        "for (let i = 0; i < limit; i++) { seen.append(i * i) }; seen",
        &env,
    )
    .unwrap();
    assert_eq!(result.inspect(), "[0, 1, 4]");
}

#[test]
fn timeouts_interrupt_runaway_scripts() {
    let ctx = Context::background().with_timeout(Duration::from_millis(100));
    let result = eval(&ctx, "func spin() { for { } }; spin()", &Environment::default()).unwrap();
    assert_eq!(result.display_value(), "context deadline exceeded");
}

#[test]
fn custom_interpreter_captures_output() {
    let output = buffer_handler();
    let interp = Interpreter::builder().print_handler(output.clone()).build();
    let program = parse(
        r#"
        func greet(name) { print("hello,", name) }
        for (let i = 0; i < 2; i++) { greet("tamarin " + string(i)) }
        "#,
    )
    .unwrap();
    let result = interp.evaluate(&Context::background(), &program, &Environment::default());
    assert!(matches!(result, Object::Null));
    assert_eq!(output.take_output(), "hello, tamarin 0\nhello, tamarin 1\n");
}
