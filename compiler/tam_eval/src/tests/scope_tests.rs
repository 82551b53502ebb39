//! `let` versus assignment, loop scoping, host globals and environment
//! persistence across runs.

use super::{eval_with, inspect};
use crate::{silent_handler, Context, EnvOptions, Environment, Interpreter, Object};
use pretty_assertions::assert_eq;

#[test]
fn let_shadows_inside_blocks() {
    let source = "
        let x = 1;
        if (true) { let x = 2; x };
        x";
    assert_eq!(inspect(source), "1");
}

#[test]
fn assignment_updates_the_defining_frame() {
    let source = "
        let x = 1;
        if (true) { x = 2 };
        x";
    assert_eq!(inspect(source), "2");

    let from_function = "
        let total = 0;
        let add = func(n) { total += n };
        add(3); add(4);
        total";
    assert_eq!(inspect(from_function), "7");
}

#[test]
fn for_loop_forms() {
    let cases = [
        ("let sum = 0; for (let i = 0; i < 100; i++) { sum += i }; sum", "4950"),
        ("let x = 0; for (x < 10) { x++ }; x", "10"),
        ("let n = 0; for { n++; if (n == 5) { break } }; n", "5"),
        ("let n = 0; for (;;) { n++; if (n == 3) { break } }; n", "3"),
        (
            "let odd = 0; for (let i = 0; i < 10; i++) { if (i % 2 == 0) { continue }; odd += 1 }; odd",
            "5",
        ),
        ("for (let i = 0; i < 3; i++) { i }", "null"),
    ];
    for (source, expected) in cases {
        assert_eq!(inspect(source), expected, "source: {source}");
    }
}

#[test]
fn loop_variables_stay_in_the_loop() {
    let message = match super::eval("for (let i = 0; i < 3; i++) { }; i") {
        Object::Error(err) => err.message().to_string(),
        other => panic!("expected error, got {other:?}"),
    };
    assert_eq!(message, "name error: i is not defined");
}

#[test]
fn body_bindings_are_fresh_per_iteration() {
    let source = "
        let fns = [];
        for (let i = 0; i < 3; i++) { let j = i; fns.append(func() { j }) };
        [fns[0](), fns[1](), fns[2]()]";
    assert_eq!(inspect(source), "[0, 1, 2]");
}

#[test]
fn return_inside_loop_leaves_the_function() {
    let source = "
        func find(xs, want) {
            for (let i = 0; i < len(xs); i++) {
                if (xs[i] == want) { return i }
            }
            return -1
        }
        [find([5, 6, 7], 7), find([5], 9)]";
    assert_eq!(inspect(source), "[2, -1]");
}

#[test]
fn host_globals_are_visible() {
    let env = Environment::new(
        EnvOptions::default()
            .global("answer", 42_i64)
            .global("greeting", "hi"),
    );
    let interp = Interpreter::builder().print_handler(silent_handler()).build();
    let program = tam_parse::parse("greeting + \" \" + string(answer)").unwrap();
    let result = interp.evaluate(&Context::background(), &program, &env);
    assert_eq!(result.inspect(), "\"hi 42\"");
}

#[test]
fn scope_bindings_shadow_builtins() {
    assert_eq!(inspect("let len = func(x) { 0 }; len([1, 2])"), "0");
}

#[test]
fn environment_persists_between_programs() {
    let interp = Interpreter::builder().print_handler(silent_handler()).build();
    let ctx = Context::background();
    let env = Environment::default();

    let first = tam_parse::parse("let counter = 10; func bump() { counter++ }").unwrap();
    assert_eq!(interp.evaluate(&ctx, &first, &env).inspect(), "null");

    let second = tam_parse::parse("bump(); bump()").unwrap();
    assert_eq!(interp.evaluate(&ctx, &second, &env).inspect(), "12");
    assert_eq!(env.get("counter").map(|v| v.inspect()).as_deref(), Some("12"));
    assert!(env.has_own("bump"));
}

#[test]
fn closures_outlive_their_program() {
    let interp = Interpreter::builder().print_handler(silent_handler()).build();
    let ctx = Context::background();
    let adder = {
        let program = tam_parse::parse("func(x) { func(y) { x + y } }(40)").unwrap();
        interp.evaluate(&ctx, &program, &Environment::default())
    };
    let result = interp.call(&ctx, &adder, vec![Object::Integer(2)]);
    assert_eq!(result.inspect(), "42");
    assert_eq!(eval_with(&interp, &ctx, "1 + 1").inspect(), "2");
}
