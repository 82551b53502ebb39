//! Expressions, operators, literals and error messages.

use super::{error_message, eval, inspect};
use crate::{ErrorKind, HashKey, Object};
use pretty_assertions::assert_eq;

fn assert_all(cases: &[(&str, &str)]) {
    for (source, expected) in cases {
        assert_eq!(inspect(source), *expected, "source: {source}");
    }
}

#[test]
fn integer_arithmetic() {
    assert_all(&[
        ("5", "5"),
        ("-10", "-10"),
        ("5 + 5 + 5 + 5 - 10", "10"),
        ("2 * 2 * 2 * 2 * 2", "32"),
        ("-50 + 100 + -50", "0"),
        ("5 * 2 + 10", "20"),
        ("5 + 2 * 10", "25"),
        ("50 / 2 * 2 + 10", "60"),
        ("2 * (5 + 10)", "30"),
        ("3 * 3 * 3 + 10", "37"),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", "50"),
        ("7 / 2", "3"),
        ("7 % 3", "1"),
        ("-7 % 3", "-1"),
        ("2 ** 10", "1024"),
        ("2 ** 3 ** 2", "512"),
        ("-2 ** 2", "-4"),
    ]);
}

#[test]
fn float_arithmetic() {
    assert_all(&[
        ("2.5", "2.5"),
        ("1.5 + 1", "2.5"),
        ("5.0 / 2", "2.5"),
        ("2 * 0.25", "0.5"),
        ("2 ** -1", "0.5"),
        ("-1.5", "-1.5"),
    ]);
}

#[test]
fn comparisons() {
    assert_all(&[
        ("true", "true"),
        ("1 < 2", "true"),
        ("1 > 2", "false"),
        ("1 <= 1", "true"),
        ("1 >= 2", "false"),
        ("1 == 1", "true"),
        ("1 != 1", "false"),
        ("1.0 == 1", "true"),
        ("1 < 1.5", "true"),
        ("\"a\" >= \"A\"", "true"),
        ("\"abc\" < \"abd\"", "true"),
        ("\"x\" == \"x\"", "true"),
        ("true == true", "true"),
        ("true != false", "true"),
        ("(1 < 2) == true", "true"),
        ("null == null", "true"),
        ("null == 0", "false"),
        ("[1, 2] == [1, 2]", "true"),
        ("[1, 2] != [1, 3]", "true"),
    ]);
}

#[test]
fn bang_and_logical_operators() {
    assert_all(&[
        ("!true", "false"),
        ("!false", "true"),
        ("!5", "false"),
        ("!!true", "true"),
        ("!!5", "true"),
        ("!null", "true"),
        ("true && false", "false"),
        ("1 && \"x\"", "true"),
        ("false || null", "false"),
        ("null || 3", "true"),
    ]);
}

#[test]
fn logical_operators_short_circuit() {
    // The right operand would fail if it were evaluated.
    assert_eq!(inspect("false && undefined_name"), "false");
    assert_eq!(inspect("true || undefined_name"), "true");
    assert_eq!(
        error_message("true && undefined_name"),
        "name error: undefined_name is not defined"
    );
}

#[test]
fn string_operations() {
    assert_all(&[
        ("\"Hello\" + \" \" + \"World!\"", "\"Hello World!\""),
        ("\"狐犬\"[1]", "\"犬\""),
        ("\"hello\"[-1]", "\"o\""),
        ("\"hello\"[1:3]", "\"el\""),
        ("\"hello\"[:2]", "\"he\""),
        ("\"hello\"[3:]", "\"lo\""),
    ]);
}

#[test]
fn if_else_expressions() {
    assert_all(&[
        ("if (true) { 10 }", "10"),
        ("if (false) { 10 }", "null"),
        ("if (1) { 10 }", "10"),
        ("if (1 < 2) { 10 }", "10"),
        ("if (1 > 2) { 10 }", "null"),
        ("if (1 > 2) { 10 } else { 20 }", "20"),
        ("if (1 < 2) { 10 } else { 20 }", "10"),
        ("let x = 5; if (x < 1) { 1 } else if (x < 10) { 2 } else { 3 }", "2"),
    ]);
}

#[test]
fn return_statements() {
    assert_all(&[
        ("return 10;", "10"),
        ("return 10; 9;", "10"),
        ("return 2 * 5; 9;", "10"),
        ("9; return 2 * 5; 9;", "10"),
        ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", "10"),
        ("let f = func() { return; }; f()", "null"),
    ]);
}

#[test]
fn let_statements_and_declarations_evaluate_to_null() {
    assert_all(&[
        ("let a = 5; a;", "5"),
        ("let a = 5 * 5; a;", "25"),
        ("let a = 5; let b = a; b;", "5"),
        ("let a = 5; let b = a; let c = a + b + 5; c;", "15"),
        ("let a = 5", "null"),
        ("func f() { 1 }", "null"),
    ]);
}

#[test]
fn postfix_yields_the_updated_value() {
    assert_all(&[
        ("let a = 5; a--", "4"),
        ("let a = 5; a++", "6"),
        ("let a = 5; a++; a++; a", "7"),
        ("let d = 1.5; d++", "2.5"),
    ]);
    assert_eq!(error_message("3--"), "name error: 3 is not defined");
    assert_eq!(error_message("b++"), "name error: b is not defined");
}

#[test]
fn assignment_forms() {
    assert_all(&[
        ("let x = 1; x = 5; x", "5"),
        ("let x = 1; x += 4; x", "5"),
        ("let x = 10; x -= 4; x", "6"),
        ("let x = 3; x *= 4; x", "12"),
        ("let x = 12; x /= 4; x", "3"),
        ("let x = 1; x = 7", "7"),
        ("let s = \"a\"; s += \"b\"; s", "\"ab\""),
        ("let xs = [1, 2, 3]; xs[0] = 9; xs", "[9, 2, 3]"),
        ("let xs = [1, 2, 3]; xs[-1] += 10; xs", "[1, 2, 13]"),
        ("let h = {}; h[\"a\"] = 1; h[\"a\"] += 1; h", "{\"a\": 2}"),
    ]);
    assert_eq!(error_message("y = 1"), "name error: y is not defined");
    assert_eq!(
        error_message("let s = \"abc\"; s[0] = \"x\""),
        "type error: STRING object does not support item assignment"
    );
}

#[test]
fn function_objects() {
    assert_eq!(inspect("func(x) { x + 2; }"), "func(x)");
    assert_eq!(inspect("func add(a, b) { a + b }; add"), "func add(a, b)");
    let Object::Function(func) = eval("func(x, y) { x + y }") else {
        panic!("expected a function");
    };
    assert_eq!(func.params().len(), 2);
}

#[test]
fn function_application() {
    assert_all(&[
        ("let identity = func(x) { x; }; identity(5);", "5"),
        ("let identity = func(x) { return x; }; identity(5);", "5"),
        ("let double = func(x) { x * 2; }; double(5);", "10"),
        ("let add = func(x, y) { x + y; }; add(5, 5);", "10"),
        ("let add = func(x, y) { x + y; }; add(5 + 5, add(5, 5));", "20"),
        ("func(x) { x; }(5)", "5"),
        ("func fib(n) { if (n < 2) { return n } fib(n - 1) + fib(n - 2) }; fib(15)", "610"),
    ]);
}

#[test]
fn closures_capture_their_environment() {
    let source = "
        let newAdder = func(x) { func(y) { x + y } };
        let addTwo = newAdder(2);
        addTwo(2)";
    assert_eq!(inspect(source), "4");

    let counter = "
        let makeCounter = func() { let n = 0; func() { n++ } };
        let c = makeCounter();
        c(); c(); c()";
    assert_eq!(inspect(counter), "3");
}

#[test]
fn array_literals_and_indexing() {
    assert_all(&[
        ("[1, 2 * 2, 3 + 3]", "[1, 4, 6]"),
        ("[1, 2, 3][0]", "1"),
        ("[1, 2, 3][1]", "2"),
        ("let i = 0; [1][i];", "1"),
        ("[1, 2, 3][1 + 1];", "3"),
        ("let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];", "6"),
        ("[1, 2, 3][-1]", "3"),
        ("[1, 2, 3][-2]", "2"),
        ("[1, 2, 3][-3]", "1"),
        ("[1, 2, 3, 4][1:3]", "[2, 3]"),
        ("[1, 2, 3, 4][-2:]", "[3, 4]"),
        ("[1, 2, 3][2:1]", "[]"),
        ("[1, 2] + [3]", "[1, 2, 3]"),
    ]);
    assert_eq!(
        error_message("[1, 2, 3][-4]"),
        "index error: array index out of range: -4"
    );
    assert_eq!(
        error_message("[1, 2, 3][99]"),
        "index error: array index out of range: 99"
    );
}

#[test]
fn hash_literals() {
    let source = r#"
        let two = "two";
        let h = {"one": 10 - 9, two: 1 + 1, "thr" + "ee": 6 / 2, 4: 4, true: 5, false: 6};
        [h["one"], h["two"], h["three"], h[4], h[true], h[false], len(h)]"#;
    assert_eq!(inspect(source), "[1, 2, 3, 4, 5, 6, 6]");
    assert_eq!(inspect("{\"b\": 2, \"a\": 1}"), "{\"a\": 1, \"b\": 2}");
    assert_eq!(inspect("{}"), "{}");
    assert_eq!(inspect("{1: \"x\"}[1.0]"), "\"x\"");
    assert_eq!(error_message("{\"foo\": 1}[\"bar\"]"), "key error: bar");
    assert_eq!(
        error_message("{[1]: 2}"),
        "type error: unhashable type: ARRAY"
    );
}

#[test]
fn set_literals() {
    assert_eq!(inspect("{1, 2, 3}"), "{1, 2, 3}");
    assert_eq!(inspect("{3, 1, 3, 2}"), "{1, 2, 3}");
    assert_eq!(inspect("len({1, 1.0, 2})"), "2");
    assert_eq!(inspect("{1, 2} == {2, 1}"), "true");
    assert_eq!(
        error_message("{1, [2]}"),
        "type error: unhashable type: ARRAY"
    );

    let Object::Set(items) = eval("{1, 2, 3}") else {
        panic!("expected a set");
    };
    let items = items.borrow();
    assert_eq!(items.len(), 3);
    for n in 1..=3 {
        assert!(items[&HashKey::Int(n)].equals(&Object::Integer(n)), "member {n}");
    }
}

#[test]
fn self_referencing_arrays() {
    assert_all(&[
        ("let a = [1]; a.append(a); a", "[1, [...]]"),
        ("let a = [1]; a.append(a); a.append(a); a", "[1, [...], [...]]"),
        ("let a = [1]; a.append(a); let b = [1]; b.append(b); a == b", "true"),
        ("let h = {}; h[\"me\"] = h; h", "{\"me\": {...}}"),
    ]);
}

#[test]
fn attributes_on_containers() {
    assert_all(&[
        ("let xs = [1]; xs.append(2, 3); xs", "[1, 2, 3]"),
        ("let xs = [1, 2]; xs.pop()", "2"),
        ("let h = {\"a\": 1}; h.get(\"a\")", "1"),
        ("let h = {\"a\": 1}; h.get(\"b\", 0)", "0"),
        ("{\"b\": 1, \"a\": 2}.keys()", "[\"a\", \"b\"]"),
        ("let s = {1}; s.add(2); s.contains(2)", "true"),
        ("\"Hi\".upper()", "\"HI\""),
        ("\"a,b\".split(\",\")", "[\"a\", \"b\"]"),
    ]);
    assert_eq!(
        error_message("5.foo"),
        "type error: INTEGER object has no attribute \"foo\""
    );
}

#[test]
fn durations() {
    assert_all(&[
        ("duration.parse(\"1h30m\")", "duration(1h30m0s)"),
        ("duration.parse(\"1s\") + duration.parse(\"500ms\")", "duration(1.5s)"),
        ("duration.parse(\"1s\") > duration.parse(\"999ms\")", "true"),
        ("duration.parse(\"90m\").hours()", "1.5"),
        ("-duration.parse(\"1s\")", "duration(-1s)"),
    ]);
    assert_eq!(
        error_message("duration.parse(\"soon\")"),
        "value error: invalid duration \"soon\""
    );
}

#[test]
fn error_messages() {
    let cases = [
        ("5 + true;", "type error: unsupported operand types for +: INTEGER and BOOLEAN"),
        ("5 + true; 5;", "type error: unsupported operand types for +: INTEGER and BOOLEAN"),
        ("-true", "type error: bad operand type for unary -: BOOLEAN"),
        ("true + false;", "type error: unsupported operand types for +: BOOLEAN and BOOLEAN"),
        ("5; true + false; 5", "type error: unsupported operand types for +: BOOLEAN and BOOLEAN"),
        (
            "if (10 > 1) { true + false; }",
            "type error: unsupported operand types for +: BOOLEAN and BOOLEAN",
        ),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "type error: unsupported operand types for +: BOOLEAN and BOOLEAN",
        ),
        ("foobar", "name error: foobar is not defined"),
        (
            "\"Hello\" - \"World\"",
            "type error: unsupported operand types for -: STRING and STRING",
        ),
        ("1 == \"1\"", "type error: unsupported operand types for ==: INTEGER and STRING"),
        ("\"foo\"[4]", "index error: string index out of range: 4"),
        ("1 / 0", "value error: division by zero"),
        ("5(1)", "type error: INTEGER object is not callable"),
        ("func(a) { a }(1, 2)", "wrong number of arguments. got=2, want=1"),
    ];
    for (source, expected) in cases {
        assert_eq!(error_message(source), expected, "source: {source}");
    }
}

#[test]
fn errors_stop_evaluation_and_keep_their_kind() {
    let result = eval("let x = 1; x = 1 / 0; x = 5; x");
    let err = result.as_error().expect("division error");
    assert_eq!(err.kind(), ErrorKind::Value);

    let result = eval("let f = func() { missing }; f(); 10");
    assert_eq!(result.as_error().map(crate::EvalError::kind), Some(ErrorKind::Name));
}
