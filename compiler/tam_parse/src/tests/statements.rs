//! Statement parsing tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::parse;
use pretty_assertions::assert_eq;
use tam_ir::{ExprKind, Program, StmtKind};

fn stmt_kinds(program: &Program) -> Vec<StmtKind> {
    program
        .statements()
        .iter()
        .map(|id| program.arena.get_stmt(*id).kind.clone())
        .collect()
}

#[test]
fn test_let_and_semicolons_are_optional() {
    let program = parse("let x = 5\nlet y = 10; x + y").unwrap();
    let kinds = stmt_kinds(&program);
    assert_eq!(kinds.len(), 3);
    assert!(matches!(&kinds[0], StmtKind::Let { name, .. } if name.as_str() == "x"));
    assert!(matches!(&kinds[1], StmtKind::Let { name, .. } if name.as_str() == "y"));
    assert!(matches!(kinds[2], StmtKind::Expr(_)));
}

#[test]
fn test_return_forms() {
    let program = parse("return 10; 9;").unwrap();
    let kinds = stmt_kinds(&program);
    assert!(matches!(kinds[0], StmtKind::Return(Some(_))));
    assert!(matches!(kinds[1], StmtKind::Expr(_)));

    let program = parse("func() { return }").unwrap();
    let StmtKind::Expr(func) = stmt_kinds(&program)[0] else {
        panic!("expected expression");
    };
    let ExprKind::Function { body, .. } = program.arena.get_expr(func).kind else {
        panic!("expected function");
    };
    let inner = program.arena.get_stmt_list(body)[0];
    assert_eq!(program.arena.get_stmt(inner).kind, StmtKind::Return(None));
}

#[test]
fn test_func_declaration() {
    let program = parse("func add(a, b) { a + b }\nadd(1, 2)").unwrap();
    let kinds = stmt_kinds(&program);
    let StmtKind::FuncDecl { name, func } = &kinds[0] else {
        panic!("expected declaration, got {:?}", kinds[0]);
    };
    assert_eq!(name.as_str(), "add");
    assert!(matches!(
        &program.arena.get_expr(*func).kind,
        ExprKind::Function { name: Some(n), .. } if n.as_str() == "add"
    ));
}

#[test]
fn test_for_condition_form() {
    let program = parse("for (x < 100) { x++ }").unwrap();
    let StmtKind::For {
        init,
        condition,
        post,
        body,
    } = stmt_kinds(&program)[0]
    else {
        panic!("expected for");
    };
    assert!(init.is_none());
    assert!(condition.is_some());
    assert!(post.is_none());
    assert_eq!(body.len(), 1);
}

#[test]
fn test_for_c_form() {
    let program = parse("for (let i = 0; i < 10; i++) { sum += i }").unwrap();
    let StmtKind::For {
        init,
        condition,
        post,
        ..
    } = stmt_kinds(&program)[0]
    else {
        panic!("expected for");
    };
    let init = program.arena.get_stmt(init.unwrap());
    assert!(matches!(init.kind, StmtKind::Let { .. }));
    assert!(condition.is_some());
    assert!(post.is_some());

    let program = parse("for (;;) { break }").unwrap();
    let StmtKind::For {
        init,
        condition,
        post,
        ..
    } = stmt_kinds(&program)[0]
    else {
        panic!("expected for");
    };
    assert!(init.is_none() && condition.is_none() && post.is_none());
}

#[test]
fn test_infinite_for() {
    let program = parse("for { break }").unwrap();
    assert!(matches!(
        stmt_kinds(&program)[0],
        StmtKind::For {
            condition: None,
            ..
        }
    ));
}

#[test]
fn test_break_outside_loop() {
    let err = parse("break").unwrap_err();
    assert_eq!(err.message, "`break` outside of a loop");

    let err = parse("for { func() { continue } }").unwrap_err();
    assert_eq!(err.message, "`continue` outside of a loop");
}

#[test]
fn test_break_inside_nested_if() {
    assert!(parse("for (true) { if (x) { break } else { continue } }").is_ok());
}

#[test]
fn test_unclosed_block() {
    let err = parse("if (x) { 1").unwrap_err();
    assert_eq!(err.message, "expected `}`, found end of input");
}

#[test]
fn test_comments_are_ignored() {
    let program = parse("# setup\nlet a = 1 // one\n// done").unwrap();
    assert_eq!(program.statements().len(), 1);
}

#[test]
fn test_empty_program() {
    let program = parse("").unwrap();
    assert!(program.statements().is_empty());
}
