use pretty_assertions::assert_eq;
use vesper_ir::{ClassMemberKind, ExprKind, NodeKind, Position, StmtKind};

use super::{parse_err, parse_ok, single_stmt};
use crate::ParseErrorKind;

#[test]
fn test_var_declarations() {
    let StmtKind::VarDeclaration(decl) = single_stmt("let x = 1").kind else {
        panic!("expected declaration");
    };
    assert_eq!(decl.name, "x");
    assert!(!decl.constant);
    assert_eq!(decl.value.map(|v| v.kind), Some(ExprKind::Number(1.0)));

    let StmtKind::VarDeclaration(decl) = single_stmt("const y = 'a'").kind else {
        panic!("expected declaration");
    };
    assert!(decl.constant);
}

#[test]
fn test_let_without_value() {
    let StmtKind::VarDeclaration(decl) = single_stmt("let pending").kind else {
        panic!("expected declaration");
    };
    assert!(decl.value.is_none());
}

#[test]
fn test_const_requires_value() {
    let err = parse_err("const x");
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }));
}

#[test]
fn test_function_declaration() {
    let stmt = single_stmt("fn add(a, b,) {\n  a + b\n}");
    assert_eq!(stmt.node_kind(), NodeKind::FnDeclaration);
    let StmtKind::FnDeclaration(decl) = stmt.kind else {
        panic!("expected function declaration");
    };
    assert_eq!(decl.name, "add");
    assert_eq!(decl.params, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(decl.body.len(), 1);
    assert_eq!(decl.span.end, Position::new(3, 2));
}

#[test]
fn test_if_else_chain() {
    let source = "if a { 1 } else if b { 2 } else if c { 3 } else { 4 }";
    let StmtKind::If(stmt) = single_stmt(source).kind else {
        panic!("expected if");
    };
    assert_eq!(stmt.then_branch.len(), 1);
    assert_eq!(stmt.else_ifs.len(), 2);
    assert_eq!(stmt.else_branch.map(|b| b.len()), Some(1));
}

#[test]
fn test_if_without_else() {
    let StmtKind::If(stmt) = single_stmt("if (x < 5) { x = x + 1 }").kind else {
        panic!("expected if");
    };
    assert!(stmt.else_ifs.is_empty());
    assert!(stmt.else_branch.is_none());
}

#[test]
fn test_while_loop() {
    let source = "while (x < 5) { if (x == 3) { break }\nx = x + 1 }";
    let StmtKind::While(stmt) = single_stmt(source).kind else {
        panic!("expected while");
    };
    assert_eq!(stmt.body.len(), 2);
    assert_eq!(stmt.body[0].node_kind(), NodeKind::If);
    assert_eq!(stmt.body[1].node_kind(), NodeKind::Assignment);
}

#[test]
fn test_try_catch() {
    let StmtKind::TryCatch(stmt) = single_stmt("try { risky() } catch e { e }").kind else {
        panic!("expected try");
    };
    assert_eq!(stmt.param.as_deref(), Some("e"));
    assert_eq!(stmt.handler.len(), 1);

    let StmtKind::TryCatch(stmt) = single_stmt("try { risky() } catch { }").kind else {
        panic!("expected try");
    };
    assert!(stmt.param.is_none());
    assert!(stmt.handler.is_empty());
}

#[test]
fn test_return_value_rules() {
    let program = parse_ok("fn f() {\n  return\n  42\n}");
    let StmtKind::FnDeclaration(decl) = &program.body[0].kind else {
        panic!("expected function");
    };
    assert_eq!(decl.body.len(), 2);
    assert!(matches!(decl.body[0].kind, StmtKind::Return(None)));

    let program = parse_ok("fn f() { return }");
    let StmtKind::FnDeclaration(decl) = &program.body[0].kind else {
        panic!("expected function");
    };
    assert!(matches!(decl.body[0].kind, StmtKind::Return(None)));

    let program = parse_ok("fn f() { return 1 + 2; }");
    let StmtKind::FnDeclaration(decl) = &program.body[0].kind else {
        panic!("expected function");
    };
    assert!(matches!(decl.body[0].kind, StmtKind::Return(Some(_))));
}

#[test]
fn test_semicolons_are_optional_separators() {
    let program = parse_ok("let a = 1; let b = 2;;\na + b");
    assert_eq!(program.body.len(), 3);
}

#[test]
fn test_class_declaration() {
    let source = "class Point {\n  pub let x = 0\n  let secret = 1\n  fn constructor(x) { this_x = x }\n  pub fn len() { x }\n}";
    let StmtKind::Class(class) = single_stmt(source).kind else {
        panic!("expected class");
    };
    assert_eq!(class.name, "Point");
    let summary: Vec<_> = class
        .members
        .iter()
        .map(|m| {
            let kind = match m.kind {
                ClassMemberKind::Method(_) => "fn",
                ClassMemberKind::Property(_) => "let",
            };
            (kind, m.name().to_string(), m.is_public)
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("let", "x".to_string(), true),
            ("let", "secret".to_string(), false),
            ("fn", "constructor".to_string(), false),
            ("fn", "len".to_string(), true),
        ]
    );
    assert!(class.constructor().is_some());
}

#[test]
fn test_invalid_class_member() {
    let err = parse_err("class A { x = 1 }");
    assert!(matches!(err.kind, ParseErrorKind::InvalidClassMember { .. }));
    assert_eq!(err.span.start, Position::new(1, 11));
}

#[test]
fn test_unclosed_block() {
    let err = parse_err("while x { x = 1");
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }));
}

#[test]
fn test_program_span() {
    let program = parse_ok("let a = 1\nlet b = 22");
    assert_eq!(program.span.start, Position::new(1, 1));
    assert_eq!(program.span.end, Position::new(2, 11));
    assert_eq!(program.body[1].span.start, Position::new(2, 1));
}

#[test]
fn test_empty_program() {
    let program = parse_ok("  // nothing here\n");
    assert!(program.body.is_empty());
}
