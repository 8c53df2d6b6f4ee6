//! Parser tests.
//!
//! - `expr`: precedence, unary sugar, postfix forms, literals
//! - `stmt`: declarations, control flow, classes, programs
//! - `pattern`: destructuring patterns and rest placement

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod stmt;

use vesper_ir::{Expr, Program, Stmt, StmtKind};

use crate::{parse, ParseError};

pub(super) fn parse_ok(source: &str) -> Program {
    parse(source).unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"))
}

pub(super) fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(program) => panic!("expected parse error for {source:?}, got {program:?}"),
        Err(e) => e,
    }
}

/// The single statement of a one-statement program.
pub(super) fn single_stmt(source: &str) -> Stmt {
    let mut program = parse_ok(source);
    assert_eq!(program.body.len(), 1, "expected one statement in {source:?}");
    program.body.remove(0)
}

/// The expression of a one-statement expression program.
pub(super) fn single_expr(source: &str) -> Expr {
    match single_stmt(source).kind {
        StmtKind::Expression(expr) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}
