//! Boxed AST types.
//!
//! # Module Structure
//!
//! - `expr`: expression nodes (`Expr`, `ExprKind`, object literal properties)
//! - `stmt`: statement nodes, declarations and the `Program` root
//! - `operators`: binary, comparison and logical operators
//! - `patterns`: destructuring patterns for `let`/`const`

mod expr;
mod operators;
mod patterns;
mod stmt;

pub use expr::{Expr, ExprKind, MemberProperty, ObjectProperty};
pub use operators::{BinaryOp, CompareOp, LogicalOp};
pub use patterns::{
    ArrayPattern, ArrayPatternElement, DestructurePattern, ObjectPattern, ObjectPatternProperty,
    PatternTarget,
};
pub use stmt::{
    ClassDecl, ClassMember, ClassMemberKind, DestructureDeclaration, ElseIf, FunctionDecl,
    IfStatement, Program, Stmt, StmtKind, TryCatch, VarDeclaration, WhileLoop,
};
