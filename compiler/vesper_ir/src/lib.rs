//! Vesper IR - Source Positions and Syntax Tree
//!
//! This crate contains the data shared by every Vesper phase:
//! - `Position` and `Span` for line/column source locations
//! - AST nodes (`Program`, `Stmt`, `Expr`, destructuring patterns)
//! - `NodeKind`, the flat classification of AST variants used by debuggers
//!
//! # Design Philosophy
//!
//! - **Tree ownership**: every node is exclusively owned by its parent
//!   (`Box`/`Vec`). Function and class declarations sit behind `Rc` so runtime
//!   values can share a body without cloning it.
//! - **Immutable after parsing**: nothing here is mutated by the evaluator.
//! - **Spans everywhere**: each node carries the source range it came from.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod node_kind;
mod span;
mod traits;

pub use ast::{
    ArrayPattern, ArrayPatternElement, BinaryOp, ClassDecl, ClassMember, ClassMemberKind,
    CompareOp, DestructureDeclaration, DestructurePattern, ElseIf, Expr, ExprKind, FunctionDecl,
    IfStatement, LogicalOp, MemberProperty, ObjectPattern, ObjectPatternProperty, ObjectProperty,
    PatternTarget, Program, Stmt, StmtKind, TryCatch, VarDeclaration, WhileLoop,
};
pub use node_kind::NodeKind;
pub use span::{Position, Span};
pub use traits::Spanned;
