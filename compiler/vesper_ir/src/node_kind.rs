//! Flat classification of AST variants.

use std::fmt;

/// The variant tag of a statement or expression node.
///
/// Debuggers receive this instead of the node itself, so they can decide
/// whether to stop without borrowing the tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    Program,
    VarDeclaration,
    DestructureDeclaration,
    FnDeclaration,
    Class,
    If,
    While,
    TryCatch,
    Return,
    Break,
    Continue,
    Assignment,
    Binary,
    Compare,
    Logical,
    Call,
    Member,
    Identifier,
    Number,
    String,
    Object,
    Array,
    Function,
}

impl NodeKind {
    /// Whether a debugger may stop before this node.
    ///
    /// Declarations, assignments, control flow, calls and the program root.
    pub const fn is_debuggable(self) -> bool {
        matches!(
            self,
            NodeKind::Program
                | NodeKind::VarDeclaration
                | NodeKind::DestructureDeclaration
                | NodeKind::FnDeclaration
                | NodeKind::Class
                | NodeKind::If
                | NodeKind::While
                | NodeKind::TryCatch
                | NodeKind::Return
                | NodeKind::Break
                | NodeKind::Continue
                | NodeKind::Assignment
                | NodeKind::Call
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::VarDeclaration => "VarDeclaration",
            NodeKind::DestructureDeclaration => "DestructureDeclaration",
            NodeKind::FnDeclaration => "FnDeclaration",
            NodeKind::Class => "Class",
            NodeKind::If => "IfStatement",
            NodeKind::While => "WhileLoop",
            NodeKind::TryCatch => "TryCatchStatement",
            NodeKind::Return => "ReturnStatement",
            NodeKind::Break => "BreakStatement",
            NodeKind::Continue => "ContinueStatement",
            NodeKind::Assignment => "VarAssignmentExpression",
            NodeKind::Binary => "BinaryExpression",
            NodeKind::Compare => "CompareExpression",
            NodeKind::Logical => "LogicalExpression",
            NodeKind::Call => "CallExpression",
            NodeKind::Member => "MemberExpression",
            NodeKind::Identifier => "Identifier",
            NodeKind::Number => "NumericLiteral",
            NodeKind::String => "StringLiteral",
            NodeKind::Object => "ObjectLiteral",
            NodeKind::Array => "ArrayLiteral",
            NodeKind::Function => "FunctionExpression",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
