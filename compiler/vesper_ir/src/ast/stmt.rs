//! Statement Types
//!
//! Statement node, declarations and the program root.

use std::fmt;
use std::rc::Rc;

use super::expr::Expr;
use super::patterns::DestructurePattern;
use crate::{NodeKind, Span, Spanned};

/// Root of a parsed source file.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    /// Debugger classification of this node.
    ///
    /// Expression statements report the kind of the wrapped expression.
    pub fn node_kind(&self) -> NodeKind {
        match &self.kind {
            StmtKind::VarDeclaration(_) => NodeKind::VarDeclaration,
            StmtKind::DestructureDeclaration(_) => NodeKind::DestructureDeclaration,
            StmtKind::FnDeclaration(_) => NodeKind::FnDeclaration,
            StmtKind::Class(_) => NodeKind::Class,
            StmtKind::If(_) => NodeKind::If,
            StmtKind::While(_) => NodeKind::While,
            StmtKind::TryCatch(_) => NodeKind::TryCatch,
            StmtKind::Return(_) => NodeKind::Return,
            StmtKind::Break => NodeKind::Break,
            StmtKind::Continue => NodeKind::Continue,
            StmtKind::Expression(expr) => expr.node_kind(),
        }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// Statement kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    VarDeclaration(VarDeclaration),
    DestructureDeclaration(DestructureDeclaration),
    FnDeclaration(Rc<FunctionDecl>),
    Class(Rc<ClassDecl>),
    If(IfStatement),
    While(WhileLoop),
    TryCatch(TryCatch),
    Return(Option<Expr>),
    Break,
    Continue,
    Expression(Expr),
}

/// `let name = value` / `const name = value`
#[derive(Clone, PartialEq, Debug)]
pub struct VarDeclaration {
    pub name: String,
    /// `None` for `let name` without an initializer.
    pub value: Option<Expr>,
    pub constant: bool,
}

/// `let {a, b} = value` / `const [x, ...rest] = value`
#[derive(Clone, PartialEq, Debug)]
pub struct DestructureDeclaration {
    pub pattern: DestructurePattern,
    pub value: Expr,
    pub constant: bool,
}

/// Function declaration or expression.
///
/// Shared behind `Rc` so every closure created from it points at one body.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionDecl {
    /// Empty for anonymous functions.
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl FunctionDecl {
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct ClassDecl {
    pub name: String,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

impl ClassDecl {
    /// Method named `constructor`, if the class declares one.
    pub fn constructor(&self) -> Option<&Rc<FunctionDecl>> {
        self.members.iter().find_map(|member| match &member.kind {
            ClassMemberKind::Method(decl) if decl.name == "constructor" => Some(decl),
            _ => None,
        })
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct ClassMember {
    pub kind: ClassMemberKind,
    /// Declared with `pub`.
    pub is_public: bool,
    pub span: Span,
}

impl ClassMember {
    pub fn name(&self) -> &str {
        match &self.kind {
            ClassMemberKind::Method(decl) => &decl.name,
            ClassMemberKind::Property(decl) => &decl.name,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ClassMemberKind {
    Method(Rc<FunctionDecl>),
    Property(VarDeclaration),
}

#[derive(Clone, PartialEq, Debug)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Vec<Stmt>,
    pub else_ifs: Vec<ElseIf>,
    pub else_branch: Option<Vec<Stmt>>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ElseIf {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct WhileLoop {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TryCatch {
    pub body: Vec<Stmt>,
    /// `catch e { .. }` binds `e`; `catch { .. }` binds nothing.
    pub param: Option<String>,
    pub handler: Vec<Stmt>,
}
