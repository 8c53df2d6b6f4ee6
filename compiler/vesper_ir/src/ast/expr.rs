//! Expression Types
//!
//! Expression node and variants.

use std::fmt;
use std::rc::Rc;

use super::operators::{BinaryOp, CompareOp, LogicalOp};
use super::stmt::FunctionDecl;
use crate::{NodeKind, Span, Spanned};

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Debugger classification of this node.
    pub fn node_kind(&self) -> NodeKind {
        match &self.kind {
            ExprKind::Assignment { .. } => NodeKind::Assignment,
            ExprKind::Binary { .. } => NodeKind::Binary,
            ExprKind::Compare { .. } => NodeKind::Compare,
            ExprKind::Logical { .. } => NodeKind::Logical,
            ExprKind::Call { .. } => NodeKind::Call,
            ExprKind::Member { .. } => NodeKind::Member,
            ExprKind::Identifier(_) => NodeKind::Identifier,
            ExprKind::Number(_) => NodeKind::Number,
            ExprKind::String(_) => NodeKind::String,
            ExprKind::Object(_) => NodeKind::Object,
            ExprKind::Array(_) => NodeKind::Array,
            ExprKind::Function(_) => NodeKind::Function,
        }
    }

    /// Identifier name, if this expression is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression variants.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// `target = value`; the target is an identifier or member expression.
    Assignment { target: Box<Expr>, value: Box<Expr> },

    /// Arithmetic: `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `left` is `None` only for `!`.
    Logical {
        op: LogicalOp,
        left: Option<Box<Expr>>,
        right: Box<Expr>,
    },

    Call { callee: Box<Expr>, args: Vec<Expr> },

    /// `object.name` or `object[expr]`
    Member {
        object: Box<Expr>,
        property: MemberProperty,
    },

    Identifier(String),

    Number(f64),

    /// Decoded string contents, without quotes.
    String(String),

    Object(Vec<ObjectProperty>),

    Array(Vec<Expr>),

    /// Anonymous or named function expression.
    Function(Rc<FunctionDecl>),
}

/// The property part of a member expression.
#[derive(Clone, PartialEq, Debug)]
pub enum MemberProperty {
    /// Dotted access: `a.b`
    Named(String),
    /// Bracketed access: `a[expr]`
    Computed(Box<Expr>),
}

impl MemberProperty {
    pub fn is_computed(&self) -> bool {
        matches!(self, MemberProperty::Computed(_))
    }
}

/// `key: value` entry in an object literal.
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Expr,
    pub span: Span,
}
