//! Destructuring patterns.
//!
//! At most one rest capture per pattern, and it is always last. The parser
//! enforces that; the types encode it by keeping `rest` out of the element
//! lists.

use super::expr::Expr;
use crate::Span;

#[derive(Clone, PartialEq, Debug)]
pub enum DestructurePattern {
    Object(ObjectPattern),
    Array(ArrayPattern),
}

impl DestructurePattern {
    pub fn span(&self) -> Span {
        match self {
            DestructurePattern::Object(p) => p.span,
            DestructurePattern::Array(p) => p.span,
        }
    }

    /// Every name this pattern binds, in source order.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            DestructurePattern::Object(p) => {
                for prop in &p.properties {
                    prop.target.collect_names(out);
                }
                if let Some(rest) = &p.rest {
                    out.push(rest);
                }
            }
            DestructurePattern::Array(p) => {
                for elem in p.elements.iter().flatten() {
                    elem.target.collect_names(out);
                }
                if let Some(rest) = &p.rest {
                    out.push(rest);
                }
            }
        }
    }
}

/// Where a matched value goes: a name, or a further pattern.
#[derive(Clone, PartialEq, Debug)]
pub enum PatternTarget {
    Identifier(String),
    Pattern(Box<DestructurePattern>),
}

impl PatternTarget {
    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            PatternTarget::Identifier(name) => out.push(name),
            PatternTarget::Pattern(pattern) => pattern.collect_names(out),
        }
    }
}

/// `{ a, b: renamed, c: { nested } = {}, ...rest }`
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectPattern {
    pub properties: Vec<ObjectPatternProperty>,
    pub rest: Option<String>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ObjectPatternProperty {
    pub key: String,
    pub target: PatternTarget,
    /// Used when the key is absent or nil.
    pub default: Option<Expr>,
    pub span: Span,
}

/// `[a, , b = 2, [nested], ...rest]`
#[derive(Clone, PartialEq, Debug)]
pub struct ArrayPattern {
    /// `None` marks a skipped slot.
    pub elements: Vec<Option<ArrayPatternElement>>,
    pub rest: Option<String>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ArrayPatternElement {
    pub target: PatternTarget,
    /// Used when the index is past the end of the source.
    pub default: Option<Expr>,
    pub span: Span,
}
