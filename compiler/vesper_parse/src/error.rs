//! Parse error types.

use std::fmt;

use vesper_ir::Span;
use vesper_lexer::{LexError, TokenKind};

/// A syntax error with the location of the offending token.
///
/// Rendered as `Syntax Error: <message> at <line>:<column>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("Rest element must be the last element of a destructuring pattern")]
    MisplacedRest,

    #[error("Invalid class member: expected a method or property, found {found}")]
    InvalidClassMember { found: String },

    /// Produced by `parse`, which lexes first.
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    /// Mismatch between what the grammar wanted and the token found.
    #[cold]
    pub fn unexpected(expected: impl Into<String>, found: &TokenKind, span: Span) -> Self {
        let expected = expected.into();
        let kind = if matches!(found, TokenKind::Eof) {
            ParseErrorKind::UnexpectedEof { expected }
        } else {
            ParseErrorKind::UnexpectedToken {
                expected,
                found: found.describe(),
            }
        };
        ParseError { kind, span }
    }

    #[cold]
    pub fn invalid_assignment_target(span: Span) -> Self {
        ParseError::new(ParseErrorKind::InvalidAssignmentTarget, span)
    }

    #[cold]
    pub fn misplaced_rest(span: Span) -> Self {
        ParseError::new(ParseErrorKind::MisplacedRest, span)
    }

    #[cold]
    pub fn invalid_class_member(found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::InvalidClassMember {
                found: found.describe(),
            },
            span,
        )
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let span = Span::point(err.position());
        ParseError::new(ParseErrorKind::Lex(err), span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            // Lex messages already carry their position.
            ParseErrorKind::Lex(err) => write!(f, "Syntax Error: {err}"),
            kind => write!(f, "Syntax Error: {kind} at {}", self.span),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Lex(err) => Some(err),
            _ => None,
        }
    }
}
