//! Runtime error types and the control-flow signal carried alongside them.
//!
//! `return`, `break` and `continue` travel up the evaluator as `EvalError`s
//! tagged with a `ControlFlow`. Genuine failures have no tag. The function
//! call boundary intercepts `Return`, the loop boundary intercepts `Break` and
//! `Continue`, and `try`/`catch` only ever intercepts untagged errors.
//!
//! Factory functions (e.g. `unresolved_variable()`) are the public API for
//! building errors; they fill in both `kind` and `message`.

use std::fmt;

use vesper_ir::Span;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Control-flow signals for return, break and continue.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlFlow {
    /// `return` with an optional value.
    Return(Option<Value>),
    Break,
    Continue,
}

/// Typed error category.
///
/// The `Display` impl produces the message shown after the `Runtime Error: `
/// prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Environment
    RedeclarationError {
        name: String,
    },
    UnresolvedVariableError {
        name: String,
    },
    ConstantReassignmentError {
        name: String,
    },

    // Operators and access
    TypeMismatch {
        operator: String,
        left: String,
        right: String,
    },
    NotCallable {
        type_name: String,
    },
    InvalidMemberAccess {
        type_name: String,
        property: String,
    },
    NegativeIndex {
        index: i64,
    },
    InvalidIndex {
        type_name: String,
    },
    IndexTooLarge {
        limit: usize,
    },
    InvalidKey {
        type_name: String,
    },
    DestructureMismatch {
        expected: String,
        got: String,
    },

    // Classes
    MissingConstructor {
        class: String,
    },
    ConstructorReturn,
    PrivateMember {
        name: String,
    },

    // Control flow
    LoopControlOutsideLoop {
        keyword: &'static str,
    },
    StackOverflow {
        depth: usize,
    },

    /// Catch-all used by `EvalError::new` and host-provided native functions.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedeclarationError { name } => {
                write!(f, "Cannot redeclare variable '{name}' in the same scope")
            }
            Self::UnresolvedVariableError { name } => {
                write!(f, "Cannot resolve variable '{name}'")
            }
            Self::ConstantReassignmentError { name } => {
                write!(f, "Cannot reassign constant '{name}'")
            }

            Self::TypeMismatch {
                operator,
                left,
                right,
            } => write!(f, "Cannot apply '{operator}' to {left} and {right}"),
            Self::NotCallable { type_name } => {
                write!(f, "Cannot invoke a non-function value of type {type_name}")
            }
            Self::InvalidMemberAccess {
                type_name,
                property,
            } => write!(f, "Cannot access member '{property}' of {type_name}"),
            Self::NegativeIndex { index } => {
                write!(f, "Cannot assign to negative array index {index}")
            }
            Self::InvalidIndex { type_name } => {
                write!(f, "Array index must be a Number, got {type_name}")
            }
            Self::IndexTooLarge { limit } => {
                write!(f, "Array index exceeds the maximum array length {limit}")
            }
            Self::InvalidKey { type_name } => {
                write!(f, "Object key must be a String or Number, got {type_name}")
            }
            Self::DestructureMismatch { expected, got } => {
                write!(f, "Cannot destructure {got} with an {expected} pattern")
            }

            Self::MissingConstructor { class } => {
                write!(f, "Class '{class}' has no constructor")
            }
            Self::ConstructorReturn => write!(f, "constructor cannot return a value"),
            Self::PrivateMember { name } => {
                write!(f, "Cannot assign to private member '{name}'")
            }

            Self::LoopControlOutsideLoop { keyword } => {
                write!(f, "`{keyword}` statement used outside of a loop context.")
            }
            Self::StackOverflow { depth } => {
                write!(f, "Maximum call depth of {depth} exceeded")
            }

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function or class name.
    pub name: String,
    pub file: String,
    /// Line of the call site.
    pub line: u32,
}

/// Snapshot of the call stack at an error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} at {}:{}", frame.name, frame.file, frame.line)?;
        }
        Ok(())
    }
}

/// Evaluation error.
///
/// Displays as `Runtime Error: <message>`, which is also the text a script
/// sees in its `catch` variable.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Set when this is a control-flow signal rather than a failure.
    pub control_flow: Option<ControlFlow>,
    /// Innermost node being evaluated when the error was raised.
    pub span: Option<Span>,
    /// Call stack at the error site, attached by the innermost call that saw it.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_kind(EvalErrorKind::Custom { message })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            control_flow: None,
            span: None,
            backtrace: None,
        }
    }

    fn signal(label: &str, flow: ControlFlow) -> Self {
        let mut error = Self::new(label);
        error.control_flow = Some(flow);
        error
    }

    /// Create a return signal.
    pub fn return_with(value: Option<Value>) -> Self {
        Self::signal("return", ControlFlow::Return(value))
    }

    /// Create a break signal.
    pub fn break_signal() -> Self {
        Self::signal("break", ControlFlow::Break)
    }

    /// Create a continue signal.
    pub fn continue_signal() -> Self {
        Self::signal("continue", ControlFlow::Continue)
    }

    /// Attach a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a backtrace to this error.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Check if this error is a control flow signal.
    #[inline]
    pub fn is_control_flow(&self) -> bool {
        self.control_flow.is_some()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Runtime Error: {}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Environment Errors

/// Name declared twice in one scope.
#[cold]
pub fn redeclaration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RedeclarationError {
        name: name.to_string(),
    })
}

/// Name not found anywhere in the scope chain.
#[cold]
pub fn unresolved_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnresolvedVariableError {
        name: name.to_string(),
    })
}

#[cold]
pub fn constant_reassignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantReassignmentError {
        name: name.to_string(),
    })
}

// Operator and Access Errors

/// Operands of an arithmetic or comparison operator are not both Numbers.
#[cold]
pub fn binary_type_mismatch(operator: &str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        operator: operator.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn invalid_member_access(type_name: &str, property: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidMemberAccess {
        type_name: type_name.to_string(),
        property: property.to_string(),
    })
}

#[cold]
pub fn negative_index(index: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeIndex { index })
}

#[cold]
pub fn invalid_index(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndex {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn index_too_large(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexTooLarge { limit })
}

#[cold]
pub fn invalid_key(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidKey {
        type_name: type_name.to_string(),
    })
}

/// Destructuring source does not fit the pattern (`Object` or `Array`).
#[cold]
pub fn destructure_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DestructureMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

// Class Errors

#[cold]
pub fn missing_constructor(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingConstructor {
        class: class.to_string(),
    })
}

#[cold]
pub fn constructor_return() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstructorReturn)
}

/// Write to a member that the class does not mark `pub`.
#[cold]
pub fn private_member(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PrivateMember {
        name: name.to_string(),
    })
}

// Control Flow Errors

/// `break` or `continue` evaluated with no enclosing loop.
///
/// Untagged, so `try`/`catch` can intercept it.
#[cold]
pub fn loop_control_outside_loop(keyword: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LoopControlOutsideLoop { keyword })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

/// How a loop reacts to the outcome of one iteration.
pub enum LoopAction {
    Continue,
    Break,
    Error(EvalError),
}

/// Convert an error escaping a loop body into a `LoopAction`.
///
/// `Return` signals and genuine errors leave the loop untouched.
pub fn to_loop_action(error: EvalError) -> LoopAction {
    match error.control_flow {
        Some(ControlFlow::Continue) => LoopAction::Continue,
        Some(ControlFlow::Break) => LoopAction::Break,
        Some(ControlFlow::Return(_)) | None => LoopAction::Error(error),
    }
}

#[cfg(test)]
mod tests;
