//! Call-stack tracking for backtraces and the recursion limit.

use std::fmt;
use std::sync::Arc;

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// One active call: who was called, and where from.
///
/// `Send`, so the same frames can be handed to a debugger on another thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackFrame {
    /// Function or class name.
    pub name: String,
    pub file: Arc<str>,
    /// Line of the call site.
    pub line: u32,
}

impl StackFrame {
    pub fn new(name: impl Into<String>, file: Arc<str>, line: u32) -> Self {
        StackFrame {
            name: name.into(),
            file,
            line,
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.name, self.file, self.line)
    }
}

/// Live call stack of the interpreter.
///
/// Each function call or class instantiation pushes a frame and pops it on
/// every exit path. The depth limit is checked in `push()`.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<StackFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `None` means unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: StackFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Frames, most recent call first.
    pub fn frames(&self) -> impl Iterator<Item = &StackFrame> {
        self.frames.iter().rev()
    }

    /// Snapshot the stack as an `EvalBacktrace`, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        EvalBacktrace::new(
            self.frames()
                .map(|f| BacktraceFrame {
                    name: f.name.clone(),
                    file: f.file.to_string(),
                    line: f.line,
                })
                .collect(),
        )
    }

    /// Attach the current backtrace unless the error already carries one.
    #[must_use]
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

#[cfg(test)]
mod tests;
