#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;

fn frame(name: &str, line: u32) -> StackFrame {
    StackFrame::new(name, Arc::from("main.vsp"), line)
}

#[test]
fn push_pop_depth() {
    let mut stack = CallStack::new(None);
    assert!(stack.is_empty());
    stack.push(frame("a", 1)).unwrap();
    stack.push(frame("b", 2)).unwrap();
    assert_eq!(stack.depth(), 2);
    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn push_past_limit_fails_without_pushing() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame("a", 1)).unwrap();
    stack.push(frame("b", 1)).unwrap();
    let err = stack.push(frame("c", 1)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
    assert_eq!(stack.depth(), 2);
}

#[test]
fn capture_is_most_recent_first() {
    let mut stack = CallStack::new(None);
    stack.push(frame("outer", 3)).unwrap();
    stack.push(frame("inner", 7)).unwrap();
    let backtrace = stack.capture();
    let names: Vec<&str> = backtrace.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["inner", "outer"]);
    assert_eq!(backtrace.frames()[0].line, 7);
    assert_eq!(backtrace.frames()[0].file, "main.vsp");
}

#[test]
fn attach_backtrace_keeps_existing() {
    let mut stack = CallStack::new(None);
    stack.push(frame("f", 1)).unwrap();
    let err = stack.attach_backtrace(EvalError::new("x"));
    assert_eq!(err.backtrace.as_ref().map(EvalBacktrace::len), Some(1));

    stack.push(frame("g", 2)).unwrap();
    let err = stack.attach_backtrace(err);
    assert_eq!(err.backtrace.as_ref().map(EvalBacktrace::len), Some(1));
}

#[test]
fn frame_display() {
    assert_eq!(frame("f", 4).to_string(), "f at main.vsp:4");
}
