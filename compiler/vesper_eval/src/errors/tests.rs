#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vesper_ir::{Position, Span};

use super::*;

#[test]
fn display_has_runtime_error_prefix() {
    let err = unresolved_variable("x");
    assert_eq!(err.to_string(), "Runtime Error: Cannot resolve variable 'x'");
    assert_eq!(err.message, "Cannot resolve variable 'x'");
}

#[test]
fn factory_sets_kind_and_message() {
    let err = binary_type_mismatch("+", "String", "Number");
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            operator: "+".to_string(),
            left: "String".to_string(),
            right: "Number".to_string(),
        }
    );
    assert_eq!(err.message, "Cannot apply '+' to String and Number");
    assert!(!err.is_control_flow());
}

#[test]
fn loop_control_messages() {
    assert_eq!(
        loop_control_outside_loop("break").message,
        "`break` statement used outside of a loop context."
    );
    assert_eq!(
        loop_control_outside_loop("continue").message,
        "`continue` statement used outside of a loop context."
    );
}

#[test]
fn constructor_return_message() {
    assert_eq!(
        constructor_return().to_string(),
        "Runtime Error: constructor cannot return a value"
    );
}

#[test]
fn custom_error() {
    let err = EvalError::new("boom");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "boom".to_string()
        }
    );
    assert_eq!(err.to_string(), "Runtime Error: boom");
}

#[test]
fn signals_are_control_flow() {
    assert!(EvalError::break_signal().is_control_flow());
    assert!(EvalError::continue_signal().is_control_flow());
    let ret = EvalError::return_with(Some(Value::Number(1.0)));
    assert_eq!(
        ret.control_flow,
        Some(ControlFlow::Return(Some(Value::Number(1.0))))
    );
}

#[test]
fn loop_action_conversion() {
    assert!(matches!(
        to_loop_action(EvalError::continue_signal()),
        LoopAction::Continue
    ));
    assert!(matches!(
        to_loop_action(EvalError::break_signal()),
        LoopAction::Break
    ));
    assert!(matches!(
        to_loop_action(EvalError::return_with(None)),
        LoopAction::Error(e) if e.is_control_flow()
    ));
    assert!(matches!(
        to_loop_action(unresolved_variable("y")),
        LoopAction::Error(e) if !e.is_control_flow()
    ));
}

#[test]
fn with_span_and_backtrace() {
    let span = Span::new(Position::new(2, 5), Position::new(2, 9));
    let backtrace = EvalBacktrace::new(vec![BacktraceFrame {
        name: "f".to_string(),
        file: "<main>".to_string(),
        line: 3,
    }]);
    let err = EvalError::new("x")
        .with_span(span)
        .with_backtrace(backtrace.clone());
    assert_eq!(err.span, Some(span));
    assert_eq!(err.backtrace, Some(backtrace));
}

#[test]
fn backtrace_display() {
    let backtrace = EvalBacktrace::new(vec![
        BacktraceFrame {
            name: "inner".to_string(),
            file: "main.vsp".to_string(),
            line: 4,
        },
        BacktraceFrame {
            name: "outer".to_string(),
            file: "main.vsp".to_string(),
            line: 9,
        },
    ]);
    assert_eq!(backtrace.len(), 2);
    assert_eq!(
        backtrace.to_string(),
        "stack backtrace:\n  0: inner at main.vsp:4\n  1: outer at main.vsp:9\n"
    );
    assert_eq!(EvalBacktrace::default().to_string(), "");
    assert!(EvalBacktrace::default().is_empty());
}
