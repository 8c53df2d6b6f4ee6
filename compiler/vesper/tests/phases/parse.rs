//! Lex and syntax errors through the facade.

use pretty_assertions::assert_eq;
use vesper::{Error, LexError, ParseErrorKind, Value};

use crate::common::{num, run, run_err};

#[test]
fn lex_errors_are_reported_before_parsing() {
    let err = run_err("let s = 'never closed");
    assert!(matches!(err, Error::Lex(LexError::UnterminatedString { .. })));
    assert!(err.is_syntax());
    assert!(err.as_eval().is_none());

    assert!(matches!(
        run_err("let x = 1 # 2"),
        Error::Lex(LexError::UnexpectedCharacter { ch: '#', .. })
    ));
    assert!(matches!(
        run_err("/* open"),
        Error::Lex(LexError::UnterminatedComment { .. })
    ));
}

#[test]
fn syntax_errors() {
    let err = run_err("let = 5");
    let Error::Parse(parse) = &err else {
        panic!("expected a syntax error, got {err}");
    };
    assert!(matches!(parse.kind, ParseErrorKind::UnexpectedToken { .. }));
    assert!(err.to_string().starts_with("Syntax Error: "));
}

#[test]
fn invalid_assignment_target() {
    let Error::Parse(err) = run_err("1 = 2") else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
}

#[test]
fn rest_must_come_last() {
    for source in ["let [...a, b] = [1, 2]", "let {...a, b} = {}", "let [...a, ...b] = []"] {
        let Error::Parse(err) = run_err(source) else {
            panic!("expected a syntax error for {source:?}");
        };
        assert_eq!(err.kind, ParseErrorKind::MisplacedRest, "{source}");
    }
}

#[test]
fn nothing_runs_when_parsing_fails() {
    // The first statement would fail at runtime if it ran.
    assert!(run_err("missing\nlet = 1").is_syntax());
}

#[test]
fn comments_are_ignored() {
    assert_eq!(run("// leading\n1 /* inline */ + 2 // trailing"), num(3.0));
}

#[test]
fn string_literals() {
    assert_eq!(run(r#""double" "#), Value::string("double"));
    assert_eq!(run(r"'tab\there'"), Value::string("tab\there"));
    assert_eq!(run(r"'A\u{1F600}'"), Value::string("A\u{1F600}"));
    assert_eq!(run(r#"'it\'s'"#), Value::string("it's"));
}

#[test]
fn number_literals() {
    assert_eq!(run("1e3 + 0.5"), num(1000.5));
    assert_eq!(run("-2.5 * 2"), num(-5.0));
}

#[test]
fn empty_program_is_nil() {
    assert_eq!(run(""), Value::Nil);
    assert_eq!(run(";;\n// only a comment"), Value::Nil);
}
