//! Sessions: globals that persist across runs.

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use vesper::{Error, EvalError, EvalErrorKind, Session, Value};

use crate::common::num;

#[test]
fn globals_persist_between_runs() {
    let mut session = Session::new();
    session.run("let total = 1\nfn add(n) { total = total + n }").unwrap();
    session.run("add(4)").unwrap();
    assert_eq!(session.run("total").unwrap(), num(5.0));
    assert_eq!(session.get("total"), Some(num(5.0)));
    assert_eq!(session.get("never"), None);
}

#[test]
fn redeclaring_global_in_later_run_fails() {
    let mut session = Session::new();
    session.run("let x = 1").unwrap();
    let err = session.run("let x = 2").unwrap_err();
    assert!(matches!(
        err.as_eval().map(|e| &e.kind),
        Some(EvalErrorKind::RedeclarationError { .. })
    ));
    assert_eq!(session.get("x"), Some(num(1.0)));
}

#[test]
fn failed_run_keeps_earlier_effects() {
    let mut session = Session::new();
    assert!(session.run("let a = 1\nmissing\nlet b = 2").is_err());
    assert_eq!(session.get("a"), Some(num(1.0)));
    assert_eq!(session.get("b"), None);
    assert!(session.run("let = 0").unwrap_err().is_syntax());
}

#[test]
fn native_functions() {
    let mut session = Session::new();
    session
        .define_native("len", |args, _env| match args.first() {
            Some(Value::Array(items)) => Ok(Value::Number(items.borrow().len() as f64)),
            Some(Value::String(s)) => Ok(Value::Number(s.chars().count() as f64)),
            Some(other) => Err(EvalError::new(format!(
                "len() expects an Array or String, got {}",
                other.type_name()
            ))),
            None => Err(EvalError::new("len() expects one argument")),
        })
        .unwrap();

    assert_eq!(session.run("len([1, 2, 3]) + len('ab')").unwrap(), num(5.0));
    assert_eq!(
        session.run("len(1)").unwrap_err().to_string(),
        "Runtime Error: len() expects an Array or String, got Number"
    );
    assert!(session.run("len = 0").is_err());
}

#[test]
fn natives_see_the_calling_scope() {
    let mut session = Session::new();
    session
        .define_native("lookup", |args, env| match args.first().and_then(Value::as_str) {
            Some(name) => env.lookup(name),
            None => Ok(Value::Nil),
        })
        .unwrap();
    let source = "fn f() { let local = 'seen'\nlookup('local') }\nf()";
    assert_eq!(session.run(source).unwrap(), Value::string("seen"));
}

#[test]
fn natives_can_keep_host_state() {
    let counter = Rc::new(Cell::new(0));
    let mut session = Session::new();
    let calls = Rc::clone(&counter);
    session
        .define_native("tick", move |_, _| {
            calls.set(calls.get() + 1);
            Ok(Value::Nil)
        })
        .unwrap();
    session.run("let i = 0\nwhile (i < 3) { tick()\ni = i + 1 }").unwrap();
    assert_eq!(counter.get(), 3);
}

#[test]
fn host_defines_and_calls() {
    let mut session = Session::with_file("host.vsp");
    session
        .define("config", Value::object_from([("scale", num(3.0))]), true)
        .unwrap();
    session.run("fn scaled(n) { n * config.scale }").unwrap();
    assert_eq!(session.call("scaled", vec![num(2.0)]).unwrap(), num(6.0));
    assert!(matches!(
        session.call("nothing", vec![]),
        Err(Error::Eval(_))
    ));
    assert_eq!(session.interpreter().file(), "host.vsp");
}

#[test]
fn fork_is_independent() {
    let mut session = Session::new();
    session
        .run("let count = 0\nlet log = []\nfn bump() { log[count] = count\ncount = count + 1 }")
        .unwrap();
    session.run("bump()").unwrap();

    let mut fork = session.fork();
    fork.run("bump()\nbump()").unwrap();
    assert_eq!(fork.get("count"), Some(num(3.0)));
    assert_eq!(fork.get("log").unwrap().to_string(), "[0, 1, 2]");

    assert_eq!(session.get("count"), Some(num(1.0)));
    assert_eq!(session.get("log").unwrap().to_string(), "[0]");
    session.run("bump()").unwrap();
    assert_eq!(fork.get("count"), Some(num(3.0)));
}

#[test]
fn fork_keeps_natives_and_aliasing() {
    let mut session = Session::new();
    session.define_native("one", |_, _| Ok(num(1.0))).unwrap();
    session.run("let a = [1]\nlet b = a").unwrap();

    let mut fork = session.fork();
    assert_eq!(fork.run("b[1] = one()\na").unwrap().to_string(), "[1, 1]");
    assert_eq!(session.get("a").unwrap().to_string(), "[1]");
}

#[test]
fn fork_keeps_limits() {
    let session = Session::from_interpreter(
        vesper::Interpreter::builder()
            .max_call_depth(Some(10))
            .build(),
    );
    let mut fork = session.fork();
    let err = fork.run("fn f() { f() }\nf()").unwrap_err();
    assert_eq!(
        err.as_eval().map(|e| e.kind.clone()),
        Some(EvalErrorKind::StackOverflow { depth: 10 })
    );
}
