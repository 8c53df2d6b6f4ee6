//! A debugger controlling an evaluator on another thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use vesper::{DebugHook, Debugger, ExecutionState, Session, SnapshotValue, Value};

const FILE: &str = "script.vsp";
const TIMEOUT: Duration = Duration::from_secs(2);

#[test]
fn pause_interrupts_running_program() {
    let debugger = Debugger::shared();
    let running = Arc::new(AtomicBool::new(true));

    let worker = {
        let hook = Arc::clone(&debugger) as Arc<dyn DebugHook>;
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut session = Session::with_debugger(FILE, hook);
            session
                .define_native("running", move |_, _| {
                    Ok(Value::Boolean(running.load(Ordering::SeqCst)))
                })
                .map_err(|e| e.to_string())?;
            session
                .run("let ticks = 0\nwhile (running()) {\nticks = ticks + 1\n}\nticks")
                .map(|v| v.to_string())
                .map_err(|e| e.to_string())
        })
    };

    debugger.pause();
    assert!(debugger.wait_until_paused(TIMEOUT));
    assert_eq!(debugger.execution_state(), ExecutionState::Paused);
    assert!(!worker.is_finished());

    running.store(false, Ordering::SeqCst);
    debugger.continue_();
    let ticks = worker.join().unwrap().unwrap();
    assert!(ticks.parse::<u64>().is_ok(), "{ticks}");
}

#[test]
fn breakpoint_then_step_through_function() {
    let source = "fn greet(name) {\n\
                    let message = 'hi ' + name\n\
                    return message\n\
                  }\n\
                  greet('a')";
    let debugger = Debugger::shared();
    debugger.set_breakpoint(FILE, 5);

    let worker = {
        let hook = Arc::clone(&debugger) as Arc<dyn DebugHook>;
        thread::spawn(move || {
            Session::with_debugger(FILE, hook)
                .run(source)
                .map(|v| v.to_string())
                .map_err(|e| e.to_string())
        })
    };

    assert!(debugger.wait_until_paused(TIMEOUT));
    assert_eq!(debugger.current_location().map(|l| l.line), Some(5));
    assert!(debugger.frames().is_empty());

    debugger.step_into();
    assert!(debugger.wait_until_paused(TIMEOUT));
    assert_eq!(debugger.current_location().map(|l| l.line), Some(2));
    let frames: Vec<String> = debugger.frames().iter().map(ToString::to_string).collect();
    assert_eq!(frames, vec![format!("greet at {FILE}:5")]);

    debugger.continue_();
    // String concatenation is a type error, so the run fails inside greet.
    let err = worker.join().unwrap().unwrap_err();
    assert_eq!(err, "Runtime Error: Cannot apply '+' to String and String");

    let snapshot = debugger.latest_snapshot().expect("snapshot of the failing call");
    assert_eq!(snapshot.frames[0].name, "greet");
    assert_eq!(
        snapshot.scope.get("name"),
        Some(&SnapshotValue::String("a".to_string()))
    );
    assert_eq!(snapshot.scope.get("message"), None);
}
