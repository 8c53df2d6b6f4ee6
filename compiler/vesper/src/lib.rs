//! Vesper: a small dynamically-typed scripting language.
//!
//! This crate ties the phases together. `vesper_lexer` turns source text
//! into tokens, `vesper_parse` builds the `Program` tree and `vesper_eval`
//! walks it.
//!
//! ```text
//! source ──lex──> tokens ──parse──> Program ──evaluate──> Value
//! ```
//!
//! `run_source` runs one program in a fresh global environment. A `Session`
//! keeps its globals between runs, so host code can feed it several sources
//! and register native functions once.
//!
//! # Tracing
//!
//! Every phase logs through `tracing`. Call `init_tracing` and set
//! `RUST_LOG` (for example `RUST_LOG=vesper_eval=debug`) to see it.

mod error;
mod session;

use std::sync::Once;

pub use error::Error;
pub use session::Session;

pub use vesper_eval::{
    BacktraceFrame, DebugHook, Debugger, Environment, EvalBacktrace, EvalError, EvalErrorKind,
    EvalResult, ExecutionState, Interpreter, InterpreterBuilder, Location, Snapshot,
    SnapshotValue, StepMode, Value,
};
pub use vesper_ir::Program;
pub use vesper_lexer::LexError;
pub use vesper_parse::{ParseError, ParseErrorKind};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Lex and parse `source`.
///
/// Lexing finishes before parsing starts, so a lex error is reported as
/// `Error::Lex` rather than as a syntax error.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = vesper_lexer::lex(source)?;
    Ok(vesper_parse::parse_tokens(tokens)?)
}

/// Parse and evaluate `source` in a fresh global environment.
pub fn run_source(source: &str) -> Result<Value, Error> {
    let program = parse_source(source)?;
    Ok(Interpreter::new().evaluate_program(&program)?)
}
