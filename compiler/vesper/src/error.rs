use vesper_eval::EvalError;
use vesper_lexer::LexError;
use vesper_parse::ParseError;

/// Failure in any phase of running a program.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// The runtime error, if evaluation is what failed.
    pub fn as_eval(&self) -> Option<&EvalError> {
        match self {
            Error::Eval(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the source was rejected before it ran.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Lex(_) | Error::Parse(_))
    }
}
