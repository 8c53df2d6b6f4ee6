//! Lexer error type.

use vesper_ir::Position;

/// Lexing stops at the first error; there is no partial token stream.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {pos}")]
    UnexpectedCharacter { ch: char, pos: Position },

    #[error("Unterminated string literal starting at {pos}")]
    UnterminatedString { pos: Position },

    #[error("Unterminated block comment starting at {pos}")]
    UnterminatedComment { pos: Position },

    #[error("Invalid escape sequence '{escape}' at {pos}")]
    InvalidEscape { escape: String, pos: Position },

    #[error("Malformed number '{literal}' at {pos}")]
    MalformedNumber { literal: String, pos: Position },
}

impl LexError {
    /// Where the offending input starts.
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { pos, .. }
            | LexError::UnterminatedString { pos }
            | LexError::UnterminatedComment { pos }
            | LexError::InvalidEscape { pos, .. }
            | LexError::MalformedNumber { pos, .. } => *pos,
        }
    }
}
