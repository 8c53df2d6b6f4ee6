//! Recursive descent parser for Vesper.
//!
//! Consumes the lexer's token stream and produces a boxed `Program` tree.
//! Parsing stops at the first error; there is no recovery and no partial AST.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use tracing::debug;
use vesper_ir::{Program, Span};
use vesper_lexer::Token;

/// Lex and parse a source text.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = vesper_lexer::lex(source)?;
    parse_tokens(tokens)
}

/// Parse an already-lexed token stream.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Parser state.
pub struct Parser {
    cursor: Cursor,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse statements until end of input.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let start = self.cursor.current_span();
        let mut body = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
        }
        let span = if body.is_empty() {
            start
        } else {
            start.merge(self.cursor.previous_span())
        };
        debug!(statements = body.len(), "parsed program");
        Ok(Program { body, span })
    }

    /// Span from `start` through the last consumed token.
    #[inline]
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }
}

#[cfg(test)]
mod tests;
