//! Lexer for Vesper using logos.
//!
//! Turns source text into a flat `Vec<Token>` terminated by `TokenKind::Eof`.
//! Whitespace and comments are dropped; every token keeps its exact source
//! slice and a 1-based line/column span.

mod escape;
mod lex_error;
mod line_index;
mod raw_token;
mod token;

use logos::Logos;
use tracing::debug;
use vesper_ir::{Position, Span};

use line_index::LineIndex;
use raw_token::RawToken;

pub use lex_error::LexError;
pub use token::{Token, TokenKind};

/// Lex `source` into tokens.
///
/// Stops at the first error.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).lex_all()
}

/// Lexer over a single source text.
pub struct Lexer<'src> {
    source: &'src str,
    lines: LineIndex<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            lines: LineIndex::new(source),
        }
    }

    /// Lex all tokens, appending a trailing `Eof`.
    pub fn lex_all(&self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut logos = RawToken::lexer(self.source);

        while let Some(result) = logos.next() {
            let range = logos.span();
            let slice = logos.slice();
            let span = Span::new(
                self.lines.position(range.start),
                self.lines.position(range.end),
            );

            let raw = match result {
                Ok(raw) => raw,
                Err(()) => return Err(Self::classify_error(slice, span)),
            };

            let kind = match raw {
                RawToken::LineComment | RawToken::BlockComment => continue,
                RawToken::UnterminatedString => {
                    return Err(LexError::UnterminatedString { pos: span.start })
                }
                RawToken::MalformedNumber => {
                    return Err(LexError::MalformedNumber {
                        literal: slice.to_string(),
                        pos: span.start,
                    })
                }
                _ => Self::convert_token(raw, slice, span)?,
            };
            tokens.push(Token::new(kind, slice, span));
        }

        let end = self.lines.position(self.source.len());
        tokens.push(Token::new(TokenKind::Eof, "", Span::point(end)));

        debug!(count = tokens.len(), "lexed source");
        Ok(tokens)
    }

    fn classify_error(slice: &str, span: Span) -> LexError {
        if slice.starts_with("/*") {
            return LexError::UnterminatedComment { pos: span.start };
        }
        LexError::UnexpectedCharacter {
            ch: slice.chars().next().unwrap_or('\0'),
            pos: span.start,
        }
    }

    /// Convert a raw token to a `TokenKind`, decoding literals.
    fn convert_token(
        raw: RawToken,
        slice: &str,
        span: Span,
    ) -> Result<TokenKind, LexError> {
        let kind = match raw {
            RawToken::Number => {
                let value = slice
                    .parse::<f64>()
                    .map_err(|_| LexError::MalformedNumber {
                        literal: slice.to_string(),
                        pos: span.start,
                    })?;
                TokenKind::Number(value)
            }
            RawToken::String => {
                let content = &slice[1..slice.len() - 1];
                let decoded = escape::unescape(content).map_err(|bad| {
                    // Escapes never span lines, so the column offset is exact.
                    let column = span.start.column as usize
                        + 1
                        + content[..bad.offset].chars().count();
                    LexError::InvalidEscape {
                        escape: bad.text,
                        pos: Position::new(span.start.line, column as u32),
                    }
                })?;
                TokenKind::String(decoded)
            }
            RawToken::Ident => TokenKind::Ident(slice.to_string()),

            RawToken::Let => TokenKind::Let,
            RawToken::Const => TokenKind::Const,
            RawToken::Fn => TokenKind::Fn,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::While => TokenKind::While,
            RawToken::Try => TokenKind::Try,
            RawToken::Catch => TokenKind::Catch,
            RawToken::Return => TokenKind::Return,
            RawToken::Break => TokenKind::Break,
            RawToken::Continue => TokenKind::Continue,
            RawToken::Class => TokenKind::Class,
            RawToken::Pub => TokenKind::Pub,

            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Ellipsis => TokenKind::Ellipsis,
            RawToken::Dot => TokenKind::Dot,

            RawToken::Eq => TokenKind::Eq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::AndAnd => TokenKind::AndAnd,
            RawToken::OrOr => TokenKind::OrOr,
            RawToken::Coalesce => TokenKind::Coalesce,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,

            RawToken::LineComment
            | RawToken::BlockComment
            | RawToken::UnterminatedString
            | RawToken::MalformedNumber => unreachable!("handled before conversion"),
        };
        Ok(kind)
    }
}
