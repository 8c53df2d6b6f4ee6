//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use tracing::trace;
use vesper_ir::Span;
use vesper_lexer::{Token, TokenKind};

use crate::ParseError;

/// Cursor over an owned token stream.
///
/// Invariant: the stream is never empty and its last token is `Eof`.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    /// Create a cursor, appending `Eof` if the stream lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(&TokenKind::Eof)) {
            let end = tokens.last().map_or(Span::DUMMY, |t| Span::point(t.span.end));
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Kind of the token `offset` places ahead, saturating at `Eof`.
    pub fn peek_kind(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check the current token's kind, ignoring literal payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Whether the current token starts on a later line than the previous
    /// token ended.
    pub fn at_line_start(&self) -> bool {
        self.pos > 0 && self.current_span().start.line > self.previous_span().end.line
    }

    /// Consume the current token. `Eof` is never consumed.
    pub fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            trace!(token = ?self.tokens[self.pos].kind, "advance");
            self.pos += 1;
            return &self.tokens[self.pos - 1];
        }
        &self.tokens[self.pos]
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::unexpected(
                format!("'{}'", kind.symbol()),
                self.current_kind(),
                self.current_span(),
            ))
        }
    }

    /// Consume an identifier, returning its name and span.
    pub fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            let span = self.advance().span;
            Ok((name, span))
        } else {
            Err(ParseError::unexpected(
                "identifier",
                self.current_kind(),
                self.current_span(),
            ))
        }
    }
}
