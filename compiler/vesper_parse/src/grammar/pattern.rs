//! Destructuring pattern parsing.

use vesper_ir::{
    ArrayPattern, ArrayPatternElement, DestructurePattern, ObjectPattern, ObjectPatternProperty,
    PatternTarget,
};
use vesper_lexer::TokenKind;

use super::expr::number_key;
use crate::{ParseError, Parser};

impl Parser {
    /// Parse an object or array pattern at the current `{` / `[`.
    pub(crate) fn parse_pattern(&mut self) -> Result<DestructurePattern, ParseError> {
        vesper_stack::ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::LBrace => self.parse_object_pattern().map(DestructurePattern::Object),
            TokenKind::LBracket => self.parse_array_pattern().map(DestructurePattern::Array),
            other => Err(ParseError::unexpected(
                "destructuring pattern",
                other,
                self.cursor.current_span(),
            )),
        })
    }

    /// A name or a nested pattern.
    fn parse_pattern_target(&mut self) -> Result<PatternTarget, ParseError> {
        if self.cursor.check_ident() {
            let (name, _) = self.cursor.expect_ident()?;
            Ok(PatternTarget::Identifier(name))
        } else {
            Ok(PatternTarget::Pattern(Box::new(self.parse_pattern()?)))
        }
    }

    /// `...name`, which must be followed (after an optional comma) by `close`.
    fn parse_rest(&mut self, close: &TokenKind) -> Result<String, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(&TokenKind::Ellipsis)?;
        let (name, _) = self.cursor.expect_ident()?;
        let rest_span = self.span_from(start);
        self.cursor.eat(&TokenKind::Comma);
        if !self.cursor.check(close) {
            return Err(ParseError::misplaced_rest(rest_span));
        }
        Ok(name)
    }

    fn parse_object_pattern(&mut self) -> Result<ObjectPattern, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut properties = Vec::new();
        let mut rest = None;

        while !self.cursor.check(&TokenKind::RBrace) {
            if self.cursor.check(&TokenKind::Ellipsis) {
                rest = Some(self.parse_rest(&TokenKind::RBrace)?);
                break;
            }

            let prop_start = self.cursor.current_span();
            let (key, shorthand_ok) = match self.cursor.current_kind() {
                TokenKind::Ident(name) => (name.clone(), true),
                TokenKind::String(s) => (s.clone(), false),
                TokenKind::Number(n) => (number_key(*n), false),
                other => return Err(ParseError::unexpected("property key", other, prop_start)),
            };
            self.cursor.advance();

            let target = if self.cursor.eat(&TokenKind::Colon) {
                self.parse_pattern_target()?
            } else if shorthand_ok {
                PatternTarget::Identifier(key.clone())
            } else {
                return Err(ParseError::unexpected(
                    "':'",
                    self.cursor.current_kind(),
                    self.cursor.current_span(),
                ));
            };
            let default = if self.cursor.eat(&TokenKind::Eq) {
                Some(self.parse_non_assignment()?)
            } else {
                None
            };
            properties.push(ObjectPatternProperty {
                key,
                target,
                default,
                span: self.span_from(prop_start),
            });

            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }

        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(ObjectPattern {
            properties,
            rest,
            span: self.span_from(start),
        })
    }

    /// Empty slots (`[a, , b]`) are recorded as `None`.
    fn parse_array_pattern(&mut self) -> Result<ArrayPattern, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        let mut rest = None;

        loop {
            match self.cursor.current_kind() {
                TokenKind::RBracket => break,
                TokenKind::Comma => {
                    self.cursor.advance();
                    elements.push(None);
                    continue;
                }
                TokenKind::Ellipsis => {
                    rest = Some(self.parse_rest(&TokenKind::RBracket)?);
                    break;
                }
                _ => {}
            }

            let elem_start = self.cursor.current_span();
            let target = self.parse_pattern_target()?;
            let default = if self.cursor.eat(&TokenKind::Eq) {
                Some(self.parse_non_assignment()?)
            } else {
                None
            };
            elements.push(Some(ArrayPatternElement {
                target,
                default,
                span: self.span_from(elem_start),
            }));

            if !self.cursor.check(&TokenKind::RBracket) {
                self.cursor.expect(&TokenKind::Comma)?;
            }
        }

        self.cursor.expect(&TokenKind::RBracket)?;
        Ok(ArrayPattern {
            elements,
            rest,
            span: self.span_from(start),
        })
    }
}
