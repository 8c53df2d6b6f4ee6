//! Expression parsing.
//!
//! One method per precedence level, lowest first: assignment, `??`, `||`,
//! `&&`, equality, comparison, additive, multiplicative, unary, postfix and
//! primary.

use std::rc::Rc;

use vesper_ir::{
    BinaryOp, CompareOp, Expr, ExprKind, LogicalOp, MemberProperty, ObjectProperty, Span,
};
use vesper_lexer::TokenKind;
use vesper_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

/// Key text for a numeric object key: integral values drop the fraction.
pub(crate) fn number_key(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn compare(op: CompareOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Logical {
            op,
            left: Some(Box::new(left)),
            right: Box::new(right),
        },
        span,
    )
}

impl Parser {
    /// Parse an expression, including assignment.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input does not
    /// overflow the native stack.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    /// `target = value`, right-associative.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_coalesce()?;
        if !self.cursor.check(&TokenKind::Eq) {
            return Ok(target);
        }
        if !matches!(
            target.kind,
            ExprKind::Identifier(_) | ExprKind::Member { .. }
        ) {
            return Err(ParseError::invalid_assignment_target(target.span));
        }
        self.cursor.advance();
        let value = self.parse_expression()?;
        let span = target.span.merge(value.span);
        Ok(Expr::new(
            ExprKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    /// Expression without a top-level assignment; used for pattern defaults.
    pub(crate) fn parse_non_assignment(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_coalesce())
    }

    fn parse_coalesce(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_or()?;
        while self.cursor.eat(&TokenKind::Coalesce) {
            let right = self.parse_or()?;
            left = logical(LogicalOp::NilCoalesce, left, right);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.cursor.eat(&TokenKind::OrOr) {
            let right = self.parse_and()?;
            left = logical(LogicalOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.cursor.eat(&TokenKind::AndAnd) {
            let right = self.parse_equality()?;
            left = logical(LogicalOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::EqEq => CompareOp::Eq,
                TokenKind::NotEq => CompareOp::NotEq,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_comparison()?;
            left = compare(op, left, right);
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Lt => CompareOp::Lt,
                TokenKind::LtEq => CompareOp::LtEq,
                TokenKind::Gt => CompareOp::Gt,
                TokenKind::GtEq => CompareOp::GtEq,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_additive()?;
            left = compare(op, left, right);
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
    }

    /// `!x` becomes a unary logical node; `-x` is sugar for `0 - x`, folded
    /// into the literal when `x` is a number.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Bang => {
                self.cursor.advance();
                let operand = ensure_sufficient_stack(|| self.parse_unary())?;
                let span = start.merge(operand.span);
                Ok(Expr::new(
                    ExprKind::Logical {
                        op: LogicalOp::Not,
                        left: None,
                        right: Box::new(operand),
                    },
                    span,
                ))
            }
            TokenKind::Minus => {
                self.cursor.advance();
                let operand = ensure_sufficient_stack(|| self.parse_unary())?;
                let span = start.merge(operand.span);
                if let ExprKind::Number(n) = operand.kind {
                    return Ok(Expr::new(ExprKind::Number(-n), span));
                }
                let zero = Expr::new(ExprKind::Number(0.0), Span::point(start.start));
                let mut expr = binary(BinaryOp::Sub, zero, operand);
                expr.span = span;
                Ok(expr)
            }
            _ => self.parse_postfix(),
        }
    }

    /// Calls, indexing and dotted access.
    ///
    /// `(` and `[` only continue the expression on the same line.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::LParen if !self.cursor.at_line_start() => {
                    self.cursor.advance();
                    let args = self.parse_arguments()?;
                    let span = expr.span.merge(self.cursor.previous_span());
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::LBracket if !self.cursor.at_line_start() => {
                    self.cursor.advance();
                    let index = self.parse_expression()?;
                    self.cursor.expect(&TokenKind::RBracket)?;
                    let span = expr.span.merge(self.cursor.previous_span());
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberProperty::Computed(Box::new(index)),
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.cursor.advance();
                    let (name, name_span) = self.cursor.expect_ident()?;
                    let span = expr.span.merge(name_span);
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberProperty::Named(name),
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Arguments after the opening `(`, through the closing `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            args.push(self.parse_expression()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Number(n) => {
                let n = *n;
                self.cursor.advance();
                ExprKind::Number(n)
            }
            TokenKind::String(s) => {
                let s = s.clone();
                self.cursor.advance();
                ExprKind::String(s)
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.cursor.advance();
                ExprKind::Identifier(name)
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expression()?;
                self.cursor.expect(&TokenKind::RParen)?;
                // Parentheses only group; the inner node keeps its own span.
                return Ok(inner);
            }
            TokenKind::LBracket => ExprKind::Array(self.parse_array_literal()?),
            TokenKind::LBrace => ExprKind::Object(self.parse_object_literal()?),
            TokenKind::Fn => {
                self.cursor.advance();
                ExprKind::Function(Rc::new(self.parse_function_rest(start)?))
            }
            other => return Err(ParseError::unexpected("expression", other, start)),
        };
        Ok(Expr::new(kind, self.span_from(start)))
    }

    fn parse_array_literal(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.cursor.check(&TokenKind::RBracket) {
            elements.push(self.parse_expression()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBracket)?;
        Ok(elements)
    }

    /// `{ key: value, shorthand, "quoted": v, 1: v }`
    fn parse_object_literal(&mut self) -> Result<Vec<ObjectProperty>, ParseError> {
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut properties = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            let start = self.cursor.current_span();
            let (key, shorthand_ok) = match self.cursor.current_kind() {
                TokenKind::Ident(name) => (name.clone(), true),
                TokenKind::String(s) => (s.clone(), false),
                TokenKind::Number(n) => (number_key(*n), false),
                other => return Err(ParseError::unexpected("property key", other, start)),
            };
            self.cursor.advance();

            let value = if self.cursor.eat(&TokenKind::Colon) {
                self.parse_expression()?
            } else if shorthand_ok {
                Expr::new(ExprKind::Identifier(key.clone()), start)
            } else {
                return Err(ParseError::unexpected(
                    "':'",
                    self.cursor.current_kind(),
                    self.cursor.current_span(),
                ));
            };
            properties.push(ObjectProperty {
                key,
                value,
                span: self.span_from(start),
            });

            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(properties)
    }
}
