//! Statement parsing.

use std::rc::Rc;

use vesper_ir::{
    DestructureDeclaration, ElseIf, FunctionDecl, IfStatement, Span, Stmt, StmtKind, TryCatch,
    VarDeclaration, WhileLoop,
};
use vesper_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser {
    /// Parse one statement. A bare `;` yields `None`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Semicolon => {
                self.cursor.advance();
                return Ok(None);
            }
            TokenKind::Let | TokenKind::Const => self.parse_var_declaration()?,
            TokenKind::Fn if matches!(self.cursor.peek_kind(1), TokenKind::Ident(_)) => {
                self.cursor.advance();
                StmtKind::FnDeclaration(Rc::new(self.parse_function_rest(start)?))
            }
            TokenKind::Class => StmtKind::Class(Rc::new(self.parse_class()?)),
            TokenKind::If => StmtKind::If(self.parse_if()?),
            TokenKind::While => {
                self.cursor.advance();
                let condition = self.parse_expression()?;
                let body = self.parse_block()?;
                StmtKind::While(WhileLoop { condition, body })
            }
            TokenKind::Try => StmtKind::TryCatch(self.parse_try()?),
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.return_has_value() {
                    Some(self.parse_expression()?)
                } else {
                    None
                };
                StmtKind::Return(value)
            }
            TokenKind::Break => {
                self.cursor.advance();
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.cursor.advance();
                StmtKind::Continue
            }
            _ => StmtKind::Expression(self.parse_expression()?),
        };
        Ok(Some(Stmt::new(kind, self.span_from(start))))
    }

    /// `return` takes a value unless the statement visibly ends here.
    fn return_has_value(&self) -> bool {
        !self.cursor.at_line_start()
            && !matches!(
                self.cursor.current_kind(),
                TokenKind::RBrace | TokenKind::Semicolon | TokenKind::Eof
            )
    }

    /// `let`/`const` followed by a name or a destructuring pattern.
    fn parse_var_declaration(&mut self) -> Result<StmtKind, ParseError> {
        let constant = self.cursor.check(&TokenKind::Const);
        self.cursor.advance();

        if matches!(
            self.cursor.current_kind(),
            TokenKind::LBrace | TokenKind::LBracket
        ) {
            let pattern = self.parse_pattern()?;
            self.cursor.expect(&TokenKind::Eq)?;
            let value = self.parse_expression()?;
            return Ok(StmtKind::DestructureDeclaration(DestructureDeclaration {
                pattern,
                value,
                constant,
            }));
        }

        Ok(StmtKind::VarDeclaration(self.parse_binding(constant)?))
    }

    /// `name (= value)?`; a constant must be initialized.
    pub(crate) fn parse_binding(&mut self, constant: bool) -> Result<VarDeclaration, ParseError> {
        let (name, _) = self.cursor.expect_ident()?;
        let value = if constant || self.cursor.check(&TokenKind::Eq) {
            self.cursor.expect(&TokenKind::Eq)?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(VarDeclaration {
            name,
            value,
            constant,
        })
    }

    /// Everything after `fn`: optional name, parameters and body.
    pub(crate) fn parse_function_rest(&mut self, start: Span) -> Result<FunctionDecl, ParseError> {
        let name = if self.cursor.check_ident() {
            self.cursor.expect_ident()?.0
        } else {
            String::new()
        };
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(FunctionDecl {
            name,
            params,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_params(&mut self) -> Result<Vec<String>, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.cursor.check(&TokenKind::RParen) {
            params.push(self.cursor.expect_ident()?.0);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unexpected(
                    "'}'",
                    self.cursor.current_kind(),
                    self.cursor.current_span(),
                ));
            }
            if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(body)
    }

    fn parse_if(&mut self) -> Result<IfStatement, ParseError> {
        self.cursor.expect(&TokenKind::If)?;
        let condition = self.parse_expression()?;
        let then_branch = self.parse_block()?;

        let mut else_ifs = Vec::new();
        let mut else_branch = None;
        while self.cursor.check(&TokenKind::Else) {
            let start = self.cursor.current_span();
            self.cursor.advance();
            if self.cursor.eat(&TokenKind::If) {
                let condition = self.parse_expression()?;
                let body = self.parse_block()?;
                else_ifs.push(ElseIf {
                    condition,
                    body,
                    span: self.span_from(start),
                });
            } else {
                else_branch = Some(self.parse_block()?);
                break;
            }
        }

        Ok(IfStatement {
            condition,
            then_branch,
            else_ifs,
            else_branch,
        })
    }

    fn parse_try(&mut self) -> Result<TryCatch, ParseError> {
        self.cursor.expect(&TokenKind::Try)?;
        let body = self.parse_block()?;
        self.cursor.expect(&TokenKind::Catch)?;
        let param = if self.cursor.check_ident() {
            Some(self.cursor.expect_ident()?.0)
        } else {
            None
        };
        let handler = self.parse_block()?;
        Ok(TryCatch {
            body,
            param,
            handler,
        })
    }
}
