//! Class declaration parsing.

use std::rc::Rc;

use vesper_ir::{ClassDecl, ClassMember, ClassMemberKind};
use vesper_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser {
    /// `class Name { member* }`
    pub(crate) fn parse_class(&mut self) -> Result<ClassDecl, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.expect(&TokenKind::Class)?;
        let (name, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::LBrace)?;

        let mut members = Vec::new();
        loop {
            while self.cursor.eat(&TokenKind::Semicolon) {}
            if self.cursor.check(&TokenKind::RBrace) {
                break;
            }
            members.push(self.parse_class_member()?);
        }
        self.cursor.expect(&TokenKind::RBrace)?;

        Ok(ClassDecl {
            name,
            members,
            span: self.span_from(start),
        })
    }

    /// `pub`? then a method or a `let`/`const` property.
    fn parse_class_member(&mut self) -> Result<ClassMember, ParseError> {
        let start = self.cursor.current_span();
        let is_public = self.cursor.eat(&TokenKind::Pub);
        let member_start = self.cursor.current_span();

        let kind = match self.cursor.current_kind() {
            TokenKind::Fn => {
                self.cursor.advance();
                if !self.cursor.check_ident() {
                    return Err(ParseError::unexpected(
                        "method name",
                        self.cursor.current_kind(),
                        self.cursor.current_span(),
                    ));
                }
                ClassMemberKind::Method(Rc::new(self.parse_function_rest(member_start)?))
            }
            TokenKind::Let | TokenKind::Const => {
                let constant = self.cursor.check(&TokenKind::Const);
                self.cursor.advance();
                ClassMemberKind::Property(self.parse_binding(constant)?)
            }
            other => return Err(ParseError::invalid_class_member(other, member_start)),
        };

        Ok(ClassMember {
            kind,
            is_public,
            span: self.span_from(start),
        })
    }
}
