//! Member grammar shared by declaration bodies: fields, methods,
//! constructors, and parameter lists.

use super::Parser;
use crate::ast::{
    Annotation, Direction, FieldDecl, MethodDecl, Modifier, ParameterDecl, Span, TypeReference,
};
use crate::error::ParseError;
use crate::lexer::Token;

/// A parsed body member. Which kinds a body accepts is decided by the
/// enclosing declaration's parser.
#[derive(Debug)]
pub(crate) enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_member(&mut self) -> Result<Member, ParseError> {
        let start = self.cur_span();
        let doc = self.cur_doc();
        let (annotations, modifiers) = self.parse_decl_prefix()?;

        // Constructor: a bare name directly followed by '('.
        if matches!(self.peek(), Token::Ident(_)) && self.peek_at(1) == &Token::LParen {
            let name = self.take_ident()?;
            return self.finish_method(start, doc, annotations, modifiers, None, name);
        }

        let ty = self.parse_type_ref()?;
        let name = self.take_ident()?;
        if self.peek() == &Token::LParen {
            self.finish_method(start, doc, annotations, modifiers, Some(ty), name)
        } else {
            self.finish_field(start, doc, annotations, modifiers, ty, name)
        }
    }

    fn finish_field(
        &mut self,
        start: Span,
        doc: Option<String>,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
        ty: TypeReference,
        name: String,
    ) -> Result<Member, ParseError> {
        let value = if self.eat_token(&Token::Assign) {
            Some(self.parse_constant()?)
        } else {
            None
        };
        self.expect_token(&Token::Semi, "';'")?;
        Ok(Member::Field(FieldDecl {
            name,
            ty,
            value,
            modifiers,
            annotations,
            documentation: doc,
            span: self.span_from(start),
        }))
    }

    fn finish_method(
        &mut self,
        start: Span,
        doc: Option<String>,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
        return_type: Option<TypeReference>,
        name: String,
    ) -> Result<Member, ParseError> {
        self.expect_token(&Token::LParen, "'('")?;
        let params = self.parse_parameter_list()?;
        self.expect_token(&Token::RParen, "')'")?;

        let transaction_code = if self.eat_token(&Token::Assign) {
            Some(self.take_transaction_code()?)
        } else {
            None
        };

        // Signatures end with ';'; an empty '{ }' body is accepted too.
        if self.eat_token(&Token::LBrace) {
            self.expect_token(&Token::RBrace, "'}'")?;
        } else {
            self.expect_token(&Token::Semi, "';' or '{'")?;
        }

        Ok(Member::Method(MethodDecl {
            name,
            return_type,
            params,
            transaction_code,
            modifiers,
            annotations,
            documentation: doc,
            span: self.span_from(start),
        }))
    }

    fn take_transaction_code(&mut self) -> Result<i64, ParseError> {
        if let Token::Int(n) = *self.peek() {
            self.advance();
            Ok(n)
        } else {
            Err(self.err_expected("an integer transaction code"))
        }
    }

    fn parse_parameter_list(&mut self) -> Result<Vec<ParameterDecl>, ParseError> {
        let mut params = Vec::new();
        if self.peek() == &Token::RParen {
            return Ok(params);
        }
        loop {
            params.push(self.parse_parameter()?);
            if !self.eat_token(&Token::Comma) {
                break;
            }
        }
        Ok(params)
    }

    pub(crate) fn parse_parameter(&mut self) -> Result<ParameterDecl, ParseError> {
        let start = self.cur_span();
        let mut annotations = Vec::new();
        let mut direction: Option<Direction> = None;
        loop {
            if self.peek() == &Token::At {
                annotations.push(self.parse_annotation()?);
                continue;
            }
            if let Token::Keyword(w) = self.peek().clone() {
                if let Some(d) = Direction::from_keyword(&w) {
                    if direction.is_some() {
                        return Err(ParseError::DuplicateDirectionalTag {
                            pos: self.cur_pos(),
                        });
                    }
                    self.advance();
                    direction = Some(d);
                    continue;
                }
            }
            break;
        }
        let ty = self.parse_type_ref()?;
        let name = self.take_ident()?;
        Ok(ParameterDecl {
            name,
            ty,
            direction,
            annotations,
            span: self.span_from(start),
        })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
