//! Type references: qualified names, generic arguments, array suffixes.
//!
//! The ordering is fixed by the grammar: generic arguments attach right
//! after the name, array suffixes come last. `Foo[]<Bar>` is not a type
//! reference; parsing stops after the suffixes and the stray `<` trips the
//! caller's next expectation.

use super::Parser;
use crate::ast::{BoundKind, Span, TypeArgument, TypeReference, WildcardBound};
use crate::error::ParseError;
use crate::lexer::Token;
use crate::tables;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type_ref(&mut self) -> Result<TypeReference, ParseError> {
        let start = self.cur_span();

        // Primitive names arrive as keywords.
        if let Token::Keyword(w) = self.peek().clone() {
            if tables::is_primitive(&w) {
                self.advance();
                let base = TypeReference::Primitive {
                    name: w,
                    span: self.span_from(start),
                };
                return self.finish_array_suffixes(base, start);
            }
            return Err(self.err_expected("a type"));
        }

        let name = self.qualified_name()?;
        let base = if self.peek() == &Token::Lt {
            let args = self.parse_type_args()?;
            TypeReference::Generic {
                name,
                args,
                span: self.span_from(start),
            }
        } else {
            TypeReference::Reference {
                name,
                span: self.span_from(start),
            }
        };
        self.finish_array_suffixes(base, start)
    }

    fn finish_array_suffixes(
        &mut self,
        base: TypeReference,
        start: Span,
    ) -> Result<TypeReference, ParseError> {
        let mut dims = 0usize;
        while self.peek() == &Token::LBracket {
            self.advance();
            self.expect_token(&Token::RBracket, "']'")?;
            dims += 1;
        }
        if dims == 0 {
            return Ok(base);
        }
        Ok(TypeReference::Array {
            element: Box::new(base),
            dims,
            span: self.span_from(start),
        })
    }

    fn parse_type_args(&mut self) -> Result<Vec<TypeArgument>, ParseError> {
        self.expect_token(&Token::Lt, "'<'")?;
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type_arg()?);
            if !self.eat_token(&Token::Comma) {
                break;
            }
        }
        self.expect_token(&Token::Gt, "'>'")?;
        Ok(args)
    }

    fn parse_type_arg(&mut self) -> Result<TypeArgument, ParseError> {
        if self.peek() == &Token::Question {
            let start = self.cur_span();
            self.advance();
            let bound = if self.eat_keyword("extends") {
                Some(WildcardBound {
                    kind: BoundKind::Extends,
                    ty: self.parse_type_ref()?,
                })
            } else if self.eat_keyword("super") {
                Some(WildcardBound {
                    kind: BoundKind::Super,
                    ty: self.parse_type_ref()?,
                })
            } else {
                None
            };
            return Ok(TypeArgument::Wildcard {
                bound,
                span: self.span_from(start),
            });
        }
        Ok(TypeArgument::Type(self.parse_type_ref()?))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
