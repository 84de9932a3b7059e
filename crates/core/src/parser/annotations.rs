//! Annotations and the literal constant subgrammar.
//!
//! Constants are literals with an optional unary sign; no identifier
//! references and no binary operators. Annotation names are accepted
//! without any semantic validation.

use super::Parser;
use crate::ast::{Annotation, AnnotationArg, Literal};
use crate::error::ParseError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    pub(super) fn parse_annotations(&mut self) -> Result<Vec<Annotation>, ParseError> {
        let mut out = Vec::new();
        while self.peek() == &Token::At {
            out.push(self.parse_annotation()?);
        }
        Ok(out)
    }

    pub(crate) fn parse_annotation(&mut self) -> Result<Annotation, ParseError> {
        let start = self.cur_span();
        self.expect_token(&Token::At, "'@'")?;
        let name = self.qualified_name()?;
        let mut args = Vec::new();
        if self.eat_token(&Token::LParen) {
            if self.peek() != &Token::RParen {
                // `@Name(key = value, …)` or the single-value shorthand;
                // a leading identifier followed by '=' selects the named form.
                if matches!(self.peek(), Token::Ident(_)) && self.peek_at(1) == &Token::Assign {
                    loop {
                        let key = self.take_ident()?;
                        self.expect_token(&Token::Assign, "'='")?;
                        let value = self.parse_constant()?;
                        args.push(AnnotationArg {
                            name: Some(key),
                            value,
                        });
                        if !self.eat_token(&Token::Comma) {
                            break;
                        }
                    }
                } else {
                    args.push(AnnotationArg {
                        name: None,
                        value: self.parse_constant()?,
                    });
                }
            }
            self.expect_token(&Token::RParen, "')'")?;
        }
        Ok(Annotation {
            name,
            args,
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_constant(&mut self) -> Result<Literal, ParseError> {
        let negative = if self.eat_token(&Token::Minus) {
            true
        } else if self.eat_token(&Token::Plus) {
            false
        } else {
            return self.parse_unsigned_literal();
        };
        // A sign only applies to numeric literals.
        match self.peek().clone() {
            Token::Int(n) => {
                self.advance();
                Ok(Literal::Int(if negative { -n } else { n }))
            }
            Token::Float(text) => {
                self.advance();
                Ok(Literal::Float(if negative {
                    format!("-{text}")
                } else {
                    text
                }))
            }
            _ => Err(self.err_expected("a numeric literal")),
        }
    }

    fn parse_unsigned_literal(&mut self) -> Result<Literal, ParseError> {
        let lit = match self.peek().clone() {
            Token::Int(n) => Literal::Int(n),
            Token::Float(text) => Literal::Float(text),
            Token::Str(s) => Literal::Str(s),
            Token::Char(c) => Literal::Char(c),
            Token::Bool(b) => Literal::Bool(b),
            Token::Null => Literal::Null,
            _ => return Err(self.err_expected("a literal value")),
        };
        self.advance();
        Ok(lit)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn annotation(src: &str) -> Annotation {
        let tokens = lexer::lex(src).unwrap();
        let mut p = Parser::new(&tokens);
        let a = p.parse_annotation().unwrap();
        p.expect_eof().unwrap();
        a
    }

    #[test]
    fn bare_annotation() {
        let a = annotation("@nullable");
        assert_eq!(a.name, "nullable");
        assert!(a.args.is_empty());
        assert_eq!(a.single_value(), None);
    }

    #[test]
    fn single_value_shorthand() {
        let a = annotation("@UnsupportedAppUsage(31)");
        assert_eq!(a.single_value(), Some(&Literal::Int(31)));
    }

    #[test]
    fn named_arguments_keep_order() {
        let a = annotation("@Backing(type = \"int\", signed = true)");
        assert_eq!(a.args.len(), 2);
        assert_eq!(a.args[0].name.as_deref(), Some("type"));
        assert_eq!(a.args[0].value, Literal::Str("int".to_owned()));
        assert_eq!(a.args[1].name.as_deref(), Some("signed"));
        assert_eq!(a.args[1].value, Literal::Bool(true));
    }

    #[test]
    fn empty_argument_list() {
        let a = annotation("@Hide()");
        assert!(a.args.is_empty());
    }

    #[test]
    fn qualified_annotation_name() {
        let a = annotation("@android.annotation.SystemApi");
        assert_eq!(a.name, "android.annotation.SystemApi");
    }

    #[test]
    fn signed_numeric_values() {
        let a = annotation("@Range(from = -1, to = +10)");
        assert_eq!(a.args[0].value, Literal::Int(-1));
        assert_eq!(a.args[1].value, Literal::Int(10));
    }

    #[test]
    fn all_literal_forms() {
        let a = annotation("@Defaults(i = 1, f = 2.5f, s = \"x\", c = 'c', b = false, n = null)");
        let values: Vec<&Literal> = a.args.iter().map(|arg| &arg.value).collect();
        assert_eq!(
            values,
            vec![
                &Literal::Int(1),
                &Literal::Float("2.5f".to_owned()),
                &Literal::Str("x".to_owned()),
                &Literal::Char('c'),
                &Literal::Bool(false),
                &Literal::Null,
            ]
        );
    }

    #[test]
    fn sign_without_numeric_literal_is_rejected() {
        let tokens = lexer::lex("@Bad(-true)").unwrap();
        let mut p = Parser::new(&tokens);
        assert!(matches!(
            p.parse_annotation(),
            Err(ParseError::Syntax { .. })
        ));
    }
}
