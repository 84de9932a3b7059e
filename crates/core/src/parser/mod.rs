//! Recursive-descent parser over the token stream.
//!
//! One function per grammar production. Dispatch uses a single token of
//! lookahead everywhere except the constructor/method split and the
//! annotation argument-form split, which peek one token further. There is
//! no backtracking and no error recovery: the first failure aborts the
//! whole parse call.

use crate::ast::{CompilationUnit, ImportDecl, PackageDecl, Position, Span};
use crate::error::ParseError;
use crate::lexer::{Spanned, Token};

mod annotations;
mod declarations;
mod members;
mod types;

pub(crate) use members::Member;

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub(crate) struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Spanned]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn peek_at(&self, n: usize) -> &Token {
        let i = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[i].token
    }

    fn cur_pos(&self) -> Position {
        self.cur().span.start
    }

    fn cur_span(&self) -> Span {
        self.cur().span
    }

    /// Doc comment attached to the current token, if any.
    fn cur_doc(&self) -> Option<String> {
        self.cur().doc.clone()
    }

    fn prev_span(&self) -> Span {
        let i = self.pos.saturating_sub(1);
        self.tokens[i].span
    }

    /// Span from the start of `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.prev_span().end)
    }

    fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    fn is_keyword(&self, word: &str) -> bool {
        matches!(self.peek(), Token::Keyword(k) if k == word)
    }

    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.is_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_token(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, word: &str) -> Result<Span, ParseError> {
        if self.is_keyword(word) {
            let span = self.cur_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.err_expected(format!("'{word}'")))
        }
    }

    fn expect_token(&mut self, token: &Token, what: &str) -> Result<Span, ParseError> {
        if self.peek() == token {
            let span = self.cur_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.err_expected(what))
        }
    }

    fn take_ident(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name) = self.peek().clone() {
            self.advance();
            Ok(name)
        } else {
            Err(self.err_expected("an identifier"))
        }
    }

    fn take_string(&mut self) -> Result<String, ParseError> {
        if let Token::Str(s) = self.peek().clone() {
            self.advance();
            Ok(s)
        } else {
            Err(self.err_expected("a string literal"))
        }
    }

    fn err_expected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::syntax(expected, self.peek().describe(), self.cur_pos())
    }

    /// Consume-all contract for fragment parses.
    pub(crate) fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.at_eof() {
            Ok(())
        } else {
            Err(self.err_expected("end of input"))
        }
    }

    /// Dotted qualified name: `ident ('.' ident)*`.
    fn qualified_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.take_ident()?;
        while self.peek() == &Token::Dot {
            self.advance();
            let segment = self.take_ident()?;
            name.push('.');
            name.push_str(&segment);
        }
        Ok(name)
    }

    // -- Compilation unit ---------------------------------------

    pub(crate) fn parse_compilation_unit(&mut self) -> Result<CompilationUnit, ParseError> {
        let start = self.cur_span();

        let package = if self.is_keyword("package") {
            Some(self.parse_package()?)
        } else {
            None
        };

        let mut imports = Vec::new();
        while self.is_keyword("import") {
            imports.push(self.parse_import()?);
        }

        // Everything up to end of input must be a type declaration; anything
        // else (a second package clause, stray tokens) fails here.
        let mut types = Vec::new();
        while !self.at_eof() {
            types.push(self.parse_type_declaration()?);
        }

        Ok(CompilationUnit {
            package,
            imports,
            types,
            span: self.span_from(start),
        })
    }

    fn parse_package(&mut self) -> Result<PackageDecl, ParseError> {
        let start = self.expect_keyword("package")?;
        let name = self.qualified_name()?;
        self.expect_token(&Token::Semi, "';'")?;
        Ok(PackageDecl {
            name,
            span: self.span_from(start),
        })
    }

    fn parse_import(&mut self) -> Result<ImportDecl, ParseError> {
        let start = self.expect_keyword("import")?;
        let is_static = self.eat_keyword("static");
        let mut path = self.take_ident()?;
        let mut wildcard = false;
        while self.peek() == &Token::Dot {
            self.advance();
            if self.peek() == &Token::Star {
                self.advance();
                wildcard = true;
                break;
            }
            let segment = self.take_ident()?;
            path.push('.');
            path.push_str(&segment);
        }
        self.expect_token(&Token::Semi, "';'")?;
        Ok(ImportDecl {
            path,
            wildcard,
            is_static,
            span: self.span_from(start),
        })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
