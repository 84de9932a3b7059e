//! Top-level type declarations: `interface`, `parcelable`, `class`,
//! `enum`, and `union`.

use super::{Member, Parser};
use crate::ast::{
    Annotation, ClassDecl, EnumConstant, EnumDecl, FieldDecl, InterfaceDecl, Modifier,
    ParcelableDecl, Span, TypeDecl, UnionDecl,
};
use crate::error::ParseError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type_declaration(&mut self) -> Result<TypeDecl, ParseError> {
        let start = self.cur_span();
        let doc = self.cur_doc();
        let (annotations, modifiers) = self.parse_decl_prefix()?;
        let Token::Keyword(kw) = self.peek().clone() else {
            return Err(self.err_expected("a type declaration"));
        };
        match kw.as_str() {
            "interface" => self.parse_interface(start, doc, annotations, modifiers),
            "parcelable" => self.parse_parcelable(start, doc, annotations, modifiers),
            "class" => self.parse_class(start, doc, annotations, modifiers),
            "enum" => self.parse_enum(start, doc, annotations, modifiers),
            "union" => self.parse_union(start, doc, annotations, modifiers),
            _ => Err(self.err_expected("'interface', 'parcelable', 'class', 'enum', or 'union'")),
        }
    }

    /// Leading annotations and modifiers, in any interleaving.
    pub(super) fn parse_decl_prefix(
        &mut self,
    ) -> Result<(Vec<Annotation>, Vec<Modifier>), ParseError> {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();
        loop {
            if self.peek() == &Token::At {
                annotations.push(self.parse_annotation()?);
                continue;
            }
            if let Token::Keyword(w) = self.peek().clone() {
                if let Some(m) = Modifier::from_keyword(&w) {
                    self.advance();
                    modifiers.push(m);
                    continue;
                }
            }
            break;
        }
        Ok((annotations, modifiers))
    }

    // -- Interface ----------------------------------------------

    fn parse_interface(
        &mut self,
        start: Span,
        doc: Option<String>,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<TypeDecl, ParseError> {
        self.advance(); // 'interface'
        let name = self.take_ident()?;
        self.expect_token(&Token::LBrace, "'{'")?;
        let mut methods = Vec::new();
        let mut constants = Vec::new();
        while self.peek() != &Token::RBrace && !self.at_eof() {
            let member_pos = self.cur_pos();
            match self.parse_member()? {
                Member::Method(m) => methods.push(m),
                Member::Field(f) => {
                    if f.modifiers.contains(&Modifier::Const) {
                        constants.push(f);
                    } else {
                        return Err(ParseError::syntax(
                            "a method or 'const' member",
                            format!("field '{}'", f.name),
                            member_pos,
                        ));
                    }
                }
            }
        }
        self.expect_token(&Token::RBrace, "'}'")?;
        self.eat_token(&Token::Semi);
        Ok(TypeDecl::Interface(InterfaceDecl {
            name,
            modifiers,
            annotations,
            documentation: doc,
            methods,
            constants,
            span: self.span_from(start),
        }))
    }

    // -- Parcelable ---------------------------------------------

    fn parse_parcelable(
        &mut self,
        start: Span,
        doc: Option<String>,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<TypeDecl, ParseError> {
        self.advance(); // 'parcelable'
        // Reference declarations may name an externally defined, possibly
        // qualified type.
        let name = self.qualified_name()?;

        if self.is_keyword("cpp_header") {
            let kw_pos = self.cur_pos();
            self.advance();
            let header = self.take_string()?;
            if self.peek() == &Token::LBrace {
                return Err(ParseError::InvalidCppHeaderUsage { pos: kw_pos });
            }
            self.expect_token(&Token::Semi, "';'")?;
            return Ok(TypeDecl::Parcelable(ParcelableDecl {
                name,
                modifiers,
                annotations,
                documentation: doc,
                is_ref: true,
                cpp_header: Some(header),
                fields: Vec::new(),
                span: self.span_from(start),
            }));
        }

        if self.eat_token(&Token::Semi) {
            return Ok(TypeDecl::Parcelable(ParcelableDecl {
                name,
                modifiers,
                annotations,
                documentation: doc,
                is_ref: true,
                cpp_header: None,
                fields: Vec::new(),
                span: self.span_from(start),
            }));
        }

        self.expect_token(&Token::LBrace, "';', 'cpp_header', or '{'")?;
        let fields = self.parse_field_block("parcelable")?;
        self.expect_token(&Token::RBrace, "'}'")?;
        self.eat_token(&Token::Semi);
        Ok(TypeDecl::Parcelable(ParcelableDecl {
            name,
            modifiers,
            annotations,
            documentation: doc,
            is_ref: false,
            cpp_header: None,
            fields,
            span: self.span_from(start),
        }))
    }

    /// Body shared by parcelable and union declarations: fields only.
    fn parse_field_block(&mut self, what: &str) -> Result<Vec<FieldDecl>, ParseError> {
        let mut fields = Vec::new();
        while self.peek() != &Token::RBrace && !self.at_eof() {
            let member_pos = self.cur_pos();
            match self.parse_member()? {
                Member::Field(f) => fields.push(f),
                Member::Method(m) => {
                    return Err(ParseError::syntax(
                        format!("a field declaration in a {what} body"),
                        format!("method '{}'", m.name),
                        member_pos,
                    ))
                }
            }
        }
        Ok(fields)
    }

    // -- Class --------------------------------------------------

    fn parse_class(
        &mut self,
        start: Span,
        doc: Option<String>,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<TypeDecl, ParseError> {
        self.advance(); // 'class'
        let name = self.take_ident()?;
        let extends = if self.eat_keyword("extends") {
            Some(self.parse_type_ref()?)
        } else {
            None
        };
        let mut implements = Vec::new();
        if self.eat_keyword("implements") {
            loop {
                implements.push(self.parse_type_ref()?);
                if !self.eat_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect_token(&Token::LBrace, "'{'")?;
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while self.peek() != &Token::RBrace && !self.at_eof() {
            match self.parse_member()? {
                Member::Field(f) => fields.push(f),
                Member::Method(m) => methods.push(m),
            }
        }
        self.expect_token(&Token::RBrace, "'}'")?;
        self.eat_token(&Token::Semi);
        Ok(TypeDecl::Class(ClassDecl {
            name,
            modifiers,
            annotations,
            documentation: doc,
            extends,
            implements,
            fields,
            methods,
            span: self.span_from(start),
        }))
    }

    // -- Enum ---------------------------------------------------

    fn parse_enum(
        &mut self,
        start: Span,
        doc: Option<String>,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<TypeDecl, ParseError> {
        self.advance(); // 'enum'
        let name = self.take_ident()?;
        self.expect_token(&Token::LBrace, "'{'")?;
        let mut constants = Vec::new();
        while self.peek() != &Token::RBrace && !self.at_eof() {
            let c_start = self.cur_span();
            let c_doc = self.cur_doc();
            let c_annotations = self.parse_annotations()?;
            let c_name = self.take_ident()?;
            let value = if self.eat_token(&Token::Assign) {
                Some(self.parse_constant()?)
            } else {
                None
            };
            constants.push(EnumConstant {
                name: c_name,
                value,
                annotations: c_annotations,
                documentation: c_doc,
                span: self.span_from(c_start),
            });
            // Trailing comma before '}' is fine.
            if !self.eat_token(&Token::Comma) {
                break;
            }
        }
        self.expect_token(&Token::RBrace, "'}'")?;
        self.eat_token(&Token::Semi);
        Ok(TypeDecl::Enum(EnumDecl {
            name,
            modifiers,
            annotations,
            documentation: doc,
            constants,
            span: self.span_from(start),
        }))
    }

    // -- Union --------------------------------------------------

    fn parse_union(
        &mut self,
        start: Span,
        doc: Option<String>,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<TypeDecl, ParseError> {
        self.advance(); // 'union'
        let name = self.take_ident()?;
        self.expect_token(&Token::LBrace, "'{'")?;
        let fields = self.parse_field_block("union")?;
        self.expect_token(&Token::RBrace, "'}'")?;
        self.eat_token(&Token::Semi);
        Ok(TypeDecl::Union(UnionDecl {
            name,
            modifiers,
            annotations,
            documentation: doc,
            fields,
            span: self.span_from(start),
        }))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
