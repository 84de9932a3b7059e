//! Public parse entry points.
//!
//! Each entry tokenizes its input, runs a single grammar production, and
//! requires that production to consume everything; leftover tokens are a
//! syntax error, never a silent truncation. Every call is independent:
//! text in, tree out, no shared state.

use tracing::trace;

use crate::ast::{Annotation, CompilationUnit, MethodDecl, ParameterDecl, TypeDecl, TypeReference};
use crate::error::ParseError;
use crate::lexer;
use crate::parser::{Member, Parser};

/// Parse a complete compilation unit: optional package clause, imports,
/// then type declarations.
pub fn parse_unit(source: &str) -> Result<CompilationUnit, ParseError> {
    trace!(chars = source.len(), "parse_unit");
    let tokens = lexer::lex(source)?;
    let mut p = Parser::new(&tokens);
    p.parse_compilation_unit()
}

/// Parse exactly one top-level type declaration.
pub fn parse_declaration(source: &str) -> Result<TypeDecl, ParseError> {
    trace!(chars = source.len(), "parse_declaration");
    let tokens = lexer::lex(source)?;
    let mut p = Parser::new(&tokens);
    let decl = p.parse_type_declaration()?;
    p.expect_eof()?;
    Ok(decl)
}

/// Parse exactly one type reference, e.g. `Map<String, List<Foo>>`.
pub fn parse_type(source: &str) -> Result<TypeReference, ParseError> {
    trace!(chars = source.len(), "parse_type");
    let tokens = lexer::lex(source)?;
    let mut p = Parser::new(&tokens);
    let ty = p.parse_type_ref()?;
    p.expect_eof()?;
    Ok(ty)
}

/// Parse exactly one method parameter, e.g. `in @nullable Foo foo`.
pub fn parse_parameter(source: &str) -> Result<ParameterDecl, ParseError> {
    trace!(chars = source.len(), "parse_parameter");
    let tokens = lexer::lex(source)?;
    let mut p = Parser::new(&tokens);
    let param = p.parse_parameter()?;
    p.expect_eof()?;
    Ok(param)
}

/// Parse exactly one annotation, e.g. `@Backing(type = "int")`.
pub fn parse_annotation(source: &str) -> Result<Annotation, ParseError> {
    trace!(chars = source.len(), "parse_annotation");
    let tokens = lexer::lex(source)?;
    let mut p = Parser::new(&tokens);
    let annotation = p.parse_annotation()?;
    p.expect_eof()?;
    Ok(annotation)
}

/// Parse a single member signature, e.g. `void onEvent(in Event e)`.
///
/// A missing trailing `;` is supplied, so signatures pasted without their
/// terminator still parse.
pub fn parse_method(source: &str) -> Result<MethodDecl, ParseError> {
    trace!(chars = source.len(), "parse_method");
    let trimmed = source.trim_end();
    let owned;
    let text = if trimmed.ends_with(';') || trimmed.ends_with('}') {
        source
    } else {
        owned = format!("{trimmed};");
        owned.as_str()
    };
    let tokens = lexer::lex(text)?;
    let mut p = Parser::new(&tokens);
    let member = p.parse_member()?;
    p.expect_eof()?;
    match member {
        Member::Method(m) => Ok(m),
        Member::Field(f) => Err(ParseError::syntax(
            "a method signature",
            format!("field '{}'", f.name),
            f.span.start,
        )),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
