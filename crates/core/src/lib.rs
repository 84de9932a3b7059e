//! aidl-core: AIDL/Java frontend library.
//!
//! Converts AIDL source text -- a Java-like interface dialect with
//! parcelable types, one-way interfaces, directional parameter tags, and
//! explicit transaction codes -- and plain Java declaration source into an
//! immutable syntax tree with exact source positions.
//!
//! # Public API
//!
//! Key entry points and types are re-exported at the crate root:
//!
//! - [`parse_unit()`] -- parse a complete compilation unit
//! - [`parse_declaration()`], [`parse_type()`], [`parse_parameter()`],
//!   [`parse_annotation()`], [`parse_method()`] -- fragment parses with a
//!   consume-all-or-fail contract
//! - [`ParseError`] -- the error type shared by lexer and parser
//! - AST types: [`CompilationUnit`], [`TypeDecl`], [`TypeReference`], ...
//!
//! Parsing performs no I/O and no name resolution. Each call is an
//! independent pure function of its input; concurrent calls share nothing
//! but the immutable grammar tables in [`tables`].

pub mod ast;
pub mod error;
pub mod javadoc;
pub mod lexer;
pub mod parse;
pub mod tables;

mod parser;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{
    Annotation, CompilationUnit, Direction, Literal, MethodDecl, Modifier, ParameterDecl,
    Position, Span, TypeDecl, TypeReference,
};
pub use error::ParseError;

// ── Convenience re-exports: entry points ─────────────────────────────

pub use parse::{
    parse_annotation, parse_declaration, parse_method, parse_parameter, parse_type, parse_unit,
};
