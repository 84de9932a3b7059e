//! Error type shared by the lexer and parser.
//!
//! Every failure is local to one parse call and surfaces synchronously to
//! the caller; there is no recovery or resynchronization. The derives match
//! the tree types so external tooling can render errors structurally.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::Position;

/// Which literal form a lexer error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    Str,
    Char,
}

impl LiteralKind {
    fn as_str(&self) -> &'static str {
        match self {
            LiteralKind::Str => "string",
            LiteralKind::Char => "character",
        }
    }
}

/// All errors the frontend can produce.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ParseError {
    /// A character outside the grammar's symbol set.
    #[error("{pos}: invalid character {ch:?}")]
    InvalidCharacter { ch: char, pos: Position },

    /// A string or character literal with no closing delimiter before
    /// end of input or end of line.
    #[error("{pos}: unterminated {} literal", .kind.as_str())]
    UnterminatedLiteral { kind: LiteralKind, pos: Position },

    /// A `/*` comment with no closing `*/`.
    #[error("{pos}: unterminated block comment")]
    UnterminatedComment { pos: Position },

    /// A malformed or out-of-range numeric literal, or a bad escape.
    #[error("{pos}: invalid literal '{text}'")]
    InvalidLiteral { text: String, pos: Position },

    /// The parser expected one of a known set of tokens and found another,
    /// or trailing input remained after a fragment parse.
    #[error("{pos}: expected {expected}, got {found}")]
    Syntax {
        expected: String,
        found: String,
        pos: Position,
    },

    /// More than one of `in`/`out`/`inout` on a single parameter.
    #[error("{pos}: duplicate directional tag on parameter")]
    DuplicateDirectionalTag { pos: Position },

    /// `cpp_header` on a parcelable that has a body.
    #[error("{pos}: cpp_header is only allowed on parcelable reference declarations")]
    InvalidCppHeaderUsage { pos: Position },
}

impl ParseError {
    pub fn syntax(expected: impl Into<String>, found: impl Into<String>, pos: Position) -> Self {
        ParseError::Syntax {
            expected: expected.into(),
            found: found.into(),
            pos,
        }
    }

    /// The position the error points at.
    pub fn position(&self) -> Position {
        match self {
            ParseError::InvalidCharacter { pos, .. }
            | ParseError::UnterminatedLiteral { pos, .. }
            | ParseError::UnterminatedComment { pos }
            | ParseError::InvalidLiteral { pos, .. }
            | ParseError::Syntax { pos, .. }
            | ParseError::DuplicateDirectionalTag { pos }
            | ParseError::InvalidCppHeaderUsage { pos } => *pos,
        }
    }
}
