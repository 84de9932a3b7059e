//! Syntax tree types for the AIDL/Java frontend.
//!
//! These types are produced by the parser and consumed by downstream tooling
//! (generators, linters, IDE integrations). Ownership is strictly top-down:
//! a unit owns its declarations, a declaration owns its members, a member
//! owns its type references and annotations. Nothing is mutated after the
//! parse call that built the tree returns.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Source positions
// ──────────────────────────────────────────────

/// A source location. Lines and columns are 1-based and count characters,
/// not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source extent of a token or node. `end` is exclusive.
///
/// Spans are carried for diagnostics and serialization but are transparent
/// to equality: any two spans compare equal, so trees differing only in
/// position compare equal. Fixture trees in tests rely on this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// An empty span at a single position.
    pub const fn point(pos: Position) -> Self {
        Span { start: pos, end: pos }
    }
}

impl PartialEq for Span {
    fn eq(&self, _: &Span) -> bool {
        true
    }
}

impl Eq for Span {}

// ──────────────────────────────────────────────
// Compilation unit
// ──────────────────────────────────────────────

/// Root of the tree for one parsed source file.
///
/// At most one package declaration; imports and types follow it in source
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDecl {
    /// Dotted qualified name, e.g. `android.os`.
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Dotted qualified name without the trailing `.*`.
    pub path: String,
    pub wildcard: bool,
    pub is_static: bool,
    pub span: Span,
}

// ──────────────────────────────────────────────
// Type declarations
// ──────────────────────────────────────────────

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDecl {
    Interface(InterfaceDecl),
    Parcelable(ParcelableDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    Union(UnionDecl),
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Interface(d) => &d.name,
            TypeDecl::Parcelable(d) => &d.name,
            TypeDecl::Class(d) => &d.name,
            TypeDecl::Enum(d) => &d.name,
            TypeDecl::Union(d) => &d.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeDecl::Interface(d) => d.span,
            TypeDecl::Parcelable(d) => d.span,
            TypeDecl::Class(d) => d.span,
            TypeDecl::Enum(d) => d.span,
            TypeDecl::Union(d) => d.span,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        match self {
            TypeDecl::Interface(d) => &d.annotations,
            TypeDecl::Parcelable(d) => &d.annotations,
            TypeDecl::Class(d) => &d.annotations,
            TypeDecl::Enum(d) => &d.annotations,
            TypeDecl::Union(d) => &d.annotations,
        }
    }
}

/// An AIDL interface: methods plus `const` members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub methods: Vec<MethodDecl>,
    pub constants: Vec<FieldDecl>,
    pub span: Span,
}

impl InterfaceDecl {
    /// A `oneway` interface marks every method as one-way unless a method
    /// carries its own tag; the flag is recorded here, not pushed down.
    pub fn is_oneway(&self) -> bool {
        self.modifiers.contains(&Modifier::Oneway)
    }
}

/// A parcelable declaration.
///
/// With no body this is a *reference* to an externally implemented type
/// (`is_ref == true`), optionally carrying a `cpp_header` path. With a body
/// it is a full declaration and `cpp_header` is always `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelableDecl {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub is_ref: bool,
    pub cpp_header: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

/// A plain Java class. Member bodies are not parsed: members end with `;`
/// or an empty `{ }` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub extends: Option<TypeReference>,
    pub implements: Vec<TypeReference>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub span: Span,
}

/// An AIDL union: a parcelable-shaped body of alternative fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionDecl {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub constants: Vec<EnumConstant>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    pub value: Option<Literal>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub span: Span,
}

// ──────────────────────────────────────────────
// Members
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    /// `None` for constructors.
    pub return_type: Option<TypeReference>,
    pub params: Vec<ParameterDecl>,
    /// Explicit wire-level dispatch identifier: `void foo() = 3;`
    pub transaction_code: Option<i64>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub span: Span,
}

impl MethodDecl {
    pub fn is_oneway(&self) -> bool {
        self.modifiers.contains(&Modifier::Oneway)
    }

    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeReference,
    pub value: Option<Literal>,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    pub ty: TypeReference,
    /// At most one directional tag; a duplicate is a parse error.
    pub direction: Option<Direction>,
    pub annotations: Vec<Annotation>,
    pub span: Span,
}

/// Data-flow direction of a method parameter across the process boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
    Inout,
}

impl Direction {
    pub fn from_keyword(word: &str) -> Option<Direction> {
        match word {
            "in" => Some(Direction::In),
            "out" => Some(Direction::Out),
            "inout" => Some(Direction::Inout),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Inout => "inout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
    StrictFp,
    Const,
    Oneway,
}

impl Modifier {
    pub fn from_keyword(word: &str) -> Option<Modifier> {
        match word {
            "public" => Some(Modifier::Public),
            "protected" => Some(Modifier::Protected),
            "private" => Some(Modifier::Private),
            "static" => Some(Modifier::Static),
            "final" => Some(Modifier::Final),
            "abstract" => Some(Modifier::Abstract),
            "native" => Some(Modifier::Native),
            "synchronized" => Some(Modifier::Synchronized),
            "transient" => Some(Modifier::Transient),
            "volatile" => Some(Modifier::Volatile),
            "strictfp" => Some(Modifier::StrictFp),
            "const" => Some(Modifier::Const),
            "oneway" => Some(Modifier::Oneway),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Native => "native",
            Modifier::Synchronized => "synchronized",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::StrictFp => "strictfp",
            Modifier::Const => "const",
            Modifier::Oneway => "oneway",
        }
    }
}

// ──────────────────────────────────────────────
// Type references
// ──────────────────────────────────────────────

/// A reference to a type, as written in source.
///
/// Generic arguments attach to the name and array suffixes wrap the result,
/// so `List<Foo>[]` is `Array { element: Generic { .. }, dims: 1 }` and
/// `List<Foo[]>` nests the array inside the argument list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeReference {
    Primitive {
        name: String,
        span: Span,
    },
    Reference {
        /// Dotted qualified name.
        name: String,
        span: Span,
    },
    Generic {
        name: String,
        args: Vec<TypeArgument>,
        span: Span,
    },
    Array {
        element: Box<TypeReference>,
        /// Number of `[]` suffixes folded into this node.
        dims: usize,
        span: Span,
    },
}

impl TypeReference {
    pub fn span(&self) -> Span {
        match self {
            TypeReference::Primitive { span, .. }
            | TypeReference::Reference { span, .. }
            | TypeReference::Generic { span, .. }
            | TypeReference::Array { span, .. } => *span,
        }
    }

    /// The written name, descending through array nesting.
    pub fn name(&self) -> &str {
        match self {
            TypeReference::Primitive { name, .. }
            | TypeReference::Reference { name, .. }
            | TypeReference::Generic { name, .. } => name,
            TypeReference::Array { element, .. } => element.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeArgument {
    Type(TypeReference),
    Wildcard {
        bound: Option<WildcardBound>,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildcardBound {
    pub kind: BoundKind,
    pub ty: TypeReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundKind {
    Extends,
    Super,
}

// ──────────────────────────────────────────────
// Annotations and literals
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub args: Vec<AnnotationArg>,
    pub span: Span,
}

impl Annotation {
    /// The value of the single-argument shorthand form `@Name(value)`.
    pub fn single_value(&self) -> Option<&Literal> {
        match self.args.as_slice() {
            [AnnotationArg { name: None, value }] => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationArg {
    /// `None` for the single-value shorthand.
    pub name: Option<String>,
    pub value: Literal,
}

/// A literal constant: the whole of the constant subgrammar used by default
/// values, annotation arguments, transaction codes, and enum values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    /// Decimal literal, kept as written to preserve the exact representation.
    Float(String),
    Str(String),
    Char(char),
    Null,
}

// ──────────────────────────────────────────────
// Traversal
// ──────────────────────────────────────────────

/// A borrowed view of any node in the tree, yielded by [`CompilationUnit::walk`].
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Unit(&'a CompilationUnit),
    Package(&'a PackageDecl),
    Import(&'a ImportDecl),
    Type(&'a TypeDecl),
    Method(&'a MethodDecl),
    Field(&'a FieldDecl),
    Parameter(&'a ParameterDecl),
    EnumConstant(&'a EnumConstant),
    Annotation(&'a Annotation),
    TypeRef(&'a TypeReference),
}

impl CompilationUnit {
    /// Depth-first walk over the whole tree, parents before children,
    /// children in source order.
    pub fn walk(&self) -> Vec<NodeRef<'_>> {
        let mut out = Vec::new();
        out.push(NodeRef::Unit(self));
        if let Some(p) = &self.package {
            out.push(NodeRef::Package(p));
        }
        for i in &self.imports {
            out.push(NodeRef::Import(i));
        }
        for t in &self.types {
            collect_type(t, &mut out);
        }
        out
    }
}

fn collect_type<'a>(decl: &'a TypeDecl, out: &mut Vec<NodeRef<'a>>) {
    out.push(NodeRef::Type(decl));
    for a in decl.annotations() {
        out.push(NodeRef::Annotation(a));
    }
    match decl {
        TypeDecl::Interface(d) => {
            for c in &d.constants {
                collect_field(c, out);
            }
            for m in &d.methods {
                collect_method(m, out);
            }
        }
        TypeDecl::Parcelable(d) => {
            for f in &d.fields {
                collect_field(f, out);
            }
        }
        TypeDecl::Class(d) => {
            if let Some(e) = &d.extends {
                collect_type_ref(e, out);
            }
            for i in &d.implements {
                collect_type_ref(i, out);
            }
            for f in &d.fields {
                collect_field(f, out);
            }
            for m in &d.methods {
                collect_method(m, out);
            }
        }
        TypeDecl::Enum(d) => {
            for c in &d.constants {
                out.push(NodeRef::EnumConstant(c));
                for a in &c.annotations {
                    out.push(NodeRef::Annotation(a));
                }
            }
        }
        TypeDecl::Union(d) => {
            for f in &d.fields {
                collect_field(f, out);
            }
        }
    }
}

fn collect_method<'a>(m: &'a MethodDecl, out: &mut Vec<NodeRef<'a>>) {
    out.push(NodeRef::Method(m));
    for a in &m.annotations {
        out.push(NodeRef::Annotation(a));
    }
    if let Some(rt) = &m.return_type {
        collect_type_ref(rt, out);
    }
    for p in &m.params {
        out.push(NodeRef::Parameter(p));
        for a in &p.annotations {
            out.push(NodeRef::Annotation(a));
        }
        collect_type_ref(&p.ty, out);
    }
}

fn collect_field<'a>(f: &'a FieldDecl, out: &mut Vec<NodeRef<'a>>) {
    out.push(NodeRef::Field(f));
    for a in &f.annotations {
        out.push(NodeRef::Annotation(a));
    }
    collect_type_ref(&f.ty, out);
}

fn collect_type_ref<'a>(t: &'a TypeReference, out: &mut Vec<NodeRef<'a>>) {
    out.push(NodeRef::TypeRef(t));
    match t {
        TypeReference::Generic { args, .. } => {
            for arg in args {
                match arg {
                    TypeArgument::Type(inner) => collect_type_ref(inner, out),
                    TypeArgument::Wildcard { bound, .. } => {
                        if let Some(b) = bound {
                            collect_type_ref(&b.ty, out);
                        }
                    }
                }
            }
        }
        TypeReference::Array { element, .. } => collect_type_ref(element, out),
        TypeReference::Primitive { .. } | TypeReference::Reference { .. } => {}
    }
}

// ──────────────────────────────────────────────
// Persistence
// ──────────────────────────────────────────────

/// Write a tree as JSON, spans included.
pub fn dump<W: io::Write>(unit: &CompilationUnit, writer: W) -> serde_json::Result<()> {
    serde_json::to_writer(writer, unit)
}

/// Read a tree previously written by [`dump`].
pub fn load<R: io::Read>(reader: R) -> serde_json::Result<CompilationUnit> {
    serde_json::from_reader(reader)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn span(line: u32, a: u32, b: u32) -> Span {
        Span::new(Position::new(line, a), Position::new(line, b))
    }

    #[test]
    fn spans_do_not_participate_in_equality() {
        let a = PackageDecl {
            name: "com.example".to_owned(),
            span: span(1, 1, 20),
        };
        let b = PackageDecl {
            name: "com.example".to_owned(),
            span: span(7, 3, 9),
        };
        assert_eq!(a, b);

        let c = PackageDecl {
            name: "com.other".to_owned(),
            span: span(1, 1, 20),
        };
        assert_ne!(a, c);
    }

    #[test]
    fn type_reference_name_descends_arrays() {
        let t = TypeReference::Array {
            element: Box::new(TypeReference::Reference {
                name: "Foo".to_owned(),
                span: span(1, 1, 4),
            }),
            dims: 2,
            span: span(1, 1, 8),
        };
        assert_eq!(t.name(), "Foo");
    }

    #[test]
    fn dump_load_round_trips() {
        let unit = CompilationUnit {
            package: Some(PackageDecl {
                name: "com.example".to_owned(),
                span: span(1, 1, 20),
            }),
            imports: vec![ImportDecl {
                path: "android.os.Bundle".to_owned(),
                wildcard: false,
                is_static: false,
                span: span(2, 1, 26),
            }],
            types: vec![TypeDecl::Parcelable(ParcelableDecl {
                name: "Foo".to_owned(),
                modifiers: Vec::new(),
                annotations: Vec::new(),
                documentation: None,
                is_ref: true,
                cpp_header: None,
                fields: Vec::new(),
                span: span(3, 1, 16),
            })],
            span: span(1, 1, 16),
        };

        let mut buf = Vec::new();
        dump(&unit, &mut buf).unwrap();
        let back = load(buf.as_slice()).unwrap();
        assert_eq!(unit, back);
    }

    #[test]
    fn walk_yields_depth_first_source_order() {
        let unit = CompilationUnit {
            package: None,
            imports: Vec::new(),
            types: vec![TypeDecl::Parcelable(ParcelableDecl {
                name: "Foo".to_owned(),
                modifiers: Vec::new(),
                annotations: Vec::new(),
                documentation: None,
                is_ref: false,
                cpp_header: None,
                fields: vec![FieldDecl {
                    name: "count".to_owned(),
                    ty: TypeReference::Primitive {
                        name: "int".to_owned(),
                        span: span(1, 1, 4),
                    },
                    value: None,
                    modifiers: Vec::new(),
                    annotations: Vec::new(),
                    documentation: None,
                    span: span(1, 1, 10),
                }],
                span: span(1, 1, 12),
            })],
            span: span(1, 1, 12),
        };

        let nodes = unit.walk();
        let kinds: Vec<&str> = nodes
            .iter()
            .map(|n| match n {
                NodeRef::Unit(_) => "unit",
                NodeRef::Type(_) => "type",
                NodeRef::Field(_) => "field",
                NodeRef::TypeRef(_) => "typeref",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["unit", "type", "field", "typeref"]);
    }
}
