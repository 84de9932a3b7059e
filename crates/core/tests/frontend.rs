//! End-to-end checks of the public entry points: source text in, tree or
//! structured error out.

use pretty_assertions::assert_eq;

use aidl_core::ast::{NodeRef, TypeArgument};
use aidl_core::{
    javadoc, parse_declaration, parse_parameter, parse_type, parse_unit, Direction, ParseError,
    TypeDecl, TypeReference,
};

#[test]
fn bare_parcelable_reference_unit() {
    let unit = parse_unit("package com.example; parcelable Foo;").unwrap();
    assert_eq!(unit.package.as_ref().unwrap().name, "com.example");
    assert_eq!(unit.types.len(), 1);
    let TypeDecl::Parcelable(p) = &unit.types[0] else {
        panic!("expected parcelable, got {:?}", unit.types[0]);
    };
    assert_eq!(p.name, "Foo");
    assert!(p.is_ref);
    assert_eq!(p.cpp_header, None);
}

#[test]
fn parcelable_reference_with_cpp_header() {
    let unit =
        parse_unit("package com.example; parcelable Foo cpp_header \"native/include/Foo.h\";")
            .unwrap();
    let TypeDecl::Parcelable(p) = &unit.types[0] else {
        panic!("expected parcelable");
    };
    assert!(p.is_ref);
    assert_eq!(p.cpp_header.as_deref(), Some("native/include/Foo.h"));
}

#[test]
fn interface_method_with_direction_annotation_and_code() {
    let unit = parse_unit(
        "package com.example;\n\
         interface IActionHandler {\n\
         \tvoid onActionPerformed(in @nullable Foo foo) = 2;\n\
         }\n",
    )
    .unwrap();
    let TypeDecl::Interface(i) = &unit.types[0] else {
        panic!("expected interface");
    };
    let m = &i.methods[0];
    assert_eq!(m.name, "onActionPerformed");
    assert_eq!(m.transaction_code, Some(2));
    assert_eq!(m.params.len(), 1);
    assert_eq!(m.params[0].direction, Some(Direction::In));
    assert_eq!(m.params[0].annotations[0].name, "nullable");
}

#[test]
fn duplicate_directional_tag_is_not_first_tag_wins() {
    let err = parse_parameter("in out Foo f").unwrap_err();
    assert!(matches!(err, ParseError::DuplicateDirectionalTag { .. }));

    let err = parse_unit("interface I { void f(inout in Foo f); }").unwrap_err();
    assert!(matches!(err, ParseError::DuplicateDirectionalTag { .. }));
}

#[test]
fn generic_argument_nests_the_array_dimension() {
    let TypeReference::Generic { name, args, .. } = parse_type("List<Foo[]>").unwrap() else {
        panic!("expected generic");
    };
    assert_eq!(name, "List");
    let [TypeArgument::Type(TypeReference::Array { element, dims, .. })] = args.as_slice() else {
        panic!("expected one array argument, got {args:?}");
    };
    assert_eq!(*dims, 1);
    assert_eq!(element.name(), "Foo");
}

#[test]
fn reparsing_identical_source_yields_equal_trees() {
    let src = "package com.example;\n\
               import android.os.Bundle;\n\
               oneway interface IEventSink {\n\
               \tconst int VERSION = 3;\n\
               \tvoid onEvent(in Bundle extras) = 1;\n\
               }\n";
    assert_eq!(parse_unit(src).unwrap(), parse_unit(src).unwrap());
}

#[test]
fn equality_ignores_position_spans() {
    // Same token stream, different layout: spans differ, trees compare equal.
    let a = parse_unit("package p; parcelable Foo;").unwrap();
    let b = parse_unit("\n\npackage p;\n\n    parcelable   Foo;\n").unwrap();
    assert_eq!(a, b);
}

#[test]
fn fragment_parse_must_consume_everything() {
    let err = parse_declaration("parcelable Foo; parcelable Bar;").unwrap_err();
    let ParseError::Syntax { expected, .. } = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(expected, "end of input");
}

#[test]
fn realistic_file_keeps_declaration_order_and_docs() {
    let src = r#"package com.example.scheduler;

import com.example.scheduler.Job;
import android.os.*;

/** Priority classes used by the scheduler. */
@Backing(type = "int")
enum Priority {
    LOW = 0,
    HIGH = 1,
}

union Payload {
    int code;
    String message;
}

parcelable JobInfo {
    int id;
    Priority priority;
    @nullable String tag = null;
    long[] deadlines;
}

/**
 * Schedules jobs across processes.
 *
 * @param job the job description
 */
oneway interface IScheduler {
    const int MAX_JOBS = 0x40;
    void schedule(in JobInfo job, out int[] slots) = 10;
    void cancelAll();
}
"#;

    let unit = parse_unit(src).unwrap();
    assert_eq!(unit.package.as_ref().unwrap().name, "com.example.scheduler");
    assert_eq!(unit.imports.len(), 2);
    assert!(unit.imports[1].wildcard);

    let names: Vec<&str> = unit.types.iter().map(TypeDecl::name).collect();
    assert_eq!(names, vec!["Priority", "Payload", "JobInfo", "IScheduler"]);

    let TypeDecl::Enum(e) = &unit.types[0] else {
        panic!("expected enum");
    };
    assert_eq!(
        e.documentation.as_deref(),
        Some("/** Priority classes used by the scheduler. */")
    );
    assert_eq!(e.annotations[0].name, "Backing");

    let TypeDecl::Interface(i) = &unit.types[3] else {
        panic!("expected interface");
    };
    assert!(i.is_oneway());
    assert_eq!(i.constants[0].name, "MAX_JOBS");
    assert_eq!(i.methods[0].transaction_code, Some(10));
    assert_eq!(i.methods[0].params[1].direction, Some(Direction::Out));

    // The raw doc text feeds the javadoc module.
    let doc = javadoc::parse(i.documentation.as_deref().unwrap()).unwrap();
    assert_eq!(doc.description, "Schedules jobs across processes.");
    assert_eq!(
        doc.params,
        vec![("job".to_owned(), "the job description".to_owned())]
    );
}

#[test]
fn dump_and_load_round_trip_a_parsed_tree() {
    let unit = parse_unit(
        "package p;\n\
         parcelable Point { int x; int y; }\n",
    )
    .unwrap();
    let mut buf = Vec::new();
    aidl_core::ast::dump(&unit, &mut buf).unwrap();
    let back = aidl_core::ast::load(buf.as_slice()).unwrap();
    assert_eq!(unit, back);
}

#[test]
fn walk_visits_every_parameter() {
    let unit = parse_unit(
        "interface I {\n\
         \tvoid f(in Foo a, out Bar b);\n\
         \tvoid g(inout Baz c);\n\
         }\n",
    )
    .unwrap();
    let params: Vec<&str> = unit
        .walk()
        .into_iter()
        .filter_map(|n| match n {
            NodeRef::Parameter(p) => Some(p.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(params, vec!["a", "b", "c"]);
}

#[test]
fn error_positions_point_at_the_offending_token() {
    let err = parse_unit("package com.example;\ninterface I {\n  void f(;\n}\n").unwrap_err();
    let ParseError::Syntax { pos, .. } = err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(pos.line, 3);
    assert_eq!(pos.column, 10);
}
