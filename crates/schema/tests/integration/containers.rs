//! Containers composed the way callers compose them.

use nebula_schema::prelude::*;
use pretty_assertions::assert_eq;

fn address() -> ObjectSchema {
    object! {
        "street" => string().min(1),
        "zip" => string().regex(r"^\d{5}$"),
    }
}

fn user() -> ObjectSchema {
    object! {
        "name" => string().min(1),
        "address" => address(),
        "tags" => slice(string()).max(3).optional(),
        "role" => enum_of(["admin", "member"].map(String::from)).default(String::from("member")),
    }
}

#[test]
fn object_round_trip_with_defaults() {
    let input = Value::object([
        ("name", Value::from("ada")),
        ("address", Value::object([("street", "Main"), ("zip", "12345")])),
    ]);
    let out = user().parse(input).unwrap();
    assert_eq!(out.get("role"), Some(&Value::from("member")));
    assert!(!out.contains_key("tags"));
}

#[test]
fn object_collects_every_failure() {
    let input = Value::object([
        ("name", Value::from("")),
        ("address", Value::object([("street", "Main"), ("zip", "12")])),
        ("tags", Value::array(["a", "b", "c", "d"])),
        ("role", Value::from("root")),
    ]);
    let err = user().parse(input).unwrap_err();
    let summary: Vec<_> = err
        .issues()
        .iter()
        .map(|issue| (issue.path_string(), issue.code))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("name".to_owned(), IssueCode::TooSmall),
            ("address.zip".to_owned(), IssueCode::InvalidFormat),
            ("tags".to_owned(), IssueCode::TooBig),
            ("role".to_owned(), IssueCode::InvalidValue),
        ]
    );
}

#[test]
fn reparsing_accepted_output_is_stable() {
    let schema = user();
    let input = Value::object([
        ("name", Value::from("ada")),
        ("address", Value::object([("street", "Main"), ("zip", "12345")])),
        ("tags", Value::array(["x"])),
    ]);
    let first = schema.parse(input).unwrap();
    let second = schema.parse(Value::from(first.clone())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn object_prefault_replaces_wrong_type() {
    let schema = object! { "port" => int() }.prefault(Value::object([("port", 80_i64)]));
    let out = schema.parse("garbage").unwrap();
    assert_eq!(out.get("port"), Some(&Value::from(80_i64)));

    let err = schema.parse(Value::object([("port", "x")])).unwrap_err();
    assert_eq!(err.issues()[0].path_string(), "port");
}

#[test]
fn merge_adopts_other_policy() {
    let base = object! { "a" => int() };
    let extra = object! { "b" => int() }.passthrough();
    let merged = base.merge(&extra);
    let out = merged
        .parse(Value::object([("a", 1_i64), ("b", 2_i64), ("c", 3_i64)]))
        .unwrap();
    assert_eq!(out.len(), 3);
}

#[test]
fn union_of_objects() {
    let schema = union![
        object! { "type" => literal(String::from("text")), "body" => string() },
        object! { "type" => literal(String::from("image")), "url" => string().url() },
    ];
    assert!(schema
        .parse(Value::object([("type", "image"), ("url", "https://x.test/a.png")]))
        .is_ok());

    let err = schema.parse(Value::object([("type", "video")])).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::InvalidUnion);
}

#[test]
fn map_with_typed_keys() {
    let schema = map(int().positive(), boolean());
    let input = Value::Map(vec![
        (Value::from(1_i64), Value::from(true)),
        (Value::from(-1_i64), Value::from(false)),
    ]);
    let err = schema.parse(input).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::InvalidKey);
    assert_eq!(err.issues()[0].path_string(), "[-1]");
}

#[test]
fn record_of_values() {
    let scores = record_of(int().non_negative());
    let out = scores
        .parse(Value::object([("ada", 10_i64), ("bob", 0_i64)]))
        .unwrap();
    assert_eq!(out.len(), 2);

    let err = scores.parse(Value::object([("eve", -1_i64)])).unwrap_err();
    assert_eq!(err.issues()[0].path_string(), "eve");
}

#[test]
fn intersection_of_shapes() {
    let named = object! { "name" => string() }.strip();
    let aged = object! { "age" => int() }.strip();
    let person = intersection(named, aged);
    let out = person
        .parse(Value::object([("name", Value::from("ada")), ("age", Value::from(36_i64))]))
        .unwrap();
    assert_eq!(out.get("age"), Some(&Value::from(36_i64)));
}

#[test]
fn slice_of_tuples() {
    let points = slice(tuple![float64(), float64()]);
    let out = points
        .parse(Value::array([Value::array([0.0, 1.0]), Value::array([2.0, 3.0])]))
        .unwrap();
    assert_eq!(out.len(), 2);

    let err = points.parse(Value::array([Value::array([0.0])])).unwrap_err();
    assert_eq!(err.issues()[0].path_string(), "[0]");
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn partial_then_required() {
    let patch = address().partial();
    assert!(patch.parse(Value::object([("zip", "54321")])).is_ok());

    let full = patch.required();
    let err = full.parse(Value::object([("zip", "54321")])).unwrap_err();
    assert_eq!(err.issues()[0].path_string(), "street");
}

#[test]
fn catchall_validates_extra_keys() {
    let labels = object! { "name" => string() }.catchall(int());
    assert!(labels
        .parse(Value::object([("name", Value::from("a")), ("x", Value::from(1_i64))]))
        .is_ok());
    let err = labels
        .parse(Value::object([("name", Value::from("a")), ("x", Value::from("no"))]))
        .unwrap_err();
    assert_eq!(err.issues()[0].path_string(), "x");
}
