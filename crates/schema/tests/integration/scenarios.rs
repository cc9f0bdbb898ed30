//! End-to-end scenarios: each one pins a behavior callers rely on.

use std::sync::Arc;

use nebula_schema::prelude::*;
use pretty_assertions::assert_eq;

// ============================================================================
// FIXED-LENGTH ARRAYS
// ============================================================================

#[test]
fn tuple_arity_mismatch_reports_once() {
    let schema = tuple![string(), string()];
    let err = schema.parse(Value::array(["a"])).unwrap_err();

    assert_eq!(err.len(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.code, IssueCode::TooSmall);
    assert_eq!(issue.origin(), Some("array"));
    assert!(issue.inclusive());
    assert_eq!(issue.minimum(), Some(&Value::Uint(2)));
    assert!(issue.path.is_empty());
}

// ============================================================================
// DEFAULT AND PREFAULT
// ============================================================================

#[test]
fn default_bypasses_minimum() {
    let schema = float64().min(50.0).default(10.0);
    assert_eq!(schema.parse(Value::Null).unwrap(), 10.0);

    let err = schema.parse(40_i64).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn prefault_triggers_only_on_nil() {
    let schema = float64().min(50.0).prefault(100.0);
    assert_eq!(schema.parse(Value::Null).unwrap(), 100.0);

    let err = schema.parse(10_i64).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn failing_prefault_is_reported() {
    let schema = float64().min(50.0).prefault(1.0);
    let err = schema.parse(Value::Null).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn default_wins_over_nilable() {
    let schema = string_ptr().nilable().default("fallback");
    let out = schema.parse(Value::Null).unwrap();
    assert_eq!(out.as_deref().map(String::as_str), Some("fallback"));
}

// ============================================================================
// POINTER IDENTITY
// ============================================================================

#[test]
fn nilable_pointer_keeps_identity() {
    let schema = float64_ptr().nilable();
    let shared = Arc::new(2.5_f64);

    let out = schema.parse(Value::from_arc(Arc::clone(&shared))).unwrap();
    assert!(Arc::ptr_eq(out.as_ref().unwrap(), &shared));
    assert_eq!(schema.parse(Value::Null).unwrap(), None);
}

#[test]
fn checks_that_pass_keep_identity() {
    let schema = string_ptr().min(1).regex("^[a-z]+$");
    let shared = Arc::new(String::from("abc"));
    let out = schema.parse(Value::from_arc(Arc::clone(&shared))).unwrap();
    assert!(Arc::ptr_eq(out.as_ref().unwrap(), &shared));
}

// ============================================================================
// DISCRIMINATED UNIONS
// ============================================================================

#[test]
fn discriminated_union_runs_only_the_selected_option() {
    let schema = discriminated_union(
        "kind",
        vec![
            object! { "kind" => literal(String::from("a")), "value" => string() }.strip(),
            object! { "kind" => literal(String::from("b")), "value" => int() }.strip(),
        ],
    );

    let out = schema
        .parse(Value::object([("kind", Value::from("b")), ("value", Value::from(3_i64))]))
        .unwrap();
    assert_eq!(out.get("value"), Some(&Value::from(3_i64)));

    let err = schema
        .parse(Value::object([("kind", Value::from("b")), ("value", Value::from("x"))]))
        .unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.issues()[0].code, IssueCode::InvalidType);
    assert_eq!(err.issues()[0].path_string(), "value");
}

// ============================================================================
// RECORDS
// ============================================================================

#[test]
fn record_with_numeric_string_keys() {
    let schema = record(int().min(1), string());
    let err = schema
        .parse(Value::object([("2", "x"), ("0", "y")]))
        .unwrap_err();

    assert_eq!(err.len(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.code, IssueCode::InvalidKey);
    assert_eq!(issue.path_string(), "0");
    assert_eq!(issue.errors[0][0].code, IssueCode::TooSmall);

    let out = schema.parse(Value::object([("2", "x")])).unwrap();
    assert_eq!(out.get("2"), Some(&Value::from("x")));
}

// ============================================================================
// NESTED PATHS
// ============================================================================

#[test]
fn nested_failure_paths_name_every_step() {
    let schema = object! {
        "user" => object! {
            "tags" => slice(string().min(2)),
        },
    };
    let input = Value::object([(
        "user",
        Value::object([("tags", Value::array(["ok", "x"]))]),
    )]);

    let err = schema.parse(input).unwrap_err();
    assert_eq!(
        err.issues()[0].path,
        vec![
            PathSegment::from("user"),
            PathSegment::from("tags"),
            PathSegment::Index(1),
        ]
    );
    assert_eq!(err.issues()[0].path_string(), "user.tags[1]");
}
