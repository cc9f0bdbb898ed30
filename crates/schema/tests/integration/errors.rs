//! Error value: messages, formatting and the error predicates.

use nebula_schema::foundation::{as_schema_error, is_schema_error};
use nebula_schema::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn login() -> ObjectSchema {
    object! {
        "user" => string().min(3),
        "password" => string().min(8),
    }
}

fn bad_login() -> Value {
    Value::object([("user", "al"), ("password", "short")])
}

#[test]
fn default_messages() {
    let err = login().parse(bad_login()).unwrap_err();
    assert_eq!(
        err.issues()[0].message,
        "Too small: expected string to have >=3 characters"
    );
}

#[test]
fn context_error_map_is_consulted_after_schema_maps() {
    let ctx = ParseContext::builder()
        .error_fn(|issue: &RawIssue| Some(format!("ctx: {}", issue.code)))
        .build();

    let schema = object! {
        "user" => string().min(3).error("user override"),
        "password" => string().min(8),
    };
    let err = schema.parse_with(bad_login(), &ctx).unwrap_err();
    assert_eq!(err.issues()[0].message, "user override");
    assert_eq!(err.issues()[1].message, "ctx: too_small");
}

#[test]
fn flatten_groups_by_field() {
    let err = login().parse(bad_login()).unwrap_err();
    let flat = err.flatten();
    assert!(flat.form_errors.is_empty());
    assert_eq!(flat.field_errors.len(), 2);
    assert_eq!(flat.field_errors["password"].len(), 1);
}

#[test]
fn format_builds_a_tree() {
    let err = login().parse(bad_login()).unwrap_err();
    let tree = err.format();
    assert_eq!(tree["_errors"], json!([]));
    assert_eq!(tree["user"]["_errors"].as_array().map(Vec::len), Some(1));
}

#[test]
fn prettify_lists_paths() {
    let err = login().parse(bad_login()).unwrap_err();
    let text = err.prettify();
    assert!(text.contains("→ at user"));
    assert!(text.contains("→ at password"));
}

#[test]
fn issues_serialize_with_codes_and_paths() {
    let err = login().parse(bad_login()).unwrap_err();
    let json = err.to_json();
    assert_eq!(json[0]["code"], json!("too_small"));
    assert_eq!(json[0]["path"], json!(["user"]));
}

#[test]
fn error_predicates() {
    let err = login().parse(bad_login()).unwrap_err();
    let boxed: Box<dyn std::error::Error> = Box::new(err.clone());
    assert!(is_schema_error(boxed.as_ref()));
    assert_eq!(as_schema_error(boxed.as_ref()), Some(&err));

    let other: Box<dyn std::error::Error> = "plain".into();
    assert!(!is_schema_error(other.as_ref()));
}

#[test]
fn parsing_twice_gives_equal_issues() {
    let schema = login();
    let first = schema.parse(bad_login()).unwrap_err();
    let second = schema.parse(bad_login()).unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn report_input_keeps_offending_value() {
    let ctx = ParseContext::builder().report_input(true).build();
    let err = int().parse_with(Value::from("x"), &ctx).unwrap_err();
    assert_eq!(err.issues()[0].input, Some(Value::from("x")));

    let err = int().parse("x").unwrap_err();
    assert_eq!(err.issues()[0].input, None);
}

#[test]
fn construction_errors_surface_on_parse() {
    let schema = object! { "code" => string().regex("[") };
    let err = schema.parse(Value::object([("code", "x")])).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::ConstructionFailed);
    assert_eq!(err.issues()[0].path_string(), "code");
}

#[test]
fn declining_check_map_falls_back_to_schema_map() {
    use nebula_schema::checks::min_length;

    let picky = ErrorMap::new(|issue: &RawIssue| {
        (issue.code == IssueCode::TooBig).then(|| "check says too long".to_owned())
    });
    let schema = string()
        .with_check(min_length(3).error(picky))
        .error("schema says too short");

    let err = schema.parse("ab").unwrap_err();
    assert_eq!(err.issues()[0].message, "schema says too short");
}

#[test]
fn check_map_answering_wins_over_schema_map() {
    use nebula_schema::checks::min_length;

    let schema = string()
        .with_check(min_length(3).error("from check"))
        .error("from schema");
    let err = schema.parse("ab").unwrap_err();
    assert_eq!(err.issues()[0].message, "from check");
}
