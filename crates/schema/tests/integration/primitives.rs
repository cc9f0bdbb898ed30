//! Leaf schemas through the public surface.

use chrono::{TimeZone, Utc};
use nebula_schema::prelude::*;
use num_bigint::BigInt;
use num_complex::Complex64;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(string(), Value::from("x"), true)]
#[case(string(), Value::from(1_i64), false)]
#[case(string(), Value::Null, false)]
fn string_recognition(#[case] schema: StringSchema, #[case] input: Value, #[case] ok: bool) {
    assert_eq!(schema.parse(input).is_ok(), ok);
}

#[rstest]
#[case(Value::from(127_i64), true)]
#[case(Value::from(128_i64), false)]
#[case(Value::from(-128_i64), true)]
#[case(Value::from(-129_i64), false)]
fn int8_bounds(#[case] input: Value, #[case] ok: bool) {
    assert_eq!(int8().parse(input).is_ok(), ok);
}

#[test]
fn invalid_type_reports_both_sides() {
    let err = boolean().parse("yes").unwrap_err();
    let issue = &err.issues()[0];
    assert_eq!(issue.expected, Some(TypeCode::Bool));
    assert_eq!(issue.received, Some(TypeCode::String));
}

#[test]
fn coerced_boolean_words() {
    let schema = coerced_boolean();
    assert!(schema.parse("YES").unwrap());
    assert!(!schema.parse("off").unwrap());
    assert!(schema.parse("maybe").is_err());
}

#[test]
fn bigint_accepts_machine_integers() {
    let out = bigint().parse(42_i64).unwrap();
    assert_eq!(out, BigInt::from(42));
    let big = coerced_bigint().parse("123456789012345678901234567890").unwrap();
    assert_eq!(big.to_string(), "123456789012345678901234567890");
}

#[test]
fn complex_from_real() {
    let out = coerced_complex128().parse(2.0_f64).unwrap();
    assert_eq!(out, Complex64::new(2.0, 0.0));
}

#[test]
fn time_coercion() {
    let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    assert_eq!(coerced_time().parse("2024-01-15T10:00:00Z").unwrap(), expected);
    assert_eq!(coerced_time().parse(expected.timestamp()).unwrap(), expected);
    assert!(time().parse("2024-01-15T10:00:00Z").is_err());
}

#[test]
fn nil_accepts_only_nil() {
    assert!(nil().parse(Value::Null).is_ok());
    assert!(nil().parse(0_i64).is_err());
}

#[test]
fn any_and_unknown_pass_everything() {
    for input in [Value::Null, Value::from(1_i64), Value::array(["a"])] {
        assert_eq!(any().parse(input.clone()).unwrap(), input);
        assert_eq!(unknown().parse(input.clone()).unwrap(), input);
    }
}

#[test]
fn enum_membership_and_edits() {
    let colors = enum_of(["red", "green", "blue"].map(String::from));
    assert_eq!(colors.options().len(), 3);

    let warm = colors.extract(["red".to_owned()]);
    assert!(warm.parse("red").is_ok());
    assert_eq!(warm.parse("blue").unwrap_err().issues()[0].code, IssueCode::InvalidValue);

    let cool = colors.exclude(["red".to_owned()]);
    assert!(cool.parse("red").is_err());
    assert!(colors.parse("red").is_ok());
}

#[test]
fn literal_numbers() {
    let answer = literal(42_i64);
    assert!(answer.parse(42_i64).is_ok());
    assert!(answer.parse(41_i64).is_err());
}

#[rstest]
#[case(string().email(), "not-an-email")]
#[case(string().uuid(), "1234")]
#[case(string().ipv4(), "::1")]
#[case(string().starts_with("x"), "abc")]
fn string_formats_fail(#[case] schema: StringSchema, #[case] input: &str) {
    let err = schema.parse(input).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::InvalidFormat);
}

#[rstest]
#[case(Value::from(1e20_f64))]
#[case(Value::from(-1e20_f64))]
#[case(Value::from(f64::NAN))]
#[case(Value::from(f64::INFINITY))]
fn coerced_int_rejects_floats_it_cannot_hold(#[case] input: Value) {
    let err = coerced_int().parse(input).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::InvalidType);
}

#[test]
fn numeric_extremes_do_not_panic() {
    assert_eq!(int().multiple_of(-1).parse(i64::MIN).unwrap(), i64::MIN);
    assert_eq!(int8().multiple_of(-1).parse(-128_i64).unwrap(), i8::MIN);
    assert_eq!(float32().parse(1e300_f64).unwrap_err().issues()[0].code, IssueCode::TooBig);
}
