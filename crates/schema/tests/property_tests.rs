//! Property-based tests for nebula-schema.

use nebula_schema::prelude::*;
use proptest::prelude::*;
// The schema prelude exports `any()` too; the strategy wins here.
use proptest::prelude::any;

// ============================================================================
// DETERMINISM: parse(x) == parse(x)
// ============================================================================

proptest! {
    #[test]
    fn string_parse_is_deterministic(s in ".{0,20}") {
        let schema = string().min(3).max(10);
        prop_assert_eq!(schema.parse(s.as_str()), schema.parse(s.as_str()));
    }

    #[test]
    fn int_parse_is_deterministic(n in any::<i64>()) {
        let schema = int().gte(0).lt(100);
        prop_assert_eq!(schema.parse(n), schema.parse(n));
    }

    #[test]
    fn email_parse_is_deterministic(s in ".*") {
        let schema = string().email();
        prop_assert_eq!(schema.parse(s.as_str()).is_ok(), schema.parse(s.as_str()).is_ok());
    }
}

// ============================================================================
// CHECK SEMANTICS: acceptance matches the predicate
// ============================================================================

proptest! {
    #[test]
    fn length_bounds_count_chars(s in "\\PC{0,15}") {
        let schema = string().min(3).max(10);
        let len = s.chars().count();
        prop_assert_eq!(schema.parse(s.as_str()).is_ok(), (3..=10).contains(&len));
    }

    #[test]
    fn int8_accepts_exactly_its_range(n in any::<i64>()) {
        let ok = int8().parse(n).is_ok();
        prop_assert_eq!(ok, i8::try_from(n).is_ok());
    }

    #[test]
    fn coerced_int_reads_its_own_rendering(n in any::<i64>()) {
        prop_assert_eq!(coerced_int().parse(n.to_string()).unwrap(), n);
    }

    #[test]
    fn failures_report_one_issue_per_failed_check(s in "[a-z]{0,2}") {
        let schema = string().min(3).starts_with("q");
        let err = schema.parse(s.as_str()).unwrap_err();
        let expected = if s.starts_with('q') { 1 } else { 2 };
        prop_assert_eq!(err.len(), expected);
    }
}

// ============================================================================
// IMMUTABILITY: modifiers never change the receiver
// ============================================================================

proptest! {
    #[test]
    fn refining_a_copy_leaves_original(n in -1000i64..1000) {
        let base = int().gte(-500);
        let before = base.parse(n).is_ok();
        let _narrow = base.lte(0).positive();
        prop_assert_eq!(base.parse(n).is_ok(), before);
    }

    #[test]
    fn optional_copy_leaves_original(s in proptest::option::of("[a-z]{1,5}")) {
        let base = string();
        let _loose = base.optional();
        let input = Value::from(s.clone());
        prop_assert_eq!(base.parse(input).is_ok(), s.is_some());
    }
}

// ============================================================================
// IDEMPOTENCE: accepted output parses to itself
// ============================================================================

proptest! {
    #[test]
    fn object_output_reparses_unchanged(name in "[a-z]{1,8}", age in 0i64..150) {
        let schema = object! {
            "name" => string().trim().min(1),
            "age" => int().non_negative(),
            "nick" => string().optional(),
        };
        let input = Value::object([("name", Value::from(name)), ("age", Value::from(age))]);
        let first = schema.parse(input).unwrap();
        let second = schema.parse(Value::from(first.clone())).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalizers_are_idempotent(s in "[ a-zA-Z]{0,12}") {
        let schema = string().trim().to_lowercase();
        let once = schema.parse(s.as_str()).unwrap();
        let twice = schema.parse(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }
}
