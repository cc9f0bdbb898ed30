//! Modifiers, refinements, pipes and transforms.

use nebula_schema::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn modifiers_never_change_the_receiver() {
    let base = string().min(2);
    let _optional = base.optional();
    let _described = base.describe("name");
    let _refined = base.refine(|s: &String| s.starts_with('a'));
    let _bounded = base.max(3);

    assert!(base.parse(Value::Null).is_err());
    assert!(base.parse("bbbbbb").is_ok());
    assert!(base.description().is_none());
}

#[test]
fn every_modifier_mints_a_new_id() {
    let base = int();
    let ids = [
        base.optional().internals().id(),
        base.nilable().internals().id(),
        base.positive().internals().id(),
        base.default(1).internals().id(),
        base.coerced().internals().id(),
    ];
    for id in ids {
        assert_ne!(id, base.internals().id());
    }
}

#[test]
fn optional_and_nullish_outputs() {
    assert_eq!(int().optional().parse(Value::Null).unwrap(), None);
    assert_eq!(int().nullish().parse(Value::Null).unwrap(), None);
    assert_eq!(*int().optional().parse(5_i64).unwrap().unwrap(), 5);
}

#[test]
fn non_optional_reports_its_own_code() {
    let err = int().optional().non_optional().parse(Value::Null).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::NonOptionalAbsent);
}

#[test]
fn refine_with_message() {
    let even = int().refine_with(|n: &i64| n % 2 == 0, "must be even");
    assert!(even.parse(4_i64).is_ok());
    let err = even.parse(3_i64).unwrap_err();
    assert_eq!(err.issues()[0].code, IssueCode::Custom);
    assert_eq!(err.issues()[0].message, "must be even");
}

#[test]
fn refinements_run_in_order_after_builtin_checks() {
    let schema = string()
        .min(3)
        .refine_with(|s: &String| s.contains('@'), "needs @");
    let err = schema.parse("a").unwrap_err();
    // Both are checks; both report.
    assert_eq!(err.len(), 2);
    assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
}

#[test]
fn abort_stops_later_checks() {
    use nebula_schema::checks::min_length;

    let schema = string()
        .with_check(min_length(3).abort())
        .refine_with(|s: &String| s.contains('@'), "needs @");
    let err = schema.parse("a").unwrap_err();
    assert_eq!(err.len(), 1);
}

#[test]
fn transform_then_pipe() {
    let schema = string()
        .trim()
        .transform(|s: String, _: &mut RefineContext<'_>| s.len() as i64)
        .pipe(int().positive());
    assert_eq!(schema.parse(" abc ").unwrap(), 3);
    assert!(schema.parse("   ").is_err());
}

#[test]
fn transform_can_report_issues() {
    let schema = string().transform(|s: String, ctx: &mut RefineContext<'_>| {
        s.parse::<u16>().unwrap_or_else(|_| {
            ctx.issue("not a port");
            0
        })
    });
    assert_eq!(schema.parse("8080").unwrap(), 8080);
    let err = schema.parse("http").unwrap_err();
    assert_eq!(err.issues()[0].message, "not a port");
}

#[test]
fn default_fn_is_called_per_parse() {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    let counter = Arc::new(AtomicI64::new(0));
    let next = Arc::clone(&counter);
    let schema = int().default_fn(move || next.fetch_add(1, Ordering::SeqCst));
    assert_eq!(schema.parse(Value::Null).unwrap(), 0);
    assert_eq!(schema.parse(Value::Null).unwrap(), 1);
}

#[test]
fn strict_parse_revalidates_typed_values() {
    let schema = int().positive();
    assert_eq!(schema.strict_parse(3).unwrap(), 3);
    assert!(schema.strict_parse(-3).is_err());
}

#[test]
fn schema_level_error_override() {
    let schema = int().error("give me a number");
    let err = schema.parse("x").unwrap_err();
    assert_eq!(err.issues()[0].message, "give me a number");
}

#[test]
fn params_apply_together() {
    let schema = int().with_params(Params::new().coerce(true).description("count"));
    assert_eq!(schema.parse("12").unwrap(), 12);
    assert_eq!(schema.description().as_deref(), Some("count"));
}
