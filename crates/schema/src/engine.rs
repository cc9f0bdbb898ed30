//! The shared parse pipeline
//!
//! Every schema runs through the same steps:
//!
//! 1. deferred construction error
//! 2. nil handling: non-optional, default, prefault, optional/nilable
//! 3. coercion (when enabled)
//! 4. type check and child dispatch ([`SchemaType::check_input`])
//! 5. prefault retry for container type mismatches
//! 6. checks, in attachment order
//! 7. constraint wrap (pointer identity preserved when nothing changed)

use std::borrow::Cow;
use std::sync::Arc;

use crate::foundation::{
    Constraint, Internals, Output, ParseContext, Payload, RawIssue, SchemaType, Value,
};

pub(crate) type ParseResult<T> = Result<T, Vec<RawIssue>>;

enum Absent<T> {
    Done(ParseResult<T>),
    Substitute(Value),
    Continue,
}

/// Parses `input` with `schema`, returning raw issues on failure.
pub(crate) fn parse<S: SchemaType>(
    schema: &S,
    input: &Value,
    ctx: &ParseContext,
) -> ParseResult<Output<S>> {
    let internals = schema.internals();
    if let Some(error) = internals.bag().construction_error() {
        let mut issues = vec![RawIssue::construction_failed(error.to_string())];
        claim(&mut issues, internals, Some(input));
        return Err(issues);
    }

    if input.is_null() {
        match absent(schema) {
            Absent::Done(result) => return result,
            Absent::Substitute(value) => return present(schema, &value, ctx, false),
            Absent::Continue => {}
        }
    }
    present(schema, input, ctx, true)
}

/// Re-validates an already typed value: nil rules and checks only.
pub(crate) fn strict<S: SchemaType>(
    schema: &S,
    value: Output<S>,
    ctx: &ParseContext,
) -> ParseResult<Output<S>> {
    let internals = schema.internals();
    if let Some(error) = internals.bag().construction_error() {
        let mut issues = vec![RawIssue::construction_failed(error.to_string())];
        claim(&mut issues, internals, None);
        return Err(issues);
    }

    match <S::Constraint as Constraint>::split(value) {
        Some((base, origin)) => finish(schema, base, origin, Vec::new(), None, ctx),
        None => match absent(schema) {
            Absent::Done(result) => result,
            Absent::Substitute(value) => present(schema, &value, ctx, false),
            Absent::Continue => present(schema, &Value::Null, ctx, true),
        },
    }
}

fn absent<S: SchemaType>(schema: &S) -> Absent<Output<S>> {
    let internals = schema.internals();
    let flags = internals.flags;

    if flags.non_optional {
        let mut issues = vec![RawIssue::non_optional_absent(internals.type_code)];
        claim(&mut issues, internals, None);
        return Absent::Done(Err(issues));
    }
    if let Some(default) = &internals.default {
        tracing::trace!(schema = %internals.id, "nil input replaced by default");
        return Absent::Done(Ok(<S::Constraint as Constraint>::wrap(default.produce(), None)));
    }
    if let Some(prefault) = &internals.prefault {
        tracing::trace!(schema = %internals.id, "nil input replaced by prefault");
        return Absent::Substitute(prefault.produce());
    }
    if flags.optional || flags.nilable {
        if let Some(nil) = <S::Constraint as Constraint>::nil::<S::Base>() {
            let mut issues = Vec::new();
            for check in &internals.nil_checks {
                check(&mut issues);
            }
            if issues.is_empty() {
                return Absent::Done(Ok(nil));
            }
            claim(&mut issues, internals, Some(&Value::Null));
            return Absent::Done(Err(issues));
        }
    }
    if schema.accepts_nil() {
        return Absent::Continue;
    }
    let mut issues = vec![RawIssue::invalid_type(internals.type_code, &Value::Null)];
    claim(&mut issues, internals, None);
    Absent::Done(Err(issues))
}

fn present<S: SchemaType>(
    schema: &S,
    input: &Value,
    ctx: &ParseContext,
    allow_prefault: bool,
) -> ParseResult<Output<S>> {
    let internals = schema.internals();

    let candidate = if internals.flags.coerce {
        match schema.coerce(input) {
            Some(coerced) => Cow::Owned(coerced),
            None => {
                let mut issues = vec![RawIssue::invalid_type(internals.type_code, input)];
                claim(&mut issues, internals, Some(input));
                return Err(issues);
            }
        }
    } else {
        Cow::Borrowed(input)
    };

    let mut issues = Vec::new();
    let Some(base) = schema.check_input(&candidate, ctx, &mut issues) else {
        if allow_prefault && S::PREFAULT_ON_MISMATCH {
            if let Some(prefault) = &internals.prefault {
                tracing::trace!(schema = %internals.id, "type mismatch replaced by prefault");
                return present(schema, &prefault.produce(), ctx, false);
            }
        }
        claim(&mut issues, internals, Some(input));
        return Err(issues);
    };

    let origin = if schema.preserves_identity() {
        input.pointer().and_then(|p| p.downcast::<S::Base>())
    } else {
        None
    };
    finish(schema, base, origin, issues, Some(input), ctx)
}

fn finish<S: SchemaType>(
    schema: &S,
    base: S::Base,
    origin: Option<Arc<S::Base>>,
    issues: Vec<RawIssue>,
    input: Option<&Value>,
    ctx: &ParseContext,
) -> ParseResult<Output<S>> {
    let internals = schema.internals();
    let mut payload = Payload::with_issues(base, issues);

    // Child failures leave the base incomplete; checks would measure garbage.
    if !payload.has_issues() {
        for check in &internals.checks {
            let before = payload.issues().len();
            check.apply(&mut payload, ctx);
            let def = check.def();
            if payload.issues().len() > before {
                if let Some(error) = &def.error {
                    for issue in &mut payload.issues_mut()[before..] {
                        if issue.error.is_none() {
                            issue.error = Some(error.clone());
                        }
                    }
                }
                if def.abort {
                    break;
                }
            }
        }
    }

    let (value, mut issues, mutated) = payload.into_parts();
    if !issues.is_empty() {
        claim(&mut issues, internals, input);
        return Err(issues);
    }
    let origin = if mutated { None } else { origin };
    Ok(<S::Constraint as Constraint>::wrap(value, origin))
}

/// Attributes unclaimed issues to the schema that is returning them: fills
/// in its error override (behind any check-level map) and the input it was given.
fn claim<B>(issues: &mut [RawIssue], internals: &Internals<B>, input: Option<&Value>) {
    for issue in issues.iter_mut().filter(|issue| !issue.claimed) {
        issue.claimed = true;
        if let Some(schema_map) = &internals.error {
            issue.error = Some(match issue.error.take() {
                Some(check_map) => check_map.or(schema_map.clone()),
                None => schema_map.clone(),
            });
        }
        if issue.input.is_none() && issue.path.is_empty() {
            issue.input = input.cloned();
        }
    }
}
