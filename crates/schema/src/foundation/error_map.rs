//! Error maps and default messages
//!
//! An [`ErrorMap`] turns a [`RawIssue`] into a message, or declines by
//! returning `None` so the next map in line gets a chance. The order is:
//!
//! 1. explicit message on the issue
//! 2. the map attached to the emitting check, then the one on its schema
//! 3. the map on the [`ParseContext`]
//! 4. the map in the global [`ParseConfig`](crate::foundation::ParseConfig)
//! 5. [`default_message`]

use std::fmt;
use std::sync::Arc;

use crate::foundation::{IssueCode, ParseContext, RawIssue, Value};

type MapFn = dyn Fn(&RawIssue) -> Option<String> + Send + Sync;

/// Message override: a fixed string or a function of the issue.
#[derive(Clone)]
pub struct ErrorMap(Arc<MapFn>);

impl ErrorMap {
    pub fn new<F>(map: F) -> Self
    where
        F: Fn(&RawIssue) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(map))
    }

    /// A map that always answers with `message`.
    pub fn message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Some(message.clone()))
    }

    pub fn resolve(&self, issue: &RawIssue) -> Option<String> {
        (self.0)(issue)
    }

    /// Tries `self`, then `fallback` when `self` declines.
    #[must_use]
    pub fn or(self, fallback: ErrorMap) -> Self {
        Self::new(move |issue| self.resolve(issue).or_else(|| fallback.resolve(issue)))
    }
}

impl fmt::Debug for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorMap(..)")
    }
}

impl From<&str> for ErrorMap {
    fn from(message: &str) -> Self {
        Self::message(message)
    }
}

impl From<String> for ErrorMap {
    fn from(message: String) -> Self {
        Self::message(message)
    }
}

pub(crate) fn resolve_message(issue: &RawIssue, ctx: &ParseContext) -> String {
    issue
        .message
        .clone()
        .or_else(|| issue.error.as_ref().and_then(|map| map.resolve(issue)))
        .or_else(|| ctx.error_map().and_then(|map| map.resolve(issue)))
        .or_else(|| ctx.config().error.as_ref().and_then(|map| map.resolve(issue)))
        .unwrap_or_else(|| default_message(issue))
}

// ============================================================================
// DEFAULT MESSAGES
// ============================================================================

/// The built-in English message for an issue.
pub fn default_message(issue: &RawIssue) -> String {
    match issue.code {
        IssueCode::InvalidType => match (issue.expected, issue.received) {
            (Some(expected), Some(received)) => {
                format!("Invalid input: expected {expected}, received {received}")
            }
            (Some(expected), None) => format!("Invalid input: expected {expected}"),
            _ => "Invalid input".to_owned(),
        },
        IssueCode::InvalidValue => match issue.param("values") {
            Some(Value::Array(values)) if values.len() == 1 => {
                format!("Invalid input: expected {}", values[0])
            }
            Some(Value::Array(values)) => {
                let joined = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("|");
                format!("Invalid option: expected one of {joined}")
            }
            _ => "Invalid input".to_owned(),
        },
        IssueCode::TooSmall => bound_message(issue, "small", ">", issue.minimum()),
        IssueCode::TooBig => bound_message(issue, "big", "<", issue.maximum()),
        IssueCode::NotMultipleOf => match issue.param("divisor") {
            Some(divisor) => format!("Invalid number: must be a multiple of {divisor}"),
            None => "Invalid number".to_owned(),
        },
        IssueCode::InvalidFormat => format_message(issue),
        IssueCode::UnrecognizedKeys => {
            let keys = issue
                .keys
                .iter()
                .map(|k| format!("{k:?}"))
                .collect::<Vec<_>>()
                .join(", ");
            if issue.keys.len() == 1 {
                format!("Unrecognized key: {keys}")
            } else {
                format!("Unrecognized keys: {keys}")
            }
        }
        IssueCode::InvalidUnion => "Invalid input".to_owned(),
        IssueCode::InvalidKey => format!("Invalid key in {}", issue.origin().unwrap_or("record")),
        IssueCode::InvalidElement => {
            format!("Invalid value in {}", issue.origin().unwrap_or("collection"))
        }
        IssueCode::Custom => "Invalid input".to_owned(),
        IssueCode::NonOptionalAbsent => match issue.expected {
            Some(expected) => format!("Invalid input: expected {expected}, received nil"),
            None => "Invalid input: value is required".to_owned(),
        },
        IssueCode::ConstructionFailed => match issue.param("reason").and_then(Value::as_str) {
            Some(reason) => format!("Invalid schema: {reason}"),
            None => "Invalid schema".to_owned(),
        },
    }
}

fn bound_message(issue: &RawIssue, size: &str, op: &str, bound: Option<&Value>) -> String {
    let Some(bound) = bound else {
        return format!("Too {size}");
    };
    let cmp = if issue.inclusive() {
        format!("{op}=")
    } else {
        op.to_owned()
    };
    let origin = issue.origin().unwrap_or("value");
    let unit = match origin {
        "string" => Some("characters"),
        "array" => Some("items"),
        "map" | "record" | "object" => Some("entries"),
        _ => None,
    };
    match unit {
        Some(unit) => format!("Too {size}: expected {origin} to have {cmp}{bound} {unit}"),
        None => format!("Too {size}: expected {origin} to be {cmp}{bound}"),
    }
}

fn format_message(issue: &RawIssue) -> String {
    let format = issue
        .param("format")
        .and_then(Value::as_str)
        .unwrap_or("format");
    let expected = issue.param("expected").and_then(Value::as_str);
    match (format, expected) {
        ("starts_with", Some(prefix)) => format!("Invalid string: must start with {prefix:?}"),
        ("ends_with", Some(suffix)) => format!("Invalid string: must end with {suffix:?}"),
        ("includes", Some(needle)) => format!("Invalid string: must include {needle:?}"),
        ("regex", Some(pattern)) => format!("Invalid string: must match pattern {pattern}"),
        ("lowercase", _) => "Invalid string: must be lowercase".to_owned(),
        ("uppercase", _) => "Invalid string: must be uppercase".to_owned(),
        (other, _) => format!("Invalid {other}"),
    }
}
