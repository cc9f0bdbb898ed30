//! Error types
//!
//! [`SchemaError`] is the aggregated result of a failed parse. [`BuildError`]
//! describes a schema that could not be constructed; it is stored on the
//! schema and reported as a `construction_failed` issue on first parse.

use std::error::Error as StdError;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::foundation::{Issue, PathSegment, RawIssue};

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// All issues from one parse, in emission order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", summarize(.issues))]
pub struct SchemaError {
    issues: Vec<Issue>,
}

fn summarize(issues: &[Issue]) -> String {
    match issues {
        [] => "validation failed".to_owned(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Errors split into form-level and per-field messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlattenedError {
    /// Messages of issues with an empty path.
    pub form_errors: Vec<String>,
    /// Messages keyed by the first path segment.
    pub field_errors: IndexMap<String, Vec<String>>,
}

impl SchemaError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Issues as raw issues, ready to fold into another parse.
    pub fn into_raw_issues(self) -> Vec<RawIssue> {
        self.issues.into_iter().map(RawIssue::from).collect()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn flatten(&self) -> FlattenedError {
        let mut flat = FlattenedError::default();
        for issue in &self.issues {
            match issue.path.first() {
                None => flat.form_errors.push(issue.message.clone()),
                Some(segment) => flat
                    .field_errors
                    .entry(segment.to_string())
                    .or_default()
                    .push(issue.message.clone()),
            }
        }
        flat
    }

    /// Nested tree mirroring the input shape; every node carries `_errors`.
    pub fn format(&self) -> serde_json::Value {
        let mut root = empty_node();
        for issue in &self.issues {
            let mut node = &mut root;
            for segment in &issue.path {
                node = child_node(node, segment);
            }
            push_message(node, &issue.message);
        }
        root
    }

    /// Human-readable multi-line summary.
    pub fn prettify(&self) -> String {
        let mut out = String::new();
        for issue in &self.issues {
            out.push_str("✖ ");
            out.push_str(&issue.message);
            out.push('\n');
            if !issue.path.is_empty() {
                out.push_str("  → at ");
                out.push_str(&issue.path_string());
                out.push('\n');
            }
        }
        out
    }

    /// Issues as a JSON array.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.issues).unwrap_or(serde_json::Value::Null)
    }
}

fn empty_node() -> serde_json::Value {
    serde_json::json!({ "_errors": [] })
}

fn child_node<'a>(node: &'a mut serde_json::Value, segment: &PathSegment) -> &'a mut serde_json::Value {
    let key = segment.to_string();
    match node {
        serde_json::Value::Object(map) => map.entry(key).or_insert_with(empty_node),
        other => other,
    }
}

fn push_message(node: &mut serde_json::Value, message: &str) {
    if let Some(serde_json::Value::Array(errors)) = node.get_mut("_errors") {
        errors.push(serde_json::Value::String(message.to_owned()));
    }
}

impl<'a> IntoIterator for &'a SchemaError {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl Serialize for SchemaError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.issues.serialize(serializer)
    }
}

/// Whether `err` is a [`SchemaError`].
pub fn is_schema_error(err: &(dyn StdError + 'static)) -> bool {
    err.is::<SchemaError>()
}

/// Downcasts `err` to a [`SchemaError`].
pub fn as_schema_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a SchemaError> {
    err.downcast_ref::<SchemaError>()
}

// ============================================================================
// BUILD ERROR
// ============================================================================

/// A schema definition that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("invalid regex pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("option {index} has no literal values for discriminator `{discriminator}`")]
    MissingDiscriminator { discriminator: String, index: usize },

    #[error("duplicate discriminator value {value} for `{discriminator}` (options {first} and {second})")]
    DuplicateDiscriminator {
        discriminator: String,
        value: String,
        first: usize,
        second: usize,
    },

    #[error("{0}")]
    Custom(String),
}

impl BuildError {
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, ParseContext};
    use pretty_assertions::assert_eq;

    fn sample() -> SchemaError {
        let ctx = ParseContext::new();
        ctx.finalize(vec![
            RawIssue::custom().with_message("form"),
            RawIssue::custom()
                .with_message("bad name")
                .with_path([PathSegment::from("name")]),
            RawIssue::custom()
                .with_message("bad tag")
                .with_path([PathSegment::from("tags"), PathSegment::Index(1)]),
        ])
    }

    #[test]
    fn test_flatten() {
        let flat = sample().flatten();
        assert_eq!(flat.form_errors, vec!["form".to_owned()]);
        assert_eq!(flat.field_errors["name"], vec!["bad name".to_owned()]);
        assert_eq!(flat.field_errors["tags"], vec!["bad tag".to_owned()]);
    }

    #[test]
    fn test_format_tree() {
        let tree = sample().format();
        assert_eq!(
            tree,
            serde_json::json!({
                "_errors": ["form"],
                "name": { "_errors": ["bad name"] },
                "tags": { "_errors": [], "1": { "_errors": ["bad tag"] } }
            })
        );
    }

    #[test]
    fn test_prettify() {
        let pretty = sample().prettify();
        assert!(pretty.contains("✖ bad tag\n  → at tags[1]"));
    }

    #[test]
    fn test_detection() {
        let err: Box<dyn StdError> = Box::new(sample());
        assert!(is_schema_error(err.as_ref()));
        assert_eq!(as_schema_error(err.as_ref()).map(SchemaError::len), Some(3));

        let other: Box<dyn StdError> = Box::new(BuildError::custom("x"));
        assert!(!is_schema_error(other.as_ref()));
    }

    #[test]
    fn test_display_summary() {
        let err = sample();
        assert_eq!(err.to_string(), "custom: form (and 2 more)");
        assert_eq!(err.issues()[1].code, IssueCode::Custom);
    }
}
