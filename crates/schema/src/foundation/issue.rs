//! Validation issues
//!
//! A [`RawIssue`] is what schemas and checks emit while parsing. It carries
//! structured data and an optional error-map override but no message yet.
//! [`ParseContext::finalize`](crate::foundation::ParseContext::finalize)
//! resolves the message and freezes the path, producing an [`Issue`].

use std::borrow::Cow;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::foundation::{ErrorMap, TypeCode, Value};

/// Structured issue parameters (`minimum`, `origin`, `format`, ...).
pub type IssueParams = SmallVec<[(Cow<'static, str>, Value); 4]>;

// ============================================================================
// CODES
// ============================================================================

/// The closed set of issue kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IssueCode {
    InvalidType,
    InvalidValue,
    TooSmall,
    TooBig,
    NotMultipleOf,
    InvalidFormat,
    UnrecognizedKeys,
    InvalidUnion,
    InvalidKey,
    InvalidElement,
    Custom,
    NonOptionalAbsent,
    ConstructionFailed,
}

impl IssueCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::InvalidValue => "invalid_value",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::NotMultipleOf => "not_multiple_of",
            Self::InvalidFormat => "invalid_format",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::InvalidUnion => "invalid_union",
            Self::InvalidKey => "invalid_key",
            Self::InvalidElement => "invalid_element",
            Self::Custom => "custom",
            Self::NonOptionalAbsent => "non_optional_absent",
            Self::ConstructionFailed => "construction_failed",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a size or range bound was measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    String,
    Array,
    Number,
    BigInt,
    Date,
    Object,
    Record,
    Map,
}

impl Origin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Array => "array",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::Date => "date",
            Self::Object => "object",
            Self::Record => "record",
            Self::Map => "map",
        }
    }
}

// ============================================================================
// PATH
// ============================================================================

/// One step from the root input to the offending value.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
    /// A non-string map key.
    Tag(Value),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
            Self::Tag(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Key(k) => serializer.serialize_str(k),
            Self::Index(i) => serializer.serialize_u64(*i as u64),
            Self::Tag(v) => v.serialize(serializer),
        }
    }
}

/// Renders a path as `user.tags[0]`.
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(k) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(k);
            }
            PathSegment::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
            PathSegment::Tag(v) => {
                out.push('[');
                out.push_str(&v.to_string());
                out.push(']');
            }
        }
    }
    out
}

// ============================================================================
// RAW ISSUE
// ============================================================================

/// An issue before message resolution.
#[derive(Debug, Clone)]
pub struct RawIssue {
    pub code: IssueCode,
    pub input: Option<Value>,
    /// Relative to the schema that emitted the issue; parents prepend.
    pub path: Vec<PathSegment>,
    pub expected: Option<TypeCode>,
    pub received: Option<TypeCode>,
    pub keys: Vec<String>,
    pub params: IssueParams,
    /// Per-branch issues of a union, or the nested issues of a key/element.
    pub errors: Vec<Vec<RawIssue>>,
    /// Explicit message; wins over every error map.
    pub message: Option<String>,
    pub(crate) error: Option<ErrorMap>,
    pub(crate) claimed: bool,
}

impl RawIssue {
    pub fn new(code: IssueCode) -> Self {
        Self {
            code,
            input: None,
            path: Vec::new(),
            expected: None,
            received: None,
            keys: Vec::new(),
            params: SmallVec::new(),
            errors: Vec::new(),
            message: None,
            error: None,
            claimed: false,
        }
    }

    pub fn invalid_type(expected: TypeCode, input: &Value) -> Self {
        let mut issue = Self::new(IssueCode::InvalidType).with_input(input.clone());
        issue.expected = Some(expected);
        issue.received = Some(input.type_code());
        issue
    }

    pub fn invalid_value(values: &[Value]) -> Self {
        Self::new(IssueCode::InvalidValue).with_param("values", Value::Array(values.to_vec()))
    }

    pub fn too_small(origin: Origin, minimum: Value, inclusive: bool) -> Self {
        Self::new(IssueCode::TooSmall)
            .with_param("origin", origin.as_str())
            .with_param("minimum", minimum)
            .with_param("inclusive", inclusive)
    }

    pub fn too_big(origin: Origin, maximum: Value, inclusive: bool) -> Self {
        Self::new(IssueCode::TooBig)
            .with_param("origin", origin.as_str())
            .with_param("maximum", maximum)
            .with_param("inclusive", inclusive)
    }

    pub fn not_multiple_of(divisor: Value) -> Self {
        Self::new(IssueCode::NotMultipleOf).with_param("divisor", divisor)
    }

    pub fn invalid_format(format: &'static str) -> Self {
        Self::new(IssueCode::InvalidFormat).with_param("format", format)
    }

    pub fn unrecognized_keys(keys: Vec<String>) -> Self {
        let mut issue = Self::new(IssueCode::UnrecognizedKeys);
        issue.keys = keys;
        issue
    }

    pub fn invalid_union(errors: Vec<Vec<RawIssue>>) -> Self {
        let mut issue = Self::new(IssueCode::InvalidUnion);
        issue.errors = errors;
        issue
    }

    pub fn invalid_key(origin: Origin, key: Value, issues: Vec<RawIssue>) -> Self {
        let mut issue = Self::new(IssueCode::InvalidKey)
            .with_param("origin", origin.as_str())
            .with_param("key", key);
        issue.errors = vec![issues];
        issue
    }

    pub fn invalid_element(origin: Origin, issues: Vec<RawIssue>) -> Self {
        let mut issue = Self::new(IssueCode::InvalidElement).with_param("origin", origin.as_str());
        issue.errors = vec![issues];
        issue
    }

    pub fn custom() -> Self {
        Self::new(IssueCode::Custom)
    }

    pub fn non_optional_absent(expected: TypeCode) -> Self {
        let mut issue = Self::new(IssueCode::NonOptionalAbsent).with_input(Value::Null);
        issue.expected = Some(expected);
        issue.received = Some(TypeCode::Nil);
        issue
    }

    pub fn construction_failed(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self::new(IssueCode::ConstructionFailed).with_param("reason", reason)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl IntoIterator<Item = PathSegment>) -> Self {
        self.path = path.into_iter().collect();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_error(mut self, error: Option<ErrorMap>) -> Self {
        self.error = error;
        self
    }

    /// Prepends a segment; used by containers as child issues bubble up.
    pub fn prefix(&mut self, segment: PathSegment) {
        self.path.insert(0, segment);
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        find_param(&self.params, key)
    }

    pub fn origin(&self) -> Option<&str> {
        self.param("origin").and_then(Value::as_str)
    }

    pub fn minimum(&self) -> Option<&Value> {
        self.param("minimum")
    }

    pub fn maximum(&self) -> Option<&Value> {
        self.param("maximum")
    }

    pub fn inclusive(&self) -> bool {
        self.param("inclusive")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }
}

/// Prefixes every issue in `issues` with `segment`.
pub(crate) fn prefixed(
    issues: Vec<RawIssue>,
    segment: &PathSegment,
) -> impl Iterator<Item = RawIssue> + '_ {
    issues.into_iter().map(move |mut issue| {
        issue.prefix(segment.clone());
        issue
    })
}

fn find_param<'a>(params: &'a IssueParams, key: &str) -> Option<&'a Value> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

// ============================================================================
// FINAL ISSUE
// ============================================================================

/// A finalized issue: message resolved, path frozen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub code: IssueCode,
    pub message: String,
    pub path: Vec<PathSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<TypeCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<TypeCode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "SmallVec::is_empty", serialize_with = "serialize_params")]
    pub params: IssueParams,
    /// Nested issues, with paths relative to this issue.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Vec<Issue>>,
}

impl Issue {
    pub fn param(&self, key: &str) -> Option<&Value> {
        find_param(&self.params, key)
    }

    pub fn origin(&self) -> Option<&str> {
        self.param("origin").and_then(Value::as_str)
    }

    pub fn minimum(&self) -> Option<&Value> {
        self.param("minimum")
    }

    pub fn maximum(&self) -> Option<&Value> {
        self.param("maximum")
    }

    pub fn inclusive(&self) -> bool {
        self.param("inclusive")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Path rendered as `a.b[0]`.
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "{}: {}: {}", self.path_string(), self.code, self.message)
        }
    }
}

/// Folds a finalized issue back into a raw one. The resolved message is
/// kept as an explicit override so it survives re-finalization.
impl From<Issue> for RawIssue {
    fn from(issue: Issue) -> Self {
        Self {
            code: issue.code,
            input: issue.input,
            path: issue.path,
            expected: issue.expected,
            received: issue.received,
            keys: issue.keys,
            params: issue.params,
            errors: issue
                .errors
                .into_iter()
                .map(|branch| branch.into_iter().map(RawIssue::from).collect())
                .collect(),
            message: Some(issue.message),
            error: None,
            claimed: true,
        }
    }
}

fn serialize_params<S: Serializer>(params: &IssueParams, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (k, v) in params {
        map.serialize_entry(k.as_ref(), v)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_path() {
        let path = vec![
            PathSegment::from("user"),
            PathSegment::from("tags"),
            PathSegment::Index(0),
        ];
        assert_eq!(format_path(&path), "user.tags[0]");
        assert_eq!(format_path(&[PathSegment::Index(2)]), "[2]");
    }

    #[test]
    fn test_prefix_builds_outward() {
        let mut issue = RawIssue::custom().with_path([PathSegment::from("b")]);
        issue.prefix(PathSegment::from("a"));
        assert_eq!(issue.path, vec![PathSegment::from("a"), PathSegment::from("b")]);
    }

    #[test]
    fn test_bounds_accessors() {
        let issue = RawIssue::too_small(Origin::String, Value::Uint(3), false);
        assert_eq!(issue.origin(), Some("string"));
        assert_eq!(issue.minimum(), Some(&Value::Uint(3)));
        assert!(!issue.inclusive());
        assert!(issue.maximum().is_none());
    }

    #[test]
    fn test_invalid_type_records_received() {
        let issue = RawIssue::invalid_type(TypeCode::String, &Value::Int(1));
        assert_eq!(issue.expected, Some(TypeCode::String));
        assert_eq!(issue.received, Some(TypeCode::Int));
    }
}
