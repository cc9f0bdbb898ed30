//! Parse context and check payload

use std::sync::Arc;

use crate::foundation::error_map::resolve_message;
use crate::foundation::{config, ErrorMap, Issue, ParseConfig, PathSegment, RawIssue, SchemaError};

// ============================================================================
// PARSE CONTEXT
// ============================================================================

/// Per-call parse settings.
///
/// Holds a snapshot of the global [`ParseConfig`] taken at construction plus
/// any per-call overrides.
///
/// # Examples
///
/// ```rust,ignore
/// let ctx = ParseContext::builder()
///     .error(|issue: &RawIssue| Some(format!("bad: {}", issue.code)))
///     .report_input(true)
///     .build();
/// schema.parse_with(&input, &ctx)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext {
    config: Arc<ParseConfig>,
    error: Option<ErrorMap>,
    report_input: Option<bool>,
    path_prefix: Vec<PathSegment>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseContext {
    pub fn new() -> Self {
        Self {
            config: config(),
            error: None,
            report_input: None,
            path_prefix: Vec::new(),
        }
    }

    pub fn builder() -> ParseContextBuilder {
        ParseContextBuilder::default()
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn error_map(&self) -> Option<&ErrorMap> {
        self.error.as_ref()
    }

    pub fn report_input(&self) -> bool {
        self.report_input.unwrap_or(self.config.report_input)
    }

    pub fn path_prefix(&self) -> &[PathSegment] {
        &self.path_prefix
    }

    /// Resolves messages and prepends the path prefix.
    pub fn finalize(&self, issues: Vec<RawIssue>) -> SchemaError {
        let issues: Vec<Issue> = issues
            .into_iter()
            .map(|issue| self.finalize_issue(issue, &self.path_prefix))
            .collect();
        tracing::trace!(count = issues.len(), "finalized issues");
        SchemaError::new(issues)
    }

    fn finalize_issue(&self, raw: RawIssue, prefix: &[PathSegment]) -> Issue {
        let message = resolve_message(&raw, self);
        let mut path = prefix.to_vec();
        path.extend(raw.path);
        Issue {
            code: raw.code,
            message,
            path,
            input: raw.input.filter(|_| self.report_input()),
            expected: raw.expected,
            received: raw.received,
            keys: raw.keys,
            params: raw.params,
            errors: raw
                .errors
                .into_iter()
                .map(|branch| {
                    branch
                        .into_iter()
                        .map(|issue| self.finalize_issue(issue, &[]))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Builder for [`ParseContext`].
#[derive(Debug, Default)]
pub struct ParseContextBuilder {
    error: Option<ErrorMap>,
    report_input: Option<bool>,
    path_prefix: Vec<PathSegment>,
}

impl ParseContextBuilder {
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn error_fn<F>(mut self, map: F) -> Self
    where
        F: Fn(&RawIssue) -> Option<String> + Send + Sync + 'static,
    {
        self.error = Some(ErrorMap::new(map));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn report_input(mut self, report: bool) -> Self {
        self.report_input = Some(report);
        self
    }

    /// Path prepended to every finalized issue.
    #[must_use = "builder methods must be chained or built"]
    pub fn path_prefix(mut self, path: impl IntoIterator<Item = PathSegment>) -> Self {
        self.path_prefix = path.into_iter().collect();
        self
    }

    pub fn build(self) -> ParseContext {
        ParseContext {
            config: config(),
            error: self.error,
            report_input: self.report_input,
            path_prefix: self.path_prefix,
        }
    }
}

// ============================================================================
// PAYLOAD
// ============================================================================

/// The value under check plus the issues raised so far.
///
/// Checks read the value, may replace it (overwrites), and append issues.
#[derive(Debug)]
pub struct Payload<T> {
    value: T,
    issues: Vec<RawIssue>,
    mutated: bool,
}

impl<T> Payload<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            issues: Vec::new(),
            mutated: false,
        }
    }

    pub(crate) fn with_issues(value: T, issues: Vec<RawIssue>) -> Self {
        Self {
            value,
            issues,
            mutated: false,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Replaces the value. Pointer outputs will no longer alias the input.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
        self.mutated = true;
    }

    pub fn add_issue(&mut self, issue: RawIssue) {
        self.issues.push(issue);
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn issues(&self) -> &[RawIssue] {
        &self.issues
    }

    pub fn is_mutated(&self) -> bool {
        self.mutated
    }

    pub(crate) fn issues_mut(&mut self) -> &mut Vec<RawIssue> {
        &mut self.issues
    }

    pub(crate) fn into_parts(self) -> (T, Vec<RawIssue>, bool) {
        (self.value, self.issues, self.mutated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, Value};

    #[test]
    fn test_finalize_prefixes_path() {
        let ctx = ParseContext::builder()
            .path_prefix([PathSegment::from("root")])
            .build();
        let err = ctx.finalize(vec![
            RawIssue::custom().with_path([PathSegment::Index(1)]),
        ]);
        assert_eq!(err.issues()[0].path_string(), "root[1]");
    }

    #[test]
    fn test_input_reported_only_on_request() {
        let raw = RawIssue::custom().with_input(Value::Int(1));
        let quiet = ParseContext::builder().report_input(false).build();
        assert!(quiet.finalize(vec![raw.clone()]).issues()[0].input.is_none());

        let loud = ParseContext::builder().report_input(true).build();
        assert_eq!(loud.finalize(vec![raw]).issues()[0].input, Some(Value::Int(1)));
    }

    #[test]
    fn test_nested_paths_stay_relative() {
        let ctx = ParseContext::builder()
            .path_prefix([PathSegment::from("root")])
            .build();
        let inner = RawIssue::custom().with_path([PathSegment::from("x")]);
        let err = ctx.finalize(vec![RawIssue::invalid_union(vec![vec![inner]])]);
        let issue = &err.issues()[0];
        assert_eq!(issue.code, IssueCode::InvalidUnion);
        assert_eq!(issue.errors[0][0].path_string(), "x");
    }

    #[test]
    fn test_payload_tracks_mutation() {
        let mut payload = Payload::new(String::from(" a "));
        assert!(!payload.is_mutated());
        payload.set_value(String::from("a"));
        assert!(payload.is_mutated());
        assert!(!payload.has_issues());
        payload.add_issue(RawIssue::custom());
        assert!(payload.has_issues());
    }
}
