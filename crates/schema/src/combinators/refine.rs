//! Refinements and the transform context

use std::sync::Arc;

use crate::checks::Custom;
use crate::combinators::SchemaExt;
use crate::foundation::{Constraint, ErrorMap, Output, ParseContext, RawIssue, SchemaError, SchemaType};

/// Attaches `predicate` as a custom check. Pointer-constraint schemas also
/// run it when they accept nil.
pub(crate) fn attach<S, F>(schema: &S, predicate: F, error: Option<ErrorMap>) -> S
where
    S: SchemaType,
    F: Fn(&Output<S>) -> bool + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);
    let mut next = schema.fork();

    let on_value = Arc::clone(&predicate);
    let mut check = Custom::new(move |base: &S::Base| {
        on_value(&<S::Constraint as Constraint>::view(base))
    });
    if let Some(error) = error.clone() {
        check = check.error(error);
    }
    next.internals_mut().push_check(Arc::new(check));

    if let Some(nil) = <S::Constraint as Constraint>::nil::<S::Base>() {
        next.internals_mut()
            .nil_checks
            .push(Arc::new(move |issues: &mut Vec<RawIssue>| {
                if !predicate(&nil) {
                    issues.push(RawIssue::custom().with_error(error.clone()));
                }
            }));
    }
    next
}

/// Handed to transform functions: report issues or abort.
///
/// ```rust,ignore
/// let port = string().transform(|s: String, ctx: &mut RefineContext<'_>| {
///     s.parse::<u16>().unwrap_or_else(|_| {
///         ctx.issue("not a port");
///         0
///     })
/// });
/// ```
#[derive(Debug)]
pub struct RefineContext<'a> {
    ctx: &'a ParseContext,
    issues: Vec<RawIssue>,
    aborted: bool,
}

impl<'a> RefineContext<'a> {
    pub(crate) fn new(ctx: &'a ParseContext) -> Self {
        Self {
            ctx,
            issues: Vec::new(),
            aborted: false,
        }
    }

    pub fn add_issue(&mut self, issue: RawIssue) {
        self.issues.push(issue);
    }

    /// Adds a `custom` issue with `message`.
    pub fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(RawIssue::custom().with_message(message));
    }

    /// Folds the issues of a nested parse into this one, keeping their paths.
    pub fn add_error(&mut self, error: SchemaError) {
        self.issues.extend(error.into_raw_issues());
    }

    /// Fails the transform even if no issue was added.
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn context(&self) -> &ParseContext {
        self.ctx
    }

    pub(crate) fn finish<T>(mut self, value: T) -> Result<T, Vec<RawIssue>> {
        if self.issues.is_empty() && !self.aborted {
            return Ok(value);
        }
        if self.issues.is_empty() {
            self.issues.push(RawIssue::custom().with_param("reason", "aborted"));
        }
        Err(self.issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{IssueCode, PathSegment};

    #[test]
    fn test_abort_without_issue_still_fails() {
        let ctx = ParseContext::new();
        let mut refine = RefineContext::new(&ctx);
        refine.abort();
        let issues = refine.finish(1).unwrap_err();
        assert_eq!(issues[0].code, IssueCode::Custom);
    }

    #[test]
    fn test_add_error_keeps_paths() {
        let ctx = ParseContext::new();
        let nested = ctx.finalize(vec![
            RawIssue::custom()
                .with_message("inner")
                .with_path([PathSegment::from("a")]),
        ]);
        let mut refine = RefineContext::new(&ctx);
        refine.add_error(nested);
        let issues = refine.finish(()).unwrap_err();
        assert_eq!(issues[0].path, vec![PathSegment::from("a")]);
        assert_eq!(issues[0].message.as_deref(), Some("inner"));
    }
}
