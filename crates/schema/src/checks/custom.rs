//! User-supplied checks

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::checks::{Check, CheckDef, CheckKind};
use crate::foundation::{ErrorMap, IssueCode, ParseContext, PathSegment, Payload, RawIssue, Value};

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A predicate over the base value.
///
/// Failing emits a `custom` issue by default; [`code`](Custom::code),
/// [`path`](Custom::path) and [`param`](Custom::param) shape the issue.
pub struct Custom<T> {
    predicate: Predicate<T>,
    code: IssueCode,
    path: Vec<PathSegment>,
    message: Option<String>,
    def: CheckDef,
}

impl<T> Custom<T> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            code: IssueCode::Custom,
            path: Vec::new(),
            message: None,
            def: CheckDef::new(CheckKind::Custom),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn code(mut self, code: IssueCode) -> Self {
        self.code = code;
        self
    }

    /// Path appended below the schema's own position.
    #[must_use = "builder methods must be chained or built"]
    pub fn path(mut self, path: impl IntoIterator<Item = PathSegment>) -> Self {
        self.path = path.into_iter().collect();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn param(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.def.params.push((key.into(), value.into()));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.def.error = Some(error.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn abort(mut self) -> Self {
        self.def.abort = true;
        self
    }

    /// Evaluates the predicate outside a payload.
    pub fn test(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    /// The issue this check emits on failure.
    pub fn issue(&self) -> RawIssue {
        let mut issue = RawIssue::new(self.code).with_path(self.path.iter().cloned());
        issue.params = self.def.params.clone();
        issue.message.clone_from(&self.message);
        issue.error.clone_from(&self.def.error);
        issue
    }
}

impl<T> Clone for Custom<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            code: self.code,
            path: self.path.clone(),
            message: self.message.clone(),
            def: self.def.clone(),
        }
    }
}

impl<T> fmt::Debug for Custom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("code", &self.code)
            .field("path", &self.path)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<T> Check<T> for Custom<T> {
    fn def(&self) -> &CheckDef {
        &self.def
    }

    fn apply(&self, payload: &mut Payload<T>, _ctx: &ParseContext) {
        if !self.test(payload.value()) {
            payload.add_issue(self.issue());
        }
    }
}

// ============================================================================
// PAYLOAD FUNCTION
// ============================================================================

/// A function with full access to the payload: it may add any number of
/// issues or replace the value.
pub struct CheckFn<T> {
    run: Arc<dyn Fn(&mut Payload<T>) + Send + Sync>,
    def: CheckDef,
}

impl<T> CheckFn<T> {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut Payload<T>) + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(run),
            def: CheckDef::new(CheckKind::Custom),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn abort(mut self) -> Self {
        self.def.abort = true;
        self
    }
}

impl<T> Clone for CheckFn<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
            def: self.def.clone(),
        }
    }
}

impl<T> fmt::Debug for CheckFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckFn").finish_non_exhaustive()
    }
}

impl<T> Check<T> for CheckFn<T> {
    fn def(&self) -> &CheckDef {
        &self.def
    }

    fn apply(&self, payload: &mut Payload<T>, _ctx: &ParseContext) {
        (self.run)(payload);
    }
}
