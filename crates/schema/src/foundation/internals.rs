//! Shared schema state
//!
//! Every schema owns an [`Internals`] record. Modifiers clone it, change the
//! clone and wrap it in a new schema, so the original keeps its behavior.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::checks::Check;
use crate::foundation::{BuildError, ErrorMap, RawIssue, TypeCode, Value};

// ============================================================================
// IDENTITY
// ============================================================================

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Registry key of one schema instance. Every modifier mints a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SchemaId(u64);

impl SchemaId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema#{}", self.0)
    }
}

// ============================================================================
// FLAGS & HOOKS
// ============================================================================

/// Nil-handling and coercion switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub optional: bool,
    pub nilable: bool,
    pub non_optional: bool,
    pub coerce: bool,
}

/// A stored value or a producer called on each use.
pub enum Hook<T> {
    Value(T),
    Func(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> Hook<T> {
    pub fn produce(&self) -> T {
        match self {
            Hook::Value(value) => value.clone(),
            Hook::Func(f) => f(),
        }
    }
}

impl<T: Clone> Clone for Hook<T> {
    fn clone(&self) -> Self {
        match self {
            Hook::Value(value) => Hook::Value(value.clone()),
            Hook::Func(f) => Hook::Func(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Hook::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Refinement run when a pointer-constraint schema accepts nil.
pub(crate) type NilCheck = Arc<dyn Fn(&mut Vec<RawIssue>) + Send + Sync>;

// ============================================================================
// BAG
// ============================================================================

/// Auxiliary metadata that does not affect the parse algorithm directly.
#[derive(Debug, Clone, Default)]
pub struct Bag {
    description: Option<String>,
    construction_error: Option<BuildError>,
    entries: IndexMap<String, Value>,
}

impl Bag {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn construction_error(&self) -> Option<&BuildError> {
        self.construction_error.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }
}

// ============================================================================
// INTERNALS
// ============================================================================

/// Type code, checks, flags, hooks and metadata of a schema whose base
/// (pre-constraint) output type is `B`.
pub struct Internals<B> {
    pub(crate) id: SchemaId,
    pub(crate) type_code: TypeCode,
    pub(crate) checks: Vec<Arc<dyn Check<B>>>,
    pub(crate) flags: Flags,
    pub(crate) default: Option<Hook<B>>,
    pub(crate) prefault: Option<Hook<Value>>,
    pub(crate) error: Option<ErrorMap>,
    pub(crate) bag: Bag,
    pub(crate) values: Vec<Value>,
    pub(crate) nil_checks: Vec<NilCheck>,
}

impl<B> Internals<B> {
    pub fn new(type_code: TypeCode) -> Self {
        Self {
            id: SchemaId::next(),
            type_code,
            checks: Vec::new(),
            flags: Flags::default(),
            default: None,
            prefault: None,
            error: None,
            bag: Bag::default(),
            values: Vec::new(),
            nil_checks: Vec::new(),
        }
    }

    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn checks(&self) -> &[Arc<dyn Check<B>>] {
        &self.checks
    }

    /// Allowed values for enum and literal schemas.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn error(&self) -> Option<&ErrorMap> {
        self.error.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn has_prefault(&self) -> bool {
        self.prefault.is_some()
    }

    pub(crate) fn renew_id(&mut self) {
        self.id = SchemaId::next();
    }

    pub(crate) fn push_check(&mut self, check: Arc<dyn Check<B>>) {
        self.checks.push(check);
    }

    /// Records a construction error; parses report it instead of running.
    pub(crate) fn defer(&mut self, error: BuildError) {
        tracing::debug!(schema = %self.id, error = %error, "schema construction deferred an error");
        if self.bag.construction_error.is_none() {
            self.bag.construction_error = Some(error);
        }
    }
}

impl<B: Clone> Clone for Internals<B> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            type_code: self.type_code,
            checks: self.checks.clone(),
            flags: self.flags,
            default: self.default.clone(),
            prefault: self.prefault.clone(),
            error: self.error.clone(),
            bag: self.bag.clone(),
            values: self.values.clone(),
            nil_checks: self.nil_checks.clone(),
        }
    }
}

impl<B> fmt::Debug for Internals<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Internals")
            .field("id", &self.id)
            .field("type_code", &self.type_code)
            .field("checks", &self.checks.len())
            .field("flags", &self.flags)
            .field("has_default", &self.default.is_some())
            .field("has_prefault", &self.prefault.is_some())
            .field("values", &self.values)
            .field("bag", &self.bag)
            .finish()
    }
}

// ============================================================================
// PARAMS
// ============================================================================

/// Bundled construction options: error override, coercion, description.
#[derive(Debug, Clone, Default)]
pub struct Params {
    pub error: Option<ErrorMap>,
    pub coerce: bool,
    pub description: Option<String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, error: impl Into<ErrorMap>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn apply<B>(self, internals: &mut Internals<B>) {
        if let Some(error) = self.error {
            internals.error = Some(error);
        }
        if self.coerce {
            internals.flags.coerce = true;
        }
        if let Some(description) = self.description {
            internals.bag.set_description(description);
        }
    }
}

/// A bare string is shorthand for an error message.
impl From<&str> for Params {
    fn from(message: &str) -> Self {
        Self::new().error(message)
    }
}

impl From<String> for Params {
    fn from(message: String) -> Self {
        Self::new().error(message)
    }
}
