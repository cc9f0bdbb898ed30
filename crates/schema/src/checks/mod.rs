//! Checks: validations and normalizations run after the type check
//!
//! A [`Check`] reads the [`Payload`], may append issues and, for overwrites,
//! may replace the value. Checks run in attachment order; a check built with
//! `.abort()` stops the remaining ones when it fails.
//!
//! # Catalog
//!
//! - **Length / size**: [`min_length`], [`max_length`], [`length`],
//!   [`min_size`], [`max_size`], [`size`], [`non_empty`]
//! - **Range**: [`gt`], [`gte`], [`lt`], [`lte`]
//! - **Numeric**: [`multiple_of`], [`integer`], [`finite`], [`safe`]
//! - **String**: [`Pattern`], [`Format`], [`starts_with`], [`ends_with`],
//!   [`includes`], [`lowercase`], [`uppercase`]
//! - **Collections**: [`unique`]
//! - **Custom**: [`Custom`], [`CheckFn`]
//! - **Overwrite**: [`Overwrite`], [`trim`], [`to_lowercase`], [`to_uppercase`]

mod custom;
mod divisibility;
mod elements;
mod length;
mod overwrite;
mod pattern;
mod range;

use std::borrow::Cow;

use crate::foundation::{ErrorMap, IssueParams, ParseContext, Payload, Value};

pub use custom::{CheckFn, Custom};
pub use divisibility::{finite, integer, multiple_of, safe, Finite, Integer, MultipleOf, Numeric, Safe};
pub use elements::{unique, Distinct, Unique};
pub use length::{
    length, max_length, max_size, min_length, min_size, non_empty, size, Length, MaxLength,
    MaxSize, Measurable, MinLength, MinSize, Size,
};
pub use overwrite::{to_lowercase, to_uppercase, trim, Overwrite};
pub use pattern::{
    ends_with, format, includes, lowercase, pattern, starts_with, uppercase, EndsWith, Format,
    Includes, Lowercase, Pattern, StartsWith, Uppercase,
};
pub use range::{gt, gte, lt, lte, Bound, Ordered};

// ============================================================================
// CHECK TRAIT
// ============================================================================

/// A validation or normalization step over base values of type `T`.
pub trait Check<T>: Send + Sync {
    fn def(&self) -> &CheckDef;

    fn apply(&self, payload: &mut Payload<T>, ctx: &ParseContext);
}

/// What a check is, for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CheckKind {
    MinLength,
    MaxLength,
    Length,
    MinSize,
    MaxSize,
    Size,
    GreaterThan,
    LessThan,
    MultipleOf,
    Integer,
    Finite,
    Safe,
    Format(StringFormat),
    Unique,
    Custom,
    Overwrite,
}

/// String formats recognized by [`Format`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StringFormat {
    Regex,
    Email,
    Url,
    Uuid,
    Ipv4,
    Ipv6,
    Datetime,
    StartsWith,
    EndsWith,
    Includes,
    Lowercase,
    Uppercase,
}

impl StringFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Email => "email",
            Self::Url => "url",
            Self::Uuid => "uuid",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Datetime => "datetime",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Includes => "includes",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
        }
    }
}

/// Kind, parameters, error override and abort flag of a check.
#[derive(Debug, Clone)]
pub struct CheckDef {
    pub kind: CheckKind,
    pub params: IssueParams,
    pub error: Option<ErrorMap>,
    pub abort: bool,
}

impl CheckDef {
    pub fn new(kind: CheckKind) -> Self {
        Self {
            kind,
            params: IssueParams::new(),
            error: None,
            abort: false,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}
