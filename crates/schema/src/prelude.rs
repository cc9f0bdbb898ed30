//! Prelude module for convenient imports.
//!
//! `use nebula_schema::prelude::*;` brings in the factories, the container
//! macros, [`SchemaExt`] and the types that appear in parse results.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_schema::prelude::*;
//!
//! let point = tuple![float64(), float64()];
//! let tags = slice(string().non_empty()).max(10);
//! let id = union![string().uuid(), int().positive()];
//! ```

// ============================================================================
// FOUNDATION: values, issues, errors, traits
// ============================================================================

pub use crate::foundation::{
    config, configure, reset_config, AnySchema, BuildError, ErrorMap, IntoValue, Issue,
    IssueCode, Origin, Output, Params, ParseConfig, ParseContext, PathSegment, Payload, Ptr,
    RawIssue, SchemaError, SchemaRef, SchemaType, TypeCode, Val, Value,
};

// ============================================================================
// CHECKS: protocol types (the check catalog stays under `checks`)
// ============================================================================

pub use crate::checks::{Check, CheckDef, CheckKind};

// ============================================================================
// SCHEMAS AND CONTAINERS: all factories
// ============================================================================

#[allow(clippy::wildcard_imports, ambiguous_glob_reexports)]
pub use crate::schemas::*;

#[allow(clippy::wildcard_imports)]
pub use crate::containers::*;

// ============================================================================
// COMBINATORS AND METADATA
// ============================================================================

pub use crate::combinators::{lazy, Lazy, Pipe, PipeTarget, RefineContext, SchemaExt, Transform};
pub use crate::registry::Meta;

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{check, object, tuple, union};
