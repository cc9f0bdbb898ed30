//! # nebula-schema
//!
//! Composable runtime schemas: parse untyped input into typed, validated
//! values, or get back a structured list of issues.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_schema::prelude::*;
//!
//! let user = object! {
//!     "name" => string().min(1),
//!     "email" => string().email(),
//!     "age" => int().gte(0).optional(),
//! };
//!
//! let ok = user.parse(Value::object([("name", "ada"), ("email", "ada@example.com")]));
//! assert!(ok.is_ok());
//!
//! let err = user.parse(Value::object([("name", ""), ("email", "nope")])).unwrap_err();
//! assert_eq!(err.len(), 2);
//! assert_eq!(err.issues()[1].path_string(), "email");
//! ```
//!
//! ## Layout
//!
//! - [`foundation`]: values, type codes, issues, errors, contexts, traits
//! - [`checks`]: validations and normalizations run after the type check
//! - [`schemas`]: leaf schemas (strings, numbers, enums, ...)
//! - [`containers`]: arrays, slices, objects, records, maps, unions
//! - [`combinators`]: the [`SchemaExt`] modifiers, pipes, transforms, lazy
//! - [`registry`]: descriptive metadata keyed by schema id
//!
//! Every modifier returns a new schema; a schema is never changed after
//! construction and can be shared across threads.

// Pipe<Pipe<A, B>, Transform<..>> and friends are inherent to typed composition.
#![allow(clippy::type_complexity)]

pub mod checks;
pub mod combinators;
pub mod containers;
mod engine;
pub mod foundation;
pub mod json;
mod macros;
pub mod prelude;
pub mod registry;
pub mod schemas;

pub use combinators::SchemaExt;
pub use foundation::{Issue, IssueCode, SchemaError, Value};
