//! Foundation types: values, issues, errors, contexts and the core traits.

mod config;
mod context;
mod error;
pub(crate) mod error_map;
mod internals;
mod issue;
mod traits;
mod types;
mod value;

pub use config::{config, configure, reset_config, ParseConfig};
pub use context::{ParseContext, ParseContextBuilder, Payload};
pub use error::{as_schema_error, is_schema_error, BuildError, FlattenedError, SchemaError};
pub use error_map::{default_message, ErrorMap};
pub use internals::{Bag, Flags, Hook, Internals, Params, SchemaId};
pub(crate) use issue::prefixed;
pub use issue::{format_path, Issue, IssueCode, IssueParams, Origin, PathSegment, RawIssue};
pub use traits::{AnySchema, Base, Constraint, Output, Ptr, SchemaRef, SchemaType, Val};
pub use types::TypeCode;
pub use value::{IntoValue, Pointer, Value};
