//! Container schemas
//!
//! A container recognizes its own shape, then parses every child with the
//! child's schema. Child issues come back with the child's path segment
//! prepended; the rebuilt container is returned only if no child failed.
//!
//! - [`ArraySchema`]: fixed-length tuple, one schema per position
//! - [`SliceSchema`]: homogeneous list
//! - [`ObjectSchema`]: declared keys with an unknown-key policy
//! - [`RecordSchema`]: string-keyed mapping with key and value schemas
//! - [`MapSchema`]: mapping with arbitrary keys
//! - [`UnionSchema`], [`DiscriminatedUnion`], [`IntersectionSchema`]

mod array;
mod discriminated;
mod intersection;
mod map;
mod object;
mod record;
mod slice;
mod union;

use crate::foundation::{prefixed, ParseContext, PathSegment, RawIssue, SchemaRef, Value};

pub use array::{array, ArraySchema};
pub use discriminated::{discriminated_union, DiscriminatedUnion};
pub use intersection::{intersection, IntersectionSchema};
pub use map::{map, Entries, MapSchema};
pub use object::{object, ObjectSchema, Shape, UnknownKeys};
pub use record::{loose_record, partial_record, record, record_of, RecordMode, RecordSchema};
pub use slice::{slice, SliceSchema};
pub use union::{union, UnionSchema};

/// Parses `input` with `child`, filing any issues under `segment`.
pub(crate) fn descend(
    child: &SchemaRef,
    input: &Value,
    segment: PathSegment,
    ctx: &ParseContext,
    issues: &mut Vec<RawIssue>,
) -> Option<Value> {
    match child.parse_value(input, ctx) {
        Ok(value) => Some(value),
        Err(found) => {
            issues.extend(prefixed(found, &segment));
            None
        }
    }
}

/// Path segment for a mapping key: string keys by name, others as tags.
pub(crate) fn key_segment(key: &Value) -> PathSegment {
    match &*key.load() {
        Value::String(s) => PathSegment::Key(s.clone()),
        other => PathSegment::Tag(other.clone()),
    }
}
