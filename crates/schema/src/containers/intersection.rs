//! Intersection schema: both sides must pass, outputs are merged

use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{
    Constraint, Internals, ParseContext, PathSegment, RawIssue, SchemaRef, SchemaType, TypeCode,
    Val, Value,
};

/// Parses the input with both schemas and merges the two outputs: objects
/// key by key, arrays of equal length element by element, anything else
/// only when equal.
pub struct IntersectionSchema<C = Val> {
    left: SchemaRef,
    right: SchemaRef,
    internals: Internals<Value>,
    _constraint: PhantomData<fn() -> C>,
}

impl IntersectionSchema {
    pub fn new(left: impl Into<SchemaRef>, right: impl Into<SchemaRef>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            internals: Internals::new(TypeCode::Intersection),
            _constraint: PhantomData,
        }
    }
}

impl<C> IntersectionSchema<C> {
    pub fn left(&self) -> &SchemaRef {
        &self.left
    }

    pub fn right(&self) -> &SchemaRef {
        &self.right
    }
}

/// Merges two outputs; `Err` holds the path of the first conflict.
fn merge(left: Value, right: Value) -> Result<Value, Vec<PathSegment>> {
    match (left, right) {
        (Value::Object(mut merged), Value::Object(other)) => {
            for (key, value) in other {
                match merged.get_mut(&key) {
                    Some(existing) => {
                        let current = std::mem::take(existing);
                        *existing = merge(current, value).map_err(|mut path| {
                            path.insert(0, PathSegment::Key(key.clone()));
                            path
                        })?;
                    }
                    None => {
                        merged.insert(key, value);
                    }
                }
            }
            Ok(Value::Object(merged))
        }
        (Value::Array(a), Value::Array(b)) if a.len() == b.len() => a
            .into_iter()
            .zip(b)
            .enumerate()
            .map(|(i, (x, y))| {
                merge(x, y).map_err(|mut path| {
                    path.insert(0, PathSegment::Index(i));
                    path
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (a, b) if a == b => Ok(a),
        _ => Err(Vec::new()),
    }
}

impl<C> Clone for IntersectionSchema<C> {
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<C> fmt::Debug for IntersectionSchema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntersectionSchema")
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<C: Constraint> SchemaType for IntersectionSchema<C> {
    type Base = Value;
    type Constraint = C;
    type Rebind<D: Constraint> = IntersectionSchema<D>;

    fn internals(&self) -> &Internals<Value> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Value> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> IntersectionSchema<D> {
        IntersectionSchema {
            left: self.left,
            right: self.right,
            internals: self.internals,
            _constraint: PhantomData,
        }
    }

    fn check_input(
        &self,
        input: &Value,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> Option<Value> {
        let left = self.left.parse_value(input, ctx);
        let right = self.right.parse_value(input, ctx);
        let (left, right) = match (left, right) {
            (Ok(left), Ok(right)) => (left.load().into_owned(), right.load().into_owned()),
            (left, right) => {
                issues.extend(left.err().into_iter().flatten());
                issues.extend(right.err().into_iter().flatten());
                return Some(Value::Null);
            }
        };

        match merge(left, right) {
            Ok(merged) => Some(merged),
            Err(path) => {
                issues.push(
                    RawIssue::custom()
                        .with_param("reason", "unmergeable_intersection")
                        .with_message("Intersection results could not be merged")
                        .with_path(path),
                );
                Some(Value::Null)
            }
        }
    }

    fn accepts_nil(&self) -> bool {
        true
    }
}

#[must_use]
pub fn intersection(left: impl Into<SchemaRef>, right: impl Into<SchemaRef>) -> IntersectionSchema {
    IntersectionSchema::new(left, right)
}
