//! Enumerated schemas: enums and literals
//!
//! Both are ordinary leaf schemas with an allowed-value list. Anything
//! outside the list, including a value of the wrong type, fails with
//! `invalid_value`.

use crate::combinators::SchemaExt;
use crate::foundation::{Constraint, IntoValue, SchemaType, TypeCode, Value};
use crate::schemas::{Primitive, Schema};

fn enumerated<B: Primitive>(type_code: TypeCode, values: impl IntoIterator<Item = B>) -> Schema<B> {
    let mut schema = Schema::with_type(type_code);
    schema.internals_mut().values = values.into_iter().map(IntoValue::into_value).collect();
    schema
}

/// One of `values`.
///
/// ```rust,ignore
/// let color = enum_of(["red", "green"].map(String::from));
/// ```
#[must_use]
pub fn enum_of<B: Primitive>(values: impl IntoIterator<Item = B>) -> Schema<B> {
    enumerated(TypeCode::Enum, values)
}

/// Exactly `value`.
#[must_use]
pub fn literal<B: Primitive>(value: B) -> Schema<B> {
    enumerated(TypeCode::Literal, [value])
}

/// Any of several exact values.
#[must_use]
pub fn literals<B: Primitive>(values: impl IntoIterator<Item = B>) -> Schema<B> {
    enumerated(TypeCode::Literal, values)
}

impl<B: Primitive, C: Constraint> Schema<B, C> {
    /// The allowed values; empty for non-enumerated schemas.
    pub fn options(&self) -> &[Value] {
        self.internals().values()
    }

    /// A copy allowing only those of `values` that this schema allows.
    #[must_use = "builder methods must be chained or built"]
    pub fn extract(&self, values: impl IntoIterator<Item = B>) -> Self {
        let keep: Vec<Value> = values.into_iter().map(IntoValue::into_value).collect();
        self.retain_values(|value| keep.contains(value))
    }

    /// A copy without `values`.
    #[must_use = "builder methods must be chained or built"]
    pub fn exclude(&self, values: impl IntoIterator<Item = B>) -> Self {
        let drop: Vec<Value> = values.into_iter().map(IntoValue::into_value).collect();
        self.retain_values(|value| !drop.contains(value))
    }

    fn retain_values(&self, keep: impl Fn(&Value) -> bool) -> Self {
        let mut next = self.fork();
        next.internals_mut().values.retain(|value| keep(value));
        next
    }
}
