//! Map schema: mapping with arbitrary keys

use std::fmt;
use std::marker::PhantomData;

use crate::checks::{max_size, min_size, size, Measurable};
use crate::combinators::SchemaExt;
use crate::containers::{descend, key_segment};
use crate::foundation::{
    Constraint, Internals, IntoValue, Origin, ParseContext, RawIssue, SchemaRef, SchemaType,
    TypeCode, Val, Value,
};

/// Parsed map entries, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entries(pub Vec<(Value, Value)>);

impl Entries {
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<(Value, Value)> {
        self.0
    }
}

impl IntoValue for Entries {
    fn into_value(self) -> Value {
        Value::Map(self.0)
    }
}

impl Measurable for Entries {
    const ORIGIN: Origin = Origin::Map;

    fn measure(&self) -> usize {
        self.0.len()
    }
}

/// Accepts `Value::Map`, or `Value::Object` whose keys are then strings.
pub struct MapSchema<C = Val> {
    key: SchemaRef,
    value: SchemaRef,
    internals: Internals<Entries>,
    _constraint: PhantomData<fn() -> C>,
}

impl MapSchema {
    pub fn new(key: impl Into<SchemaRef>, value: impl Into<SchemaRef>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            internals: Internals::new(TypeCode::Map),
            _constraint: PhantomData,
        }
    }
}

impl<C> MapSchema<C> {
    pub fn key_schema(&self) -> &SchemaRef {
        &self.key
    }

    pub fn value_schema(&self) -> &SchemaRef {
        &self.value
    }

    fn entry(
        &self,
        key: &Value,
        value: &Value,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> Option<(Value, Value)> {
        let parsed_key = match self.key.parse_value(key, ctx) {
            Ok(parsed) => parsed,
            Err(found) => {
                issues.push(
                    RawIssue::invalid_key(Origin::Map, key.clone(), found)
                        .with_path([key_segment(key)]),
                );
                return None;
            }
        };
        if key.as_str().is_some() {
            let parsed = descend(&self.value, value, key_segment(key), ctx, issues)?;
            return Some((parsed_key, parsed));
        }
        // Non-string keys have no path form outside this map; summarize.
        match self.value.parse_value(value, ctx) {
            Ok(parsed) => Some((parsed_key, parsed)),
            Err(found) => {
                issues.push(
                    RawIssue::invalid_element(Origin::Map, found)
                        .with_param("key", key.clone())
                        .with_path([key_segment(key)]),
                );
                None
            }
        }
    }
}

impl<C: Constraint> MapSchema<C> {
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, min: usize) -> Self {
        self.with_check(min_size(min))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, max: usize) -> Self {
        self.with_check(max_size(max))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn size(&self, len: usize) -> Self {
        self.with_check(size(len))
    }
}

impl<C> Clone for MapSchema<C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<C> fmt::Debug for MapSchema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSchema")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

impl<C: Constraint> SchemaType for MapSchema<C> {
    type Base = Entries;
    type Constraint = C;
    type Rebind<D: Constraint> = MapSchema<D>;

    const PREFAULT_ON_MISMATCH: bool = true;

    fn internals(&self) -> &Internals<Entries> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Entries> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> MapSchema<D> {
        MapSchema {
            key: self.key,
            value: self.value,
            internals: self.internals,
            _constraint: PhantomData,
        }
    }

    fn check_input(
        &self,
        input: &Value,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> Option<Entries> {
        let loaded = input.load();
        let mut out = Vec::new();
        match &*loaded {
            Value::Map(entries) => {
                for (key, value) in entries {
                    out.extend(self.entry(key, value, ctx, issues));
                }
            }
            Value::Object(entries) => {
                for (key, value) in entries {
                    out.extend(self.entry(&Value::from(key.as_str()), value, ctx, issues));
                }
            }
            _ => {
                issues.push(RawIssue::invalid_type(self.internals.type_code(), input));
                return None;
            }
        }
        Some(Entries(out))
    }
}

#[must_use]
pub fn map(key: impl Into<SchemaRef>, value: impl Into<SchemaRef>) -> MapSchema {
    MapSchema::new(key, value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::foundation::IssueCode;
    use crate::prelude::*;

    fn scores() -> Value {
        Value::Map(vec![
            (Value::from(1_i64), Value::from("one")),
            (Value::from(2_i64), Value::from("two")),
        ])
    }

    #[test]
    fn test_non_string_keys() {
        let out = map(int(), string()).parse(scores()).unwrap();
        assert_eq!(out.get(&Value::from(2_i64)), Some(&Value::from("two")));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_invalid_key_path_is_tagged() {
        let err = map(int().max(1), string()).parse(scores()).unwrap_err();
        let issue = &err.issues()[0];
        assert_eq!(issue.code, IssueCode::InvalidKey);
        assert_eq!(issue.origin(), Some("map"));
        assert_eq!(issue.path_string(), "[2]");
    }

    #[test]
    fn test_object_input() {
        let out = map(string().min(2), int())
            .parse(Value::object([("ab", 1_i64)]))
            .unwrap();
        assert_eq!(out.into_inner(), vec![(Value::from("ab"), Value::from(1_i64))]);
    }

    #[test]
    fn test_value_failure_under_tag_is_summarized() {
        let err = map(int(), string().min(4)).parse(scores()).unwrap_err();
        assert_eq!(err.len(), 2);
        let issue = &err.issues()[0];
        assert_eq!(issue.code, IssueCode::InvalidElement);
        assert_eq!(issue.param("key"), Some(&Value::from(1_i64)));
        assert_eq!(issue.path_string(), "[1]");
        assert_eq!(issue.errors[0][0].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_value_failure_under_string_key_is_inlined() {
        let err = map(string(), int())
            .parse(Value::object([("a", "x")]))
            .unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::InvalidType);
        assert_eq!(err.issues()[0].path_string(), "a");
    }

    #[test]
    fn test_size_origin() {
        let err = map(int(), string()).min(3).parse(scores()).unwrap_err();
        assert_eq!(err.issues()[0].origin(), Some("map"));
    }
}
