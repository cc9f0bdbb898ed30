//! Record schema: string-keyed mapping with key and value schemas

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::checks::{max_size, min_size, size};
use crate::combinators::SchemaExt;
use crate::containers::descend;
use crate::foundation::{
    Constraint, Internals, Origin, ParseContext, PathSegment, RawIssue, SchemaRef, SchemaType,
    TypeCode, Val, Value,
};
use crate::schemas::string;

/// How a record treats missing and failing keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordMode {
    /// Exhaustive keys must all be present; failing keys are issues.
    #[default]
    Normal,
    /// Exhaustive keys may be missing.
    Partial,
    /// Keys failing the key schema pass through with their values.
    Loose,
}

/// A mapping whose keys and values are each governed by a schema.
///
/// When the key schema enumerates its values (enum or literal) the record
/// is exhaustive: every listed key is expected and others are reported as
/// unrecognized. Otherwise each present key is parsed on its own. A numeric
/// key schema receives keys that parse as numbers as numbers, and the
/// parsed key is stringified back into the output.
pub struct RecordSchema<C = Val> {
    key: SchemaRef,
    value: SchemaRef,
    mode: RecordMode,
    internals: Internals<IndexMap<String, Value>>,
    _constraint: PhantomData<fn() -> C>,
}

impl RecordSchema {
    pub fn new(key: impl Into<SchemaRef>, value: impl Into<SchemaRef>, mode: RecordMode) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            mode,
            internals: Internals::new(TypeCode::Record),
            _constraint: PhantomData,
        }
    }
}

impl<C> RecordSchema<C> {
    pub fn key_schema(&self) -> &SchemaRef {
        &self.key
    }

    pub fn value_schema(&self) -> &SchemaRef {
        &self.value
    }

    pub fn mode(&self) -> RecordMode {
        self.mode
    }

    fn key_input(&self, key: &str) -> Value {
        if self.key.type_code().is_numeric() {
            if let Ok(n) = key.parse::<i64>() {
                return Value::Int(n);
            }
            if let Ok(n) = key.parse::<u64>() {
                return Value::Uint(n);
            }
            if let Ok(n) = key.parse::<f64>() {
                return Value::Float(n);
            }
        }
        Value::from(key)
    }

    fn exhaustive(
        &self,
        allowed: &[Value],
        entries: &IndexMap<String, Value>,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> IndexMap<String, Value> {
        let mut out = IndexMap::with_capacity(allowed.len());
        for key in allowed.iter().map(Value::to_key) {
            let value = match entries.get(&key) {
                Some(value) => value,
                None if self.mode == RecordMode::Partial => continue,
                None => Value::nil(),
            };
            let segment = PathSegment::Key(key.clone());
            if let Some(parsed) = descend(&self.value, value, segment, ctx, issues) {
                out.insert(key, parsed);
            }
        }

        let mut unrecognized = Vec::new();
        for (key, value) in entries {
            if allowed.iter().any(|a| a.to_key() == *key) {
                continue;
            }
            if self.mode == RecordMode::Loose {
                out.insert(key.clone(), value.clone());
            } else {
                unrecognized.push(key.clone());
            }
        }
        if !unrecognized.is_empty() {
            issues.push(RawIssue::unrecognized_keys(unrecognized));
        }
        out
    }

    fn open(
        &self,
        entries: &IndexMap<String, Value>,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> IndexMap<String, Value> {
        let mut out = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            match self.key.parse_value(&self.key_input(key), ctx) {
                Ok(parsed_key) => {
                    let segment = PathSegment::Key(key.clone());
                    if let Some(parsed) = descend(&self.value, value, segment, ctx, issues) {
                        out.insert(parsed_key.to_key(), parsed);
                    }
                }
                Err(_) if self.mode == RecordMode::Loose => {
                    out.insert(key.clone(), value.clone());
                }
                Err(found) => issues.push(
                    RawIssue::invalid_key(Origin::Record, Value::from(key.as_str()), found)
                        .with_path([PathSegment::Key(key.clone())]),
                ),
            }
        }
        out
    }
}

impl<C: Constraint> RecordSchema<C> {
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

impl<C> Clone for RecordSchema<C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            mode: self.mode,
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<C> fmt::Debug for RecordSchema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("mode", &self.mode)
            .finish()
    }
}

impl<C: Constraint> SchemaType for RecordSchema<C> {
    type Base = IndexMap<String, Value>;
    type Constraint = C;
    type Rebind<D: Constraint> = RecordSchema<D>;

    const PREFAULT_ON_MISMATCH: bool = true;

    fn internals(&self) -> &Internals<Self::Base> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Self::Base> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> RecordSchema<D> {
        RecordSchema {
            key: self.key,
            value: self.value,
            mode: self.mode,
            internals: self.internals,
            _constraint: PhantomData,
        }
    }

    fn check_input(
        &self,
        input: &Value,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> Option<Self::Base> {
        let loaded = input.load();
        let Value::Object(entries) = &*loaded else {
            issues.push(RawIssue::invalid_type(self.internals.type_code(), input));
            return None;
        };

        let allowed = self.key.values();
        if allowed.is_empty() {
            Some(self.open(entries, ctx, issues))
        } else {
            Some(self.exhaustive(allowed, entries, ctx, issues))
        }
    }
}

#[must_use]
pub fn record(key: impl Into<SchemaRef>, value: impl Into<SchemaRef>) -> RecordSchema {
    RecordSchema::new(key, value, RecordMode::Normal)
}

/// A record with any string key.
#[must_use]
pub fn record_of(value: impl Into<SchemaRef>) -> RecordSchema {
    record(string(), value)
}

/// Exhaustive keys may be missing.
#[must_use]
pub fn partial_record(key: impl Into<SchemaRef>, value: impl Into<SchemaRef>) -> RecordSchema {
    RecordSchema::new(key, value, RecordMode::Partial)
}

/// Keys failing the key schema pass through unvalidated.
#[must_use]
pub fn loose_record(key: impl Into<SchemaRef>, value: impl Into<SchemaRef>) -> RecordSchema {
    RecordSchema::new(key, value, RecordMode::Loose)
}
