//! Object schema
//!
//! Declared keys are parsed with their own schemas; an absent key is parsed
//! as nil so optional, default and prefault rules apply to it. Keys the
//! shape does not declare are handled by the [`UnknownKeys`] policy.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::combinators::SchemaExt;
use crate::containers::descend;
use crate::foundation::{
    Constraint, Internals, ParseContext, PathSegment, RawIssue, SchemaRef, SchemaType, TypeCode,
    Val, Value,
};

// ============================================================================
// SHAPE
// ============================================================================

/// Ordered set of declared fields.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: IndexMap<String, SchemaRef>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `key`; a repeated key replaces the earlier schema.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, key: impl Into<String>, schema: impl Into<SchemaRef>) -> Self {
        self.fields.insert(key.into(), schema.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&SchemaRef> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaRef)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn map(&self, f: impl Fn(&SchemaRef) -> SchemaRef) -> Self {
        Self {
            fields: self.fields.iter().map(|(k, v)| (k.clone(), f(v))).collect(),
        }
    }
}

impl<K: Into<String>, S: Into<SchemaRef>> FromIterator<(K, S)> for Shape {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |shape, (key, schema)| shape.field(key, schema))
    }
}

// ============================================================================
// UNKNOWN KEYS
// ============================================================================

/// What happens to input keys the shape does not declare.
#[derive(Debug, Clone, Default)]
pub enum UnknownKeys {
    /// Reported in one `unrecognized_keys` issue.
    #[default]
    Strict,
    /// Dropped from the output.
    Strip,
    /// Copied to the output unvalidated.
    Passthrough,
    /// Parsed with the given schema.
    Catchall(SchemaRef),
}

// ============================================================================
// OBJECT SCHEMA
// ============================================================================

/// Schema for `Value::Object` input with a declared [`Shape`].
pub struct ObjectSchema<C = Val> {
    shape: Shape,
    unknown: UnknownKeys,
    internals: Internals<IndexMap<String, Value>>,
    _constraint: PhantomData<fn() -> C>,
}

impl ObjectSchema {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            unknown: UnknownKeys::Strict,
            internals: Internals::new(TypeCode::Object),
            _constraint: PhantomData,
        }
    }
}

impl<C> ObjectSchema<C> {
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn unknown_keys(&self) -> &UnknownKeys {
        &self.unknown
    }
}

impl<C: Constraint> ObjectSchema<C> {
    fn with_shape(&self, shape: Shape) -> Self {
        let mut next = self.fork();
        next.shape = shape;
        next
    }

    fn with_unknown(&self, unknown: UnknownKeys) -> Self {
        let mut next = self.fork();
        next.unknown = unknown;
        next
    }

    /// Adds or replaces fields.
    #[must_use = "builder methods must be chained or built"]
    pub fn extend(&self, fields: Shape) -> Self {
        let mut shape = self.shape.clone();
        shape.fields.extend(fields.fields);
        self.with_shape(shape)
    }

    /// Adds `other`'s fields and adopts its unknown-key policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn merge<D>(&self, other: &ObjectSchema<D>) -> Self {
        let mut next = self.extend(other.shape.clone());
        next.unknown = other.unknown.clone();
        next
    }

    /// Keeps only `keys`.
    #[must_use = "builder methods must be chained or built"]
    pub fn pick(&self, keys: &[&str]) -> Self {
        let mut shape = self.shape.clone();
        shape.fields.retain(|k, _| keys.contains(&k.as_str()));
        self.with_shape(shape)
    }

    /// Drops `keys`.
    #[must_use = "builder methods must be chained or built"]
    pub fn omit(&self, keys: &[&str]) -> Self {
        let mut shape = self.shape.clone();
        shape.fields.retain(|k, _| !keys.contains(&k.as_str()));
        self.with_shape(shape)
    }

    /// Every field optional.
    #[must_use = "builder methods must be chained or built"]
    pub fn partial(&self) -> Self {
        self.with_shape(self.shape.map(|field| field.to_optional()))
    }

    /// Every field non-optional.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(&self) -> Self {
        self.with_shape(self.shape.map(|field| field.to_required()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn strict(&self) -> Self {
        self.with_unknown(UnknownKeys::Strict)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn strip(&self) -> Self {
        self.with_unknown(UnknownKeys::Strip)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn passthrough(&self) -> Self {
        self.with_unknown(UnknownKeys::Passthrough)
    }

    /// Parses unknown keys with `schema`.
    #[must_use = "builder methods must be chained or built"]
    pub fn catchall(&self, schema: impl Into<SchemaRef>) -> Self {
        self.with_unknown(UnknownKeys::Catchall(schema.into()))
    }
}

impl<C> Clone for ObjectSchema<C> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            unknown: self.unknown.clone(),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<C> fmt::Debug for ObjectSchema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectSchema")
            .field("shape", &self.shape)
            .field("unknown", &self.unknown)
            .field("internals", &self.internals)
            .finish()
    }
}

impl<C: Constraint> SchemaType for ObjectSchema<C> {
    type Base = IndexMap<String, Value>;
    type Constraint = C;
    type Rebind<D: Constraint> = ObjectSchema<D>;

    const PREFAULT_ON_MISMATCH: bool = true;

    fn internals(&self) -> &Internals<Self::Base> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Self::Base> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> ObjectSchema<D> {
        ObjectSchema {
            shape: self.shape,
            unknown: self.unknown,
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

        let mut out = IndexMap::with_capacity(entries.len());
        for (key, child) in &self.shape.fields {
            let present = entries.get(key);
            let value = present.unwrap_or(Value::nil());
            let segment = PathSegment::Key(key.clone());
            if let Some(parsed) = descend(child, value, segment, ctx, issues) {
                // An absent optional key stays absent.
                if present.is_some() || !parsed.is_null() {
                    out.insert(key.clone(), parsed);
                }
            }
        }

        let mut unrecognized = Vec::new();
        for (key, value) in entries {
            if self.shape.contains(key) {
                continue;
            }
            match &self.unknown {
                UnknownKeys::Strict => unrecognized.push(key.clone()),
                UnknownKeys::Strip => {}
                UnknownKeys::Passthrough => {
                    out.insert(key.clone(), value.clone());
                }
                UnknownKeys::Catchall(schema) => {
                    let segment = PathSegment::Key(key.clone());
                    if let Some(parsed) = descend(schema, value, segment, ctx, issues) {
                        out.insert(key.clone(), parsed);
                    }
                }
            }
        }
        if !unrecognized.is_empty() {
            issues.push(RawIssue::unrecognized_keys(unrecognized));
        }
        Some(out)
    }
}

/// An object schema; see also the [`object!`](crate::object) macro.
#[must_use]
pub fn object(shape: Shape) -> ObjectSchema {
    ObjectSchema::new(shape)
}
