//! Discriminated union: dispatch on a tag field

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::engine;
use crate::foundation::{
    BuildError, Constraint, Internals, ParseContext, RawIssue, SchemaType, TypeCode, Val, Value,
};
use crate::containers::ObjectSchema;

/// A union of object schemas told apart by the value of one field.
///
/// Every option must declare the discriminator field with an enum or
/// literal schema, and no value may select two options; otherwise the
/// schema fails every parse with `construction_failed`. Input whose tag
/// selects no option is tried against every option in turn.
pub struct DiscriminatedUnion<C = Val> {
    discriminator: String,
    options: Vec<ObjectSchema>,
    index: Vec<(Value, usize)>,
    internals: Internals<IndexMap<String, Value>>,
    _constraint: PhantomData<fn() -> C>,
}

fn build_index(discriminator: &str, options: &[ObjectSchema]) -> Result<Vec<(Value, usize)>, BuildError> {
    let mut index: Vec<(Value, usize)> = Vec::new();
    for (i, option) in options.iter().enumerate() {
        let values = option
            .shape()
            .get(discriminator)
            .map(|field| field.values())
            .unwrap_or_default();
        if values.is_empty() {
            return Err(BuildError::MissingDiscriminator {
                discriminator: discriminator.to_owned(),
                index: i,
            });
        }
        for value in values {
            if let Some((_, first)) = index.iter().find(|(seen, _)| seen == value) {
                return Err(BuildError::DuplicateDiscriminator {
                    discriminator: discriminator.to_owned(),
                    value: value.to_string(),
                    first: *first,
                    second: i,
                });
            }
            index.push((value.clone(), i));
        }
    }
    Ok(index)
}

impl DiscriminatedUnion {
    /// Builds the union, deferring an invalid option set to parse time.
    pub fn new(discriminator: impl Into<String>, options: Vec<ObjectSchema>) -> Self {
        let discriminator = discriminator.into();
        let mut internals = Internals::new(TypeCode::DiscriminatedUnion);
        let index = build_index(&discriminator, &options).unwrap_or_else(|error| {
            internals.defer(error);
            Vec::new()
        });
        internals
            .bag
            .insert("discriminator", Value::from(discriminator.as_str()));
        internals.bag.insert(
            "tags",
            Value::Array(index.iter().map(|(tag, _)| tag.clone()).collect()),
        );
        Self {
            discriminator,
            options,
            index,
            internals,
            _constraint: PhantomData,
        }
    }

    /// Builds the union, failing now on an invalid option set.
    pub fn try_new(
        discriminator: impl Into<String>,
        options: Vec<ObjectSchema>,
    ) -> Result<Self, BuildError> {
        let schema = Self::new(discriminator, options);
        match schema.internals.bag().construction_error() {
            Some(error) => Err(error.clone()),
            None => Ok(schema),
        }
    }
}

impl<C> DiscriminatedUnion<C> {
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    pub fn options(&self) -> &[ObjectSchema] {
        &self.options
    }

    /// The option selected by tag value `tag`.
    pub fn option_for(&self, tag: &Value) -> Option<&ObjectSchema> {
        self.index
            .iter()
            .find(|(value, _)| value == tag)
            .and_then(|(_, i)| self.options.get(*i))
    }
}

impl<C> Clone for DiscriminatedUnion<C> {
    fn clone(&self) -> Self {
        Self {
            discriminator: self.discriminator.clone(),
            options: self.options.clone(),
            index: self.index.clone(),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<C> fmt::Debug for DiscriminatedUnion<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscriminatedUnion")
            .field("discriminator", &self.discriminator)
            .field("options", &self.options.len())
            .field("internals", &self.internals)
            .finish()
    }
}

impl<C: Constraint> SchemaType for DiscriminatedUnion<C> {
    type Base = IndexMap<String, Value>;
    type Constraint = C;
    type Rebind<D: Constraint> = DiscriminatedUnion<D>;

    const PREFAULT_ON_MISMATCH: bool = true;

    fn internals(&self) -> &Internals<Self::Base> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Self::Base> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> DiscriminatedUnion<D> {
        DiscriminatedUnion {
            discriminator: self.discriminator,
            options: self.options,
            index: self.index,
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

        let selected = entries
            .get(&self.discriminator)
            .and_then(|tag| self.option_for(tag));
        if let Some(option) = selected {
            return match engine::parse(option, input, ctx) {
                Ok(out) => Some(out),
                Err(found) => {
                    issues.extend(found);
                    Some(IndexMap::new())
                }
            };
        }

        tracing::trace!(
            discriminator = %self.discriminator,
            "no option matched the tag, trying every option"
        );
        let mut branches = Vec::with_capacity(self.options.len());
        for option in &self.options {
            match engine::parse(option, input, ctx) {
                Ok(out) => return Some(out),
                Err(found) => branches.push(found),
            }
        }
        issues.push(RawIssue::invalid_union(branches));
        Some(IndexMap::new())
    }
}

#[must_use]
pub fn discriminated_union(
    discriminator: impl Into<String>,
    options: Vec<ObjectSchema>,
) -> DiscriminatedUnion {
    DiscriminatedUnion::new(discriminator, options)
}
