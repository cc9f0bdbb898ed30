//! Homogeneous list schema

use std::fmt;
use std::marker::PhantomData;

use crate::checks::{length, max_length, min_length, non_empty, unique, Distinct};
use crate::combinators::SchemaExt;
use crate::engine;
use crate::foundation::{
    prefixed, Constraint, Internals, Output, ParseContext, PathSegment, RawIssue, SchemaType,
    TypeCode, Val, Value,
};

/// Every element is parsed with the same schema `S`; the output is a
/// `Vec` of `S`'s typed outputs. All element failures are reported.
pub struct SliceSchema<S: SchemaType, C = Val> {
    element: S,
    internals: Internals<Vec<Output<S>>>,
    _constraint: PhantomData<fn() -> C>,
}

impl<S: SchemaType> SliceSchema<S> {
    pub fn new(element: S) -> Self {
        Self {
            element,
            internals: Internals::new(TypeCode::Array),
            _constraint: PhantomData,
        }
    }
}

impl<S: SchemaType, C> SliceSchema<S, C> {
    /// The element schema.
    pub fn element(&self) -> &S {
        &self.element
    }
}

impl<S: SchemaType, C: Constraint> SliceSchema<S, C> {
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, min: usize) -> Self {
        self.with_check(min_length(min))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, max: usize) -> Self {
        self.with_check(max_length(max))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn length(&self, len: usize) -> Self {
        self.with_check(length(len))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn non_empty(&self) -> Self {
        self.with_check(non_empty())
    }

    /// No two elements equal.
    #[must_use = "builder methods must be chained or built"]
    pub fn unique(&self) -> Self
    where
        Vec<Output<S>>: Distinct,
    {
        self.with_check(unique())
    }
}

impl<S: SchemaType, C> Clone for SliceSchema<S, C> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<S: SchemaType + fmt::Debug, C> fmt::Debug for SliceSchema<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceSchema")
            .field("element", &self.element)
            .field("internals", &self.internals)
            .finish()
    }
}

impl<S: SchemaType, C: Constraint> SchemaType for SliceSchema<S, C> {
    type Base = Vec<Output<S>>;
    type Constraint = C;
    type Rebind<D: Constraint> = SliceSchema<S, D>;

    const PREFAULT_ON_MISMATCH: bool = true;

    fn internals(&self) -> &Internals<Self::Base> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Self::Base> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> SliceSchema<S, D> {
        SliceSchema {
            element: self.element,
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
        let Value::Array(elements) = &*loaded else {
            issues.push(RawIssue::invalid_type(self.internals.type_code(), input));
            return None;
        };

        let mut out = Vec::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            match engine::parse(&self.element, element, ctx) {
                Ok(value) => out.push(value),
                Err(found) => issues.extend(prefixed(found, &PathSegment::Index(i))),
            }
        }
        Some(out)
    }
}

/// A list whose elements all match `element`.
#[must_use]
pub fn slice<S: SchemaType>(element: S) -> SliceSchema<S> {
    SliceSchema::new(element)
}
