//! Union schema: first matching option wins

use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{
    Constraint, Internals, ParseContext, RawIssue, SchemaRef, SchemaType, TypeCode, Val, Value,
};

/// Tries each option in declaration order and returns the first success.
/// When every option fails, one `invalid_union` issue carries each option's
/// issues.
pub struct UnionSchema<C = Val> {
    options: Vec<SchemaRef>,
    internals: Internals<Value>,
    _constraint: PhantomData<fn() -> C>,
}

impl UnionSchema {
    pub fn new(options: Vec<SchemaRef>) -> Self {
        Self {
            options,
            internals: Internals::new(TypeCode::Union),
            _constraint: PhantomData,
        }
    }
}

impl<C> UnionSchema<C> {
    pub fn options(&self) -> &[SchemaRef] {
        &self.options
    }
}

/// Runs `options` in order; `Err` holds every option's issues.
pub(crate) fn first_match<'a>(
    options: impl IntoIterator<Item = &'a SchemaRef>,
    input: &Value,
    ctx: &ParseContext,
) -> Result<Value, Vec<Vec<RawIssue>>> {
    let mut branches = Vec::new();
    for option in options {
        match option.parse_value(input, ctx) {
            Ok(value) => return Ok(value),
            Err(found) => branches.push(found),
        }
    }
    Err(branches)
}

impl<C> Clone for UnionSchema<C> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<C> fmt::Debug for UnionSchema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionSchema")
            .field("options", &self.options)
            .field("internals", &self.internals)
            .finish()
    }
}

impl<C: Constraint> SchemaType for UnionSchema<C> {
    type Base = Value;
    type Constraint = C;
    type Rebind<D: Constraint> = UnionSchema<D>;

    fn internals(&self) -> &Internals<Value> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Value> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> UnionSchema<D> {
        UnionSchema {
            options: self.options,
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
        match first_match(&self.options, input, ctx) {
            Ok(value) => Some(value),
            Err(branches) => {
                issues.push(RawIssue::invalid_union(branches));
                None
            }
        }
    }

    // Options decide for themselves whether nil is acceptable.
    fn accepts_nil(&self) -> bool {
        true
    }
}

/// A union; see also the [`union!`](crate::union) macro.
#[must_use]
pub fn union(options: Vec<SchemaRef>) -> UnionSchema {
    UnionSchema::new(options)
}
