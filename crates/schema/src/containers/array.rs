//! Fixed-length array (tuple) schema

use std::fmt;
use std::marker::PhantomData;

use crate::containers::descend;
use crate::foundation::{
    Constraint, Internals, Origin, ParseContext, PathSegment, RawIssue, SchemaRef, SchemaType,
    TypeCode, Val, Value,
};

/// One schema per position. The input must have exactly as many elements
/// as there are item schemas; otherwise a single `too_small`/`too_big`
/// issue is reported and no element is parsed.
pub struct ArraySchema<C = Val> {
    items: Vec<SchemaRef>,
    internals: Internals<Vec<Value>>,
    _constraint: PhantomData<fn() -> C>,
}

impl ArraySchema {
    pub fn new(items: Vec<SchemaRef>) -> Self {
        Self {
            items,
            internals: Internals::new(TypeCode::Tuple),
            _constraint: PhantomData,
        }
    }
}

impl<C> ArraySchema<C> {
    pub fn items(&self) -> &[SchemaRef] {
        &self.items
    }

    pub fn arity(&self) -> usize {
        self.items.len()
    }
}

impl<C> Clone for ArraySchema<C> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<C> fmt::Debug for ArraySchema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySchema")
            .field("items", &self.items)
            .field("internals", &self.internals)
            .finish()
    }
}

impl<C: Constraint> SchemaType for ArraySchema<C> {
    type Base = Vec<Value>;
    type Constraint = C;
    type Rebind<D: Constraint> = ArraySchema<D>;

    const PREFAULT_ON_MISMATCH: bool = true;

    fn internals(&self) -> &Internals<Vec<Value>> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Vec<Value>> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> ArraySchema<D> {
        ArraySchema {
            items: self.items,
            internals: self.internals,
            _constraint: PhantomData,
        }
    }

    fn check_input(
        &self,
        input: &Value,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> Option<Vec<Value>> {
        let loaded = input.load();
        let Value::Array(elements) = &*loaded else {
            issues.push(RawIssue::invalid_type(self.internals.type_code(), input));
            return None;
        };

        let arity = Value::Uint(self.items.len() as u64);
        if elements.len() < self.items.len() {
            issues.push(RawIssue::too_small(Origin::Array, arity, true));
            return Some(Vec::new());
        }
        if elements.len() > self.items.len() {
            issues.push(RawIssue::too_big(Origin::Array, arity, true));
            return Some(Vec::new());
        }

        let mut out = Vec::with_capacity(elements.len());
        for (i, (item, element)) in self.items.iter().zip(elements).enumerate() {
            if let Some(value) = descend(item, element, PathSegment::Index(i), ctx, issues) {
                out.push(value);
            }
        }
        Some(out)
    }
}

/// A fixed-length array; see also the [`tuple!`](crate::tuple) macro.
#[must_use]
pub fn array(items: Vec<SchemaRef>) -> ArraySchema {
    ArraySchema::new(items)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::foundation::{IssueCode, Origin};
    use crate::prelude::*;

    #[test]
    fn test_arity_mismatch_skips_elements() {
        let schema = tuple![string(), string()];
        let err = schema.parse(Value::array(["a"])).unwrap_err();
        assert_eq!(err.len(), 1);
        let issue = &err.issues()[0];
        assert_eq!(issue.code, IssueCode::TooSmall);
        assert_eq!(issue.origin(), Some(Origin::Array.as_str()));
        assert!(issue.inclusive());
        assert_eq!(issue.minimum(), Some(&Value::Uint(2)));

        let err = schema.parse(Value::array([1_i64, 2, 3])).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::TooBig);
    }

    #[test]
    fn test_positions() {
        let schema = tuple![string(), int()];
        let out = schema.parse(Value::array([Value::from("a"), Value::from(1_i64)])).unwrap();
        assert_eq!(out, vec![Value::from("a"), Value::from(1_i64)]);

        let err = schema.parse(Value::array([Value::from(1_i64), Value::from("a")])).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.issues()[1].path, vec![PathSegment::Index(1)]);
    }

    #[test]
    fn test_prefault_on_wrong_type() {
        let schema = tuple![int()].prefault(Value::array([0_i64]));
        assert_eq!(schema.parse("nope").unwrap(), vec![Value::from(0_i64)]);
        assert!(schema.parse(Value::array(["x"])).is_err());
    }
}
