//! Leaf schemas
//!
//! Every leaf is a [`Schema<B, C>`]: base type `B` (a [`Primitive`]) under
//! constraint `C`. The factories come in three flavors per kind:
//!
//! - `string()`: output is the value
//! - `string_ptr()`: output is `Option<Arc<String>>`, nil still rejected
//! - `coerced_string()`: converts compatible input before the type check
//!
//! # Categories
//!
//! - **String**: [`string`] plus format and affix checks
//! - **Numeric**: [`int`], [`int8`] .. [`uint64`], [`float32`], [`float64`],
//!   [`number`], [`bigint`], [`complex64`], [`complex128`]
//! - **Other**: [`boolean`], [`time`], [`nil`], [`any`], [`unknown`]
//! - **Enumerated**: [`enum_of`], [`literal`], [`literals`]

mod any;
mod bigint;
mod boolean;
mod complex;
mod enums;
mod nil;
mod number;
mod string;
mod time;

use std::fmt;
use std::marker::PhantomData;

use crate::checks::{gt, gte, lt, lte, Ordered};
use crate::combinators::SchemaExt;
use crate::foundation::{
    Base, Constraint, Internals, IntoValue, ParseContext, RawIssue, SchemaType, TypeCode, Val,
    Value,
};

pub use any::{any, unknown, ValueSchema};
pub use bigint::{bigint, bigint_ptr, coerced_bigint, BigIntSchema};
pub use boolean::{boolean, boolean_ptr, coerced_boolean, BoolSchema};
pub use complex::{
    coerced_complex128, coerced_complex64, complex128, complex128_ptr, complex64, complex64_ptr,
    ComplexSchema,
};
pub use enums::{enum_of, literal, literals};
pub use nil::{nil, NilSchema};
pub use number::{
    coerced_float32, coerced_float64, coerced_int, coerced_int16, coerced_int32, coerced_int64,
    coerced_int8, coerced_number, coerced_uint, coerced_uint16, coerced_uint32, coerced_uint64,
    coerced_uint8, float32, float32_ptr, float64, float64_ptr, int, int16, int16_ptr, int32,
    int32_ptr, int64, int64_ptr, int8, int8_ptr, int_ptr, number, number_ptr, uint, uint16,
    uint16_ptr, uint32, uint32_ptr, uint64, uint64_ptr, uint8, uint8_ptr, uint_ptr, FloatSchema,
    IntSchema,
};
pub use string::{coerced_string, string, string_ptr, StringSchema};
pub use time::{coerced_time, time, time_ptr, TimeSchema};

// ============================================================================
// PRIMITIVE
// ============================================================================

/// A base type a leaf schema can recognize in a [`Value`].
pub trait Primitive: Base + IntoValue {
    /// Type code of the plain factory.
    const TYPE: TypeCode;

    /// Recognizes the type in a non-pointer value.
    fn extract(value: &Value) -> Option<Self>;

    /// Best-effort conversion for coerced schemas.
    fn coerce(_value: &Value) -> Option<Value> {
        None
    }

    /// Issue for a value of the right kind but outside the type's range.
    fn out_of_range(_value: &Value) -> Option<RawIssue> {
        None
    }

    /// Whether nil is a valid instance.
    fn accepts_nil() -> bool {
        false
    }
}

/// Plain value first, then a pointer to `B` itself, then whatever the
/// pointer holds.
fn extract_base<B: Primitive>(input: &Value) -> Option<B> {
    if let Some(base) = B::extract(input) {
        return Some(base);
    }
    let pointer = input.pointer()?;
    pointer
        .downcast_ref::<B>()
        .cloned()
        .or_else(|| B::extract(&pointer.load()))
}

// ============================================================================
// SCHEMA
// ============================================================================

/// A leaf schema over base type `B`.
pub struct Schema<B: Primitive, C = Val> {
    internals: Internals<B>,
    _constraint: PhantomData<fn() -> C>,
}

impl<B: Primitive> Schema<B> {
    /// A schema reporting `B`'s own type code.
    pub fn new() -> Self {
        Self::with_type(B::TYPE)
    }

    /// A schema over `B` reporting another type code (`int64` over `i64`).
    pub fn with_type(type_code: TypeCode) -> Self {
        Self {
            internals: Internals::new(type_code),
            _constraint: PhantomData,
        }
    }
}

impl<B: Primitive> Default for Schema<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Primitive, C> Clone for Schema<B, C> {
    fn clone(&self) -> Self {
        Self {
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<B: Primitive, C> fmt::Debug for Schema<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("internals", &self.internals)
            .finish()
    }
}

impl<B: Primitive, C: Constraint> SchemaType for Schema<B, C> {
    type Base = B;
    type Constraint = C;
    type Rebind<D: Constraint> = Schema<B, D>;

    fn internals(&self) -> &Internals<B> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<B> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> Schema<B, D> {
        Schema {
            internals: self.internals,
            _constraint: PhantomData,
        }
    }

    fn check_input(
        &self,
        input: &Value,
        _ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> Option<B> {
        let internals = &self.internals;
        let allowed = internals.values();
        match extract_base::<B>(input) {
            Some(base) if allowed.is_empty() => Some(base),
            Some(base) => {
                if allowed.contains(&base.clone().into_value()) {
                    Some(base)
                } else {
                    issues.push(RawIssue::invalid_value(allowed));
                    None
                }
            }
            // Enumerated schemas report membership even for the wrong type.
            None if !allowed.is_empty() => {
                issues.push(RawIssue::invalid_value(allowed));
                None
            }
            None => {
                let issue = B::out_of_range(&input.load())
                    .unwrap_or_else(|| RawIssue::invalid_type(internals.type_code(), input));
                issues.push(issue);
                None
            }
        }
    }

    fn coerce(&self, input: &Value) -> Option<Value> {
        B::coerce(&input.load())
    }

    fn accepts_nil(&self) -> bool {
        B::accepts_nil()
    }

    fn preserves_identity(&self) -> bool {
        true
    }
}

/// Defines the plain, pointer and coerced factories of one leaf kind.
macro_rules! leaf {
    ($(#[$meta:meta])* $base:ty => $code:expr; $plain:ident, $ptr:ident, $coerced:ident) => {
        $(#[$meta])*
        #[must_use]
        pub fn $plain() -> $crate::schemas::Schema<$base> {
            $crate::schemas::Schema::with_type($code)
        }

        #[must_use]
        pub fn $ptr() -> $crate::schemas::Schema<$base, $crate::foundation::Ptr> {
            <$crate::schemas::Schema<$base> as $crate::foundation::SchemaType>::rebind::<
                $crate::foundation::Ptr,
            >($plain())
        }

        #[must_use]
        pub fn $coerced() -> $crate::schemas::Schema<$base> {
            $crate::combinators::SchemaExt::coerced(&$plain())
        }
    };
}

pub(crate) use leaf;

// ============================================================================
// ORDERED BASES: numbers, big integers, timestamps
// ============================================================================

impl<B, C> Schema<B, C>
where
    B: Primitive + Ordered,
    C: Constraint,
{
    /// Greater than `value`.
    #[must_use = "builder methods must be chained or built"]
    pub fn gt(&self, value: B) -> Self {
        self.with_check(gt(value))
    }

    /// Greater than or equal to `value`.
    #[must_use = "builder methods must be chained or built"]
    pub fn gte(&self, value: B) -> Self {
        self.with_check(gte(value))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn lt(&self, value: B) -> Self {
        self.with_check(lt(value))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn lte(&self, value: B) -> Self {
        self.with_check(lte(value))
    }

    /// Alias of [`gte`](Self::gte).
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, value: B) -> Self {
        self.gte(value)
    }

    /// Alias of [`lte`](Self::lte).
    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, value: B) -> Self {
        self.lte(value)
    }
}
