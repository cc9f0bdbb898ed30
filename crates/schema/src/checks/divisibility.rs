//! Numeric checks: divisibility, integrality, finiteness, safe range

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::checks::range::Ordered;
use crate::checks::{CheckDef, CheckKind};
use crate::foundation::{Origin, RawIssue, TypeCode, Value};

/// Largest integer exactly representable as an `f64` (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Arithmetic needed by numeric checks.
pub trait Numeric: Ordered {
    fn zero() -> Self;

    fn divisible_by(&self, divisor: &Self) -> bool;

    fn is_integral(&self) -> bool {
        true
    }

    fn is_finite_number(&self) -> bool {
        true
    }

    /// Within ±[`MAX_SAFE_INTEGER`].
    fn is_safe(&self) -> bool;
}

macro_rules! numeric_int {
    ($($ty:ty),*) => {
        $(impl Numeric for $ty {
            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn divisible_by(&self, divisor: &Self) -> bool {
                // Only `MIN % -1` overflows, and MIN is a multiple of -1.
                *divisor != 0 && self.checked_rem(*divisor).is_none_or(|r| r == 0)
            }

            #[inline]
            fn is_safe(&self) -> bool {
                i128::from(*self).abs() <= i128::from(MAX_SAFE_INTEGER)
            }
        })*
    };
}

numeric_int!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! numeric_float {
    ($($ty:ty),*) => {
        $(impl Numeric for $ty {
            #[inline]
            fn zero() -> Self {
                0.0
            }

            fn divisible_by(&self, divisor: &Self) -> bool {
                if *divisor == 0.0 || !self.is_finite() {
                    return false;
                }
                // Relative tolerance absorbs binary representation error (0.3 / 0.1).
                let quotient = f64::from(*self) / f64::from(*divisor);
                (quotient - quotient.round()).abs() < 1e-9 * quotient.abs().max(1.0)
            }

            #[inline]
            fn is_integral(&self) -> bool {
                self.is_finite() && self.fract() == 0.0
            }

            #[inline]
            fn is_finite_number(&self) -> bool {
                self.is_finite()
            }

            #[inline]
            fn is_safe(&self) -> bool {
                self.is_finite() && f64::from(*self).abs() <= MAX_SAFE_INTEGER as f64
            }
        })*
    };
}

numeric_float!(f32, f64);

impl Numeric for BigInt {
    fn zero() -> Self {
        <BigInt as Zero>::zero()
    }

    fn divisible_by(&self, divisor: &Self) -> bool {
        !divisor.is_zero() && (self % divisor).is_zero()
    }

    fn is_safe(&self) -> bool {
        self.abs() <= BigInt::from(MAX_SAFE_INTEGER)
    }
}

// ============================================================================
// MULTIPLE OF
// ============================================================================

/// Divisible by `divisor`. A zero divisor rejects everything.
#[derive(Debug, Clone)]
pub struct MultipleOf<T> {
    pub divisor: T,
    def: CheckDef,
}

impl<T: Numeric> MultipleOf<T> {
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, error: impl Into<crate::foundation::ErrorMap>) -> Self {
        self.def.error = Some(error.into());
        self
    }
}

impl<T: Numeric> crate::checks::Check<T> for MultipleOf<T> {
    fn def(&self) -> &CheckDef {
        &self.def
    }

    fn apply(&self, payload: &mut crate::foundation::Payload<T>, _ctx: &crate::foundation::ParseContext) {
        if !payload.value().divisible_by(&self.divisor) {
            payload.add_issue(RawIssue::not_multiple_of(self.divisor.clone().into_value()));
        }
    }
}

#[must_use]
pub fn multiple_of<T: Numeric>(divisor: T) -> MultipleOf<T> {
    let def = CheckDef::new(CheckKind::MultipleOf).with_param("divisor", divisor.clone().into_value());
    MultipleOf { divisor, def }
}

// ============================================================================
// INTEGRALITY / FINITENESS / SAFETY
// ============================================================================

crate::check! {
    /// No fractional part.
    pub Integer for<T: Numeric>;
    kind(CheckKind::Integer);
    rule(input) { input.is_integral() }
    issue(input) { RawIssue::invalid_type(TypeCode::Int, &input.clone().into_value()) }
    fn integer();
}

crate::check! {
    /// Not NaN or infinite.
    pub Finite for<T: Numeric>;
    kind(CheckKind::Finite);
    rule(input) { input.is_finite_number() }
    issue(input) { RawIssue::invalid_type(TypeCode::Float64, &input.clone().into_value()) }
    fn finite();
}

crate::check! {
    /// Within the safe integer range.
    pub Safe for<T: Numeric>;
    kind(CheckKind::Safe);
    rule(input) { input.is_safe() }
    issue(input) {
        if *input > T::zero() {
            RawIssue::too_big(Origin::Number, Value::Int(MAX_SAFE_INTEGER), true)
        } else {
            RawIssue::too_small(Origin::Number, Value::Int(-MAX_SAFE_INTEGER), true)
        }
    }
    fn safe();
}
