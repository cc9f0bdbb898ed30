//! Integer and floating-point schemas
//!
//! Integers are recognized in `Int`/`Uint` values; a value of the right kind
//! that does not fit the width reports `too_big`/`too_small` instead of
//! `invalid_type`. Floats also accept integer values.

use crate::checks::{finite, integer, multiple_of, safe, Numeric};
use crate::combinators::SchemaExt;
use crate::foundation::{Constraint, IntoValue, Origin, RawIssue, TypeCode, Val, Value};
use crate::schemas::{leaf, Primitive, Schema};

pub type IntSchema<C = Val> = Schema<i64, C>;

pub type FloatSchema<C = Val> = Schema<f64, C>;

fn wide(value: &Value) -> Option<i128> {
    match value {
        Value::Int(i) => Some(i128::from(*i)),
        Value::Uint(u) => Some(i128::from(*u)),
        _ => None,
    }
}

fn coerce_integer(value: &Value) -> Option<Value> {
    match value {
        Value::Int(_) | Value::Uint(_) => Some(value.clone()),
        Value::Bool(b) => Some(Value::Int(i64::from(*b))),
        // `u64::MAX as f64` rounds up to 2^64, so the upper bound is exclusive.
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if *f >= 0.0 && *f < u64::MAX as f64 {
                Some(Value::Uint(*f as u64))
            } else if *f < 0.0 && *f >= i64::MIN as f64 {
                Some(Value::Int(*f as i64))
            } else {
                None
            }
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Value::Int)
                .or_else(|_| s.parse::<u64>().map(Value::Uint))
                .ok()
        }
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<Value> {
    match value {
        Value::Float(_) | Value::Int(_) | Value::Uint(_) => Some(value.clone()),
        Value::Bool(b) => Some(Value::Float(f64::from(u8::from(*b)))),
        Value::String(s) => s.trim().parse::<f64>().ok().map(Value::Float),
        _ => None,
    }
}

macro_rules! integer_primitive {
    ($($ty:ty => $code:expr),* $(,)?) => {
        $(impl Primitive for $ty {
            const TYPE: TypeCode = $code;

            fn extract(value: &Value) -> Option<Self> {
                wide(value).and_then(|n| <$ty>::try_from(n).ok())
            }

            fn coerce(value: &Value) -> Option<Value> {
                coerce_integer(value)
            }

            fn out_of_range(value: &Value) -> Option<RawIssue> {
                let n = wide(value)?;
                if n > i128::from(<$ty>::MAX) {
                    Some(RawIssue::too_big(Origin::Number, <$ty>::MAX.into_value(), true))
                } else if n < i128::from(<$ty>::MIN) {
                    Some(RawIssue::too_small(Origin::Number, <$ty>::MIN.into_value(), true))
                } else {
                    None
                }
            }
        })*
    };
}

integer_primitive! {
    i8 => TypeCode::Int8,
    i16 => TypeCode::Int16,
    i32 => TypeCode::Int32,
    i64 => TypeCode::Int64,
    u8 => TypeCode::Uint8,
    u16 => TypeCode::Uint16,
    u32 => TypeCode::Uint32,
    u64 => TypeCode::Uint64,
}

impl Primitive for f64 {
    const TYPE: TypeCode = TypeCode::Float64;

    fn extract(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            _ => None,
        }
    }

    fn coerce(value: &Value) -> Option<Value> {
        coerce_float(value)
    }
}

impl Primitive for f32 {
    const TYPE: TypeCode = TypeCode::Float32;

    /// Finite values that overflow `f32` are left to [`out_of_range`](Primitive::out_of_range).
    fn extract(value: &Value) -> Option<Self> {
        let wide = f64::extract(value)?;
        let narrow = wide as f32;
        (narrow.is_finite() || !wide.is_finite()).then_some(narrow)
    }

    fn coerce(value: &Value) -> Option<Value> {
        coerce_float(value)
    }

    fn out_of_range(value: &Value) -> Option<RawIssue> {
        let wide = f64::extract(value)?;
        if !wide.is_finite() || (wide as f32).is_finite() {
            return None;
        }
        if wide > 0.0 {
            Some(RawIssue::too_big(Origin::Number, f32::MAX.into_value(), true))
        } else {
            Some(RawIssue::too_small(Origin::Number, f32::MIN.into_value(), true))
        }
    }
}

leaf! {
    /// Signed integer of the platform word size (`i64`).
    i64 => TypeCode::Int; int, int_ptr, coerced_int
}
leaf!(i8 => TypeCode::Int8; int8, int8_ptr, coerced_int8);
leaf!(i16 => TypeCode::Int16; int16, int16_ptr, coerced_int16);
leaf!(i32 => TypeCode::Int32; int32, int32_ptr, coerced_int32);
leaf!(i64 => TypeCode::Int64; int64, int64_ptr, coerced_int64);
leaf! {
    /// Unsigned integer of the platform word size (`u64`).
    u64 => TypeCode::Uint; uint, uint_ptr, coerced_uint
}
leaf!(u8 => TypeCode::Uint8; uint8, uint8_ptr, coerced_uint8);
leaf!(u16 => TypeCode::Uint16; uint16, uint16_ptr, coerced_uint16);
leaf!(u32 => TypeCode::Uint32; uint32, uint32_ptr, coerced_uint32);
leaf!(u64 => TypeCode::Uint64; uint64, uint64_ptr, coerced_uint64);
leaf!(f32 => TypeCode::Float32; float32, float32_ptr, coerced_float32);
leaf!(f64 => TypeCode::Float64; float64, float64_ptr, coerced_float64);
leaf! {
    /// Any number, as `f64`.
    f64 => TypeCode::Float64; number, number_ptr, coerced_number
}

// ============================================================================
// NUMERIC CHECKS
// ============================================================================

impl<B, C> Schema<B, C>
where
    B: Primitive + Numeric,
    C: Constraint,
{
    /// Greater than zero.
    #[must_use = "builder methods must be chained or built"]
    pub fn positive(&self) -> Self {
        self.gt(B::zero())
    }

    /// Less than zero.
    #[must_use = "builder methods must be chained or built"]
    pub fn negative(&self) -> Self {
        self.lt(B::zero())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn non_negative(&self) -> Self {
        self.gte(B::zero())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn non_positive(&self) -> Self {
        self.lte(B::zero())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn multiple_of(&self, divisor: B) -> Self {
        self.with_check(multiple_of(divisor))
    }

    /// No fractional part; only meaningful on floats.
    #[must_use = "builder methods must be chained or built"]
    pub fn integer(&self) -> Self {
        self.with_check(integer())
    }

    /// Not NaN or infinite.
    #[must_use = "builder methods must be chained or built"]
    pub fn finite(&self) -> Self {
        self.with_check(finite())
    }

    /// Within ±(2^53 - 1).
    #[must_use = "builder methods must be chained or built"]
    pub fn safe(&self) -> Self {
        self.with_check(safe())
    }
}
