//! Arbitrary-precision integer schema

use num_bigint::BigInt;

use crate::foundation::{TypeCode, Val, Value};
use crate::schemas::{leaf, Primitive, Schema};

pub type BigIntSchema<C = Val> = Schema<BigInt, C>;

impl Primitive for BigInt {
    const TYPE: TypeCode = TypeCode::BigInt;

    /// Machine integers widen losslessly.
    fn extract(value: &Value) -> Option<Self> {
        match value {
            Value::BigInt(b) => Some(b.clone()),
            Value::Int(i) => Some(BigInt::from(*i)),
            Value::Uint(u) => Some(BigInt::from(*u)),
            _ => None,
        }
    }

    fn coerce(value: &Value) -> Option<Value> {
        match value {
            Value::BigInt(_) | Value::Int(_) | Value::Uint(_) => Some(value.clone()),
            Value::Bool(b) => Some(Value::BigInt(BigInt::from(u8::from(*b)))),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                format!("{f:.0}").parse::<BigInt>().ok().map(Value::BigInt)
            }
            Value::String(s) => s.trim().parse::<BigInt>().ok().map(Value::BigInt),
            _ => None,
        }
    }
}

leaf!(BigInt => TypeCode::BigInt; bigint, bigint_ptr, coerced_bigint);
