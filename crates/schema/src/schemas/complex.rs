//! Complex number schemas

use num_complex::{Complex32, Complex64};

use crate::foundation::{TypeCode, Val, Value};
use crate::schemas::{leaf, Primitive, Schema};

pub type ComplexSchema<C = Val> = Schema<Complex64, C>;

fn coerce_complex(value: &Value) -> Option<Value> {
    match value {
        Value::Complex(_) => Some(value.clone()),
        Value::Int(_) | Value::Uint(_) | Value::Float(_) => value
            .as_f64()
            .map(|re| Value::Complex(Complex64::new(re, 0.0))),
        Value::String(s) => s.trim().parse::<Complex64>().ok().map(Value::Complex),
        _ => None,
    }
}

impl Primitive for Complex64 {
    const TYPE: TypeCode = TypeCode::Complex128;

    fn extract(value: &Value) -> Option<Self> {
        match value {
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    fn coerce(value: &Value) -> Option<Value> {
        coerce_complex(value)
    }
}

impl Primitive for Complex32 {
    const TYPE: TypeCode = TypeCode::Complex64;

    fn extract(value: &Value) -> Option<Self> {
        match value {
            Value::Complex(c) => Some(Complex32::new(c.re as f32, c.im as f32)),
            _ => None,
        }
    }

    fn coerce(value: &Value) -> Option<Value> {
        coerce_complex(value)
    }
}

leaf!(Complex32 => TypeCode::Complex64; complex64, complex64_ptr, coerced_complex64);
leaf!(Complex64 => TypeCode::Complex128; complex128, complex128_ptr, coerced_complex128);
