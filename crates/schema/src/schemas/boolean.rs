//! Boolean schema

use crate::foundation::{TypeCode, Val, Value};
use crate::schemas::{leaf, Primitive, Schema};

pub type BoolSchema<C = Val> = Schema<bool, C>;

impl Primitive for bool {
    const TYPE: TypeCode = TypeCode::Bool;

    fn extract(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn coerce(value: &Value) -> Option<Value> {
        let truthy = match value {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Uint(u) => *u != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" | "" => false,
                _ => return None,
            },
            _ => return None,
        };
        Some(Value::Bool(truthy))
    }
}

leaf!(bool => TypeCode::Bool; boolean, boolean_ptr, coerced_boolean);
