//! Pass-through schemas

use crate::foundation::{TypeCode, Val, Value};
use crate::schemas::{Primitive, Schema};

pub type ValueSchema<C = Val> = Schema<Value, C>;

impl Primitive for Value {
    const TYPE: TypeCode = TypeCode::Any;

    fn extract(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn coerce(value: &Value) -> Option<Value> {
        Some(value.clone())
    }

    fn accepts_nil() -> bool {
        true
    }
}

/// Accepts every value, nil included, and returns it unchanged.
#[must_use]
pub fn any() -> ValueSchema {
    Schema::new()
}

/// Like [`any`], reported as `unknown`.
#[must_use]
pub fn unknown() -> ValueSchema {
    Schema::with_type(TypeCode::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::SchemaExt;

    #[test]
    fn test_passes_everything() {
        for input in [Value::Null, Value::from(1_i64), Value::array(["a"])] {
            assert_eq!(any().parse(input.clone()).unwrap(), input);
            assert_eq!(unknown().parse(input.clone()).unwrap(), input);
        }
    }

    #[test]
    fn test_checks_still_apply() {
        let schema = any().refine(|v: &Value| !v.is_null());
        assert!(schema.parse(Value::Null).is_err());
    }
}
