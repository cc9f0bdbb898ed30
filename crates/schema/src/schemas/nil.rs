//! Nil schema

use crate::foundation::{TypeCode, Value};
use crate::schemas::{Primitive, Schema};

pub type NilSchema = Schema<()>;

impl Primitive for () {
    const TYPE: TypeCode = TypeCode::Nil;

    fn extract(value: &Value) -> Option<Self> {
        value.is_null().then_some(())
    }

    fn accepts_nil() -> bool {
        true
    }
}

/// Accepts only nil.
#[must_use]
pub fn nil() -> NilSchema {
    Schema::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::SchemaExt;
    use crate::foundation::IssueCode;

    #[test]
    fn test_only_nil() {
        assert!(nil().parse(Value::Null).is_ok());
        let err = nil().parse(0_i64).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::InvalidType);
        assert_eq!(err.issues()[0].expected, Some(TypeCode::Nil));
    }
}
