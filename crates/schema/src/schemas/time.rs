//! Timestamp schema

use chrono::{DateTime, Utc};

use crate::foundation::{TypeCode, Val, Value};
use crate::schemas::{leaf, Primitive, Schema};

pub type TimeSchema<C = Val> = Schema<DateTime<Utc>, C>;

impl Primitive for DateTime<Utc> {
    const TYPE: TypeCode = TypeCode::Time;

    fn extract(value: &Value) -> Option<Self> {
        match value {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// RFC 3339 strings, or integers as Unix seconds.
    fn coerce(value: &Value) -> Option<Value> {
        match value {
            Value::Time(_) => Some(value.clone()),
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|t| Value::Time(t.with_timezone(&Utc))),
            Value::Int(secs) => DateTime::from_timestamp(*secs, 0).map(Value::Time),
            Value::Uint(secs) => i64::try_from(*secs)
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(Value::Time),
            _ => None,
        }
    }
}

leaf!(DateTime<Utc> => TypeCode::Time; time, time_ptr, coerced_time);

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::combinators::SchemaExt;
    use crate::foundation::IssueCode;

    #[test]
    fn test_accepts_time_only() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(time().parse(at).unwrap(), at);
        assert!(time().parse("2024-01-15T10:00:00Z").is_err());
    }

    #[test]
    fn test_coerces_rfc3339_and_unix() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(coerced_time().parse("2024-01-15T12:00:00+02:00").unwrap(), at);
        assert_eq!(coerced_time().parse(at.timestamp()).unwrap(), at);
    }

    #[test]
    fn test_bounds_report_date_origin() {
        let floor = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let schema = time().min(floor);
        let early = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        let err = schema.parse(early).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
        assert_eq!(err.issues()[0].origin(), Some("date"));
    }
}
