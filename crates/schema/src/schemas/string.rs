//! String schema

use chrono::SecondsFormat;

use crate::checks::{
    ends_with, format, includes, length, lowercase, max_length, min_length, non_empty,
    starts_with, to_lowercase, to_uppercase, trim, uppercase, Pattern, StringFormat,
};
use crate::combinators::SchemaExt;
use crate::foundation::{Constraint, SchemaType, TypeCode, Val, Value};
use crate::schemas::{leaf, Primitive, Schema};

pub type StringSchema<C = Val> = Schema<String, C>;

impl Primitive for String {
    const TYPE: TypeCode = TypeCode::String;

    fn extract(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn coerce(value: &Value) -> Option<Value> {
        let text = match value {
            Value::String(_) => return Some(value.clone()),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Uint(u) => u.to_string(),
            Value::Float(f) => f.to_string(),
            Value::BigInt(b) => b.to_string(),
            Value::Complex(c) => c.to_string(),
            Value::Time(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            _ => return None,
        };
        Some(Value::String(text))
    }
}

leaf! {
    /// Accepts strings.
    String => TypeCode::String; string, string_ptr, coerced_string
}

impl<C: Constraint> Schema<String, C> {
    /// At least `min` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, min: usize) -> Self {
        self.with_check(min_length(min))
    }

    /// At most `max` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, max: usize) -> Self {
        self.with_check(max_length(max))
    }

    /// Exactly `len` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn length(&self, len: usize) -> Self {
        self.with_check(length(len))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn non_empty(&self) -> Self {
        self.with_check(non_empty())
    }

    /// Must match `pattern`. An invalid pattern fails every parse with
    /// `construction_failed`.
    #[must_use = "builder methods must be chained or built"]
    pub fn regex(&self, pattern: &str) -> Self {
        match Pattern::compile(pattern) {
            Ok(check) => {
                let mut next = self.with_check(check);
                next.internals_mut().bag.insert("pattern", Value::from(pattern));
                next
            }
            Err(error) => {
                let mut next = self.fork();
                next.internals_mut().defer(error);
                next
            }
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn email(&self) -> Self {
        self.with_check(format(StringFormat::Email))
    }

    /// An absolute URL with a host.
    #[must_use = "builder methods must be chained or built"]
    pub fn url(&self) -> Self {
        self.with_check(format(StringFormat::Url))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn uuid(&self) -> Self {
        self.with_check(format(StringFormat::Uuid))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ipv4(&self) -> Self {
        self.with_check(format(StringFormat::Ipv4))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ipv6(&self) -> Self {
        self.with_check(format(StringFormat::Ipv6))
    }

    /// RFC 3339 timestamp.
    #[must_use = "builder methods must be chained or built"]
    pub fn datetime(&self) -> Self {
        self.with_check(format(StringFormat::Datetime))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn starts_with(&self, prefix: impl Into<String>) -> Self {
        self.with_check(starts_with(prefix))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ends_with(&self, suffix: impl Into<String>) -> Self {
        self.with_check(ends_with(suffix))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn includes(&self, needle: impl Into<String>) -> Self {
        self.with_check(includes(needle))
    }

    /// No uppercase characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn lowercase(&self) -> Self {
        self.with_check(lowercase())
    }

    /// No lowercase characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn uppercase(&self) -> Self {
        self.with_check(uppercase())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn trim(&self) -> Self {
        self.with_check(trim())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_lowercase(&self) -> Self {
        self.with_check(to_lowercase())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_uppercase(&self) -> Self {
        self.with_check(to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::foundation::IssueCode;

    #[test]
    fn test_rejects_other_types() {
        let err = string().parse(42_i64).unwrap_err();
        let issue = &err.issues()[0];
        assert_eq!(issue.code, IssueCode::InvalidType);
        assert_eq!(issue.expected, Some(TypeCode::String));
        assert_eq!(issue.received, Some(TypeCode::Int));
        assert_eq!(issue.message, "Invalid input: expected string, received int");
    }

    #[rstest]
    #[case(Value::from(true), "true")]
    #[case(Value::from(12_i64), "12")]
    #[case(Value::from(1.5_f64), "1.5")]
    fn test_coercion(#[case] input: Value, #[case] expected: &str) {
        assert_eq!(coerced_string().parse(input).unwrap(), expected);
    }

    #[test]
    fn test_coercion_failure_is_invalid_type() {
        let err = coerced_string().parse(Value::array([1_i64])).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::InvalidType);
    }

    #[test]
    fn test_length_counts_chars() {
        let schema = string().min(2).max(3);
        assert!(schema.parse("日本").is_ok());
        let err = schema.parse("a").unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
        assert_eq!(err.issues()[0].origin(), Some("string"));
        assert_eq!(err.issues()[0].message, "Too small: expected string to have >=2 characters");
    }

    #[rstest]
    #[case(string().email(), "ada@example.com", "ada@")]
    #[case(string().url(), "https://example.com/x", "example.com")]
    #[case(string().uuid(), "123e4567-e89b-12d3-a456-426614174000", "123e4567")]
    #[case(string().ipv4(), "10.0.0.1", "10.0.0.256")]
    #[case(string().ipv6(), "::1", "10.0.0.1")]
    #[case(string().datetime(), "2024-01-15T10:00:00Z", "2024-01-15")]
    fn test_formats(#[case] schema: StringSchema, #[case] good: &str, #[case] bad: &str) {
        assert!(schema.parse(good).is_ok());
        assert_eq!(schema.parse(bad).unwrap_err().issues()[0].code, IssueCode::InvalidFormat);
    }

    #[test]
    fn test_invalid_regex_is_deferred() {
        let schema = string().regex("(unclosed");
        let err = schema.parse("x").unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::ConstructionFailed);
    }

    #[test]
    fn test_regex_source_in_bag() {
        let schema = string().regex(r"^\d{3}$");
        assert_eq!(schema.internals().bag().get("pattern"), Some(&Value::from(r"^\d{3}$")));
        assert_eq!(string().internals().bag().get("pattern"), None);
    }

    #[test]
    fn test_regex() {
        let schema = string().regex(r"^\d{3}$");
        assert!(schema.parse("123").is_ok());
        assert_eq!(schema.parse("12a").unwrap_err().issues()[0].code, IssueCode::InvalidFormat);
    }

    #[test]
    fn test_normalizers_run_before_later_checks() {
        let schema = string().trim().to_lowercase().min(3);
        assert_eq!(schema.parse("  ABC ").unwrap(), "abc");
        assert!(schema.parse("  A ").is_err());
    }

    #[test]
    fn test_affixes() {
        let schema = string().starts_with("ab").ends_with("yz").includes("m");
        assert!(schema.parse("abmyz").is_ok());
        let err = schema.parse("xx").unwrap_err();
        assert_eq!(err.len(), 3);
    }
}
