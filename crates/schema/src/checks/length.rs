//! Length and size checks
//!
//! Length applies to strings (counted in chars) and arrays; size applies to
//! maps and records. Both report `too_small` / `too_big` with the origin
//! taken from the measured type.

use indexmap::IndexMap;

use crate::checks::{CheckDef, CheckKind};
use crate::foundation::{Origin, RawIssue, Value};

/// Anything with a countable length.
pub trait Measurable {
    const ORIGIN: Origin;

    fn measure(&self) -> usize;
}

impl Measurable for String {
    const ORIGIN: Origin = Origin::String;

    #[inline]
    fn measure(&self) -> usize {
        self.chars().count()
    }
}

impl<T> Measurable for Vec<T> {
    const ORIGIN: Origin = Origin::Array;

    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<V> Measurable for IndexMap<String, V> {
    const ORIGIN: Origin = Origin::Record;

    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

fn count(n: usize) -> Value {
    Value::Uint(n as u64)
}

// ============================================================================
// LENGTH
// ============================================================================

crate::check! {
    /// At least `min` chars or items.
    pub MinLength { min: usize } for<T: Measurable>;
    rule(self, input) { input.measure() >= self.min }
    issue(self, input) { RawIssue::too_small(T::ORIGIN, count(self.min), true) }
    new(min: usize) {
        Self { def: CheckDef::new(CheckKind::MinLength).with_param("minimum", count(min)), min }
    }
    fn min_length(min: usize);
}

crate::check! {
    /// At most `max` chars or items.
    pub MaxLength { max: usize } for<T: Measurable>;
    rule(self, input) { input.measure() <= self.max }
    issue(self, input) { RawIssue::too_big(T::ORIGIN, count(self.max), true) }
    new(max: usize) {
        Self { def: CheckDef::new(CheckKind::MaxLength).with_param("maximum", count(max)), max }
    }
    fn max_length(max: usize);
}

crate::check! {
    /// Exactly `length` chars or items.
    pub Length { length: usize } for<T: Measurable>;
    rule(self, input) { input.measure() == self.length }
    issue(self, input) {
        if input.measure() > self.length {
            RawIssue::too_big(T::ORIGIN, count(self.length), true)
        } else {
            RawIssue::too_small(T::ORIGIN, count(self.length), true)
        }
    }
    new(length: usize) {
        Self { def: CheckDef::new(CheckKind::Length).with_param("length", count(length)), length }
    }
    fn length(length: usize);
}

/// At least one char or item.
#[must_use]
pub fn non_empty() -> MinLength {
    MinLength::new(1)
}

// ============================================================================
// SIZE
// ============================================================================

crate::check! {
    /// At least `min` entries.
    pub MinSize { min: usize } for<T: Measurable>;
    rule(self, input) { input.measure() >= self.min }
    issue(self, input) { RawIssue::too_small(T::ORIGIN, count(self.min), true) }
    new(min: usize) {
        Self { def: CheckDef::new(CheckKind::MinSize).with_param("minimum", count(min)), min }
    }
    fn min_size(min: usize);
}

crate::check! {
    /// At most `max` entries.
    pub MaxSize { max: usize } for<T: Measurable>;
    rule(self, input) { input.measure() <= self.max }
    issue(self, input) { RawIssue::too_big(T::ORIGIN, count(self.max), true) }
    new(max: usize) {
        Self { def: CheckDef::new(CheckKind::MaxSize).with_param("maximum", count(max)), max }
    }
    fn max_size(max: usize);
}

crate::check! {
    /// Exactly `size` entries.
    pub Size { size: usize } for<T: Measurable>;
    rule(self, input) { input.measure() == self.size }
    issue(self, input) {
        if input.measure() > self.size {
            RawIssue::too_big(T::ORIGIN, count(self.size), true)
        } else {
            RawIssue::too_small(T::ORIGIN, count(self.size), true)
        }
    }
    new(size: usize) {
        Self { def: CheckDef::new(CheckKind::Size).with_param("size", count(size)), size }
    }
    fn size(size: usize);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Check;
    use crate::foundation::{IssueCode, ParseContext, Payload};

    fn run<T, C: Check<T>>(check: &C, value: T) -> Vec<RawIssue> {
        let mut payload = Payload::new(value);
        check.apply(&mut payload, &ParseContext::new());
        payload.issues().to_vec()
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert!(run(&max_length(3), String::from("héé")).is_empty());
        assert_eq!(run(&max_length(2), String::from("héé")).len(), 1);
    }

    #[test]
    fn test_origin_follows_type() {
        let issues = run(&min_length(2), vec![1]);
        assert_eq!(issues[0].code, IssueCode::TooSmall);
        assert_eq!(issues[0].origin(), Some("array"));

        let issues = run(&min_length(2), String::from("a"));
        assert_eq!(issues[0].origin(), Some("string"));
    }

    #[test]
    fn test_exact_length_direction() {
        let long = run(&length(2), String::from("abc"));
        assert_eq!(long[0].code, IssueCode::TooBig);
        let short = run(&length(2), String::from("a"));
        assert_eq!(short[0].code, IssueCode::TooSmall);
        assert!(run(&length(2), String::from("ab")).is_empty());
    }

    #[test]
    fn test_size_on_records() {
        let mut map = IndexMap::new();
        map.insert("a".to_owned(), 1);
        let issues = run(&min_size(2), map);
        assert_eq!(issues[0].origin(), Some("record"));
        assert_eq!(issues[0].minimum(), Some(&Value::Uint(2)));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(run(&non_empty(), String::new()).len(), 1);
        assert!(run(&non_empty(), vec!["x"]).is_empty());
    }
}
