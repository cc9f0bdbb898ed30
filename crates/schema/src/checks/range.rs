//! Range checks
//!
//! `gt`/`gte`/`lt`/`lte` over anything ordered: numbers, big integers and
//! timestamps. The bound is kept typed; issues report it as a [`Value`].

use chrono::{DateTime, Utc};
use num_bigint::BigInt;

use crate::checks::{Check, CheckDef, CheckKind};
use crate::foundation::{IntoValue, Origin, ParseContext, Payload, RawIssue, Value};

/// Totally or partially ordered base types with a bound origin.
pub trait Ordered: PartialOrd + Clone + IntoValue + Send + Sync + 'static {
    const ORIGIN: Origin;
}

macro_rules! ordered {
    ($origin:expr => $($ty:ty),*) => {
        $(impl Ordered for $ty {
            const ORIGIN: Origin = $origin;
        })*
    };
}

ordered!(Origin::Number => i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);
ordered!(Origin::BigInt => BigInt);
ordered!(Origin::Date => DateTime<Utc>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Lower,
    Upper,
}

/// A lower or upper bound, inclusive or exclusive.
#[derive(Debug, Clone)]
pub struct Bound<T> {
    pub value: T,
    pub inclusive: bool,
    side: Side,
    def: CheckDef,
}

impl<T: Ordered> Bound<T> {
    fn new(value: T, inclusive: bool, side: Side) -> Self {
        let (kind, key) = match side {
            Side::Lower => (CheckKind::GreaterThan, "minimum"),
            Side::Upper => (CheckKind::LessThan, "maximum"),
        };
        let def = CheckDef::new(kind)
            .with_param(key, value.clone().into_value())
            .with_param("inclusive", inclusive);
        Self {
            value,
            inclusive,
            side,
            def,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, error: impl Into<crate::foundation::ErrorMap>) -> Self {
        self.def.error = Some(error.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn abort(mut self) -> Self {
        self.def.abort = true;
        self
    }

    fn holds(&self, input: &T) -> bool {
        match (self.side, self.inclusive) {
            (Side::Lower, true) => *input >= self.value,
            (Side::Lower, false) => *input > self.value,
            (Side::Upper, true) => *input <= self.value,
            (Side::Upper, false) => *input < self.value,
        }
    }
}

impl<T: Ordered> Check<T> for Bound<T> {
    fn def(&self) -> &CheckDef {
        &self.def
    }

    fn apply(&self, payload: &mut Payload<T>, _ctx: &ParseContext) {
        if self.holds(payload.value()) {
            return;
        }
        let bound: Value = self.value.clone().into_value();
        let issue = match self.side {
            Side::Lower => RawIssue::too_small(T::ORIGIN, bound, self.inclusive),
            Side::Upper => RawIssue::too_big(T::ORIGIN, bound, self.inclusive),
        };
        payload.add_issue(issue);
    }
}

/// Strictly greater than `value`.
#[must_use]
pub fn gt<T: Ordered>(value: T) -> Bound<T> {
    Bound::new(value, false, Side::Lower)
}

/// Greater than or equal to `value`.
#[must_use]
pub fn gte<T: Ordered>(value: T) -> Bound<T> {
    Bound::new(value, true, Side::Lower)
}

/// Strictly less than `value`.
#[must_use]
pub fn lt<T: Ordered>(value: T) -> Bound<T> {
    Bound::new(value, false, Side::Upper)
}

/// Less than or equal to `value`.
#[must_use]
pub fn lte<T: Ordered>(value: T) -> Bound<T> {
    Bound::new(value, true, Side::Upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::IssueCode;
    use rstest::rstest;

    fn fails<C: Check<T>, T>(check: &C, value: T) -> Option<RawIssue> {
        let mut payload = Payload::new(value);
        check.apply(&mut payload, &ParseContext::new());
        payload.issues().first().cloned()
    }

    #[rstest]
    #[case(gt(5_i64), 5, true)]
    #[case(gt(5_i64), 6, false)]
    #[case(gte(5_i64), 5, false)]
    #[case(lt(5_i64), 5, true)]
    #[case(lte(5_i64), 5, false)]
    #[case(lte(5_i64), 6, true)]
    fn test_inclusive_and_exclusive(#[case] check: Bound<i64>, #[case] value: i64, #[case] fail: bool) {
        assert_eq!(fails(&check, value).is_some(), fail);
    }

    #[test]
    fn test_issue_carries_bound() {
        let issue = fails(&gt(0.5_f64), 0.5).unwrap();
        assert_eq!(issue.code, IssueCode::TooSmall);
        assert_eq!(issue.minimum(), Some(&Value::Float(0.5)));
        assert!(!issue.inclusive());
        assert_eq!(issue.origin(), Some("number"));
    }

    #[test]
    fn test_date_origin() {
        let cutoff = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let earlier = DateTime::<Utc>::from_timestamp(1_600_000_000, 0).unwrap();
        let issue = fails(&gte(cutoff), earlier).unwrap();
        assert_eq!(issue.origin(), Some("date"));
    }
}
