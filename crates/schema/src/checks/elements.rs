//! Collection element checks

use crate::checks::CheckKind;
use crate::foundation::{PathSegment, RawIssue};

/// Element equality for [`Unique`].
pub trait Distinct {
    /// Index of the first element equal to an earlier one.
    fn first_duplicate(&self) -> Option<usize>;
}

impl<T: PartialEq> Distinct for Vec<T> {
    fn first_duplicate(&self) -> Option<usize> {
        (1..self.len()).find(|&i| self[..i].contains(&self[i]))
    }
}

crate::check! {
    /// No two elements are equal.
    pub Unique for<T: Distinct>;
    kind(CheckKind::Unique);
    rule(input) { input.first_duplicate().is_none() }
    issue(input) {
        let index = input.first_duplicate().unwrap_or_default();
        RawIssue::custom()
            .with_param("check", "unique")
            .with_param("index", index)
            .with_path([PathSegment::Index(index)])
    }
    fn unique();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Check;
    use crate::foundation::{ParseContext, Payload};

    #[test]
    fn test_unique() {
        let mut payload = Payload::new(vec![1, 2, 3]);
        unique().apply(&mut payload, &ParseContext::new());
        assert!(!payload.has_issues());

        let mut payload = Payload::new(vec!["a", "b", "a"]);
        unique().apply(&mut payload, &ParseContext::new());
        let issue = &payload.issues()[0];
        assert_eq!(issue.path, vec![PathSegment::Index(2)]);
    }
}
