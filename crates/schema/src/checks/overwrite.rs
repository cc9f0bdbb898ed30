//! Normalizing checks
//!
//! An overwrite replaces the payload value and never fails. Pointer outputs
//! stop aliasing the input once an overwrite has run.

use std::fmt;
use std::sync::Arc;

use crate::checks::{Check, CheckDef, CheckKind};
use crate::foundation::{ParseContext, Payload};

/// Replaces the value with `f(value)`.
pub struct Overwrite<T> {
    map: Arc<dyn Fn(T) -> T + Send + Sync>,
    def: CheckDef,
}

impl<T> Overwrite<T> {
    pub fn new<F>(map: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            map: Arc::new(map),
            def: CheckDef::new(CheckKind::Overwrite),
        }
    }
}

impl<T> Clone for Overwrite<T> {
    fn clone(&self) -> Self {
        Self {
            map: Arc::clone(&self.map),
            def: self.def.clone(),
        }
    }
}

impl<T> fmt::Debug for Overwrite<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overwrite").finish_non_exhaustive()
    }
}

impl<T: Clone> Check<T> for Overwrite<T> {
    fn def(&self) -> &CheckDef {
        &self.def
    }

    fn apply(&self, payload: &mut Payload<T>, _ctx: &ParseContext) {
        let next = (self.map)(payload.value().clone());
        payload.set_value(next);
    }
}

/// Strips leading and trailing whitespace.
#[must_use]
pub fn trim() -> Overwrite<String> {
    Overwrite::new(|s: String| s.trim().to_owned())
}

#[must_use]
pub fn to_lowercase() -> Overwrite<String> {
    Overwrite::new(|s: String| s.to_lowercase())
}

#[must_use]
pub fn to_uppercase() -> Overwrite<String> {
    Overwrite::new(|s: String| s.to_uppercase())
}
