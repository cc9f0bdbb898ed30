//! TRANSFORM node - the output side of `SchemaExt::transform`

use std::fmt;
use std::sync::Arc;

use crate::combinators::{PipeTarget, RefineContext};
use crate::foundation::{Base, ParseContext, RawIssue, TypeCode};

type MapFn<I, O> = Arc<dyn Fn(I, &mut RefineContext<'_>) -> O + Send + Sync>;

/// Maps a value of type `I` to `O`. Issues added to the context, or an
/// abort, fail the enclosing pipe.
pub struct Transform<I, O> {
    map: MapFn<I, O>,
}

impl<I, O> Transform<I, O> {
    pub fn new<F>(map: F) -> Self
    where
        F: Fn(I, &mut RefineContext<'_>) -> O + Send + Sync + 'static,
    {
        Self { map: Arc::new(map) }
    }
}

impl<I, O> Clone for Transform<I, O> {
    fn clone(&self) -> Self {
        Self {
            map: Arc::clone(&self.map),
        }
    }
}

impl<I, O> fmt::Debug for Transform<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").finish_non_exhaustive()
    }
}

impl<I, O> PipeTarget<I> for Transform<I, O>
where
    I: Base,
    O: Base,
{
    type Output = O;

    fn run(&self, input: I, ctx: &ParseContext) -> Result<O, Vec<RawIssue>> {
        let mut refine = RefineContext::new(ctx);
        let out = (self.map)(input, &mut refine);
        refine.finish(out)
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_transform_changes_output_type() {
        let len = string().transform(|s: String, _: &mut RefineContext<'_>| s.chars().count());
        assert_eq!(len.parse("héllo").unwrap(), 5);
        assert_eq!(len.internals().type_code(), TypeCode::Transform);
    }

    #[test]
    fn test_abort_fails_pipe() {
        let schema = int().transform(|n: i64, ctx: &mut RefineContext<'_>| {
            if n < 0 {
                ctx.abort();
            }
            n * 2
        });
        assert_eq!(schema.parse(4_i64).unwrap(), 8);
        assert!(schema.parse(-1_i64).is_err());
    }

    #[test]
    fn test_run_directly() {
        let double = Transform::new(|n: i64, _: &mut RefineContext<'_>| n * 2);
        assert_eq!(double.run(21, &ParseContext::new()).unwrap(), 42);
    }
}
