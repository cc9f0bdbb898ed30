//! PIPE combinator - feed one schema's output into the next stage

use std::fmt;
use std::marker::PhantomData;

use crate::engine;
use crate::foundation::{
    Base, Constraint, Internals, IntoValue, Output, ParseContext, RawIssue, SchemaType, TypeCode,
    Val, Value,
};

/// The second stage of a pipe: another schema or a [`Transform`](crate::combinators::Transform).
pub trait PipeTarget<I>: Clone + Send + Sync + 'static {
    type Output: Base;

    fn run(&self, input: I, ctx: &ParseContext) -> Result<Self::Output, Vec<RawIssue>>;

    fn type_code(&self) -> TypeCode {
        TypeCode::Pipe
    }
}

/// Any schema accepts the previous stage's output converted back to a value.
impl<I, S> PipeTarget<I> for S
where
    I: IntoValue,
    S: SchemaType,
{
    type Output = Output<S>;

    fn run(&self, input: I, ctx: &ParseContext) -> Result<Self::Output, Vec<RawIssue>> {
        engine::parse(self, &input.into_value(), ctx)
    }
}

// ============================================================================
// PIPE
// ============================================================================

/// Parses with `A`, then hands the output to `B`. Issues from `A` stop the
/// pipe before `B` runs.
///
/// Nil input goes to `A` unless the pipe itself has a default, prefault or
/// optional flag.
pub struct Pipe<A, B, C = Val>
where
    A: SchemaType,
    B: PipeTarget<Output<A>>,
{
    input: A,
    output: B,
    internals: Internals<B::Output>,
    _constraint: PhantomData<fn() -> C>,
}

impl<A, B> Pipe<A, B>
where
    A: SchemaType,
    B: PipeTarget<Output<A>>,
{
    pub fn new(input: A, output: B) -> Self {
        let internals = Internals::new(output.type_code());
        Self {
            input,
            output,
            internals,
            _constraint: PhantomData,
        }
    }
}

impl<A, B, C> Pipe<A, B, C>
where
    A: SchemaType,
    B: PipeTarget<Output<A>>,
{
    pub fn input(&self) -> &A {
        &self.input
    }

    pub fn output(&self) -> &B {
        &self.output
    }
}

impl<A, B, C> Clone for Pipe<A, B, C>
where
    A: SchemaType,
    B: PipeTarget<Output<A>>,
{
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            output: self.output.clone(),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<A, B, C> fmt::Debug for Pipe<A, B, C>
where
    A: SchemaType + fmt::Debug,
    B: PipeTarget<Output<A>> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("internals", &self.internals)
            .finish()
    }
}

impl<A, B, C> SchemaType for Pipe<A, B, C>
where
    A: SchemaType,
    B: PipeTarget<Output<A>>,
    C: Constraint,
{
    type Base = B::Output;
    type Constraint = C;
    type Rebind<D: Constraint> = Pipe<A, B, D>;

    fn internals(&self) -> &Internals<Self::Base> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Self::Base> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> Pipe<A, B, D> {
        Pipe {
            input: self.input,
            output: self.output,
            internals: self.internals,
            _constraint: PhantomData,
        }
    }

    fn check_input(
        &self,
        input: &Value,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> Option<Self::Base> {
        let middle = match engine::parse(&self.input, input, ctx) {
            Ok(middle) => middle,
            Err(found) => {
                issues.extend(found);
                return None;
            }
        };
        match self.output.run(middle, ctx) {
            Ok(out) => Some(out),
            Err(found) => {
                issues.extend(found);
                None
            }
        }
    }

    fn accepts_nil(&self) -> bool {
        true
    }
}
