//! Fluent modifiers and the parse surface
//!
//! [`SchemaExt`] is implemented for every [`SchemaType`]. Modifiers never
//! touch the receiver: each one clones it, gives the clone a fresh
//! [`SchemaId`](crate::foundation::SchemaId) and changes only the clone.
//!
//! ```rust,ignore
//! use nebula_schema::prelude::*;
//!
//! let port = int().min(1).max(65_535);
//! let maybe_port = port.optional();      // port is unchanged
//! assert_eq!(maybe_port.parse(Value::Null).unwrap(), None);
//! ```

mod lazy;
mod pipe;
mod refine;
mod transform;

use std::sync::Arc;

use crate::checks::{Check, CheckFn, Overwrite};
use crate::engine;
use crate::foundation::{
    Base, Constraint, ErrorMap, Hook, IntoValue, Output, Params, ParseContext, Payload, Ptr,
    SchemaError, SchemaType, Val, Value,
};
use crate::registry::{self, Meta};

pub use lazy::{lazy, Lazy};
pub use pipe::{Pipe, PipeTarget};
pub use refine::RefineContext;
pub use transform::Transform;

/// Modifier and parse methods shared by every schema.
pub trait SchemaExt: SchemaType {
    /// A copy of this schema under a new id.
    fn fork(&self) -> Self {
        let mut next = self.clone();
        next.internals_mut().renew_id();
        next
    }

    // ========================================================================
    // PARSING
    // ========================================================================

    /// Parses untyped input with a default [`ParseContext`].
    fn parse(&self, input: impl Into<Value>) -> Result<Output<Self>, SchemaError> {
        self.parse_with(input, &ParseContext::new())
    }

    fn parse_with(
        &self,
        input: impl Into<Value>,
        ctx: &ParseContext,
    ) -> Result<Output<Self>, SchemaError> {
        let input = input.into();
        engine::parse(self, &input, ctx).map_err(|issues| ctx.finalize(issues))
    }

    /// Parses and panics with the rendered error on failure.
    #[track_caller]
    fn must_parse(&self, input: impl Into<Value>) -> Output<Self> {
        self.parse(input)
            .unwrap_or_else(|err| panic!("schema parse failed: {err}"))
    }

    /// Re-validates an already typed value: nil handling and checks only.
    fn strict_parse(&self, value: Output<Self>) -> Result<Output<Self>, SchemaError> {
        let ctx = ParseContext::new();
        engine::strict(self, value, &ctx).map_err(|issues| ctx.finalize(issues))
    }

    #[track_caller]
    fn must_strict_parse(&self, value: Output<Self>) -> Output<Self> {
        self.strict_parse(value)
            .unwrap_or_else(|err| panic!("schema parse failed: {err}"))
    }

    /// Parses and returns the output as an untyped [`Value`].
    fn parse_any(&self, input: impl Into<Value>) -> Result<Value, SchemaError>
    where
        Self::Base: IntoValue,
    {
        self.parse(input)
            .map(<Self::Constraint as Constraint>::to_value::<Self::Base>)
    }

    // ========================================================================
    // NIL HANDLING
    // ========================================================================

    /// Accepts nil as "absent"; output becomes `Option<Arc<Base>>`.
    fn optional(&self) -> Self::Rebind<Ptr> {
        let mut next = self.fork();
        let flags = &mut next.internals_mut().flags;
        flags.optional = true;
        flags.non_optional = false;
        next.rebind::<Ptr>()
    }

    /// Accepts an explicit nil; output becomes `Option<Arc<Base>>`.
    fn nilable(&self) -> Self::Rebind<Ptr> {
        let mut next = self.fork();
        let flags = &mut next.internals_mut().flags;
        flags.nilable = true;
        flags.non_optional = false;
        next.rebind::<Ptr>()
    }

    /// Both [`optional`](SchemaExt::optional) and [`nilable`](SchemaExt::nilable).
    fn nullish(&self) -> Self::Rebind<Ptr> {
        let mut next = self.fork();
        let flags = &mut next.internals_mut().flags;
        flags.optional = true;
        flags.nilable = true;
        flags.non_optional = false;
        next.rebind::<Ptr>()
    }

    /// Revokes optionality: nil fails with `non_optional_absent`.
    fn non_optional(&self) -> Self::Rebind<Val> {
        let mut next = self.fork();
        let flags = &mut next.internals_mut().flags;
        flags.optional = false;
        flags.nilable = false;
        flags.non_optional = true;
        next.rebind::<Val>()
    }

    /// Returned as-is for nil input; checks are skipped.
    fn default(&self, value: impl Into<Self::Base>) -> Self {
        let mut next = self.fork();
        next.internals_mut().default = Some(Hook::Value(value.into()));
        next
    }

    /// Like [`default`](SchemaExt::default), evaluated on every nil input.
    fn default_fn<F>(&self, produce: F) -> Self
    where
        F: Fn() -> Self::Base + Send + Sync + 'static,
    {
        let mut next = self.fork();
        next.internals_mut().default = Some(Hook::Func(Arc::new(produce)));
        next
    }

    /// Substituted for nil input and validated like any other input.
    fn prefault(&self, value: impl IntoValue) -> Self {
        let mut next = self.fork();
        next.internals_mut().prefault = Some(Hook::Value(value.into_value()));
        next
    }

    fn prefault_fn<F, T>(&self, produce: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: IntoValue,
    {
        let mut next = self.fork();
        next.internals_mut().prefault = Some(Hook::Func(Arc::new(move || produce().into_value())));
        next
    }

    // ========================================================================
    // CHECKS
    // ========================================================================

    /// Adds a predicate over the output. Pointer schemas also run it for nil.
    fn refine<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Output<Self>) -> bool + Send + Sync + 'static,
    {
        refine::attach(self, predicate, None)
    }

    /// [`refine`](SchemaExt::refine) with an error override for its issue.
    fn refine_with<F>(&self, predicate: F, error: impl Into<ErrorMap>) -> Self
    where
        F: Fn(&Output<Self>) -> bool + Send + Sync + 'static,
    {
        refine::attach(self, predicate, Some(error.into()))
    }

    /// Untyped refinement: the predicate sees the output as a [`Value`].
    fn refine_any<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
        Self::Base: IntoValue,
    {
        refine::attach(
            self,
            move |out: &Output<Self>| {
                predicate(&<Self::Constraint as Constraint>::to_value::<Self::Base>(out.clone()))
            },
            None,
        )
    }

    /// Adds a function with full payload access; it may emit many issues.
    fn check<F>(&self, run: F) -> Self
    where
        F: Fn(&mut Payload<Self::Base>) + Send + Sync + 'static,
    {
        self.with_check(CheckFn::new(run))
    }

    /// Attaches a prebuilt check.
    fn with_check<K>(&self, check: K) -> Self
    where
        K: Check<Self::Base> + 'static,
    {
        let mut next = self.fork();
        next.internals_mut().push_check(Arc::new(check));
        next
    }

    /// Rewrites the value in place; never fails.
    fn overwrite<F>(&self, map: F) -> Self
    where
        F: Fn(Self::Base) -> Self::Base + Send + Sync + 'static,
    {
        self.with_check(Overwrite::new(map))
    }

    // ========================================================================
    // COMPOSITION
    // ========================================================================

    /// Maps the validated output; the function may report issues through
    /// its [`RefineContext`].
    fn transform<O, F>(&self, map: F) -> Pipe<Self, Transform<Output<Self>, O>>
    where
        O: Base,
        F: Fn(Output<Self>, &mut RefineContext<'_>) -> O + Send + Sync + 'static,
    {
        Pipe::new(self.clone(), Transform::new(map))
    }

    /// Feeds this schema's output into `target`.
    fn pipe<T>(&self, target: T) -> Pipe<Self, T>
    where
        T: PipeTarget<Output<Self>>,
    {
        Pipe::new(self.clone(), target)
    }

    // ========================================================================
    // METADATA & PARAMETERS
    // ========================================================================

    /// Registers a description for the returned copy.
    fn describe(&self, description: impl Into<String>) -> Self {
        let description = description.into();
        let mut next = self.fork();
        next.internals_mut()
            .bag
            .set_description(description.clone());
        registry::global().derive(
            self.internals().id(),
            next.internals().id(),
            Meta::new().description(description),
        );
        next
    }

    /// Registers `meta` (merged over this schema's entry) for the returned copy.
    fn meta(&self, meta: Meta) -> Self {
        let next = self.fork();
        registry::global().derive(self.internals().id(), next.internals().id(), meta);
        next
    }

    fn description(&self) -> Option<String> {
        registry::global()
            .get(self.internals().id())
            .and_then(|meta| meta.description)
            .or_else(|| self.internals().bag().description().map(str::to_owned))
    }

    fn metadata(&self) -> Option<Meta> {
        registry::global().get(self.internals().id())
    }

    /// Error override for every issue this schema emits.
    fn error(&self, error: impl Into<ErrorMap>) -> Self {
        let mut next = self.fork();
        next.internals_mut().error = Some(error.into());
        next
    }

    fn with_params(&self, params: impl Into<Params>) -> Self {
        let mut next = self.fork();
        params.into().apply(next.internals_mut());
        next
    }

    /// Converts input with the schema's coercion before the type check.
    fn coerced(&self) -> Self {
        let mut next = self.fork();
        next.internals_mut().flags.coerce = true;
        next
    }
}

impl<S: SchemaType> SchemaExt for S {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::foundation::IssueCode;
    use crate::prelude::*;

    #[test]
    fn test_modifiers_leave_receiver_untouched() {
        let base = string().min(3);
        let optional = base.optional();
        let defaulted = base.default("abc");

        assert!(base.parse(Value::Null).is_err());
        assert_eq!(optional.parse(Value::Null).unwrap(), None);
        assert_eq!(defaulted.parse(Value::Null).unwrap(), "abc");
        assert_ne!(base.internals().id(), optional.internals().id());
    }

    #[test]
    fn test_default_skips_checks() {
        let schema = float64().min(50.0).default(10.0);
        assert_eq!(schema.parse(Value::Null).unwrap(), 10.0);
        let err = schema.parse(40.0).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_prefault_is_validated() {
        let ok = float64().min(50.0).prefault(100.0);
        assert_eq!(ok.parse(Value::Null).unwrap(), 100.0);
        assert_eq!(ok.parse(10.0).unwrap_err().issues()[0].code, IssueCode::TooSmall);

        let bad = float64().min(50.0).prefault(1.0);
        assert_eq!(bad.parse(Value::Null).unwrap_err().issues()[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_default_beats_nilable() {
        let schema = string().default("x").nilable();
        assert_eq!(schema.parse(Value::Null).unwrap().as_deref().map(String::as_str), Some("x"));
    }

    #[test]
    fn test_non_optional_revokes() {
        let schema = string().optional().non_optional();
        let err = schema.parse(Value::Null).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::NonOptionalAbsent);
        assert_eq!(schema.parse("a").unwrap(), "a");
    }

    #[test]
    fn test_refine_on_pointer_sees_nil() {
        let schema = string()
            .optional()
            .refine_with(|out: &Option<Arc<String>>| out.is_some(), "required");
        let err = schema.parse(Value::Null).unwrap_err();
        assert_eq!(err.issues()[0].message, "required");
    }

    #[test]
    fn test_check_emits_many() {
        let schema = slice(int()).check(|payload| {
            let odd: Vec<usize> = payload
                .value()
                .iter()
                .enumerate()
                .filter(|(_, n)| *n % 2 != 0)
                .map(|(i, _)| i)
                .collect();
            for i in odd {
                payload.add_issue(RawIssue::custom().with_path([PathSegment::Index(i)]));
            }
        });
        let err = schema.parse(Value::array([1_i64, 2, 3])).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.issues()[1].path, vec![PathSegment::Index(2)]);
    }

    #[test]
    fn test_overwrite_keeps_type() {
        let schema = string().overwrite(|s| s.to_uppercase());
        assert_eq!(schema.parse("abc").unwrap(), "ABC");
    }

    #[test]
    fn test_transform_with_context() {
        let schema = string().transform(|s: String, ctx: &mut RefineContext<'_>| {
            s.parse::<u16>().unwrap_or_else(|_| {
                ctx.issue("not a port");
                0
            })
        });
        assert_eq!(schema.parse("8080").unwrap(), 8080);
        let err = schema.parse("http").unwrap_err();
        assert_eq!(err.issues()[0].message, "not a port");
    }

    #[test]
    fn test_describe_registers_copy() {
        let base = string();
        let described = base.describe("user name");
        assert_eq!(described.description().as_deref(), Some("user name"));
        assert!(base.description().is_none());
    }

    #[test]
    fn test_with_params() {
        let schema = int().with_params(Params::from("bad number").coerce(true));
        assert_eq!(schema.parse("12").unwrap(), 12);
        assert_eq!(schema.parse("x").unwrap_err().issues()[0].message, "bad number");
    }

    #[test]
    #[should_panic(expected = "schema parse failed")]
    fn test_must_parse_panics() {
        let _ = int().must_parse("nope");
    }
}
