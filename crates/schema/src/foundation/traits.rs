//! Core schema traits
//!
//! - [`SchemaType`]: a typed schema with base output `Base` under a
//!   [`Constraint`] that decides the final output shape
//! - [`AnySchema`]: object-safe view used by containers for children
//! - [`SchemaRef`]: shared handle to an erased child schema

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::engine;
use crate::foundation::{Flags, Internals, IntoValue, ParseContext, RawIssue, SchemaId, TypeCode, Value};

// ============================================================================
// CONSTRAINTS
// ============================================================================

/// Bound for base output types.
pub trait Base: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Base for T {}

/// Output shape marker.
///
/// [`Val`] yields the base value itself. [`Ptr`] yields
/// `Option<Arc<B>>`, where `None` is nil and `Some` reuses the caller's
/// allocation when the input was a pointer that no check rewrote.
pub trait Constraint: Send + Sync + Sized + 'static {
    type Out<B: Base>: Clone + Send + Sync + 'static;

    /// Builds the output. `origin` is the input's allocation, if reusable.
    fn wrap<B: Base>(value: B, origin: Option<Arc<B>>) -> Self::Out<B>;

    /// The nil output, if this shape has one.
    fn nil<B: Base>() -> Option<Self::Out<B>>;

    /// Splits an output back into its base value; `None` for nil.
    fn split<B: Base>(out: Self::Out<B>) -> Option<(B, Option<Arc<B>>)>;

    /// Output-shaped view of a base value, for refinements.
    fn view<B: Base>(value: &B) -> Self::Out<B> {
        Self::wrap(value.clone(), None)
    }

    fn to_value<B: Base + IntoValue>(out: Self::Out<B>) -> Value;
}

/// Value constraint: output is the base type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Val;

/// Pointer constraint: output is `Option<Arc<Base>>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ptr;

impl Constraint for Val {
    type Out<B: Base> = B;

    fn wrap<B: Base>(value: B, _origin: Option<Arc<B>>) -> B {
        value
    }

    fn nil<B: Base>() -> Option<B> {
        None
    }

    fn split<B: Base>(out: B) -> Option<(B, Option<Arc<B>>)> {
        Some((out, None))
    }

    fn to_value<B: Base + IntoValue>(out: B) -> Value {
        out.into_value()
    }
}

impl Constraint for Ptr {
    type Out<B: Base> = Option<Arc<B>>;

    fn wrap<B: Base>(value: B, origin: Option<Arc<B>>) -> Option<Arc<B>> {
        Some(origin.unwrap_or_else(|| Arc::new(value)))
    }

    fn nil<B: Base>() -> Option<Option<Arc<B>>> {
        Some(None)
    }

    fn split<B: Base>(out: Option<Arc<B>>) -> Option<(B, Option<Arc<B>>)> {
        out.map(|arc| (B::clone(&arc), Some(arc)))
    }

    fn to_value<B: Base + IntoValue>(out: Option<Arc<B>>) -> Value {
        out.into_value()
    }
}

/// Final output type of schema `S`.
pub type Output<S> = <<S as SchemaType>::Constraint as Constraint>::Out<<S as SchemaType>::Base>;

// ============================================================================
// SCHEMA TYPE
// ============================================================================

/// A typed schema.
///
/// Implementors supply the type-specific step ([`check_input`]); the shared
/// engine handles nil, defaults, prefaults, coercion, checks and the
/// constraint wrap.
///
/// [`check_input`]: SchemaType::check_input
pub trait SchemaType: Clone + Send + Sync + 'static {
    /// Output before the constraint is applied.
    type Base: Base;
    type Constraint: Constraint;
    /// The same schema under another constraint.
    type Rebind<C: Constraint>: SchemaType<Base = Self::Base, Constraint = C>;

    /// Whether a prefault also replaces input of the wrong type.
    const PREFAULT_ON_MISMATCH: bool = false;

    fn internals(&self) -> &Internals<Self::Base>;

    fn internals_mut(&mut self) -> &mut Internals<Self::Base>;

    fn rebind<C: Constraint>(self) -> Self::Rebind<C>;

    /// Recognizes the base value in `input`; containers also parse their
    /// children here. Issues go to `issues`; `None` means nothing usable.
    fn check_input(
        &self,
        input: &Value,
        ctx: &ParseContext,
        issues: &mut Vec<RawIssue>,
    ) -> Option<Self::Base>;

    /// Best-effort conversion of `input` before the type check.
    fn coerce(&self, _input: &Value) -> Option<Value> {
        None
    }

    /// Whether nil reaches [`check_input`](SchemaType::check_input).
    fn accepts_nil(&self) -> bool {
        false
    }

    /// Whether an unmodified pointer input can be returned as-is.
    fn preserves_identity(&self) -> bool {
        false
    }
}

// ============================================================================
// TYPE ERASURE
// ============================================================================

/// Object-safe schema view.
pub trait AnySchema: Send + Sync {
    fn parse_value(&self, input: &Value, ctx: &ParseContext) -> Result<Value, Vec<RawIssue>>;

    fn id(&self) -> SchemaId;

    fn type_code(&self) -> TypeCode;

    fn flags(&self) -> Flags;

    /// Enum/literal values; discriminated unions and records key off these.
    fn values(&self) -> &[Value];

    fn to_optional(&self) -> SchemaRef;

    fn to_required(&self) -> SchemaRef;
}

impl<S> AnySchema for S
where
    S: SchemaType,
    S::Base: IntoValue,
{
    fn parse_value(&self, input: &Value, ctx: &ParseContext) -> Result<Value, Vec<RawIssue>> {
        engine::parse(self, input, ctx).map(<S::Constraint as Constraint>::to_value::<S::Base>)
    }

    fn id(&self) -> SchemaId {
        self.internals().id()
    }

    fn type_code(&self) -> TypeCode {
        self.internals().type_code()
    }

    fn flags(&self) -> Flags {
        self.internals().flags()
    }

    fn values(&self) -> &[Value] {
        self.internals().values()
    }

    fn to_optional(&self) -> SchemaRef {
        SchemaRef::new(crate::combinators::SchemaExt::optional(self))
    }

    fn to_required(&self) -> SchemaRef {
        SchemaRef::new(crate::combinators::SchemaExt::non_optional(self))
    }
}

/// Shared handle to a type-erased schema.
#[derive(Clone)]
pub struct SchemaRef(Arc<dyn AnySchema>);

impl SchemaRef {
    pub fn new<S: AnySchema + 'static>(schema: S) -> Self {
        Self(Arc::new(schema))
    }
}

impl<S: AnySchema + 'static> From<S> for SchemaRef {
    fn from(schema: S) -> Self {
        Self::new(schema)
    }
}

impl Deref for SchemaRef {
    type Target = dyn AnySchema;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRef")
            .field("id", &self.0.id())
            .field("type_code", &self.0.type_code())
            .finish()
    }
}
