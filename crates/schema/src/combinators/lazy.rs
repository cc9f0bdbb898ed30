//! LAZY combinator - deferred schema construction

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use crate::engine;
use crate::foundation::{
    Constraint, Internals, Output, ParseContext, RawIssue, SchemaType, TypeCode, Val, Value,
};

// ============================================================================
// LAZY COMBINATOR
// ============================================================================

/// Builds the inner schema on first parse and reuses it afterwards.
///
/// Needed for recursive schemas, which cannot be built eagerly:
///
/// ```rust,ignore
/// fn category() -> ObjectSchema {
///     object! {
///         "name" => string(),
///         "children" => slice(lazy(category)),
///     }
/// }
/// ```
///
/// Clones share the initialized schema.
pub struct Lazy<S, C = Val>
where
    S: SchemaType,
{
    init: Arc<dyn Fn() -> S + Send + Sync>,
    schema: Arc<OnceLock<S>>,
    internals: Internals<Output<S>>,
    _constraint: PhantomData<fn() -> C>,
}

impl<S: SchemaType> Lazy<S> {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self {
            init: Arc::new(init),
            schema: Arc::new(OnceLock::new()),
            internals: Internals::new(TypeCode::Lazy),
            _constraint: PhantomData,
        }
    }
}

impl<S: SchemaType, C> Lazy<S, C> {
    /// The inner schema, if it has been built.
    pub fn get(&self) -> Option<&S> {
        self.schema.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.schema.get().is_some()
    }

    /// Builds the inner schema if needed and returns it.
    pub fn force(&self) -> &S {
        self.schema.get_or_init(|| (self.init)())
    }
}

impl<S: SchemaType, C> Clone for Lazy<S, C> {
    fn clone(&self) -> Self {
        Self {
            init: Arc::clone(&self.init),
            schema: Arc::clone(&self.schema),
            internals: self.internals.clone(),
            _constraint: PhantomData,
        }
    }
}

impl<S: SchemaType, C> fmt::Debug for Lazy<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("internals", &self.internals)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl<S, C> SchemaType for Lazy<S, C>
where
    S: SchemaType,
    C: Constraint,
{
    type Base = Output<S>;
    type Constraint = C;
    type Rebind<D: Constraint> = Lazy<S, D>;

    fn internals(&self) -> &Internals<Self::Base> {
        &self.internals
    }

    fn internals_mut(&mut self) -> &mut Internals<Self::Base> {
        &mut self.internals
    }

    fn rebind<D: Constraint>(self) -> Lazy<S, D> {
        Lazy {
            init: self.init,
            schema: self.schema,
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
        match engine::parse(self.force(), input, ctx) {
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

/// Creates a LAZY combinator.
pub fn lazy<S, F>(init: F) -> Lazy<S>
where
    S: SchemaType,
    F: Fn() -> S + Send + Sync + 'static,
{
    Lazy::new(init)
}

// ============================================================================
// TESTS
// ============================================================================
