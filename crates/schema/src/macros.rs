//! Macros for defining checks and composing container schemas.
//!
//! - [`check!`] - a complete check (struct + `Check` impl + factory fn)
//! - [`object!`] - an object schema from `key => schema` pairs
//! - [`tuple!`] - a fixed-length array schema
//! - [`union!`] - a union of heterogeneous schemas
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_schema::check;
//! use nebula_schema::checks::{CheckDef, CheckKind};
//! use nebula_schema::foundation::RawIssue;
//!
//! check! {
//!     pub NoSpaces for String;
//!     kind(CheckKind::Custom);
//!     rule(input) { !input.contains(' ') }
//!     issue(input) { RawIssue::custom().with_message("no spaces allowed") }
//!     fn no_spaces();
//! }
//!
//! let user = object! {
//!     "name" => string().with_check(no_spaces()),
//!     "age" => int().optional(),
//! };
//! ```

// ============================================================================
// CHECK MACRO
// ============================================================================

/// Creates a check: struct definition, `Check` implementation, constructor,
/// `error`/`abort` options and a factory function.
///
/// `#[derive(Debug, Clone)]` is always applied; the generated struct holds
/// the declared fields plus its [`CheckDef`](crate::checks::CheckDef).
///
/// # Variants
///
/// **Unit check** on a concrete input:
/// ```rust,ignore
/// check! {
///     pub Lowercase for String;
///     kind(CheckKind::Format(StringFormat::Lowercase));
///     rule(input) { input.chars().all(|c| !c.is_uppercase()) }
///     issue(input) { RawIssue::invalid_format("lowercase") }
///     fn lowercase();
/// }
/// ```
///
/// **Fields** on a concrete input (constructor must build `def`):
/// ```rust,ignore
/// check! {
///     pub StartsWith { prefix: String } for String;
///     rule(self, input) { input.starts_with(&self.prefix) }
///     issue(self, input) { RawIssue::invalid_format("starts_with") }
///     new(prefix: String) { Self { def: CheckDef::new(kind), prefix } }
///     fn starts_with(prefix: String);
/// }
/// ```
///
/// **Fields** on any input implementing one trait:
/// ```rust,ignore
/// check! {
///     pub MinLength { min: usize } for<T: Measurable>;
///     rule(self, input) { input.measure() >= self.min }
///     issue(self, input) { RawIssue::too_small(T::ORIGIN, self.min.into(), true) }
///     new(min: usize) { Self { def: CheckDef::new(CheckKind::MinLength), min } }
///     fn min_length(min: usize);
/// }
/// ```
#[macro_export]
macro_rules! check {
    // ── Shared options: error override and abort ──────────────────────────
    (@options $name:ident) => {
        impl $name {
            /// Message override for issues raised by this check.
            #[must_use = "builder methods must be chained or built"]
            pub fn error(mut self, error: impl Into<$crate::foundation::ErrorMap>) -> Self {
                self.def.error = Some(error.into());
                self
            }

            /// Skip the remaining checks when this one fails.
            #[must_use = "builder methods must be chained or built"]
            pub fn abort(mut self) -> Self {
                self.def.abort = true;
                self
            }
        }
    };

    // ── Variant 1a: Unit check on any input implementing a trait ──────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for<$t:ident: $bound:path>;
        kind($kind:expr);
        rule($inp:ident) $rule:block
        issue($iinp:ident) $issue:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            def: $crate::checks::CheckDef,
        }

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self {
                    def: $crate::checks::CheckDef::new($kind),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        $crate::check!(@options $name);

        impl<$t: $bound> $crate::checks::Check<$t> for $name {
            fn def(&self) -> &$crate::checks::CheckDef {
                &self.def
            }

            #[allow(unused_variables)]
            fn apply(
                &self,
                payload: &mut $crate::foundation::Payload<$t>,
                _ctx: &$crate::foundation::ParseContext,
            ) {
                let issue = {
                    let $inp = payload.value();
                    if $rule {
                        None
                    } else {
                        let $iinp = $inp;
                        Some($issue)
                    }
                };
                if let Some(issue) = issue {
                    payload.add_issue(issue);
                }
            }
        }

        #[must_use]
        $vis fn $factory() -> $name {
            $name::new()
        }
    };

    // ── Variant 1b: Unit check on a concrete input ─────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        kind($kind:expr);
        rule($inp:ident) $rule:block
        issue($iinp:ident) $issue:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            def: $crate::checks::CheckDef,
        }

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self {
                    def: $crate::checks::CheckDef::new($kind),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        $crate::check!(@options $name);

        impl $crate::checks::Check<$input> for $name {
            fn def(&self) -> &$crate::checks::CheckDef {
                &self.def
            }

            #[allow(unused_variables)]
            fn apply(
                &self,
                payload: &mut $crate::foundation::Payload<$input>,
                _ctx: &$crate::foundation::ParseContext,
            ) {
                let issue = {
                    let $inp = payload.value();
                    if $rule {
                        None
                    } else {
                        let $iinp = $inp;
                        Some($issue)
                    }
                };
                if let Some(issue) = issue {
                    payload.add_issue(issue);
                }
            }
        }

        #[must_use]
        $vis fn $factory() -> $name {
            $name::new()
        }
    };

    // ── Variant 2: Fields on any input implementing a trait ───────────────
    //
    // Must precede variant 3: `for<...>` would otherwise be taken for a type.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for<$t:ident: $bound:path>;
        rule($self_:ident, $inp:ident) $rule:block
        issue($self2:ident, $iinp:ident) $issue:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
            def: $crate::checks::CheckDef,
        }

        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        $crate::check!(@options $name);

        impl<$t: $bound> $crate::checks::Check<$t> for $name {
            fn def(&self) -> &$crate::checks::CheckDef {
                &self.def
            }

            #[allow(unused_variables)]
            fn apply(
                &$self_,
                payload: &mut $crate::foundation::Payload<$t>,
                _ctx: &$crate::foundation::ParseContext,
            ) {
                let issue = {
                    let $inp = payload.value();
                    if $rule {
                        None
                    } else {
                        let $iinp = $inp;
                        Some($issue)
                    }
                };
                if let Some(issue) = issue {
                    payload.add_issue(issue);
                }
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3: Fields on a concrete input ─────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        issue($self2:ident, $iinp:ident) $issue:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
            def: $crate::checks::CheckDef,
        }

        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        $crate::check!(@options $name);

        impl $crate::checks::Check<$input> for $name {
            fn def(&self) -> &$crate::checks::CheckDef {
                &self.def
            }

            #[allow(unused_variables)]
            fn apply(
                &$self_,
                payload: &mut $crate::foundation::Payload<$input>,
                _ctx: &$crate::foundation::ParseContext,
            ) {
                let issue = {
                    let $inp = payload.value();
                    if $rule {
                        None
                    } else {
                        let $iinp = $inp;
                        Some($issue)
                    }
                };
                if let Some(issue) = issue {
                    payload.add_issue(issue);
                }
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

}

// ============================================================================
// CONTAINER MACROS
// ============================================================================

/// Builds an [`ObjectSchema`](crate::containers::ObjectSchema).
///
/// ```rust,ignore
/// let user = object! {
///     "name" => string().min(1),
///     "email" => string().email().optional(),
/// };
/// ```
#[macro_export]
macro_rules! object {
    ($($key:expr => $schema:expr),* $(,)?) => {
        $crate::containers::object(
            $crate::containers::Shape::new()
                $(.field($key, $schema))*
        )
    };
}

/// Builds a fixed-length [`ArraySchema`](crate::containers::ArraySchema).
///
/// ```rust,ignore
/// let point = tuple![float64(), float64()];
/// ```
#[macro_export]
macro_rules! tuple {
    ($($schema:expr),* $(,)?) => {
        $crate::containers::array(vec![$($crate::foundation::SchemaRef::new($schema)),*])
    };
}

/// Builds a [`UnionSchema`](crate::containers::UnionSchema) from schemas
/// of different types.
///
/// ```rust,ignore
/// let id = union![string().uuid(), int().positive()];
/// ```
#[macro_export]
macro_rules! union {
    ($($schema:expr),+ $(,)?) => {
        $crate::containers::union(vec![$($crate::foundation::SchemaRef::new($schema)),+])
    };
}
