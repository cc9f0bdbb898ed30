//! Integration tests for nebula-schema, one module per area.

mod containers;
mod errors;
mod modifiers;
mod primitives;
mod registry;
mod scenarios;
