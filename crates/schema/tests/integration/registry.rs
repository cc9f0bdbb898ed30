//! Metadata registry through `describe` and `meta`.

use nebula_schema::prelude::*;
use nebula_schema::registry;
use pretty_assertions::assert_eq;

#[test]
fn describe_registers_the_copy() {
    let base = string();
    let described = base.describe("user name");

    assert_eq!(described.description().as_deref(), Some("user name"));
    assert!(registry::global().has(described.internals().id()));
    assert!(!registry::global().has(base.internals().id()));
}

#[test]
fn meta_merges_over_previous_entry() {
    let port = int()
        .describe("listen port")
        .meta(Meta::new().title("Port").example(8080));

    let meta = port.metadata().unwrap();
    assert_eq!(meta.description.as_deref(), Some("listen port"));
    assert_eq!(meta.title.as_deref(), Some("Port"));
    assert_eq!(meta.examples, vec![serde_json::json!(8080)]);
}

#[test]
fn description_survives_later_modifiers() {
    let schema = string().describe("email address").optional();
    assert_eq!(schema.description().as_deref(), Some("email address"));
    assert!(schema.metadata().is_none());
}

#[test]
fn local_registry_is_independent() {
    let local = registry::Registry::new();
    let schema = boolean();
    local.add(schema.internals().id(), Meta::new().description("flag"));
    assert_eq!(local.len(), 1);
    assert!(schema.metadata().is_none());
}
