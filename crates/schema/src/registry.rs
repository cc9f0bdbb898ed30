//! Schema metadata registry
//!
//! Maps [`SchemaId`]s to [`Meta`]. Every modifier mints a fresh id, so a
//! derived schema starts without metadata unless `describe`/`meta` is called
//! on it. The global registry lives behind a `parking_lot::RwLock`.

use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;

use crate::foundation::SchemaId;

/// Descriptive metadata attached to a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn example(mut self, example: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(example) {
            self.examples.push(value);
        }
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Fields of `other` that are set override those of `self`.
    pub fn merge(&mut self, other: Meta) {
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.title.is_some() {
            self.title = other.title;
        }
        if !other.examples.is_empty() {
            self.examples = other.examples;
        }
        self.extra.extend(other.extra);
    }
}

/// Thread-safe `SchemaId -> Meta` map.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<HashMap<SchemaId, Meta>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `meta` for `id`, replacing any previous entry.
    pub fn add(&self, id: SchemaId, meta: Meta) {
        tracing::trace!(schema = %id, "registering schema metadata");
        self.entries.write().insert(id, meta);
    }

    pub fn get(&self, id: SchemaId) -> Option<Meta> {
        self.entries.read().get(&id).cloned()
    }

    pub fn has(&self, id: SchemaId) -> bool {
        self.entries.read().contains_key(&id)
    }

    pub fn remove(&self, id: SchemaId) -> Option<Meta> {
        self.entries.write().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Stores metadata for `to`: whatever `from` had, merged with `update`.
    pub(crate) fn derive(&self, from: SchemaId, to: SchemaId, update: Meta) {
        let mut entries = self.entries.write();
        let mut meta = entries.get(&from).cloned().unwrap_or_default();
        meta.merge(update);
        tracing::trace!(from = %from, to = %to, "deriving schema metadata");
        entries.insert(to, meta);
    }
}

static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// The process-wide registry used by `describe` and `meta`.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}
