//! Global parse configuration
//!
//! One process-wide [`ParseConfig`] lives behind an `ArcSwap`. Readers take a
//! cheap snapshot; [`configure`] publishes a modified copy. Every
//! [`ParseContext`](crate::foundation::ParseContext) snapshots the config at
//! creation, so a parse in flight never observes a half-applied change.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::foundation::ErrorMap;

/// Settings applied to every parse unless a context overrides them.
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    /// Consulted after per-schema and per-context maps.
    pub error: Option<ErrorMap>,
    /// Keep the offending input on finalized issues.
    pub report_input: bool,
}

static GLOBAL_CONFIG: LazyLock<ArcSwap<ParseConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(ParseConfig::default()));

/// Current global configuration.
pub fn config() -> Arc<ParseConfig> {
    GLOBAL_CONFIG.load_full()
}

/// Applies `update` to a copy of the global configuration and publishes it.
///
/// `update` may run more than once if another thread publishes concurrently.
pub fn configure(update: impl Fn(&mut ParseConfig)) {
    GLOBAL_CONFIG.rcu(|current| {
        let mut next = ParseConfig::clone(current);
        update(&mut next);
        next
    });
    tracing::debug!(report_input = config().report_input, "parse config updated");
}

/// Restores the default configuration.
pub fn reset_config() {
    GLOBAL_CONFIG.store(Arc::new(ParseConfig::default()));
    tracing::debug!("parse config reset");
}
