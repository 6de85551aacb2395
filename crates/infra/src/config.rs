//! Workflow configuration, read from the environment.

use tracing::warn;

use crate::order_workflow::CompensationPolicy;

/// Env var selecting the [`CompensationPolicy`] (`none` | `delete-order`).
pub const COMPENSATION_ENV: &str = "ORDERDESK_COMPENSATION";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub compensation: CompensationPolicy,
}

impl WorkflowConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Bad values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let compensation = match lookup(COMPENSATION_ENV) {
            None => CompensationPolicy::default(),
            Some(raw) => raw.parse::<CompensationPolicy>().unwrap_or_else(|e| {
                warn!(%raw, error = %e, "invalid {COMPENSATION_ENV}; using default");
                CompensationPolicy::default()
            }),
        };

        Self { compensation }
    }
}
