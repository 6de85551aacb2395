//! Process configuration, read once at startup.

use std::path::PathBuf;

use orderdesk_infra::WorkflowConfig;

pub const BIND_ADDR_ENV: &str = "ORDERDESK_BIND_ADDR";
pub const SEED_FILE_ENV: &str = "ORDERDESK_SEED_FILE";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// JSON fixture loaded into the in-memory repositories.
    pub seed_file: Option<PathBuf>,
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup(BIND_ADDR_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let seed_file = lookup(SEED_FILE_ENV)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            bind_addr,
            seed_file,
            workflow: WorkflowConfig::from_lookup(&lookup),
        }
    }
}
