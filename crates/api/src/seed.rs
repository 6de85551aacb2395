//! Startup fixture for the in-memory repositories.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use orderdesk_parties::Customer;
use orderdesk_products::CatalogEntry;

/// `{ "customers": [...], "products": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub products: Vec<CatalogEntry>,
}

impl SeedData {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid seed file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
