use crate::models::{EnvDefaults, NetworkCatalog, ServiceCatalog};
use serde::Deserialize;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Dataset shipped with the binary, served whenever the store has nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCatalog {
    pub services: ServiceCatalog,
    pub networks: NetworkCatalog,
    pub default_env_vars: EnvDefaults,
}

impl StaticCatalog {
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
