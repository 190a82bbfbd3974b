use super::{EnvDefaults, NetworkCatalog, ServiceCatalog};
use serde::Serialize;

pub const BUNDLE_VERSION: &str = "1.0";

/// Filtered configuration document returned by `GET /api/services`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigBundle {
    pub version: String,
    pub description: String,
    pub services: ServiceCatalog,
    pub networks: NetworkCatalog,
    pub default_env_vars: EnvDefaults,
}
