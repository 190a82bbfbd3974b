//! Bundle assembly: turns a list of requested service ids into a
//! self-consistent configuration document.

use super::error::CatalogError;
use crate::models::{
    ConfigBundle, EnvDefaults, NetworkCatalog, ServiceCatalog, BUNDLE_VERSION,
};
use std::collections::BTreeSet;

/// Splits a comma-separated `ids` parameter, trimming entries and dropping
/// empty ones. Duplicates are kept.
pub fn parse_ids(raw: &str) -> Vec<String> {
    normalize_ids(raw.split(','))
}

pub fn normalize_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

/// Builds the bundle for `requested_ids` from one catalog snapshot.
///
/// Unknown ids are skipped and networks referenced but missing from
/// `networks` are omitted. The description counts every normalised id,
/// duplicates included. Default environment variables are always returned
/// in full.
pub fn assemble<S: AsRef<str>>(
    requested_ids: &[S],
    services: &ServiceCatalog,
    networks: &NetworkCatalog,
    env_defaults: &EnvDefaults,
) -> Result<ConfigBundle, CatalogError> {
    let requested = normalize_ids(requested_ids);
    if requested.is_empty() {
        return Err(CatalogError::InvalidRequest(
            "The ids parameter must not be empty".to_string(),
        ));
    }

    let mut selected = ServiceCatalog::new();
    let mut required_networks = BTreeSet::new();

    for id in &requested {
        let Some(definition) = services.get(id) else {
            continue;
        };
        if let Some(network) = definition.network() {
            required_networks.insert(network.to_string());
        }
        selected.insert(id.clone(), definition.clone());
    }

    if selected.is_empty() {
        return Err(CatalogError::NotFound {
            message: "No matching services found".to_string(),
            available: Some(services.keys().cloned().collect()),
        });
    }

    let mut selected_networks = NetworkCatalog::new();
    for name in required_networks {
        match networks.get(&name) {
            Some(definition) => {
                selected_networks.insert(name, definition.clone());
            }
            None => {
                tracing::warn!(network = %name, "Selected services reference an undefined network");
            }
        }
    }

    Ok(ConfigBundle {
        version: BUNDLE_VERSION.to_string(),
        description: format!(
            "Filtered service configuration ({} services)",
            requested.len()
        ),
        services: selected,
        networks: selected_networks,
        default_env_vars: env_defaults.clone(),
    })
}
