use super::defaults::StaticCatalog;
use super::error::CatalogError;
use super::metrics::record_store_fallback;
use super::store::DefinitionStore;
use crate::models::{EnvDefaults, NetworkCatalog, ServiceCatalog, ServiceDefinition};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

pub const SERVICES_KEY: &str = "services_config";
pub const NETWORKS_KEY: &str = "networks_config";
pub const ENV_VARS_KEY: &str = "default_env_vars";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Record {
    Services,
    Networks,
    EnvVars,
}

impl Record {
    fn key(&self) -> &'static str {
        match self {
            Record::Services => SERVICES_KEY,
            Record::Networks => NETWORKS_KEY,
            Record::EnvVars => ENV_VARS_KEY,
        }
    }
}

/// Read/write access to the three catalog records with a bundled fallback.
///
/// Nothing is cached: every call goes to the store. A record counts as
/// present when the stored raw value is non-blank, so an explicitly stored
/// `{}` is returned as an empty mapping rather than replaced by defaults.
#[derive(Clone)]
pub struct Catalog {
    store: Option<Arc<dyn DefinitionStore>>,
    defaults: Arc<StaticCatalog>,
    key_prefix: Option<String>,
}

impl Catalog {
    pub fn new(store: Option<Arc<dyn DefinitionStore>>, defaults: StaticCatalog) -> Self {
        Self {
            store,
            defaults: Arc::new(defaults),
            key_prefix: None,
        }
    }

    pub fn with_key_prefix(mut self, prefix: Option<String>) -> Self {
        self.key_prefix = prefix.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn defaults(&self) -> &StaticCatalog {
        &self.defaults
    }

    pub async fn get_services(&self) -> Result<ServiceCatalog, CatalogError> {
        self.load(Record::Services, &self.defaults.services).await
    }

    pub async fn get_networks(&self) -> Result<NetworkCatalog, CatalogError> {
        self.load(Record::Networks, &self.defaults.networks).await
    }

    pub async fn get_env_defaults(&self) -> Result<EnvDefaults, CatalogError> {
        self.load(Record::EnvVars, &self.defaults.default_env_vars)
            .await
    }

    /// Replaces the whole service catalog with a single write.
    pub async fn save_services(&self, services: &ServiceCatalog) -> Result<(), CatalogError> {
        self.write(Record::Services, services).await
    }

    /// Copies the bundled dataset into the store, returning the number of
    /// seeded services.
    pub async fn seed_defaults(&self) -> Result<usize, CatalogError> {
        self.write(Record::Services, &self.defaults.services).await?;
        self.write(Record::Networks, &self.defaults.networks).await?;
        self.write(Record::EnvVars, &self.defaults.default_env_vars)
            .await?;

        tracing::info!(
            services = self.defaults.services.len(),
            networks = self.defaults.networks.len(),
            "Seeded store from bundled catalog"
        );
        Ok(self.defaults.services.len())
    }

    pub async fn add_service(
        &self,
        id: &str,
        definition: ServiceDefinition,
    ) -> Result<(), CatalogError> {
        let mut services = self.get_services().await?;
        if services.contains_key(id) {
            return Err(CatalogError::Duplicate(id.to_string()));
        }
        services.insert(id.to_string(), definition);
        self.save_services(&services).await?;

        tracing::info!(service_id = %id, "Service added");
        Ok(())
    }

    pub async fn update_service(
        &self,
        id: &str,
        definition: ServiceDefinition,
    ) -> Result<(), CatalogError> {
        let mut services = self.get_services().await?;
        match services.get_mut(id) {
            Some(existing) => *existing = definition,
            None => return Err(CatalogError::service_not_found(id)),
        }
        self.save_services(&services).await?;

        tracing::info!(service_id = %id, "Service updated");
        Ok(())
    }

    pub async fn remove_service(&self, id: &str) -> Result<(), CatalogError> {
        let mut services = self.get_services().await?;
        if services.remove(id).is_none() {
            return Err(CatalogError::service_not_found(id));
        }
        self.save_services(&services).await?;

        tracing::info!(service_id = %id, "Service deleted");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), CatalogError> {
        match &self.store {
            Some(store) => store.health_check().await.map_err(CatalogError::Store),
            None => Ok(()),
        }
    }

    fn key(&self, record: Record) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, record.key()),
            None => record.key().to_string(),
        }
    }

    async fn load<T>(&self, record: Record, fallback: &T) -> Result<T, CatalogError>
    where
        T: DeserializeOwned + Clone,
    {
        let Some(store) = &self.store else {
            return Ok(fallback.clone());
        };

        let key = self.key(record);
        let raw = store.get(&key).await.map_err(|e| {
            tracing::error!(key = %key, error = %e, "Store read failed");
            CatalogError::Store(e)
        })?;

        match raw.filter(|value| !value.trim().is_empty()) {
            Some(value) => serde_json::from_str(&value).map_err(|source| {
                tracing::error!(key = %key, error = %source, "Stored record is malformed");
                CatalogError::StoreCorrupt {
                    record: key,
                    source,
                }
            }),
            None => {
                tracing::debug!(key = %key, "Record absent, serving bundled defaults");
                record_store_fallback(record.key());
                Ok(fallback.clone())
            }
        }
    }

    async fn write<T: Serialize>(&self, record: Record, value: &T) -> Result<(), CatalogError> {
        let store = self.store.as_ref().ok_or(CatalogError::StoreUnavailable)?;
        let key = self.key(record);
        let raw = serde_json::to_string(value)
            .map_err(|e| CatalogError::Store(anyhow::anyhow!("Failed to encode {}: {}", key, e)))?;

        store.put(&key, &raw).await.map_err(|e| {
            tracing::error!(key = %key, error = %e, "Store write failed");
            CatalogError::Store(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::services::store::MemoryStore;

    fn defaults() -> StaticCatalog {
        StaticCatalog::from_json(
            r#"{
                "services": {
                    "alpha": {"name": "Alpha", "desc": "a", "category": "media", "config": "image: alpha", "requiresNetwork": "shared"}
                },
                "networks": {"shared": {"driver": "bridge"}},
                "defaultEnvVars": {"TZ": "UTC"}
            }"#,
        )
        .unwrap()
    }

    fn definition(name: &str) -> ServiceDefinition {
        ServiceDefinition {
            name: name.to_string(),
            desc: format!("{} service", name),
            category: Category::Tool,
            config: format!("image: {}", name),
            download_url: None,
            requires_network: None,
            extra: Default::default(),
        }
    }

    fn with_memory_store() -> (Catalog, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let catalog = Catalog::new(Some(store.clone()), defaults());
        (catalog, store)
    }

    #[tokio::test]
    async fn storeless_catalog_serves_defaults() {
        let catalog = Catalog::new(None, defaults());
        let services = catalog.get_services().await.unwrap();
        assert_eq!(services.keys().collect::<Vec<_>>(), vec!["alpha"]);
        assert_eq!(catalog.get_env_defaults().await.unwrap()["TZ"], "UTC");
        assert!(catalog.get_networks().await.unwrap().contains_key("shared"));
    }

    #[tokio::test]
    async fn empty_store_falls_back_to_defaults() {
        let (catalog, store) = with_memory_store();
        store.put(SERVICES_KEY, "   ").await.unwrap();
        let services = catalog.get_services().await.unwrap();
        assert!(services.contains_key("alpha"));
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let (catalog, _) = with_memory_store();
        let mut services = ServiceCatalog::new();
        services.insert("beta".into(), definition("beta"));

        catalog.save_services(&services).await.unwrap();
        assert_eq!(catalog.get_services().await.unwrap(), services);
    }

    #[tokio::test]
    async fn stored_empty_catalog_is_honoured() {
        let (catalog, _) = with_memory_store();
        catalog.save_services(&ServiceCatalog::new()).await.unwrap();
        assert!(catalog.get_services().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_without_store_is_unavailable() {
        let catalog = Catalog::new(None, defaults());
        let err = catalog
            .save_services(&ServiceCatalog::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::StoreUnavailable));
        assert!(matches!(
            catalog.seed_defaults().await.unwrap_err(),
            CatalogError::StoreUnavailable
        ));
    }

    #[tokio::test]
    async fn malformed_record_is_corrupt() {
        let (catalog, store) = with_memory_store();
        store.put(NETWORKS_KEY, "{not json").await.unwrap();
        let err = catalog.get_networks().await.unwrap_err();
        assert!(matches!(err, CatalogError::StoreCorrupt { .. }));
    }

    #[tokio::test]
    async fn seeding_writes_all_three_records() {
        let (catalog, store) = with_memory_store();
        assert_eq!(catalog.seed_defaults().await.unwrap(), 1);
        assert!(store.get(SERVICES_KEY).await.unwrap().is_some());
        assert!(store.get(NETWORKS_KEY).await.unwrap().is_some());
        assert!(store.get(ENV_VARS_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn key_prefix_namespaces_records() {
        let store = Arc::new(MemoryStore::new());
        let catalog = Catalog::new(Some(store.clone()), defaults())
            .with_key_prefix(Some("naspt".to_string()));
        catalog.save_services(&ServiceCatalog::new()).await.unwrap();

        assert!(store.get("naspt:services_config").await.unwrap().is_some());
        assert!(store.get(SERVICES_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_add_leaves_catalog_unchanged() {
        let (catalog, _) = with_memory_store();
        catalog.add_service("beta", definition("beta")).await.unwrap();
        let before = catalog.get_services().await.unwrap();

        let err = catalog
            .add_service("beta", definition("other"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(ref id) if id == "beta"));
        assert_eq!(catalog.get_services().await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_and_remove_require_existing_id() {
        let (catalog, _) = with_memory_store();
        assert!(matches!(
            catalog.update_service("ghost", definition("ghost")).await,
            Err(CatalogError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.remove_service("ghost").await,
            Err(CatalogError::NotFound { .. })
        ));

        catalog
            .update_service("alpha", definition("renamed"))
            .await
            .unwrap();
        assert_eq!(catalog.get_services().await.unwrap()["alpha"].name, "renamed");

        catalog.remove_service("alpha").await.unwrap();
        assert!(!catalog.get_services().await.unwrap().contains_key("alpha"));
    }
}
