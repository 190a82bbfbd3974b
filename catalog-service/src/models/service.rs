use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Service catalog keyed by service id.
pub type ServiceCatalog = BTreeMap<String, ServiceDefinition>;

/// Network catalog keyed by network name.
pub type NetworkCatalog = BTreeMap<String, NetworkDefinition>;

/// Default environment variables shared by every bundle.
pub type EnvDefaults = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Category {
    Media,
    Download,
    Network,
    Tool,
    #[default]
    Other,
}

impl Category {
    /// Display order used by the selection page.
    pub const ALL: [Category; 5] = [
        Category::Media,
        Category::Download,
        Category::Network,
        Category::Tool,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Media => "media",
            Category::Download => "download",
            Category::Network => "network",
            Category::Tool => "tool",
            Category::Other => "other",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Media => "Media services",
            Category::Download => "Download tools",
            Category::Network => "Network tools",
            Category::Tool => "Utilities",
            Category::Other => "Other services",
        }
    }
}

// Unknown or null tags land in `Other` rather than failing the whole catalog.
impl From<Option<String>> for Category {
    fn from(value: Option<String>) -> Self {
        value.map(Category::from).unwrap_or_default()
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "media" => Category::Media,
            "download" => Category::Download,
            "network" => Category::Network,
            "tool" => Category::Tool,
            _ => Category::Other,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub category: Category,
    /// Opaque container-orchestration snippet.
    pub config: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_network: Option<String>,
    /// Fields this service does not interpret, kept so stored records
    /// survive a rewrite of the catalog.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ServiceDefinition {
    /// Network name this service depends on, ignoring blank values.
    pub fn network(&self) -> Option<&str> {
        self.requires_network
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Opaque network configuration, stored and returned verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NetworkDefinition(pub serde_json::Value);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_falls_back_to_other() {
        let def: ServiceDefinition = serde_json::from_value(serde_json::json!({
            "name": "x",
            "desc": "y",
            "category": "games",
            "config": "image: x"
        }))
        .unwrap();
        assert_eq!(def.category, Category::Other);
        assert_eq!(def.download_url, None);
    }

    #[test]
    fn category_serializes_lowercase() {
        let value = serde_json::to_value(Category::Download).unwrap();
        assert_eq!(value, "download");
    }

    #[test]
    fn blank_network_is_treated_as_absent() {
        let def = ServiceDefinition {
            name: "x".into(),
            desc: "y".into(),
            category: Category::Tool,
            config: "image: x".into(),
            download_url: None,
            requires_network: Some("  ".into()),
            extra: Default::default(),
        };
        assert_eq!(def.network(), None);
    }

    #[test]
    fn empty_download_url_survives_stored_records() {
        let def: ServiceDefinition = serde_json::from_str(
            r#"{"name":"x","desc":"y","config":"c","downloadUrl":"","requiresNetwork":"naspt"}"#,
        )
        .unwrap();
        assert_eq!(def.download_url.as_deref(), Some(""));
        assert_eq!(def.network(), Some("naspt"));
    }

    #[test]
    fn null_category_is_other() {
        let def: ServiceDefinition = serde_json::from_str(
            r#"{"name":"x","desc":"y","category":null,"config":"c"}"#,
        )
        .unwrap();
        assert_eq!(def.category, Category::Other);
    }

    #[test]
    fn unmodelled_fields_are_kept_verbatim() {
        let raw = serde_json::json!({
            "name": "x",
            "desc": "y",
            "category": "tool",
            "config": "c",
            "icon": "x.png",
            "ports": [8080, 8443]
        });
        let def: ServiceDefinition = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(def.extra["icon"], "x.png");
        assert!(!def.extra.contains_key("name"));
        assert_eq!(serde_json::to_value(&def).unwrap(), raw);
    }
}
