use crate::models::{Category, ServiceDefinition};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct BundleParams {
    pub ids: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// Body of `POST /api/service` and `PUT /api/service`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "desc is required"))]
    pub desc: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "composeConfig is required"))]
    pub compose_config: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,

    pub download_url: Option<String>,
    pub requires_network: Option<String>,
}

impl ServicePayload {
    pub fn service_id(&self) -> &str {
        self.id.trim()
    }

    pub fn into_definition(self) -> ServiceDefinition {
        ServiceDefinition {
            name: self.name.trim().to_string(),
            desc: self.desc.trim().to_string(),
            category: Category::from(self.category),
            config: self.compose_config.trim().to_string(),
            download_url: non_blank(self.download_url),
            requires_network: non_blank(self.requires_network),
            extra: Default::default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub category: Category,
    pub download_url: String,
    pub requires_network: String,
}

impl ServiceSummary {
    pub fn new(id: &str, service: &ServiceDefinition) -> Self {
        Self {
            id: id.to_string(),
            name: service.name.clone(),
            desc: service.desc.clone(),
            category: service.category,
            download_url: service.download_url.clone().unwrap_or_default(),
            requires_network: service.network().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    pub service_id: String,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_trimmed_into_definition() {
        let payload: ServicePayload = serde_json::from_value(serde_json::json!({
            "id": " svc ",
            "name": " Name ",
            "desc": "Desc",
            "composeConfig": "\nimage: svc\n",
            "category": "download",
            "downloadUrl": "   ",
            "requiresNetwork": " naspt "
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.service_id(), "svc");

        let def = payload.into_definition();
        assert_eq!(def.name, "Name");
        assert_eq!(def.config, "image: svc");
        assert_eq!(def.category, Category::Download);
        assert_eq!(def.download_url, None);
        assert_eq!(def.requires_network.as_deref(), Some("naspt"));
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let payload: ServicePayload =
            serde_json::from_value(serde_json::json!({ "id": "svc", "name": "x" })).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("desc"));
        assert!(fields.contains_key("compose_config"));
        assert!(fields.contains_key("category"));
        assert!(!fields.contains_key("id"));
    }

    #[test]
    fn summary_uses_empty_strings_for_absent_optionals() {
        let def = ServiceDefinition {
            name: "n".into(),
            desc: "d".into(),
            category: Category::Other,
            config: "c".into(),
            download_url: None,
            requires_network: None,
            extra: Default::default(),
        };
        let value = serde_json::to_value(ServiceSummary::new("x", &def)).unwrap();
        assert_eq!(value["downloadUrl"], "");
        assert_eq!(value["requiresNetwork"], "");
        assert_eq!(value["category"], "other");
    }
}
