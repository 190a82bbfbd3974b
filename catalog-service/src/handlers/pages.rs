use crate::dtos::ServiceSummary;
use crate::models::{Category, ServiceCatalog};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use service_core::error::AppError;

const NO_CACHE: [(header::HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

pub struct CategoryGroup {
    pub key: &'static str,
    pub title: &'static str,
    pub services: Vec<ServiceSummary>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub groups: Vec<CategoryGroup>,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub services: Vec<ServiceSummary>,
    pub categories: Vec<&'static str>,
    pub store_configured: bool,
}

/// Groups services by category in display order, skipping empty groups.
pub fn group_by_category(services: &ServiceCatalog) -> Vec<CategoryGroup> {
    Category::ALL
        .iter()
        .map(|category| CategoryGroup {
            key: category.as_str(),
            title: category.title(),
            services: services
                .iter()
                .filter(|(_, service)| service.category == *category)
                .map(|(id, service)| ServiceSummary::new(id, service))
                .collect(),
        })
        .filter(|group| !group.services.is_empty())
        .collect()
}

/// Selection page; also served for every unmatched path.
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let services = state.catalog.get_services().await?;
    let template = IndexTemplate {
        groups: group_by_category(&services),
    };

    Ok((NO_CACHE, template).into_response())
}

pub async fn admin(State(state): State<AppState>) -> Result<Response, AppError> {
    let services = state.catalog.get_services().await?;
    let template = AdminTemplate {
        services: services
            .iter()
            .map(|(id, service)| ServiceSummary::new(id, service))
            .collect(),
        categories: Category::ALL.iter().map(Category::as_str).collect(),
        store_configured: state.catalog.has_store(),
    };

    Ok((NO_CACHE, template).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StaticCatalog;

    #[test]
    fn groups_follow_category_order_and_skip_empty() {
        let catalog = StaticCatalog::bundled().unwrap();
        let groups = group_by_category(&catalog.services);
        let keys: Vec<_> = groups.iter().map(|g| g.key).collect();

        let mut expected: Vec<_> = Category::ALL.iter().map(Category::as_str).collect();
        expected.retain(|k| keys.contains(k));
        assert_eq!(keys, expected);
        assert!(groups.iter().all(|g| !g.services.is_empty()));
    }

    #[test]
    fn index_template_renders_service_ids() {
        let catalog = StaticCatalog::bundled().unwrap();
        let html = IndexTemplate {
            groups: group_by_category(&catalog.services),
        }
        .render()
        .unwrap();
        assert!(html.contains("value=\"moviepilot\""));
    }
}
