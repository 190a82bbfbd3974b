use crate::dtos::BundleParams;
use crate::services::{assemble, metrics::record_bundle_assembled, parse_ids, CatalogError};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use service_core::error::AppError;

/// `GET /api/services?ids=a,b,c`, answered for any method.
pub async fn get_bundle(
    State(state): State<AppState>,
    params: Result<Query<BundleParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid query string: {}", e)))?;
    let raw = params.ids.filter(|ids| !ids.is_empty()).ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!(
            "Missing ids parameter. Example: /api/services?ids=moviepilot,qbittorrent"
        ))
    })?;

    let requested = parse_ids(&raw);
    if requested.is_empty() {
        return Err(CatalogError::InvalidRequest(
            "The ids parameter must not be empty".to_string(),
        )
        .into());
    }

    let (services, networks, env_defaults) = tokio::try_join!(
        state.catalog.get_services(),
        state.catalog.get_networks(),
        state.catalog.get_env_defaults(),
    )?;

    let bundle = assemble(&requested, &services, &networks, &env_defaults)?;

    tracing::info!(
        requested = requested.len(),
        services = bundle.services.len(),
        networks = bundle.networks.len(),
        "Assembled configuration bundle"
    );
    record_bundle_assembled(bundle.services.len());

    let body = serde_json::to_string_pretty(&bundle)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to encode bundle: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
