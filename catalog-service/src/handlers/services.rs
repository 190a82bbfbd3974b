use crate::dtos::{DeleteParams, MutationResponse, SeedResponse, ServicePayload, ServiceSummary};
use crate::utils::ValidatedJson;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::Method,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

/// `GET /api/all-services`
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceSummary>>, AppError> {
    let services = state.catalog.get_services().await?;

    Ok(Json(
        services
            .iter()
            .map(|(id, service)| ServiceSummary::new(id, service))
            .collect(),
    ))
}

/// `POST /api/service`
pub async fn add_service(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ServicePayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let id = payload.service_id().to_string();
    if id.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Please fill in all required fields"
        )));
    }
    // Bundles take comma-separated ids, so such an id could never be selected.
    if id.contains(',') {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Service id must not contain ','"
        )));
    }

    state
        .catalog
        .add_service(&id, payload.into_definition())
        .await?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Service added".to_string(),
        service_id: id,
    }))
}

/// `PUT /api/service`
pub async fn update_service(
    State(state): State<AppState>,
    body: Result<Json<ServicePayload>, JsonRejection>,
) -> Result<Json<MutationResponse>, AppError> {
    let Json(payload) =
        body.map_err(|e| AppError::BadRequest(anyhow::anyhow!("Json parse error: {}", e)))?;

    let id = payload.service_id().to_string();
    if id.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Missing service id")));
    }
    payload.validate()?;

    state
        .catalog
        .update_service(&id, payload.into_definition())
        .await?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Service updated".to_string(),
        service_id: id,
    }))
}

/// `DELETE /api/service?id=x`
pub async fn delete_service(
    State(state): State<AppState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<MutationResponse>, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid query string: {}", e)))?;
    let id = params
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing service id")))?;

    state.catalog.remove_service(&id).await?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Service deleted".to_string(),
        service_id: id,
    }))
}

/// `GET /api/init-services`
pub async fn init_services(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let count = state.catalog.seed_defaults().await?;

    Ok(Json(SeedResponse {
        success: true,
        message: "Bundled service data written to the store".to_string(),
        count,
    }))
}

pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}
