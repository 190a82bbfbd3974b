use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    /// A lookup matched nothing; carries the identifiers that do exist.
    #[error("Not found: {0}")]
    NotFoundAmong(anyhow::Error, Vec<String>),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store corrupt: {0}")]
    StoreCorrupt(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NotFoundAmong(..) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::StoreUnavailable(_)
            | AppError::StoreCorrupt(_)
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_services: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let (message, available_services) = match self {
            AppError::ValidationError(err) => {
                (format!("Missing required fields: {}", err), None)
            }
            AppError::BadRequest(err) | AppError::NotFound(err) => (err.to_string(), None),
            AppError::NotFoundAmong(err, available) => (err.to_string(), Some(available)),
            AppError::MethodNotAllowed(method) => {
                (format!("Method {} is not supported", method), None)
            }
            AppError::StoreUnavailable(msg) => (format!("Store unavailable: {}", msg), None),
            AppError::StoreCorrupt(err) => (format!("Stored data is malformed: {:#}", err), None),
            AppError::InternalError(err) => (format!("Internal server error: {:#}", err), None),
            AppError::ServiceUnavailable => ("Service unavailable".to_string(), None),
            AppError::ConfigError(err) => (format!("Configuration error: {}", err), None),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                message,
                available_services,
            }),
        )
            .into_response()
    }
}
