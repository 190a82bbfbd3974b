use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Service id \"{0}\" already exists")]
    Duplicate(String),

    #[error("{message}")]
    NotFound {
        message: String,
        available: Option<Vec<String>>,
    },

    #[error("No definition store is configured")]
    StoreUnavailable,

    #[error("Record {record} is malformed")]
    StoreCorrupt {
        record: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store operation failed: {0}")]
    Store(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn service_not_found(id: &str) -> Self {
        CatalogError::NotFound {
            message: format!("Service \"{}\" does not exist", id),
            available: None,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidRequest(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            CatalogError::Duplicate(_) => AppError::BadRequest(anyhow::anyhow!(err.to_string())),
            CatalogError::NotFound {
                message,
                available: Some(available),
            } => AppError::NotFoundAmong(anyhow::anyhow!(message), available),
            CatalogError::NotFound { message, .. } => AppError::NotFound(anyhow::anyhow!(message)),
            CatalogError::StoreUnavailable => AppError::StoreUnavailable(err.to_string()),
            CatalogError::StoreCorrupt { .. } => AppError::StoreCorrupt(anyhow::Error::new(err)),
            CatalogError::Store(e) => AppError::InternalError(e),
        }
    }
}
