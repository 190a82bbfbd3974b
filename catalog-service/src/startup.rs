use crate::config::CatalogConfig;
use crate::handlers;
use crate::services::{Catalog, DefinitionStore, RedisStore, StaticCatalog};
use crate::AppState;
use axum::{
    middleware::from_fn,
    routing::{any, get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_middleware,
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::method_not_allowed),
        )
        .route(
            "/ready",
            get(handlers::readiness_check).fallback(handlers::method_not_allowed),
        )
        .route(
            "/metrics",
            get(handlers::metrics_endpoint).fallback(handlers::method_not_allowed),
        )
        .route("/api/services", any(handlers::get_bundle))
        .route("/api/all-services", any(handlers::list_services))
        .route("/api/init-services", any(handlers::init_services))
        .route(
            "/api/service",
            post(handlers::add_service)
                .put(handlers::update_service)
                .delete(handlers::delete_service)
                .fallback(handlers::method_not_allowed),
        )
        .route("/admin", any(handlers::admin))
        .route("/", any(handlers::index))
        .fallback(handlers::index)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(cors_middleware))
        .with_state(state)
}

/// Wires the catalog accessor to Redis when configured, or to the bundled
/// dataset alone otherwise.
pub async fn build_catalog(config: &CatalogConfig) -> Result<Catalog, AppError> {
    let defaults = StaticCatalog::bundled().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("Bundled catalog is malformed: {}", e))
    })?;

    let Some(redis) = &config.redis else {
        tracing::warn!("REDIS_URL not set; serving bundled catalog, writes are disabled");
        return Ok(Catalog::new(None, defaults));
    };

    let store: Arc<dyn DefinitionStore> =
        Arc::new(RedisStore::new(redis).await.map_err(AppError::InternalError)?);

    Ok(Catalog::new(Some(store), defaults).with_key_prefix(redis.key_prefix.clone()))
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: CatalogConfig) -> Result<Self, AppError> {
        let catalog = build_catalog(&config).await?;
        Self::build_with_catalog(config, catalog).await
    }

    pub async fn build_with_catalog(
        config: CatalogConfig,
        catalog: Catalog,
    ) -> Result<Self, AppError> {
        let app = build_router(AppState::new(catalog));

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        Ok(Self {
            port,
            server: Box::new(server),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
