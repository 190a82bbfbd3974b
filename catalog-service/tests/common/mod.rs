#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use catalog_service::services::{Catalog, DefinitionStore, MemoryStore, StaticCatalog};
use catalog_service::{build_router, AppState};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::util::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Response is not JSON ({}): {}", e, self.body))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Option<Arc<MemoryStore>>,
}

impl TestApp {
    /// App backed by an empty in-memory store, so reads fall back to the
    /// bundled catalog until something is written.
    pub fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_store(store)
    }

    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let dyn_store: Arc<dyn DefinitionStore> = store.clone();
        let catalog = Catalog::new(Some(dyn_store), bundled());
        Self {
            router: build_router(AppState::new(catalog)),
            store: Some(store),
        }
    }

    /// App with no store configured at all.
    pub fn storeless() -> Self {
        Self {
            router: build_router(AppState::new(Catalog::new(None, bundled()))),
            store: None,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

pub fn bundled() -> StaticCatalog {
    StaticCatalog::bundled().expect("bundled catalog must parse")
}

pub fn service_body(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("{} name", id),
        "desc": format!("{} description", id),
        "composeConfig": format!("image: example/{}:latest", id),
        "category": "tool",
        "requiresNetwork": "naspt"
    })
}
