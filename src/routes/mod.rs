pub mod api_routes;
pub mod static_routes;

use std::path::Path;

use axum::routing::{any, get};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::HostConfig;
use crate::errors::HostError;
use crate::routes::api_routes::proxy_handler;
use crate::routes::static_routes::health_handler;

/// Shared handler state: the backend client and where it lives.
#[derive(Clone)]
pub struct HostState {
    pub client: reqwest::Client,
    pub backend_url: String,
}

impl HostState {
    pub fn new(config: &HostConfig) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .timeout(config.proxy_timeout)
            .build()
            .map_err(HostError::ClientBuild)?;
        Ok(Self {
            client,
            backend_url: config.backend_url.clone(),
        })
    }
}

/// Builds the host router. Anything that is neither an API call nor a file in
/// `static_dir` is answered with `index.html` so client-side routes deep-link.
pub fn router(state: HostState, static_dir: &Path) -> Router {
    let client_app =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/{*path}", any(proxy_handler))
        .fallback_service(client_app)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
