use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors raised by the portal host while starting up or relaying API calls.
#[derive(Debug, Error)]
pub enum HostError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Invalid value '{value}' for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("Failed to build the backend HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    // ── Proxy errors ─────────────────────────────────────────────────────────
    #[error("Request body could not be read: {message}")]
    RequestBody { message: String },

    #[error("Backend unreachable at {url}")]
    BackendUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend at {url} did not answer in time")]
    BackendTimeout { url: String },
}

impl HostError {
    pub fn from_upstream(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            HostError::BackendTimeout { url: url.to_string() }
        } else {
            HostError::BackendUnreachable { url: url.to_string(), source }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HostError::RequestBody { .. } => StatusCode::BAD_REQUEST,
            HostError::BackendTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            HostError::BackendUnreachable { .. } => StatusCode::BAD_GATEWAY,
            HostError::InvalidConfig { .. } | HostError::ClientBuild(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!("Proxy request failed ({status}): {self}");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
