use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, ProxyError>;

/// All relay failures surface as one error kind. Upstream 4xx/5xx responses
/// never pass through here; their status and body are relayed verbatim.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);

        let body = json!({
            "error": {
                "message": self.to_string(),
                "type": "proxy_error",
            }
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
