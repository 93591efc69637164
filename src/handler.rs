use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::State,
    http::{Response, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::client::NimClient;
use crate::config::ProxyConfig;
use crate::error::Result;
use crate::models::ChatRequest;
use crate::streaming::LineRelay;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "NVIDIA NIM Proxy";

pub struct AppState {
    pub client: NimClient,
    pub config: ProxyConfig,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let client = NimClient::new(config.nim.clone())?;
        Ok(Self { client, config })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .route("/v1/models", get(list_models))
        .route("/health", get(health))
        .route("/", get(home))
        .with_state(state)
}

/// POST /v1/chat/completions
///
/// The body is taken raw rather than through the `Json` extractor so that a
/// parse failure lands in the proxy_error envelope instead of an axum
/// rejection.
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response<Body>> {
    let chat_req: ChatRequest = serde_json::from_slice(&body)?;

    info!(
        "Chat completion request for model: {} (stream: {})",
        chat_req.model, chat_req.stream
    );

    let upstream = state.client.chat_completions(&chat_req).await?;

    if chat_req.stream {
        // Framing is committed from here on; a transport error mid-stream
        // surfaces to the caller as a truncated stream.
        let relay = LineRelay::from_response(upstream);

        let response = Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/event-stream")
            .header("Cache-Control", "no-cache")
            .header("Connection", "keep-alive")
            .body(Body::from_stream(relay))
            .unwrap();

        Ok(response)
    } else {
        let status = upstream.status();
        let body = upstream.bytes().await?;

        let response = Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap();

        Ok(response)
    }
}

/// GET /v1/models: upstream's model list, status and body verbatim.
pub async fn list_models(State(state): State<Arc<AppState>>) -> Result<Response<Body>> {
    let upstream = state.client.list_models().await?;

    let status = upstream.status();
    let body = upstream.bytes().await?;

    let response = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();

    Ok(response)
}

/// GET /health: always healthy, no upstream call.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}

/// GET /: usage instructions.
pub async fn home() -> impl IntoResponse {
    Json(json!({
        "message": "NVIDIA NIM to OpenAI API Proxy",
        "endpoints": {
            "/v1/chat/completions": "POST - Chat completions",
            "/v1/models": "GET - List available models",
            "/health": "GET - Health check",
        },
        "usage": "Set this URL as your OpenAI API base in Janitor AI",
    }))
}
