use reqwest::Client;
use std::time::Duration;
use tracing::info;

use crate::config::NimConfig;
use crate::error::{ProxyError, Result};
use crate::models::ChatRequest;

/// HTTP client for the NIM API.
///
/// Transport failures map to [`ProxyError::Upstream`]; non-2xx responses are
/// returned as-is so the handlers can relay status and body verbatim.
pub struct NimClient {
    client: Client,
    config: NimConfig,
}

impl NimClient {
    pub fn new(config: NimConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| {
                ProxyError::InternalError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// POST the payload to `{base}/chat/completions`.
    pub async fn chat_completions(&self, request: &ChatRequest) -> Result<reqwest::Response> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = serde_json::to_vec(request)?;

        info!("NIM: sending {} bytes to {}", body.len(), url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.config.api_key)
            .body(body)
            .send()
            .await?;

        info!("NIM responded with status: {}", response.status());

        Ok(response)
    }

    /// GET `{base}/models`.
    pub async fn list_models(&self) -> Result<reqwest::Response> {
        let url = format!("{}/models", self.config.base_url);

        info!("NIM: listing models from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        info!("NIM responded with status: {}", response.status());

        Ok(response)
    }
}
