use nim_proxy::config::ProxyConfig;
use nim_proxy::handler::{AppState, router};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = match env::var("NIM_PROXY_CONFIG") {
        Ok(path) => ProxyConfig::from_file(&path)?,
        Err(_) => ProxyConfig::from_env()?,
    };
    config.validate()?;

    if config.nim.api_key.is_empty() {
        warn!("NVIDIA_API_KEY is not set; upstream requests will be unauthenticated");
    }

    info!("Starting NVIDIA NIM proxy...");
    info!("  Listen: {}", config.listen_addr());
    info!("  Upstream: {}", config.nim.base_url);

    let state = Arc::new(AppState::new(config.clone())?);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!("Proxy ready!");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
