pub mod landing;
pub mod response;
pub mod router;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::convert::{ConversionService, ServiceConfig};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Public origin shown on the landing page; derived from `Host` when unset.
    pub base_url: Option<String>,
    pub service: ServiceConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConversionService>,
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(service: ConversionService, base_url: Option<String>) -> Self {
        Self {
            service: Arc::new(service),
            base_url: base_url.map(|url| normalize_base_url(&url)),
        }
    }
}

/// Ensures exactly one trailing slash.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

pub async fn serve(config: ServerConfig) -> Result<()> {
    let service = ConversionService::new(&config.service)?;
    let app = router::router(AppState::new(service, config.base_url.clone()));

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("PDF to text service listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
