use anyhow::Context;
use reqwest::{header, Client, StatusCode};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

use crate::utils::content_guard::SizeGuard;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Upstream answered with a non-2xx status. Displays the reason phrase only.
    #[error("{reason}")]
    Status { status: u16, reason: String },

    #[error("{0}")]
    Transport(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("PDF exceeds the allowed size limit of {limit} bytes")]
    TooLarge { limit: u64 },
}

impl FetchError {
    fn from_status(status: StatusCode) -> Self {
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        FetchError::Status {
            status: status.as_u16(),
            reason,
        }
    }
}

/// Bytes returned by a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Single-attempt HTTP GET with an optional timeout and a body-size cap.
#[derive(Debug, Clone)]
pub struct PdfFetcher {
    client: Client,
    max_bytes: u64,
}

impl PdfFetcher {
    pub fn new(
        timeout: Option<Duration>,
        user_agent: &str,
        max_bytes: u64,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self { client, max_bytes })
    }

    pub async fn fetch(&self, url: &url::Url) -> Result<FetchedBody, FetchError> {
        info!(target: "pdf_convert", url = %url, "Starting HTTP fetch");
        let started = Instant::now();

        let mut response = self.client.get(url.as_str()).send().await.map_err(|e| {
            warn!(target: "pdf_convert", url = %url, "HTTP transport error: {}", e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(target: "pdf_convert", url = %url, status = status.as_u16(), "HTTP non-success status");
            return Err(FetchError::from_status(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(|s| s.to_string());

        let mut guard = SizeGuard::new(self.max_bytes);
        if !guard.admits_declared(response.content_length()) {
            warn!(target: "pdf_convert", url = %url, declared = ?response.content_length(), limit = guard.limit(), "Declared body too large; refusing");
            return Err(FetchError::TooLarge {
                limit: guard.limit(),
            });
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            warn!(target: "pdf_convert", url = %url, "Body read failed: {}", e);
            FetchError::Body(e.to_string())
        })? {
            if !guard.admit(chunk.len()) {
                warn!(target: "pdf_convert", url = %url, limit = guard.limit(), "Body exceeded size limit; aborting");
                return Err(FetchError::TooLarge {
                    limit: guard.limit(),
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        info!(
            target: "pdf_convert",
            url = %url,
            size = bytes.len(),
            ct = ?content_type,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "HTTP fetch completed"
        );
        Ok(FetchedBody {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};

    fn fetcher(max_bytes: u64) -> PdfFetcher {
        PdfFetcher::new(Some(Duration::from_secs(5)), "pdf-to-text-test", max_bytes)
            .expect("client")
    }

    #[tokio::test]
    async fn returns_body_and_content_type() {
        let app = Router::new().route(
            "/doc.pdf",
            get(|| async { ([("content-type", "application/pdf")], "%PDF-1.4 body") }),
        );
        let addr = spawn_upstream(app).await;
        let url = url::Url::parse(&format!("http://{addr}/doc.pdf")).unwrap();

        let body = fetcher(1024).fetch(&url).await.expect("fetch");
        assert_eq!(body.bytes, b"%PDF-1.4 body");
        assert_eq!(body.content_type.as_deref(), Some("application/pdf"));
    }

    #[tokio::test]
    async fn non_success_status_carries_reason() {
        let app = Router::new().route("/missing.pdf", get(|| async { AxumStatus::NOT_FOUND }));
        let addr = spawn_upstream(app).await;
        let url = url::Url::parse(&format!("http://{addr}/missing.pdf")).unwrap();

        let err = fetcher(1024).fetch(&url).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 404,
                reason: "Not Found".to_string()
            }
        );
        assert_eq!(err.to_string(), "Not Found");
    }

    #[tokio::test]
    async fn oversized_body_is_refused() {
        let app = Router::new().route("/big.pdf", get(|| async { vec![b'x'; 4096] }));
        let addr = spawn_upstream(app).await;
        let url = url::Url::parse(&format!("http://{addr}/big.pdf")).unwrap();

        let err = fetcher(1024).fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::TooLarge { limit: 1024 });
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = url::Url::parse(&format!("http://{addr}/gone.pdf")).unwrap();

        let err = fetcher(1024).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn unknown_status_falls_back_to_code() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(FetchError::from_status(status).to_string(), "HTTP 599");
    }
}
