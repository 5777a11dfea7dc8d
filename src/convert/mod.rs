//! Validate, fetch and extract: the URL-to-text pipeline.

pub mod error;

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::utils::content_guard::{is_pdf, sniff_head};
use crate::utils::fetch::PdfFetcher;
use crate::utils::pdf::{join_pages, shared_extractor, PdfExtractor};

pub use error::{ConversionError, Stage};

pub type ConversionResult = Result<String, ConversionError>;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_PDF_BYTES: u64 = 500 * 1024 * 1024; // 500 MiB

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// `None` leaves the HTTP client without a request timeout.
    pub fetch_timeout: Option<Duration>,
    pub max_pdf_bytes: u64,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
            max_pdf_bytes: DEFAULT_MAX_PDF_BYTES,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A source URL that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    source_url: url::Url,
}

impl ConversionRequest {
    /// The `.pdf` suffix is a plain case-insensitive string check, made before
    /// URL parsing and independent of what the server eventually returns.
    pub fn parse(source_url: &str) -> Result<Self, ConversionError> {
        if !source_url.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ConversionError::NotPdf);
        }
        let parsed =
            url::Url::parse(source_url).map_err(|e| ConversionError::InvalidUrl(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self { source_url: parsed }),
            other => Err(ConversionError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                other
            ))),
        }
    }

    pub fn source_url(&self) -> &url::Url {
        &self.source_url
    }
}

pub struct ConversionService {
    fetcher: PdfFetcher,
    extractor: Arc<dyn PdfExtractor>,
}

impl ConversionService {
    /// Builds the service with the process-wide `pdf-extract` backend.
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let fetcher = PdfFetcher::new(
            config.fetch_timeout,
            &config.user_agent,
            config.max_pdf_bytes,
        )?;
        Ok(Self::with_extractor(fetcher, shared_extractor()))
    }

    pub fn with_extractor(fetcher: PdfFetcher, extractor: Arc<dyn PdfExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    pub async fn convert(&self, source_url: &str) -> ConversionResult {
        let request = ConversionRequest::parse(source_url).map_err(|e| {
            info!(target: "pdf_convert", url = source_url, "Rejected source URL: {}", e);
            e
        })?;
        let url = request.source_url();

        let body = self.fetcher.fetch(url).await?;
        if !is_pdf(body.content_type.as_deref(), sniff_head(&body.bytes)) {
            warn!(target: "pdf_convert", url = %url, ct = ?body.content_type, "Payload does not look like a PDF; extracting anyway");
        }

        info!(target: "pdf_convert", url = %url, size = body.bytes.len(), "Starting PDF text extraction");
        let started = Instant::now();
        let extractor = Arc::clone(&self.extractor);
        let bytes = body.bytes;
        let pages = tokio::task::spawn_blocking(move || extractor.extract_pages(&bytes))
            .await
            .map_err(|e| ConversionError::Worker(e.to_string()))?
            .map_err(|e| {
                warn!(target: "pdf_convert", url = %url, "PDF extraction failed: {}", e);
                ConversionError::from(e)
            })?;

        info!(
            target: "pdf_convert",
            url = %url,
            pages = pages.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "PDF extraction succeeded"
        );
        Ok(join_pages(&pages))
    }
}
