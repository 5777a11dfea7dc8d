use thiserror::Error;

use crate::utils::fetch::FetchError;
use crate::utils::pdf::PdfError;

/// Pipeline stage a conversion failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    Fetch,
    Parse,
}

/// Every way a conversion can fail. The `Display` form is the response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("URL must end with .pdf")]
    NotPdf,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch PDF: {0}")]
    Fetch(#[from] FetchError),

    #[error("Error processing PDF: {0}")]
    Extraction(#[from] PdfError),

    /// The blocking extraction task died before reporting back.
    #[error("Error processing PDF: {0}")]
    Worker(String),
}

impl ConversionError {
    pub fn stage(&self) -> Stage {
        match self {
            ConversionError::NotPdf | ConversionError::InvalidUrl(_) => Stage::Validation,
            ConversionError::Fetch(_) => Stage::Fetch,
            ConversionError::Extraction(_) | ConversionError::Worker(_) => Stage::Parse,
        }
    }
}
