// PDF text extraction behind a small trait so the backing library stays swappable.

use once_cell::sync::Lazy;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PdfError {
    #[error("{0}")]
    Parse(String),

    #[error("encrypted PDF is not supported: {0}")]
    Encrypted(String),

    #[error("PDF extractor panicked on malformed input")]
    Panicked,
}

impl PdfError {
    /// Classifies a library-reported message. Encryption and password
    /// failures get their own variant; everything else is a parse error.
    pub fn from_library_message(message: String) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("encrypt") || lower.contains("password") {
            PdfError::Encrypted(message)
        } else {
            PdfError::Parse(message)
        }
    }
}

/// Anything that can turn PDF bytes into per-page text, in page order.
pub trait PdfExtractor: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError>;
}

/// Extractor backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

impl PdfExtractor for PdfExtractBackend {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError> {
        // pdf-extract can panic instead of returning an error on broken input.
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));
        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(PdfError::from_library_message(e.to_string())),
            Err(_) => Err(PdfError::Panicked),
        }
    }
}

static SHARED_EXTRACTOR: Lazy<Arc<dyn PdfExtractor>> = Lazy::new(|| {
    info!(target: "pdf_convert", backend = "pdf-extract", "Initializing PDF text extractor");
    Arc::new(PdfExtractBackend)
});

/// Returns the process-wide extractor, constructing it on first use.
/// Concurrent first callers observe a single initialization.
pub fn shared_extractor() -> Arc<dyn PdfExtractor> {
    Arc::clone(&SHARED_EXTRACTOR)
}

/// Joins per-page text in page order with a single newline.
pub fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_pages_in_document_order() {
        let bytes = fixtures::text_pdf(&["First page", "Second page", "Third page"]);
        let pages = PdfExtractBackend.extract_pages(&bytes).expect("pages");

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("First page"));
        assert!(pages[1].contains("Second page"));
        assert!(pages[2].contains("Third page"));
    }

    #[test]
    fn extraction_is_deterministic() {
        let bytes = fixtures::text_pdf(&["Alpha", "Beta"]);
        let first = join_pages(&PdfExtractBackend.extract_pages(&bytes).expect("first"));
        let second = join_pages(&PdfExtractBackend.extract_pages(&bytes).expect("second"));
        assert_eq!(first, second);
        assert!(first.find("Alpha").expect("alpha") < first.find("Beta").expect("beta"));
    }

    #[test]
    fn rejects_html_payload() {
        let html = b"<!DOCTYPE html><html><body>Not found</body></html>";
        assert!(PdfExtractBackend.extract_pages(html).is_err());
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(PdfExtractBackend.extract_pages(&[]).is_err());
    }

    #[test]
    fn classifies_encryption_messages() {
        assert_eq!(
            PdfError::from_library_message("Document is Encrypted".to_string()),
            PdfError::Encrypted("Document is Encrypted".to_string())
        );
        assert_eq!(
            PdfError::from_library_message("invalid file trailer".to_string()),
            PdfError::Parse("invalid file trailer".to_string())
        );
    }

    #[test]
    fn shared_extractor_is_initialized_once() {
        let a = shared_extractor();
        let b = shared_extractor();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn join_uses_single_newline() {
        let pages = vec!["one".to_string(), "two".to_string()];
        assert_eq!(join_pages(&pages), "one\ntwo");
        assert_eq!(join_pages(&[]), "");
    }
}
