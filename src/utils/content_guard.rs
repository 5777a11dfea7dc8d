/// Number of leading body bytes inspected when sniffing content.
pub const SNIFF_LEN: usize = 512;

/// Returns true if the given content-type or head indicates a PDF file.
/// - Content-Type: application/pdf (case-insensitive, parameters ignored)
/// - Magic bytes: %PDF-
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let mime_main = content_type
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime_main == "application/pdf" || head.starts_with(b"%PDF-")
}

/// Returns the leading slice used for magic-byte detection.
pub fn sniff_head(body: &[u8]) -> &[u8] {
    &body[..body.len().min(SNIFF_LEN)]
}

/// Tracks how many body bytes have been accepted against a fixed cap.
#[derive(Debug, Clone, Copy)]
pub struct SizeGuard {
    limit: u64,
    seen: u64,
}

impl SizeGuard {
    pub fn new(limit: u64) -> Self {
        Self { limit, seen: 0 }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns false once a declared Content-Length is already over the cap.
    pub fn admits_declared(&self, content_length: Option<u64>) -> bool {
        content_length.map_or(true, |len| len <= self.limit)
    }

    /// Accounts for another chunk; returns false when the running total exceeds the cap.
    pub fn admit(&mut self, chunk_len: usize) -> bool {
        self.seen = self.seen.saturating_add(chunk_len as u64);
        self.seen <= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_by_content_type() {
        assert!(is_pdf(Some("application/pdf"), b""));
        assert!(is_pdf(Some("Application/PDF; qs=0.9"), b""));
        assert!(!is_pdf(Some("text/html; charset=utf-8"), b"<html>"));
    }

    #[test]
    fn detects_pdf_by_magic_bytes() {
        assert!(is_pdf(None, b"%PDF-1.7\n%\xE2\xE3\xCF\xD3"));
        assert!(is_pdf(Some("application/octet-stream"), b"%PDF-1.4"));
        assert!(!is_pdf(None, b"PK\x03\x04"));
    }

    #[test]
    fn sniff_head_is_bounded() {
        let body = vec![b'a'; SNIFF_LEN * 2];
        assert_eq!(sniff_head(&body).len(), SNIFF_LEN);
        assert_eq!(sniff_head(b"abc"), b"abc");
    }

    #[test]
    fn size_guard_rejects_declared_oversize() {
        let guard = SizeGuard::new(10);
        assert!(guard.admits_declared(None));
        assert!(guard.admits_declared(Some(10)));
        assert!(!guard.admits_declared(Some(11)));
    }

    #[test]
    fn size_guard_tracks_running_total() {
        let mut guard = SizeGuard::new(10);
        assert!(guard.admit(4));
        assert!(guard.admit(6));
        assert!(!guard.admit(1));
    }
}
