pub mod filename;
pub mod pdf_reader;
pub mod text_extractor;

pub use filename::parse_filename;
pub use pdf_reader::{PdfReadError, PdfReader};

use std::path::Path;

use tracing::{debug, warn};

use crate::core::model::ContentSummary;

pub const DEFAULT_MAX_PAGES: usize = 5;

/// Reads price figures and variant keywords from a document.
///
/// Implementations never fail: a document that cannot be read produces an
/// empty summary and the caller continues with filename data only.
pub trait ContentExtractor {
    fn extract(&self, path: &Path) -> ContentSummary;
}

#[derive(Debug, Clone)]
pub struct PdfContentExtractor {
    max_pages: usize,
}

impl PdfContentExtractor {
    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }

    fn read_text(&self, path: &Path) -> Result<String, PdfReadError> {
        let reader = PdfReader::new(path.to_path_buf())?;
        debug!(path = %path.display(), pages = reader.page_count(), "opened PDF");
        reader.leading_text(self.max_pages)
    }
}

impl Default for PdfContentExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES)
    }
}

impl ContentExtractor for PdfContentExtractor {
    fn extract(&self, path: &Path) -> ContentSummary {
        match self.read_text(path) {
            Ok(text) => {
                let summary = text_extractor::summarize_text(&text);
                if summary.is_empty() {
                    debug!(path = %path.display(), "no prices or variant keywords in text");
                }
                summary
            }
            Err(err) => {
                warn!(error = %err, "content extraction skipped");
                ContentSummary::default()
            }
        }
    }
}

/// Used when content extraction is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContentExtractor;

impl ContentExtractor for NoContentExtractor {
    fn extract(&self, _path: &Path) -> ContentSummary {
        ContentSummary::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unreadable_pdf_degrades_to_empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.pdf");
        fs::write(&path, b"%PDF-1.4 truncated").unwrap();

        let summary = PdfContentExtractor::default().extract(&path);
        assert!(summary.is_empty());
    }

    #[test]
    fn disabled_extractor_returns_nothing() {
        let summary = NoContentExtractor.extract(Path::new("whatever.pdf"));
        assert_eq!(summary, ContentSummary::default());
    }
}
