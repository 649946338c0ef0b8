use std::path::PathBuf;

use lopdf::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfReadError {
    #[error("failed to open PDF {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
    #[error("failed to extract text from page {page} of {path}: {source}")]
    PageText {
        path: PathBuf,
        page: u32,
        #[source]
        source: lopdf::Error,
    },
    #[error("PDF {0} has no text layer")]
    NoText(PathBuf),
}

#[derive(Debug)]
pub struct PdfReader {
    path: PathBuf,
    document: Document,
}

impl PdfReader {
    pub fn new(path: PathBuf) -> Result<Self, PdfReadError> {
        let document = Document::load(&path).map_err(|source| PdfReadError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, document })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Text of the first `max_pages` pages joined by newlines.
    pub fn leading_text(&self, max_pages: usize) -> Result<String, PdfReadError> {
        let mut text = String::new();
        for page in self.document.get_pages().into_keys().take(max_pages) {
            let page_text =
                self.document
                    .extract_text(&[page])
                    .map_err(|source| PdfReadError::PageText {
                        path: self.path.clone(),
                        page,
                        source,
                    })?;
            text.push_str(&page_text);
            text.push('\n');
        }

        if text.trim().is_empty() {
            return Err(PdfReadError::NoText(self.path.clone()));
        }
        Ok(text)
    }
}
