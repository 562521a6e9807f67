use crate::{join_pages, DocumentExtractor, ExtractError};
use pdf_oxide::PdfDocument;
use std::path::Path;

/// PDF text extraction backed by `pdf_oxide`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for PdfExtractor {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let mut doc = PdfDocument::open(path).map_err(|e| ExtractError::Open(e.to_string()))?;

        let page_count = doc
            .page_count()
            .map_err(|e| ExtractError::PageCount(e.to_string()))?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(text) => pages.push(text),
                // An unreadable page contributes nothing, same as an empty one.
                Err(e) => tracing::warn!(page_index, error = %e, "skipping unreadable page"),
            }
        }

        let text = join_pages(&pages);
        tracing::info!(page_count, chars = text.len(), "document text extracted");
        Ok(text)
    }
}
