//! Plain-text extraction from uploaded documents.
//!
//! Parsing is delegated to `pdf_oxide`. This crate only decides which pages
//! contribute text and how page texts are stitched together: pages are kept
//! in document order, pages without extractable text are dropped, and the
//! rest are joined with a single newline.

mod error;
mod pdf;

pub use error::ExtractError;
pub use pdf::PdfExtractor;

use std::path::Path;

/// Converts a document on disk into plain text.
///
/// Implementations are blocking; async callers should run them on a
/// blocking thread.
pub trait DocumentExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Joins page texts in order, skipping pages that carry no text.
///
/// A page whose text is empty or whitespace-only contributes nothing, so no
/// blank lines appear for empty pages. Zero usable pages yields `""`.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.trim().is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(page);
    }
    text
}
