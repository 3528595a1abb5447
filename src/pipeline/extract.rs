//! Text extraction from uploaded PDFs.

use lopdf::Document;
use tracing::{debug, info, warn};

use crate::core::models::{ExtractedText, UploadedDocument};
use crate::errors::QuoteError;

/// Reads the text of a paged document.
pub trait DocumentReader: Send + Sync {
    /// Text of each page, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::ExtractionError`] if the document cannot be parsed.
    fn page_texts(&self, document: &UploadedDocument) -> Result<Vec<String>, QuoteError>;
}

/// [`DocumentReader`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfReader;

impl DocumentReader for LopdfReader {
    fn page_texts(&self, document: &UploadedDocument) -> Result<Vec<String>, QuoteError> {
        let doc = Document::load_mem(&document.bytes).map_err(|e| QuoteError::ExtractionError {
            filename: document.filename.clone(),
            reason: e.to_string(),
        })?;

        // get_pages is keyed by page number, so iteration is in page order
        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            let text = doc
                .extract_text(&[*page_number])
                .map_err(|e| QuoteError::ExtractionError {
                    filename: document.filename.clone(),
                    reason: format!("page {page_number}: {e}"),
                })?;
            texts.push(text);
        }

        debug!(filename = %document.filename, pages = texts.len(), "Read PDF pages");
        Ok(texts)
    }
}

/// Concatenates the page text of every document, in upload order.
///
/// No separators are added and no layout is kept. The first document that
/// fails to parse aborts the run.
///
/// # Errors
///
/// Propagates the reader's [`QuoteError::ExtractionError`].
pub fn extract_text<R>(
    reader: &R,
    documents: &[UploadedDocument],
) -> Result<ExtractedText, QuoteError>
where
    R: DocumentReader + ?Sized,
{
    let mut all_text = String::new();
    for document in documents {
        let pages = reader.page_texts(document).inspect_err(|e| {
            warn!(filename = %document.filename, error = %e, "Extraction failed");
        })?;
        for page in pages {
            all_text.push_str(&page);
        }
    }

    info!(
        documents = documents.len(),
        chars = all_text.chars().count(),
        "Extracted quote text"
    );
    Ok(ExtractedText::new(all_text))
}
