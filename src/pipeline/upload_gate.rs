//! Upload limit and file type checks, run before any document is opened.

use tracing::warn;

use crate::core::models::UploadedDocument;
use crate::errors::QuoteError;

const PDF_MIME: &str = "application/pdf";

/// Accepts the whole upload set or rejects it; there is no partial acceptance.
///
/// # Errors
///
/// Returns [`QuoteError::UploadLimitExceeded`] when more than `max_files`
/// documents were uploaded, [`QuoteError::NoDocuments`] when none were, and
/// [`QuoteError::UnsupportedMediaType`] for the first document that is not a PDF.
pub fn check_uploads(
    documents: Vec<UploadedDocument>,
    max_files: usize,
) -> Result<Vec<UploadedDocument>, QuoteError> {
    if documents.len() > max_files {
        warn!(
            received = documents.len(),
            max_files, "Upload rejected: too many documents"
        );
        return Err(QuoteError::UploadLimitExceeded {
            max: max_files,
            received: documents.len(),
        });
    }

    if documents.is_empty() {
        return Err(QuoteError::NoDocuments);
    }

    if let Some(doc) = documents.iter().find(|d| !is_pdf(d)) {
        warn!(filename = %doc.filename, media_type = ?doc.media_type, "Upload rejected: not a PDF");
        return Err(QuoteError::UnsupportedMediaType(doc.filename.clone()));
    }

    Ok(documents)
}

/// A document counts as a PDF if the browser said so, or its name says so.
#[must_use]
pub fn is_pdf(doc: &UploadedDocument) -> bool {
    let declared = doc
        .media_type
        .as_deref()
        .map(canonicalize_mime)
        .is_some_and(|m| m == PDF_MIME);

    declared
        || mime_guess::from_path(&doc.filename)
            .iter()
            .any(|m| m.essence_str() == PDF_MIME)
}

#[must_use]
pub fn canonicalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}
