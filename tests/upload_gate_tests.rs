use quote_summary::core::models::UploadedDocument;
use quote_summary::errors::QuoteError;
use quote_summary::pipeline::check_uploads;
use quote_summary::pipeline::upload_gate::{canonicalize_mime, is_pdf};

fn pdf(name: &str) -> UploadedDocument {
    UploadedDocument::new(name, Some("application/pdf".to_string()), b"%PDF-1.5".to_vec())
}

#[test]
fn test_over_limit_rejects_whole_set() {
    let err = check_uploads(vec![pdf("a.pdf"), pdf("b.pdf")], 1).unwrap_err();
    match err {
        QuoteError::UploadLimitExceeded { max, received } => {
            assert_eq!(max, 1);
            assert_eq!(received, 2);
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn test_limit_is_checked_before_media_type() {
    let txt = UploadedDocument::new("notes.txt", Some("text/plain".to_string()), vec![]);
    let err = check_uploads(vec![txt, pdf("a.pdf"), pdf("b.pdf")], 2).unwrap_err();
    assert!(matches!(err, QuoteError::UploadLimitExceeded { max: 2, received: 3 }));
}

#[test]
fn test_within_limit_passes_documents_unchanged() {
    let docs = vec![pdf("first.pdf"), pdf("second.pdf"), pdf("third.pdf")];
    let accepted = check_uploads(docs, 3).unwrap();
    let names: Vec<&str> = accepted.iter().map(|d| d.filename.as_str()).collect();
    assert_eq!(names, ["first.pdf", "second.pdf", "third.pdf"]);
    assert_eq!(accepted[0].bytes, b"%PDF-1.5");
}

#[test]
fn test_empty_upload_rejected() {
    assert!(matches!(check_uploads(vec![], 1), Err(QuoteError::NoDocuments)));
}

#[test]
fn test_non_pdf_rejected_by_name() {
    let docx = UploadedDocument::new(
        "quote.docx",
        Some("application/octet-stream".to_string()),
        vec![1, 2, 3],
    );
    match check_uploads(vec![docx], 1) {
        Err(QuoteError::UnsupportedMediaType(name)) => assert_eq!(name, "quote.docx"),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_pdf_detection() {
    // Declared type wins, parameters and case ignored
    let declared = UploadedDocument::new("scan", Some("Application/PDF; q=1".to_string()), vec![]);
    assert!(is_pdf(&declared));

    // Falls back to the filename when the browser sends a generic type
    let by_name = UploadedDocument::new(
        "Quote.PDF",
        Some("application/octet-stream".to_string()),
        vec![],
    );
    assert!(is_pdf(&by_name));

    let neither = UploadedDocument::new("quote.png", Some("image/png".to_string()), vec![]);
    assert!(!is_pdf(&neither));

    let missing = UploadedDocument::new("quote", None, vec![]);
    assert!(!is_pdf(&missing));
}

#[test]
fn test_canonicalize_mime() {
    assert_eq!(canonicalize_mime(" Application/Pdf ;charset=binary"), "application/pdf");
    assert_eq!(canonicalize_mime(""), "");
}
