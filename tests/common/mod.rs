//! Fakes and fixtures shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use quote_summary::ai::CompletionService;
use quote_summary::core::models::{FeedbackRecord, SummaryRequest, UploadedDocument};
use quote_summary::errors::QuoteError;
use quote_summary::features::AppContext;
use quote_summary::feedback::FeedbackSink;
use quote_summary::pipeline::{DocumentReader, LopdfReader};

/// Builds a PDF with one page per entry, each page showing that text.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

pub fn pdf_document(filename: &str, pages: &[&str]) -> UploadedDocument {
    UploadedDocument::new(
        filename,
        Some("application/pdf".to_string()),
        pdf_with_pages(pages),
    )
}

/// A document whose bytes the fake reader ignores; only the filename matters.
pub fn named_document(filename: &str) -> UploadedDocument {
    UploadedDocument::new(filename, Some("application/pdf".to_string()), b"%PDF".to_vec())
}

/// Serves page texts by filename and counts every call.
#[derive(Default)]
pub struct FakeReader {
    pages: HashMap<String, Vec<String>>,
    pub calls: AtomicUsize,
}

impl FakeReader {
    pub fn with(mut self, filename: &str, pages: &[&str]) -> Self {
        self.pages.insert(
            filename.to_string(),
            pages.iter().map(|p| (*p).to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentReader for FakeReader {
    fn page_texts(&self, document: &UploadedDocument) -> Result<Vec<String>, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(&document.filename)
            .cloned()
            .ok_or_else(|| QuoteError::ExtractionError {
                filename: document.filename.clone(),
                reason: "not a readable PDF".to_string(),
            })
    }
}

/// Records every request and answers with a fixed reply.
pub struct RecordingCompletion {
    reply: Result<String, String>,
    delay: Option<Duration>,
    pub requests: Mutex<Vec<SummaryRequest>>,
}

impl RecordingCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers only after `delay`, like a slow completion API.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<SummaryRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionService for RecordingCompletion {
    async fn complete(&self, request: &SummaryRequest) -> Result<String, QuoteError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone().map_err(QuoteError::OpenAIError)
    }
}

#[derive(Default)]
pub struct RecordingFeedback {
    pub records: Mutex<Vec<FeedbackRecord>>,
}

#[async_trait]
impl FeedbackSink for RecordingFeedback {
    async fn record(&self, feedback: &FeedbackRecord) -> Result<(), QuoteError> {
        self.records.lock().unwrap().push(feedback.clone());
        Ok(())
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub reader: Arc<FakeReader>,
    pub completion: Arc<RecordingCompletion>,
    pub feedback: Arc<RecordingFeedback>,
}

pub fn harness(max_files: usize, reader: FakeReader, completion: RecordingCompletion) -> Harness {
    let reader = Arc::new(reader);
    let completion = Arc::new(completion);
    let feedback = Arc::new(RecordingFeedback::default());
    let ctx = AppContext::new(
        max_files,
        reader.clone(),
        completion.clone(),
        feedback.clone(),
    );
    Harness {
        ctx,
        reader,
        completion,
        feedback,
    }
}

/// Context with real lopdf extraction and a recording completion service.
pub fn lopdf_context(
    max_files: usize,
    completion: Arc<RecordingCompletion>,
    feedback: Arc<RecordingFeedback>,
) -> AppContext {
    AppContext::new(max_files, Arc::new(LopdfReader), completion, feedback)
}
