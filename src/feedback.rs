//! Feedback capture.
//!
//! Accepted feedback is handed to a [`FeedbackSink`]. The server uses
//! [`JsonlFeedbackSink`] when `FEEDBACK_LOG_PATH` is set and
//! [`LogFeedbackSink`] otherwise.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::core::models::{FeedbackRecord, FeedbackSubmission};
use crate::errors::QuoteError;

pub const MAX_SUGGESTION_LEN: usize = 4000;

pub const MAX_EMAIL_LEN: usize = 254;

#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the record could not be stored.
    async fn record(&self, feedback: &FeedbackRecord) -> Result<(), QuoteError>;
}

/// Writes feedback to the structured log only.
#[derive(Debug, Default)]
pub struct LogFeedbackSink;

#[async_trait]
impl FeedbackSink for LogFeedbackSink {
    async fn record(&self, feedback: &FeedbackRecord) -> Result<(), QuoteError> {
        info!(
            feedback_id = %feedback.id,
            has_email = feedback.email.is_some(),
            suggestion = %feedback.suggestion,
            "Feedback received"
        );
        Ok(())
    }
}

/// Appends one JSON object per line to a file.
#[derive(Debug)]
pub struct JsonlFeedbackSink {
    path: PathBuf,
    // Serialises appends so concurrent lines never interleave
    write_lock: Mutex<()>,
}

impl JsonlFeedbackSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl FeedbackSink for JsonlFeedbackSink {
    async fn record(&self, feedback: &FeedbackRecord) -> Result<(), QuoteError> {
        let mut line = serde_json::to_string(feedback)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        info!(feedback_id = %feedback.id, path = %self.path.display(), "Feedback stored");
        Ok(())
    }
}

/// Checks and normalises a submission into a record ready to store.
///
/// # Errors
///
/// Returns [`QuoteError::FeedbackError`] for an empty or oversized suggestion
/// or a malformed email address.
pub fn validate_feedback(submission: &FeedbackSubmission) -> Result<FeedbackRecord, QuoteError> {
    static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex compile")
    });

    let suggestion = submission.suggestion.trim();
    if suggestion.is_empty() {
        return Err(QuoteError::FeedbackError(
            "Please enter a suggestion before submitting.".to_string(),
        ));
    }
    if suggestion.chars().count() > MAX_SUGGESTION_LEN {
        return Err(QuoteError::FeedbackError(format!(
            "Suggestions are limited to {MAX_SUGGESTION_LEN} characters."
        )));
    }

    let email = submission
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());
    if let Some(email) = email
        && (email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(email))
    {
        return Err(QuoteError::FeedbackError(
            "Please enter a valid email address or leave it blank.".to_string(),
        ));
    }

    Ok(FeedbackRecord {
        id: Uuid::new_v4(),
        received_at: Utc::now(),
        suggestion: suggestion.to_string(),
        email: email.map(str::to_string),
    })
}
