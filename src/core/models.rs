use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single file taken from the upload form. Lives only as long as the request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    /// Media type declared by the browser, if any.
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    #[must_use]
    pub fn new(filename: impl Into<String>, media_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            media_type,
            bytes,
        }
    }
}

/// Text of every page of every uploaded document, in upload order then page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    #[must_use]
    pub fn new(text: String) -> Self {
        Self(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What gets sent to the completion service for one summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub system_instruction: String,
    pub user_message: String,
    pub temperature: f64,
}

/// Completion text with surrounding whitespace removed; otherwise untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult(String);

impl SummaryResult {
    #[must_use]
    pub fn from_completion(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// The broker's priority for the client, picked with the radio selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    LowestPrice,
    BestCoverage,
    BalancedValue,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::LowestPrice, Goal::BestCoverage, Goal::BalancedValue];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Goal::LowestPrice => "Lowest Price",
            Goal::BestCoverage => "Best Coverage",
            Goal::BalancedValue => "Balanced Value",
        }
    }

    /// Form value used by the radio input.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Goal::LowestPrice => "lowest_price",
            Goal::BestCoverage => "best_coverage",
            Goal::BalancedValue => "balanced_value",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Goal> {
        Goal::ALL.into_iter().find(|g| g.value() == value.trim())
    }
}

/// Feedback as typed into the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackSubmission {
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Feedback once accepted, as handed to a [`crate::feedback::FeedbackSink`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub suggestion: String,
    pub email: Option<String>,
}
