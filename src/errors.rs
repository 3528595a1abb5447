use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Your plan allows a maximum of {max} PDF(s) per request.")]
    UploadLimitExceeded { max: usize, received: usize },

    #[error("Please upload at least one quote PDF.")]
    NoDocuments,

    #[error("{0} is not a PDF. Please upload quote PDFs only.")]
    UnsupportedMediaType(String),

    #[error("Could not read text from {filename}: {reason}")]
    ExtractionError { filename: String, reason: String },

    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("{0}")]
    FeedbackError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl QuoteError {
    /// Whether the message is safe and useful to show to the broker as-is.
    ///
    /// Everything else is logged and replaced with a generic failure message.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            QuoteError::UploadLimitExceeded { .. }
                | QuoteError::NoDocuments
                | QuoteError::UnsupportedMediaType(_)
                | QuoteError::ExtractionError { .. }
                | QuoteError::ParseError(_)
                | QuoteError::FeedbackError(_)
        )
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(error: reqwest::Error) -> Self {
        QuoteError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for QuoteError {
    fn from(error: anyhow::Error) -> Self {
        QuoteError::InternalError(error.to_string())
    }
}

impl From<std::io::Error> for QuoteError {
    fn from(error: std::io::Error) -> Self {
        QuoteError::InternalError(format!("I/O error: {error}"))
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(error: serde_json::Error) -> Self {
        QuoteError::InternalError(format!("JSON error: {error}"))
    }
}

impl From<axum::extract::multipart::MultipartError> for QuoteError {
    fn from(error: axum::extract::multipart::MultipartError) -> Self {
        QuoteError::ParseError(format!("multipart body: {error}"))
    }
}

impl From<tokio::task::JoinError> for QuoteError {
    fn from(error: tokio::task::JoinError) -> Self {
        QuoteError::InternalError(format!("worker task failed: {error}"))
    }
}
