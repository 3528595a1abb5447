use tracing::instrument;
use uuid::Uuid;

use crate::core::models::FeedbackSubmission;
use crate::errors::QuoteError;
use crate::feedback::{FeedbackSink, validate_feedback};

/// Validates the submission and hands it to the sink.
///
/// # Errors
///
/// Validation failures and sink errors.
#[instrument(level = "info", skip_all)]
pub async fn handle_feedback<S>(
    sink: &S,
    submission: FeedbackSubmission,
) -> Result<Uuid, QuoteError>
where
    S: FeedbackSink + ?Sized,
{
    let record = validate_feedback(&submission)?;
    sink.record(&record).await?;
    Ok(record.id)
}
