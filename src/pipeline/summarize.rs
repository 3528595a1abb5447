use tracing::{info, instrument};

use crate::ai::CompletionService;
use crate::core::models::{ExtractedText, SummaryResult};
use crate::errors::QuoteError;
use crate::prompt::build_summary_request;

/// Calls the completion service once and trims the reply.
///
/// There is no retry: any service error goes straight back to the caller.
///
/// # Errors
///
/// Propagates the completion service's error.
#[instrument(level = "info", skip_all, fields(chars = text.len()))]
pub async fn generate_summary<S>(
    service: &S,
    text: &ExtractedText,
) -> Result<SummaryResult, QuoteError>
where
    S: CompletionService + ?Sized,
{
    let request = build_summary_request(text);
    let completion = service.complete(&request).await?;
    let summary = SummaryResult::from_completion(&completion);
    info!(chars = summary.as_str().len(), "Summary generated");
    Ok(summary)
}
