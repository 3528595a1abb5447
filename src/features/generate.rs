use std::sync::Arc;

use tracing::{info, instrument};

use crate::core::models::{Goal, SummaryResult, UploadedDocument};
use crate::core::session::SessionState;
use crate::errors::QuoteError;
use crate::pipeline::{check_uploads, extract_text, generate_summary};
use crate::prompt::sanitize_client_name;

use super::AppContext;

#[derive(Debug, Clone, Default)]
pub struct GenerateInput {
    pub documents: Vec<UploadedDocument>,
    pub client_name: String,
    pub goal: Goal,
}

/// Upload gate, then extraction, then one completion call.
///
/// The gate runs before any document is opened; a rejected upload never
/// reaches the reader or the completion service.
///
/// # Errors
///
/// Upload gate rejections, extraction failures and completion errors, unchanged.
#[instrument(level = "info", skip_all, fields(documents = input.documents.len()))]
pub async fn handle_generate(
    ctx: &AppContext,
    session: &mut SessionState,
    input: GenerateInput,
) -> Result<SummaryResult, QuoteError> {
    session.client_name = sanitize_client_name(&input.client_name);
    session.goal = input.goal;

    let documents = check_uploads(input.documents, ctx.max_files)?;

    let reader = Arc::clone(&ctx.reader);
    let text =
        tokio::task::spawn_blocking(move || extract_text(reader.as_ref(), &documents)).await??;

    info!(chars = text.len(), "Requesting summary");
    generate_summary(ctx.completion.as_ref(), &text).await
}
