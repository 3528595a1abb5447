//! One handler per user action.
//!
//! Every interaction is an explicit [`Interaction`] value routed by
//! [`dispatch`] to exactly one handler. Handlers get the session state they
//! may change as an argument and never touch anything process-wide.

pub mod feedback;
pub mod generate;
pub mod preview;

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::ai::{CompletionService, LlmClient};
use crate::core::config::AppConfig;
use crate::core::models::{FeedbackSubmission, SummaryResult};
use crate::core::session::SessionState;
use crate::errors::QuoteError;
use crate::feedback::{FeedbackSink, JsonlFeedbackSink, LogFeedbackSink};
use crate::pipeline::{DocumentReader, LopdfReader};

pub use generate::GenerateInput;
pub use preview::PreviewInput;

/// Collaborators shared by every interaction.
#[derive(Clone)]
pub struct AppContext {
    pub max_files: usize,
    pub reader: Arc<dyn DocumentReader>,
    pub completion: Arc<dyn CompletionService>,
    pub feedback: Arc<dyn FeedbackSink>,
}

impl AppContext {
    #[must_use]
    pub fn new(
        max_files: usize,
        reader: Arc<dyn DocumentReader>,
        completion: Arc<dyn CompletionService>,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Self {
        Self {
            max_files,
            reader,
            completion,
            feedback,
        }
    }

    /// Production wiring: lopdf extraction, the `OpenAI` client and the
    /// configured feedback sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the `OpenAI` client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, QuoteError> {
        let feedback: Arc<dyn FeedbackSink> = match &config.feedback_log_path {
            Some(path) => {
                info!(path = %path.display(), "Feedback will be appended to file");
                Arc::new(JsonlFeedbackSink::new(path.clone()))
            }
            None => Arc::new(LogFeedbackSink),
        };

        Ok(Self::new(
            config.max_files,
            Arc::new(LopdfReader),
            Arc::new(LlmClient::from_config(config)?),
            feedback,
        ))
    }
}

#[derive(Debug)]
pub enum Interaction {
    GenerateSummary(GenerateInput),
    TogglePreview(PreviewInput),
    SubmitFeedback(FeedbackSubmission),
}

impl Interaction {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::GenerateSummary(_) => "generate_summary",
            Interaction::TogglePreview(_) => "toggle_preview",
            Interaction::SubmitFeedback(_) => "submit_feedback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    Summary(SummaryResult),
    /// Example text when the preview was switched on, `None` when switched off.
    Preview(Option<String>),
    FeedbackRecorded(Uuid),
}

/// Routes one interaction to its handler.
///
/// # Errors
///
/// Whatever the selected handler returns.
pub async fn dispatch(
    ctx: &AppContext,
    session: &mut SessionState,
    interaction: Interaction,
) -> Result<InteractionOutcome, QuoteError> {
    info!(interaction = interaction.name(), "Dispatching interaction");
    match interaction {
        Interaction::GenerateSummary(input) => generate::handle_generate(ctx, session, input)
            .await
            .map(InteractionOutcome::Summary),
        Interaction::TogglePreview(input) => Ok(InteractionOutcome::Preview(
            preview::handle_toggle_preview(session, input),
        )),
        Interaction::SubmitFeedback(submission) => {
            feedback::handle_feedback(ctx.feedback.as_ref(), submission)
                .await
                .map(InteractionOutcome::FeedbackRecorded)
        }
    }
}
