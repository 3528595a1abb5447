//! HTTP router - thin layer that turns requests into [`Interaction`]s.
//!
//! This module handles:
//! - Session lookup from the cookie (and write-back after the interaction)
//! - Request parsing (multipart uploads, urlencoded forms)
//! - Dispatch to the matching feature handler
//! - Rendering the page with the outcome

use anyhow::Result;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Form, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use super::{helpers, parsing};
use crate::core::config::AppConfig;
use crate::core::models::FeedbackSubmission;
use crate::core::session::{SessionState, SessionStore};
use crate::errors::QuoteError;
use crate::features::preview::current_preview;
use crate::features::{AppContext, Interaction, InteractionOutcome, dispatch};
use crate::views::{PageModel, render_page};

pub const FEEDBACK_THANKS: &str = "Thanks! Your feedback has been received.";

/// State shared by every route.
#[derive(Clone)]
pub struct WebState {
    pub ctx: AppContext,
    pub sessions: SessionStore,
}

impl WebState {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            sessions: SessionStore::new(),
        }
    }
}

pub fn build_router(state: WebState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/summary", post(generate))
        .route("/preview", post(preview))
        .route("/feedback", post(feedback))
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
///
/// # Errors
///
/// Returns an error if the `OpenAI` client cannot be built or the listener
/// cannot bind.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let ctx = AppContext::from_config(config)?;
    let app = build_router(WebState::new(ctx), config.max_upload_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        max_files = config.max_files,
        model = %config.openai_model,
        "Quote summary server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn index(State(state): State<WebState>, headers: HeaderMap) -> Response {
    let session = state
        .sessions
        .acquire(parsing::session_id_from_headers(&headers))
        .await;
    let session_id = session.id();

    let model = page_for_session(&state.ctx, &session);
    state.sessions.release(session).await;
    helpers::page_response(StatusCode::OK, session_id, render_page(&model))
}

#[instrument(level = "info", skip_all)]
async fn generate(
    State(state): State<WebState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let input = match multipart {
        Ok(multipart) => parsing::read_generate_form(multipart).await,
        Err(rejection) => Err(QuoteError::ParseError(rejection.body_text())),
    };

    match input {
        Ok(input) => run_interaction(&state, &headers, Interaction::GenerateSummary(input)).await,
        Err(e) => render_rejection(&state, &headers, &e).await,
    }
}

#[instrument(level = "info", skip_all)]
async fn preview(
    State(state): State<WebState>,
    headers: HeaderMap,
    Form(form): Form<parsing::PreviewForm>,
) -> Response {
    run_interaction(&state, &headers, Interaction::TogglePreview(form.into())).await
}

#[instrument(level = "info", skip_all)]
async fn feedback(
    State(state): State<WebState>,
    headers: HeaderMap,
    Form(submission): Form<FeedbackSubmission>,
) -> Response {
    run_interaction(&state, &headers, Interaction::SubmitFeedback(submission)).await
}

/// Lock the session, dispatch, release the session, render.
///
/// The session stays locked across the whole dispatch, so interactions on the
/// same session run one at a time.
async fn run_interaction(
    state: &WebState,
    headers: &HeaderMap,
    interaction: Interaction,
) -> Response {
    let mut session = state
        .sessions
        .acquire(parsing::session_id_from_headers(headers))
        .await;
    let session_id = session.id();

    let result = dispatch(&state.ctx, &mut session, interaction).await;
    let mut model = page_for_session(&state.ctx, &session);
    state.sessions.release(session).await;

    let status = match result {
        Ok(InteractionOutcome::Summary(summary)) => {
            model.summary = Some(summary.into_inner());
            StatusCode::OK
        }
        Ok(InteractionOutcome::Preview(preview)) => {
            model.preview = preview;
            StatusCode::OK
        }
        Ok(InteractionOutcome::FeedbackRecorded(id)) => {
            info!(feedback_id = %id, "Feedback recorded");
            model.notice = Some(FEEDBACK_THANKS.to_string());
            StatusCode::OK
        }
        Err(e) => {
            model.error = Some(helpers::user_message(&e));
            helpers::status_for(&e)
        }
    };

    helpers::page_response(status, session_id, render_page(&model))
}

/// Page for a request that could not be turned into an interaction.
async fn render_rejection(state: &WebState, headers: &HeaderMap, error: &QuoteError) -> Response {
    let session = state
        .sessions
        .acquire(parsing::session_id_from_headers(headers))
        .await;
    let session_id = session.id();

    let mut model = page_for_session(&state.ctx, &session);
    state.sessions.release(session).await;
    model.error = Some(helpers::user_message(error));
    helpers::page_response(helpers::status_for(error), session_id, render_page(&model))
}

fn page_for_session(ctx: &AppContext, session: &SessionState) -> PageModel {
    PageModel {
        client_name: session.client_name.clone(),
        goal: session.goal,
        preview: current_preview(session),
        ..PageModel::new(ctx.max_files)
    }
}
