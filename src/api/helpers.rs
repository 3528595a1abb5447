//! Response builders shared by the page handlers.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};
use uuid::Uuid;

use super::CANONICAL_FAILURE_MESSAGE;
use crate::core::session::SESSION_COOKIE;
use crate::errors::QuoteError;

#[must_use]
pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// HTML page response that also (re)sets the session cookie.
#[must_use]
pub fn page_response(status: StatusCode, session_id: Uuid, body: String) -> Response {
    let mut response = (status, Html(body)).into_response();
    if let Ok(cookie) = HeaderValue::from_str(&session_cookie(session_id)) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

#[must_use]
pub fn status_for(error: &QuoteError) -> StatusCode {
    match error {
        QuoteError::UploadLimitExceeded { .. }
        | QuoteError::NoDocuments
        | QuoteError::ParseError(_) => StatusCode::BAD_REQUEST,
        QuoteError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        QuoteError::ExtractionError { .. } | QuoteError::FeedbackError(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        QuoteError::OpenAIError(_) | QuoteError::HttpError(_) => StatusCode::BAD_GATEWAY,
        QuoteError::ConfigError(_) | QuoteError::InternalError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// The message to put in the page's error banner, logging the error on the way.
#[must_use]
pub fn user_message(error: &QuoteError) -> String {
    if error.is_user_facing() {
        warn!("Interaction rejected: {}", error);
        error.to_string()
    } else {
        error!("Interaction failed: {}", error);
        CANONICAL_FAILURE_MESSAGE.to_string()
    }
}
