use axum::extract::Multipart;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::core::models::{Goal, UploadedDocument};
use crate::core::session::SESSION_COOKIE;
use crate::errors::QuoteError;
use crate::features::{GenerateInput, PreviewInput};

/// Session id from the `Cookie` header(s), if present and well formed.
#[must_use]
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            if name.trim() == SESSION_COOKIE {
                Uuid::parse_str(value.trim()).ok()
            } else {
                None
            }
        })
}

/// Unknown or missing goal values fall back to the default goal.
#[must_use]
pub fn parse_goal(raw: Option<&str>) -> Goal {
    raw.and_then(Goal::from_value).unwrap_or_default()
}

/// Reads the upload form: repeated `files` parts plus `client_name` and `goal`.
///
/// Empty file parts (a picker left blank) are skipped, so they do not count
/// towards the upload limit.
///
/// # Errors
///
/// Returns [`QuoteError::ParseError`] if the multipart body is malformed.
pub async fn read_generate_form(mut multipart: Multipart) -> Result<GenerateInput, QuoteError> {
    let mut documents = Vec::new();
    let mut client_name = String::new();
    let mut goal = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(std::string::ToString::to_string);

        match field_name.as_deref() {
            Some("files") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let media_type = field.content_type().map(std::string::ToString::to_string);
                let bytes = field.bytes().await?;
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                debug!(filename = %filename, size = bytes.len(), "Received upload");
                documents.push(UploadedDocument::new(filename, media_type, bytes.to_vec()));
            }
            Some("client_name") => {
                client_name = field.text().await?;
            }
            Some("goal") => {
                goal = Some(field.text().await?);
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    Ok(GenerateInput {
        documents,
        client_name,
        goal: parse_goal(goal.as_deref()),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewForm {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub goal: Option<String>,
}

impl From<PreviewForm> for PreviewInput {
    fn from(form: PreviewForm) -> Self {
        PreviewInput {
            client_name: form.client_name,
            goal: parse_goal(form.goal.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_id_from_cookie_header() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; other=1")).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_session_id_missing_or_malformed() {
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}=not-a-uuid")).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn test_parse_goal_falls_back_to_default() {
        assert_eq!(parse_goal(Some("best_coverage")), Goal::BestCoverage);
        assert_eq!(parse_goal(Some(" balanced_value ")), Goal::BalancedValue);
        assert_eq!(parse_goal(Some("cheapest")), Goal::LowestPrice);
        assert_eq!(parse_goal(None), Goal::LowestPrice);
    }
}
