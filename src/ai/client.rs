//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the chat-completions call that turns quote text into an email summary.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{info, instrument};

use crate::core::config::AppConfig;
use crate::core::models::SummaryRequest;
use crate::errors::QuoteError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// A hosted text-generation endpoint that returns one completion per request.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the raw text of the first completion.
    ///
    /// # Errors
    ///
    /// Any transport, authentication, rate-limit or response-shape failure.
    async fn complete(&self, request: &SummaryRequest) -> Result<String, QuoteError>;
}

/// LLM API client for generating summaries
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        base_url: String,
    ) -> Result<Self, QuoteError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                QuoteError::HttpError(format!("Failed to build OpenAI HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_key,
            org_id,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, QuoteError> {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
        )
    }

    /// One system message followed by one user message.
    #[must_use]
    pub fn build_prompt(request: &SummaryRequest) -> Vec<ChatCompletionMessage> {
        vec![
            ChatCompletionMessage {
                role: MessageRole::system,
                content: Content::Text(request.system_instruction.clone()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
            ChatCompletionMessage {
                role: MessageRole::user,
                content: Content::Text(request.user_message.clone()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
        ]
    }

    /// Request body for `POST {base_url}/chat/completions`.
    #[must_use]
    pub fn build_request_body(&self, request: &SummaryRequest) -> Value {
        let messages = build_chat_messages(&Self::build_prompt(request));
        json!({
            "model": self.model_name,
            "messages": messages,
            "temperature": request.temperature,
        })
    }

    fn headers(&self) -> Result<HeaderMap, QuoteError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| QuoteError::HttpError(format!("Invalid Authorization header: {e}")))?;
        headers.insert(AUTHORIZATION, auth_value);

        if let Some(org) = &self.org_id {
            let org_value = org.parse().map_err(|e| {
                QuoteError::HttpError(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert(HeaderName::from_static("openai-organization"), org_value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    #[instrument(level = "info", skip_all)]
    async fn complete(&self, request: &SummaryRequest) -> Result<String, QuoteError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{}", request.user_message);

        info!(
            model = %self.model_name,
            "Estimated input tokens: {}",
            estimate_tokens(&request.system_instruction) + estimate_tokens(&request.user_message)
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .headers(self.headers()?)
            .json(&self.build_request_body(request))
            .send()
            .await
            .map_err(|e| QuoteError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(QuoteError::OpenAIError(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            QuoteError::OpenAIError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        let text = first_choice_text(&response_json)
            .ok_or_else(|| QuoteError::OpenAIError("No text in response".to_string()))?;

        info!(chars = text.chars().count(), "Received completion");
        Ok(text)
    }
}

/// Chat-completions `messages` array from typed prompt messages.
pub(crate) fn build_chat_messages(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter_map(|m| {
            let role_str = match m.role {
                MessageRole::system => "system",
                MessageRole::user => "user",
                MessageRole::assistant => "assistant",
                MessageRole::function => "function",
                MessageRole::tool => "tool",
            };

            match &m.content {
                Content::Text(text) => Some(json!({ "role": role_str, "content": text })),
                // Summaries are text only
                Content::ImageUrl(_) => None,
            }
        })
        .collect()
}

/// `choices[0].message.content`, if present and not blank.
#[must_use]
pub fn first_choice_text(response: &Value) -> Option<String> {
    response
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(std::string::ToString::to_string)
}
