//! HTTP client for the Gemini `generateContent` endpoint.

use crate::config::Config;
use crate::dispatch::{ChatBackend, DispatchError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Public Generative Language API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Request payload: one content entry holding one text part.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text }],
            }],
        }
    }
}

/// Subset of the response body we read.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Pull the reply text out of a decoded body.
///
/// Only `candidates[0].content.parts[0].text` counts. Anything else,
/// including a safety-blocked prompt or an empty string, is a shape error.
fn extract_reply(response: GenerateResponse) -> Result<String, DispatchError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        warn!(%reason, "prompt was blocked by the service");
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| DispatchError::Shape("no candidates".into()))?;

    if let Some(reason) = &candidate.finish_reason {
        debug!(%reason, "candidate finish reason");
    }

    let text = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| DispatchError::Shape("first candidate has no text part".into()))?;

    if text.is_empty() {
        return Err(DispatchError::Shape("first candidate text is empty".into()));
    }
    Ok(text)
}

/// Parse a raw response body into the reply text.
pub fn parse_reply(body: &str) -> Result<String, DispatchError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| DispatchError::Shape(e.to_string()))?;
    extract_reply(response)
}

/// A [`ChatBackend`] that posts each prompt to Gemini.
///
/// The API key travels as the `key` query parameter. An empty key is sent
/// as-is and comes back from the service as an authentication failure.
pub struct GeminiClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for `model` at `base_url`.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, DispatchError> {
        let model = model.into();
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        );

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url,
            api_key: api_key.into(),
            model,
        })
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self, DispatchError> {
        Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.model.clone(),
            &config.base_url,
            config.request_timeout(),
        )
    }

    /// Endpoint URL without the key.
    pub fn endpoint(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, DispatchError> {
        debug!(url = %self.url, "sending generateContent request");

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::new(prompt))
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "generateContent returned an error status");
            return Err(DispatchError::Status(status.as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DispatchError::Shape(e.without_url().to_string()))?;
        extract_reply(body)
    }
}
