//! Generation backend client.
//!
//! One request/response call against the Gemini `generateContent` endpoint.
//! The client is deliberately infallible from the pipeline's point of view:
//! any failure is logged with whatever diagnostics the backend returned and
//! replaced by a fixed clarification fallback, so backend instability never
//! leaks into pipeline control flow.

use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::format::normalize_reply;
use crate::prompts::{FALLBACK_CLARIFY, FALLBACK_EMPTY, SYSTEM_PROMPT};
use async_trait::async_trait;
use serde::Deserialize;

/// Source of generated replies. Implementations must always produce a
/// user-presentable string, never an error.
#[async_trait]
pub trait ReplyBackend: Send + Sync + 'static {
    async fn generate(&self, question: &str) -> String;
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl GeminiClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    async fn request(&self, question: &str) -> Result<Option<String>, BackendError> {
        let url = format!(
            "{}/v1/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.config.api_key,
        );

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("{SYSTEM_PROMPT}\nUsuário: {question}") }],
            }],
        });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        let response: GenerateResponse = response.json().await?;
        Ok(first_candidate_text(response))
    }
}

#[async_trait]
impl ReplyBackend for GeminiClient {
    async fn generate(&self, question: &str) -> String {
        match self.request(question).await {
            Ok(Some(text)) => normalize_reply(&text),
            // A well-formed response with no text still gets a human answer.
            Ok(None) => FALLBACK_EMPTY.to_string(),
            Err(error) => {
                tracing::error!(%error, "backend request failed");
                FALLBACK_CLARIFY.to_string()
            }
        }
    }
}

/// `generateContent` response shape, reduced to the fields this crate reads.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// First candidate's first text part, if any.
fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}
