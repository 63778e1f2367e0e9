// src/ai/gemini.rs
//! Gemini text generation over the Generative Language REST API.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::backend::{BackendError, TextBackend};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Longest raw error body quoted back to the user.
const MAX_QUOTED_BODY: usize = 500;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResponseCandidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    message: String,
    status: Option<String>,
}

/// Joins the text parts of the first candidate.
pub fn extract_text(response: GenerateContentResponse) -> Result<String, BackendError> {
    let block_reason = response
        .prompt_feedback
        .and_then(|f| f.block_reason);
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(match block_reason {
            Some(reason) => BackendError::new(format!("empty response (prompt blocked: {})", reason)),
            None => BackendError::new("empty response (no candidates)"),
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(BackendError::new(format!("empty response (finish reason: {})", reason)));
    }
    Ok(text)
}

/// Builds the error detail for a non-success HTTP status.
///
/// Keeps the numeric status and the API status name in the text so the
/// classifier can see markers like `429` or `NOT_FOUND`.
pub fn describe_http_failure(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return match envelope.error.status {
            Some(api_status) => format!("{}. {}: {}", status, api_status, envelope.error.message),
            None => format!("{}. {}", status, envelope.error.message),
        };
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        let quoted: String = trimmed.chars().take(MAX_QUOTED_BODY).collect();
        format!("{}. {}", status, quoted)
    }
}

pub struct GeminiBackend {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiBackend {
    /// Must be called outside the Tokio runtime; the blocking client owns one.
    pub fn new(api_key: Option<String>) -> Result<Self, BackendError> {
        Self::with_base_url(api_key, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl TextBackend for GeminiBackend {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(BackendError::new("API key not set"));
        };
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::new(prompt))
            .send()
            .map_err(|e| BackendError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BackendError::new(describe_http_failure(status, &body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| BackendError::new(format!("Failed to parse response: {}", e)))?;
        extract_text(parsed)
    }
}

/// Stand-in used when the HTTP client itself could not be created.
pub struct UnavailableBackend {
    pub reason: String,
}

impl TextBackend for UnavailableBackend {
    fn generate(&self, _model: &str, _prompt: &str) -> Result<String, BackendError> {
        Err(BackendError::new(self.reason.clone()))
    }
}
