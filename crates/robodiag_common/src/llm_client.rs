//! Text-generation client
//!
//! One request in, one optional text out. `GeminiClient` talks to the hosted
//! generative-language API; `FakeTextGenerator` replays scripted answers for
//! tests and offline runs.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

use crate::config::DiagnosisConfig;

/// One generation call: model, system instruction, user content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: String,
    pub contents: String,
}

/// Text-generation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),
}

/// Anything that can turn a request into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// `Ok(None)` means the service answered but produced no text
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError>;
}

/// Client for the hosted generative-language API
pub struct GeminiClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout_secs: Option<u64>,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(client_build_error)?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout_secs,
        })
    }

    /// Build from config. None when no credential is configured.
    pub fn from_config(config: &DiagnosisConfig) -> Option<Result<Self, LlmError>> {
        config
            .credential()
            .map(|key| Self::new(config.endpoint.clone(), key, config.timeout_secs))
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            model
        )
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        match self.timeout_secs {
            Some(secs) if e.is_timeout() => LlmError::Timeout(secs),
            _ => LlmError::HttpError(format!("Request failed: {}", e)),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError> {
        let url = self.generate_url(&request.model);
        debug!(
            "Sending generateContent request: model={} contents={} chars",
            request.model,
            request.contents.len()
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request_body(request))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| LlmError::InvalidJson(format!("Failed to parse response: {}", e)))?;

        let text = extract_text(&json);
        debug!(
            "generateContent answered: {} chars",
            text.as_ref().map(String::len).unwrap_or(0)
        );
        Ok(text)
    }
}

/// Wire body for `models/{model}:generateContent`
pub fn build_request_body(request: &GenerationRequest) -> Value {
    serde_json::json!({
        "systemInstruction": {
            "parts": [{"text": request.system_instruction}],
        },
        "contents": [
            {"role": "user", "parts": [{"text": request.contents}]},
        ],
    })
}

/// Concatenated text parts of the first candidate, skipping thought parts
pub fn extract_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    let mut found = false;
    for part in parts {
        if part.get("thought").and_then(Value::as_bool).unwrap_or(false) {
            continue;
        }
        if let Some(t) = part.get("text").and_then(Value::as_str) {
            text.push_str(t);
            found = true;
        }
    }

    found.then_some(text)
}

fn client_build_error(e: impl std::fmt::Display) -> LlmError {
    LlmError::HttpError(format!("Failed to create HTTP client: {}", e))
}

fn api_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

/// Scripted generator for tests and offline runs
pub struct FakeTextGenerator {
    responses: Mutex<Vec<Result<Option<String>, LlmError>>>,
    call_count: Mutex<usize>,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl FakeTextGenerator {
    /// Create a fake with pre-defined responses, consumed in order.
    /// The last one repeats.
    pub fn new(responses: Vec<Result<Option<String>, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn always_text(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(Some(text.into()))])
    }

    pub fn always_empty() -> Self {
        Self::new(vec![Ok(None)])
    }

    pub fn always_error(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TextGenerator for FakeTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError> {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        *self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(request.clone());

        let mut responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.len() {
            0 => Ok(None),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}
