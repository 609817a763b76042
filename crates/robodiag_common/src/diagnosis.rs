//! Robot diagnosis requester
//!
//! Builds a prompt from the recent log tail and a state snapshot, makes one
//! text-generation call, and hands back the diagnosis. `analyze` never fails:
//! a missing credential, a failed call or an empty answer each become a fixed
//! placeholder string. No retries, no caching.

use std::sync::Arc;
use tracing::{debug, error};

use crate::config::DiagnosisConfig;
use crate::llm_client::{GeminiClient, GenerationRequest, LlmError, TextGenerator};
use crate::prompts::DiagnosisPrompt;
use crate::types::{LogEntry, RobotState};

pub const MISSING_KEY_MESSAGE: &str = "API Key not configured. AI Analysis unavailable.";
pub const EMPTY_RESULT_MESSAGE: &str = "No analysis generated.";
pub const CALL_FAILURE_MESSAGE: &str =
    "Error: Could not retrieve AI diagnosis. Check console for details.";

/// Why no diagnosis was produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosisError {
    #[error("API key not configured")]
    ConfigurationMissing,

    #[error("Text generation failed: {0}")]
    CallFailure(#[from] LlmError),

    #[error("Text generation returned no text")]
    EmptyResult,
}

impl DiagnosisError {
    /// Placeholder shown in place of a diagnosis
    pub fn fallback_message(&self) -> &'static str {
        match self {
            DiagnosisError::ConfigurationMissing => MISSING_KEY_MESSAGE,
            DiagnosisError::CallFailure(_) => CALL_FAILURE_MESSAGE,
            DiagnosisError::EmptyResult => EMPTY_RESULT_MESSAGE,
        }
    }
}

#[derive(Clone)]
enum Backend {
    Unconfigured,
    Ready(Arc<dyn TextGenerator>),
    /// Client construction failed; reported on the next analysis
    Failed(LlmError),
}

/// Stateless requester; safe to share and call concurrently
#[derive(Clone)]
pub struct DiagnosisRequester {
    model: String,
    backend: Backend,
}

impl DiagnosisRequester {
    /// Requester backed by the hosted API, or an unconfigured one when the
    /// config carries no credential
    pub fn from_config(config: &DiagnosisConfig) -> Self {
        Self {
            model: config.model.clone(),
            backend: match GeminiClient::from_config(config) {
                None => Backend::Unconfigured,
                Some(Ok(client)) => Backend::Ready(Arc::new(client)),
                Some(Err(e)) => Backend::Failed(e),
            },
        }
    }

    pub fn with_generator(model: impl Into<String>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            model: model.into(),
            backend: Backend::Ready(generator),
        }
    }

    /// Requester with no credential; every analysis short-circuits
    pub fn unconfigured() -> Self {
        Self {
            model: crate::config::DEFAULT_MODEL.to_string(),
            backend: Backend::Unconfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self.backend, Backend::Unconfigured)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The exact system instruction and user message a call would send
    pub fn prompt(&self, logs: &[LogEntry], state: &RobotState) -> DiagnosisPrompt {
        DiagnosisPrompt::build(logs, state)
    }

    /// Diagnose, keeping the failure kind
    pub async fn try_analyze(
        &self,
        logs: &[LogEntry],
        state: &RobotState,
    ) -> Result<String, DiagnosisError> {
        let generator = match &self.backend {
            Backend::Unconfigured => return Err(DiagnosisError::ConfigurationMissing),
            Backend::Failed(e) => return Err(DiagnosisError::CallFailure(e.clone())),
            Backend::Ready(generator) => generator,
        };

        let prompt = self.prompt(logs, state);
        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: prompt.system,
            contents: prompt.user,
        };

        debug!(
            "Requesting diagnosis from {} ({} log entries)",
            self.model,
            logs.len()
        );

        match generator.generate(&request).await? {
            // Whitespace-only output is not a diagnosis
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(DiagnosisError::EmptyResult),
        }
    }

    /// Diagnose; failures come back as the matching placeholder string
    pub async fn analyze(&self, logs: &[LogEntry], state: &RobotState) -> String {
        match self.try_analyze(logs, state).await {
            Ok(text) => text,
            Err(err) => {
                if let DiagnosisError::CallFailure(cause) = &err {
                    error!("Diagnosis request failed: {}", cause);
                }
                err.fallback_message().to_string()
            }
        }
    }
}
