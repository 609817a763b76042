//! Robodiag Common - robot data model and AI-assisted diagnosis
//!
//! The simulation/UI layer owns the robot state and its log; this crate
//! only reads snapshots of them, formats a prompt, and asks a hosted
//! text-generation service for a one-paragraph diagnosis.

pub mod config;
pub mod diagnosis;
pub mod llm_client;
pub mod number_format;
pub mod prompts;
pub mod types;

pub use config::DiagnosisConfig;
pub use diagnosis::{
    DiagnosisError, DiagnosisRequester, CALL_FAILURE_MESSAGE, EMPTY_RESULT_MESSAGE,
    MISSING_KEY_MESSAGE,
};
pub use llm_client::{FakeTextGenerator, GeminiClient, GenerationRequest, LlmError, TextGenerator};
pub use prompts::{DiagnosisPrompt, DIAGNOSIS_SYSTEM_PROMPT, RECENT_LOG_LIMIT};
pub use types::*;
