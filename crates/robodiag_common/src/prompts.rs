//! Diagnosis prompt construction
//!
//! Turns the recent log tail and a robot state snapshot into the system
//! instruction + user message pair sent to the text-generation service.
//! Pure formatting: inputs are only borrowed.

use crate::number_format::{to_fixed, to_shortest};
use crate::types::{LogEntry, RobotState};
use serde::{Deserialize, Serialize};

/// How many trailing log entries go into the prompt
pub const RECENT_LOG_LIMIT: usize = 20;

pub const DIAGNOSIS_SYSTEM_PROMPT: &str = "You are the Bosch Robot Diagnosis Expert. \
Analyze the provided system logs and current robot state. \
Provide a concise, single-paragraph summary of any issues found (even minor ones) \
and give one specific, actionable recommendation to improve performance or address a concern. \
Start with 'Diagnosis:'";

const USER_QUERY_PREAMBLE: &str = "Analyze the following system logs and current robot status:";

/// System instruction and user message for one diagnosis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisPrompt {
    pub system: String,
    pub user: String,
}

impl DiagnosisPrompt {
    pub fn build(logs: &[LogEntry], state: &RobotState) -> Self {
        Self {
            system: DIAGNOSIS_SYSTEM_PROMPT.to_string(),
            user: build_user_query(logs, state),
        }
    }
}

/// Last `RECENT_LOG_LIMIT` entries as `[timestamp] message`, oldest first
pub fn format_recent_logs(logs: &[LogEntry]) -> String {
    let start = logs.len().saturating_sub(RECENT_LOG_LIMIT);
    logs[start..]
        .iter()
        .map(|entry| format!("[{}] {}", entry.timestamp, entry.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Labeled state block, one field per line
pub fn format_state_summary(state: &RobotState) -> String {
    let lines = [
        format!("Target Speed: {} m/s", to_shortest(state.target_speed)),
        format!("Actual Speed: {} m/s", to_fixed(state.speed, 2)),
        format!("Battery: {}%", to_fixed(state.battery, 1)),
        format!("Steps: {}", state.steps),
        format!("Direction: {}", state.direction),
        format!(
            "Fallen Status: {}",
            if state.is_fallen { "YES" } else { "NO" }
        ),
        format!(
            "Cargo Status: {}",
            if state.has_box { "Carrying Box" } else { "No Box" }
        ),
    ];
    lines.join("\n")
}

pub fn build_user_query(logs: &[LogEntry], state: &RobotState) -> String {
    format!(
        "{}\n\n--- Logs ---\n{}\n\n--- Current State ---\n{}",
        USER_QUERY_PREAMBLE,
        format_recent_logs(logs),
        format_state_summary(state)
    )
}
