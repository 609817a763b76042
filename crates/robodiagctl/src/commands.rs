//! Command implementations

use anyhow::{Context, Result};
use robodiag_common::{
    initial_box, obstacles, BoxState, DiagnosisConfig, DiagnosisRequester, DiagnosisSnapshot,
    Obstacle, RobotState,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a snapshot file, or start from the initial state with no logs
pub fn load_snapshot(path: Option<&Path>) -> Result<DiagnosisSnapshot> {
    let Some(path) = path else {
        return Ok(DiagnosisSnapshot::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot: DiagnosisSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    Ok(snapshot)
}

/// Run one diagnosis; placeholder strings are returned, not raised
pub async fn diagnose(config: &DiagnosisConfig, snapshot: &DiagnosisSnapshot) -> String {
    let requester = DiagnosisRequester::from_config(config);
    if requester.is_configured() {
        info!(
            "Diagnosing {} log entries with {}",
            snapshot.logs.len(),
            requester.model()
        );
    }
    requester.analyze(&snapshot.logs, &snapshot.state).await
}

/// The request a diagnosis would send, without sending it
pub fn render_prompt(config: &DiagnosisConfig, snapshot: &DiagnosisSnapshot) -> String {
    let prompt = DiagnosisRequester::from_config(config).prompt(&snapshot.logs, &snapshot.state);
    format!(
        "--- Model ---\n{}\n\n--- System Instruction ---\n{}\n\n--- User Message ---\n{}",
        config.model, prompt.system, prompt.user
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitialWorld {
    robot: RobotState,
    obstacles: Vec<Obstacle>,
    cargo_box: BoxState,
}

/// Startup robot state, obstacles and cargo box as pretty JSON
pub fn initial_state_json() -> Result<String> {
    let world = InitialWorld {
        robot: RobotState::initial(),
        obstacles: obstacles(),
        cargo_box: initial_box(),
    };
    serde_json::to_string_pretty(&world).context("Failed to serialize initial state")
}
