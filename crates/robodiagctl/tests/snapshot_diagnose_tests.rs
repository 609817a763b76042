//! Tests for snapshot loading and the diagnose command

use robodiag_common::{DiagnosisConfig, Direction, LogKind, CALL_FAILURE_MESSAGE};
use robodiagctl::commands::{diagnose, load_snapshot, render_prompt};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_snapshot(value: serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", value).unwrap();
    file
}

fn ui_snapshot() -> serde_json::Value {
    json!({
        "logs": [
            {"timestamp": "09:14:02", "message": "Walking started", "type": "control"},
            {"timestamp": "09:14:09", "message": "Obstacle near Pillar 1", "type": "warn"}
        ],
        "state": {
            "x": 31.5, "y": 28.0,
            "speed": 0.8123, "targetSpeed": 1.5,
            "direction": "UP",
            "battery": 42.25,
            "steps": 118,
            "isFallen": false, "hasBox": true,
            "leftArmAngle": 150, "rightArmAngle": 30,
            "path": [{"x": 50, "y": 50}, {"x": 31.5, "y": 28.0}]
        }
    })
}

#[test]
fn test_load_ui_snapshot() {
    let file = write_snapshot(ui_snapshot());
    let snapshot = load_snapshot(Some(file.path())).unwrap();

    assert_eq!(snapshot.logs.len(), 2);
    assert_eq!(snapshot.logs[0].kind, LogKind::Control);
    assert_eq!(snapshot.state.direction, Direction::Up);
    assert_eq!(snapshot.state.steps, 118);
    assert!(snapshot.state.has_box);
    assert_eq!(snapshot.state.path.len(), 2);
}

#[test]
fn test_load_snapshot_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_snapshot(Some(dir.path().join("missing.json").as_path())).unwrap_err();
    assert!(err.to_string().contains("Failed to read snapshot"));

    let bad = write_snapshot(json!({"state": {"direction": "SIDEWAYS"}}));
    let err = load_snapshot(Some(bad.path())).unwrap_err();
    assert!(err.to_string().contains("Failed to parse snapshot"));
}

#[test]
fn test_prompt_for_ui_snapshot() {
    let file = write_snapshot(ui_snapshot());
    let snapshot = load_snapshot(Some(file.path())).unwrap();
    let text = render_prompt(&DiagnosisConfig::default(), &snapshot);

    assert!(text.contains("[09:14:09] Obstacle near Pillar 1"));
    assert!(text.contains("Actual Speed: 0.81 m/s"));
    // 42.25 is an exact tie and rounds up
    assert!(text.contains("Battery: 42.3%"));
    assert!(text.contains("Direction: UP"));
    assert!(text.contains("Cargo Status: Carrying Box"));
}

#[tokio::test]
async fn test_diagnose_snapshot_against_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "Diagnosis: low battery while carrying cargo."}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = DiagnosisConfig {
        api_key: Some("k".to_string()),
        endpoint: format!("{}/v1beta", server.uri()),
        ..Default::default()
    };
    let file = write_snapshot(ui_snapshot());
    let snapshot = load_snapshot(Some(file.path())).unwrap();

    assert_eq!(
        diagnose(&config, &snapshot).await,
        "Diagnosis: low battery while carrying cargo."
    );
}

#[tokio::test]
async fn test_diagnose_service_failure_prints_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = DiagnosisConfig {
        api_key: Some("k".to_string()),
        endpoint: format!("{}/v1beta", server.uri()),
        ..Default::default()
    };
    let snapshot = load_snapshot(None).unwrap();

    assert_eq!(diagnose(&config, &snapshot).await, CALL_FAILURE_MESSAGE);
}
