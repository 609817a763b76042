//! Robot data model
//!
//! Passive shapes shared with the simulation/UI layer: log entries, the
//! robot state snapshot, and the static environment (obstacles, cargo box).
//! Field names serialize in camelCase so exported snapshots load as-is.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the simulation floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed obstacle on the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub label: String,
}

/// The cargo box the robot can pick up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxState {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub label: String,
}

/// Drive direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Stop,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Stop => "STOP",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log entry category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    #[default]
    Info,
    Warn,
    Error,
    Success,
    Control,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Warn => "warn",
            LogKind::Error => "error",
            LogKind::Success => "success",
            LogKind::Control => "control",
        }
    }
}

/// One line of the robot's system log
///
/// Entries are immutable once created. The owning sequence is kept in
/// insertion order, which is also chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: LogKind,
}

impl LogEntry {
    /// Create an entry stamped with the local wall-clock time (HH:MM:SS)
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
            kind,
        }
    }

    /// Create an entry with an explicit timestamp
    pub fn at(timestamp: impl Into<String>, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
            kind,
        }
    }
}

/// Point-in-time snapshot of the simulated robot
///
/// Owned and mutated by the simulation; diagnosis only ever borrows it.
/// Battery is a percentage (0-100 expected, not validated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotState {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub target_speed: f64,
    pub direction: Direction,
    pub battery: f64,
    pub steps: u64,
    pub is_fallen: bool,
    pub has_box: bool,
    pub left_arm_angle: f64,
    pub right_arm_angle: f64,
    pub path: Vec<Coordinate>,
}

impl RobotState {
    /// State the simulation starts from
    pub fn initial() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            speed: 0.0,
            target_speed: 1.5,
            direction: Direction::Stop,
            battery: 87.5,
            steps: 0,
            is_fallen: false,
            has_box: false,
            left_arm_angle: 180.0,
            right_arm_angle: 0.0,
            path: vec![Coordinate::new(50.0, 50.0)],
        }
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

impl Default for RobotState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Obstacles placed on the floor at startup
pub fn obstacles() -> Vec<Obstacle> {
    vec![
        Obstacle {
            x: 30.0,
            y: 30.0,
            size: 5.0,
            label: "Pillar 1".to_string(),
        },
        Obstacle {
            x: 75.0,
            y: 60.0,
            size: 8.0,
            label: "Pillar 2".to_string(),
        },
        Obstacle {
            x: 50.0,
            y: 85.0,
            size: 6.0,
            label: "Crate".to_string(),
        },
    ]
}

/// Where the cargo box sits at startup
pub fn initial_box() -> BoxState {
    BoxState {
        x: 15.0,
        y: 70.0,
        size: 5.0,
        label: "Cargo Box".to_string(),
    }
}

/// Logs plus state, as exported by the simulation/UI layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisSnapshot {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub state: RobotState,
}
