//! Diagnosis configuration
//!
//! Config file: ~/.config/robodiag/config.toml or /etc/robodiag/config.toml.
//! The `API_KEY` environment variable overrides the credential from either.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the service credential
pub const API_KEY_ENV: &str = "API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the diagnosis requester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    /// Generative-language API key. Absent means analysis is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative-language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request deadline. None leaves the call unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

impl DiagnosisConfig {
    /// Get default user config path: ~/.config/robodiag/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("robodiag").join("config.toml"))
    }

    /// Get system config path: /etc/robodiag/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/robodiag/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. User config (~/.config/robodiag/config.toml)
    /// 3. System config (/etc/robodiag/config.toml)
    /// 4. Defaults
    ///
    /// `API_KEY` from the environment is applied on top.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file_layer(explicit)?;
        config.apply_env_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    fn load_file_layer(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::from_file(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::from_file(&system_path);
        }

        Ok(Self::default())
    }

    /// Read and parse one TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: DiagnosisConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Override the credential with an environment value, if non-empty
    pub fn apply_env_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Credential, ignoring empty or whitespace-only values
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }
}
