//! Intake assistant configuration.
//!
//! Lives in `<config dir>/campus-intake/config.toml` unless `--config` or
//! `$INTAKE_CONFIG` points elsewhere. Every field has a default, so a
//! missing file or a partial file is fine.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_DIR_NAME: &str = "campus-intake";
const CONFIG_FILE: &str = "config.toml";

/// Env var naming an explicit config file
pub const ENV_CONFIG_PATH: &str = "INTAKE_CONFIG";
/// Env var overriding `submission.base_url`
pub const ENV_API_URL: &str = "INTAKE_API_URL";
/// Env var overriding `submission.token`
pub const ENV_API_TOKEN: &str = "INTAKE_API_TOKEN";

/// Where and how tickets are submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Base URL of the campus API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Complaint endpoint path, appended to `base_url`
    #[serde(default = "default_path")]
    pub path: String,

    /// Bearer token sent with each submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout (seconds, valid: 1-120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_path() -> String {
    "/complaints".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl SubmissionConfig {
    /// Timeout clamped to the valid range
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.clamp(1, 120)
    }

    /// Full complaint endpoint URL
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_path(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Interactive chat behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Pause before each reply, so the assistant reads as typing
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Print the Online / Reporting Mode status line
    #[serde(default = "default_show_status")]
    pub show_status: bool,
}

fn default_typing_delay_ms() -> u64 {
    600
}

fn default_show_status() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            show_status: default_show_status(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG wins if set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub submission: SubmissionConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl IntakeConfig {
    /// Load from an explicit path, `$INTAKE_CONFIG`, or the default
    /// location, then apply env overrides. A missing file yields defaults;
    /// an unreadable or malformed one is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var(ENV_CONFIG_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|_| config_path()),
        };

        let config = Self::load_from(&path)?;
        Ok(config.with_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_API_TOKEN).ok(),
        ))
    }

    /// Load a specific file without env overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Apply API URL / token overrides; empty values are ignored
    pub fn with_overrides(mut self, api_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.submission.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.submission.token = Some(token);
        }
        self
    }

    /// Copy safe to print: the token is masked
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        if copy.submission.token.is_some() {
            copy.submission.token = Some("********".to_string());
        }
        copy
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Default config file path
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE)
}
