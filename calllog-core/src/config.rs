//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/calllog-export/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/calllog-export/` (~/.config/calllog-export/)
//! - State/Logs: `$XDG_STATE_HOME/calllog-export/` (~/.local/state/calllog-export/)

use crate::error::{Error, Result};
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "calllog-export";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where call records are read from
    #[serde(default)]
    pub source: SourceConfig,

    /// Collector endpoint
    #[serde(default)]
    pub upload: UploadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Record source configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SourceConfig {
    /// Call-log database (`.db`/`.sqlite`) or JSON lines export
    pub path: Option<PathBuf>,
}

/// Collector upload configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Collector URL the payload is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP request timeout in seconds (transport default when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

/// Host loopback as seen from the Android emulator
fn default_endpoint() -> String {
    "http://10.0.2.2:8080".to_string()
}

impl UploadConfig {
    /// Build a config for an explicit endpoint
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Parse and check the endpoint URL
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            Error::Config(format!("invalid upload.endpoint {:?}: {}", self.endpoint, e))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config(format!(
                    "upload.endpoint must use http or https, got {:?}",
                    other
                )))
            }
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(Error::Config(format!(
                "upload.endpoint {:?} has no host",
                self.endpoint
            )));
        }

        Ok(url)
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;
        if self.timeout_secs == Some(0) {
            return Err(Error::Config(
                "upload.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/calllog-export/config.toml`
    pub fn config_path() -> PathBuf {
        xdg_config_home().join(APP_DIR).join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/calllog-export/`
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join(APP_DIR)
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/calllog-export/calllog-export.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("calllog-export.log")
    }
}
