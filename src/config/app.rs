//! Main application configuration
//!
//! This module defines the configuration structures for the chat-ladder service,
//! including TOML file loading, environment variable overrides and validation.

use crate::error::LadderError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Upper bound on the final snapshot flush, in seconds
    pub shutdown_timeout_seconds: u64,
}

/// Snapshot persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON snapshot holding every chat's ratings
    pub snapshot_path: PathBuf,
    /// Write the snapshot once more when the service stops
    pub save_on_shutdown: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "chat-ladder".to_string(),
            log_level: "info".to_string(),
            shutdown_timeout_seconds: 5,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("ratings.json"),
            save_on_shutdown: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Override fields from any of the recognised environment variables that are set
    pub fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            self.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Storage settings
        if let Ok(path) = env::var("SNAPSHOT_PATH") {
            self.storage.snapshot_path = PathBuf::from(path);
        }
        if let Ok(save) = env::var("SAVE_ON_SHUTDOWN") {
            self.storage.save_on_shutdown = save
                .parse()
                .map_err(|_| anyhow!("Invalid SAVE_ON_SHUTDOWN value: {}", save))?;
        }

        Ok(())
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<(), LadderError> {
    let invalid = |message: String| Err(LadderError::ConfigurationError { message });

    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return invalid(format!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.shutdown_timeout_seconds == 0 {
        return invalid("Shutdown timeout must be greater than 0".to_string());
    }

    if config.storage.snapshot_path.as_os_str().is_empty() {
        return invalid("Snapshot path cannot be empty".to_string());
    }

    Ok(())
}
