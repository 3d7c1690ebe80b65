//! Crate settings
//!
//! Settings are loaded from environment variables with fallback defaults:
//!
//! - `AGENTCONF_FEATURE_TRACKING`: report feature usage (true|false) - default: "true"
//! - `AGENTCONF_LOG_LEVEL`: logging level - default: "info"
//! - `AGENTCONF_LOG_JSON`: JSON log output (true|false) - default: "false"
//!
//! `TrackingConfig::default()` silently falls back to the default for values
//! that do not parse; `TrackingConfig::from_env()` reports them.

use crate::util::logging::{parse_level, LoggingConfig};
use std::env;
use std::fmt;
use std::str::ParseBoolError;
use thiserror::Error;

pub const ENV_FEATURE_TRACKING: &str = "AGENTCONF_FEATURE_TRACKING";
pub const ENV_LOG_LEVEL: &str = "AGENTCONF_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "AGENTCONF_LOG_JSON";

const DEFAULT_FEATURE_TRACKING: bool = true;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_JSON: bool = false;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingConfig {
    /// Extract and report feature usage
    pub feature_tracking: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        let feature_tracking = env::var(ENV_FEATURE_TRACKING)
            .ok()
            .and_then(|v| parse_bool(&v).ok())
            .unwrap_or(DEFAULT_FEATURE_TRACKING);

        let log_level = env::var(ENV_LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var(ENV_LOG_JSON)
            .ok()
            .and_then(|v| parse_bool(&v).ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        Self {
            feature_tracking,
            log_level,
            log_json,
        }
    }
}

impl TrackingConfig {
    /// Loads settings from the environment, failing on values that do not parse
    /// or do not validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            feature_tracking: parse_bool_var(ENV_FEATURE_TRACKING, DEFAULT_FEATURE_TRACKING)?,
            log_level: env::var(ENV_LOG_LEVEL)
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
            log_json: parse_bool_var(ENV_LOG_JSON, DEFAULT_LOG_JSON)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Subscriber settings matching this configuration.
    pub fn logging_config(&self) -> LoggingConfig {
        let base = if self.log_json {
            LoggingConfig::production()
        } else {
            LoggingConfig::default()
        };
        LoggingConfig {
            level: parse_level(&self.log_level),
            ..base
        }
    }
}

/// Case-insensitive, whitespace-tolerant `true`/`false`
fn parse_bool(value: &str) -> Result<bool, ParseBoolError> {
    value.trim().to_lowercase().parse::<bool>()
}

fn parse_bool_var(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(value) => parse_bool(&value).map_err(|e| ConfigError::ParseError {
            field: key.to_string(),
            error: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

impl fmt::Display for TrackingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Agentconf Configuration:")?;
        writeln!(f, "  Feature Tracking: {}", self.feature_tracking)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        Ok(())
    }
}
