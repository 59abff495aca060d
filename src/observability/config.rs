//! Logger configuration
//!
//! The threshold is resolved once per process: either installed explicitly
//! with [`Logger::configure`](super::Logger::configure) before the first log
//! call, or read from the `TYPE_CHECKER_LOG` environment variable.
//!
//! ```bash
//! TYPE_CHECKER_LOG=off cargo test
//! ```

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::logger::{Logger, Severity};
use super::{ObservabilityError, ObservabilityResult};

/// Environment variable holding the minimum severity (or `off`).
pub const LOG_ENV_VAR: &str = "TYPE_CHECKER_LOG";

/// Cached threshold; `None` disables logging entirely
static THRESHOLD: OnceLock<Option<Severity>> = OnceLock::new();

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum severity written (optional, default warn). `None` = off.
    #[serde(default = "default_min_severity")]
    pub min_severity: Option<Severity>,
}

fn default_min_severity() -> Option<Severity> {
    Some(Severity::Warn)
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_severity: default_min_severity(),
        }
    }
}

impl LoggerConfig {
    /// Logging disabled.
    pub fn off() -> Self {
        Self { min_severity: None }
    }

    /// Parse the value of [`LOG_ENV_VAR`].
    pub fn from_env_value(raw: &str) -> ObservabilityResult<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("off") || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Self::off());
        }
        let severity = Severity::parse(trimmed).ok_or_else(|| {
            ObservabilityError::InvalidConfig(format!(
                "{}='{}' is not one of trace, info, warn, error, fatal, off",
                LOG_ENV_VAR, raw
            ))
        })?;
        Ok(Self {
            min_severity: Some(severity),
        })
    }

    /// Read the configuration from the environment, falling back to defaults
    /// when the variable is unset or unparseable.
    pub fn from_env() -> Self {
        std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|raw| Self::from_env_value(&raw).ok())
            .unwrap_or_default()
    }

    /// Load configuration from JSON text.
    pub fn from_json(text: &str) -> ObservabilityResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| ObservabilityError::InvalidConfig(format!("Invalid logger config JSON: {}", e)))
    }
}

impl Logger {
    /// Install a configuration. Fails if the threshold was already resolved.
    pub fn configure(config: LoggerConfig) -> ObservabilityResult<()> {
        THRESHOLD
            .set(config.min_severity)
            .map_err(|_| ObservabilityError::AlreadyConfigured)
    }
}

/// Current threshold, resolving it from the environment on first use.
pub(super) fn threshold() -> Option<Severity> {
    *THRESHOLD.get_or_init(|| LoggerConfig::from_env().min_severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_warn() {
        assert_eq!(LoggerConfig::default().min_severity, Some(Severity::Warn));
    }

    #[test]
    fn test_env_value_parsing() {
        assert_eq!(
            LoggerConfig::from_env_value("error").unwrap().min_severity,
            Some(Severity::Error)
        );
        assert_eq!(LoggerConfig::from_env_value("OFF").unwrap(), LoggerConfig::off());
        assert!(LoggerConfig::from_env_value("loud").is_err());
    }

    #[test]
    fn test_json_config_defaults() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());

        let config = LoggerConfig::from_json(r#"{"min_severity": "trace"}"#).unwrap();
        assert_eq!(config.min_severity, Some(Severity::Trace));

        let config = LoggerConfig::from_json(r#"{"min_severity": null}"#).unwrap();
        assert_eq!(config, LoggerConfig::off());

        assert!(LoggerConfig::from_json(r#"{"min_severity": "loud"}"#).is_err());
    }
}
