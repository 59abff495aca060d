//! Observability subsystem for type-checker
//!
//! This module provides:
//! - Structured logging (JSON lines)
//! - Typed events for construction warnings and batch faults
//! - A process-wide severity threshold
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logging never changes a validation result
//! 3. No async or background threads
//!
//! # Usage
//!
//! ```ignore
//! use type_checker::observability::{Event, Logger};
//!
//! Logger::warn(Event::OneOfInvalidArgument, &[("message", "expected an array")]);
//! ```

mod config;
mod events;
mod logger;

pub use config::{LoggerConfig, LOG_ENV_VAR};
pub use events::Event;
pub use logger::{Logger, Severity};

#[cfg(test)]
pub(crate) use logger::capture_logs;

use thiserror::Error;

/// Observability errors. Never fatal to validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservabilityError {
    #[error("Invalid logger configuration: {0}")]
    InvalidConfig(String),

    #[error("Logger threshold already resolved; configure before the first log call")]
    AlreadyConfigured,
}

impl ObservabilityError {
    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            ObservabilityError::InvalidConfig(_) => "TYPE_CHECKER_LOG_CONFIG_INVALID",
            ObservabilityError::AlreadyConfigured => "TYPE_CHECKER_LOG_ALREADY_CONFIGURED",
        }
    }
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
