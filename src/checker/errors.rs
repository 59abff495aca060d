//! Failure values and fault types
//!
//! Two classes of outcome must not be conflated:
//! - [`PropTypeError`] returned as `Ok(Some(..))`: a value did not match.
//! - [`Fault`] / [`CheckError`]: the checker tree or the call is malformed.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error class a failure reports itself as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A type mismatch reported by a checker rule
    Error,
    /// A required value is `null` or `undefined`
    TypeError,
    /// A checker was misused (direct call, non-callable spec entry)
    InvariantViolation,
}

impl ErrorKind {
    /// Error name as shown to users
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::InvariantViolation => "Invariant Violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Structured payload attached to a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FailureData {
    /// Tag a primitive checker expected; collected by `oneOfType`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<String>,
}

impl FailureData {
    pub fn is_empty(&self) -> bool {
        self.expected_type.is_none()
    }
}

/// One validation mismatch.
///
/// Plain data: no backtrace is captured, so building one inside a
/// `oneOfType` loop costs a string allocation and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{message}")]
pub struct PropTypeError {
    kind: ErrorKind,
    message: String,
    data: FailureData,
}

impl PropTypeError {
    /// A mismatch with an empty payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Error,
            message: message.into(),
            data: FailureData::default(),
        }
    }

    /// A mismatch carrying the tag that was expected.
    pub fn with_expected_type(message: impl Into<String>, expected_type: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Error,
            message: message.into(),
            data: FailureData {
                expected_type: Some(expected_type.into()),
            },
        }
    }

    /// A required value that is `null` or `undefined`.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TypeError,
            message: message.into(),
            data: FailureData::default(),
        }
    }

    /// A programmer error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvariantViolation,
            message: message.into(),
            data: FailureData::default(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Error name, e.g. `TypeError` or `Invariant Violation`
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &FailureData {
        &self.data
    }

    /// Shortcut for `data().expected_type`
    pub fn expected_type(&self) -> Option<&str> {
        self.data.expected_type.as_deref()
    }
}

/// A checker invocation that did not produce a plain result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// The checker raised instead of returning, e.g. it was called without
    /// the capability token.
    #[error("{0}")]
    Raised(PropTypeError),

    /// The checker returned something that is neither nothing nor a
    /// failure, typically an un-applied composite constructor.
    #[error("type checker returned a {returned} instead of a failure")]
    NotAFailure {
        /// `typeof` of what was returned
        returned: &'static str,
    },
}

/// Result of invoking one checker.
pub type CheckResult = Result<Option<PropTypeError>, Fault>;

/// A batch run that had to stop because the checker tree is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("{message}")]
    InvalidTypeSpec {
        /// Spec entry whose checker misbehaved
        type_spec_name: String,
        /// `typeof` of what the checker returned
        returned: &'static str,
        /// Full diagnostic
        message: String,
    },
}

impl CheckError {
    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::InvalidTypeSpec { .. } => "TYPE_CHECKER_INVALID_TYPE_SPEC",
        }
    }

    /// Name of the spec entry that aborted the batch
    pub fn type_spec_name(&self) -> &str {
        match self {
            CheckError::InvalidTypeSpec { type_spec_name, .. } => type_spec_name,
        }
    }
}
