//! Observable events emitted while building and running checkers
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in type-checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Construction
    /// `oneOf` received something other than an array; checker degraded
    OneOfInvalidArgument,
    /// `oneOfType` received a non-array or a non-callable entry; checker degraded
    OneOfTypeInvalidArgument,

    // Batch validation
    /// A spec entry is not callable
    TypeSpecInvalid,
    /// A checker raised or panicked; demoted to a failure for its entry
    CheckerFaultCaught,
    /// A checker returned a non-failure; the batch stopped
    BatchAborted,

    // Failure log
    /// A failure message was reported for the first time
    FailureReported,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::OneOfInvalidArgument => "ONE_OF_INVALID_ARGUMENT",
            Event::OneOfTypeInvalidArgument => "ONE_OF_TYPE_INVALID_ARGUMENT",
            Event::TypeSpecInvalid => "TYPE_SPEC_INVALID",
            Event::CheckerFaultCaught => "CHECKER_FAULT_CAUGHT",
            Event::BatchAborted => "BATCH_ABORTED",
            Event::FailureReported => "FAILURE_REPORTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::OneOfInvalidArgument.as_str(), "ONE_OF_INVALID_ARGUMENT");
        assert_eq!(Event::OneOfTypeInvalidArgument.as_str(), "ONE_OF_TYPE_INVALID_ARGUMENT");
        assert_eq!(Event::BatchAborted.to_string(), "BATCH_ABORTED");
    }
}
