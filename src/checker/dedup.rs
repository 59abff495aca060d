//! Once-only failure reporting
//!
//! `check_prop_types` always returns a fresh report. A `FailureLog` sits on
//! top of it for callers that re-validate the same inputs repeatedly and
//! only want to hear about each distinct failure once.

use std::collections::HashSet;

use crate::observability::{Event, Logger};
use crate::value::Value;

use super::batch::{check_prop_types, Report};
use super::errors::{CheckError, PropTypeError};
use super::spec::TypeSpecs;

/// Remembers failure messages already reported.
#[derive(Debug, Default)]
pub struct FailureLog {
    seen: HashSet<String>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only failures whose message has not been reported before, and
    /// log each of them.
    pub fn record(&mut self, report: Option<&Report>) -> Vec<PropTypeError> {
        let Some(report) = report else {
            return Vec::new();
        };
        let mut fresh = Vec::new();
        for failure in report {
            if self.seen.insert(failure.message().to_string()) {
                Logger::error(
                    Event::FailureReported,
                    &[("kind", failure.name()), ("message", failure.message())],
                );
                fresh.push(failure.clone());
            }
        }
        fresh
    }

    /// Run a batch and return only the failures not reported before.
    pub fn check(
        &mut self,
        type_specs: &TypeSpecs,
        values: &Value,
        location: &str,
        component_name: Option<&str>,
    ) -> Result<Vec<PropTypeError>, CheckError> {
        let report = check_prop_types(type_specs, values, location, component_name)?;
        Ok(self.record(report.as_ref()))
    }

    pub fn has_seen(&self, message: &str) -> bool {
        self.seen.contains(message)
    }

    /// Number of distinct messages reported so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forget everything reported so far.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
