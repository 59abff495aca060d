//! Batch validation: the only sanctioned way to invoke checkers
//!
//! Each spec entry runs inside its own fault boundary. A checker that
//! raises or panics costs only its own entry; a checker that returns
//! something other than a failure means the tree is malformed and the
//! whole batch stops.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::observability::{Event, Logger};
use crate::value::Value;

use super::errors::{CheckError, Fault, PropTypeError};
use super::secret::Secret;
use super::spec::TypeSpecs;

/// Non-empty, ordered list of failures from one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    failures: Vec<PropTypeError>,
}

impl Report {
    fn from_failures(failures: Vec<PropTypeError>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    pub fn failures(&self) -> &[PropTypeError] {
        &self.failures
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropTypeError> {
        self.failures.iter()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Always false; an empty run yields no report at all.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.failures.iter().map(PropTypeError::message).collect()
    }

    pub fn into_failures(self) -> Vec<PropTypeError> {
        self.failures
    }
}

impl IntoIterator for Report {
    type Item = PropTypeError;
    type IntoIter = std::vec::IntoIter<PropTypeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a PropTypeError;
    type IntoIter = std::slice::Iter<'a, PropTypeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

/// Outcome of a batch run
pub type BatchResult = Result<Option<Report>, CheckError>;

/// Validate `values` against every entry of `type_specs`.
///
/// Returns `Ok(None)` when everything passed, `Ok(Some(report))` with one
/// failure per failing entry in spec order, or `Err` when a checker
/// returned something that is not a failure.
pub fn check_prop_types(
    type_specs: &TypeSpecs,
    values: &Value,
    location: &str,
    component_name: Option<&str>,
) -> BatchResult {
    let object_name = component_name.filter(|name| !name.is_empty()).unwrap_or("Object");
    let mut failures = Vec::new();

    for (type_spec_name, type_spec) in type_specs.iter() {
        let outcome = if !type_spec.is_callable() {
            Logger::warn(
                Event::TypeSpecInvalid,
                &[("location", location), ("type_spec", type_spec_name)],
            );
            Err(Fault::Raised(PropTypeError::invariant(format!(
                "{}: {} type `{}` is invalid; it must be a function, usually from the \
                 `type-checker` package, but received `{}`. This often happens because of \
                 typos such as `TypeChecker.function` instead of `TypeChecker.func`.",
                object_name,
                location,
                type_spec_name,
                type_spec.type_of()
            ))))
        } else {
            panic::catch_unwind(AssertUnwindSafe(|| {
                type_spec.invoke(
                    values,
                    type_spec_name,
                    component_name,
                    location,
                    None,
                    Some(Secret::token()),
                )
            }))
            .unwrap_or_else(|payload| {
                Err(Fault::Raised(PropTypeError::invariant(format!(
                    "{}: {} type `{}` panicked: {}",
                    object_name,
                    location,
                    type_spec_name,
                    panic_message(payload.as_ref())
                ))))
            })
        };

        match outcome {
            Ok(None) => {}
            Ok(Some(failure)) => failures.push(failure),
            Err(Fault::Raised(failure)) => {
                Logger::info(
                    Event::CheckerFaultCaught,
                    &[("message", failure.message()), ("type_spec", type_spec_name)],
                );
                failures.push(failure);
            }
            Err(Fault::NotAFailure { returned }) => {
                let message = format!(
                    "{}: type specification of {} `{}` is invalid; the type checker function \
                     must return `null` or an `Error` but returned a {}. You may have forgotten \
                     to pass an argument to the type checker creator (arrayOf, instanceOf, \
                     objectOf, oneOf, oneOfType, and shape all require an argument).",
                    object_name, location, type_spec_name, returned
                );
                Logger::error(
                    Event::BatchAborted,
                    &[("message", message.as_str()), ("type_spec", type_spec_name)],
                );
                return Err(CheckError::InvalidTypeSpec {
                    type_spec_name: type_spec_name.to_string(),
                    returned,
                    message,
                });
            }
        }
    }

    Ok(Report::from_failures(failures))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
