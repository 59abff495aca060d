//! Checker subsystem for type-checker
//!
//! Checkers are composable predicates over dynamic values. They are built
//! declaratively, are immutable afterwards, and can only be invoked through
//! [`check_prop_types`].
//!
//! # Design Principles
//!
//! - A mismatch is data (`Ok(Some(PropTypeError))`), never a panic
//! - A malformed checker tree is a fault, kept apart from mismatches
//! - Invocation is gated by a process-wide capability token
//! - No coercion, no memoization inside a batch run
//!
//! # Usage
//!
//! ```ignore
//! use type_checker::{TypeChecker, TypeSpecs, Value};
//!
//! let t = TypeChecker::global();
//! let specs = TypeSpecs::new()
//!     .with("name", t.string.is_required())
//!     .with("tags", t.array_of(t.string.clone()));
//! let values = Value::from(serde_json::json!({"name": "x", "tags": ["a"]}));
//! assert!(TypeChecker::check_prop_types(&specs, &values, "prop", Some("Card"))?.is_none());
//! ```

mod batch;
mod chain;
mod composite;
mod dedup;
mod errors;
mod primitive;
mod registry;
mod secret;
mod spec;

pub use batch::{check_prop_types, BatchResult, Report};
pub use chain::{Checker, Validate};
pub use composite::{array_of, exact, instance_of, object_of, one_of, one_of_type, shape};
pub use dedup::FailureLog;
pub use errors::{CheckError, CheckResult, ErrorKind, FailureData, Fault, PropTypeError};
pub use primitive::{any, primitive};
pub use registry::TypeChecker;
pub use secret::{Secret, DIRECT_CALL_MESSAGE};
pub use spec::{Factory, TypeSpec, TypeSpecs};
