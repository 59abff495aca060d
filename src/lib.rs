//! type-checker - Runtime shape validation for dynamic values
//!
//! Composable checkers describe the expected shape of a bag of named
//! values. `TypeChecker::check_prop_types` runs them and reports every
//! mismatch as data.

pub mod checker;
pub mod observability;
pub mod value;

pub use checker::{
    CheckError, CheckResult, Checker, ErrorKind, Factory, FailureLog, Fault, PropTypeError,
    Report, TypeChecker, TypeSpec, TypeSpecs, Validate,
};
pub use value::{Class, Function, Object, Symbol, Value};
