//! Chainable checkers: required/optional semantics around a raw rule
//!
//! Every invocation goes through [`Checker::check`], which
//! 1. rejects calls that do not carry the capability token,
//! 2. raises when there is no container to read from,
//! 3. resolves `null`/`undefined` according to the required flag,
//! 4. delegates everything else to the rule.

use std::fmt;
use std::sync::Arc;

use crate::value::{Value, ANONYMOUS};

use super::errors::{CheckResult, Fault, PropTypeError};
use super::secret::{Secret, DIRECT_CALL_MESSAGE};

/// A raw validation rule. Only ever sees values that are neither `null`
/// nor `undefined`.
///
/// `props` is the container holding the value under `prop_name`;
/// `component_name` and `prop_full_name` are already defaulted.
pub trait Validate: Send + Sync {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult;
}

/// Adapter so plain closures can serve as rules.
struct FnRule<F>(F);

impl<F> Validate for FnRule<F>
where
    F: Fn(&Value, &str, &str, &str, &str) -> CheckResult + Send + Sync,
{
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        (self.0)(props, prop_name, component_name, location, prop_full_name)
    }
}

#[derive(Clone)]
enum Rule {
    Chained(Arc<dyn Validate>),
    /// Always passes; what misused `oneOf`/`oneOfType` degrade to
    Noop,
}

/// An immutable, cheaply cloneable checker.
#[derive(Clone)]
pub struct Checker {
    label: &'static str,
    rule: Rule,
    required: bool,
}

impl Checker {
    /// Wrap a rule into its optional checker.
    pub fn chainable(label: &'static str, rule: impl Validate + 'static) -> Self {
        Self {
            label,
            rule: Rule::Chained(Arc::new(rule)),
            required: false,
        }
    }

    /// Wrap a closure into its optional checker.
    pub fn from_fn<F>(label: &'static str, rule: F) -> Self
    where
        F: Fn(&Value, &str, &str, &str, &str) -> CheckResult + Send + Sync + 'static,
    {
        Self::chainable(label, FnRule(rule))
    }

    pub(crate) fn noop(label: &'static str) -> Self {
        Self {
            label,
            rule: Rule::Noop,
            required: false,
        }
    }

    /// The required variant of this checker.
    pub fn is_required(&self) -> Checker {
        Checker {
            required: true,
            ..self.clone()
        }
    }

    /// Whether `null`/`undefined` values fail.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Type tag or constructor name of the checker, e.g. `boolean` or `arrayOf`.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Whether construction misuse degraded this checker to a no-op.
    pub fn is_noop(&self) -> bool {
        matches!(self.rule, Rule::Noop)
    }

    /// Invoke the checker with the full calling convention.
    ///
    /// Only callers holding the capability token succeed; anything else
    /// gets `Err(Fault::Raised(..))` with an invariant violation.
    pub fn check(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: Option<&str>,
        location: &str,
        prop_full_name: Option<&str>,
        secret: Option<&Secret>,
    ) -> CheckResult {
        if !Secret::verify(secret) {
            return Err(Fault::Raised(PropTypeError::invariant(DIRECT_CALL_MESSAGE)));
        }
        let rule = match &self.rule {
            Rule::Noop => return Ok(None),
            Rule::Chained(rule) => rule,
        };
        let container = match props {
            Value::Null => Some("null"),
            Value::Undefined => Some("undefined"),
            _ => None,
        };
        if let Some(container) = container {
            return Err(Fault::Raised(PropTypeError::type_error(format!(
                "Cannot read properties of {} (reading '{}')",
                container, prop_name
            ))));
        }

        let component_name = component_name.filter(|name| !name.is_empty()).unwrap_or(ANONYMOUS);
        let prop_full_name = prop_full_name
            .filter(|name| !name.is_empty())
            .unwrap_or(prop_name);

        match props.property_or_undefined(prop_name) {
            Value::Null if self.required => Ok(Some(PropTypeError::type_error(format!(
                "The {} `{}` is marked as required in `{}`, but its value is `null`.",
                location, prop_full_name, component_name
            )))),
            Value::Undefined if self.required => Ok(Some(PropTypeError::type_error(format!(
                "The {} `{}` is marked as required in `{}`, but its value is `undefined`.",
                location, prop_full_name, component_name
            )))),
            Value::Null | Value::Undefined => Ok(None),
            _ => rule.validate(props, prop_name, component_name, location, prop_full_name),
        }
    }

    /// A direct call without the batch entry point. Always rejected.
    pub fn call(&self, props: &Value, prop_name: &str) -> CheckResult {
        self.check(props, prop_name, None, "prop", None, None)
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("label", &self.label)
            .field("required", &self.required)
            .field("noop", &self.is_noop())
            .finish()
    }
}
