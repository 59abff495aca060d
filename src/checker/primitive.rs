//! Primitive checkers: one per basic type tag, plus `any`

use crate::value::{precise_type, prop_type, Value};

use super::chain::{Checker, Validate};
use super::errors::{CheckResult, PropTypeError};

/// Rule comparing a value's tag against a fixed expected tag.
struct PrimitiveRule {
    expected: &'static str,
}

impl Validate for PrimitiveRule {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        let value = props.property_or_undefined(prop_name);
        if prop_type(value) == self.expected {
            return Ok(None);
        }
        // A date passes `object` but reads better as `date` when it fails
        // something else.
        Ok(Some(PropTypeError::with_expected_type(
            format!(
                "Invalid {} `{}` of type `{}` supplied to `{}`, expected `{}`.",
                location,
                prop_full_name,
                precise_type(value),
                component_name,
                self.expected
            ),
            self.expected,
        )))
    }
}

/// Checker for one of `array`, `boolean`, `function`, `number`, `object`,
/// `string` or `symbol`.
pub fn primitive(expected: &'static str) -> Checker {
    Checker::chainable(expected, PrimitiveRule { expected })
}

/// Checker accepting every present value.
pub fn any() -> Checker {
    Checker::from_fn("any", |_, _, _, _, _| Ok(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::secret::Secret;
    use crate::value::Symbol;
    use chrono::Utc;
    use serde_json::json;

    fn run(checker: &Checker, value: Value) -> Option<PropTypeError> {
        let bag = Value::object([("field", value)]);
        checker
            .check(&bag, "field", Some("Widget"), "prop", None, Some(Secret::token()))
            .unwrap()
    }

    #[test]
    fn test_matching_tags_pass() {
        assert!(run(&primitive("array"), Value::from(json!([]))).is_none());
        assert!(run(&primitive("boolean"), Value::from(false)).is_none());
        assert!(run(&primitive("function"), Value::anonymous_function()).is_none());
        assert!(run(&primitive("number"), Value::from(123)).is_none());
        assert!(run(&primitive("object"), Value::from(json!({}))).is_none());
        assert!(run(&primitive("object"), Value::regexp("x")).is_none());
        assert!(run(&primitive("object"), Value::date(Utc::now())).is_none());
        assert!(run(&primitive("string"), Value::from("s")).is_none());
        assert!(run(&primitive("symbol"), Value::from(Symbol::new("lucky"))).is_none());
    }

    #[test]
    fn test_mismatch_message_and_payload() {
        let err = run(&primitive("number"), Value::from("world")).unwrap();
        assert_eq!(
            err.message(),
            "Invalid prop `field` of type `string` supplied to `Widget`, expected `number`."
        );
        assert_eq!(err.expected_type(), Some("number"));
    }

    #[test]
    fn test_mismatch_uses_precise_type() {
        let err = run(&primitive("string"), Value::date(Utc::now())).unwrap();
        assert!(err.message().contains("of type `date`"));

        let err = run(&primitive("string"), Value::regexp("x")).unwrap();
        assert!(err.message().contains("of type `regexp`"));
    }

    #[test]
    fn test_array_is_not_object() {
        let err = run(&primitive("object"), Value::from(json!([1]))).unwrap();
        assert!(err.message().contains("of type `array`"));
    }

    #[test]
    fn test_any_passes_everything_present() {
        let checker = any();
        assert!(run(&checker, Value::BigInt(123)).is_none());
        assert!(run(&checker, Value::from(json!({"a": [1]}))).is_none());
        assert!(run(&checker.is_required(), Value::from(0)).is_none());
        assert!(run(&checker.is_required(), Value::Null).is_some());
    }
}
