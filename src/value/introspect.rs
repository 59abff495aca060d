//! Type introspection: classify a runtime value into a normalized tag
//!
//! `prop_type` drives pass/fail decisions. `precise_type` only refines
//! messages and must never be used to decide a result.

use super::types::Value;

/// Placeholder for a component or class without a name.
pub const ANONYMOUS: &str = "<<anonymous>>";

/// The raw `typeof` tag of a value.
pub fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "object",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::BigInt(_) => "bigint",
        Value::String(_) => "string",
        Value::Symbol(_) => "symbol",
        Value::Function(_) => "function",
        Value::Array(_) | Value::Object(_) | Value::Date(_) | Value::RegExp(_) => "object",
    }
}

/// True if the value is a native symbol or a polyfilled one.
///
/// Polyfills are recognised by an own `@@toStringTag` property equal to
/// `"Symbol"`. A falsy value is never symbol-like.
pub fn is_symbol(tag: &str, value: &Value) -> bool {
    if tag == "symbol" {
        return true;
    }
    if !value.is_truthy() {
        return false;
    }
    matches!(
        value.property("@@toStringTag"),
        Some(Value::String(marker)) if marker == "Symbol"
    )
}

/// `typeof` with arrays split out, regexps folded into `object` and
/// polyfilled symbols recognised.
pub fn prop_type(value: &Value) -> &'static str {
    let tag = type_of(value);
    match value {
        Value::Array(_) => "array",
        Value::RegExp(_) => "object",
        _ if is_symbol(tag, value) => "symbol",
        _ => tag,
    }
}

/// Like [`prop_type`], but distinguishes `null`, `date` and `regexp`.
pub fn precise_type(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "null",
        Value::Date(_) => "date",
        Value::RegExp(_) => "regexp",
        _ => prop_type(value),
    }
}

/// Article-prefixed type for warnings, e.g. "an array" or "a date".
pub fn postfix_for_type_warning(value: &Value) -> String {
    postfix_for_tag(precise_type(value))
}

pub(crate) fn postfix_for_tag(tag: &str) -> String {
    match tag {
        "array" | "object" => format!("an {}", tag),
        "boolean" | "date" | "regexp" => format!("a {}", tag),
        other => other.to_string(),
    }
}

/// Constructor name of a value, or [`ANONYMOUS`].
pub fn class_name(value: &Value) -> String {
    let name = match value {
        Value::Undefined | Value::Null => None,
        Value::Bool(_) => Some("Boolean"),
        Value::Number(_) => Some("Number"),
        Value::BigInt(_) => Some("BigInt"),
        Value::String(_) => Some("String"),
        Value::Symbol(_) => Some("Symbol"),
        Value::Array(_) => Some("Array"),
        Value::Function(_) => Some("Function"),
        Value::Date(_) => Some("Date"),
        Value::RegExp(_) => Some("RegExp"),
        Value::Object(object) => match object.class() {
            Some(class) => class.name(),
            None => Some("Object"),
        },
    };
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => ANONYMOUS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Class, Object, Symbol};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_prop_type_tags() {
        assert_eq!(prop_type(&Value::from(json!([1, 2]))), "array");
        assert_eq!(prop_type(&Value::from(json!({}))), "object");
        assert_eq!(prop_type(&Value::Null), "object");
        assert_eq!(prop_type(&Value::Undefined), "undefined");
        assert_eq!(prop_type(&Value::from(true)), "boolean");
        assert_eq!(prop_type(&Value::from(1.5)), "number");
        assert_eq!(prop_type(&Value::BigInt(123)), "bigint");
        assert_eq!(prop_type(&Value::from("s")), "string");
        assert_eq!(prop_type(&Value::from(Symbol::new("s"))), "symbol");
        assert_eq!(prop_type(&Value::function("f")), "function");
    }

    #[test]
    fn test_regexp_classifies_as_object() {
        let re = Value::regexp("^a+$");
        assert_eq!(prop_type(&re), "object");
        assert_eq!(precise_type(&re), "regexp");
    }

    #[test]
    fn test_precise_type_refines_objects() {
        assert_eq!(precise_type(&Value::date(Utc::now())), "date");
        assert_eq!(precise_type(&Value::Null), "null");
        assert_eq!(precise_type(&Value::Undefined), "undefined");
        assert_eq!(precise_type(&Value::from(json!({"a": 1}))), "object");
    }

    #[test]
    fn test_polyfilled_symbol() {
        let polyfill = Value::from(json!({"@@toStringTag": "Symbol"}));
        assert!(is_symbol(type_of(&polyfill), &polyfill));
        assert_eq!(prop_type(&polyfill), "symbol");

        let other = Value::from(json!({"@@toStringTag": "Map"}));
        assert_eq!(prop_type(&other), "object");
    }

    #[test]
    fn test_falsy_is_never_symbol() {
        assert!(!is_symbol("number", &Value::Number(0.0)));
        assert!(!is_symbol("object", &Value::Null));
    }

    #[test]
    fn test_postfix_for_type_warning() {
        assert_eq!(postfix_for_type_warning(&Value::from(json!([]))), "an array");
        assert_eq!(postfix_for_type_warning(&Value::from(json!({}))), "an object");
        assert_eq!(postfix_for_type_warning(&Value::from(false)), "a boolean");
        assert_eq!(postfix_for_type_warning(&Value::regexp("x")), "a regexp");
        assert_eq!(postfix_for_type_warning(&Value::Undefined), "undefined");
        assert_eq!(postfix_for_type_warning(&Value::from("s")), "string");
    }

    #[test]
    fn test_class_names() {
        assert_eq!(class_name(&Value::from(1)), "Number");
        assert_eq!(class_name(&Value::from("s")), "String");
        assert_eq!(class_name(&Value::from(json!({}))), "Object");
        assert_eq!(class_name(&Value::date(Utc::now())), "Date");
        assert_eq!(class_name(&Value::from(Object::instance(&Class::new("Point")))), "Point");
        assert_eq!(class_name(&Value::from(Object::instance(&Class::anonymous()))), ANONYMOUS);
    }
}
