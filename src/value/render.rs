//! Rendering values into failure messages
//!
//! Two renderings are needed: the string conversion used when a value is
//! interpolated into text, and JSON serialization used to list allowed
//! values or dump an offending object.

use serde_json::Number;

use super::introspect::precise_type;
use super::types::Value;

/// Largest integer a double holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// String conversion of a value, as used in `of value \`...\`` messages.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::BigInt(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Symbol(sym) => format!("Symbol({})", sym.description().unwrap_or("")),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Undefined | Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Function(f) => format!("function {}() {{}}", f.name().unwrap_or("")),
        Value::Date(at) => at
            .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
            .to_string(),
        Value::RegExp(source) => format!("/{}/", source),
    }
}

/// Number formatting with `Infinity`, unsigned zero and `e+` exponents.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// JSON serialization. `None` means the value has no JSON form
/// (`undefined`, functions, symbols).
///
/// With `symbols_as_strings`, anything that classifies precisely as a
/// symbol is replaced by its string conversion, at every depth.
pub fn to_json(value: &Value, symbols_as_strings: bool) -> Option<serde_json::Value> {
    if symbols_as_strings && precise_type(value) == "symbol" {
        return Some(serde_json::Value::String(display_string(value)));
    }
    match value {
        Value::Undefined | Value::Function(_) | Value::Symbol(_) => None,
        Value::Null => Some(serde_json::Value::Null),
        Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
        Value::Number(n) => Some(number_to_json(*n)),
        Value::BigInt(n) => Some(match i64::try_from(*n) {
            Ok(small) => serde_json::Value::Number(Number::from(small)),
            Err(_) => serde_json::Value::String(n.to_string()),
        }),
        Value::String(s) => Some(serde_json::Value::String(s.clone())),
        Value::Array(items) => Some(serde_json::Value::Array(
            items
                .iter()
                .map(|item| to_json(item, symbols_as_strings).unwrap_or(serde_json::Value::Null))
                .collect(),
        )),
        Value::Object(object) => {
            let mut map = serde_json::Map::new();
            for (key, item) in object.iter() {
                if let Some(json) = to_json(item, symbols_as_strings) {
                    map.insert(key.to_string(), json);
                }
            }
            Some(serde_json::Value::Object(map))
        }
        Value::Date(at) => Some(serde_json::Value::String(
            at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        )),
        Value::RegExp(_) => Some(serde_json::Value::Object(serde_json::Map::new())),
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Compact JSON text, or `undefined` when the value has no JSON form.
pub fn stringify(value: &Value, symbols_as_strings: bool) -> String {
    match to_json(value, symbols_as_strings) {
        Some(json) => json.to_string(),
        None => "undefined".to_string(),
    }
}

/// Two-space indented JSON text, or `undefined` when the value has no JSON form.
pub fn stringify_pretty(value: &Value) -> String {
    match to_json(value, false) {
        Some(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string()),
        None => "undefined".to_string(),
    }
}
