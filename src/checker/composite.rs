//! Composite checkers built from other checkers, classes or value sets
//!
//! Nested invocations pass the container value as `props`, the element
//! key as `prop_name`, and extend `prop_full_name` with `[i]` or `.key`.

use std::sync::Arc;

use crate::observability::{Event, Logger};
use crate::value::{
    class_name, display_string, postfix_for_tag, prop_type, stringify, stringify_pretty, Class,
    Value, ANONYMOUS,
};

use super::chain::{Checker, Validate};
use super::errors::{CheckResult, Fault, PropTypeError};
use super::secret::Secret;
use super::spec::{TypeSpec, TypeSpecs};

fn invalid_notation(component_name: &str, prop_full_name: &str, factory: &str) -> PropTypeError {
    PropTypeError::new(format!(
        "Property `{}` of component `{}` has invalid PropType notation inside {}.",
        prop_full_name, component_name, factory
    ))
}

fn invalid_validator(
    component_name: &str,
    location: &str,
    prop_full_name: &str,
    key: &str,
    found: &str,
) -> PropTypeError {
    PropTypeError::new(format!(
        "{}: {} type `{}.{}` is invalid; it must be a function, usually from the \
         `type-checker` package, but received `{}`.",
        component_name, location, prop_full_name, key, found
    ))
}

fn not_an_object(
    location: &str,
    prop_full_name: &str,
    found: &str,
    component_name: &str,
) -> PropTypeError {
    PropTypeError::new(format!(
        "Invalid {} `{}` of type `{}` supplied to `{}`, expected `object`.",
        location, prop_full_name, found, component_name
    ))
}

// ---------------------------------------------------------------------------
// arrayOf / objectOf
// ---------------------------------------------------------------------------

struct ArrayOf {
    item: TypeSpec,
}

impl Validate for ArrayOf {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        if !self.item.is_callable() {
            return Ok(Some(invalid_notation(component_name, prop_full_name, "arrayOf")));
        }
        let value = props.property_or_undefined(prop_name);
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                return Ok(Some(PropTypeError::new(format!(
                    "Invalid {} `{}` of type `{}` supplied to `{}`, expected an array.",
                    location,
                    prop_full_name,
                    prop_type(value),
                    component_name
                ))))
            }
        };
        for index in 0..items.len() {
            let outcome = self.item.invoke(
                value,
                &index.to_string(),
                Some(component_name),
                location,
                Some(&format!("{}[{}]", prop_full_name, index)),
                Some(Secret::token()),
            );
            match outcome {
                Ok(Some(err)) => return Ok(Some(err)),
                // Only real failures count here.
                Ok(None) | Err(Fault::NotAFailure { .. }) => {}
                Err(raised) => return Err(raised),
            }
        }
        Ok(None)
    }
}

/// Every element of an array must pass `item`.
pub fn array_of(item: impl Into<TypeSpec>) -> Checker {
    Checker::chainable("arrayOf", ArrayOf { item: item.into() })
}

struct ObjectOf {
    item: TypeSpec,
}

impl Validate for ObjectOf {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        if !self.item.is_callable() {
            return Ok(Some(invalid_notation(component_name, prop_full_name, "objectOf")));
        }
        let value = props.property_or_undefined(prop_name);
        let found = prop_type(value);
        if found != "object" {
            return Ok(Some(PropTypeError::new(format!(
                "Invalid {} `{}` of type `{}` supplied to `{}`, expected an object.",
                location, prop_full_name, found, component_name
            ))));
        }
        // Dates and regexps classify as objects but have no own keys.
        let Some(object) = value.as_object() else {
            return Ok(None);
        };
        for key in object.keys() {
            let outcome = self.item.invoke(
                value,
                key,
                Some(component_name),
                location,
                Some(&format!("{}.{}", prop_full_name, key)),
                Some(Secret::token()),
            );
            match outcome {
                Ok(Some(err)) => return Ok(Some(err)),
                Ok(None) | Err(Fault::NotAFailure { .. }) => {}
                Err(raised) => return Err(raised),
            }
        }
        Ok(None)
    }
}

/// Every own property of an object must pass `item`.
pub fn object_of(item: impl Into<TypeSpec>) -> Checker {
    Checker::chainable("objectOf", ObjectOf { item: item.into() })
}

// ---------------------------------------------------------------------------
// instanceOf
// ---------------------------------------------------------------------------

struct InstanceOf {
    class: Class,
}

impl Validate for InstanceOf {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        let value = props.property_or_undefined(prop_name);
        if value.is_instance_of(&self.class) {
            return Ok(None);
        }
        Ok(Some(PropTypeError::new(format!(
            "Invalid {} `{}` of type `{}` supplied to `{}`, expected instance of `{}`.",
            location,
            prop_full_name,
            class_name(value),
            component_name,
            self.class.name().filter(|n| !n.is_empty()).unwrap_or(ANONYMOUS)
        ))))
    }
}

/// The value must be an instance of `class` or one of its subclasses.
pub fn instance_of(class: &Class) -> Checker {
    Checker::chainable(
        "instanceOf",
        InstanceOf {
            class: class.clone(),
        },
    )
}

// ---------------------------------------------------------------------------
// oneOf
// ---------------------------------------------------------------------------

struct OneOf {
    expected: Value,
}

impl Validate for OneOf {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        let value = props.property_or_undefined(prop_name);
        let allowed = self.expected.as_array().unwrap_or_default();
        if allowed.iter().any(|candidate| value.same_value(candidate)) {
            return Ok(None);
        }
        Ok(Some(PropTypeError::new(format!(
            "Invalid {} `{}` of value `{}` supplied to `{}`, expected one of {}.",
            location,
            prop_full_name,
            display_string(value),
            component_name,
            stringify(&self.expected, true)
        ))))
    }
}

/// The value must be one of `expected` (an array value) under SameValue.
///
/// A non-array argument is logged and yields an always-passing checker.
pub fn one_of(expected: impl Into<Value>) -> Checker {
    let expected = expected.into();
    if expected.as_array().is_none() {
        Logger::warn(
            Event::OneOfInvalidArgument,
            &[("message", "Invalid argument supplied to oneOf, expected an array.")],
        );
        return Checker::noop("oneOf");
    }
    Checker::chainable("oneOf", OneOf { expected })
}

// ---------------------------------------------------------------------------
// oneOfType
// ---------------------------------------------------------------------------

struct OneOfType {
    checkers: Arc<[TypeSpec]>,
}

impl Validate for OneOfType {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        let mut expected_types = Vec::new();
        for (index, checker) in self.checkers.iter().enumerate() {
            let outcome = checker.invoke(
                props,
                prop_name,
                Some(component_name),
                location,
                Some(prop_full_name),
                Some(Secret::token()),
            );
            match outcome {
                Ok(None) => return Ok(None),
                Ok(Some(err)) => {
                    if let Some(expected) = err.expected_type() {
                        expected_types.push(expected.to_string());
                    }
                }
                Err(Fault::NotAFailure { returned }) => {
                    return Err(Fault::Raised(PropTypeError::invariant(format!(
                        "Type checker at index {} of oneOfType for `{}` returned a {} \
                         instead of a failure.",
                        index, prop_full_name, returned
                    ))))
                }
                Err(raised) => return Err(raised),
            }
        }
        let expected = if expected_types.is_empty() {
            String::new()
        } else {
            format!(", expected one of type [{}]", expected_types.join(", "))
        };
        Ok(Some(PropTypeError::new(format!(
            "Invalid {} `{}` supplied to `{}`{}.",
            location, prop_full_name, component_name, expected
        ))))
    }
}

/// The value must pass at least one of the listed checkers.
///
/// A non-list argument, or a list holding anything that is not callable,
/// is logged and yields an always-passing checker.
pub fn one_of_type(checkers: impl Into<TypeSpec>) -> Checker {
    let items = match checkers.into() {
        TypeSpec::List(items) => items,
        _ => {
            Logger::warn(
                Event::OneOfTypeInvalidArgument,
                &[(
                    "message",
                    "Invalid argument supplied to oneOfType, expected an instance of array.",
                )],
            );
            return Checker::noop("oneOfType");
        }
    };
    if let Some((index, bad)) = items.iter().enumerate().find(|(_, item)| !item.is_callable()) {
        let message = format!(
            "Invalid argument supplied to oneOfType. Expected an array of check functions, \
             but received {} at index {}.",
            postfix_for_tag(bad.precise_type()),
            index
        );
        Logger::warn(Event::OneOfTypeInvalidArgument, &[("message", message.as_str())]);
        return Checker::noop("oneOfType");
    }
    Checker::chainable(
        "oneOfType",
        OneOfType {
            checkers: items.into(),
        },
    )
}

// ---------------------------------------------------------------------------
// shape / exact
// ---------------------------------------------------------------------------

struct Shape {
    fields: TypeSpecs,
}

impl Validate for Shape {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        let value = props.property_or_undefined(prop_name);
        let found = prop_type(value);
        if found != "object" {
            return Ok(Some(not_an_object(location, prop_full_name, found, component_name)));
        }
        for (key, checker) in self.fields.iter() {
            if !checker.is_callable() {
                return Ok(Some(invalid_validator(
                    component_name,
                    location,
                    prop_full_name,
                    key,
                    checker.precise_type(),
                )));
            }
            let outcome = checker.invoke(
                value,
                key,
                Some(component_name),
                location,
                Some(&format!("{}.{}", prop_full_name, key)),
                Some(Secret::token()),
            )?;
            if outcome.is_some() {
                return Ok(outcome);
            }
        }
        Ok(None)
    }
}

/// Declared fields must pass their checkers; other fields are ignored.
pub fn shape(fields: TypeSpecs) -> Checker {
    Checker::chainable("shape", Shape { fields })
}

struct Exact {
    fields: TypeSpecs,
}

impl Validate for Exact {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        let value = props.property_or_undefined(prop_name);
        let found = prop_type(value);
        if found != "object" {
            return Ok(Some(not_an_object(location, prop_full_name, found, component_name)));
        }

        // Own keys first, then declared names not already seen, so missing
        // required fields are still checked.
        let mut all_keys: Vec<&str> = value
            .as_object()
            .map(|object| object.keys().collect())
            .unwrap_or_default();
        for name in self.fields.names() {
            if !all_keys.contains(&name) {
                all_keys.push(name);
            }
        }

        for key in all_keys {
            let checker = match self.fields.get(key) {
                Some(checker) if !checker.is_callable() => {
                    return Ok(Some(invalid_validator(
                        component_name,
                        location,
                        prop_full_name,
                        key,
                        checker.precise_type(),
                    )))
                }
                Some(checker) => checker,
                None => {
                    let valid_keys: Vec<&str> = self.fields.names().collect();
                    let valid_keys = serde_json::to_string_pretty(&valid_keys)
                        .unwrap_or_else(|_| format!("{:?}", valid_keys));
                    return Ok(Some(PropTypeError::new(format!(
                        "Invalid {} `{}` key `{}` supplied to `{}`.\nBad object: {}\nValid keys: {}",
                        location,
                        prop_full_name,
                        key,
                        component_name,
                        stringify_pretty(value),
                        valid_keys
                    ))));
                }
            };
            let outcome = checker.invoke(
                value,
                key,
                Some(component_name),
                location,
                Some(&format!("{}.{}", prop_full_name, key)),
                Some(Secret::token()),
            )?;
            if outcome.is_some() {
                return Ok(outcome);
            }
        }
        Ok(None)
    }
}

/// Like [`shape`], but keys that are not declared fail.
pub fn exact(fields: TypeSpecs) -> Checker {
    Checker::chainable("exact", Exact { fields })
}
