//! Prop Types Invariant Tests
//!
//! End-to-end checks through the public batch entry point:
//! - Mismatches are reported as data, one per failing entry
//! - Absent optional values always pass
//! - Required values reject null and undefined
//! - Checkers cannot be invoked without the batch entry point
//! - Validation is deterministic

use chrono::Utc;
use serde_json::json;
use type_checker::checker::DIRECT_CALL_MESSAGE;
use type_checker::{
    CheckResult, Checker, Class, ErrorKind, Factory, FailureLog, Fault, Object, PropTypeError,
    Symbol, TypeChecker, TypeSpecs, Validate, Value,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn all_checkers() -> TypeSpecs {
    let t = TypeChecker::global();
    TypeSpecs::new()
        .with("array", &t.array)
        .with("bool", &t.bool)
        .with("func", &t.func)
        .with("number", &t.number)
        .with("object", &t.object)
        .with("string", &t.string)
        .with("symbol", &t.symbol)
        .with("any", &t.any)
        .with("arrayOf", t.array_of(&t.string))
        .with("instanceOf", t.instance_of(&Class::date()))
        .with("objectOf", t.object_of(&t.string))
        .with("oneOf", t.one_of(json!(["a", "b"])))
        .with("oneOfType", t.one_of_type(vec![t.string.clone(), t.number.clone()]))
        .with(
            "shape",
            t.shape(
                TypeSpecs::new()
                    .with("key", &t.string)
                    .with("value", &t.number),
            ),
        )
        .with(
            "exact",
            t.exact(
                TypeSpecs::new()
                    .with("key", &t.string)
                    .with("value", &t.number),
            ),
        )
}

fn all_passing_values() -> Value {
    Value::from(
        Object::new()
            .with("array", Value::array(Vec::<Value>::new()))
            .with("bool", false)
            .with("func", Value::anonymous_function())
            .with("number", 123)
            .with("object", Object::new())
            .with("string", "TypeChecker('string')")
            .with("symbol", Symbol::new("lucky"))
            .with("any", Value::BigInt(123))
            .with("arrayOf", Value::from(json!(["string"])))
            .with("instanceOf", Value::date(Utc::now()))
            .with("objectOf", Value::from(json!({"213": "DD"})))
            .with("oneOf", "a")
            .with("oneOfType", "string")
            .with("shape", Value::from(json!({"key": "123"})))
            .with("exact", Value::from(json!({"key": "123", "value": 123}))),
    )
}

// =============================================================================
// Batch Outcome Tests
// =============================================================================

/// A string where a number is expected produces exactly one failure.
#[test]
fn test_mismatch_returns_failures() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new()
        .with("name", &t.string)
        .with("age", &t.number);
    let values = Value::from(json!({"name": "hello", "age": "world"}));

    let report = TypeChecker::check_prop_types(&specs, &values, "test", Some("test1"))
        .unwrap()
        .expect("age should fail");

    assert_eq!(report.len(), 1);
    assert_eq!(
        report.messages(),
        vec!["Invalid test `age` of type `string` supplied to `test1`, expected `number`."]
    );
    assert_eq!(report.failures()[0].expected_type(), Some("number"));
}

/// Every registry checker accepts a well-formed value.
#[test]
fn test_all_checkers_pass() {
    let result =
        TypeChecker::check_prop_types(&all_checkers(), &all_passing_values(), "test", Some("test2"));
    assert_eq!(result.unwrap(), None);
}

/// Optional checkers accept an empty bag.
#[test]
fn test_empty_values_pass() {
    let result =
        TypeChecker::check_prop_types(&all_checkers(), &Value::from(Object::new()), "test", Some("test3"));
    assert_eq!(result.unwrap(), None);
}

/// Required checkers reject absent values and accept present ones.
#[test]
fn test_required_key() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new().with("number", t.number.is_required());

    let report = TypeChecker::check_prop_types(&specs, &Value::from(json!({})), "test", Some("test4"))
        .unwrap()
        .unwrap();
    let failure = &report.failures()[0];
    assert_eq!(failure.kind(), ErrorKind::TypeError);
    assert_eq!(
        failure.message(),
        "The test `number` is marked as required in `test4`, but its value is `undefined`."
    );

    let passed =
        TypeChecker::check_prop_types(&specs, &Value::from(json!({"number": 1})), "test", Some("test5"));
    assert_eq!(passed.unwrap(), None);
}

/// Required null reports `null`, not `undefined`.
#[test]
fn test_required_null() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new().with("id", t.string.is_required());

    let report = TypeChecker::check_prop_types(&specs, &Value::from(json!({"id": null})), "prop", None)
        .unwrap()
        .unwrap();
    assert_eq!(
        report.messages(),
        vec!["The prop `id` is marked as required in `<<anonymous>>`, but its value is `null`."]
    );
}

/// Nested failures carry the full path to the offending element.
#[test]
fn test_nested_paths() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new().with(
        "user",
        t.shape(TypeSpecs::new().with("tags", t.array_of(&t.string))),
    );
    let values = Value::from(json!({"user": {"tags": ["a", 2]}}));

    let report = TypeChecker::check_prop_types(&specs, &values, "prop", Some("Profile"))
        .unwrap()
        .unwrap();
    assert_eq!(
        report.messages(),
        vec!["Invalid prop `user.tags[1]` of type `number` supplied to `Profile`, expected `string`."]
    );
}

/// Exact rejects keys it does not declare.
#[test]
fn test_exact_unknown_key() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new().with("point", t.exact(TypeSpecs::new().with("x", &t.number)));
    let values = Value::from(json!({"point": {"x": 1, "y": 2}}));

    let report = TypeChecker::check_prop_types(&specs, &values, "prop", Some("Plot"))
        .unwrap()
        .unwrap();
    assert!(report.messages()[0]
        .starts_with("Invalid prop `point` key `y` supplied to `Plot`.\nBad object: {"));
}

/// Entry order decides report order, one failure per failing entry.
#[test]
fn test_one_failure_per_entry() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new()
        .with("z", &t.bool)
        .with("list", t.array_of(&t.number))
        .with("a", &t.string);
    let values = Value::from(json!({"z": 1, "list": ["x", "y"], "a": 2}));

    let report = TypeChecker::check_prop_types(&specs, &values, "prop", Some("C"))
        .unwrap()
        .unwrap();
    assert_eq!(report.len(), 3);
    assert!(report.messages()[0].contains("`z`"));
    assert!(report.messages()[1].contains("`list[0]`"));
    assert!(report.messages()[2].contains("`a`"));
}

// =============================================================================
// Fault Tests
// =============================================================================

/// Without a value bag every checker entry fails instead of passing.
#[test]
fn test_null_values_fail_each_entry() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new()
        .with("name", &t.string)
        .with("age", &t.number);

    let report = TypeChecker::check_prop_types(&specs, &Value::Null, "prop", Some("C"))
        .unwrap()
        .expect("null values must not pass");
    assert_eq!(report.len(), 2);
    assert_eq!(report.failures()[1].kind(), ErrorKind::TypeError);
    assert_eq!(
        report.messages()[1],
        "Cannot read properties of null (reading 'age')"
    );
}

/// Forgetting a composite argument aborts the whole batch.
#[test]
fn test_factory_without_argument_aborts() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new()
        .with("name", &t.string)
        .with("kind", Factory::OneOf);

    let err = TypeChecker::check_prop_types(&specs, &Value::from(json!({"name": 1})), "prop", Some("C"))
        .unwrap_err();
    assert_eq!(err.type_spec_name(), "kind");
    assert!(err.to_string().contains("returned a function"));
}

/// A raw value in a spec slot becomes a failure; other entries still run.
#[test]
fn test_invalid_type_spec_is_reported() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new()
        .with("name", Value::from(42))
        .with("age", &t.number);

    let report = TypeChecker::check_prop_types(&specs, &Value::from(json!({"age": "x"})), "prop", Some("C"))
        .unwrap()
        .unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.failures()[0].kind(), ErrorKind::InvariantViolation);
    assert!(report.messages()[0].contains("but received `number`"));
}

// =============================================================================
// Capability Gate Tests
// =============================================================================

/// Invoking a checker directly is always rejected.
#[test]
fn test_direct_call_rejected() {
    let t = TypeChecker::global();
    let values = Value::from(json!({"name": 1}));

    for checker in [&t.string, &t.any, &t.array_of(&t.string)] {
        match checker.call(&values, "name") {
            Err(Fault::Raised(err)) => {
                assert_eq!(err.kind(), ErrorKind::InvariantViolation);
                assert_eq!(err.message(), DIRECT_CALL_MESSAGE);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}

/// The full calling convention without a token is rejected too.
#[test]
fn test_check_without_token_rejected() {
    let t = TypeChecker::global();
    let result = t
        .number
        .check(&Value::from(json!({"n": 1})), "n", Some("C"), "prop", None, None);
    assert!(matches!(result, Err(Fault::Raised(_))));
}

// =============================================================================
// Extension Tests
// =============================================================================

struct Even;

impl Validate for Even {
    fn validate(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: &str,
        location: &str,
        prop_full_name: &str,
    ) -> CheckResult {
        match props.property(prop_name) {
            Some(Value::Number(n)) if n % 2.0 == 0.0 => Ok(None),
            _ => Ok(Some(PropTypeError::new(format!(
                "Invalid {} `{}` supplied to `{}`, expected an even number.",
                location, prop_full_name, component_name
            )))),
        }
    }
}

/// User rules get the same null handling and gate as built-ins.
#[test]
fn test_custom_checker() {
    let even = Checker::chainable("even", Even);
    let specs = TypeSpecs::new()
        .with("optional", even.clone())
        .with("required", even.is_required())
        .with("odd", even);
    let values = Value::from(json!({"odd": 3}));

    let report = TypeChecker::check_prop_types(&specs, &values, "prop", Some("Counter"))
        .unwrap()
        .unwrap();
    assert_eq!(report.len(), 2);
    assert!(report.messages()[0].contains("`required` is marked as required"));
    assert_eq!(
        report.messages()[1],
        "Invalid prop `odd` supplied to `Counter`, expected an even number."
    );
}

/// A failure log reports each distinct failure once across runs.
#[test]
fn test_failure_log_dedups() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new().with("age", &t.number);
    let values = Value::from(json!({"age": "old"}));
    let mut log = FailureLog::new();

    assert_eq!(log.check(&specs, &values, "prop", Some("P")).unwrap().len(), 1);
    assert!(log.check(&specs, &values, "prop", Some("P")).unwrap().is_empty());
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// The same inputs produce the same report every time.
#[test]
fn test_validation_is_deterministic() {
    let t = TypeChecker::global();
    let specs = TypeSpecs::new()
        .with("kind", t.one_of(json!(["a", "b"])))
        .with("either", t.one_of_type(vec![t.string.clone(), t.number.clone()]));
    let values = Value::from(json!({"kind": "c", "either": true}));

    let first = TypeChecker::check_prop_types(&specs, &values, "prop", Some("D")).unwrap();
    for _ in 0..10 {
        let again = TypeChecker::check_prop_types(&specs, &values, "prop", Some("D")).unwrap();
        assert_eq!(first, again);
    }
}
