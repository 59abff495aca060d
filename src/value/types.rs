//! Dynamically typed values inspected by checkers
//!
//! Reference kinds (symbol, array, object, function, date, regexp) are
//! `Arc`-backed: cloning shares the same allocation, and identity is the
//! allocation address. Primitive kinds compare by value.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};

/// A class reference with an optional parent, compared by identity.
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

struct ClassInner {
    name: Option<String>,
    parent: Option<Class>,
}

impl Class {
    /// Declare a named class deriving directly from `Object`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInner {
            name: Some(name.into()),
            parent: None,
        }))
    }

    /// Declare a class without a name.
    pub fn anonymous() -> Self {
        Self(Arc::new(ClassInner {
            name: None,
            parent: None,
        }))
    }

    /// Declare a named subclass of `parent`.
    pub fn extends(name: impl Into<String>, parent: &Class) -> Self {
        Self(Arc::new(ClassInner {
            name: Some(name.into()),
            parent: Some(parent.clone()),
        }))
    }

    /// Class name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Direct parent class. The implicit `Object` root is not reported.
    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// Identity comparison.
    pub fn same(&self, other: &Class) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// True if `self` is `ancestor` or derives from it.
    pub fn derives_from(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class.same(ancestor) {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// The builtin `Object` class.
    pub fn object() -> Class {
        builtin(&OBJECT, "Object")
    }

    /// The builtin `Array` class.
    pub fn array() -> Class {
        builtin(&ARRAY, "Array")
    }

    /// The builtin `Function` class.
    pub fn function() -> Class {
        builtin(&FUNCTION, "Function")
    }

    /// The builtin `Date` class.
    pub fn date() -> Class {
        builtin(&DATE, "Date")
    }

    /// The builtin `RegExp` class.
    pub fn regexp() -> Class {
        builtin(&REGEXP, "RegExp")
    }
}

static OBJECT: OnceLock<Class> = OnceLock::new();
static ARRAY: OnceLock<Class> = OnceLock::new();
static FUNCTION: OnceLock<Class> = OnceLock::new();
static DATE: OnceLock<Class> = OnceLock::new();
static REGEXP: OnceLock<Class> = OnceLock::new();

fn builtin(slot: &'static OnceLock<Class>, name: &str) -> Class {
    slot.get_or_init(|| Class::new(name)).clone()
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Class({})", name),
            None => write!(f, "Class(<anonymous>)"),
        }
    }
}

/// A symbol: a unique value with an optional description.
#[derive(Clone)]
pub struct Symbol(Arc<Option<String>>);

impl Symbol {
    /// Create a fresh symbol.
    pub fn new(description: impl Into<String>) -> Self {
        Self(Arc::new(Some(description.into())))
    }

    /// Create a fresh symbol without a description.
    pub fn anonymous() -> Self {
        Self(Arc::new(None))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn same(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// A function value. Only its name is observable.
#[derive(Debug)]
pub struct Function {
    name: Option<String>,
}

impl Function {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// An object: own enumerable properties in insertion order plus its class.
///
/// `class == None` is a plain object literal (constructor `Object`).
#[derive(Debug, Default)]
pub struct Object {
    class: Option<Class>,
    entries: Vec<(String, Value)>,
}

impl Object {
    /// Create an empty plain object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty instance of `class`.
    pub fn instance(class: &Class) -> Self {
        Self {
            class: Some(class.clone()),
            entries: Vec::new(),
        }
    }

    /// Set a property. Re-setting a key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Object::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Own keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value; also what a missing property reads as
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
    Array(Arc<Vec<Value>>),
    Object(Arc<Object>),
    Function(Arc<Function>),
    Date(Arc<DateTime<Utc>>),
    /// Regular expression, stored as its source pattern
    RegExp(Arc<String>),
}

impl Value {
    /// Build an array value.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build a plain object from key/value pairs, keeping their order.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut object = Object::new();
        for (key, value) in entries {
            object.insert(key, value);
        }
        Value::Object(Arc::new(object))
    }

    /// Build a named function value.
    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(Arc::new(Function {
            name: Some(name.into()),
        }))
    }

    /// Build an anonymous function value (e.g. an arrow function).
    pub fn anonymous_function() -> Self {
        Value::Function(Arc::new(Function { name: None }))
    }

    pub fn date(at: DateTime<Utc>) -> Self {
        Value::Date(Arc::new(at))
    }

    pub fn regexp(source: impl Into<String>) -> Self {
        Value::RegExp(Arc::new(source.into()))
    }

    /// True for `null` and `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Property read with `bag[key]` semantics.
    ///
    /// Objects look up own keys; arrays accept decimal indices. Anything
    /// else has no readable properties.
    pub fn property(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Like [`Value::property`], with a missing key reading as `undefined`.
    pub fn property_or_undefined(&self, key: &str) -> &Value {
        static UNDEFINED: Value = Value::Undefined;
        self.property(key).unwrap_or(&UNDEFINED)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// `instanceof` over the value's prototype chain.
    pub fn is_instance_of(&self, class: &Class) -> bool {
        let own = match self {
            Value::Object(object) => object.class().cloned(),
            Value::Array(_) => Some(Class::array()),
            Value::Function(_) => Some(Class::function()),
            Value::Date(_) => Some(Class::date()),
            Value::RegExp(_) => Some(Class::regexp()),
            _ => return false,
        };
        if let Some(own) = own {
            if own.derives_from(class) {
                return true;
            }
        }
        class.same(&Class::object())
    }

    /// SameValue comparison: `NaN` equals itself and `+0` differs from `-0`.
    /// Reference kinds compare by identity.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b && a.is_sign_negative() == b.is_sign_negative()
                }
            }
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.same(b),
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Date(a), Value::Date(b)) => Arc::ptr_eq(a, b),
            (Value::RegExp(a), Value::RegExp(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(Arc::new(o))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items),
            serde_json::Value::Object(map) => Value::object(map),
        }
    }
}
