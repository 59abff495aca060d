//! Checker slots and checker specs
//!
//! A slot in a checker spec (or a composite argument) may hold anything,
//! not only a checker: a composite constructor that was never applied, a
//! list, or a plain value left there by mistake. Callers decide per slot
//! whether that is a validation failure or a hard stop.

use std::fmt;

use crate::value::{self, Value};

use super::chain::Checker;
use super::errors::{CheckResult, Fault, PropTypeError};
use super::secret::Secret;

/// A composite constructor that has not been applied to its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factory {
    ArrayOf,
    InstanceOf,
    ObjectOf,
    OneOf,
    OneOfType,
    Shape,
    Exact,
}

impl Factory {
    /// Registry name
    pub fn name(&self) -> &'static str {
        match self {
            Factory::ArrayOf => "arrayOf",
            Factory::InstanceOf => "instanceOf",
            Factory::ObjectOf => "objectOf",
            Factory::OneOf => "oneOf",
            Factory::OneOfType => "oneOfType",
            Factory::Shape => "shape",
            Factory::Exact => "exact",
        }
    }
}

impl fmt::Display for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Content of one checker slot.
#[derive(Debug, Clone)]
pub enum TypeSpec {
    Checker(Checker),
    /// Callable, but calling it builds a checker instead of checking
    Factory(Factory),
    List(Vec<TypeSpec>),
    Value(Value),
}

impl TypeSpec {
    /// Whether the slot can be invoked at all.
    pub fn is_callable(&self) -> bool {
        matches!(self, TypeSpec::Checker(_) | TypeSpec::Factory(_))
    }

    pub fn as_checker(&self) -> Option<&Checker> {
        match self {
            TypeSpec::Checker(checker) => Some(checker),
            _ => None,
        }
    }

    /// `typeof` of the slot content.
    pub fn type_of(&self) -> &'static str {
        match self {
            TypeSpec::Checker(_) | TypeSpec::Factory(_) => "function",
            TypeSpec::List(_) => "object",
            TypeSpec::Value(value) => value::type_of(value),
        }
    }

    /// Precise type of the slot content, for messages.
    pub fn precise_type(&self) -> &'static str {
        match self {
            TypeSpec::Checker(_) | TypeSpec::Factory(_) => "function",
            TypeSpec::List(_) => "array",
            TypeSpec::Value(value) => value::precise_type(value),
        }
    }

    /// Invoke the slot. Callers check [`TypeSpec::is_callable`] first; a
    /// non-callable slot raises.
    pub(crate) fn invoke(
        &self,
        props: &Value,
        prop_name: &str,
        component_name: Option<&str>,
        location: &str,
        prop_full_name: Option<&str>,
        secret: Option<&Secret>,
    ) -> CheckResult {
        match self {
            TypeSpec::Checker(checker) => {
                checker.check(props, prop_name, component_name, location, prop_full_name, secret)
            }
            TypeSpec::Factory(_) => Err(Fault::NotAFailure { returned: "function" }),
            TypeSpec::List(_) | TypeSpec::Value(_) => {
                Err(Fault::Raised(PropTypeError::invariant(format!(
                    "Type checker slot `{}` is not a function (found `{}`).",
                    prop_full_name.unwrap_or(prop_name),
                    self.precise_type()
                ))))
            }
        }
    }
}

impl From<Checker> for TypeSpec {
    fn from(checker: Checker) -> Self {
        TypeSpec::Checker(checker)
    }
}

impl From<&Checker> for TypeSpec {
    fn from(checker: &Checker) -> Self {
        TypeSpec::Checker(checker.clone())
    }
}

impl From<Factory> for TypeSpec {
    fn from(factory: Factory) -> Self {
        TypeSpec::Factory(factory)
    }
}

impl From<Value> for TypeSpec {
    fn from(value: Value) -> Self {
        TypeSpec::Value(value)
    }
}

impl From<Vec<TypeSpec>> for TypeSpec {
    fn from(items: Vec<TypeSpec>) -> Self {
        TypeSpec::List(items)
    }
}

impl From<Vec<Checker>> for TypeSpec {
    fn from(items: Vec<Checker>) -> Self {
        TypeSpec::List(items.into_iter().map(TypeSpec::Checker).collect())
    }
}

/// Ordered mapping of names to checker slots.
///
/// Iteration follows insertion order; inserting an existing name replaces
/// its slot in place.
#[derive(Debug, Clone, Default)]
pub struct TypeSpecs {
    entries: Vec<(String, TypeSpec)>,
}

impl TypeSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<TypeSpec>) {
        let name = name.into();
        let spec = spec.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = spec,
            None => self.entries.push((name, spec)),
        }
    }

    /// Builder form of [`TypeSpecs::insert`].
    pub fn with(mut self, name: impl Into<String>, spec: impl Into<TypeSpec>) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeSpec> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeSpec)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, S> FromIterator<(K, S)> for TypeSpecs
where
    K: Into<String>,
    S: Into<TypeSpec>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        let mut specs = TypeSpecs::new();
        for (name, spec) in iter {
            specs.insert(name, spec);
        }
        specs
    }
}
