//! The checker registry
//!
//! Primitive checkers are built once and shared; composite entries are
//! constructor methods returning new checkers.

use std::sync::OnceLock;

use crate::value::{Class, Value};

use super::batch::{self, BatchResult};
use super::chain::Checker;
use super::composite;
use super::primitive;
use super::spec::{TypeSpec, TypeSpecs};

static REGISTRY: OnceLock<TypeChecker> = OnceLock::new();

/// Catalog of checkers.
#[derive(Debug, Clone)]
pub struct TypeChecker {
    pub array: Checker,
    pub bool: Checker,
    pub func: Checker,
    pub number: Checker,
    pub object: Checker,
    pub string: Checker,
    pub symbol: Checker,
    pub any: Checker,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    /// Assemble a registry. Prefer [`TypeChecker::global`].
    pub fn new() -> Self {
        Self {
            array: primitive::primitive("array"),
            bool: primitive::primitive("boolean"),
            func: primitive::primitive("function"),
            number: primitive::primitive("number"),
            object: primitive::primitive("object"),
            string: primitive::primitive("string"),
            symbol: primitive::primitive("symbol"),
            any: primitive::any(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static TypeChecker {
        REGISTRY.get_or_init(TypeChecker::new)
    }

    /// See [`composite::array_of`].
    pub fn array_of(&self, item: impl Into<TypeSpec>) -> Checker {
        composite::array_of(item)
    }

    /// See [`composite::instance_of`].
    pub fn instance_of(&self, class: &Class) -> Checker {
        composite::instance_of(class)
    }

    /// See [`composite::object_of`].
    pub fn object_of(&self, item: impl Into<TypeSpec>) -> Checker {
        composite::object_of(item)
    }

    /// See [`composite::one_of`].
    pub fn one_of(&self, expected: impl Into<Value>) -> Checker {
        composite::one_of(expected)
    }

    /// See [`composite::one_of_type`].
    pub fn one_of_type(&self, checkers: impl Into<TypeSpec>) -> Checker {
        composite::one_of_type(checkers)
    }

    /// See [`composite::shape`].
    pub fn shape(&self, fields: TypeSpecs) -> Checker {
        composite::shape(fields)
    }

    /// See [`composite::exact`].
    pub fn exact(&self, fields: TypeSpecs) -> Checker {
        composite::exact(fields)
    }

    /// See [`batch::check_prop_types`].
    pub fn check_prop_types(
        type_specs: &TypeSpecs,
        values: &Value,
        location: &str,
        component_name: Option<&str>,
    ) -> BatchResult {
        batch::check_prop_types(type_specs, values, location, component_name)
    }
}
