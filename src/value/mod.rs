//! Dynamic value model for type-checker
//!
//! Checkers inspect values whose type is only known at runtime. This module
//! defines that value space, classifies values into type tags, and renders
//! them for failure messages.

mod introspect;
mod render;
mod types;

pub use introspect::{
    class_name, is_symbol, postfix_for_type_warning, precise_type, prop_type, type_of, ANONYMOUS,
};
pub(crate) use introspect::postfix_for_tag;
pub use render::{display_string, format_number, stringify, stringify_pretty, to_json};
pub use types::{Class, Function, Object, Symbol, Value};
