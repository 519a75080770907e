//! Formatting: value formatting (§4.2), boolean specifiers (§4.3), the
//! markdown inline scanner, and the `:fmt` specifier grammar.

pub mod boolean_registry;
pub mod markdown;
pub mod specifier;
pub mod value_formatter;

pub use boolean_registry::BooleanFormatterRegistry;
pub use specifier::Specifier;
pub use value_formatter::{format, Formatted};
