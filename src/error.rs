//! Engine error taxonomy
//!
//! Mirrors the hand-rolled phase-error pattern used elsewhere in this
//! workspace: a plain enum with `Display`/`Error` impls rather than a
//! derive-macro error crate. Unmatched `{{#if}}`/`{{#foreach}}` markers are
//! *not* represented here — per the design, they degrade silently to literal
//! text instead of becoming an `EngineError` (see `detect`).

use std::fmt;

/// Fatal error kinds that abort `process_template` and are surfaced via
/// `ProcessResult::error`.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A condition or inline boolean expression could not be parsed.
    InvalidExpression(String),
    /// A format specifier is not registered for the active locale/type.
    UnknownFormat(String),
    /// A `{{#foreach X}}` collection path resolved to a non-collection value.
    TypeError(String),
    /// A placeholder referenced an unresolvable path under `Throw` behavior.
    MissingVariable(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidExpression(msg) => write!(f, "invalid expression: {msg}"),
            EngineError::UnknownFormat(msg) => write!(f, "unknown format: {msg}"),
            EngineError::TypeError(msg) => write!(f, "type error: {msg}"),
            EngineError::MissingVariable(name) => write!(f, "missing variable: {name}"),
        }
    }
}

impl std::error::Error for EngineError {}
