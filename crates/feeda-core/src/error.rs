//! Error types for the client core.
//!
//! The lock state machine itself never fails: invalid inputs are ignored and
//! collaborator failures arrive as events. Errors only exist at the string
//! boundaries (persisted values, lifecycle names from the platform).

use thiserror::Error;

/// A string did not name a known value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseError {
    /// What was being parsed (e.g. "theme").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_owned() }
    }
}
