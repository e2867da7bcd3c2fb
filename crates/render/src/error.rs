//! Error types for markup dispatch.

use markup::{MouseButton, ParseError};
use thiserror::Error;

use crate::context::Alignment;

/// Errors that can occur while dispatching one markup string.
///
/// [`DispatchError::Parse`] and [`DispatchError::UnmatchedClose`] are
/// recoverable: the dispatcher logs them, drops the offending element and
/// carries on. [`DispatchError::Fatal`] aborts the pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    /// Malformed tag syntax.
    #[error("parser error (reason: {0})")]
    Parse(#[from] ParseError),

    /// An action close tag with no matching open region.
    #[error("no open action for {} in the {zone} zone", describe_button(.button))]
    UnmatchedClose {
        button: Option<MouseButton>,
        zone: Alignment,
    },

    /// The tokenizer produced something the dispatcher cannot handle.
    #[error(transparent)]
    Fatal(#[from] InvariantViolation),
}

impl DispatchError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DispatchError::Fatal(_))
    }
}

fn describe_button(button: &Option<MouseButton>) -> String {
    match button {
        Some(b) => format!("button {}", b.number()),
        None => "any button".to_string(),
    }
}

/// A mismatch between the tokenizer's grammar and the dispatcher.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("unrecognized tag format: {0}")]
    UnknownFormat(char),

    #[error("unrecognized control tag: {0}")]
    UnknownControl(String),
}
