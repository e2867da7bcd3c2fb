//! Error types for format tag parsing.

use thiserror::Error;

/// Errors raised while tokenizing a markup string.
///
/// Every variant is recoverable: the lexer skips the rest of the offending
/// tag block and keeps scanning, so callers can log the error and continue.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A `%{` block that never sees its closing `}`.
    #[error("unclosed tag block starting at position {position}")]
    UnclosedTag { position: usize },

    /// A tag character outside the known vocabulary.
    #[error("unknown tag '{tag}' at position {position}")]
    UnknownTag { tag: char, position: usize },

    /// A tag that requires a value was given none.
    #[error("tag '{tag}' at position {position} requires a value")]
    MissingValue { tag: char, position: usize },

    /// A tag that takes no value was followed by one.
    #[error("tag '{tag}' at position {position} does not take a value")]
    UnexpectedValue { tag: char, position: usize },

    /// Invalid color value in a `B`, `F`, `o` or `u` tag.
    #[error("invalid color '{value}' at position {position}: {source}")]
    InvalidColor {
        value: String,
        position: usize,
        #[source]
        source: ColorParseError,
    },

    /// Invalid font selector in a `T` tag.
    #[error("invalid font index '{value}' at position {position}")]
    InvalidFont { value: String, position: usize },

    /// Invalid offset in an `O` tag.
    #[error("invalid offset '{value}' at position {position}")]
    InvalidOffset { value: String, position: usize },

    /// Mouse button digit outside `1..=8`.
    #[error("invalid mouse button '{button}' at position {position}")]
    InvalidButton { button: char, position: usize },

    /// An action command without its terminating `:`.
    #[error("unclosed action command starting at position {position}")]
    UnclosedAction { position: usize },

    /// Unknown code in a `P` tag.
    #[error("unknown control code '{value}' at position {position}")]
    InvalidControl { value: String, position: usize },

    /// Unknown attribute in a `+`, `-` or `!` tag.
    #[error("invalid attribute '{value}' at position {position}")]
    InvalidAttribute { value: String, position: usize },
}

impl ParseError {
    /// Byte offset in the input where the error was detected.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnclosedTag { position }
            | ParseError::UnknownTag { position, .. }
            | ParseError::MissingValue { position, .. }
            | ParseError::UnexpectedValue { position, .. }
            | ParseError::InvalidColor { position, .. }
            | ParseError::InvalidFont { position, .. }
            | ParseError::InvalidOffset { position, .. }
            | ParseError::InvalidButton { position, .. }
            | ParseError::UnclosedAction { position }
            | ParseError::InvalidControl { position, .. }
            | ParseError::InvalidAttribute { position, .. } => *position,
        }
    }
}

/// Errors that can occur when parsing a color.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorParseError {
    /// Colors must start with `#`.
    #[error("missing '#' prefix: {0}")]
    MissingHash(String),

    /// Not a hex digit.
    #[error("invalid hex digit: {0}")]
    InvalidDigit(char),

    /// Hex string of a length other than 3, 4, 6 or 8.
    #[error("invalid hex length: {0}")]
    InvalidLength(String),
}
