//! Pull-based element stream over a markup string.

use std::iter::Peekable;

use crate::element::Element;
use crate::error::ParseError;

use super::lexer::Lexer;

/// A lazy, finite, non-restartable sequence of elements.
///
/// Thin wrapper over [`Lexer`] that can answer whether another element
/// (or error) is pending without consuming it.
///
/// # Examples
///
/// ```
/// use markup::{Element, TokenStream};
///
/// let mut stream = TokenStream::new("bar%{F-}");
/// assert!(stream.has_next());
/// assert_eq!(stream.next_element(), Some(Ok(Element::Text("bar".into()))));
/// assert!(stream.next_element().is_some());
/// assert!(!stream.has_next());
/// ```
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    lexer: Peekable<Lexer<'a>>,
}

impl<'a> TokenStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input).peekable(),
        }
    }

    /// Returns true if [`next_element`](Self::next_element) will yield something.
    pub fn has_next(&mut self) -> bool {
        self.lexer.peek().is_some()
    }

    /// The next element, or the error for a malformed tag block.
    pub fn next_element(&mut self) -> Option<Result<Element, ParseError>> {
        self.lexer.next()
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Result<Element, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_element()
    }
}
