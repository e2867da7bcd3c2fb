//! Tokenizer for status bar format tags.
//!
//! Bar modules emit plain text interleaved with format tags. This crate turns
//! such a string into a stream of [`Element`]s: literal text runs and decoded
//! tags.
//!
//! # Overview
//!
//! Tags live in `%{...}` blocks; one block may hold several tags separated by
//! whitespace:
//!
//! - `%{F#ff0000}` / `%{F-}` - foreground color / reset
//! - `%{B#000}`, `%{u#fff}`, `%{o#fff}` - background, underline, overline color
//! - `%{T2}` - font index, `%{O10}` - offset in pixels (or `pt`)
//! - `%{l}`, `%{c}`, `%{r}` - alignment zone
//! - `%{R}` - reverse video, `%{PR}` - reset all formatting
//! - `%{+u}`, `%{-o}`, `%{!u}` - set, unset, toggle an attribute
//! - `%{A1:command:}...%{A}` - clickable region for a mouse button
//!
//! # Usage
//!
//! ```
//! use markup::{ColorValue, Element, Format, Rgba, Tag, TokenStream};
//!
//! let elements: Vec<_> = TokenStream::new("%{F#f00}Hi")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(
//!     elements[0],
//!     Element::Tag(Tag::Format(Format::Foreground(ColorValue::Color(Rgba::rgb(255, 0, 0)))))
//! );
//! assert_eq!(elements[1], Element::Text("Hi".into()));
//! ```

pub mod color;
pub mod element;
pub mod error;
pub mod parser;

pub use color::{ColorValue, Rgba};
pub use element::{
    ActionTag, Activation, Attribute, Control, Element, Extent, ExtentUnit, FontSelector, Format,
    MouseButton, Tag,
};
pub use error::{ColorParseError, ParseError};
pub use parser::{Lexer, TokenStream};
