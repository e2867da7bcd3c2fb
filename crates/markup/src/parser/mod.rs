//! Parser for format tag markup.
//!
//! This module contains the lexer, the payload parsers and the element stream.

mod lexer;
mod stream;
mod value;

pub use lexer::Lexer;
pub use stream::TokenStream;
pub use value::{parse_extent, parse_font};
