//! Lexer for format tag markup.
//!
//! Splits input into text runs and tags. Tags live in blocks delimited by
//! `%{` and `}`; one block may carry several whitespace-separated tags.

use crate::color::ColorValue;
use crate::element::{Activation, ActionTag, Attribute, Control, Element, Format, MouseButton, Tag};
use crate::error::ParseError;

use super::value::{parse_extent, parse_font};

/// Lexer for format tag markup.
///
/// Yields one [`Element`] per text run or tag. A malformed tag yields a
/// [`ParseError`], after which the lexer resumes behind the `}` that ends the
/// offending block.
///
/// # Examples
///
/// ```
/// use markup::parser::Lexer;
///
/// let lexer = Lexer::new("%{F#f00}Hello%{F-}");
/// let elements: Vec<_> = lexer.collect::<Result<_, _>>().unwrap();
/// assert_eq!(elements.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    /// Start of the `%{` block being scanned, if any.
    block_start: Option<usize>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            block_start: None,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn is_separator(c: char) -> bool {
        c == '}' || c.is_whitespace()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Consume text up to the next `%{` or end of input.
    fn consume_text(&mut self) -> &'a str {
        let rest = self.remaining();
        let len = rest.find("%{").unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consume a tag value, which runs up to whitespace or `}`.
    fn consume_value(&mut self) -> &'a str {
        let rest = self.remaining();
        let len = rest.find(Self::is_separator).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Fail if a value-less tag is directly followed by more characters.
    fn expect_separator(&self, tag: char, position: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if !Self::is_separator(c) => Err(ParseError::UnexpectedValue { tag, position }),
            _ => Ok(()),
        }
    }

    /// Skip the rest of the current block after an error.
    fn recover(&mut self, tag_start: usize) {
        let rest = &self.input[tag_start..];
        self.pos = rest
            .find('}')
            .map_or(self.input.len(), |i| tag_start + i + 1);
        self.block_start = None;
    }

    /// Consume one tag inside a block.
    fn consume_tag(&mut self) -> Result<Tag, ParseError> {
        let position = self.pos;
        let Some(c) = self.advance() else {
            return Err(ParseError::UnclosedTag {
                position: self.block_start.unwrap_or(position),
            });
        };

        let format = match c {
            'B' => Format::Background(self.consume_color(position)?),
            'F' => Format::Foreground(self.consume_color(position)?),
            'o' => Format::Overline(self.consume_color(position)?),
            'u' => Format::Underline(self.consume_color(position)?),
            'T' => {
                let value = self.consume_value();
                let font = parse_font(value).ok_or_else(|| ParseError::InvalidFont {
                    value: value.to_string(),
                    position,
                })?;
                Format::Font(font)
            }
            'O' => {
                let value = self.consume_value();
                if value.is_empty() {
                    return Err(ParseError::MissingValue { tag: c, position });
                }
                let extent = parse_extent(value).ok_or_else(|| ParseError::InvalidOffset {
                    value: value.to_string(),
                    position,
                })?;
                Format::Offset(extent)
            }
            'P' => {
                let value = self.consume_value();
                match value {
                    "R" => Format::Control(Control::Reset),
                    "" => return Err(ParseError::MissingValue { tag: c, position }),
                    _ => {
                        return Err(ParseError::InvalidControl {
                            value: value.to_string(),
                            position,
                        });
                    }
                }
            }
            'R' | 'l' | 'r' | 'c' => {
                self.expect_separator(c, position)?;
                match c {
                    'R' => Format::Reverse,
                    'l' => Format::AlignLeft,
                    'r' => Format::AlignRight,
                    _ => Format::AlignCenter,
                }
            }
            'A' => Format::Action(self.consume_action(position)?),
            '+' | '-' | '!' => return self.consume_attr(c, position),
            _ => return Err(ParseError::UnknownTag { tag: c, position }),
        };

        Ok(Tag::Format(format))
    }

    fn consume_color(&mut self, position: usize) -> Result<ColorValue, ParseError> {
        let value = self.consume_value();
        ColorValue::parse(value).map_err(|source| ParseError::InvalidColor {
            value: value.to_string(),
            position,
            source,
        })
    }

    /// Consume an attribute tag after its activation character.
    fn consume_attr(&mut self, c: char, position: usize) -> Result<Tag, ParseError> {
        let activation = match c {
            '+' => Activation::Set,
            '-' => Activation::Unset,
            _ => Activation::Toggle,
        };

        let value = self.consume_value();
        let attribute = match value {
            "u" => Attribute::Underline,
            "o" => Attribute::Overline,
            _ => {
                return Err(ParseError::InvalidAttribute {
                    value: value.to_string(),
                    position,
                });
            }
        };

        Ok(Tag::Attr {
            activation,
            attribute,
        })
    }

    /// Consume an action tag after the `A`: `[button][:command:]`.
    fn consume_action(&mut self, position: usize) -> Result<ActionTag, ParseError> {
        let button = match self.peek() {
            Some(d) if d.is_ascii_digit() => {
                self.advance();
                let button = MouseButton::from_digit(d)
                    .ok_or(ParseError::InvalidButton { button: d, position })?;
                Some(button)
            }
            _ => None,
        };

        if self.peek() != Some(':') {
            self.expect_separator('A', position)?;
            return Ok(ActionTag::Close { button });
        }
        self.advance();

        let mut command = String::new();
        loop {
            match self.advance() {
                None => return Err(ParseError::UnclosedAction { position }),
                Some(':') => break,
                Some('\\') if self.peek() == Some(':') => {
                    self.advance();
                    command.push(':');
                }
                Some(ch) => command.push(ch),
            }
        }

        if command.is_empty() {
            return Err(ParseError::MissingValue { tag: 'A', position });
        }
        self.expect_separator('A', position)?;

        Ok(ActionTag::Open {
            button: button.unwrap_or(MouseButton::Left),
            command,
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Element, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(block_start) = self.block_start {
                self.skip_whitespace();
                match self.peek() {
                    None => {
                        self.block_start = None;
                        return Some(Err(ParseError::UnclosedTag {
                            position: block_start,
                        }));
                    }
                    Some('}') => {
                        self.advance();
                        self.block_start = None;
                    }
                    Some(_) => {
                        let tag_start = self.pos;
                        let result = self.consume_tag();
                        if result.is_err() {
                            self.recover(tag_start);
                        }
                        return Some(result.map(Element::Tag));
                    }
                }
            } else if self.pos >= self.input.len() {
                return None;
            } else if self.remaining().starts_with("%{") {
                self.block_start = Some(self.pos);
                self.pos += 2;
            } else {
                let text = self.consume_text();
                return Some(Ok(Element::Text(text.to_string())));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::color::Rgba;
    use crate::element::{Extent, FontSelector};

    fn lex(input: &str) -> Vec<Element> {
        Lexer::new(input).collect::<Result<Vec<_>, _>>().unwrap()
    }

    fn text(s: &str) -> Element {
        Element::Text(s.to_string())
    }

    fn format(f: Format) -> Element {
        Element::Tag(Tag::Format(f))
    }

    #[test]
    fn lex_plain_text() {
        assert_eq!(lex("Hello World"), vec![text("Hello World")]);
    }

    #[test]
    fn lex_empty_input() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn lex_lone_percent_and_brace_are_text() {
        assert_eq!(lex("100% } done"), vec![text("100% } done")]);
    }

    #[test]
    fn lex_color_tags() {
        assert_eq!(
            lex("A%{F#ff0000}B%{F-}C"),
            vec![
                text("A"),
                format(Format::Foreground(ColorValue::Color(Rgba::rgb(255, 0, 0)))),
                text("B"),
                format(Format::Foreground(ColorValue::Reset)),
                text("C"),
            ]
        );
    }

    #[test]
    fn lex_multiple_tags_in_one_block() {
        assert_eq!(
            lex("%{B#000 u#fff  +u}x"),
            vec![
                format(Format::Background(ColorValue::Color(Rgba::rgb(0, 0, 0)))),
                format(Format::Underline(ColorValue::Color(Rgba::rgb(255, 255, 255)))),
                Element::Tag(Tag::Attr {
                    activation: Activation::Set,
                    attribute: Attribute::Underline,
                }),
                text("x"),
            ]
        );
    }

    #[test]
    fn lex_empty_block() {
        assert_eq!(lex("a%{}b%{ }"), vec![text("a"), text("b")]);
    }

    #[test]
    fn lex_font_and_offset() {
        assert_eq!(
            lex("%{T2}%{T-}%{O-4}%{O3pt}"),
            vec![
                format(Format::Font(FontSelector::Index(NonZeroUsize::new(2).unwrap()))),
                format(Format::Font(FontSelector::Default)),
                format(Format::Offset(Extent::pixels(-4.0))),
                format(Format::Offset(Extent::points(3.0))),
            ]
        );
    }

    #[test]
    fn lex_alignment_reverse_and_control() {
        assert_eq!(
            lex("%{l}%{c R}%{r}%{PR}"),
            vec![
                format(Format::AlignLeft),
                format(Format::AlignCenter),
                format(Format::Reverse),
                format(Format::AlignRight),
                format(Format::Control(Control::Reset)),
            ]
        );
    }

    #[test]
    fn lex_attributes() {
        assert_eq!(
            lex("%{-o !u}"),
            vec![
                Element::Tag(Tag::Attr {
                    activation: Activation::Unset,
                    attribute: Attribute::Overline,
                }),
                Element::Tag(Tag::Attr {
                    activation: Activation::Toggle,
                    attribute: Attribute::Underline,
                }),
            ]
        );
    }

    #[test]
    fn lex_action_open_and_close() {
        assert_eq!(
            lex("%{A1:echo hi:}click%{A}"),
            vec![
                format(Format::Action(ActionTag::Open {
                    button: MouseButton::Left,
                    command: "echo hi".to_string(),
                })),
                text("click"),
                format(Format::Action(ActionTag::Close { button: None })),
            ]
        );
    }

    #[test]
    fn lex_action_default_button_and_escaped_colon() {
        assert_eq!(
            lex(r"%{A:notify\:now:}%{A3}"),
            vec![
                format(Format::Action(ActionTag::Open {
                    button: MouseButton::Left,
                    command: "notify:now".to_string(),
                })),
                format(Format::Action(ActionTag::Close {
                    button: Some(MouseButton::Right),
                })),
            ]
        );
    }

    #[test]
    fn lex_action_command_may_contain_braces() {
        assert_eq!(
            lex("%{A2:echo }:}"),
            vec![format(Format::Action(ActionTag::Open {
                button: MouseButton::Middle,
                command: "echo }".to_string(),
            }))]
        );
    }

    #[test]
    fn lex_unicode_text() {
        assert_eq!(lex("%{F-}日本語"), vec![format(Format::Foreground(ColorValue::Reset)), text("日本語")]);
    }

    #[test]
    fn lex_unknown_tag_recovers() {
        let items: Vec<_> = Lexer::new("A%{Zfoo}B").collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Ok(text("A")));
        assert_eq!(
            items[1],
            Err(ParseError::UnknownTag {
                tag: 'Z',
                position: 3
            })
        );
        assert_eq!(items[2], Ok(text("B")));
    }

    #[test]
    fn lex_error_skips_rest_of_block() {
        let items: Vec<_> = Lexer::new("%{F#zz B#000}x").collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Err(ParseError::InvalidColor { .. })));
        assert_eq!(items[1], Ok(text("x")));
    }

    #[test]
    fn lex_unclosed_block() {
        let items: Vec<_> = Lexer::new("a%{F#fff").collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Ok(text("a")));
        assert!(items[1].is_ok());
        assert_eq!(items[2], Err(ParseError::UnclosedTag { position: 1 }));
    }

    #[test]
    fn lex_unclosed_action() {
        // The command swallows the `}`, so scanning resumes right after it.
        let items: Vec<_> = Lexer::new("%{A1:echo}rest").collect();
        assert_eq!(
            items,
            vec![
                Err(ParseError::UnclosedAction { position: 2 }),
                Ok(text("rest")),
            ]
        );
    }

    #[test]
    fn lex_value_on_valueless_tag() {
        let items: Vec<_> = Lexer::new("%{lx}").collect();
        assert_eq!(
            items,
            vec![Err(ParseError::UnexpectedValue {
                tag: 'l',
                position: 2
            })]
        );
    }

    #[test]
    fn lex_invalid_payloads() {
        let errs: Vec<_> = ["%{A9}", "%{PX}", "%{P}", "%{O}", "%{Ox}", "%{Tx}", "%{+x}", "%{A1::}"]
            .iter()
            .map(|input| Lexer::new(input).next())
            .collect();

        assert!(matches!(errs[0], Some(Err(ParseError::InvalidButton { button: '9', .. }))));
        assert!(matches!(errs[1], Some(Err(ParseError::InvalidControl { .. }))));
        assert!(matches!(errs[2], Some(Err(ParseError::MissingValue { tag: 'P', .. }))));
        assert!(matches!(errs[3], Some(Err(ParseError::MissingValue { tag: 'O', .. }))));
        assert!(matches!(errs[4], Some(Err(ParseError::InvalidOffset { .. }))));
        assert!(matches!(errs[5], Some(Err(ParseError::InvalidFont { .. }))));
        assert!(matches!(errs[6], Some(Err(ParseError::InvalidAttribute { .. }))));
        assert!(matches!(errs[7], Some(Err(ParseError::MissingValue { tag: 'A', .. }))));
    }
}
