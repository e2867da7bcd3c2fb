//! Elements produced by the tokenizer.

use std::fmt;
use std::num::NonZeroUsize;

use crate::color::ColorValue;

/// A single parse result: a literal text run or a tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Text(String),
    Tag(Tag),
}

impl Element {
    pub fn is_tag(&self) -> bool {
        matches!(self, Element::Tag(_))
    }
}

/// A decoded format tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    /// Color, font, layout, action and control tags.
    Format(Format),
    /// Boolean text attributes: `+u`, `-o`, `!u`, ...
    Attr {
        activation: Activation,
        attribute: Attribute,
    },
}

/// Format tags, keyed by their tag character.
///
/// The set is closed for this version of the grammar but may grow, so
/// consumers outside this crate must handle unknown variants.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Format {
    /// `A`: open or close a clickable region.
    Action(ActionTag),
    /// `B`: background color.
    Background(ColorValue),
    /// `F`: foreground color.
    Foreground(ColorValue),
    /// `T`: font selector.
    Font(FontSelector),
    /// `O`: horizontal offset.
    Offset(Extent),
    /// `R`: reverse video.
    Reverse,
    /// `o`: overline color.
    Overline(ColorValue),
    /// `u`: underline color.
    Underline(ColorValue),
    /// `P`: control code.
    Control(Control),
    /// `l`
    AlignLeft,
    /// `r`
    AlignRight,
    /// `c`
    AlignCenter,
}

impl Format {
    /// The character that introduces this tag in markup.
    pub fn tag_char(&self) -> char {
        match self {
            Format::Action(_) => 'A',
            Format::Background(_) => 'B',
            Format::Foreground(_) => 'F',
            Format::Font(_) => 'T',
            Format::Offset(_) => 'O',
            Format::Reverse => 'R',
            Format::Overline(_) => 'o',
            Format::Underline(_) => 'u',
            Format::Control(_) => 'P',
            Format::AlignLeft => 'l',
            Format::AlignRight => 'r',
            Format::AlignCenter => 'c',
        }
    }
}

/// Payload of an `A` tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionTag {
    /// `%{A1:command:}`
    Open { button: MouseButton, command: String },
    /// `%{A1}` closes a region of that button, `%{A}` the most recent one.
    Close { button: Option<MouseButton> },
}

/// Pointer buttons that can trigger an action, numbered as in markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 1,
    Middle = 2,
    Right = 3,
    ScrollUp = 4,
    ScrollDown = 5,
    DoubleLeft = 6,
    DoubleMiddle = 7,
    DoubleRight = 8,
}

impl MouseButton {
    /// Map a markup digit (`'1'..='8'`) to its button.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(MouseButton::Left),
            '2' => Some(MouseButton::Middle),
            '3' => Some(MouseButton::Right),
            '4' => Some(MouseButton::ScrollUp),
            '5' => Some(MouseButton::ScrollDown),
            '6' => Some(MouseButton::DoubleLeft),
            '7' => Some(MouseButton::DoubleMiddle),
            '8' => Some(MouseButton::DoubleRight),
            _ => None,
        }
    }

    /// The markup digit for this button.
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Payload of a `T` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSelector {
    /// `T-`, `T` or `T0`
    Default,
    /// 1-based index into the bar's font list.
    Index(NonZeroUsize),
}

impl FontSelector {
    pub fn index(self) -> Option<NonZeroUsize> {
        match self {
            FontSelector::Default => None,
            FontSelector::Index(i) => Some(i),
        }
    }
}

/// Unit of an [`Extent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExtentUnit {
    #[default]
    Pixel,
    Point,
}

/// A signed length such as `5`, `-3px` or `2.5pt`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Extent {
    pub value: f64,
    pub unit: ExtentUnit,
}

impl Extent {
    pub fn pixels(value: f64) -> Self {
        Self {
            value,
            unit: ExtentUnit::Pixel,
        }
    }

    pub fn points(value: f64) -> Self {
        Self {
            value,
            unit: ExtentUnit::Point,
        }
    }

    /// Convert to whole device pixels at the given dots per inch.
    pub fn to_pixels(self, dpi: f64) -> i32 {
        let px = match self.unit {
            ExtentUnit::Pixel => self.value,
            ExtentUnit::Point => self.value * dpi / 72.0,
        };
        // Saturating float-to-int conversion.
        px.round() as i32
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            ExtentUnit::Pixel => "px",
            ExtentUnit::Point => "pt",
        };
        write!(f, "{}{}", self.value, suffix)
    }
}

/// Payload of a `P` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Control {
    /// `PR`: reset colors, font and attributes.
    Reset,
}

/// How an attribute tag changes its attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// `+`
    Set,
    /// `-`
    Unset,
    /// `!`
    Toggle,
}

/// Boolean text attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Underline,
    Overline,
    /// Only reachable through the `R` tag.
    Reverse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_button_digits() {
        assert_eq!(MouseButton::from_digit('1'), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_digit('8'), Some(MouseButton::DoubleRight));
        assert_eq!(MouseButton::from_digit('0'), None);
        assert_eq!(MouseButton::from_digit('9'), None);
        assert_eq!(MouseButton::ScrollDown.number(), 5);
    }

    #[test]
    fn extent_to_pixels() {
        assert_eq!(Extent::pixels(-3.0).to_pixels(96.0), -3);
        assert_eq!(Extent::points(6.0).to_pixels(96.0), 8);
        assert_eq!(Extent::points(12.0).to_pixels(72.0), 12);
    }

    #[test]
    fn extent_display() {
        assert_eq!(Extent::pixels(5.0).to_string(), "5px");
        assert_eq!(Extent::points(-2.5).to_string(), "-2.5pt");
    }
}
