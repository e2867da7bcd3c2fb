//! Color values used by format tags.
//!
//! Colors are written as hex with a leading `#` in one of four forms:
//! `#RGB`, `#ARGB`, `#RRGGBB` and `#AARRGGBB`.

use std::fmt;

use crate::error::ColorParseError;

/// A 32-bit ARGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgba {
    /// Create a color from its four channels.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Create a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xff, r, g, b)
    }

    /// Parse a hex color.
    ///
    /// Short forms expand each nibble (`#f00` is `#ffff0000`) and a missing
    /// alpha channel means fully opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// use markup::Rgba;
    ///
    /// assert_eq!(Rgba::parse("#f00").unwrap(), Rgba::rgb(255, 0, 0));
    /// assert_eq!(Rgba::parse("#80ff0000").unwrap(), Rgba::new(0x80, 255, 0, 0));
    /// ```
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let hex = input
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;

        let digits = hex
            .chars()
            .map(Self::parse_hex_digit)
            .collect::<Result<Vec<_>, _>>()?;

        match digits.as_slice() {
            &[r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
            &[a, r, g, b] => Ok(Self::new(a * 17, r * 17, g * 17, b * 17)),
            &[r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(
                Self::join(r1, r2),
                Self::join(g1, g2),
                Self::join(b1, b2),
            )),
            &[a1, a2, r1, r2, g1, g2, b1, b2] => Ok(Self::new(
                Self::join(a1, a2),
                Self::join(r1, r2),
                Self::join(g1, g2),
                Self::join(b1, b2),
            )),
            _ => Err(ColorParseError::InvalidLength(input.to_string())),
        }
    }

    fn parse_hex_digit(c: char) -> Result<u8, ColorParseError> {
        c.to_digit(16)
            .and_then(|d| u8::try_from(d).ok())
            .ok_or(ColorParseError::InvalidDigit(c))
    }

    fn join(high: u8, low: u8) -> u8 {
        high * 16 + low
    }

    /// Returns true if the color is not fully opaque.
    pub fn is_transparent(&self) -> bool {
        self.a != 0xff
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_transparent() {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
    }
}

/// Payload of a color tag: either a color or the reset sentinel (`-`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorValue {
    /// Restore the bar default.
    Reset,
    Color(Rgba),
}

impl ColorValue {
    /// Parse a color tag value. `-` and the empty string reset.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        match input {
            "" | "-" => Ok(ColorValue::Reset),
            _ => Rgba::parse(input).map(ColorValue::Color),
        }
    }

    /// The color, or `None` for the reset sentinel.
    pub fn color(self) -> Option<Rgba> {
        match self {
            ColorValue::Reset => None,
            ColorValue::Color(c) => Some(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_short() {
        assert_eq!(Rgba::parse("#f00").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("#0f0").unwrap(), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::parse("#8f00").unwrap(), Rgba::new(0x88, 255, 0, 0));
    }

    #[test]
    fn parse_hex_long() {
        assert_eq!(Rgba::parse("#ff5733").unwrap(), Rgba::rgb(255, 87, 51));
        assert_eq!(
            Rgba::parse("#00FFFFFF").unwrap(),
            Rgba::new(0, 255, 255, 255)
        );
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(
            Rgba::parse("ff0000"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert_eq!(
            Rgba::parse("#gg0000"),
            Err(ColorParseError::InvalidDigit('g'))
        );
        assert!(matches!(
            Rgba::parse("#12345"),
            Err(ColorParseError::InvalidLength(_))
        ));
    }

    #[test]
    fn display_omits_opaque_alpha() {
        assert_eq!(Rgba::rgb(255, 0, 0).to_string(), "#ff0000");
        assert_eq!(Rgba::new(0x80, 0, 0, 255).to_string(), "#800000ff");
    }

    #[test]
    fn color_value_reset() {
        assert_eq!(ColorValue::parse("-").unwrap(), ColorValue::Reset);
        assert_eq!(ColorValue::parse("").unwrap(), ColorValue::Reset);
        assert_eq!(ColorValue::parse("#fff").unwrap().color(), Some(Rgba::rgb(255, 255, 255)));
    }
}
