//! Rendering context accumulated while interpreting one markup string.
//!
//! A [`Context`] is created fresh for every dispatch pass and mutated by the
//! format tags it encounters. Renderers read it to decide how text is drawn.

use std::fmt;
use std::num::NonZeroUsize;

use bitflags::bitflags;
use markup::{Activation, Attribute, ColorValue, Extent, FontSelector, Rgba};

use crate::settings::BarSettings;

bitflags! {
    /// Boolean text attributes currently in effect.
    ///
    /// # Example
    ///
    /// ```
    /// use render::Attributes;
    ///
    /// let attrs = Attributes::UNDERLINE | Attributes::REVERSE;
    /// assert!(attrs.contains(Attributes::UNDERLINE));
    /// assert!(!attrs.contains(Attributes::OVERLINE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        const UNDERLINE = 0b0000_0001;
        const OVERLINE  = 0b0000_0010;
        /// Foreground and background swapped.
        const REVERSE   = 0b0000_0100;
    }
}

impl From<Attribute> for Attributes {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Underline => Attributes::UNDERLINE,
            Attribute::Overline => Attributes::OVERLINE,
            Attribute::Reverse => Attributes::REVERSE,
        }
    }
}

/// Horizontal zone of the bar. Each zone has its own coordinate space and
/// its own set of clickable regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    /// Stable index for per-zone tables.
    pub fn index(self) -> usize {
        match self {
            Alignment::Left => 0,
            Alignment::Center => 1,
            Alignment::Right => 2,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        f.write_str(name)
    }
}

/// The mutable part of a [`Context`].
///
/// `None` colors and font mean "use the bar default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextState {
    pub fg: Option<Rgba>,
    pub bg: Option<Rgba>,
    pub ul: Option<Rgba>,
    pub ol: Option<Rgba>,
    pub font: Option<NonZeroUsize>,
    pub alignment: Alignment,
    pub attributes: Attributes,
}

/// Rendering state for one dispatch pass, bound to the bar's settings.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    settings: &'a BarSettings,
    state: ContextState,
}

impl<'a> Context<'a> {
    pub fn new(settings: &'a BarSettings) -> Self {
        Self {
            settings,
            state: ContextState::default(),
        }
    }

    pub fn apply_bg(&mut self, color: ColorValue) {
        self.state.bg = color.color();
    }

    pub fn apply_fg(&mut self, color: ColorValue) {
        self.state.fg = color.color();
    }

    pub fn apply_ol(&mut self, color: ColorValue) {
        self.state.ol = color.color();
    }

    pub fn apply_ul(&mut self, color: ColorValue) {
        self.state.ul = color.color();
    }

    pub fn apply_font(&mut self, font: FontSelector) {
        self.state.font = font.index();
    }

    /// Switch zone. Callers must also announce the change to the bar, see
    /// [`Dispatch`](crate::Dispatch).
    pub fn apply_alignment(&mut self, alignment: Alignment) {
        self.state.alignment = alignment;
    }

    pub fn apply_attr(&mut self, activation: Activation, attribute: Attribute) {
        let flag = Attributes::from(attribute);
        match activation {
            Activation::Set => self.state.attributes.insert(flag),
            Activation::Unset => self.state.attributes.remove(flag),
            Activation::Toggle => self.state.attributes.toggle(flag),
        }
    }

    pub fn apply_reverse(&mut self) {
        self.apply_attr(Activation::Toggle, Attribute::Reverse);
    }

    /// Restore colors, font and attributes. Alignment is kept.
    pub fn apply_reset(&mut self) {
        self.state = ContextState {
            alignment: self.state.alignment,
            ..ContextState::default()
        };
    }

    pub fn settings(&self) -> &'a BarSettings {
        self.settings
    }

    pub fn state(&self) -> &ContextState {
        &self.state
    }

    pub fn fg(&self) -> Option<Rgba> {
        self.state.fg
    }

    pub fn bg(&self) -> Option<Rgba> {
        self.state.bg
    }

    pub fn ul(&self) -> Option<Rgba> {
        self.state.ul
    }

    pub fn ol(&self) -> Option<Rgba> {
        self.state.ol
    }

    pub fn font(&self) -> Option<NonZeroUsize> {
        self.state.font
    }

    pub fn alignment(&self) -> Alignment {
        self.state.alignment
    }

    pub fn attributes(&self) -> Attributes {
        self.state.attributes
    }

    pub fn has_attr(&self, attribute: Attribute) -> bool {
        self.state.attributes.contains(attribute.into())
    }

    /// Foreground to draw with, after defaults and reverse video.
    pub fn effective_fg(&self) -> Rgba {
        if self.has_attr(Attribute::Reverse) {
            self.state.bg.unwrap_or(self.settings.background)
        } else {
            self.state.fg.unwrap_or(self.settings.foreground)
        }
    }

    /// Background to draw with, after defaults and reverse video.
    pub fn effective_bg(&self) -> Rgba {
        if self.has_attr(Attribute::Reverse) {
            self.state.fg.unwrap_or(self.settings.foreground)
        } else {
            self.state.bg.unwrap_or(self.settings.background)
        }
    }

    pub fn effective_ul(&self) -> Rgba {
        self.state.ul.unwrap_or(self.settings.underline_color)
    }

    pub fn effective_ol(&self) -> Rgba {
        self.state.ol.unwrap_or(self.settings.overline_color)
    }

    /// Convert an offset to device pixels using the bar's dpi.
    pub fn to_pixels(&self, extent: Extent) -> i32 {
        extent.to_pixels(self.settings.dpi)
    }
}
