//! Static bar settings consulted by the rendering context.
//!
//! `defaults/bar.default.toml` is embedded into the crate. Applications layer
//! user files and overrides on top of it via [`Loader`] before deserializing
//! into [`BarSettings`].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use markup::Rgba;
use serde::{Deserialize, Deserializer};

const DEFAULT_TOML: &str = include_str!("../defaults/bar.default.toml");

/// Read-only bar configuration.
///
/// Colors here are what an unset context color resolves to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BarSettings {
    #[serde(deserialize_with = "deserialize_color")]
    pub foreground: Rgba,
    #[serde(deserialize_with = "deserialize_color")]
    pub background: Rgba,
    #[serde(deserialize_with = "deserialize_color")]
    pub underline_color: Rgba,
    #[serde(deserialize_with = "deserialize_color")]
    pub overline_color: Rgba,
    /// Thickness of underlines and overlines, in pixels.
    pub line_size: u32,
    /// Used to convert point offsets to pixels.
    pub dpi: f64,
}

impl Default for BarSettings {
    fn default() -> Self {
        Self {
            foreground: Rgba::rgb(0xff, 0xff, 0xff),
            background: Rgba::rgb(0x22, 0x22, 0x22),
            underline_color: Rgba::rgb(0xff, 0xff, 0xff),
            overline_color: Rgba::rgb(0xff, 0xff, 0xff),
            line_size: 1,
            dpi: 96.0,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Rgba, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Rgba::parse(&value).map_err(serde::de::Error::custom)
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a settings file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional settings file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<BarSettings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BarSettings, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_default_impl() {
        let settings = load_defaults().expect("defaults to deserialize");
        assert_eq!(settings, BarSettings::default());
    }

    #[test]
    fn supports_overrides() {
        let settings = Loader::new()
            .set_override("foreground", "#ff0000")
            .expect("override to apply")
            .set_override("dpi", 144.0)
            .expect("override to apply")
            .build()
            .expect("settings to build");
        assert_eq!(settings.foreground, Rgba::rgb(255, 0, 0));
        assert_eq!(settings.dpi, 144.0);
    }

    #[test]
    fn rejects_invalid_colors() {
        let result = Loader::new()
            .set_override("background", "blue")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/nonexistent/polymark/bar.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let settings = Loader::new()
            .with_optional_file("/nonexistent/polymark/bar.toml")
            .build()
            .expect("settings to build");
        assert_eq!(settings.line_size, 1);
    }
}
