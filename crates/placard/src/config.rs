//! Configuration types for Placard chart rendering.
//!
//! This module provides configuration structures that control how charts
//! and their labels are laid out and styled. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Chart padding, bar width and the label options used
//!   when a dataset does not set its own.
//! - [`StyleConfig`] - Visual styling: background, fonts and label colors.
//!
//! # Example
//!
//! ```
//! # use placard::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert!(config.style().text_definition().is_ok());
//! ```

use serde::Deserialize;

use placard_core::{color::Color, draw::TextDefinition, geometry::Insets};

use crate::{
    chart::{Align, AnchorMode},
    label::Display,
};

/// Top-level application configuration combining layout and style settings.
///
/// Groups [`LayoutConfig`] and [`StyleConfig`] into a single configuration
/// root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    ///
    /// # Arguments
    ///
    /// * `layout` - Chart geometry and default label options.
    /// * `style` - Visual styling options.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks every setting that can be invalid.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.background_color()?;
        self.style.text_definition()?;
        Ok(())
    }
}

/// Chart geometry and default label options.
///
/// | Setting | Default |
/// |---------|---------|
/// | `padding` | `24` |
/// | `bar_ratio` | `0.8` |
/// | `display` | `"always"` |
/// | `offset` | `4` |
/// | `anchor` | `"center"` |
/// | `align` | `"center"` |
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Space between the canvas edge and the plot area, in pixels.
    padding: f32,

    /// Share of each category band covered by bars, in `(0, 1]`.
    bar_ratio: f32,

    display: Display,
    offset: f32,
    anchor: AnchorMode,
    align: Align,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 24.0,
            bar_ratio: 0.8,
            display: Display::default(),
            offset: 4.0,
            anchor: AnchorMode::default(),
            align: Align::default(),
        }
    }
}

impl LayoutConfig {
    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn bar_ratio(&self) -> f32 {
        self.bar_ratio
    }

    /// Display mode for labels of datasets that do not set one.
    pub fn display(&self) -> Display {
        self.display
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn anchor(&self) -> AnchorMode {
        self.anchor
    }

    pub fn align(&self) -> Align {
        self.align
    }

    /// Sets the default display mode (builder style).
    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    /// Sets the chart padding (builder style).
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(format!(
                "layout.padding must be zero or positive, got {}",
                self.padding
            ));
        }
        if !(self.bar_ratio > 0.0 && self.bar_ratio <= 1.0) {
            return Err(format!(
                "layout.bar_ratio must be in (0, 1], got {}",
                self.bar_ratio
            ));
        }
        if !self.offset.is_finite() {
            return Err(format!("layout.offset must be finite, got {}", self.offset));
        }
        Ok(())
    }
}

/// Visual styling configuration for rendered charts.
///
/// Controls appearance options such as background color and label text.
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Chart background [`Color`], as a color string.
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    font_family: Option<String>,

    /// Label font size in points.
    #[serde(default)]
    font_size: Option<u16>,

    #[serde(default)]
    label_color: Option<String>,

    /// Fill of the box drawn behind each label.
    #[serde(default)]
    label_background: Option<String>,

    /// Padding around label text, in pixels, on every side.
    #[serde(default)]
    label_padding: Option<f32>,
}

impl StyleConfig {
    /// Sets the background color string (builder style).
    pub fn with_background_color(mut self, color: &str) -> Self {
        self.background_color = Some(color.to_string());
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background color")
    }

    /// Builds the label text style from the configured font and colors.
    ///
    /// # Errors
    ///
    /// Returns an error if a color string is invalid or the padding is
    /// negative.
    pub fn text_definition(&self) -> Result<TextDefinition, String> {
        let mut definition = TextDefinition::new();
        if let Some(family) = &self.font_family {
            definition.set_font_family(family);
        }
        if let Some(size) = self.font_size {
            definition.set_font_size(size);
        }
        definition.set_color(parse_color(self.label_color.as_deref(), "label color")?);
        definition.set_background_color(parse_color(
            self.label_background.as_deref(),
            "label background",
        )?);
        if let Some(padding) = self.label_padding {
            if !(padding.is_finite() && padding >= 0.0) {
                return Err(format!(
                    "Invalid label padding in config: {padding} is not a non-negative number"
                ));
            }
            definition.set_padding(Insets::uniform(padding));
        }
        Ok(definition)
    }
}

fn parse_color(color: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    color
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} in config: {err}"))
}
