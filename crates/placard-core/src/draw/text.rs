//! Label text: style definitions, measurement and SVG rendering.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style (font, colors, padding)
//! - [`Text`] - Content paired with a definition and a rotation
//!
//! Measurement goes through a process-wide cosmic-text `FontSystem`, built on
//! first use. Rendered text is centered on the given position; when a
//! rotation is set, both the background and the text are rotated around
//! that center.
//!
//! ```
//! # use placard_core::draw::{TextDefinition, Text};
//! let style = TextDefinition::new();
//! let text = Text::new(&style, "1,204");
//! let size = text.calculate_size();
//! assert!(size.width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};
use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets, Point, Size},
};

/// Visual style for label text.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Text color | `None` (SVG default, black) |
/// | Background color | `None` |
/// | Padding | 4px on all sides |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    background_color: Option<Color>,
    padding: Insets,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the fill of the rounded box drawn behind the text, if any.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    /// Padding between the text and the edge of the label box. It counts
    /// towards the label geometry even when no background is drawn.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn background_color(&self) -> Option<&Color> {
        self.background_color.as_ref()
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 12,
            color: None,
            background_color: None,
            padding: Insets::uniform(4.0),
        }
    }
}

/// A renderable piece of label text.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    rotation: f32,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            rotation: 0.0,
        }
    }

    /// Sets the rotation in radians (builder style).
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Size of the full label box: text plus padding.
    pub fn calculate_size(&self) -> Size {
        self.content_size().add_padding(self.definition.padding())
    }

    /// Size of the text alone, without padding.
    pub fn content_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    fn rotate_transform(&self, position: Point) -> Option<String> {
        (self.rotation != 0.0).then(|| {
            format!(
                "rotate({} {} {})",
                self.rotation.to_degrees(),
                position.x(),
                position.y()
            )
        })
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let transform = self.rotate_transform(position);

        let lines: Vec<&str> = self.content.lines().collect();
        let content_size = self.content_size();
        let line_height = if lines.is_empty() {
            0.0
        } else {
            content_size.height() / lines.len() as f32
        };
        let y_offset = -(content_size.height() + line_height) / 2.0;

        let mut rendered = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y() + y_offset)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(color) = self.definition.color() {
            rendered = rendered
                .set("fill", color)
                .set("fill-opacity", color.alpha());
        }
        if let Some(transform) = &transform {
            rendered = rendered.set("transform", transform.as_str());
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered = rendered.add(tspan);
        }

        if let Some(bg_color) = self.definition.background_color() {
            let bg_bounds = Bounds::new_from_center(position, self.calculate_size());
            let mut bg = svg_element::Rectangle::new()
                .set("x", bg_bounds.min_x())
                .set("y", bg_bounds.min_y())
                .set("width", bg_bounds.width())
                .set("height", bg_bounds.height())
                .set("fill", bg_color)
                .set("fill-opacity", bg_color.alpha())
                .set("rx", 3.0);
            if let Some(transform) = &transform {
                bg = bg.set("transform", transform.as_str());
            }
            output.add_to_layer(RenderLayer::LabelBackground, Box::new(bg));
        }

        output.add_to_layer(RenderLayer::Labels, Box::new(rendered));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Owns the shared `FontSystem`; creating one scans system fonts, so it is
/// done once per process.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures `text` with real font metrics and shaping.
    ///
    /// Falls back to an average-advance estimate when shaping yields no
    /// usable glyphs (no fonts installed, unknown family).
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        // Points to pixels at standard DPI.
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let metrics = Metrics::new(font_size_px, font_size_px * 1.15);
        let line_count = text.lines().count().max(1) as f32;
        let estimate = || {
            let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            Size::new(
                longest as f32 * font_size_px * 0.55,
                metrics.line_height * line_count,
            )
        };

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, estimating text size");
            return estimate();
        };

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width <= 0.0 || total_height <= 0.0 {
            return estimate();
        }
        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
