//! SVG output.
//!
//! [`SvgBuilder`] collects the canvas size and style, [`Svg`] turns a
//! [`LayeredOutput`] into a complete document string.

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use placard_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::Size,
    hitbox::HitBox,
};

use crate::{
    config::StyleConfig,
    export::{self, Exporter},
};

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    size: Size,
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    /// Creates a builder for a canvas of `size` pixels.
    pub fn new(size: Size) -> Self {
        Self { size, style: None }
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the canvas is empty or the
    /// configured background color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        if !(self.size.width() > 0.0 && self.size.height() > 0.0) {
            return Err(export::Error::Render(format!(
                "canvas must have a positive size, got {}x{}",
                self.size.width(),
                self.size.height()
            )));
        }

        let background = self
            .style
            .map(StyleConfig::background_color)
            .transpose()
            .map_err(export::Error::Render)?
            .flatten();

        Ok(Svg {
            size: self.size,
            background,
        })
    }
}

/// SVG exporter for one chart canvas.
#[derive(Debug)]
pub struct Svg {
    size: Size,
    background: Option<Color>,
}

impl Svg {
    /// Renders the layers into an SVG document.
    pub fn render_document(&self, mut layers: LayeredOutput) -> Document {
        let (width, height) = (self.size.width(), self.size.height());
        let doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(color) = &self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", color)
                .set("fill-opacity", color.alpha());
            layers.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        layers
            .render()
            .into_iter()
            .fold(doc, |doc, group| doc.add(group))
    }
}

impl Exporter for Svg {
    fn export_layers(&mut self, layers: LayeredOutput) -> Result<String, export::Error> {
        let doc = self.render_document(layers);
        debug!("SVG document rendered");

        let rendered = doc.to_string();
        info!(bytes = rendered.len(); "SVG exported");
        Ok(rendered)
    }
}

/// Outline of a label's oriented hit-box, for the debug overlay.
pub fn hit_box_outline(hit_box: &HitBox) -> svg_element::Polygon {
    let points = hit_box
        .corners()
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ");

    svg_element::Polygon::new()
        .set("points", points)
        .set("fill", "none")
        .set("stroke", "red")
        .set("stroke-width", 1)
        .set("stroke-dasharray", "3 2")
}

#[cfg(test)]
mod tests {
    use placard_core::geometry::Point;

    use super::*;

    #[test]
    fn test_build_rejects_empty_canvas() {
        assert!(SvgBuilder::new(Size::new(0.0, 10.0)).build().is_err());
        assert!(SvgBuilder::new(Size::default()).build().is_err());
    }

    #[test]
    fn test_build_rejects_invalid_background() {
        let style = StyleConfig::default().with_background_color("nope");
        let result = SvgBuilder::new(Size::new(10.0, 10.0)).with_style(&style).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_export_sets_dimensions_and_background() {
        let style = StyleConfig::default().with_background_color("white");
        let mut svg = SvgBuilder::new(Size::new(120.0, 80.0))
            .with_style(&style)
            .build()
            .unwrap();

        let rendered = svg.export_layers(LayeredOutput::new()).unwrap();
        assert!(rendered.contains("viewBox=\"0 0 120 80\""));
        assert!(rendered.contains("data-layer=\"background\""));
    }

    #[test]
    fn test_export_without_background() {
        let mut svg = SvgBuilder::new(Size::new(120.0, 80.0)).build().unwrap();
        let rendered = svg.export_layers(LayeredOutput::new()).unwrap();
        assert!(rendered.starts_with("<svg"));
        assert!(!rendered.contains("data-layer"));
    }

    #[test]
    fn test_hit_box_outline_lists_corners() {
        let hit_box = HitBox::new(Point::new(10.0, 10.0), Size::new(4.0, 2.0), 0.0);
        let outline = hit_box_outline(&hit_box).to_string();
        assert!(outline.contains("points=\"8,9 12,9 12,11 8,11\""));
    }
}
