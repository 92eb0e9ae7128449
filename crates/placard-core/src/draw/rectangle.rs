//! Filled rectangles, used for bar elements.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

/// A filled, axis-aligned rectangle rendered on the [`RenderLayer::Bars`] layer.
#[derive(Debug, Clone)]
pub struct Rectangle {
    size: Size,
    fill: Color,
    stroke: Option<Color>,
}

impl Rectangle {
    pub fn new(size: Size, fill: Color) -> Self {
        Self {
            size,
            fill,
            stroke: None,
        }
    }

    /// Sets an outline color (builder style).
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

impl Drawable for Rectangle {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let bounds = Bounds::new_from_center(position, self.size);
        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", &self.fill)
            .set("fill-opacity", self.fill.alpha());

        if let Some(stroke) = &self.stroke {
            rect = rect.set("stroke", stroke).set("stroke-width", 1);
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Bars, Box::new(rect));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}
