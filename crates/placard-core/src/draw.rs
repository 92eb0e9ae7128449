//! Drawable primitives for chart rendering.
//!
//! Every primitive implements [`Drawable`]: it reports its size and renders
//! itself, centered on a position, into a [`LayeredOutput`].

mod layer;
mod rectangle;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use rectangle::Rectangle;
pub use text::{Text, TextDefinition};

use crate::geometry::{Point, Size};

/// Something that can be measured and rendered at a position.
pub trait Drawable: std::fmt::Debug {
    /// Render centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    fn size(&self) -> Size;
}
