//! The label interface the layout engine works against.
//!
//! The engine never owns chart elements or knows how a label is measured or
//! painted. A host describes each label through the [`Label`] trait: its box
//! size, its [`LabelModel`] options, its own visibility, where it is anchored
//! ([`Label::positioner`]) and how to draw it once a center is decided.

use std::fmt;

use serde::{Deserialize, Deserializer, de};

use placard_core::geometry::{Point, Size};

/// Which snapshot of the host element an anchor is read from.
///
/// Layout runs against the `Model` view (the element's target state) while
/// drawing reads the `Live` view (what is on screen right now). The two can
/// differ while a host animates its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorView {
    Model,
    Live,
}

/// Output of a positioner: the raw anchor point and the direction the label
/// should extend toward.
///
/// The orientation components are expected in `[-1, 1]`. `(0, 0)` means the
/// label is centered on the anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Anchor {
    point: Point,
    vx: f32,
    vy: f32,
}

impl Anchor {
    pub fn new(point: Point, vx: f32, vy: f32) -> Self {
        Self { point, vx, vy }
    }

    /// An anchor with no orientation: the label is centered on `point`.
    pub fn centered(point: Point) -> Self {
        Self::new(point, 0.0, 0.0)
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn vx(&self) -> f32 {
        self.vx
    }

    pub fn vy(&self) -> f32 {
        self.vy
    }

    pub fn is_centered(&self) -> bool {
        self.vx == 0.0 && self.vy == 0.0
    }
}

/// Whether a label is shown.
///
/// Deserializes from `"auto"`, `"always"`, `"never"`, `true` or `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    /// Shown unless it overlaps a label of higher priority.
    Auto,
    /// Always shown, even when overlapping.
    #[default]
    Always,
    /// Never shown.
    Never,
}

impl Display {
    /// Labels in `Auto` mode may be hidden by overlap resolution.
    pub fn is_auto(self) -> bool {
        self == Self::Auto
    }
}

impl<'de> Deserialize<'de> for Display {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DisplayVisitor;

        impl de::Visitor<'_> for DisplayVisitor {
            type Value = Display;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or one of \"auto\", \"always\", \"never\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Display, E> {
                Ok(if v { Display::Always } else { Display::Never })
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Display, E> {
                match v {
                    "auto" => Ok(Display::Auto),
                    "always" | "true" => Ok(Display::Always),
                    "never" | "false" => Ok(Display::Never),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(DisplayVisitor)
    }
}

/// Per-label layout options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelModel {
    display: Display,
    rotation: f32,
    offset: f32,
    no_overlap: bool,
}

impl LabelModel {
    pub fn new(display: Display) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    /// Sets the rotation in radians (builder style).
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the gap, in pixels, between the anchor and the label box edge.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Marks the label as part of a series whose labels must be stacked
    /// vertically instead of overlapping.
    pub fn with_no_overlap(mut self, no_overlap: bool) -> Self {
        self.no_overlap = no_overlap;
        self
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn no_overlap(&self) -> bool {
        self.no_overlap
    }
}

/// The center a label is drawn at, after any vertical stacking adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelCenter {
    point: Point,
    y_diff: f32,
}

impl LabelCenter {
    pub fn new(point: Point) -> Self {
        Self { point, y_diff: 0.0 }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// Total vertical shift applied since the center was resolved.
    ///
    /// Every shift adds up, including the clamp to the top of the chart, so
    /// `point().y() - y_diff()` is always the unshifted center.
    pub fn y_diff(&self) -> f32 {
        self.y_diff
    }

    /// The center as resolved from the anchor, before any shift.
    pub fn original_point(&self) -> Point {
        self.point.with_y(self.point.y() - self.y_diff)
    }

    pub(crate) fn shift_y(&mut self, dy: f32) {
        self.point = self.point.with_y(self.point.y() + dy);
        self.y_diff += dy;
    }
}

/// A chart label as seen by the layout engine.
///
/// Implemented by the host chart for whatever it uses as a label. The engine
/// calls these methods during [`LabelLayout`](crate::layout::LabelLayout)
/// passes and never mutates the label itself.
pub trait Label {
    /// What [`Label::draw`] paints onto.
    type Canvas: ?Sized;

    /// Size of the full label box (text plus padding), unrotated.
    fn geometry(&self) -> Size;

    /// Size of the text alone. Used as the row height when stacking labels.
    fn text_size(&self) -> Size {
        self.geometry()
    }

    fn model(&self) -> &LabelModel;

    /// The label's own visibility, before any overlap decision.
    fn visible(&self) -> bool;

    /// Rotation of the label box in radians.
    fn rotation(&self) -> f32 {
        self.model().rotation()
    }

    /// Position of the data element the label belongs to.
    fn element(&self, view: AnchorView) -> Point;

    /// Anchor point and orientation for the given view.
    fn positioner(&self, view: AnchorView) -> Anchor;

    fn draw(&self, canvas: &mut Self::Canvas, center: &LabelCenter);
}

impl<L: Label + ?Sized> Label for &L {
    type Canvas = L::Canvas;

    fn geometry(&self) -> Size {
        (**self).geometry()
    }

    fn text_size(&self) -> Size {
        (**self).text_size()
    }

    fn model(&self) -> &LabelModel {
        (**self).model()
    }

    fn visible(&self) -> bool {
        (**self).visible()
    }

    fn rotation(&self) -> f32 {
        (**self).rotation()
    }

    fn element(&self, view: AnchorView) -> Point {
        (**self).element(view)
    }

    fn positioner(&self, view: AnchorView) -> Anchor {
        (**self).positioner(view)
    }

    fn draw(&self, canvas: &mut Self::Canvas, center: &LabelCenter) {
        (**self).draw(canvas, center)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        display: Display,
    }

    fn parse_display(value: &str) -> Result<Display, toml::de::Error> {
        toml::from_str::<Wrapper>(&format!("display = {value}")).map(|w| w.display)
    }

    #[test]
    fn test_display_deserializes_strings_and_bools() {
        assert_eq!(parse_display("\"auto\"").unwrap(), Display::Auto);
        assert_eq!(parse_display("\"always\"").unwrap(), Display::Always);
        assert_eq!(parse_display("\"never\"").unwrap(), Display::Never);
        assert_eq!(parse_display("true").unwrap(), Display::Always);
        assert_eq!(parse_display("false").unwrap(), Display::Never);
        assert!(parse_display("\"sometimes\"").is_err());
        assert!(parse_display("3").is_err());
    }

    #[test]
    fn test_display_only_auto_is_auto() {
        assert!(Display::Auto.is_auto());
        assert!(!Display::Always.is_auto());
        assert!(!Display::Never.is_auto());
        assert_eq!(Display::default(), Display::Always);
    }

    #[test]
    fn test_label_model_builder() {
        let model = LabelModel::new(Display::Auto)
            .with_rotation(0.5)
            .with_offset(6.0)
            .with_no_overlap(true);
        assert_eq!(model.display(), Display::Auto);
        assert_approx_eq!(f32, model.rotation(), 0.5);
        assert_approx_eq!(f32, model.offset(), 6.0);
        assert!(model.no_overlap());
    }

    #[test]
    fn test_anchor_centered() {
        let anchor = Anchor::centered(Point::new(3.0, 4.0));
        assert!(anchor.is_centered());
        assert!(!Anchor::new(Point::default(), 0.0, -1.0).is_centered());
    }

    #[test]
    fn test_label_center_tracks_total_shift() {
        let mut center = LabelCenter::new(Point::new(10.0, 50.0));
        center.shift_y(-8.0);
        center.shift_y(3.0);
        assert_approx_eq!(f32, center.point().y(), 45.0);
        assert_approx_eq!(f32, center.y_diff(), -5.0);
        assert_eq!(center.original_point(), Point::new(10.0, 50.0));
    }
}
