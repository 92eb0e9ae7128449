//! Labels of a bar chart scene.

use placard_core::{
    draw::{Drawable, LayeredOutput, Text, TextDefinition},
    geometry::{Point, Size},
};

use crate::{
    chart::{
        bar::Bar,
        positioner::{Align, AnchorMode, position},
    },
    label::{Anchor, AnchorView, Display, Label, LabelCenter, LabelModel},
};

/// The value label of one bar.
///
/// Text and box sizes are measured once, when the label is created.
#[derive(Debug, Clone)]
pub struct SceneLabel {
    text: String,
    dataset: String,
    category: String,
    style: TextDefinition,
    model: LabelModel,
    anchor: AnchorMode,
    align: Align,
    bar: Bar,
    dataset_hidden: bool,
    geometry: Size,
    text_size: Size,
}

impl SceneLabel {
    /// Creates a visible label for `bar`, centered on it.
    pub fn new(text: String, bar: Bar, style: TextDefinition, model: LabelModel) -> Self {
        let measured = Text::new(&style, &text);
        let geometry = measured.calculate_size();
        let text_size = measured.content_size();
        Self {
            text,
            dataset: String::new(),
            category: String::new(),
            style,
            model,
            anchor: AnchorMode::default(),
            align: Align::default(),
            bar,
            dataset_hidden: false,
            geometry,
            text_size,
        }
    }

    /// Sets where on the bar the label is attached and how it extends.
    pub fn with_placement(mut self, anchor: AnchorMode, align: Align) -> Self {
        self.anchor = anchor;
        self.align = align;
        self
    }

    /// Records the dataset and category names the label is reported with.
    pub fn with_source(mut self, dataset: &str, category: &str) -> Self {
        self.dataset = dataset.to_string();
        self.category = category.to_string();
        self
    }

    /// Marks the label's dataset as hidden.
    pub fn with_dataset_hidden(mut self, hidden: bool) -> Self {
        self.dataset_hidden = hidden;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Name of the dataset the label belongs to.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn bar(&self) -> &Bar {
        &self.bar
    }

    pub fn set_dataset_hidden(&mut self, hidden: bool) {
        self.dataset_hidden = hidden;
    }

    /// Moves the label onto `bar`, e.g. after the chart was laid out again.
    pub fn set_bar(&mut self, bar: Bar) {
        self.bar = bar;
    }
}

impl Label for SceneLabel {
    type Canvas = LayeredOutput;

    fn geometry(&self) -> Size {
        self.geometry
    }

    fn text_size(&self) -> Size {
        self.text_size
    }

    fn model(&self) -> &LabelModel {
        &self.model
    }

    fn visible(&self) -> bool {
        self.model.display() != Display::Never && !self.dataset_hidden
    }

    // Scenes are static, so both views see the same bar.
    fn element(&self, _view: AnchorView) -> Point {
        self.bar.end()
    }

    fn positioner(&self, _view: AnchorView) -> Anchor {
        position(self.bar.base(), self.bar.end(), self.anchor, self.align)
    }

    fn draw(&self, canvas: &mut LayeredOutput, center: &LabelCenter) {
        let text = Text::new(&self.style, &self.text).with_rotation(self.model.rotation());
        canvas.merge(text.render_to_layers(center.point()));
    }
}

#[cfg(test)]
mod tests {
    use placard_core::draw::RenderLayer;

    use super::*;
    use crate::chart::scene::Scene;

    fn bar() -> Bar {
        let scene: Scene = toml::from_str("categories = [\"a\"]\n[[datasets]]\nvalues = [10]").unwrap();
        let plot = placard_core::geometry::Bounds::new_from_top_left(
            Point::new(0.0, 0.0),
            Size::new(100.0, 100.0),
        );
        crate::chart::bar::layout_bars(&scene, plot, 0.5)[0][0]
    }

    fn label(align: Align) -> SceneLabel {
        labelled(align, Display::Always)
    }

    fn labelled(align: Align, display: Display) -> SceneLabel {
        SceneLabel::new(
            "10".to_string(),
            bar(),
            TextDefinition::new(),
            LabelModel::new(display),
        )
        .with_placement(AnchorMode::End, align)
        .with_source("d", "a")
    }

    #[test]
    fn test_geometry_includes_padding() {
        let label = label(Align::End);
        let geometry = label.geometry();
        let text = label.text_size();
        assert!(geometry.width() > text.width());
        assert!(geometry.height() > text.height());
    }

    #[test]
    fn test_positioner_follows_bar() {
        let label = label(Align::End);
        let anchor = label.positioner(AnchorView::Model);
        assert_eq!(anchor.point(), label.bar().end());
        assert_eq!((anchor.vx(), anchor.vy()), (0.0, -1.0));
        assert_eq!(label.element(AnchorView::Live), label.bar().end());
    }

    #[test]
    fn test_visibility_and_source() {
        let mut label = label(Align::End).with_dataset_hidden(true);
        assert!(!label.visible());
        label.set_dataset_hidden(false);
        assert!(label.visible());
        assert_eq!(label.dataset(), "d");
        assert_eq!(label.category(), "a");
        assert_eq!(label.text(), "10");
    }

    #[test]
    fn test_never_display_stays_hidden_when_dataset_is_shown() {
        let mut label = labelled(Align::End, Display::Never).with_dataset_hidden(true);
        assert!(!label.visible());
        label.set_dataset_hidden(false);
        assert!(!label.visible());
    }

    #[test]
    fn test_set_bar_moves_anchor() {
        let mut label = label(Align::End);
        let scene: Scene =
            toml::from_str("categories = [\"a\"]\n[[datasets]]\nvalues = [10]").unwrap();
        let plot = placard_core::geometry::Bounds::new_from_top_left(
            Point::new(200.0, 0.0),
            Size::new(100.0, 100.0),
        );
        let moved = crate::chart::bar::layout_bars(&scene, plot, 0.5)[0][0];
        assert_ne!(moved.end(), label.bar().end());

        label.set_bar(moved);
        assert_eq!(label.element(AnchorView::Live), moved.end());
        assert_eq!(label.positioner(AnchorView::Model).point(), moved.end());
    }

    #[test]
    fn test_draw_emits_label_text() {
        let label = label(Align::Center);
        let mut canvas = LayeredOutput::new();
        label.draw(&mut canvas, &LabelCenter::new(Point::new(50.0, 20.0)));
        assert_eq!(canvas.layer_len(RenderLayer::Labels), 1);
    }
}
