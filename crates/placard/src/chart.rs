//! A vertical bar chart host for the label layout engine.
//!
//! A [`Scene`] describes the chart. [`BarChart::new`] lays out its bars and
//! [`BarChart::labels`] builds one [`SceneLabel`] per bar, grouped per
//! dataset, ready for [`LabelLayout::prepare`](crate::layout::LabelLayout::prepare).

mod bar;
mod label;
mod positioner;
mod scene;

pub use bar::{Bar, ValueScale, layout_bars};
pub use label::SceneLabel;
pub use positioner::{Align, AnchorMode, orient, position};
pub use scene::{Dataset, LabelOptions, Scene, format_label};

use log::debug;

use placard_core::{
    color::Color,
    draw::{Drawable, LayeredOutput, Rectangle},
    geometry::{Bounds, Point, Size},
};

use crate::{
    config::AppConfig,
    label::LabelModel,
};

/// Fills cycled through for datasets without a color.
const PALETTE: [&str; 6] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948",
];

/// Bars of a scene, placed on the canvas.
#[derive(Debug, Clone)]
pub struct BarChart {
    size: Size,
    plot: Bounds,
    bars: Vec<Vec<Bar>>,
    fills: Vec<Color>,
}

impl BarChart {
    /// Lays out the bars of `scene` inside the padded canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if a dataset color cannot be parsed.
    pub fn new(scene: &Scene, config: &AppConfig) -> Result<Self, String> {
        let size = Size::new(scene.width(), scene.height());
        let padding = config.layout().padding();
        let plot = Bounds::new_from_top_left(
            Point::new(padding, padding),
            Size::new(
                (size.width() - 2.0 * padding).max(0.0),
                (size.height() - 2.0 * padding).max(0.0),
            ),
        );

        let fills = scene
            .datasets()
            .iter()
            .enumerate()
            .map(|(i, dataset)| {
                Color::new(dataset.color().unwrap_or(PALETTE[i % PALETTE.len()]))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bars = layout_bars(scene, plot, config.layout().bar_ratio());
        debug!(
            datasets = bars.len(),
            bars = bars.iter().map(Vec::len).sum::<usize>();
            "Bars laid out"
        );

        Ok(Self {
            size,
            plot,
            bars,
            fills,
        })
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Area inside the padding, where bars are drawn.
    pub fn plot_area(&self) -> Bounds {
        self.plot
    }

    /// Bars grouped per dataset.
    pub fn bars(&self) -> &[Vec<Bar>] {
        &self.bars
    }

    /// Builds the labels of every bar, one group per dataset.
    ///
    /// Dataset label options override the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a style or label color cannot be parsed.
    pub fn labels(&self, scene: &Scene, config: &AppConfig) -> Result<Vec<Vec<SceneLabel>>, String> {
        let layout = config.layout();
        let base_style = config.style().text_definition()?;

        scene
            .datasets()
            .iter()
            .zip(&self.bars)
            .map(|(dataset, bars)| -> Result<Vec<SceneLabel>, String> {
                let options = dataset.labels();
                let display = options.display().unwrap_or(layout.display());
                let model = LabelModel::new(display)
                    .with_offset(options.offset().unwrap_or(layout.offset()))
                    .with_rotation(options.rotation().unwrap_or(0.0).to_radians())
                    .with_no_overlap(options.no_overlap().unwrap_or(false));
                let anchor = options.anchor().unwrap_or(layout.anchor());
                let align = options.align().unwrap_or(layout.align());
                let template = options.format().unwrap_or("{value}");

                let mut style = base_style.clone();
                if let Some(color) = options.color()? {
                    style.set_color(Some(color));
                }

                Ok(bars
                    .iter()
                    .map(|bar| {
                        let category = scene
                            .categories()
                            .get(bar.item_index())
                            .map_or("", String::as_str);
                        let text = format_label(template, bar.value(), dataset.name(), category);
                        SceneLabel::new(text, *bar, style.clone(), model)
                            .with_placement(anchor, align)
                            .with_source(dataset.name(), category)
                            .with_dataset_hidden(dataset.hidden())
                    })
                    .collect::<Vec<_>>())
            })
            .collect()
    }

    /// Draws the bars of visible datasets.
    pub fn render_bars(&self, scene: &Scene) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for ((dataset, bars), fill) in scene.datasets().iter().zip(&self.bars).zip(&self.fills) {
            if dataset.hidden() {
                continue;
            }
            for bar in bars {
                let bounds = bar.bounds();
                let rect = Rectangle::new(bounds.to_size(), *fill);
                output.merge(rect.render_to_layers(bounds.center()));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use placard_core::draw::RenderLayer;

    use super::*;
    use crate::label::{Display, Label};

    const SCENE: &str = r#"
        width = 300
        height = 200
        categories = ["a", "b"]

        [[datasets]]
        name = "first"
        values = [3, 4]
        [datasets.labels]
        display = "auto"
        format = "{dataset}/{category}={value}"
        rotation = 90

        [[datasets]]
        name = "second"
        values = [5]
        hidden = true
    "#;

    fn scene() -> Scene {
        toml::from_str(SCENE).unwrap()
    }

    #[test]
    fn test_plot_area_is_padded() {
        let config = AppConfig::default();
        let chart = BarChart::new(&scene(), &config).unwrap();
        let plot = chart.plot_area();
        assert_eq!(plot.min_point(), Point::new(24.0, 24.0));
        assert_eq!(plot.to_size(), Size::new(252.0, 152.0));
        assert_eq!(chart.size(), Size::new(300.0, 200.0));
        assert_eq!(chart.bars().len(), 2);
    }

    #[test]
    fn test_labels_combine_options_and_defaults() {
        let config = AppConfig::default();
        let scene = scene();
        let chart = BarChart::new(&scene, &config).unwrap();
        let labels = chart.labels(&scene, &config).unwrap();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].len(), 2);
        assert_eq!(labels[0][1].text(), "first/b=4");
        assert_eq!(labels[0][1].model().display(), Display::Auto);
        assert!((labels[0][1].model().rotation() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(labels[0][1].visible());

        // Hidden dataset: default display, but never visible.
        assert_eq!(labels[1][0].model().display(), Display::Always);
        assert!(!labels[1][0].visible());
        assert_eq!(labels[1][0].text(), "5");
    }

    #[test]
    fn test_hidden_datasets_are_not_drawn() {
        let config = AppConfig::default();
        let scene = scene();
        let chart = BarChart::new(&scene, &config).unwrap();
        let output = chart.render_bars(&scene);
        assert_eq!(output.layer_len(RenderLayer::Bars), 2);
    }

    #[test]
    fn test_invalid_label_color_is_an_error() {
        let config = AppConfig::default();
        let scene: Scene =
            toml::from_str("[[datasets]]\nvalues = []\n[datasets.labels]\ncolor = \"nope\"").unwrap();
        let chart = BarChart::new(&scene, &config).unwrap();
        assert!(chart.labels(&scene, &config).is_err());
    }
}
