//! Placard - Data label layout for charts.
//!
//! Positions the value labels of a chart so that they stay readable: each
//! label is anchored to its data element, overlapping labels in `auto`
//! display mode are hidden by priority, and labels of stacked segments are
//! spaced vertically instead of overlapping.
//!
//! The engine works on any host implementing [`label::Label`]:
//!
//! - [`anchor`] resolves a label's center from its anchor,
//! - [`collide`] resolves overlaps between label hit-boxes,
//! - [`layout`] drives prepare, update, draw and lookup passes,
//! - [`stack`] spaces the labels of `no_overlap` series.
//!
//! [`ChartBuilder`] wires the engine to a bar chart read from a TOML
//! [`chart::Scene`] and renders it to SVG.

pub mod anchor;
pub mod chart;
pub mod collide;
pub mod config;
pub mod label;
pub mod layout;
pub mod stack;

mod error;
mod export;

pub use placard_core::{color, draw, geometry, hitbox};

pub use error::PlacardError;

use log::{debug, info, trace};

use placard_core::{
    draw::{LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

use chart::{BarChart, Scene, SceneLabel};
use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use layout::LabelLayout;

/// Builder for parsing and rendering Placard charts.
///
/// # Examples
///
/// ```rust,no_run
/// use placard::{ChartBuilder, config::AppConfig};
///
/// let source = r#"
/// categories = ["a", "b"]
/// [[datasets]]
/// values = [3, 5]
/// "#;
///
/// let builder = ChartBuilder::new(AppConfig::default());
/// let scene = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&scene).expect("Failed to render");
/// assert!(svg.contains("data-layer=\"labels\""));
/// ```
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML scene and check it can be rendered.
    ///
    /// # Errors
    ///
    /// Returns [`PlacardError::Scene`] for TOML syntax or type errors and
    /// [`PlacardError::InvalidScene`] for values no chart can be built from.
    pub fn parse(&self, source: &str) -> Result<Scene, PlacardError> {
        info!("Parsing scene");

        let scene: Scene =
            toml::from_str(source).map_err(|err| PlacardError::new_scene_error(err, source))?;
        scene.validate().map_err(PlacardError::InvalidScene)?;

        debug!(
            datasets = scene.datasets().len(),
            categories = scene.categories().len();
            "Scene parsed successfully"
        );
        trace!(scene:?; "Parsed scene");

        Ok(scene)
    }

    /// Lay out the bars and labels of a scene.
    ///
    /// Labels are prepared, overlaps resolved and one draw pass run, so the
    /// returned layout can answer [`ChartLayout::lookup`] right away.
    ///
    /// # Errors
    ///
    /// Returns [`PlacardError::Config`] if the configuration is invalid and
    /// [`PlacardError::InvalidScene`] if a color in the scene cannot be parsed.
    pub fn layout(&self, scene: &Scene) -> Result<ChartLayout, PlacardError> {
        self.config.validate().map_err(PlacardError::Config)?;

        info!("Building chart");
        let chart = BarChart::new(scene, &self.config).map_err(PlacardError::InvalidScene)?;
        let groups = chart
            .labels(scene, &self.config)
            .map_err(PlacardError::InvalidScene)?;

        let mut labels = LabelLayout::prepare(groups);
        labels.draw(&mut LayeredOutput::new());
        info!(
            labels = labels.len(),
            visible = labels.states().iter().filter(|s| s.is_visible()).count();
            "Labels laid out"
        );

        Ok(ChartLayout {
            scene: scene.clone(),
            config: self.config.clone(),
            chart,
            labels,
            show_hit_boxes: false,
        })
    }

    /// Render a scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns any error of [`ChartBuilder::layout`] or
    /// [`PlacardError::Export`] if the document cannot be produced.
    pub fn render_svg(&self, scene: &Scene) -> Result<String, PlacardError> {
        self.layout(scene)?.render_svg()
    }
}

/// A laid-out chart: its bars and prepared labels.
#[derive(Debug)]
pub struct ChartLayout {
    scene: Scene,
    config: AppConfig,
    chart: BarChart,
    labels: LabelLayout<SceneLabel>,
    show_hit_boxes: bool,
}

impl ChartLayout {
    /// Outline each visible label's hit-box in rendered output.
    pub fn with_hit_boxes(mut self, show: bool) -> Self {
        self.show_hit_boxes = show;
        self
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        self.chart.size()
    }

    pub fn chart(&self) -> &BarChart {
        &self.chart
    }

    /// The prepared labels with their layout state.
    pub fn labels(&self) -> &LabelLayout<SceneLabel> {
        &self.labels
    }

    /// The topmost visible label at `point`, if any.
    pub fn lookup(&self, point: Point) -> Option<&SceneLabel> {
        let hit = self.labels.lookup(point);
        debug!(x = point.x(), y = point.y(), hit = hit.is_some(); "Label lookup");
        hit
    }

    /// Shows or hides the dataset named `name`, bars and labels alike.
    ///
    /// The bars are laid out again, since hidden datasets free their slots
    /// and leave the value range, and the labels are moved onto the new bars
    /// before the layout is updated. Returns false if no dataset has that
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`PlacardError::InvalidScene`] if the chart cannot be rebuilt.
    pub fn set_dataset_visible(
        &mut self,
        name: &str,
        visible: bool,
    ) -> Result<bool, PlacardError> {
        if !self.scene.set_dataset_hidden(name, !visible) {
            return Ok(false);
        }

        self.chart =
            BarChart::new(&self.scene, &self.config).map_err(PlacardError::InvalidScene)?;
        let bars = self.chart.bars();
        let datasets = self.scene.datasets();
        for label in self.labels.labels_mut() {
            let (set, item) = (label.bar().dataset_index(), label.bar().item_index());
            if let Some(bar) = bars.get(set).and_then(|b| b.get(item)) {
                label.set_bar(*bar);
            }
            if let Some(dataset) = datasets.get(set) {
                label.set_dataset_hidden(dataset.hidden());
            }
        }

        self.labels.update();
        self.labels.draw(&mut LayeredOutput::new());
        debug!(dataset = name, visible = visible; "Dataset visibility changed");
        Ok(true)
    }

    /// Draw the chart and its labels into an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`PlacardError::Export`] if the document cannot be produced.
    pub fn render_svg(&mut self) -> Result<String, PlacardError> {
        let mut output = self.chart.render_bars(&self.scene);
        self.labels.draw(&mut output);

        if self.show_hit_boxes {
            for (_, state) in self.labels.iter().filter(|(_, s)| s.is_visible()) {
                let outline = export::svg::hit_box_outline(state.hit_box());
                output.add_to_layer(RenderLayer::HitBoxes, Box::new(outline));
            }
        }

        let mut exporter = SvgBuilder::new(self.chart.size())
            .with_style(self.config.style())
            .build()?;
        let svg = exporter.export_layers(output)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }
}
