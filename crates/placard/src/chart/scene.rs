//! Scene files: the bar chart a set of labels is laid out on.
//!
//! A scene is read from TOML:
//!
//! ```toml
//! width = 480
//! height = 320
//! stacked = true
//! categories = ["Q1", "Q2", "Q3"]
//!
//! [[datasets]]
//! name = "North"
//! values = [12, 19, 7]
//! color = "#4e79a7"
//!
//! [datasets.labels]
//! display = "auto"
//! anchor = "end"
//! align = "start"
//! format = "{value}k"
//! ```
//!
//! Every label option left out of a dataset falls back to the `[layout]`
//! section of the application configuration.

use serde::Deserialize;

use placard_core::color::Color;

use crate::{
    chart::positioner::{Align, AnchorMode},
    label::Display,
};

fn default_width() -> f32 {
    640.0
}

fn default_height() -> f32 {
    400.0
}

/// A bar chart scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default = "default_width")]
    width: f32,

    #[serde(default = "default_height")]
    height: f32,

    /// Stack datasets on top of each other instead of grouping them.
    #[serde(default)]
    stacked: bool,

    #[serde(default)]
    categories: Vec<String>,

    #[serde(default)]
    datasets: Vec<Dataset>,
}

impl Scene {
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn stacked(&self) -> bool {
        self.stacked
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Hides or shows every dataset named `name`. Returns false if there is
    /// none.
    pub fn set_dataset_hidden(&mut self, name: &str, hidden: bool) -> bool {
        let mut found = false;
        for dataset in self.datasets.iter_mut().filter(|d| d.name == name) {
            dataset.hidden = hidden;
            found = true;
        }
        found
    }

    /// Checks the scene for values the chart cannot be built from.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(format!("width must be a positive number, got {}", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(format!(
                "height must be a positive number, got {}",
                self.height
            ));
        }

        for dataset in &self.datasets {
            let name = dataset.name();
            if dataset.values.len() > self.categories.len() {
                return Err(format!(
                    "dataset `{name}` has {} values but there are only {} categories",
                    dataset.values.len(),
                    self.categories.len()
                ));
            }
            if let Some(value) = dataset.values.iter().find(|v| !v.is_finite()) {
                return Err(format!("dataset `{name}` has a non-finite value {value}"));
            }
            if let Some(color) = &dataset.color {
                Color::new(color).map_err(|err| format!("dataset `{name}`: {err}"))?;
            }
            dataset
                .labels
                .validate()
                .map_err(|err| format!("dataset `{name}`: {err}"))?;
        }
        Ok(())
    }
}

/// One series of values, one per category.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    #[serde(default)]
    name: String,

    #[serde(default)]
    values: Vec<f32>,

    /// Bar fill, as a CSS color string.
    #[serde(default)]
    color: Option<String>,

    /// Hidden datasets keep their labels in the layout, but never show them.
    #[serde(default)]
    hidden: bool,

    #[serde(default)]
    labels: LabelOptions,
}

impl Dataset {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn labels(&self) -> &LabelOptions {
        &self.labels
    }
}

/// Per-dataset label options. Unset options use the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelOptions {
    #[serde(default)]
    display: Option<Display>,

    #[serde(default)]
    anchor: Option<AnchorMode>,

    #[serde(default)]
    align: Option<Align>,

    /// Gap between the anchor point and the label box, in pixels.
    #[serde(default)]
    offset: Option<f32>,

    /// Rotation in degrees.
    #[serde(default)]
    rotation: Option<f32>,

    #[serde(default)]
    no_overlap: Option<bool>,

    /// Text template; `{value}`, `{dataset}` and `{category}` are replaced.
    #[serde(default)]
    format: Option<String>,

    /// Text color, overriding the configured label color.
    #[serde(default)]
    color: Option<String>,
}

impl LabelOptions {
    pub fn display(&self) -> Option<Display> {
        self.display
    }

    pub fn anchor(&self) -> Option<AnchorMode> {
        self.anchor
    }

    pub fn align(&self) -> Option<Align> {
        self.align
    }

    pub fn offset(&self) -> Option<f32> {
        self.offset
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    pub fn no_overlap(&self) -> Option<bool> {
        self.no_overlap
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Parsed text color, if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the color string is not a valid CSS color.
    pub fn color(&self) -> Result<Option<Color>, String> {
        self.color.as_deref().map(Color::new).transpose()
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(offset) = self.offset.filter(|v| !v.is_finite()) {
            return Err(format!("label offset must be finite, got {offset}"));
        }
        if let Some(rotation) = self.rotation.filter(|v| !v.is_finite()) {
            return Err(format!("label rotation must be finite, got {rotation}"));
        }
        self.color().map(|_| ())
    }
}

/// Expands a label template for one value.
pub fn format_label(template: &str, value: f32, dataset: &str, category: &str) -> String {
    template
        .replace("{value}", &value.to_string())
        .replace("{dataset}", dataset)
        .replace("{category}", category)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn parse(source: &str) -> Scene {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_set_dataset_hidden_by_name() {
        let mut scene = parse("[[datasets]]\nname = \"a\"\n[[datasets]]\nname = \"b\"");
        assert!(scene.set_dataset_hidden("b", true));
        assert!(!scene.datasets()[0].hidden());
        assert!(scene.datasets()[1].hidden());
        assert!(!scene.set_dataset_hidden("c", true));
    }

    #[test]
    fn test_minimal_scene_uses_defaults() {
        let scene = parse("");
        assert_approx_eq!(f32, scene.width(), 640.0);
        assert_approx_eq!(f32, scene.height(), 400.0);
        assert!(!scene.stacked());
        assert!(scene.datasets().is_empty());
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_full_dataset_parses() {
        let scene = parse(
            r##"
            stacked = true
            categories = ["a", "b"]

            [[datasets]]
            name = "North"
            values = [1.5, -2]
            color = "#4e79a7"
            hidden = true

            [datasets.labels]
            display = "auto"
            anchor = "end"
            align = 45
            offset = 6
            rotation = -90
            no_overlap = true
            format = "{value}%"
            color = "white"
            "##,
        );
        assert!(scene.validate().is_ok());

        let dataset = &scene.datasets()[0];
        assert_eq!(dataset.name(), "North");
        assert_eq!(dataset.values(), &[1.5, -2.0]);
        assert!(dataset.hidden());

        let labels = dataset.labels();
        assert_eq!(labels.display(), Some(Display::Auto));
        assert_eq!(labels.anchor(), Some(AnchorMode::End));
        assert_eq!(labels.align(), Some(Align::Degrees(45.0)));
        assert_eq!(labels.offset(), Some(6.0));
        assert_eq!(labels.rotation(), Some(-90.0));
        assert_eq!(labels.no_overlap(), Some(true));
        assert_eq!(labels.format(), Some("{value}%"));
        assert!(labels.color().unwrap().is_some());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(toml::from_str::<Scene>("widht = 3").is_err());
        assert!(toml::from_str::<Scene>("[[datasets]]\nvalue = [1]").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_canvas() {
        assert!(parse("width = 0").validate().is_err());
        assert!(parse("height = -10").validate().is_err());
        assert!(parse("width = inf").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_more_values_than_categories() {
        let scene = parse("categories = [\"a\"]\n[[datasets]]\nname = \"d\"\nvalues = [1, 2]");
        let err = scene.validate().unwrap_err();
        assert!(err.contains("`d`"));
        assert!(err.contains("2 values"));
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        let scene = parse("categories = [\"a\"]\n[[datasets]]\nvalues = [nan]");
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_colors() {
        let scene = parse("[[datasets]]\ncolor = \"blurple\"");
        assert!(scene.validate().is_err());

        let scene = parse("[[datasets]]\n[datasets.labels]\ncolor = \"blurple\"");
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("{value}", 12.0, "d", "c"), "12");
        assert_eq!(format_label("{dataset}: {value}", 2.5, "North", "Q1"), "North: 2.5");
        assert_eq!(format_label("{category}", 1.0, "d", "Q3"), "Q3");
        assert_eq!(format_label("fixed", 1.0, "d", "c"), "fixed");
    }
}
