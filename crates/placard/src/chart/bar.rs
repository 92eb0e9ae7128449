//! Bar geometry for vertical bar charts.

use placard_core::geometry::{Bounds, Point, Size};

use crate::chart::scene::Scene;

/// Maps data values to screen y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    min: f32,
    max: f32,
    top: f32,
    bottom: f32,
}

impl ValueScale {
    /// A scale spanning `[min(0, lo), max(0, hi)]` over the pixel range
    /// `top..bottom`. The zero line is always in range.
    pub fn new(lo: f32, hi: f32, top: f32, bottom: f32) -> Self {
        let min = lo.min(0.0);
        let mut max = hi.max(0.0);
        if max <= min {
            max = min + 1.0;
        }
        Self {
            min,
            max,
            top,
            bottom,
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn y(&self, value: f32) -> f32 {
        let ratio = (value - self.min) / (self.max - self.min);
        self.bottom - ratio * (self.bottom - self.top)
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    dataset_index: usize,
    item_index: usize,
    value: f32,
    base: Point,
    end: Point,
    width: f32,
}

impl Bar {
    pub fn dataset_index(&self) -> usize {
        self.dataset_index
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Where the bar starts: the zero line or the top of the segment below.
    pub fn base(&self) -> Point {
        self.base
    }

    /// Where the bar ends, at its value.
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn bounds(&self) -> Bounds {
        let top = self.base.y().min(self.end.y());
        let height = (self.base.y() - self.end.y()).abs();
        Bounds::new_from_top_left(
            Point::new(self.base.x() - self.width / 2.0, top),
            Size::new(self.width, height),
        )
    }
}

/// Lays out every bar of `scene` inside `plot`.
///
/// `bar_ratio` is the share of each category band covered by bars. Hidden
/// datasets take no room: their bars collapse to zero size on the zero line
/// at the band center and do not count towards the value range.
///
/// Bars are returned grouped per dataset, in dataset order.
pub fn layout_bars(scene: &Scene, plot: Bounds, bar_ratio: f32) -> Vec<Vec<Bar>> {
    let categories = category_count(scene);
    let band = plot.width() / categories as f32;
    let (lo, hi) = value_range(scene);
    let scale = ValueScale::new(lo, hi, plot.min_y(), plot.max_y());
    let zero = scale.y(0.0);

    let visible: Vec<usize> = scene
        .datasets()
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.hidden())
        .map(|(i, _)| i)
        .collect();
    let slots = if scene.stacked() { 1 } else { visible.len().max(1) };
    let width = band * bar_ratio / slots as f32;

    let mut positive = vec![0.0f32; categories];
    let mut negative = vec![0.0f32; categories];

    scene
        .datasets()
        .iter()
        .enumerate()
        .map(|(set, dataset)| {
            let slot = visible.iter().position(|&i| i == set);
            dataset
                .values()
                .iter()
                .enumerate()
                .map(|(idx, &value)| {
                    let band_center = plot.min_x() + band * (idx as f32 + 0.5);
                    let Some(slot) = slot else {
                        let point = Point::new(band_center, zero);
                        return Bar {
                            dataset_index: set,
                            item_index: idx,
                            value,
                            base: point,
                            end: point,
                            width: 0.0,
                        };
                    };

                    let x = if scene.stacked() {
                        band_center
                    } else {
                        band_center - band * bar_ratio / 2.0 + width * (slot as f32 + 0.5)
                    };
                    let (from, to) = if !scene.stacked() {
                        (0.0, value)
                    } else if value >= 0.0 {
                        let from = positive[idx];
                        positive[idx] += value;
                        (from, positive[idx])
                    } else {
                        let from = negative[idx];
                        negative[idx] += value;
                        (from, negative[idx])
                    };

                    Bar {
                        dataset_index: set,
                        item_index: idx,
                        value,
                        base: Point::new(x, scale.y(from)),
                        end: Point::new(x, scale.y(to)),
                        width,
                    }
                })
                .collect()
        })
        .collect()
}

/// Number of category bands, never zero and never less than the longest
/// dataset.
fn category_count(scene: &Scene) -> usize {
    scene
        .datasets()
        .iter()
        .map(|d| d.values().len())
        .chain([scene.categories().len(), 1])
        .max()
        .unwrap_or(1)
}

/// Lowest and highest value drawn, over visible datasets only. Stacked
/// charts use the per-category sums of positive and negative values.
fn value_range(scene: &Scene) -> (f32, f32) {
    let visible = scene.datasets().iter().filter(|d| !d.hidden());

    if !scene.stacked() {
        return visible
            .flat_map(|d| d.values().iter().copied())
            .fold((0.0, 0.0), |(lo, hi), v| (lo.min(v), hi.max(v)));
    }

    let categories = category_count(scene);
    let mut positive = vec![0.0f32; categories];
    let mut negative = vec![0.0f32; categories];
    for dataset in visible {
        for (idx, &value) in dataset.values().iter().enumerate() {
            if value >= 0.0 {
                positive[idx] += value;
            } else {
                negative[idx] += value;
            }
        }
    }
    let hi = positive.into_iter().fold(0.0, f32::max);
    let lo = negative.into_iter().fold(0.0, f32::min);
    (lo, hi)
}
