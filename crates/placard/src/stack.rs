//! Vertical stacking of labels that must never overlap.
//!
//! Labels flagged `no_overlap` (typically the segments of a stacked bar)
//! share a series with every other label of the same item index. Within one
//! draw pass the [`NoOverlapStacker`] moves each new label of a series below
//! the previous one when they would overlap, while reserving room under it
//! for the labels of the series still to come and keeping the whole series
//! between the top of the chart and the lowest element.

use std::collections::HashMap;

use log::trace;

use placard_core::geometry::Point;

use crate::label::LabelCenter;

/// Per-draw stacking state.
///
/// Created once per draw pass, on the first `no_overlap` label, and dropped
/// when the pass ends.
#[derive(Debug)]
pub struct NoOverlapStacker {
    max_graph_height: f32,
    visible_counts: HashMap<usize, usize>,
    placed: HashMap<usize, Vec<Point>>,
}

impl NoOverlapStacker {
    /// `max_graph_height` is the lowest element position on screen and
    /// `visible_counts` the number of visible labels per series.
    pub fn new(max_graph_height: f32, visible_counts: HashMap<usize, usize>) -> Self {
        Self {
            max_graph_height,
            visible_counts,
            placed: HashMap::new(),
        }
    }

    /// Number of labels already placed in `series`.
    pub fn placed(&self, series: usize) -> usize {
        self.placed.get(&series).map_or(0, Vec::len)
    }

    /// Adjusts `center` for the next label of `series` and records it.
    pub fn adjust(&mut self, series: usize, text_height: f32, center: &mut LabelCenter) {
        let visible = self.visible_counts.get(&series).copied().unwrap_or(0);
        let centers = self.placed.entry(series).or_default();

        let remaining = visible.saturating_sub(centers.len() + 1);
        let required_height = remaining as f32 * text_height;
        let y = center.point().y();

        let required_diff = y - self.max_graph_height + required_height;
        if required_diff > 0.0 {
            center.shift_y(-required_diff);
        } else if let Some(previous) = centers.last() {
            let diff = y - previous.y() - text_height;
            if diff < 0.0 {
                center.shift_y(-diff);
            }
        }

        let top = text_height / 2.0;
        if center.point().y() < top {
            center.shift_y(top - center.point().y());
        }

        trace!(
            series = series,
            y_diff = center.y_diff();
            "Stacked label"
        );
        centers.push(center.point());
    }
}
