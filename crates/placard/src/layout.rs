//! The label layout orchestrator.
//!
//! [`LabelLayout`] owns the prepared labels together with a side table of
//! [`LayoutState`], one entry per label, and drives the layout lifecycle:
//!
//! 1. [`LabelLayout::prepare`] flattens the per-dataset label groups and
//!    fixes their priority order,
//! 2. [`LabelLayout::update`] refreshes visibility and, when any label is in
//!    `auto` display mode, recomputes hit-boxes and hides overlapping labels,
//! 3. [`LabelLayout::draw`] places every visible label at its draw-time
//!    center and hands it to the host for painting,
//! 4. [`LabelLayout::lookup`] hit-tests a point against the drawn labels.
//!
//! Labels later in the prepared order have higher priority: they win
//! overlap conflicts and are hit-tested first.

use std::collections::HashMap;

use log::{debug, trace};

use placard_core::{geometry::Point, hitbox::HitBox};

use crate::{
    anchor::coordinates,
    collide::{collide, hide_lower_priority},
    label::{AnchorView, Label, LabelCenter},
    stack::NoOverlapStacker,
};

/// Layout bookkeeping attached to one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    hit_box: HitBox,
    hidable: bool,
    visible: bool,
    dataset_index: usize,
    item_index: usize,
}

impl LayoutState {
    /// Fresh state for the label at `item_index` in dataset `dataset_index`.
    /// It starts visible and not hidable.
    pub fn new(dataset_index: usize, item_index: usize) -> Self {
        Self {
            hit_box: HitBox::default(),
            hidable: false,
            visible: true,
            dataset_index,
            item_index,
        }
    }

    /// Box of the label as last laid out or drawn.
    pub fn hit_box(&self) -> &HitBox {
        &self.hit_box
    }

    pub(crate) fn hit_box_mut(&mut self) -> &mut HitBox {
        &mut self.hit_box
    }

    /// Whether overlap resolution may hide this label.
    pub fn is_hidable(&self) -> bool {
        self.hidable
    }

    pub(crate) fn set_hidable(&mut self, hidable: bool) {
        self.hidable = hidable;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hides the label until the next [`LabelLayout::update`].
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn dataset_index(&self) -> usize {
        self.dataset_index
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }
}

/// Prepared labels and their layout states, in priority order.
#[derive(Debug)]
pub struct LabelLayout<L> {
    labels: Vec<L>,
    states: Vec<LayoutState>,
}

impl<L> Default for LabelLayout<L> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            states: Vec::new(),
        }
    }
}

impl<L: Label> LabelLayout<L> {
    /// Flattens one label group per dataset into a single prepared layout.
    ///
    /// Labels are ordered by descending item index, then by descending
    /// dataset index. The layout is updated once before being returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use placard::{label::*, layout::LabelLayout};
    /// # use placard_core::geometry::{Point, Size};
    /// # struct Dot(Point, LabelModel);
    /// # impl Label for Dot {
    /// #     type Canvas = Vec<Point>;
    /// #     fn geometry(&self) -> Size { Size::new(10.0, 10.0) }
    /// #     fn model(&self) -> &LabelModel { &self.1 }
    /// #     fn visible(&self) -> bool { true }
    /// #     fn element(&self, _: AnchorView) -> Point { self.0 }
    /// #     fn positioner(&self, _: AnchorView) -> Anchor { Anchor::centered(self.0) }
    /// #     fn draw(&self, canvas: &mut Vec<Point>, center: &LabelCenter) { canvas.push(center.point()) }
    /// # }
    /// let auto = LabelModel::new(Display::Auto);
    /// let layout = LabelLayout::prepare(vec![
    ///     vec![Dot(Point::new(0.0, 0.0), auto)],
    ///     vec![Dot(Point::new(4.0, 0.0), auto)],
    /// ]);
    /// // Same item index: the second dataset comes first and loses.
    /// assert_eq!(layout.states()[0].dataset_index(), 1);
    /// assert!(!layout.states()[0].is_visible());
    /// assert!(layout.states()[1].is_visible());
    /// ```
    pub fn prepare<I, D>(datasets: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = L>,
    {
        let mut entries: Vec<(L, LayoutState)> = datasets
            .into_iter()
            .enumerate()
            .flat_map(|(set, labels)| {
                labels
                    .into_iter()
                    .enumerate()
                    .map(move |(idx, label)| (label, LayoutState::new(set, idx)))
            })
            .collect();

        entries.sort_by(|(_, a), (_, b)| {
            b.item_index
                .cmp(&a.item_index)
                .then(b.dataset_index.cmp(&a.dataset_index))
        });

        let (labels, states) = entries.into_iter().unzip();
        let mut layout = Self { labels, states };
        debug!(labels = layout.len(); "Labels prepared");

        layout.update();
        layout
    }

    /// Refreshes visibility from the labels and resolves overlaps.
    ///
    /// Every label gets its own visibility back, undoing earlier overlap
    /// decisions. Hit-boxes are only recomputed, and overlaps only resolved,
    /// when at least one label is in `auto` display mode.
    pub fn update(&mut self) {
        let mut dirty = false;
        for (label, state) in self.labels.iter().zip(self.states.iter_mut()) {
            state.hidable = label.model().display().is_auto();
            state.visible = label.visible();
            dirty |= state.hidable;
        }

        if dirty {
            self.compute();
        }
    }

    fn compute(&mut self) {
        for (label, state) in self.labels.iter().zip(self.states.iter_mut()) {
            if !state.visible {
                continue;
            }
            let geometry = label.geometry();
            let center = coordinates(label.positioner(AnchorView::Model), label.model(), geometry);
            state.hit_box.update(center, geometry, label.rotation());
        }

        let before = self.visible_len();
        collide(&mut self.states, hide_lower_priority);
        debug!(
            labels = self.len(),
            hidden = before - self.visible_len();
            "Overlaps resolved"
        );
    }

    /// Returns the highest-priority visible label whose box contains `point`.
    pub fn lookup(&self, point: Point) -> Option<&L> {
        self.labels
            .iter()
            .zip(&self.states)
            .rev()
            .find(|(_, state)| state.visible && state.hit_box.contains(point))
            .map(|(label, _)| label)
    }

    /// Places and draws every visible label, lowest priority first.
    ///
    /// Centers are resolved from the [`AnchorView::Live`] anchors. Labels
    /// flagged `no_overlap` are then stacked per item index. Each hit-box is
    /// refreshed with the final center before the label is drawn.
    pub fn draw(&mut self, canvas: &mut L::Canvas) {
        let mut stacker: Option<NoOverlapStacker> = None;
        let mut drawn = 0;

        for i in 0..self.labels.len() {
            if !self.states[i].visible {
                continue;
            }
            let label = &self.labels[i];
            let model = label.model();
            let geometry = label.geometry();
            let anchor = label.positioner(AnchorView::Live);
            let mut center = LabelCenter::new(coordinates(anchor, model, geometry));

            if model.no_overlap() {
                let stacker = stacker.get_or_insert_with(|| {
                    NoOverlapStacker::new(self.max_graph_height(), self.visible_counts())
                });
                stacker.adjust(
                    self.states[i].item_index,
                    label.text_size().height(),
                    &mut center,
                );
            }

            trace!(
                dataset = self.states[i].dataset_index,
                item = self.states[i].item_index,
                x = center.point().x(),
                y = center.point().y();
                "Drawing label"
            );
            self.states[i]
                .hit_box
                .update(center.point(), geometry, label.rotation());
            label.draw(canvas, &center);
            drawn += 1;
        }

        debug!(drawn = drawn, stacked = stacker.is_some(); "Labels drawn");
    }

    /// Number of visible labels per item index.
    pub fn visible_counts(&self) -> HashMap<usize, usize> {
        let mut counts = HashMap::new();
        for state in self.states.iter().filter(|s| s.visible) {
            *counts.entry(state.item_index).or_insert(0) += 1;
        }
        counts
    }

    /// Lowest on-screen element position over all labels, visible or not.
    fn max_graph_height(&self) -> f32 {
        self.labels
            .iter()
            .map(|label| label.element(AnchorView::Live).y())
            .fold(f32::NEG_INFINITY, f32::max)
    }

    fn visible_len(&self) -> usize {
        self.states.iter().filter(|s| s.visible).count()
    }
}

impl<L> LabelLayout<L> {
    /// The labels in priority order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Layout states, parallel to [`LabelLayout::labels`].
    pub fn states(&self) -> &[LayoutState] {
        &self.states
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&L, &LayoutState)> {
        self.labels.iter().zip(&self.states)
    }

    /// Mutable access to the labels, for hosts that change them between
    /// passes. Changes take effect on the next [`LabelLayout::update`].
    pub fn labels_mut(&mut self) -> impl Iterator<Item = &mut L> {
        self.labels.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
