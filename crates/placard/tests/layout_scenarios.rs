//! End-to-end layout scenarios over a minimal label host.

use std::collections::HashMap;

use float_cmp::assert_approx_eq;
use proptest::prelude::*;

use placard::{
    geometry::{Point, Size},
    label::{Anchor, AnchorView, Display, Label, LabelCenter, LabelModel},
    layout::LabelLayout,
    stack::NoOverlapStacker,
};

/// A label pinned to a fixed anchor, drawing its name and center.
struct Pin {
    name: &'static str,
    anchor: Anchor,
    size: Size,
    model: LabelModel,
}

impl Pin {
    fn new(name: &'static str, x: f32, y: f32, display: Display) -> Self {
        Self {
            name,
            anchor: Anchor::centered(Point::new(x, y)),
            size: Size::new(20.0, 10.0),
            model: LabelModel::new(display),
        }
    }

    fn pointing(mut self, vx: f32, vy: f32, offset: f32) -> Self {
        self.anchor = Anchor::new(self.anchor.point(), vx, vy);
        self.model = self.model.with_offset(offset);
        self
    }

    fn stacked(mut self) -> Self {
        self.model = self.model.with_no_overlap(true);
        self
    }
}

impl Label for Pin {
    type Canvas = Vec<(&'static str, Point)>;

    fn geometry(&self) -> Size {
        self.size
    }

    fn model(&self) -> &LabelModel {
        &self.model
    }

    fn visible(&self) -> bool {
        true
    }

    fn element(&self, _view: AnchorView) -> Point {
        self.anchor.point()
    }

    fn positioner(&self, _view: AnchorView) -> Anchor {
        self.anchor
    }

    fn draw(&self, canvas: &mut Self::Canvas, center: &LabelCenter) {
        canvas.push((self.name, center.point()));
    }
}

fn drawn(layout: &mut LabelLayout<Pin>) -> HashMap<&'static str, Point> {
    let mut canvas = Vec::new();
    layout.draw(&mut canvas);
    canvas.into_iter().collect()
}

#[test]
fn test_overlapping_auto_pair_keeps_higher_priority() {
    // Same item index: dataset 1 is prepared first and loses.
    let mut layout = LabelLayout::prepare(vec![
        vec![Pin::new("B", 105.0, 100.0, Display::Auto)],
        vec![Pin::new("A", 100.0, 100.0, Display::Auto)],
    ]);

    let centers = drawn(&mut layout);
    assert_eq!(centers.len(), 1);
    assert!(centers.contains_key("B"));
}

#[test]
fn test_oriented_anchor_is_pushed_past_box_edge() {
    let mut layout = LabelLayout::prepare(vec![vec![
        Pin::new("east", 100.0, 100.0, Display::Always).pointing(1.0, 0.0, 10.0),
    ]]);

    let center = drawn(&mut layout)["east"];
    assert_approx_eq!(f32, center.x(), 120.0);
    assert_approx_eq!(f32, center.y(), 100.0);
    assert_approx_eq!(f32, layout.states()[0].hit_box().center().x(), 120.0);
}

#[test]
fn test_lookup_after_draw_returns_topmost_label() {
    let mut layout = LabelLayout::prepare(vec![
        vec![Pin::new("low", 100.0, 100.0, Display::Always)],
        vec![Pin::new("high", 108.0, 100.0, Display::Always)],
    ]);
    drawn(&mut layout);

    // Both boxes contain (105, 100); dataset 0 has the higher priority.
    let hit = layout.lookup(Point::new(105.0, 100.0));
    assert_eq!(hit.map(|p| p.name), Some("low"));

    let hit = layout.lookup(Point::new(116.0, 100.0));
    assert_eq!(hit.map(|p| p.name), Some("high"));

    assert!(layout.lookup(Point::new(300.0, 300.0)).is_none());
}

#[test]
fn test_stacked_series_is_spread_out() {
    // The unstacked label at item 1 sets the lowest element well below the
    // series, so no room has to be reserved.
    let mut layout = LabelLayout::prepare(vec![
        vec![
            Pin::new("bottom", 50.0, 60.0, Display::Always).stacked(),
            Pin::new("axis", 300.0, 200.0, Display::Always),
        ],
        vec![Pin::new("middle", 50.0, 58.0, Display::Always).stacked()],
        vec![Pin::new("top", 50.0, 56.0, Display::Always).stacked()],
    ]);

    let centers = drawn(&mut layout);
    assert_approx_eq!(f32, centers["top"].y(), 56.0);
    assert_approx_eq!(f32, centers["middle"].y(), 66.0);
    assert_approx_eq!(f32, centers["bottom"].y(), 76.0);
    assert_approx_eq!(f32, centers["axis"].y(), 200.0);
}

#[test]
fn test_repeated_update_and_draw_are_stable() {
    let mut layout = LabelLayout::prepare(vec![
        vec![
            Pin::new("a", 0.0, 0.0, Display::Auto),
            Pin::new("b", 100.0, 0.0, Display::Auto),
        ],
        vec![
            Pin::new("c", 4.0, 0.0, Display::Auto),
            Pin::new("d", 300.0, 0.0, Display::Auto),
        ],
    ]);
    let states = layout.states().to_vec();
    let first = drawn(&mut layout);

    layout.update();
    assert_eq!(
        layout.states().iter().map(|s| s.is_visible()).collect::<Vec<_>>(),
        states.iter().map(|s| s.is_visible()).collect::<Vec<_>>()
    );
    assert_eq!(drawn(&mut layout), first);
}

// ============================================================================
// Property tests
// ============================================================================

const TEXT_HEIGHT: f32 = 10.0;

fn arb_series() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(5.0f32..150.0, 1..8).prop_map(|mut ys| {
        ys.sort_by(f32::total_cmp);
        ys
    })
}

fn check_stacked_centers_keep_spacing(ys: Vec<f32>) -> Result<(), TestCaseError> {
    let max_graph_height = 150.0 + ys.len() as f32 * TEXT_HEIGHT;
    let mut stacker = NoOverlapStacker::new(max_graph_height, HashMap::from([(0, ys.len())]));

    let mut previous: Option<f32> = None;
    for &y in &ys {
        let mut center = LabelCenter::new(Point::new(0.0, y));
        stacker.adjust(0, TEXT_HEIGHT, &mut center);

        let placed = center.point().y();
        prop_assert!(placed >= y - 1e-3, "labels only move down here");
        prop_assert!(placed >= TEXT_HEIGHT / 2.0 - 1e-3);
        if let Some(prev) = previous {
            prop_assert!(placed - prev >= TEXT_HEIGHT - 1e-3);
        }
        previous = Some(placed);
    }
    prop_assert_eq!(stacker.placed(0), ys.len());
    Ok(())
}

proptest! {
    #[test]
    fn stacked_centers_keep_spacing(ys in arb_series()) {
        check_stacked_centers_keep_spacing(ys)?;
    }
}
