//! Resolving where a label's box is centered.

use placard_core::geometry::{Point, Size};

use crate::label::{Anchor, LabelModel};

/// Computes the center of a label box from its anchor.
///
/// The box is pushed away from the anchor point along the anchor's
/// orientation until its edge touches the anchor, then by `model.offset()`
/// more. A centered anchor (`vx == vy == 0`) is returned unchanged.
///
/// The orientation is rescaled so that its dominant component is exactly
/// `±1`; a unit diagonal would otherwise stop at the ellipse inscribed in
/// the box instead of at its corner.
///
/// # Examples
///
/// ```
/// # use placard::{anchor::coordinates, label::{Anchor, Display, LabelModel}};
/// # use placard_core::geometry::{Point, Size};
/// let model = LabelModel::new(Display::Always).with_offset(10.0);
/// let anchor = Anchor::new(Point::new(100.0, 100.0), 1.0, 0.0);
/// let center = coordinates(anchor, &model, Size::new(20.0, 10.0));
/// assert_eq!(center, Point::new(120.0, 100.0));
/// ```
pub fn coordinates(anchor: Anchor, model: &LabelModel, geometry: Size) -> Point {
    let point = anchor.point();
    let (vx, vy) = (anchor.vx(), anchor.vy());

    // Also guards the division below.
    if vx == 0.0 && vy == 0.0 {
        return point;
    }

    let half_w = geometry.width() / 2.0;
    let half_h = geometry.height() / 2.0;
    let (sin, cos) = model.rotation().sin_cos();
    let dx = (half_w * cos).abs() + (half_h * sin).abs();
    let dy = (half_w * sin).abs() + (half_h * cos).abs();

    let scale = 1.0 / vx.abs().max(vy.abs());
    let offset = model.offset();

    Point::new(
        point.x() + dx * vx * scale + offset * vx,
        point.y() + dy * vy * scale + offset * vy,
    )
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::label::Display;

    fn model(offset: f32, rotation: f32) -> LabelModel {
        LabelModel::new(Display::Auto)
            .with_offset(offset)
            .with_rotation(rotation)
    }

    #[test]
    fn test_centered_anchor_is_returned_unchanged() {
        let anchor = Anchor::centered(Point::new(42.0, 17.0));
        let center = coordinates(anchor, &model(25.0, 1.0), Size::new(300.0, 80.0));
        assert_eq!(center, Point::new(42.0, 17.0));
    }

    #[test]
    fn test_right_orientation_touches_box_edge_plus_offset() {
        let anchor = Anchor::new(Point::new(100.0, 100.0), 1.0, 0.0);
        let center = coordinates(anchor, &model(10.0, 0.0), Size::new(20.0, 10.0));
        assert_approx_eq!(f32, center.x(), 120.0);
        assert_approx_eq!(f32, center.y(), 100.0);
    }

    #[test]
    fn test_top_orientation_uses_half_height() {
        let anchor = Anchor::new(Point::new(50.0, 200.0), 0.0, -1.0);
        let center = coordinates(anchor, &model(4.0, 0.0), Size::new(40.0, 12.0));
        assert_approx_eq!(f32, center.x(), 50.0);
        assert_approx_eq!(f32, center.y(), 200.0 - 6.0 - 4.0);
    }

    #[test]
    fn test_quarter_rotation_swaps_extents() {
        let anchor = Anchor::new(Point::new(0.0, 0.0), 0.0, -1.0);
        let center = coordinates(anchor, &model(0.0, FRAC_PI_2), Size::new(40.0, 12.0));
        // Rotated upright, the box is 40px tall.
        assert_approx_eq!(f32, center.y(), -20.0, epsilon = 1e-4);
        assert_approx_eq!(f32, center.x(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_diagonal_reaches_box_corner() {
        let anchor = Anchor::new(Point::new(0.0, 0.0), FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        let center = coordinates(anchor, &model(0.0, 0.0), Size::new(20.0, 10.0));
        // Scaled to (1, 1): the top-left corner sits on the anchor.
        assert_approx_eq!(f32, center.x(), 10.0, epsilon = 1e-4);
        assert_approx_eq!(f32, center.y(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_offset_is_not_rescaled() {
        let anchor = Anchor::new(Point::new(0.0, 0.0), FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        let without = coordinates(anchor, &model(0.0, 0.0), Size::new(20.0, 10.0));
        let with = coordinates(anchor, &model(10.0, 0.0), Size::new(20.0, 10.0));
        assert_approx_eq!(f32, with.x() - without.x(), 10.0 * FRAC_1_SQRT_2, epsilon = 1e-4);
        assert_approx_eq!(f32, with.y() - without.y(), 10.0 * FRAC_1_SQRT_2, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_geometry_moves_only_by_offset() {
        let anchor = Anchor::new(Point::new(5.0, 5.0), -1.0, 0.0);
        let center = coordinates(anchor, &model(3.0, 0.0), Size::default());
        assert_eq!(center, Point::new(2.0, 5.0));
    }
}
