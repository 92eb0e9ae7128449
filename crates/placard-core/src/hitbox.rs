//! Oriented rectangles used for label overlap detection and hit-testing.
//!
//! A [`HitBox`] is the box a label's text occupies on screen: a center, the
//! unrotated width/height of the text box, and a rotation angle in radians.
//! It is refreshed every layout pass with [`HitBox::update`] and then queried
//! with [`HitBox::intersects`] (overlap resolution) and [`HitBox::contains`]
//! (pointer lookup).
//!
//! # Example
//!
//! ```
//! # use placard_core::{geometry::{Point, Size}, hitbox::HitBox};
//! let mut a = HitBox::default();
//! let mut b = HitBox::default();
//! a.update(Point::new(0.0, 0.0), Size::new(20.0, 10.0), 0.0);
//! b.update(Point::new(15.0, 0.0), Size::new(20.0, 10.0), 0.0);
//! assert!(a.intersects(&b));
//! assert!(a.contains(Point::new(9.0, 4.0)));
//! ```

use crate::geometry::{Bounds, Point, Size};

/// An oriented rectangle bounding a rendered label.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitBox {
    center: Point,
    size: Size,
    rotation: f32,
}

impl HitBox {
    /// Creates a hit-box already placed at `center`.
    pub fn new(center: Point, size: Size, rotation: f32) -> Self {
        Self {
            center,
            size,
            rotation,
        }
    }

    /// Re-centers the box on `center` with the given text box size and rotation.
    pub fn update(&mut self, center: Point, geometry: Size, rotation: f32) {
        self.center = center;
        self.size = geometry;
        self.rotation = rotation;
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// The four corners, clockwise on screen starting from the unrotated top-left.
    pub fn corners(&self) -> [Point; 4] {
        let hw = self.size.width() / 2.0;
        let hh = self.size.height() / 2.0;
        let (cx, cy) = (self.center.x(), self.center.y());
        [
            Point::new(cx - hw, cy - hh),
            Point::new(cx + hw, cy - hh),
            Point::new(cx + hw, cy + hh),
            Point::new(cx - hw, cy + hh),
        ]
        .map(|corner| corner.rotate_around(self.center, self.rotation))
    }

    /// Axis-aligned envelope of the rotated box.
    pub fn bounds(&self) -> Bounds {
        Bounds::enclosing(self.corners())
            .unwrap_or_else(|| Bounds::new_from_center(self.center, Size::default()))
    }

    /// Unit edge normals of this box. Derived from the angle rather than the
    /// corners so that zero-sized boxes still yield valid axes.
    fn axes(&self) -> [Point; 2] {
        let (sin, cos) = self.rotation.sin_cos();
        [Point::new(cos, sin), Point::new(-sin, cos)]
    }

    /// Returns true if the two oriented rectangles overlap.
    ///
    /// Separating axis test over the edge normals of both boxes. Boxes that
    /// only touch along an edge or at a corner count as intersecting.
    pub fn intersects(&self, other: &HitBox) -> bool {
        let ours = self.corners();
        let theirs = other.corners();

        self.axes()
            .into_iter()
            .chain(other.axes())
            .all(|axis| {
                let (min0, max0) = project(&ours, axis);
                let (min1, max1) = project(&theirs, axis);
                !(max0 < min1 || max1 < min0)
            })
    }

    /// Returns true if `point` lies inside the box or on its border.
    pub fn contains(&self, point: Point) -> bool {
        // Undo the rotation so the test becomes axis-aligned.
        let local = point.rotate_around(self.center, -self.rotation);
        let dx = (local.x() - self.center.x()).abs();
        let dy = (local.y() - self.center.y()).abs();
        dx <= self.size.width() / 2.0 && dy <= self.size.height() / 2.0
    }
}

fn project(corners: &[Point; 4], axis: Point) -> (f32, f32) {
    corners
        .iter()
        .map(|corner| corner.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        })
}
