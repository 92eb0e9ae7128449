//! Anchors for labels attached to vertical bars.
//!
//! A bar runs from its base (the zero line, or the top of the segment below
//! when stacked) to its end (the value). The label is attached at the point
//! picked by [`AnchorMode`] and extends in the direction given by [`Align`],
//! relative to the base-to-end orientation of the bar.

use std::fmt;

use serde::{Deserialize, Deserializer, de};

use placard_core::geometry::Point;

use crate::label::Anchor;

/// Which point of the bar a label is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// The bar base.
    Start,
    /// Halfway between base and end.
    #[default]
    Center,
    /// The bar end.
    End,
}

/// Direction the label extends from its anchor point.
///
/// Deserializes from one of the keyword strings or a number of degrees
/// (clockwise from the positive x axis, since y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Align {
    /// Centered on the anchor point.
    #[default]
    Center,
    /// Towards the bar base.
    Start,
    /// Towards the bar end.
    End,
    Top,
    Bottom,
    Left,
    Right,
    Degrees(f32),
}

impl Align {
    /// Turns the bar orientation `(vx, vy)` into the label orientation.
    pub fn apply(self, vx: f32, vy: f32) -> (f32, f32) {
        match self {
            Self::Center => (0.0, 0.0),
            Self::Start => (-vx, -vy),
            Self::End => (vx, vy),
            Self::Top => (0.0, -1.0),
            Self::Bottom => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Degrees(degrees) => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                (cos, sin)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Align {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AlignVisitor;

        impl de::Visitor<'_> for AlignVisitor {
            type Value = Align;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an alignment keyword or an angle in degrees")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Align, E> {
                match v {
                    "center" => Ok(Align::Center),
                    "start" => Ok(Align::Start),
                    "end" => Ok(Align::End),
                    "top" => Ok(Align::Top),
                    "bottom" => Ok(Align::Bottom),
                    "left" => Ok(Align::Left),
                    "right" => Ok(Align::Right),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Align, E> {
                if v.is_finite() {
                    Ok(Align::Degrees(v as f32))
                } else {
                    Err(E::invalid_value(de::Unexpected::Float(v), &self))
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Align, E> {
                Ok(Align::Degrees(v as f32))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Align, E> {
                Ok(Align::Degrees(v as f32))
            }
        }

        deserializer.deserialize_any(AlignVisitor)
    }
}

/// Unit vector from `base` to `end`, or straight up when they coincide.
pub fn orient(base: Point, end: Point) -> (f32, f32) {
    let delta = end.sub_point(base);
    let length = delta.hypot();
    if length > 0.0 {
        (delta.x() / length, delta.y() / length)
    } else {
        (0.0, -1.0)
    }
}

/// Anchor for a label on the bar running from `base` to `end`.
///
/// ```
/// # use placard::chart::{AnchorMode, Align, position};
/// # use placard_core::geometry::Point;
/// // A positive bar grows upward on screen.
/// let anchor = position(Point::new(10.0, 100.0), Point::new(10.0, 40.0), AnchorMode::End, Align::End);
/// assert_eq!(anchor.point(), Point::new(10.0, 40.0));
/// assert_eq!((anchor.vx(), anchor.vy()), (0.0, -1.0));
/// ```
pub fn position(base: Point, end: Point, anchor: AnchorMode, align: Align) -> Anchor {
    let point = match anchor {
        AnchorMode::Start => base,
        AnchorMode::Center => base.add_point(end).scale(0.5),
        AnchorMode::End => end,
    };
    let (vx, vy) = orient(base, end);
    let (vx, vy) = align.apply(vx, vy);
    Anchor::new(point, vx, vy)
}
