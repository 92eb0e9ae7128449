//! CSS colors for bars, label text and label backgrounds.
//!
//! [`Color`] wraps `DynamicColor` from the `color` crate so scene files and
//! configuration can use any CSS color syntax (`"#ff8000"`, `"rgb(0 0 0)"`,
//! `"steelblue"`, ...).

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use placard_core::color::Color;
    ///
    /// assert!(Color::new("#4e79a7").is_ok());
    /// assert!(Color::new("steelblue").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns a copy of this color with the given alpha (0.0 transparent, 1.0 opaque).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("rgb(10, 20, 30)").is_ok());

        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_color_alpha() {
        let color = Color::new("red").unwrap();
        assert_approx_eq!(f32, color.alpha(), 1.0);
        assert_approx_eq!(f32, color.with_alpha(0.25).alpha(), 0.25);
    }

    #[test]
    fn test_color_display_round_trips_through_parser() {
        let color = Color::new("#336699").unwrap();
        let reparsed = Color::new(&color.to_string()).unwrap();
        assert_eq!(color.to_string(), reparsed.to_string());
    }
}
