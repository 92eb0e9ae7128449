//! Placard Core Types
//!
//! Foundational types shared by the Placard label layout engine and its
//! renderers:
//!
//! - **Geometry**: points, sizes, bounds and insets ([`geometry`] module)
//! - **Hit-boxes**: oriented label rectangles with overlap and containment
//!   tests ([`hitbox::HitBox`])
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Draw**: text measurement and layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod hitbox;
