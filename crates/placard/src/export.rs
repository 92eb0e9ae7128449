//! Export functionality for Placard charts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning drawn chart layers into an output format. It is the final stage in
//! the Placard processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Scene (TOML)
//!     ↓ parse
//! Scene model
//!     ↓ chart
//! Bars + labels
//!     ↓ layout (prepare / update / draw)
//! LayeredOutput
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`PlacardError::Export`] at the crate boundary.
//!
//! [`PlacardError::Export`]: crate::PlacardError::Export

/// SVG export backend.
pub mod svg;

use placard_core::draw::LayeredOutput;

/// Abstraction for chart export backends.
pub trait Exporter {
    /// Exports the drawn layers to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layers cannot be converted to the
    /// target format.
    fn export_layers(&mut self, layers: LayeredOutput) -> Result<String, Error>;
}

/// Errors that can occur during chart export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
