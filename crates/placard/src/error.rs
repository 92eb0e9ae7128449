//! Error types for Placard operations.
//!
//! This module provides the main error type [`PlacardError`] which wraps
//! the error conditions that can occur while loading and rendering a chart.
//! The layout engine itself never fails.

use std::io;

use thiserror::Error;

/// The main error type for Placard operations.
///
/// # Diagnostic Variants
///
/// The `Scene` variant keeps the TOML error together with the scene source,
/// so that callers can point at the offending span.
#[derive(Debug, Error)]
pub enum PlacardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Scene { err: toml::de::Error, src: String },

    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for PlacardError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl PlacardError {
    /// Create a new `Scene` error with the associated source text.
    pub fn new_scene_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Scene {
            err,
            src: src.into(),
        }
    }
}
