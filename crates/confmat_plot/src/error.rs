//! Error types for rendering.

use thiserror::Error;

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while drawing or presenting a figure.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The drawing backend failed.
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Invalid rendering configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PlotError {
    pub(crate) fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}
