//! Error types for ocrodeg-transform

use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ocrodeg_core::Error),

    /// Filter error
    #[error("filter error: {0}")]
    Filter(#[from] ocrodeg_filter::FilterError),

    /// Sampling range that is inverted or not finite
    #[error("invalid {name} range: ({lo}, {hi})")]
    InvalidRange { name: &'static str, lo: f32, hi: f32 },

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
