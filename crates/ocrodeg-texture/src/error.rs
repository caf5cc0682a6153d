//! Error types for ocrodeg-texture

use thiserror::Error;

/// Errors that can occur during texture synthesis
#[derive(Debug, Error)]
pub enum TextureError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ocrodeg_core::Error),

    /// Filter error
    #[error("filter error: {0}")]
    Filter(#[from] ocrodeg_filter::FilterError),

    /// Output limits that are inverted or not finite
    #[error("invalid limits: ({lo}, {hi})")]
    InvalidLimits { lo: f32, hi: f32 },

    /// Scale and weight lists of different lengths
    #[error("{scales} scales but {weights} weights")]
    WeightCountMismatch { scales: usize, weights: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for texture operations
pub type TextureResult<T> = Result<T, TextureError>;

/// Reject inverted or non-finite output limits
pub(crate) fn check_limits((lo, hi): (f32, f32)) -> TextureResult<()> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(TextureError::InvalidLimits { lo, hi });
    }
    Ok(())
}
