//! Error types for ocrodeg-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Every variant is a precondition violation: a caller handed in a shape or
//! value the operation cannot work with. Nothing here is retryable.

use thiserror::Error;

/// ocrodeg-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Incompatible image sizes
    #[error("incompatible image sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Pixel values outside the normalized [0, 1] range
    #[error("value {value} outside normalized range [0, 1]")]
    NotNormalized { value: f32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Image decode error
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result type alias for ocrodeg-core operations
pub type Result<T> = std::result::Result<T, Error>;
