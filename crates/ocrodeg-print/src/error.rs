//! Error types for ocrodeg-print

use thiserror::Error;

/// Errors that can occur during print simulation and degradation
#[derive(Debug, Error)]
pub enum PrintError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ocrodeg_core::Error),

    /// Filter library error
    #[error("filter error: {0}")]
    Filter(#[from] ocrodeg_filter::FilterError),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] ocrodeg_transform::TransformError),

    /// Texture library error
    #[error("texture error: {0}")]
    Texture(#[from] ocrodeg_texture::TextureError),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sample has none of the requested image fields
    #[error("sample '{key}' has none of the fields [{extensions}]")]
    MissingField { key: String, extensions: String },
}

/// Result type for print operations
pub type PrintResult<T> = Result<T, PrintError>;
