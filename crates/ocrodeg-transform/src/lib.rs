//! ocrodeg-transform - Geometric degradations
//!
//! This crate provides the geometric half of page degradation:
//!
//! - Random affine parameters ([`sample_transform`]) and their application
//!   about the image center ([`apply_affine`], [`transform_image`])
//! - Random displacement fields ([`bounded_noise_field`],
//!   [`line_noise_field`]) and elastic resampling ([`distort_with_field`])

pub mod affine;
pub mod elastic;
mod error;
pub mod sample;

pub use error::{TransformError, TransformResult};

pub use affine::{AffineMatrix, apply_affine, transform_image};
pub use elastic::{bounded_noise_field, distort_with_field, line_noise_field};
pub use ocrodeg_filter::InterpolationOrder;
pub use sample::{TransformParams, TransformRanges, sample_transform};
