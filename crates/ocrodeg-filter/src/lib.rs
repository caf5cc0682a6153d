//! ocrodeg-filter - Filtering primitives for document degradation
//!
//! This crate provides the numerical building blocks used by the
//! degradation stages:
//!
//! - Separable Gaussian smoothing with reflected borders
//! - Exact Euclidean distance transform
//! - Spline resampling (orders 0, 1 and 3) and cropped zooming
//! - Bilevel-preserving blur

pub mod binary;
pub mod distance;
mod error;
pub mod gaussian;
pub mod interpolate;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::{GAUSSIAN_TRUNCATE, Kernel1d};

pub use binary::{binary_blur, percent_black, percentile};
pub use distance::distance_transform_edt;
pub use gaussian::{convolve_sep, gaussian_filter, gaussian_filter_1d, gaussian_filter_xy};
pub use interpolate::{
    BoundaryMode, InterpolationOrder, Interpolator, map_coordinates, zoom_cropped,
};
