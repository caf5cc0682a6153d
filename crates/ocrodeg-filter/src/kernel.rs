//! Separable convolution kernels
//!
//! A [`Kernel1d`] is a symmetric, odd-length weight vector applied along one
//! axis. Gaussian blurs are built from two passes of the same kernel.

use crate::{FilterError, FilterResult};

/// Gaussian support is cut off at this many standard deviations
pub const GAUSSIAN_TRUNCATE: f32 = 4.0;

/// A 1-D convolution kernel centered on its middle element
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1d {
    /// Kernel weights, length `2 * radius + 1`
    data: Vec<f32>,
    /// Half-width
    radius: usize,
}

impl Kernel1d {
    /// Create a kernel from odd-length weights.
    pub fn from_slice(data: &[f32]) -> FilterResult<Self> {
        if data.is_empty() || data.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel length must be odd, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data: data.to_vec(),
            radius: data.len() / 2,
        })
    }

    /// The single-tap kernel `[1]`
    pub fn identity() -> Self {
        Self {
            data: vec![1.0],
            radius: 0,
        }
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// The radius is `round(truncate * sigma)`. A zero sigma yields the
    /// identity kernel.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` for a negative or non-finite
    /// sigma.
    pub fn gaussian(sigma: f32, truncate: f32) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian sigma must be finite and >= 0, got {sigma}"
            )));
        }
        if sigma <= 1e-15 {
            return Ok(Self::identity());
        }

        let radius = (truncate * sigma + 0.5) as usize;
        let sigma2 = (sigma as f64) * (sigma as f64);
        let weights: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let x = i as f64 - radius as f64;
                (-0.5 * x * x / sigma2).exp()
            })
            .collect();
        let total: f64 = weights.iter().sum();

        Ok(Self {
            data: weights.iter().map(|w| (w / total) as f32).collect(),
            radius,
        })
    }

    /// Half-width of the kernel
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Kernel weights
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Sum of all weights
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}
