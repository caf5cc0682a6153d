//! FPix - Floating-point image
//!
//! `FPix` is a 2D array of `f32` intensities. Every degradation in this
//! library consumes and produces `FPix` values; by convention clean input lies
//! in [0, 1] with 0 = black ink and 1 = white paper.
//!
//! See [`convert`] for conversion to and from `image` buffers.
//!
//! # Examples
//!
//! ```
//! use ocrodeg_core::FPix;
//!
//! // Create a 100x100 floating-point image
//! let mut fpix = FPix::new(100, 100).unwrap();
//!
//! // Set and get pixel values
//! fpix.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(fpix.get_pixel(10, 20).unwrap(), 0.5);
//!
//! // Stretch into a new range
//! let stretched = fpix.rescaled(0.0, 1.0);
//! assert_eq!(stretched.max_value(), 1.0);
//! ```

pub mod convert;

use crate::error::{Error, Result};

/// Floating-point image
///
/// A 2D array of `f32` values, single channel.
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`, so rows of the array are image rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f32>,
}

impl FPix {
    /// Create a new FPix with all pixels set to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocrodeg_core::FPix;
    ///
    /// let fpix = FPix::new(640, 480).unwrap();
    /// assert_eq!(fpix.width(), 640);
    /// assert_eq!(fpix.height(), 480);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FPix with all pixels set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(FPix {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a FPix from raw data
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    /// * `data` - Pixel data in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Create a FPix by evaluating `f(x, y)` at every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Result<Self> {
        let mut fpix = FPix::new(width, height)?;
        for y in 0..height {
            let row = fpix.row_mut(y);
            for (x, v) in row.iter_mut().enumerate() {
                *v = f(x as u32, y);
            }
        }
        Ok(fpix)
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed FPix
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        Ok(self.data[self.index(x, y)])
    }

    /// Set the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Set the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get raw access to the pixel data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the pixel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the image and return its pixel buffer
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Get a mutable row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        let start = (y as usize) * (self.width as usize);
        let end = start + (self.width as usize);
        &mut self.data[start..end]
    }

    /// Create a template FPix with the same dimensions, zeroed data.
    pub fn create_template(&self) -> FPix {
        FPix {
            width: self.width,
            height: self.height,
            data: vec![0.0; self.data.len()],
        }
    }

    /// Apply `f` to every pixel, producing a new image
    pub fn map(&self, f: impl Fn(f32) -> f32) -> FPix {
        FPix {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Add two FPix images element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn add(&self, other: &FPix) -> Result<FPix> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Subtract other FPix from this one element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn sub(&self, other: &FPix) -> Result<FPix> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Element-wise maximum
    pub fn max_with(&self, other: &FPix) -> Result<FPix> {
        self.zip_with(other, f32::max)
    }

    /// Element-wise minimum
    pub fn min_with(&self, other: &FPix) -> Result<FPix> {
        self.zip_with(other, f32::min)
    }

    /// Combine two same-sized images pixel by pixel
    pub fn zip_with(&self, other: &FPix, f: impl Fn(f32, f32) -> f32) -> Result<FPix> {
        self.check_same_size(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(FPix {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Add a constant to all pixels (in-place)
    pub fn add_constant(&mut self, value: f32) {
        for v in &mut self.data {
            *v += value;
        }
    }

    /// Linear combination: result = multiplier * self + addend
    pub fn linear_combination(&self, multiplier: f32, addend: f32) -> FPix {
        self.map(|v| multiplier * v + addend)
    }

    /// Polarity flip `1 - x`
    ///
    /// Applying it twice returns the original values.
    pub fn invert(&self) -> FPix {
        self.map(|v| 1.0 - v)
    }

    /// Per-pixel blend `weight * fg + (1 - weight) * bg`
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` unless all three images match.
    pub fn blend(weight: &FPix, fg: &FPix, bg: &FPix) -> Result<FPix> {
        weight.check_same_size(fg)?;
        weight.check_same_size(bg)?;
        let data = weight
            .data
            .iter()
            .zip(fg.data.iter().zip(bg.data.iter()))
            .map(|(&w, (&f, &b))| w * f + (1.0 - w) * b)
            .collect();
        Ok(FPix {
            width: weight.width,
            height: weight.height,
            data,
        })
    }

    /// Check that two FPix have the same dimensions
    pub fn check_same_size(&self, other: &FPix) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::IncompatibleSizes(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Smallest pixel value
    pub fn min_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest pixel value
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Calculate the mean of all pixel values
    pub fn mean(&self) -> f32 {
        (self.data.iter().map(|&v| v as f64).sum::<f64>() / self.data.len() as f64) as f32
    }

    /// Calculate the sum of all pixel values
    pub fn sum(&self) -> f32 {
        self.data.iter().map(|&v| v as f64).sum::<f64>() as f32
    }

    /// Count pixels strictly above `threshold`
    pub fn count_above(&self, threshold: f32) -> usize {
        self.data.iter().filter(|&&v| v > threshold).count()
    }

    /// Count pixels strictly below `threshold`
    pub fn count_below(&self, threshold: f32) -> usize {
        self.data.iter().filter(|&&v| v < threshold).count()
    }

    // ========================================================================
    // Normalization
    // ========================================================================

    /// Linearly stretch the values so that min maps to `lo` and max to `hi`
    ///
    /// A constant image has no range to stretch; every pixel becomes `lo`
    /// instead of dividing by zero.
    pub fn rescaled(&self, lo: f32, hi: f32) -> FPix {
        let mut out = self.clone();
        out.rescale_in_place(lo, hi);
        out
    }

    /// In-place form of [`FPix::rescaled`]
    pub fn rescale_in_place(&mut self, lo: f32, hi: f32) {
        rescale_slice(&mut self.data, lo, hi);
    }
}

/// Stretch `values` into [lo, hi]; a zero-range slice collapses to `lo`
///
/// The extreme inputs map exactly onto the bounds.
pub fn rescale_slice(values: &mut [f32], lo: f32, hi: f32) {
    let vmin = values.iter().copied().fold(f32::INFINITY, f32::min);
    let vmax = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = vmax - vmin;
    if !range.is_finite() || range <= 0.0 {
        values.fill(lo);
        return;
    }
    let (floor, ceil) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    for v in values.iter_mut() {
        *v = if *v == vmax {
            hi
        } else {
            (lo + (*v - vmin) / range * (hi - lo)).clamp(floor, ceil)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fpix_creation() {
        let fpix = FPix::new(100, 200).unwrap();
        assert_eq!(fpix.width(), 100);
        assert_eq!(fpix.height(), 200);
        assert_eq!(fpix.dimensions(), (100, 200));
        assert!(fpix.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fpix_invalid_dimensions() {
        assert!(FPix::new(0, 100).is_err());
        assert!(FPix::new(100, 0).is_err());
        assert!(FPix::new_with_value(0, 0, 1.0).is_err());
    }

    #[test]
    fn test_fpix_from_data() {
        let fpix = FPix::from_data(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(fpix.get_pixel(2, 0).unwrap(), 3.0);
        assert_eq!(fpix.get_pixel(0, 1).unwrap(), 4.0);
        assert_eq!(fpix.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_fpix_from_data_wrong_size() {
        assert!(FPix::from_data(3, 2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_fpix_from_fn() {
        let fpix = FPix::from_fn(4, 3, |x, y| (x + 10 * y) as f32).unwrap();
        assert_eq!(fpix.get_pixel(3, 2).unwrap(), 23.0);
    }

    #[test]
    fn test_fpix_pixel_access_out_of_bounds() {
        let mut fpix = FPix::new(10, 10).unwrap();
        assert!(fpix.get_pixel(10, 0).is_err());
        assert!(fpix.set_pixel(0, 10, 1.0).is_err());
    }

    #[test]
    fn test_fpix_arithmetic_size_mismatch() {
        let a = FPix::new(10, 10).unwrap();
        let b = FPix::new(10, 11).unwrap();
        assert!(a.add(&b).is_err());
        assert!(a.max_with(&b).is_err());
    }

    #[test]
    fn test_fpix_min_max_with() {
        let a = FPix::from_data(2, 1, vec![0.2, 0.8]).unwrap();
        let b = FPix::from_data(2, 1, vec![0.5, 0.5]).unwrap();
        assert_eq!(a.max_with(&b).unwrap().data(), &[0.5, 0.8]);
        assert_eq!(a.min_with(&b).unwrap().data(), &[0.2, 0.5]);
    }

    #[test]
    fn test_fpix_invert_twice_is_identity() {
        let a = FPix::from_data(3, 1, vec![0.0, 0.25, 1.0]).unwrap();
        assert_eq!(a.invert().data(), &[1.0, 0.75, 0.0]);
        assert_eq!(a.invert().invert(), a);
    }

    #[test]
    fn test_fpix_blend() {
        let w = FPix::from_data(2, 1, vec![0.0, 1.0]).unwrap();
        let fg = FPix::new_with_value(2, 1, 0.1).unwrap();
        let bg = FPix::new_with_value(2, 1, 0.9).unwrap();
        let out = FPix::blend(&w, &fg, &bg).unwrap();
        assert_eq!(out.data(), &[0.9, 0.1]);
    }

    #[test]
    fn test_fpix_statistics() {
        let fpix = FPix::from_data(2, 2, vec![1.0, -2.0, 3.0, 4.0]).unwrap();
        assert_eq!(fpix.min_value(), -2.0);
        assert_eq!(fpix.max_value(), 4.0);
        assert_eq!(fpix.sum(), 6.0);
        assert_eq!(fpix.mean(), 1.5);
        assert_eq!(fpix.count_above(0.5), 3);
        assert_eq!(fpix.count_below(0.5), 1);
    }

    #[test]
    fn test_rescaled_hits_both_bounds() {
        let fpix = FPix::from_data(4, 1, vec![3.0, 5.0, 4.0, 7.0]).unwrap();
        let out = fpix.rescaled(0.7, 1.0);
        assert_eq!(out.min_value(), 0.7);
        assert_eq!(out.max_value(), 1.0);
        assert!((out.get_pixel(1, 0).unwrap() - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_rescaled_constant_collapses_to_lower_bound() {
        let fpix = FPix::new_with_value(5, 5, 0.3).unwrap();
        let out = fpix.rescaled(-1.0, 1.0);
        assert!(out.data().iter().all(|&v| v == -1.0));
        assert!(out.data().iter().all(|v| v.is_finite()));
    }
}
