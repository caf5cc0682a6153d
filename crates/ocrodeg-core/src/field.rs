//! Displacement fields for elastic distortion
//!
//! A [`DisplacementField`] holds one row offset and one column offset per
//! pixel, in pixel units. Pixel (x, y) of a distorted image is sampled from
//! the source at `(y + rows[x, y], x + cols[x, y])`.

use crate::error::{Error, Result};
use crate::fpix::FPix;

/// Two-channel per-pixel offset field
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementField {
    /// Channel 0: row (vertical) offsets
    rows: FPix,
    /// Channel 1: column (horizontal) offsets
    cols: FPix,
}

impl DisplacementField {
    /// Build a field from its two channels
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if the channels differ in shape.
    pub fn new(rows: FPix, cols: FPix) -> Result<Self> {
        rows.check_same_size(&cols)?;
        Ok(Self { rows, cols })
    }

    /// An all-zero field; distorting with it leaves an image unchanged
    pub fn zeros(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            rows: FPix::new(width, height)?,
            cols: FPix::new(width, height)?,
        })
    }

    /// Field dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.rows.dimensions()
    }

    /// Row offsets
    pub fn rows(&self) -> &FPix {
        &self.rows
    }

    /// Column offsets
    pub fn cols(&self) -> &FPix {
        &self.cols
    }

    /// Split into (rows, cols)
    pub fn into_channels(self) -> (FPix, FPix) {
        (self.rows, self.cols)
    }

    /// Offsets at (x, y) as (row, col)
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> (f32, f32) {
        (
            self.rows.get_pixel_unchecked(x, y),
            self.cols.get_pixel_unchecked(x, y),
        )
    }

    /// Largest absolute offset over both channels
    pub fn max_abs(&self) -> f32 {
        self.rows
            .data()
            .iter()
            .chain(self.cols.data())
            .fold(0.0f32, |acc, &v| acc.max(v.abs()))
    }

    /// Reject a field whose shape differs from `image`
    pub fn check_matches(&self, image: &FPix) -> Result<()> {
        let (fw, fh) = self.dimensions();
        let (iw, ih) = image.dimensions();
        if (fw, fh) != (iw, ih) {
            return Err(Error::IncompatibleSizes(iw, ih, fw, fh));
        }
        Ok(())
    }
}
