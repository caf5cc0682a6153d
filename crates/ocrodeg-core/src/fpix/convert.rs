//! Conversion between `FPix` and 8-bit image buffers
//!
//! Decoding and encoding files stays with the caller; these helpers only move
//! pixels between the `image` crate's buffers and normalized intensities.
//!
//! - 8-bit gray values are divided by 255
//! - Color images are collapsed to gray by averaging R, G and B (alpha is
//!   dropped)
//! - Output is clamped to [0, 1], scaled by 255 and rounded

use image::{DynamicImage, GrayImage, Luma};

use super::FPix;
use crate::error::{Error, Result};

impl FPix {
    /// Create a normalized FPix from 8-bit gray samples
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or `samples` has the
    /// wrong length.
    pub fn from_gray_u8(width: u32, height: u32, samples: &[u8]) -> Result<Self> {
        let data = samples.iter().map(|&v| f32::from(v) / 255.0).collect();
        FPix::from_data(width, height, data)
    }

    /// Create a normalized FPix from any decoded image
    ///
    /// Multi-channel images are averaged over their color channels.
    ///
    /// # Errors
    ///
    /// Returns `Error::DecodeError` for an image with zero area.
    pub fn from_dynamic_image(img: &DynamicImage) -> Result<Self> {
        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(Error::DecodeError(format!(
                "image has no pixels: {width}x{height}"
            )));
        }

        let data = match img {
            DynamicImage::ImageLuma8(gray) => {
                gray.pixels().map(|p| f32::from(p.0[0]) / 255.0).collect()
            }
            _ => img
                .to_rgb32f()
                .pixels()
                .map(|p| (p.0[0] + p.0[1] + p.0[2]) / 3.0)
                .collect(),
        };
        FPix::from_data(width, height, data)
    }

    /// Convert to an 8-bit gray image
    ///
    /// Values outside [0, 1] are clipped.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            let v = self.get_pixel_unchecked(x, y).clamp(0.0, 1.0);
            Luma([(v * 255.0).round() as u8])
        })
    }
}
