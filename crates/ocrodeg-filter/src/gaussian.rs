//! Gaussian smoothing
//!
//! Separable Gaussian filtering with reflected borders. The kernel is cut off
//! at [`GAUSSIAN_TRUNCATE`] standard deviations, and a zero sigma leaves the
//! input unchanged.

use crate::interpolate::BoundaryMode;
use crate::kernel::{GAUSSIAN_TRUNCATE, Kernel1d};
use crate::FilterResult;
use ocrodeg_core::FPix;

/// Blur an image with an isotropic Gaussian of standard deviation `sigma`.
///
/// # Errors
///
/// Returns `FilterError::InvalidKernel` for a negative or non-finite sigma.
pub fn gaussian_filter(fpix: &FPix, sigma: f32) -> FilterResult<FPix> {
    gaussian_filter_xy(fpix, sigma, sigma)
}

/// Blur with separate standard deviations along x (columns) and y (rows).
pub fn gaussian_filter_xy(fpix: &FPix, sigma_x: f32, sigma_y: f32) -> FilterResult<FPix> {
    let kx = Kernel1d::gaussian(sigma_x, GAUSSIAN_TRUNCATE)?;
    let ky = Kernel1d::gaussian(sigma_y, GAUSSIAN_TRUNCATE)?;
    Ok(convolve_sep(fpix, &kx, &ky))
}

/// Blur a 1-D signal with a Gaussian of standard deviation `sigma`.
pub fn gaussian_filter_1d(values: &[f32], sigma: f32) -> FilterResult<Vec<f32>> {
    let kernel = Kernel1d::gaussian(sigma, GAUSSIAN_TRUNCATE)?;
    let mut out = vec![0.0; values.len()];
    convolve_line(values, &mut out, &kernel);
    Ok(out)
}

/// Convolve rows with `kernel_x`, then columns with `kernel_y`.
pub fn convolve_sep(fpix: &FPix, kernel_x: &Kernel1d, kernel_y: &Kernel1d) -> FPix {
    if kernel_x.radius() == 0 && kernel_y.radius() == 0 {
        return fpix.linear_combination(kernel_x.data()[0] * kernel_y.data()[0], 0.0);
    }

    let (w, h) = fpix.dimensions();
    let mut tmp = fpix.create_template();

    for y in 0..h {
        convolve_line(fpix.row(y), tmp.row_mut(y), kernel_x);
    }

    let mut out = fpix.create_template();
    let mut column = vec![0.0f32; h as usize];
    let mut result = vec![0.0f32; h as usize];
    for x in 0..w {
        for (y, v) in column.iter_mut().enumerate() {
            *v = tmp.get_pixel_unchecked(x, y as u32);
        }
        convolve_line(&column, &mut result, kernel_y);
        for (y, &v) in result.iter().enumerate() {
            out.set_pixel_unchecked(x, y as u32, v);
        }
    }
    out
}

fn convolve_line(src: &[f32], dst: &mut [f32], kernel: &Kernel1d) {
    let n = src.len();
    let radius = kernel.radius() as i64;
    let weights = kernel.data();
    for (i, d) in dst.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for (k, &wk) in weights.iter().enumerate() {
            let j = i as i64 + k as i64 - radius;
            sum += wk * src[BoundaryMode::Reflect.index(j, n)];
        }
        *d = sum;
    }
}
