//! Multiscale value noise
//!
//! Noise at scale `s` is uniform noise on a grid `s` times coarser than the
//! image, zoomed back up with cubic spline interpolation. Summing several
//! scales gives the blotchy, uneven look of real paper and ink.

use crate::error::{TextureError, TextureResult, check_limits};
use ocrodeg_core::{FPix, rescale_slice};
use ocrodeg_filter::{InterpolationOrder, zoom_cropped};
use rand::Rng;

/// Default scale range for [`multiscale_noise_auto`]
pub const DEFAULT_SCALE_RANGE: (f32, f32) = (1.0, 100.0);

/// Default number of scales for [`multiscale_noise_auto`]
pub const DEFAULT_NUM_SCALES: usize = 4;

/// Smooth noise with features roughly `scale` pixels across.
///
/// Uniform values on a `(height / scale + 1) x (width / scale + 1)` grid are
/// zoomed by `scale` with cubic interpolation and cropped to
/// `width x height`.
///
/// # Errors
///
/// Returns `TextureError::InvalidParameters` unless `scale` is finite and
/// > 0, and a core error for zero dimensions.
pub fn noise_at_scale<R: Rng>(
    width: u32,
    height: u32,
    scale: f32,
    rng: &mut R,
) -> TextureResult<FPix> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TextureError::InvalidParameters(format!(
            "noise scale must be finite and > 0, got {scale}"
        )));
    }

    let w0 = (width as f32 / scale + 1.0) as u32;
    let h0 = (height as f32 / scale + 1.0) as u32;
    let coarse = FPix::from_fn(w0, h0, |_, _| rng.random::<f32>())?;
    Ok(zoom_cropped(
        &coarse,
        scale,
        width,
        height,
        InterpolationOrder::Cubic,
    )?)
}

/// Weighted sum of noise at several scales, rescaled into `limits`.
///
/// Without `weights` every scale has weight 1. The smallest value of the
/// result equals `limits.0` and the largest `limits.1`.
///
/// # Errors
///
/// Returns `TextureError::WeightCountMismatch` if `weights` and `scales`
/// differ in length, `TextureError::InvalidLimits` for inverted limits, and
/// `TextureError::InvalidParameters` for an empty scale list.
pub fn multiscale_noise<R: Rng>(
    width: u32,
    height: u32,
    scales: &[f32],
    weights: Option<&[f32]>,
    limits: (f32, f32),
    rng: &mut R,
) -> TextureResult<FPix> {
    check_limits(limits)?;
    if scales.is_empty() {
        return Err(TextureError::InvalidParameters(
            "at least one noise scale is required".into(),
        ));
    }
    let weight_count = weights.map_or(scales.len(), <[f32]>::len);
    if weight_count != scales.len() {
        return Err(TextureError::WeightCountMismatch {
            scales: scales.len(),
            weights: weight_count,
        });
    }

    let mut result = FPix::new(width, height)?;
    for (i, &scale) in scales.iter().enumerate() {
        let weight = weights.map_or(1.0, |w| w[i]);
        let noise = noise_at_scale(width, height, scale, rng)?;
        for (acc, &v) in result.data_mut().iter_mut().zip(noise.data()) {
            *acc += weight * v;
        }
    }

    result.rescale_in_place(limits.0, limits.1);
    Ok(result)
}

/// Multiscale noise with randomly chosen scales and weights.
///
/// `num_scales` increasing scales are spread over `scale_range` in log10
/// space: uniform draws are accumulated, normalized to [0, 1] and mapped
/// linearly onto `[log10 lo, log10 hi]`. Each weight is uniform in [0, 2).
///
/// # Errors
///
/// Returns `TextureError::InvalidParameters` unless `scale_range` is
/// positive and ordered and `num_scales` is at least 1.
pub fn multiscale_noise_auto<R: Rng>(
    width: u32,
    height: u32,
    scale_range: (f32, f32),
    num_scales: usize,
    limits: (f32, f32),
    rng: &mut R,
) -> TextureResult<FPix> {
    let (smin, smax) = scale_range;
    if !(smin.is_finite() && smax.is_finite() && smin > 0.0 && smin <= smax) {
        return Err(TextureError::InvalidParameters(format!(
            "scale range must satisfy 0 < lo <= hi, got ({smin}, {smax})"
        )));
    }
    if num_scales == 0 {
        return Err(TextureError::InvalidParameters(
            "at least one noise scale is required".into(),
        ));
    }

    let mut scales: Vec<f32> = (0..num_scales)
        .scan(0.0f32, |acc, _| {
            *acc += rng.random::<f32>();
            Some(*acc)
        })
        .collect();
    rescale_slice(&mut scales, smin.log10(), smax.log10());
    for s in &mut scales {
        *s = 10f32.powf(*s);
    }
    let weights: Vec<f32> = (0..num_scales).map(|_| 2.0 * rng.random::<f32>()).collect();

    multiscale_noise(width, height, &scales, Some(weights.as_slice()), limits, rng)
}
