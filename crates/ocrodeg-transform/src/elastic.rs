//! Elastic distortion with random displacement fields
//!
//! A [`DisplacementField`] moves every pixel by a per-pixel (row, col)
//! offset. Two generators are provided:
//!
//! - [`bounded_noise_field`]: smooth 2-D noise in `[-maxdelta, maxdelta]`,
//!   giving a rubber-sheet warp whose smoothness is set by `sigma`
//! - [`line_noise_field`]: a 1-D wave along the columns that shifts whole
//!   columns up and down, like a baseline that is not quite straight
//!
//! [`distort_with_field`] resamples an image through a field with reflected
//! borders.

use crate::{TransformError, TransformResult};
use ocrodeg_core::{DisplacementField, FPix, rescale_slice};
use ocrodeg_filter::{
    BoundaryMode, InterpolationOrder, gaussian_filter, gaussian_filter_1d, map_coordinates,
};
use rand::Rng;
use rand_distr::StandardNormal;

/// Smooth random field with values in `[-maxdelta, maxdelta]`.
///
/// Each channel starts as uniform noise and is blurred with `sigma`
/// (`sigma = 0` leaves it unsmoothed). Both channels are then rescaled
/// together so that the smallest value over the field maps to `-maxdelta`
/// and the largest to `maxdelta`.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameters` for a negative or non-finite
/// `sigma` or `maxdelta`, and a core error for zero dimensions.
pub fn bounded_noise_field<R: Rng>(
    width: u32,
    height: u32,
    sigma: f32,
    maxdelta: f32,
    rng: &mut R,
) -> TransformResult<DisplacementField> {
    check_non_negative("sigma", sigma)?;
    check_non_negative("maxdelta", maxdelta)?;

    let rows = FPix::from_fn(width, height, |_, _| rng.random::<f32>())?;
    let cols = FPix::from_fn(width, height, |_, _| rng.random::<f32>())?;
    let rows = gaussian_filter(&rows, sigma)?;
    let cols = gaussian_filter(&cols, sigma)?;

    // Joint normalization over both channels
    let n = rows.len();
    let mut joint = rows.into_data();
    joint.extend_from_slice(cols.data());
    rescale_slice(&mut joint, -maxdelta, maxdelta);
    let col_data = joint.split_off(n);

    let rows = FPix::from_data(width, height, joint)?;
    let cols = FPix::from_data(width, height, col_data)?;
    Ok(DisplacementField::new(rows, cols)?)
}

/// Field that displaces whole columns vertically by a smooth 1-D wave.
///
/// A standard-normal sequence of length `width` is blurred with `sigma` and
/// scaled so that its largest absolute value equals `magnitude`. The row
/// channel holds that sequence in every row; the column channel is zero.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameters` for a negative or non-finite
/// `sigma` or `magnitude`.
pub fn line_noise_field<R: Rng>(
    width: u32,
    height: u32,
    sigma: f32,
    magnitude: f32,
    rng: &mut R,
) -> TransformResult<DisplacementField> {
    check_non_negative("sigma", sigma)?;
    check_non_negative("magnitude", magnitude)?;

    let noise: Vec<f32> = (0..width).map(|_| rng.sample(StandardNormal)).collect();
    let mut noise = gaussian_filter_1d(&noise, sigma)?;
    let peak = noise.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    if peak > 0.0 {
        let k = magnitude / peak;
        for v in &mut noise {
            *v *= k;
        }
    }

    let rows = FPix::from_fn(width, height, |x, _| noise[x as usize])?;
    let cols = FPix::new(width, height)?;
    Ok(DisplacementField::new(rows, cols)?)
}

/// Resample `image` at (row + field.rows, col + field.cols).
///
/// Positions outside the image are reflected about the edges. A zero field
/// returns the image unchanged.
///
/// # Errors
///
/// Returns a core `IncompatibleSizes` error if the field and image shapes
/// differ.
pub fn distort_with_field(
    image: &FPix,
    field: &DisplacementField,
    order: InterpolationOrder,
) -> TransformResult<FPix> {
    field.check_matches(image)?;
    Ok(map_coordinates(image, order, BoundaryMode::Reflect, |x, y| {
        let (dr, dc) = field.offset(x, y);
        (y as f32 + dr, x as f32 + dc)
    }))
}

fn check_non_negative(name: &str, value: f32) -> TransformResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TransformError::InvalidParameters(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}
