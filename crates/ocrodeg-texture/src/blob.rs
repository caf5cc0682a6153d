//! Random blobs and blotches
//!
//! A blob mask is built from random seed points: pixels closer than `size`
//! to a seed form disks, the disks are blurred, and a blurred noise field
//! modulates them so the thresholded result has ragged outlines.
//!
//! [`apply_blotches`] uses one mask to add dark ink spots and another to
//! punch light holes into an image.

use crate::error::{TextureError, TextureResult};
use ocrodeg_core::FPix;
use ocrodeg_filter::{distance_transform_edt, gaussian_filter};
use rand::Rng;

/// Default blob size for blotches
pub const DEFAULT_BLOTCH_SIZE: f32 = 10.0;

/// Default outline roughness
pub const DEFAULT_ROUGHNESS: f32 = 2.0;

/// Binary mask of random blobs.
///
/// `floor(density * width * height)` seeds are placed at random pixels.
/// The output is 1 where the blurred disk mask times blurred noise exceeds
/// 0.5 and 0 elsewhere. Both blurs use sigma `size / (2 * roughness)`, so a
/// larger roughness gives more ragged outlines. A density of 0 yields an
/// all-zero mask.
///
/// # Errors
///
/// Returns `TextureError::InvalidParameters` for a negative density or a
/// non-positive size or roughness.
pub fn blob_mask<R: Rng>(
    width: u32,
    height: u32,
    density: f32,
    size: f32,
    roughness: f32,
    rng: &mut R,
) -> TextureResult<FPix> {
    if !density.is_finite() || density < 0.0 {
        return Err(TextureError::InvalidParameters(format!(
            "blob density must be finite and >= 0, got {density}"
        )));
    }
    if !size.is_finite() || size <= 0.0 {
        return Err(TextureError::InvalidParameters(format!(
            "blob size must be finite and > 0, got {size}"
        )));
    }
    if !roughness.is_finite() || roughness <= 0.0 {
        return Err(TextureError::InvalidParameters(format!(
            "blob roughness must be finite and > 0, got {roughness}"
        )));
    }

    // Seeds are zeros; the distance transform measures distance to them
    let mut seeds = FPix::new_with_value(width, height, 1.0)?;
    let count = (density as f64 * width as f64 * height as f64) as u64;
    for _ in 0..count {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        seeds.set_pixel_unchecked(x, y, 0.0);
    }

    let sigma = size / (2.0 * roughness);
    let dist = distance_transform_edt(&seeds);
    let disks = dist.map(|d| if d < size { 1.0 } else { 0.0 });
    let mut disks = gaussian_filter(&disks, sigma)?;
    disks.rescale_in_place(0.0, 1.0);

    let noise = FPix::from_fn(width, height, |_, _| rng.random::<f32>())?;
    let mut noise = gaussian_filter(&noise, sigma)?;
    noise.rescale_in_place(0.0, 1.0);

    Ok(disks.zip_with(&noise, |m, n| if m * n > 0.5 { 1.0 } else { 0.0 })?)
}

/// Add dark blotches and light holes to `image`.
///
/// Computes `min(max(image, fg), 1 - bg)` where `fg` and `bg` are blob masks
/// with the given densities and sizes and the default roughness. In an image
/// where ink is 1, `fg` adds ink spots and `bg` erases.
///
/// # Errors
///
/// Propagates [`blob_mask`] errors.
pub fn apply_blotches<R: Rng>(
    image: &FPix,
    fg_density: f32,
    bg_density: f32,
    fg_size: f32,
    bg_size: f32,
    rng: &mut R,
) -> TextureResult<FPix> {
    let (w, h) = image.dimensions();
    let fg = blob_mask(w, h, fg_density, fg_size, DEFAULT_ROUGHNESS, rng)?;
    let bg = blob_mask(w, h, bg_density, bg_size, DEFAULT_ROUGHNESS, rng)?;
    Ok(image.max_with(&fg)?.min_with(&bg.invert())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_density_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let mask = blob_mask(40, 30, 0.0, 10.0, 2.0, &mut rng).unwrap();
        assert_eq!(mask.max_value(), 0.0);
    }

    #[test]
    fn test_mask_is_binary() {
        let mut rng = StdRng::seed_from_u64(2);
        let mask = blob_mask(80, 60, 3e-3, 8.0, 2.0, &mut rng).unwrap();
        assert!(mask.data().iter().all(|&v| v == 0.0 || v == 1.0));
        assert!(mask.max_value() == 1.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(blob_mask(8, 8, -1.0, 10.0, 2.0, &mut rng).is_err());
        assert!(blob_mask(8, 8, 0.1, 0.0, 2.0, &mut rng).is_err());
        assert!(blob_mask(8, 8, 0.1, 10.0, 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_blotches_without_blobs_is_identity() {
        let mut rng = StdRng::seed_from_u64(4);
        let image = FPix::from_fn(10, 10, |x, _| x as f32 / 9.0).unwrap();
        let out = apply_blotches(&image, 0.0, 0.0, 10.0, 10.0, &mut rng).unwrap();
        assert_eq!(out, image);
    }

    #[test]
    fn test_blotches_combine_both_masks() {
        let image = FPix::from_fn(60, 50, |x, _| x as f32 / 59.0).unwrap();
        let out = apply_blotches(&image, 3e-3, 3e-3, 8.0, 8.0, &mut StdRng::seed_from_u64(6))
            .unwrap();

        // Same seed, same masks
        let mut rng = StdRng::seed_from_u64(6);
        let fg = blob_mask(60, 50, 3e-3, 8.0, DEFAULT_ROUGHNESS, &mut rng).unwrap();
        let bg = blob_mask(60, 50, 3e-3, 8.0, DEFAULT_ROUGHNESS, &mut rng).unwrap();
        for i in 0..image.len() {
            let expected = image.data()[i].max(fg.data()[i]).min(1.0 - bg.data()[i]);
            assert_eq!(out.data()[i], expected);
        }
    }
}
