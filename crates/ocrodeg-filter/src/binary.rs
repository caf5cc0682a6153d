//! Blurring that keeps a bilevel image bilevel
//!
//! [`binary_blur`] smooths a black-and-white page and thresholds it again at
//! the level that preserves the original fraction of black pixels, which
//! rounds corners and thins or thickens strokes without changing the overall
//! ink coverage.

use crate::gaussian::gaussian_filter;
use crate::{FilterError, FilterResult};
use ocrodeg_core::FPix;
use rand::Rng;
use rand_distr::StandardNormal;

/// Percentage (0 to 100) of pixels below 0.5
pub fn percent_black(fpix: &FPix) -> f32 {
    if fpix.is_empty() {
        return 0.0;
    }
    fpix.count_below(0.5) as f32 * 100.0 / fpix.len() as f32
}

/// Linearly interpolated percentile of `values`, `pct` in [0, 100]
pub fn percentile(values: &[f32], pct: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = (pct.clamp(0.0, 100.0) as f64 / 100.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = (pos - lo as f64) as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Blur a bilevel image and threshold it back to 0/1.
///
/// Optional Gaussian noise of standard deviation `noise` is added after
/// blurring, which roughens stroke edges. The threshold is chosen so the
/// output keeps the input's fraction of black pixels.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` for a negative or non-finite
/// noise level, and `FilterError::InvalidKernel` for a bad sigma.
pub fn binary_blur<R: Rng>(fpix: &FPix, sigma: f32, noise: f32, rng: &mut R) -> FilterResult<FPix> {
    if !noise.is_finite() || noise < 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "noise must be finite and >= 0, got {noise}"
        )));
    }

    let black = percent_black(fpix);
    let mut blurred = gaussian_filter(fpix, sigma)?;
    if noise > 0.0 {
        for v in blurred.data_mut() {
            let n: f32 = rng.sample(StandardNormal);
            *v += n * noise;
        }
    }

    let threshold = percentile(blurred.data(), black);
    Ok(blurred.map(|v| if v > threshold { 1.0 } else { 0.0 }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn square_page() -> FPix {
        FPix::from_fn(32, 32, |x, y| {
            if (8..24).contains(&x) && (8..24).contains(&y) { 0.0 } else { 1.0 }
        })
        .unwrap()
    }

    #[test]
    fn test_percent_black() {
        assert_eq!(percent_black(&square_page()), 25.0);
        assert_eq!(percent_black(&FPix::new_with_value(4, 4, 1.0).unwrap()), 0.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let v = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 100.0), 4.0);
        assert!((percentile(&v, 50.0) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_binary_blur_output_is_bilevel() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = binary_blur(&square_page(), 2.0, 0.1, &mut rng).unwrap();
        assert!(out.data().iter().all(|&v| v == 0.0 || v == 1.0));
        // Ink coverage stays close to the original quarter of the page
        let black = percent_black(&out);
        assert!((black - 25.0).abs() < 3.0, "{black}");
    }

    #[test]
    fn test_binary_blur_rejects_negative_noise() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(binary_blur(&square_page(), 1.0, -0.1, &mut rng).is_err());
    }
}
