//! Print simulation
//!
//! A clean page is turned into a printed-looking one by blending two
//! textures through a selector derived from the page:
//!
//! ```text
//! selector = blotches(1 - image)          ink = 1, paper = 0
//! blend    = gaussian(selector, blur)
//! printed  = blend * ink + (1 - blend) * paper
//! ```
//!
//! `paper` is light noise in `[1 - variation, 1]` and `ink` dark noise in
//! `[0, variation]`, so the result keeps the page's polarity: dark ink on
//! light paper.

use crate::{PrintError, PrintResult};
use ocrodeg_core::FPix;
use ocrodeg_filter::gaussian_filter;
use ocrodeg_texture::{
    DEFAULT_BLOTCH_SIZE, DEFAULT_NUM_SCALES, DEFAULT_SCALE_RANGE, FiberOptions, apply_blotches,
    fiber_texture, multiscale_noise, multiscale_noise_auto,
};
use rand::Rng;
use tracing::{debug, instrument};

// ============================================================================
// Constants
// ============================================================================

/// Default blur of the selector
pub const DEFAULT_PRINT_BLUR: f32 = 1.0;
/// Default blotch density, used for both dark and light blotches
pub const DEFAULT_PRINT_BLOTCHES: f32 = 5e-5;
/// Default texture variation
pub const DEFAULT_PRINT_VARIATION: f32 = 0.3;

/// Noise scales for the fibrous paper and ink
const FIBROUS_SCALES: [f32; 4] = [1.0, 5.0, 10.0, 50.0];
/// Weights of [`FIBROUS_SCALES`] for the paper texture
const FIBROUS_PAPER_WEIGHTS: [f32; 4] = [1.0, 0.3, 0.5, 0.3];

// ============================================================================
// Options
// ============================================================================

/// Options shared by the print compositors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintOptions {
    /// Gaussian sigma applied to the selector (default: 1.0)
    pub blur: f32,
    /// Density of dark and light blotches (default: 5e-5)
    pub blotches: f32,
    /// Spread of the paper and ink textures, in [0, 1] (default: 0.3)
    pub variation: f32,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            blur: DEFAULT_PRINT_BLUR,
            blotches: DEFAULT_PRINT_BLOTCHES,
            variation: DEFAULT_PRINT_VARIATION,
        }
    }
}

impl PrintOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selector blur
    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = blur;
        self
    }

    /// Set the blotch density
    pub fn with_blotches(mut self, blotches: f32) -> Self {
        self.blotches = blotches;
        self
    }

    /// Set the texture variation
    pub fn with_variation(mut self, variation: f32) -> Self {
        self.variation = variation;
        self
    }

    /// Validate options
    pub fn validate(&self) -> PrintResult<()> {
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(PrintError::InvalidConfig(format!(
                "blur must be finite and >= 0, got {}",
                self.blur
            )));
        }
        if !self.blotches.is_finite() || self.blotches < 0.0 {
            return Err(PrintError::InvalidConfig(format!(
                "blotches must be finite and >= 0, got {}",
                self.blotches
            )));
        }
        if !(0.0..=1.0).contains(&self.variation) {
            return Err(PrintError::InvalidConfig(format!(
                "variation must be in [0, 1], got {}",
                self.variation
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Compositors
// ============================================================================

/// Simulate printing with randomly scaled multiscale paper and ink.
///
/// Paper and ink are [`multiscale_noise_auto`] textures with the default
/// scale range.
///
/// # Errors
///
/// Returns `PrintError::InvalidConfig` for invalid options.
#[instrument(skip(image, rng), fields(width = image.width(), height = image.height()))]
pub fn printlike_multiscale<R: Rng>(
    image: &FPix,
    options: &PrintOptions,
    rng: &mut R,
) -> PrintResult<FPix> {
    options.validate()?;
    let (w, h) = image.dimensions();
    let selector = blotched_selector(image, options.blotches, rng)?;

    let v = options.variation;
    let paper = multiscale_noise_auto(
        w,
        h,
        DEFAULT_SCALE_RANGE,
        DEFAULT_NUM_SCALES,
        (1.0 - v, 1.0),
        rng,
    )?;
    let ink = multiscale_noise_auto(w, h, DEFAULT_SCALE_RANGE, DEFAULT_NUM_SCALES, (0.0, v), rng)?;

    compose(&selector, &ink, &paper, options.blur)
}

/// Simulate printing on fibrous paper.
///
/// Paper is multiscale noise at scales 1, 5, 10 and 50 with weights 1, 0.3,
/// 0.5 and 0.3, darkened by a faint fiber texture. Ink is multiscale noise
/// at the same scales with unit weights.
///
/// # Errors
///
/// Returns `PrintError::InvalidConfig` for invalid options.
#[instrument(skip(image, rng), fields(width = image.width(), height = image.height()))]
pub fn printlike_fibrous<R: Rng>(
    image: &FPix,
    options: &PrintOptions,
    rng: &mut R,
) -> PrintResult<FPix> {
    options.validate()?;
    let (w, h) = image.dimensions();
    let selector = blotched_selector(image, options.blotches, rng)?;

    let v = options.variation;
    let paper = multiscale_noise(
        w,
        h,
        &FIBROUS_SCALES,
        Some(&FIBROUS_PAPER_WEIGHTS[..]),
        (1.0 - v, 1.0),
        rng,
    )?;
    let fibers = fiber_texture(w, h, &paper_fiber_options(), rng)?;
    let paper = paper.sub(&fibers)?;
    let ink = multiscale_noise(w, h, &FIBROUS_SCALES, None, (0.0, v), rng)?;

    compose(&selector, &ink, &paper, options.blur)
}

/// Fiber settings for the fibrous paper: long, nearly straight, faint
fn paper_fiber_options() -> FiberOptions {
    FiberOptions::default()
        .with_num_fibers(300)
        .with_length(500)
        .with_angle_spread(0.01)
        .with_limits(0.0, 0.25)
        .with_blur_sigma(0.5)
}

/// Inverted page with dark and light blotches of equal density
fn blotched_selector<R: Rng>(image: &FPix, density: f32, rng: &mut R) -> PrintResult<FPix> {
    let selector = image.invert();
    Ok(apply_blotches(
        &selector,
        density,
        density,
        DEFAULT_BLOTCH_SIZE,
        DEFAULT_BLOTCH_SIZE,
        rng,
    )?)
}

fn compose(selector: &FPix, ink: &FPix, paper: &FPix, blur: f32) -> PrintResult<FPix> {
    let blend = gaussian_filter(selector, blur)?;
    let printed = FPix::blend(&blend, ink, paper)?;
    debug!(
        min = printed.min_value(),
        max = printed.max_value(),
        mean = printed.mean(),
        "printed page composed"
    );
    Ok(printed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_options() {
        let o = PrintOptions::default();
        assert_eq!(o.blur, 1.0);
        assert_eq!(o.blotches, 5e-5);
        assert_eq!(o.variation, 0.3);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn test_invalid_options() {
        assert!(PrintOptions::new().with_variation(1.5).validate().is_err());
        assert!(PrintOptions::new().with_blur(-1.0).validate().is_err());
        assert!(PrintOptions::new().with_blotches(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_white_page_is_paper() {
        let mut rng = StdRng::seed_from_u64(12);
        let page = FPix::new_with_value(64, 64, 1.0).unwrap();
        let options = PrintOptions::new().with_blotches(0.0);
        let out = printlike_multiscale(&page, &options, &mut rng).unwrap();
        let mean = out.mean();
        assert!(mean > 0.7 && mean < 1.0, "{mean}");
        assert!(out.min_value() >= 0.7 - 1e-6);
    }

    #[test]
    fn test_black_page_is_ink() {
        let mut rng = StdRng::seed_from_u64(13);
        let page = FPix::new(48, 48).unwrap();
        let options = PrintOptions::new().with_blotches(0.0);
        let out = printlike_fibrous(&page, &options, &mut rng).unwrap();
        assert!(out.max_value() <= 0.3 + 1e-6);
    }
}
