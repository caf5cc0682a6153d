//! Paper fiber texture
//!
//! Fibers are random walks whose heading changes by Cauchy-distributed
//! increments: mostly small turns with the occasional sharp bend. Painting a
//! few hundred of them on a canvas and blurring gives the look of paper
//! fibers.

use crate::error::{TextureError, TextureResult, check_limits};
use ocrodeg_core::FPix;
use ocrodeg_filter::gaussian_filter;
use rand::Rng;
use rand_distr::{Cauchy, Distribution};
use std::f32::consts::TAU;

// ============================================================================
// Options
// ============================================================================

/// Default number of fibers
pub const DEFAULT_NUM_FIBERS: usize = 300;
/// Default number of steps per fiber
pub const DEFAULT_FIBER_LENGTH: usize = 300;
/// Default angle spread
pub const DEFAULT_ANGLE_SPREAD: f32 = 0.2;
/// Default step size in pixels
pub const DEFAULT_STEP_SIZE: f32 = 0.5;
/// Default output limits
pub const DEFAULT_FIBER_LIMITS: (f32, f32) = (0.1, 1.0);
/// Default blur sigma
pub const DEFAULT_FIBER_BLUR: f32 = 1.0;

/// Options for [`fiber_texture`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberOptions {
    /// Number of fibers to paint
    pub num_fibers: usize,
    /// Steps per fiber
    pub length: usize,
    /// Scale of the Cauchy heading increments
    pub angle_spread: f32,
    /// Distance covered by one step
    pub step_size: f32,
    /// Output range (lo, hi); fiber intensities are drawn from it too
    pub limits: (f32, f32),
    /// Gaussian blur applied to the painted canvas
    pub blur_sigma: f32,
}

impl Default for FiberOptions {
    fn default() -> Self {
        Self {
            num_fibers: DEFAULT_NUM_FIBERS,
            length: DEFAULT_FIBER_LENGTH,
            angle_spread: DEFAULT_ANGLE_SPREAD,
            step_size: DEFAULT_STEP_SIZE,
            limits: DEFAULT_FIBER_LIMITS,
            blur_sigma: DEFAULT_FIBER_BLUR,
        }
    }
}

impl FiberOptions {
    /// Set the number of fibers
    pub fn with_num_fibers(mut self, num_fibers: usize) -> Self {
        self.num_fibers = num_fibers;
        self
    }

    /// Set the steps per fiber
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the angle spread
    pub fn with_angle_spread(mut self, angle_spread: f32) -> Self {
        self.angle_spread = angle_spread;
        self
    }

    /// Set the step size
    pub fn with_step_size(mut self, step_size: f32) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the output limits
    pub fn with_limits(mut self, lo: f32, hi: f32) -> Self {
        self.limits = (lo, hi);
        self
    }

    /// Set the blur sigma
    pub fn with_blur_sigma(mut self, blur_sigma: f32) -> Self {
        self.blur_sigma = blur_sigma;
        self
    }

    /// Check option values
    pub fn validate(&self) -> TextureResult<()> {
        check_limits(self.limits)?;
        if !self.angle_spread.is_finite() || self.angle_spread < 0.0 {
            return Err(TextureError::InvalidParameters(format!(
                "angle spread must be finite and >= 0, got {}",
                self.angle_spread
            )));
        }
        if !self.step_size.is_finite() {
            return Err(TextureError::InvalidParameters(format!(
                "step size must be finite, got {}",
                self.step_size
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Synthesis
// ============================================================================

/// Trace one fiber as `length` points (row, col) relative to its origin.
///
/// Heading increments are `Cauchy(0, 1) * angle_spread`; the first one also
/// gets a uniform random offset in [0, 2pi) so fibers point every way.
/// Positions accumulate `(cos, sin) * step_size` of the running heading.
pub fn make_fiber<R: Rng>(
    length: usize,
    angle_spread: f32,
    step_size: f32,
    rng: &mut R,
) -> TextureResult<Vec<(f32, f32)>> {
    let cauchy = Cauchy::<f32>::new(0.0, 1.0)
        .map_err(|e| TextureError::InvalidParameters(format!("cauchy distribution: {e}")))?;

    let mut points = Vec::with_capacity(length);
    let mut heading = 0.0f32;
    let (mut row, mut col) = (0.0f32, 0.0f32);
    for i in 0..length {
        let mut turn = cauchy.sample(rng) * angle_spread;
        if i == 0 {
            turn += TAU * rng.random::<f32>();
        }
        heading += turn;
        let (sin, cos) = heading.sin_cos();
        row += cos * step_size;
        col += sin * step_size;
        points.push((row, col));
    }
    Ok(points)
}

/// Fiber texture with values rescaled into `options.limits`.
///
/// Each fiber gets an intensity uniform in the limits and a random integer
/// origin. Its path is clipped to the canvas and painted at the floor of
/// each position; later fibers overwrite earlier ones. The canvas is then
/// blurred and rescaled. With no fibers the result is the constant lower
/// limit.
///
/// # Errors
///
/// Returns `TextureError::InvalidLimits` for inverted limits and
/// `TextureError::InvalidParameters` for non-finite spread or step size.
pub fn fiber_texture<R: Rng>(
    width: u32,
    height: u32,
    options: &FiberOptions,
    rng: &mut R,
) -> TextureResult<FPix> {
    options.validate()?;
    let (lo, hi) = options.limits;
    let mut canvas = FPix::new(width, height)?;
    let (wf, hf) = (width as f32, height as f32);

    for _ in 0..options.num_fibers {
        let value = rng.random::<f32>() * (hi - lo) + lo;
        let fiber = make_fiber(options.length, options.angle_spread, options.step_size, rng)?;
        let y0 = rng.random_range(0..height) as f32;
        let x0 = rng.random_range(0..width) as f32;
        for (row, col) in fiber {
            let y = (row + y0).clamp(0.0, hf - 0.1);
            let x = (col + x0).clamp(0.0, wf - 0.1);
            canvas.set_pixel_unchecked(x as u32, y as u32, value);
        }
    }

    let mut blurred = gaussian_filter(&canvas, options.blur_sigma)?;
    blurred.rescale_in_place(lo, hi);
    Ok(blurred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_make_fiber_steps() {
        let mut rng = StdRng::seed_from_u64(8);
        let fiber = make_fiber(50, 0.0, 0.5, &mut rng).unwrap();
        assert_eq!(fiber.len(), 50);
        // Zero spread walks a straight line of step 0.5
        let (r, c) = fiber[49];
        assert!(((r * r + c * c).sqrt() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_fiber_texture_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let options = FiberOptions::default().with_num_fibers(40).with_length(100);
        let tex = fiber_texture(64, 48, &options, &mut rng).unwrap();
        assert_eq!(tex.dimensions(), (64, 48));
        assert!((tex.min_value() - 0.1).abs() < 1e-6);
        assert_eq!(tex.max_value(), 1.0);
    }

    #[test]
    fn test_no_fibers_is_constant() {
        let mut rng = StdRng::seed_from_u64(9);
        let options = FiberOptions::default().with_num_fibers(0);
        let tex = fiber_texture(20, 20, &options, &mut rng).unwrap();
        assert!(tex.data().iter().all(|&v| v == 0.1));
    }

    #[test]
    fn test_origins_cover_whole_canvas() {
        // A one-step fiber with zero step size paints only its origin
        let options = FiberOptions::default()
            .with_num_fibers(1)
            .with_length(1)
            .with_step_size(0.0)
            .with_limits(0.5, 1.0)
            .with_blur_sigma(0.0);
        let mut hits = [0usize; 4];
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..200 {
            let tex = fiber_texture(2, 2, &options, &mut rng).unwrap();
            for (i, &v) in tex.data().iter().enumerate() {
                if v == 1.0 {
                    hits[i] += 1;
                }
            }
        }
        assert_eq!(hits.iter().sum::<usize>(), 200);
        assert!(hits.iter().all(|&n| n > 0), "{hits:?}");
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let mut rng = StdRng::seed_from_u64(9);
        let options = FiberOptions::default().with_limits(1.0, 0.0);
        assert!(matches!(
            fiber_texture(8, 8, &options, &mut rng),
            Err(TextureError::InvalidLimits { .. })
        ));
    }
}
