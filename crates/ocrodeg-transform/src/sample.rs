//! Random affine transform parameters
//!
//! [`sample_transform`] draws a [`TransformParams`] from the ranges in
//! [`TransformRanges`]. Scale and anisotropy are drawn in log10 space so that
//! shrinking and growing are equally likely.

use crate::{TransformError, TransformResult};
use rand::Rng;
use rand::distr::Uniform;

// ============================================================================
// Defaults
// ============================================================================

/// Default translation range, as a fraction of the image size
pub const DEFAULT_TRANSLATION: (f32, f32) = (-0.05, 0.05);
/// Default rotation range in degrees
pub const DEFAULT_ROTATION: (f32, f32) = (-2.0, 2.0);
/// Default log10 scale range
pub const DEFAULT_LOG_SCALE: (f32, f32) = (-0.1, 0.1);
/// Default log10 anisotropy range
pub const DEFAULT_LOG_ANISO: (f32, f32) = (-0.1, 0.1);

// ============================================================================
// Types
// ============================================================================

/// Sampling ranges for a random affine transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformRanges {
    /// Translation range for both axes, fraction of image size
    pub translation: (f32, f32),
    /// Rotation range in degrees
    pub rotation: (f32, f32),
    /// Range of log10(scale)
    pub log_scale: (f32, f32),
    /// Range of log10(aniso)
    pub log_aniso: (f32, f32),
}

impl Default for TransformRanges {
    fn default() -> Self {
        Self {
            translation: DEFAULT_TRANSLATION,
            rotation: DEFAULT_ROTATION,
            log_scale: DEFAULT_LOG_SCALE,
            log_aniso: DEFAULT_LOG_ANISO,
        }
    }
}

impl TransformRanges {
    /// Set the translation range
    pub fn with_translation(mut self, lo: f32, hi: f32) -> Self {
        self.translation = (lo, hi);
        self
    }

    /// Set the rotation range in degrees
    pub fn with_rotation(mut self, lo: f32, hi: f32) -> Self {
        self.rotation = (lo, hi);
        self
    }

    /// Set the log10 scale range
    pub fn with_log_scale(mut self, lo: f32, hi: f32) -> Self {
        self.log_scale = (lo, hi);
        self
    }

    /// Set the log10 anisotropy range
    pub fn with_log_aniso(mut self, lo: f32, hi: f32) -> Self {
        self.log_aniso = (lo, hi);
        self
    }

    /// Check that every range is finite and not inverted
    pub fn validate(&self) -> TransformResult<()> {
        check_range("translation", self.translation)?;
        check_range("rotation", self.rotation)?;
        check_range("log_scale", self.log_scale)?;
        check_range("log_aniso", self.log_aniso)?;
        Ok(())
    }
}

/// Parameters of one affine transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Rotation in radians
    pub angle: f32,
    /// Isotropic scale, > 0
    pub scale: f32,
    /// Anisotropy, > 0; rows are scaled by 1/aniso and columns by aniso
    pub aniso: f32,
    /// (dx, dy) translation as fractions of (height, width)
    pub translation: (f32, f32),
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformParams {
    /// The transform that leaves an image unchanged
    pub fn identity() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            aniso: 1.0,
            translation: (0.0, 0.0),
        }
    }

    /// Check that scale and aniso are positive and all values finite
    pub fn validate(&self) -> TransformResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TransformError::InvalidParameters(format!(
                "scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if !(self.aniso.is_finite() && self.aniso > 0.0) {
            return Err(TransformError::InvalidParameters(format!(
                "aniso must be finite and > 0, got {}",
                self.aniso
            )));
        }
        if !(self.angle.is_finite()
            && self.translation.0.is_finite()
            && self.translation.1.is_finite())
        {
            return Err(TransformError::InvalidParameters(
                "angle and translation must be finite".into(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Sampling
// ============================================================================

/// Draw random affine parameters from `ranges`.
///
/// dx and dy are drawn independently from the translation range, the angle
/// uniformly in degrees and converted to radians, and scale and aniso as
/// `10^u` with `u` uniform in the respective log range.
///
/// # Errors
///
/// Returns `TransformError::InvalidRange` if any range is inverted or not
/// finite, or spans more than `f32::MAX`.
pub fn sample_transform<R: Rng>(
    ranges: &TransformRanges,
    rng: &mut R,
) -> TransformResult<TransformParams> {
    ranges.validate()?;

    let dx = uniform(rng, "translation", ranges.translation)?;
    let dy = uniform(rng, "translation", ranges.translation)?;
    let angle = uniform(rng, "rotation", ranges.rotation)?.to_radians();
    let scale = 10f32.powf(uniform(rng, "log_scale", ranges.log_scale)?);
    let aniso = 10f32.powf(uniform(rng, "log_aniso", ranges.log_aniso)?);

    Ok(TransformParams {
        angle,
        scale,
        aniso,
        translation: (dx, dy),
    })
}

/// Uniform draw from `[lo, hi]`; `lo == hi` yields `lo`
#[inline]
pub(crate) fn uniform<R: Rng>(
    rng: &mut R,
    name: &'static str,
    range: (f32, f32),
) -> TransformResult<f32> {
    Ok(rng.sample(uniform_dist(name, range)?))
}

/// Ranges whose span overflows `f32` are rejected here
fn uniform_dist(name: &'static str, (lo, hi): (f32, f32)) -> TransformResult<Uniform<f32>> {
    Uniform::new_inclusive(lo, hi).map_err(|_| TransformError::InvalidRange { name, lo, hi })
}

pub(crate) fn check_range(name: &'static str, (lo, hi): (f32, f32)) -> TransformResult<()> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(TransformError::InvalidRange { name, lo, hi });
    }
    uniform_dist(name, (lo, hi)).map(|_| ())
}
