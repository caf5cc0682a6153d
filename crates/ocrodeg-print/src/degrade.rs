//! Degrade pipeline
//!
//! [`Degrade`] chains the individual degradations into the variants used
//! for OCR training:
//!
//! 1. Elastic distortion with a bounded noise field
//! 2. Gaussian blur of the distorted page
//! 3. Multiscale and fibrous print simulation of the blurred page
//!
//! Distortion and blur strengths are drawn per call from the ranges in
//! [`DegradeConfig`].

use crate::printlike::{PrintOptions, printlike_fibrous, printlike_multiscale};
use crate::{PrintError, PrintResult};
use ocrodeg_core::FPix;
use ocrodeg_filter::{InterpolationOrder, gaussian_filter};
use ocrodeg_transform::{bounded_noise_field, distort_with_field};
use rand::Rng;
use rand::distr::Uniform;
use tracing::{debug, instrument};

// ============================================================================
// Configuration
// ============================================================================

/// Default blur sigma range
pub const DEFAULT_BLUR_RANGE: (f32, f32) = (0.5, 3.0);
/// Default distortion field smoothness range
pub const DEFAULT_DISTORT_SIGMA_RANGE: (f32, f32) = (0.1, 10.0);
/// Default distortion magnitude range in pixels
pub const DEFAULT_DISTORT_RANGE: (f32, f32) = (0.5, 5.0);
/// Default blotch density for the print simulation
pub const DEFAULT_BLOTCH_DENSITY: f32 = 1e-7;

/// Ranges and densities that control [`Degrade`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegradeConfig {
    /// Range of the Gaussian blur sigma
    pub blur: (f32, f32),
    /// Range of the distortion field sigma
    pub distort_sigma: (f32, f32),
    /// Range of the maximum distortion in pixels
    pub distort: (f32, f32),
    /// Blotch density passed to both print compositors
    pub blotch_density: f32,
}

/// One settable value of a [`DegradeConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegradeParam {
    /// Lower bound of the blur range
    Blur0,
    /// Upper bound of the blur range
    Blur1,
    /// Lower bound of the distortion sigma range
    DistortSigma0,
    /// Upper bound of the distortion sigma range
    DistortSigma1,
    /// Lower bound of the distortion magnitude range
    Distort0,
    /// Upper bound of the distortion magnitude range
    Distort1,
    /// Blotch density
    BlotchDensity,
}

impl DegradeParam {
    /// All parameters, in declaration order
    pub const ALL: [DegradeParam; 7] = [
        DegradeParam::Blur0,
        DegradeParam::Blur1,
        DegradeParam::DistortSigma0,
        DegradeParam::DistortSigma1,
        DegradeParam::Distort0,
        DegradeParam::Distort1,
        DegradeParam::BlotchDensity,
    ];

    /// Parameter name
    pub fn name(self) -> &'static str {
        match self {
            DegradeParam::Blur0 => "blur0",
            DegradeParam::Blur1 => "blur1",
            DegradeParam::DistortSigma0 => "distortsigma0",
            DegradeParam::DistortSigma1 => "distortsigma1",
            DegradeParam::Distort0 => "distort0",
            DegradeParam::Distort1 => "distort1",
            DegradeParam::BlotchDensity => "blotches",
        }
    }
}

impl Default for DegradeConfig {
    fn default() -> Self {
        Self {
            blur: DEFAULT_BLUR_RANGE,
            distort_sigma: DEFAULT_DISTORT_SIGMA_RANGE,
            distort: DEFAULT_DISTORT_RANGE,
            blotch_density: DEFAULT_BLOTCH_DENSITY,
        }
    }
}

impl DegradeConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blur sigma range
    pub fn with_blur(mut self, lo: f32, hi: f32) -> Self {
        self.blur = (lo, hi);
        self
    }

    /// Set the distortion sigma range
    pub fn with_distort_sigma(mut self, lo: f32, hi: f32) -> Self {
        self.distort_sigma = (lo, hi);
        self
    }

    /// Set the distortion magnitude range
    pub fn with_distort(mut self, lo: f32, hi: f32) -> Self {
        self.distort = (lo, hi);
        self
    }

    /// Set the blotch density
    pub fn with_blotch_density(mut self, density: f32) -> Self {
        self.blotch_density = density;
        self
    }

    /// Current value of `param`
    pub fn get(&self, param: DegradeParam) -> f32 {
        match param {
            DegradeParam::Blur0 => self.blur.0,
            DegradeParam::Blur1 => self.blur.1,
            DegradeParam::DistortSigma0 => self.distort_sigma.0,
            DegradeParam::DistortSigma1 => self.distort_sigma.1,
            DegradeParam::Distort0 => self.distort.0,
            DegradeParam::Distort1 => self.distort.1,
            DegradeParam::BlotchDensity => self.blotch_density,
        }
    }

    /// Set one value and validate the result.
    ///
    /// On error the configuration is left unchanged.
    pub fn set(&mut self, param: DegradeParam, value: f32) -> PrintResult<()> {
        let mut next = *self;
        let slot = match param {
            DegradeParam::Blur0 => &mut next.blur.0,
            DegradeParam::Blur1 => &mut next.blur.1,
            DegradeParam::DistortSigma0 => &mut next.distort_sigma.0,
            DegradeParam::DistortSigma1 => &mut next.distort_sigma.1,
            DegradeParam::Distort0 => &mut next.distort.0,
            DegradeParam::Distort1 => &mut next.distort.1,
            DegradeParam::BlotchDensity => &mut next.blotch_density,
        };
        *slot = value;
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Validate ranges: finite, non-negative and ordered
    pub fn validate(&self) -> PrintResult<()> {
        check_range("blur", self.blur)?;
        check_range("distort_sigma", self.distort_sigma)?;
        check_range("distort", self.distort)?;
        if !self.blotch_density.is_finite() || self.blotch_density < 0.0 {
            return Err(PrintError::InvalidConfig(format!(
                "blotch density must be finite and >= 0, got {}",
                self.blotch_density
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, (lo, hi): (f32, f32)) -> PrintResult<()> {
    if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || lo > hi {
        return Err(PrintError::InvalidConfig(format!(
            "{name} range must satisfy 0 <= lo <= hi, got ({lo}, {hi})"
        )));
    }
    uniform_dist(name, (lo, hi)).map(|_| ())
}

/// Ranges too wide to sample in `f32` are rejected here
fn uniform_dist(name: &str, (lo, hi): (f32, f32)) -> PrintResult<Uniform<f32>> {
    Uniform::new_inclusive(lo, hi).map_err(|e| {
        PrintError::InvalidConfig(format!("{name} range ({lo}, {hi}) cannot be sampled: {e}"))
    })
}

// ============================================================================
// Pipeline
// ============================================================================

/// Images produced by one [`Degrade::degrade`] call
#[derive(Debug, Clone)]
pub struct DegradeOutput {
    /// Elastically distorted page
    pub distorted: FPix,
    /// Distorted and blurred page
    pub blurred: FPix,
    /// Multiscale print simulation, darkest pixel shifted to 0
    pub printlike_multiscale: FPix,
    /// Fibrous print simulation, darkest pixel shifted to 0
    pub printlike_fibrous: FPix,
}

/// Degradation pipeline with a validated configuration
#[derive(Debug, Clone, Default)]
pub struct Degrade {
    config: DegradeConfig,
}

impl Degrade {
    /// Create a pipeline.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::InvalidConfig` if `config` does not validate.
    pub fn new(config: DegradeConfig) -> PrintResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The pipeline's configuration
    pub fn config(&self) -> &DegradeConfig {
        &self.config
    }

    /// Distort with a bounded noise field of random smoothness and size
    pub fn distort<R: Rng>(&self, image: &FPix, rng: &mut R) -> PrintResult<FPix> {
        let sigma = uniform(rng, "distort_sigma", self.config.distort_sigma)?;
        let maxdelta = uniform(rng, "distort", self.config.distort)?;
        debug!(sigma, maxdelta, "distortion sampled");
        let field = bounded_noise_field(image.width(), image.height(), sigma, maxdelta, rng)?;
        Ok(distort_with_field(image, &field, InterpolationOrder::Linear)?)
    }

    /// Gaussian blur with a random sigma
    pub fn blur<R: Rng>(&self, image: &FPix, rng: &mut R) -> PrintResult<FPix> {
        let sigma = uniform(rng, "blur", self.config.blur)?;
        debug!(sigma, "blur sampled");
        Ok(gaussian_filter(image, sigma)?)
    }

    /// Run the full pipeline on one page.
    #[instrument(skip(self, image, rng), fields(width = image.width(), height = image.height()))]
    pub fn degrade<R: Rng>(&self, image: &FPix, rng: &mut R) -> PrintResult<DegradeOutput> {
        let distorted = self.distort(image, rng)?;
        let blurred = self.blur(&distorted, rng)?;

        let options = PrintOptions::default().with_blotches(self.config.blotch_density);
        let pms = printlike_multiscale(&blurred, &options, rng)?;
        let pfs = printlike_fibrous(&blurred, &options, rng)?;

        Ok(DegradeOutput {
            distorted,
            blurred,
            printlike_multiscale: shift_to_zero(pms),
            printlike_fibrous: shift_to_zero(pfs),
        })
    }
}

#[inline]
fn uniform<R: Rng>(rng: &mut R, name: &str, range: (f32, f32)) -> PrintResult<f32> {
    Ok(rng.sample(uniform_dist(name, range)?))
}

/// Subtract the minimum so the darkest pixel becomes 0
fn shift_to_zero(mut fpix: FPix) -> FPix {
    let min = fpix.min_value();
    fpix.add_constant(-min);
    fpix
}
