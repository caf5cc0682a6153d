//! ocrodeg-print - Print simulation and the degrade pipeline
//!
//! This crate turns clean page images into printed-looking training data:
//!
//! - **Print simulation**: Blend paper and ink textures through the page
//!   ([`printlike_multiscale`], [`printlike_fibrous`])
//! - **Degrade pipeline**: Random elastic distortion, blur and both print
//!   simulations in one call ([`Degrade`])
//! - **Samples**: Keyed records of named image fields ([`Sample`])
//!
//! # Quick Start
//!
//! ```no_run
//! use ocrodeg_core::FPix;
//! use ocrodeg_print::{Degrade, DegradeConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let page = FPix::new_with_value(400, 300, 1.0).unwrap();
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let degrade = Degrade::new(DegradeConfig::default().with_blur(0.5, 1.5)).unwrap();
//! let out = degrade.degrade(&page, &mut rng).unwrap();
//! println!("fibrous print mean: {}", out.printlike_fibrous.mean());
//! ```
//!
//! # Modules
//!
//! - [`printlike`]: Print compositors
//! - [`degrade`]: Degrade pipeline and its configuration
//! - [`sample`]: Keyed samples and field selection

pub mod degrade;
mod error;
pub mod printlike;
pub mod sample;

pub use error::{PrintError, PrintResult};

pub use degrade::{
    DEFAULT_BLOTCH_DENSITY, DEFAULT_BLUR_RANGE, DEFAULT_DISTORT_RANGE,
    DEFAULT_DISTORT_SIGMA_RANGE, Degrade, DegradeConfig, DegradeOutput, DegradeParam,
};
pub use printlike::{PrintOptions, printlike_fibrous, printlike_multiscale};
pub use sample::{
    DEFAULT_EXTENSIONS, FIELD_BLURRED, FIELD_DISTORTED, FIELD_PRINTLIKE_FIBROUS,
    FIELD_PRINTLIKE_MULTISCALE, Sample,
};
