//! ocrodeg - Document image degradation for OCR training
//!
//! Turns clean grayscale page images into realistic training variants.
//!
//! # Overview
//!
//! - Random affine transforms and elastic distortion
//! - Gaussian blur, binary blur and distance transforms
//! - Multiscale noise, paper fibers and blotches
//! - Print simulation on multiscale or fibrous paper
//! - A degrade pipeline that chains all of the above per sample
//!
//! Images are single-channel `f32` in [0, 1]. Every randomized operation
//! takes a caller-owned random generator.
//!
//! # Example
//!
//! ```
//! use ocrodeg::{FPix, print::Degrade};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let page = FPix::new_with_value(64, 48, 1.0).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let out = Degrade::default().degrade(&page, &mut rng).unwrap();
//! assert_eq!(out.blurred.dimensions(), (64, 48));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use ocrodeg_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use ocrodeg_filter as filter;
pub use ocrodeg_print as print;
pub use ocrodeg_texture as texture;
pub use ocrodeg_transform as transform;
