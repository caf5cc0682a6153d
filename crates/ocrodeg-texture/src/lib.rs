//! ocrodeg-texture - Procedural textures for document degradation
//!
//! This crate synthesizes the textures that the print simulation blends
//! together:
//!
//! - Multiscale value noise for uneven paper and ink ([`multiscale_noise`],
//!   [`multiscale_noise_auto`])
//! - Paper fibers from Cauchy random walks ([`fiber_texture`])
//! - Random blob masks and blotches ([`blob_mask`], [`apply_blotches`])
//!
//! Every function draws from a caller-supplied random generator.

pub mod blob;
mod error;
pub mod fiber;
pub mod multiscale;

pub use error::{TextureError, TextureResult};

pub use blob::{DEFAULT_BLOTCH_SIZE, DEFAULT_ROUGHNESS, apply_blotches, blob_mask};
pub use fiber::{FiberOptions, fiber_texture, make_fiber};
pub use multiscale::{
    DEFAULT_NUM_SCALES, DEFAULT_SCALE_RANGE, multiscale_noise, multiscale_noise_auto,
    noise_at_scale,
};
