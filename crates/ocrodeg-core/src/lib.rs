//! ocrodeg core - Basic data structures for document image degradation
//!
//! This crate provides the data structures shared by every degradation
//! stage:
//!
//! - [`FPix`] - Single-channel floating-point image, normalized to [0, 1]
//! - [`DisplacementField`] - Per-pixel (row, column) offsets for elastic warps
//! - [`autoinvert`] - Polarity normalization for light-on-dark input
//!
//! All randomized operations in the sibling crates take a caller-owned
//! generator, so nothing in this crate holds state between calls.

pub mod error;
pub mod field;
pub mod fpix;
pub mod polarity;

pub use error::{Error, Result};
pub use field::DisplacementField;
pub use fpix::{FPix, rescale_slice};
pub use polarity::{BLACK_THRESHOLD, WHITE_THRESHOLD, autoinvert, check_normalized};
