//! Ink/paper polarity
//!
//! [`autoinvert`] brings a page to bright-ink-on-dark polarity: an image
//! dominated by near-white pixels is taken to be a normal page and flipped.

use crate::error::{Error, Result};
use crate::fpix::FPix;

/// Values above this count as white
pub const WHITE_THRESHOLD: f32 = 0.9;

/// Values below this count as black
pub const BLACK_THRESHOLD: f32 = 0.1;

/// Return `1 - image` if near-white pixels outnumber near-black ones
///
/// # Errors
///
/// Returns `Error::NotNormalized` if any value lies outside [0, 1].
pub fn autoinvert(image: &FPix) -> Result<FPix> {
    check_normalized(image)?;
    if image.count_above(WHITE_THRESHOLD) > image.count_below(BLACK_THRESHOLD) {
        Ok(image.invert())
    } else {
        Ok(image.clone())
    }
}

/// Check that every value lies in [0, 1]
pub fn check_normalized(image: &FPix) -> Result<()> {
    match image
        .data()
        .iter()
        .find(|v| !(0.0..=1.0).contains(*v))
    {
        Some(&value) => Err(Error::NotNormalized { value }),
        None => Ok(()),
    }
}
