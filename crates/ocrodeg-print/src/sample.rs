//! Keyed training samples
//!
//! A [`Sample`] is one record of a training set: a key plus named image
//! fields such as `"png"` or `"bin.png"`. [`Degrade::degrade_sample`] picks
//! the first present field from a list of extensions, runs the pipeline on
//! it and adds the degraded variants under fixed names.

use crate::degrade::Degrade;
use crate::{PrintError, PrintResult};
use image::DynamicImage;
use ocrodeg_core::FPix;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Extensions searched for the page image, in priority order
pub const DEFAULT_EXTENSIONS: [&str; 7] = [
    "jpg", "jpeg", "png", "page.jpg", "page.png", "bin.jpg", "bin.png",
];

/// Field name of the distorted page
pub const FIELD_DISTORTED: &str = "dst";
/// Field name of the blurred page
pub const FIELD_BLURRED: &str = "blr";
/// Field name of the multiscale print simulation
pub const FIELD_PRINTLIKE_MULTISCALE: &str = "pms";
/// Field name of the fibrous print simulation
pub const FIELD_PRINTLIKE_FIBROUS: &str = "pfs";

/// One keyed record with named image fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    /// Record key
    pub key: String,
    /// Image fields by name
    pub fields: BTreeMap<String, FPix>,
}

impl Sample {
    /// Create a sample without fields
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, builder style
    pub fn with_field(mut self, name: impl Into<String>, image: FPix) -> Self {
        self.insert(name, image);
        self
    }

    /// Add or replace a field, returning the previous image
    pub fn insert(&mut self, name: impl Into<String>, image: FPix) -> Option<FPix> {
        self.fields.insert(name.into(), image)
    }

    /// Decode an image into a grayscale field in [0, 1]
    pub fn insert_decoded(
        &mut self,
        name: impl Into<String>,
        image: &DynamicImage,
    ) -> PrintResult<()> {
        let fpix = FPix::from_dynamic_image(image)?;
        self.insert(name, fpix);
        Ok(())
    }

    /// Field by name
    pub fn get(&self, name: &str) -> Option<&FPix> {
        self.fields.get(name)
    }

    /// First field present among `extensions`, with its name
    pub fn first_of<'a>(&self, extensions: &[&'a str]) -> Option<(&'a str, &FPix)> {
        extensions
            .iter()
            .find_map(|&ext| self.fields.get(ext).map(|img| (ext, img)))
    }
}

impl Degrade {
    /// Degrade the page image of `sample`.
    ///
    /// The first field named in `extensions` is degraded. The returned
    /// sample holds every original field plus `dst`, `blr`, `pms` and
    /// `pfs`.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::MissingField` if the sample has none of the
    /// extensions, or any pipeline error.
    pub fn degrade_sample<R: Rng>(
        &self,
        sample: &Sample,
        extensions: &[&str],
        rng: &mut R,
    ) -> PrintResult<Sample> {
        let Some((ext, image)) = sample.first_of(extensions) else {
            return Err(PrintError::MissingField {
                key: sample.key.clone(),
                extensions: extensions.join(";"),
            });
        };
        debug!(key = %sample.key, field = ext, "degrading sample");

        let out = self.degrade(image, rng)?;
        let mut result = sample.clone();
        result.insert(FIELD_DISTORTED, out.distorted);
        result.insert(FIELD_BLURRED, out.blurred);
        result.insert(FIELD_PRINTLIKE_MULTISCALE, out.printlike_multiscale);
        result.insert(FIELD_PRINTLIKE_FIBROUS, out.printlike_fibrous);
        info!(key = %result.key, fields = result.fields.len(), "sample degraded");
        Ok(result)
    }
}
