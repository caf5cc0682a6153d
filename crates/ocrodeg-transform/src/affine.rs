//! Affine resampling of page images
//!
//! Transforms are expressed in (row, col) coordinates and applied by inverse
//! mapping: each output pixel `o` samples the source at `M * o + d`.
//!
//! For parameters (angle, scale, aniso, translation = (dx, dy)) on an image
//! of height `H` and width `W`:
//!
//! ```text
//! s = 1 / scale
//! M = | s / aniso      0     | * | cos(angle)  -sin(angle) |
//!     |    0       s * aniso |   | sin(angle)   cos(angle) |
//! c = (H / 2, W / 2)
//! d = c - M * c + (dx * H, dy * W)
//! ```
//!
//! Rotation and scaling therefore happen about the image center, and
//! positions that fall outside the source take the nearest edge value.

use crate::sample::TransformParams;
use crate::TransformResult;
use ocrodeg_core::FPix;
use ocrodeg_filter::{BoundaryMode, InterpolationOrder, map_coordinates};

/// Inverse-mapping affine matrix in (row, col) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    /// Linear part, row-major [[a, b], [c, d]]
    linear: [[f32; 2]; 2],
    /// Offset (row, col)
    offset: [f32; 2],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// Create the identity transformation
    pub fn identity() -> Self {
        Self {
            linear: [[1.0, 0.0], [0.0, 1.0]],
            offset: [0.0, 0.0],
        }
    }

    /// Build the sampling matrix for `params` on a `width x height` image.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameters` for a non-positive or
    /// non-finite scale or aniso.
    pub fn from_params(params: &TransformParams, width: u32, height: u32) -> TransformResult<Self> {
        params.validate()?;

        let s = 1.0 / params.scale;
        let (sin, cos) = params.angle.sin_cos();
        let sr = s / params.aniso;
        let sc = s * params.aniso;
        let linear = [[sr * cos, -sr * sin], [sc * sin, sc * cos]];

        let (h, w) = (height as f32, width as f32);
        let center = [h / 2.0, w / 2.0];
        let mc = apply_linear(&linear, center);
        let (dx, dy) = params.translation;
        let offset = [center[0] - mc[0] + dx * h, center[1] - mc[1] + dy * w];

        Ok(Self { linear, offset })
    }

    /// Linear part as [[a, b], [c, d]]
    pub fn linear(&self) -> &[[f32; 2]; 2] {
        &self.linear
    }

    /// Offset as [row, col]
    pub fn offset(&self) -> [f32; 2] {
        self.offset
    }

    /// Source position sampled by the output pixel at (row, col)
    #[inline]
    pub fn transform_point(&self, row: f32, col: f32) -> (f32, f32) {
        let p = apply_linear(&self.linear, [row, col]);
        (p[0] + self.offset[0], p[1] + self.offset[1])
    }
}

#[inline]
fn apply_linear(m: &[[f32; 2]; 2], p: [f32; 2]) -> [f32; 2] {
    [
        m[0][0] * p[0] + m[0][1] * p[1],
        m[1][0] * p[0] + m[1][1] * p[1],
    ]
}

/// Apply an affine transform to `image`.
///
/// The output has the same shape as the input. Out-of-range source
/// positions are clamped to the nearest edge pixel.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameters` for a non-positive or
/// non-finite scale or aniso.
pub fn apply_affine(
    image: &FPix,
    params: &TransformParams,
    order: InterpolationOrder,
) -> TransformResult<FPix> {
    let matrix = AffineMatrix::from_params(params, image.width(), image.height())?;
    Ok(map_coordinates(image, order, BoundaryMode::Nearest, |x, y| {
        matrix.transform_point(y as f32, x as f32)
    }))
}

/// Apply an affine transform given as individual values.
///
/// Equivalent to [`apply_affine`] with a [`TransformParams`] built from the
/// arguments; `translation` is (dx, dy) as fractions of (height, width).
pub fn transform_image(
    image: &FPix,
    angle: f32,
    scale: f32,
    aniso: f32,
    translation: (f32, f32),
    order: InterpolationOrder,
) -> TransformResult<FPix> {
    let params = TransformParams {
        angle,
        scale,
        aniso,
        translation,
    };
    apply_affine(image, &params, order)
}
