//! Spline interpolation at fractional coordinates
//!
//! Resampling an image at arbitrary (row, col) positions is the common step
//! behind affine transforms, elastic distortion and zooming. Supported
//! orders:
//!
//! | order | method |
//! |---|---|
//! | 0 | nearest neighbor |
//! | 1 | bilinear |
//! | 3 | cubic B-spline (with prefiltering) |
//!
//! Positions outside the image are resolved by a [`BoundaryMode`]:
//!
//! ```text
//! Nearest:  a a a | a b c d | d d d
//! Reflect:  c b a | a b c d | d c b
//! ```

use crate::{FilterError, FilterResult};
use ocrodeg_core::FPix;

/// Cubic B-spline pole
const CUBIC_POLE: f64 = -0.267_949_192_431_122_7; // sqrt(3) - 2

/// Tolerance for the truncated causal initialization sum
const PREFILTER_TOLERANCE: f64 = 1e-9;

/// Spline order used when resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationOrder {
    /// Order 0
    Nearest,
    /// Order 1
    #[default]
    Linear,
    /// Order 3
    Cubic,
}

impl InterpolationOrder {
    /// Numeric spline order
    pub fn order(self) -> u32 {
        match self {
            InterpolationOrder::Nearest => 0,
            InterpolationOrder::Linear => 1,
            InterpolationOrder::Cubic => 3,
        }
    }
}

impl TryFrom<u32> for InterpolationOrder {
    type Error = FilterError;

    fn try_from(order: u32) -> FilterResult<Self> {
        match order {
            0 => Ok(InterpolationOrder::Nearest),
            1 => Ok(InterpolationOrder::Linear),
            3 => Ok(InterpolationOrder::Cubic),
            other => Err(FilterError::UnsupportedOrder(other)),
        }
    }
}

/// How out-of-range sample positions are mapped back into the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Clamp to the nearest edge pixel
    #[default]
    Nearest,
    /// Half-sample symmetric reflection about the edges
    Reflect,
}

impl BoundaryMode {
    /// Map a possibly out-of-range index into `0..n`
    #[inline]
    pub fn index(self, i: i64, n: usize) -> usize {
        let n = n as i64;
        if n <= 1 {
            return 0;
        }
        match self {
            BoundaryMode::Nearest => i.clamp(0, n - 1) as usize,
            BoundaryMode::Reflect => {
                let period = 2 * n;
                let k = i.rem_euclid(period);
                (if k >= n { period - 1 - k } else { k }) as usize
            }
        }
    }

    /// Map a possibly out-of-range position into `[-0.5, n - 0.5]`
    #[inline]
    pub fn position(self, x: f32, n: usize) -> f32 {
        let n = n as f32;
        match self {
            BoundaryMode::Nearest => x.clamp(0.0, n - 1.0),
            BoundaryMode::Reflect => {
                let period = 2.0 * n;
                let p = (x + 0.5).rem_euclid(period) - 0.5;
                if p > n - 0.5 { period - 1.0 - p } else { p }
            }
        }
    }
}

/// Whole-sample symmetric index, matching the spline prefilter's extension
#[inline]
fn mirror_index(i: i64, n: usize) -> usize {
    let n = n as i64;
    if n <= 1 {
        return 0;
    }
    let period = 2 * n - 2;
    let k = i.rem_euclid(period);
    (if k >= n { period - k } else { k }) as usize
}

/// Precomputed resampler for one image
///
/// For cubic order the image is converted to B-spline coefficients once, so
/// many positions can be sampled cheaply.
#[derive(Debug, Clone)]
pub struct Interpolator {
    coeffs: FPix,
    order: InterpolationOrder,
    mode: BoundaryMode,
}

impl Interpolator {
    /// Prepare `image` for sampling
    pub fn new(image: &FPix, order: InterpolationOrder, mode: BoundaryMode) -> Self {
        let coeffs = match order {
            InterpolationOrder::Cubic => cubic_coefficients(image),
            _ => image.clone(),
        };
        Self {
            coeffs,
            order,
            mode,
        }
    }

    /// Sample at fractional position (row, col)
    pub fn sample(&self, row: f32, col: f32) -> f32 {
        match self.order {
            InterpolationOrder::Nearest => {
                let r = (row + 0.5).floor() as i64;
                let c = (col + 0.5).floor() as i64;
                self.fetch(r, c)
            }
            InterpolationOrder::Linear => self.sample_linear(row, col),
            InterpolationOrder::Cubic => self.sample_cubic(row, col),
        }
    }

    #[inline]
    fn fetch(&self, row: i64, col: i64) -> f32 {
        let (w, h) = self.coeffs.dimensions();
        let x = self.mode.index(col, w as usize);
        let y = self.mode.index(row, h as usize);
        self.coeffs.get_pixel_unchecked(x as u32, y as u32)
    }

    fn sample_linear(&self, row: f32, col: f32) -> f32 {
        let r0 = row.floor();
        let c0 = col.floor();
        let fr = row - r0;
        let fc = col - c0;
        let (r0, c0) = (r0 as i64, c0 as i64);

        let v00 = self.fetch(r0, c0);
        let v01 = self.fetch(r0, c0 + 1);
        let v10 = self.fetch(r0 + 1, c0);
        let v11 = self.fetch(r0 + 1, c0 + 1);

        let top = v00 * (1.0 - fc) + v01 * fc;
        let bottom = v10 * (1.0 - fc) + v11 * fc;
        top * (1.0 - fr) + bottom * fr
    }

    fn sample_cubic(&self, row: f32, col: f32) -> f32 {
        let (w, h) = self.coeffs.dimensions();
        let row = self.mode.position(row, h as usize);
        let col = self.mode.position(col, w as usize);
        let r0 = row.floor();
        let c0 = col.floor();
        let wr = cubic_weights((row - r0) as f64);
        let wc = cubic_weights((col - c0) as f64);
        let (r0, c0) = (r0 as i64, c0 as i64);

        let mut acc = 0.0f64;
        for (i, wy) in wr.iter().enumerate() {
            let mut line = 0.0f64;
            for (j, wx) in wc.iter().enumerate() {
                let y = mirror_index(r0 - 1 + i as i64, h as usize);
                let x = mirror_index(c0 - 1 + j as i64, w as usize);
                line += wx * self.coeffs.get_pixel_unchecked(x as u32, y as u32) as f64;
            }
            acc += wy * line;
        }
        acc as f32
    }
}

/// Cubic B-spline weights for taps at offsets -1, 0, 1, 2
#[inline]
fn cubic_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    let u = 1.0 - t;
    [
        u * u * u / 6.0,
        (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0,
        (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0,
        t3 / 6.0,
    ]
}

/// Convert samples to cubic B-spline coefficients, rows then columns
fn cubic_coefficients(image: &FPix) -> FPix {
    let (w, h) = image.dimensions();
    let mut out = image.clone();

    let mut line = vec![0.0f64; w as usize];
    for y in 0..h {
        for (dst, &src) in line.iter_mut().zip(out.row(y)) {
            *dst = src as f64;
        }
        prefilter_line(&mut line);
        for (dst, &src) in out.row_mut(y).iter_mut().zip(line.iter()) {
            *dst = src as f32;
        }
    }

    let mut column = vec![0.0f64; h as usize];
    for x in 0..w {
        for (y, dst) in column.iter_mut().enumerate() {
            *dst = out.get_pixel_unchecked(x, y as u32) as f64;
        }
        prefilter_line(&mut column);
        for (y, &src) in column.iter().enumerate() {
            out.set_pixel_unchecked(x, y as u32, src as f32);
        }
    }

    out
}

/// In-place recursive B-spline prefilter with mirror-symmetric boundaries
fn prefilter_line(c: &mut [f64]) {
    let n = c.len();
    if n < 2 {
        return;
    }
    let z = CUBIC_POLE;
    let lambda = (1.0 - z) * (1.0 - 1.0 / z);
    for v in c.iter_mut() {
        *v *= lambda;
    }

    c[0] = initial_causal(c, z);
    for k in 1..n {
        c[k] += z * c[k - 1];
    }

    c[n - 1] = (z / (z * z - 1.0)) * (z * c[n - 2] + c[n - 1]);
    for k in (0..n - 1).rev() {
        c[k] = z * (c[k + 1] - c[k]);
    }
}

/// Causal initialization for a mirror-extended line
///
/// Long lines truncate the sum where `z^k` becomes negligible; short lines
/// use the closed form over the full mirrored period.
fn initial_causal(c: &[f64], z: f64) -> f64 {
    let n = c.len();
    let horizon = (PREFILTER_TOLERANCE.ln() / z.abs().ln()).ceil() as usize;
    if horizon < n {
        let mut zn = z;
        let mut sum = c[0];
        for &v in &c[1..horizon] {
            sum += zn * v;
            zn *= z;
        }
        return sum;
    }

    let iz = 1.0 / z;
    let mut zn = z;
    let mut z2n = z.powi(n as i32 - 1);
    let mut sum = c[0] + z2n * c[n - 1];
    z2n *= z2n * iz;
    for &v in &c[1..n - 1] {
        sum += (zn + z2n) * v;
        zn *= z;
        z2n *= iz;
    }
    sum / (1.0 - zn * zn)
}

/// Resample `image` at the positions produced by `coords(x, y) -> (row, col)`
///
/// The output has the same shape as `image`.
pub fn map_coordinates(
    image: &FPix,
    order: InterpolationOrder,
    mode: BoundaryMode,
    coords: impl Fn(u32, u32) -> (f32, f32),
) -> FPix {
    let interp = Interpolator::new(image, order, mode);
    let mut out = image.create_template();
    for y in 0..image.height() {
        for (x, v) in out.row_mut(y).iter_mut().enumerate() {
            let (row, col) = coords(x as u32, y);
            *v = interp.sample(row, col);
        }
    }
    out
}

/// Zoom `image` by `factor` and keep the top-left `out_width x out_height`
///
/// The zoomed size is `round(size * factor)` along each axis, with the corner
/// pixels of the input mapped onto the corner pixels of the zoomed grid.
/// Requested output larger than the zoomed grid is filled by edge clamping.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` unless `factor` is finite and > 0,
/// or if the output size is zero.
pub fn zoom_cropped(
    image: &FPix,
    factor: f32,
    out_width: u32,
    out_height: u32,
    order: InterpolationOrder,
) -> FilterResult<FPix> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "zoom factor must be finite and > 0, got {factor}"
        )));
    }

    let (w, h) = image.dimensions();
    let zoomed_w = ((w as f32 * factor).round() as u32).max(1);
    let zoomed_h = ((h as f32 * factor).round() as u32).max(1);
    let step_x = grid_step(w, zoomed_w);
    let step_y = grid_step(h, zoomed_h);

    let interp = Interpolator::new(image, order, BoundaryMode::Nearest);
    let mut out = FPix::new(out_width, out_height)?;
    for y in 0..out_height {
        let row = y as f32 * step_y;
        for (x, v) in out.row_mut(y).iter_mut().enumerate() {
            *v = interp.sample(row, x as f32 * step_x);
        }
    }
    Ok(out)
}

#[inline]
fn grid_step(input: u32, zoomed: u32) -> f32 {
    if zoomed > 1 {
        (input - 1) as f32 / (zoomed - 1) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32) -> FPix {
        FPix::from_fn(w, h, |x, y| x as f32 + 2.0 * y as f32).unwrap()
    }

    #[test]
    fn test_order_from_u32() {
        assert_eq!(
            InterpolationOrder::try_from(0).unwrap(),
            InterpolationOrder::Nearest
        );
        assert_eq!(InterpolationOrder::try_from(3).unwrap().order(), 3);
        assert!(matches!(
            InterpolationOrder::try_from(2),
            Err(FilterError::UnsupportedOrder(2))
        ));
        assert!(InterpolationOrder::try_from(7).is_err());
    }

    #[test]
    fn test_boundary_index() {
        assert_eq!(BoundaryMode::Nearest.index(-3, 5), 0);
        assert_eq!(BoundaryMode::Nearest.index(9, 5), 4);
        assert_eq!(BoundaryMode::Reflect.index(-1, 5), 0);
        assert_eq!(BoundaryMode::Reflect.index(-2, 5), 1);
        assert_eq!(BoundaryMode::Reflect.index(5, 5), 4);
        assert_eq!(BoundaryMode::Reflect.index(6, 5), 3);
        assert_eq!(BoundaryMode::Reflect.index(10, 5), 0);
        assert_eq!(BoundaryMode::Reflect.index(7, 1), 0);
    }

    #[test]
    fn test_integer_positions_are_exact() {
        let image = ramp(7, 5);
        for order in [
            InterpolationOrder::Nearest,
            InterpolationOrder::Linear,
        ] {
            let out = map_coordinates(&image, order, BoundaryMode::Reflect, |x, y| {
                (y as f32, x as f32)
            });
            assert_eq!(out, image);
        }
    }

    #[test]
    fn test_cubic_reproduces_samples() {
        let image = FPix::from_fn(9, 8, |x, y| ((x * 7 + y * 3) % 5) as f32 * 0.2).unwrap();
        let out = map_coordinates(
            &image,
            InterpolationOrder::Cubic,
            BoundaryMode::Nearest,
            |x, y| (y as f32, x as f32),
        );
        for (a, b) in out.data().iter().zip(image.data()) {
            assert!((a - b).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let image = ramp(4, 4);
        let interp = Interpolator::new(&image, InterpolationOrder::Linear, BoundaryMode::Nearest);
        assert!((interp.sample(1.5, 0.5) - (0.5 + 3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_nearest_clamps() {
        let image = ramp(4, 4);
        let interp = Interpolator::new(&image, InterpolationOrder::Linear, BoundaryMode::Nearest);
        assert_eq!(interp.sample(-10.0, -10.0), 0.0);
        assert_eq!(interp.sample(50.0, 50.0), 3.0 + 6.0);
    }

    #[test]
    fn test_zoom_cropped_shape_and_corners() {
        let image = ramp(3, 3);
        let out = zoom_cropped(&image, 4.0, 10, 9, InterpolationOrder::Linear).unwrap();
        assert_eq!(out.dimensions(), (10, 9));
        assert_eq!(out.get_pixel(0, 0).unwrap(), 0.0);
        // zoomed width 12: column 11 would map onto input column 2
        let step = 2.0 / 11.0;
        assert!((out.get_pixel(9, 0).unwrap() - 9.0 * step).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_rejects_bad_factor() {
        let image = ramp(3, 3);
        assert!(zoom_cropped(&image, 0.0, 3, 3, InterpolationOrder::Cubic).is_err());
        assert!(zoom_cropped(&image, f32::NAN, 3, 3, InterpolationOrder::Cubic).is_err());
    }
}
