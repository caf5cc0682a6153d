//! Exact Euclidean distance transform
//!
//! Every pixel receives the Euclidean distance to the nearest zero-valued
//! pixel. The transform is separable: squared distances are computed along
//! columns, then combined along rows using the lower envelope of parabolas
//! (Felzenszwalb and Huttenlocher), so the result is exact rather than a
//! chamfer approximation.
//!
//! An image without any zero pixel has no sites, and every output is
//! `f32::INFINITY`.

use ocrodeg_core::FPix;

/// Distance from each pixel to the nearest zero pixel
pub fn distance_transform_edt(fpix: &FPix) -> FPix {
    let (w, h) = fpix.dimensions();
    let (wu, hu) = (w as usize, h as usize);
    let mut squared = vec![f64::INFINITY; wu * hu];

    let mut column = vec![0.0f64; hu];
    let mut out_line = vec![0.0f64; wu.max(hu)];
    let mut envelope = Envelope::with_capacity(wu.max(hu));

    for x in 0..wu {
        for (y, c) in column.iter_mut().enumerate() {
            *c = if fpix.get_pixel_unchecked(x as u32, y as u32) == 0.0 {
                0.0
            } else {
                f64::INFINITY
            };
        }
        envelope.transform(&column, &mut out_line[..hu]);
        for y in 0..hu {
            squared[y * wu + x] = out_line[y];
        }
    }

    for y in 0..hu {
        let row = &mut squared[y * wu..(y + 1) * wu];
        envelope.transform(row, &mut out_line[..wu]);
        row.copy_from_slice(&out_line[..wu]);
    }

    let mut out = fpix.create_template();
    for (d, s) in out.data_mut().iter_mut().zip(&squared) {
        *d = s.sqrt() as f32;
    }
    out
}

/// Scratch space for the 1-D squared distance pass
struct Envelope {
    /// Parabola vertices in the lower envelope
    vertices: Vec<usize>,
    /// Left boundaries of each parabola's interval
    bounds: Vec<f64>,
}

impl Envelope {
    fn with_capacity(n: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(n),
            bounds: Vec::with_capacity(n + 1),
        }
    }

    /// Squared distance transform of `f` into `d`
    ///
    /// Infinite entries of `f` are not sites and never enter the envelope.
    fn transform(&mut self, f: &[f64], d: &mut [f64]) {
        self.vertices.clear();
        self.bounds.clear();

        for (q, &fq) in f.iter().enumerate() {
            if !fq.is_finite() {
                continue;
            }
            let qf = q as f64;
            let mut s = f64::NEG_INFINITY;
            while let Some(&v) = self.vertices.last() {
                let vf = v as f64;
                s = ((fq + qf * qf) - (f[v] + vf * vf)) / (2.0 * (qf - vf));
                let bound = self.bounds.last().copied().unwrap_or(f64::NEG_INFINITY);
                if s <= bound {
                    self.vertices.pop();
                    self.bounds.pop();
                    s = f64::NEG_INFINITY;
                } else {
                    break;
                }
            }
            self.vertices.push(q);
            self.bounds.push(s);
        }

        if self.vertices.is_empty() {
            d.fill(f64::INFINITY);
            return;
        }

        let mut k = 0;
        for (q, dq) in d.iter_mut().enumerate() {
            let qf = q as f64;
            while k + 1 < self.vertices.len() && self.bounds[k + 1] < qf {
                k += 1;
            }
            let v = self.vertices[k];
            let dv = qf - v as f64;
            *dq = dv * dv + f[v];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(fpix: &FPix) -> FPix {
        let (w, h) = fpix.dimensions();
        let sites: Vec<(u32, u32)> = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| fpix.get_pixel_unchecked(x, y) == 0.0)
            .collect();
        FPix::from_fn(w, h, |x, y| {
            sites
                .iter()
                .map(|&(sx, sy)| {
                    let dx = x as f32 - sx as f32;
                    let dy = y as f32 - sy as f32;
                    (dx * dx + dy * dy).sqrt()
                })
                .fold(f32::INFINITY, f32::min)
        })
        .unwrap()
    }

    #[test]
    fn test_single_site() {
        let mut fpix = FPix::new_with_value(7, 5, 1.0).unwrap();
        fpix.set_pixel(3, 2, 0.0).unwrap();
        let d = distance_transform_edt(&fpix);
        assert_eq!(d.get_pixel(3, 2).unwrap(), 0.0);
        assert_eq!(d.get_pixel(6, 2).unwrap(), 3.0);
        assert!((d.get_pixel(0, 0).unwrap() - 13f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_matches_brute_force() {
        let fpix = FPix::from_fn(13, 11, |x, y| {
            if (x * 5 + y * 7) % 17 == 0 { 0.0 } else { 1.0 }
        })
        .unwrap();
        let fast = distance_transform_edt(&fpix);
        let slow = brute_force(&fpix);
        for (a, b) in fast.data().iter().zip(slow.data()) {
            assert!((a - b).abs() < 1e-5, "{a} vs {b}");
        }
    }

    #[test]
    fn test_rows_without_sites() {
        // Sites only in the first row
        let fpix = FPix::from_fn(4, 6, |x, y| if y == 0 && x == 1 { 0.0 } else { 1.0 }).unwrap();
        let d = distance_transform_edt(&fpix);
        assert_eq!(d.get_pixel(1, 5).unwrap(), 5.0);
        assert!((d.get_pixel(3, 5).unwrap() - 29f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_no_sites_is_infinite() {
        let fpix = FPix::new_with_value(3, 3, 1.0).unwrap();
        let d = distance_transform_edt(&fpix);
        assert!(d.data().iter().all(|v| v.is_infinite()));
    }
}
