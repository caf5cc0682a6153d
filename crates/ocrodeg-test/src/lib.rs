//! ocrodeg-test - Regression test framework for ocrodeg
//!
//! Degradations are random, so tests check statistical and structural
//! properties (bounds, shapes, means) rather than golden images. Two modes
//! are supported:
//!
//! - **Compare**: Check values and report failures (default)
//! - **Display**: Additionally write intermediate images for inspection
//!
//! # Usage
//!
//! ```ignore
//! use ocrodeg_test::{RegParams, seeded_rng};
//!
//! let mut rng = seeded_rng(42);
//! let mut rp = RegParams::new("blotch");
//! rp.compare_values(0.0, out.min_value() as f64, 1e-6);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"
//! - `RUST_LOG`: Log filter used by [`init_tracing`]

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use ocrodeg_core::FPix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Once;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // ocrodeg-test is at crates/ocrodeg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Deterministic generator for reproducible tests
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Install a `tracing` subscriber once per test binary
///
/// Output goes through the test writer so it is captured unless a test
/// fails. The filter defaults to `warn` and follows `RUST_LOG` when set.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Synthetic text page: white paper with rows of dark rectangular "glyphs"
///
/// Lines are 12 pixels tall with 8 pixel gaps; glyphs are 6 pixels wide
/// with 3 pixel spacing, starting after a 10 pixel margin.
pub fn make_text_page(width: u32, height: u32) -> FPix {
    FPix::from_fn(width, height, |x, y| {
        let in_margin = x < 10 || y < 10 || x + 10 >= width || y + 10 >= height;
        let on_line = y.saturating_sub(10) % 20 < 12;
        let on_glyph = x.saturating_sub(10) % 9 < 6;
        if !in_margin && on_line && on_glyph {
            0.0
        } else {
            1.0
        }
    })
    .unwrap_or_else(|e| panic!("make_text_page {width}x{height}: {e}"))
}

/// Horizontal ramp from 0 at the left edge to 1 at the right edge
pub fn make_ramp(width: u32, height: u32) -> FPix {
    let denom = (width.max(2) - 1) as f32;
    FPix::from_fn(width, height, |x, _| x as f32 / denom)
        .unwrap_or_else(|e| panic!("make_ramp {width}x{height}: {e}"))
}

/// Sample standard deviation of the pixel values
pub fn std_dev(fpix: &FPix) -> f64 {
    let n = fpix.len() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let mean = fpix.data().iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = fpix
        .data()
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    var.sqrt()
}

/// Mean absolute difference between horizontally adjacent pixels
///
/// Smoother images give smaller values.
pub fn roughness(fpix: &FPix) -> f64 {
    let (w, h) = fpix.dimensions();
    if w < 2 {
        return 0.0;
    }
    let mut total = 0.0f64;
    for y in 0..h {
        let row = fpix.row(y);
        total += row
            .windows(2)
            .map(|p| (p[1] as f64 - p[0] as f64).abs())
            .sum::<f64>();
    }
    total / ((w - 1) as f64 * h as f64)
}
