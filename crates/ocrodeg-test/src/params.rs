//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use ocrodeg_core::FPix;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare values (default)
    #[default]
    Compare,
    /// Compare values and write images for visual inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "blotch")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Check that `actual` lies in the closed interval `[lo, hi]`
    pub fn compare_range(&mut self, lo: f64, hi: f64, actual: f64) -> bool {
        self.index += 1;

        if !(lo..=hi).contains(&actual) {
            let msg = format!(
                "Failure in {}_reg: range check for index {}\n\
                 actual = {} not in [{}, {}]",
                self.test_name, self.index, actual, lo, hi
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two images pixel by pixel within `delta`
    ///
    /// # Returns
    ///
    /// `true` if the dimensions agree and every pixel pair differs by at
    /// most `delta`, `false` otherwise.
    pub fn compare_fpix(&mut self, expected: &FPix, actual: &FPix, delta: f32) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            let msg = format!(
                "Failure in {}_reg: fpix comparison for index {} - dimension mismatch \
                 {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            );
            self.record_failure(msg);
            return false;
        }

        let width = expected.width() as usize;
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| {
                let diff = (a - b).abs();
                diff.is_nan() || diff > delta
            });
        if let Some(i) = mismatch {
            let msg = format!(
                "Failure in {}_reg: fpix comparison for index {} - pixel mismatch at ({}, {}): \
                 expected = {}, actual = {}",
                self.test_name,
                self.index,
                i % width,
                i / width,
                expected.data()[i],
                actual.data()[i]
            );
            self.record_failure(msg);
            return false;
        }

        true
    }

    /// Write an image to the regout directory in display mode
    ///
    /// The file is named `<test_name>.<index>.png`. Outside display mode
    /// nothing is written.
    pub fn write_fpix(&mut self, fpix: &FPix) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let dir = regout_dir();
        fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
            path: dir.clone(),
            message: e.to_string(),
        })?;

        let path = format!("{}/{}.{:02}.png", dir, self.test_name, self.index);
        fpix.to_gray_image()
            .save(&path)
            .map_err(|e| TestError::ImageWrite {
                path: path.clone(),
                message: e.to_string(),
            })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.compare_values(0.0, f64::NAN, 1.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_range() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_range(0.0, 1.0, 1.0));
        assert!(!rp.compare_range(0.0, 1.0, 1.5));
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_fpix() {
        let a = FPix::new_with_value(3, 2, 0.5).unwrap();
        let mut b = a.clone();
        b.set_pixel(2, 1, 0.6).unwrap();

        let mut rp = RegParams::new("test");
        assert!(rp.compare_fpix(&a, &b, 0.2));
        assert!(!rp.compare_fpix(&a, &b, 0.01));
        assert!(!rp.compare_fpix(&a, &FPix::new(2, 3).unwrap(), 1.0));
    }
}
