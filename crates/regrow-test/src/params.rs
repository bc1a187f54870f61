//! Check bookkeeping for regression tests

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use regrow_core::PixelGrid;
use regrow_io::ImageFormat;
use std::fs;

/// What a regression run does besides checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Run the checks only (default)
    #[default]
    Compare,
    /// Run the checks and write rendered outputs
    Display,
}

impl RegTestMode {
    /// Read `REGTEST_MODE`; anything but "display" means compare.
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

/// Running state of one regression test.
///
/// Every check bumps `index`, so a failure message names the check that
/// produced it.
pub struct RegParams {
    /// Short name, used in messages and output file names
    pub test_name: String,
    index: usize,
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create parameters for `test_name`, mode taken from `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!("\n==== {}_reg ({:?}) ====", test_name, mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Number of checks run so far
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether rendered grids are written out
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two values within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "{}_reg check {}: expected {}, got {} (|diff| {} > {})",
                self.test_name, self.index, expected, actual, diff, delta
            ));
            false
        } else {
            true
        }
    }

    /// Compare two label maps for exact equality.
    pub fn compare_labels(&mut self, expected: &[u32], actual: &[u32]) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            self.fail(format!(
                "{}_reg check {}: label maps differ in length ({} vs {})",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            ));
            return false;
        }
        if let Some(i) = expected.iter().zip(actual).position(|(e, a)| e != a) {
            self.fail(format!(
                "{}_reg check {}: label {} is {} instead of {}",
                self.test_name, self.index, i, actual[i], expected[i]
            ));
            return false;
        }
        true
    }

    /// Compare two grids for exact equality.
    pub fn compare_grids(&mut self, grid1: &PixelGrid, grid2: &PixelGrid) -> bool {
        self.index += 1;

        if grid1.dimensions() != grid2.dimensions() {
            self.fail(format!(
                "{}_reg check {}: grid sizes differ",
                self.test_name, self.index
            ));
            return false;
        }

        let width = grid1.width();
        if let Some(i) = grid1
            .data()
            .iter()
            .zip(grid2.data())
            .position(|(a, b)| a != b)
        {
            self.fail(format!(
                "{}_reg check {}: grids differ at row {} col {}",
                self.test_name,
                self.index,
                i / width as usize,
                i % width as usize
            ));
            return false;
        }
        true
    }

    /// Write `grid` to the regout directory when in display mode.
    ///
    /// Returns the written path, or `None` in compare mode.
    pub fn write_grid(
        &mut self,
        grid: &PixelGrid,
        format: ImageFormat,
    ) -> TestResult<Option<String>> {
        self.index += 1;
        if !self.display() {
            return Ok(None);
        }

        let dir = regout_dir();
        fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
            path: dir.clone(),
            message: e.to_string(),
        })?;
        let path = format!(
            "{}/{}.{:02}.{}",
            dir,
            self.test_name,
            self.index,
            format.extension()
        );
        regrow_io::write_image(grid, &path, format).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("  saved {}", path);
        Ok(Some(path))
    }

    /// Print a summary and return whether every check passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("{}_reg: {} checks passed\n", self.test_name, self.index);
        } else {
            eprintln!(
                "{}_reg: {} of {} checks failed",
                self.test_name,
                self.failures.len(),
                self.index
            );
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }

        self.success
    }

    /// No failure recorded yet
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
