//! regrow-test - Regression test harness for regrow
//!
//! Integration tests record each check through [`RegParams`], which counts
//! checks, collects failures and reports them in one place. Two modes are
//! supported:
//!
//! - **Compare**: Run every check and fail on mismatch (default)
//! - **Display**: Also write rendered images to the regout directory for
//!   visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use regrow_test::RegParams;
//!
//! let mut rp = RegParams::new("growth");
//! rp.compare_values(9.0, region.member_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Directory that display mode writes rendered grids into.
///
/// Resolves to `tests/regout` under the workspace root; this crate sits two
/// levels below it.
pub fn regout_dir() -> String {
    format!("{}/../../tests/regout", env!("CARGO_MANIFEST_DIR"))
}
