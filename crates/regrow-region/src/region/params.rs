//! Growth parameters
//!
//! The acceptance window of a region is controlled by an additive
//! `threshold` and a multiplier `coef_sd` on the color standard deviation.
//! Both start at their initial values and are only ever widened, one step
//! at a time, up to their maxima.

use crate::connectivity::ConnectivityType;
use crate::error::{RegionError, RegionResult};

/// Default initial threshold
pub const DEFAULT_THRESHOLD: u32 = 5;
/// Default threshold ceiling
pub const DEFAULT_THRESHOLD_MAX: u32 = 10;
/// Default initial standard-deviation coefficient
pub const DEFAULT_COEF_SD: f32 = 1.0;
/// Default standard-deviation coefficient ceiling
pub const DEFAULT_COEF_SD_MAX: f32 = 1.5;

/// Options for region growth and threshold adaptation
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthParams {
    /// Initial additive half-width of the acceptance window
    pub threshold: u32,
    /// Largest threshold adaptation may reach
    pub threshold_max: u32,
    /// Threshold increment per adaptation round
    pub threshold_step: u32,
    /// Initial multiplier on the color standard deviation
    pub coef_sd: f32,
    /// Largest coefficient adaptation may reach
    pub coef_sd_max: f32,
    /// Coefficient increment per adaptation round
    pub coef_sd_step: f32,
    /// Neighborhood used when growing
    pub connectivity: ConnectivityType,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            threshold_max: DEFAULT_THRESHOLD_MAX,
            threshold_step: 1,
            coef_sd: DEFAULT_COEF_SD,
            coef_sd_max: DEFAULT_COEF_SD_MAX,
            coef_sd_step: 0.1,
            connectivity: ConnectivityType::FourWay,
        }
    }
}

impl GrowthParams {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial threshold and its ceiling
    pub fn with_threshold(mut self, threshold: u32, max: u32) -> Self {
        self.threshold = threshold;
        self.threshold_max = max;
        self
    }

    /// Set the initial standard-deviation coefficient and its ceiling
    pub fn with_coef_sd(mut self, coef_sd: f32, max: f32) -> Self {
        self.coef_sd = coef_sd;
        self.coef_sd_max = max;
        self
    }

    /// Set the per-round increments
    pub fn with_steps(mut self, threshold_step: u32, coef_sd_step: f32) -> Self {
        self.threshold_step = threshold_step;
        self.coef_sd_step = coef_sd_step;
        self
    }

    /// Set connectivity type
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Check that the parameters describe a bounded, monotone adaptation.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if a ceiling is below its
    /// initial value, a step is not positive, or a coefficient is negative
    /// or not finite.
    pub fn validate(&self) -> RegionResult<()> {
        if self.threshold_max < self.threshold {
            return Err(RegionError::InvalidParameters(format!(
                "threshold_max {} is below threshold {}",
                self.threshold_max, self.threshold
            )));
        }
        if self.threshold_step == 0 {
            return Err(RegionError::InvalidParameters(
                "threshold_step must be positive".to_string(),
            ));
        }
        for (name, v) in [
            ("coef_sd", self.coef_sd),
            ("coef_sd_max", self.coef_sd_max),
            ("coef_sd_step", self.coef_sd_step),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(RegionError::InvalidParameters(format!(
                    "{} must be finite and non-negative, got {}",
                    name, v
                )));
            }
        }
        if self.coef_sd_max < self.coef_sd {
            return Err(RegionError::InvalidParameters(format!(
                "coef_sd_max {} is below coef_sd {}",
                self.coef_sd_max, self.coef_sd
            )));
        }
        if self.coef_sd_step <= 0.0 {
            return Err(RegionError::InvalidParameters(
                "coef_sd_step must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Upper bound on the number of widening rounds before both
    /// parameters reach their ceilings.
    pub fn max_adaptation_rounds(&self) -> u32 {
        let t_rounds = self
            .threshold_max
            .saturating_sub(self.threshold)
            .div_ceil(self.threshold_step.max(1));
        let c_span = (self.coef_sd_max - self.coef_sd).max(0.0);
        let c_rounds = if self.coef_sd_step > 0.0 {
            (c_span / self.coef_sd_step).ceil() as u32
        } else {
            0
        };
        t_rounds.max(c_rounds)
    }
}
