//! TikTak configuration.

use super::weight::WeightSchedule;
use crate::error::{ConfigurationError, Result};
use crate::quasirandom::SobolSampler;
use crate::screening::CandidateScreener;

/// Configuration for the TikTak multistart method.
///
/// Only the number of quasirandom points has no default. The remaining
/// defaults (`keep_ratio = 0.1`, `θ_min = 0.1`, `θ_max = 0.995`,
/// `θ_pow = 0.5`) are those of Arnoud, Guvenen & Kleineberg (2019).
///
/// Setters store values as given; out-of-range values are reported by
/// [`validate`](Self::validate), never corrected.
///
/// # Examples
///
/// ```
/// use u_multistart::tiktak::TikTakConfig;
///
/// let config = TikTakConfig::new(100)
///     .with_keep_ratio(0.2)
///     .with_theta_pow(0.75);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.retained(), 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TikTakConfig {
    /// Number of Sobol points evaluated in the first pass.
    pub quasirandom_n: usize,

    /// Fraction of the best first-pass points used as starts, in `(0, 1]`.
    pub keep_ratio: f64,

    /// Lower clamp of the mixing weight.
    pub theta_min: f64,

    /// Upper clamp of the mixing weight.
    pub theta_max: f64,

    /// Exponent of the mixing weight schedule.
    pub theta_pow: f64,

    /// Sobol sequence settings.
    pub sampler: SobolSampler,

    /// Whether to evaluate first-pass points in parallel.
    ///
    /// Takes effect only with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,
}

impl TikTakConfig {
    /// Creates a configuration with `quasirandom_n` first-pass points.
    pub fn new(quasirandom_n: usize) -> Self {
        Self {
            quasirandom_n,
            keep_ratio: 0.1,
            theta_min: 0.1,
            theta_max: 0.995,
            theta_pow: 0.5,
            sampler: SobolSampler::default(),
            parallel: false,
        }
    }

    pub fn with_keep_ratio(mut self, ratio: f64) -> Self {
        self.keep_ratio = ratio;
        self
    }

    pub fn with_theta_min(mut self, theta: f64) -> Self {
        self.theta_min = theta;
        self
    }

    pub fn with_theta_max(mut self, theta: f64) -> Self {
        self.theta_max = theta;
        self
    }

    pub fn with_theta_pow(mut self, pow: f64) -> Self {
        self.theta_pow = pow;
        self
    }

    /// Sets the Sobol scrambling seed.
    pub fn with_sobol_seed(mut self, seed: u32) -> Self {
        self.sampler.seed = seed;
        self
    }

    /// Discards the first `skip` Sobol points.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.sampler.skip = skip;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of starts kept after screening.
    pub fn retained(&self) -> usize {
        crate::screening::retained_count(self.keep_ratio, self.quasirandom_n)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.quasirandom_n == 0 {
            return Err(ConfigurationError::ZeroPoints);
        }
        self.screener()?;
        self.weight_schedule()?;
        Ok(())
    }

    /// Validates the configuration against a problem dimension.
    pub fn validate_for(&self, dimension: usize) -> Result<()> {
        self.validate()?;
        self.sampler.validate(dimension)
    }

    pub fn weight_schedule(&self) -> Result<WeightSchedule> {
        WeightSchedule::new(self.theta_min, self.theta_max, self.theta_pow)
    }

    pub fn screener(&self) -> Result<CandidateScreener> {
        Ok(CandidateScreener::new(self.keep_ratio)?.with_parallel(self.parallel))
    }
}
