//! Mixing weight schedule.

use crate::error::{ConfigurationError, Result};

/// Power-law schedule for the weight of the incumbent in each start.
///
/// `weight(step, total) = clamp((step / total)^θ_pow, θ_min, θ_max)`.
/// The weight grows with `step`: early starts stay close to their own
/// quasirandom point (exploration), late starts are pulled towards the
/// best location found so far (exploitation).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightSchedule {
    theta_min: f64,
    theta_max: f64,
    theta_pow: f64,
}

impl Default for WeightSchedule {
    fn default() -> Self {
        Self {
            theta_min: 0.1,
            theta_max: 0.995,
            theta_pow: 0.5,
        }
    }
}

impl WeightSchedule {
    /// Creates a schedule.
    ///
    /// # Errors
    ///
    /// Requires `0 <= θ_min <= θ_max <= 1` and a finite `θ_pow > 0`.
    pub fn new(theta_min: f64, theta_max: f64, theta_pow: f64) -> Result<Self> {
        let ordered = 0.0 <= theta_min && theta_min <= theta_max && theta_max <= 1.0;
        if !ordered {
            return Err(ConfigurationError::InvalidWeightBounds {
                min: theta_min,
                max: theta_max,
            });
        }
        if !(theta_pow.is_finite() && theta_pow > 0.0) {
            return Err(ConfigurationError::InvalidWeightPower(theta_pow));
        }
        Ok(Self {
            theta_min,
            theta_max,
            theta_pow,
        })
    }

    pub fn theta_min(&self) -> f64 {
        self.theta_min
    }

    pub fn theta_max(&self) -> f64 {
        self.theta_max
    }

    pub fn theta_pow(&self) -> f64 {
        self.theta_pow
    }

    /// Weight of the incumbent at `step` (1-based) out of `total_steps`.
    pub fn weight(&self, step: usize, total_steps: usize) -> f64 {
        if total_steps == 0 {
            return self.theta_min;
        }
        let fraction = step.min(total_steps) as f64 / total_steps as f64;
        fraction
            .powf(self.theta_pow)
            .clamp(self.theta_min, self.theta_max)
    }
}

/// `θ * incumbent + (1 - θ) * candidate`, coordinate-wise.
///
/// Evaluated as `c + θ (i - c)`, which returns the candidate exactly when
/// it coincides with the incumbent.
pub(crate) fn blend(incumbent: &[f64], candidate: &[f64], theta: f64) -> Vec<f64> {
    incumbent
        .iter()
        .zip(candidate)
        .map(|(&i, &c)| c + theta * (i - c))
        .collect()
}
