//! TikTak execution: sample, screen, then refine starts in ranked order.

use super::config::TikTakConfig;
use super::weight::blend;
use crate::error::Result;
use crate::local::{refine_checked, LocalMethod, Outcome};
use crate::problem::MinimizationProblem;
use crate::screening::RankedSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Result of a TikTak run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TikTakResult {
    /// Best outcome of the run. `NotFound` (value `+inf`) when every
    /// candidate was infeasible.
    pub best: Outcome,

    /// Incumbent value after screening, then after each iteration step.
    /// Non-increasing.
    pub value_history: Vec<f64>,

    /// Number of quasirandom points evaluated.
    pub screened: usize,

    /// Number of starts kept after screening.
    pub retained: usize,

    /// Number of local method calls made.
    pub local_calls: usize,

    /// Local method calls that returned nothing usable.
    pub failed_calls: usize,

    /// Steps that replaced the incumbent.
    pub improvements: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl TikTakResult {
    /// Value of the best outcome, `+inf` if nothing feasible was found.
    pub fn best_value(&self) -> f64 {
        self.best.value()
    }

    pub fn all_infeasible(&self) -> bool {
        self.best.is_not_found()
    }
}

/// Executes the TikTak multistart method.
///
/// # Usage
///
/// ```
/// use u_multistart::local::NelderMead;
/// use u_multistart::problem::MinimizationProblem;
/// use u_multistart::tiktak::{TikTakConfig, TikTakRunner};
///
/// let problem = MinimizationProblem::new(
///     |x: &[f64]| x.iter().map(|v| (v - 1.0).powi(2)).sum(),
///     vec![-2.0; 4],
///     vec![2.0; 4],
/// )
/// .unwrap();
/// let config = TikTakConfig::new(100);
/// let result = TikTakRunner::run(&config, &NelderMead::default(), &problem).unwrap();
/// assert!(result.best_value() < 1e-6);
/// ```
pub struct TikTakRunner;

impl TikTakRunner {
    /// Runs TikTak to completion.
    ///
    /// # Errors
    ///
    /// Only configuration errors are returned. Failed evaluations and
    /// failed local searches are absorbed into the result.
    pub fn run<M>(
        config: &TikTakConfig,
        local_method: &M,
        problem: &MinimizationProblem,
    ) -> Result<TikTakResult>
    where
        M: LocalMethod + ?Sized,
    {
        Self::run_with_cancel(config, local_method, problem, None)
    }

    /// Runs TikTak with an optional cancellation token.
    ///
    /// The flag is checked before each iteration step. A cancelled run
    /// returns the incumbent found so far.
    pub fn run_with_cancel<M>(
        config: &TikTakConfig,
        local_method: &M,
        problem: &MinimizationProblem,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TikTakResult>
    where
        M: LocalMethod + ?Sized,
    {
        let schedule = config.weight_schedule()?;
        let ranked = Self::screen(config, problem)?;

        let mut incumbent = ranked
            .best()
            .map(|candidate| candidate.to_outcome())
            .unwrap_or_default();
        let total_steps = ranked.len();

        let mut value_history = Vec::with_capacity(total_steps + 1);
        value_history.push(incumbent.value());

        let mut local_calls = 0usize;
        let mut failed_calls = 0usize;
        let mut improvements = 0usize;
        let mut cancelled = false;

        debug!(
            steps = total_steps,
            method = local_method.name(),
            initial = incumbent.value(),
            "tiktak iterating"
        );

        for (i, candidate) in ranked.iter().enumerate() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let step = i + 1;
            let theta = schedule.weight(step, total_steps);
            // With no feasible incumbent yet there is nothing to mix in.
            let mut start = match incumbent.location() {
                Some(location) => blend(location, &candidate.point, theta),
                None => candidate.point.clone(),
            };
            problem.clamp(&mut start);

            let outcome = refine_checked(local_method, problem, &start);
            local_calls += 1;
            if outcome.is_not_found() {
                failed_calls += 1;
            }

            let improved = outcome.improves_on(&incumbent);
            trace!(step, theta, value = outcome.value(), improved, "tiktak step");
            if improved {
                incumbent = outcome;
                improvements += 1;
            }
            value_history.push(incumbent.value());
        }

        if incumbent.is_not_found() {
            warn!(
                screened = ranked.screened(),
                local_calls, "tiktak found no feasible point"
            );
        } else {
            info!(
                value = incumbent.value(),
                local_calls,
                improvements,
                cancelled,
                "tiktak finished"
            );
        }

        Ok(TikTakResult {
            best: incumbent,
            value_history,
            screened: ranked.screened(),
            retained: total_steps,
            local_calls,
            failed_calls,
            improvements,
            cancelled,
        })
    }

    /// Runs the sampling and screening phases only.
    pub fn screen(config: &TikTakConfig, problem: &MinimizationProblem) -> Result<RankedSet> {
        config.validate_for(problem.dimension())?;
        let screener = config.screener()?;

        debug!(
            points = config.quasirandom_n,
            dimension = problem.dimension(),
            "tiktak sampling"
        );
        let points = config.sampler.scaled_points(problem, config.quasirandom_n)?;
        let ranked = screener.screen(problem, points);
        debug!(
            retained = ranked.len(),
            best = ranked.best().map_or(f64::INFINITY, |c| c.value),
            "tiktak screened"
        );
        Ok(ranked)
    }
}
