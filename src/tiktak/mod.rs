//! The TikTak multistart method.
//!
//! A first pass evaluates the objective at `quasirandom_N` Sobol points and
//! keeps the best `keep_ratio` fraction. The kept points are then visited
//! best first: each is mixed with the best location found so far, using a
//! weight that grows over the run, and the mixed point is handed to a local
//! method. The incumbent is replaced whenever a local search improves on
//! it.
//!
//! The iterative phase is sequential by construction, since each start
//! depends on the incumbent left by the previous step. Only the first-pass
//! evaluations may run in parallel.
//!
//! # Open question: the first incumbent
//!
//! The incumbent starts as the best screened point itself, unrefined. The
//! first step then mixes that point with itself and refines it, so no extra
//! local call is spent before the loop.
//!
//! # References
//!
//! Arnoud, Guvenen & Kleineberg (2019), "Benchmarking Global Optimizers",
//! NBER Working Paper 26340.

mod config;
mod runner;
mod weight;

pub use config::TikTakConfig;
pub use runner::{TikTakResult, TikTakRunner};
pub use weight::WeightSchedule;

use crate::error::Result;
use crate::local::{LocalMethod, Outcome};
use crate::problem::MinimizationProblem;

/// A strategy that combines many local searches into a global one.
pub trait MultistartMethod {
    /// Minimizes `problem` using `local_method` for each local search.
    fn minimize<M>(&self, local_method: &M, problem: &MinimizationProblem) -> Result<Outcome>
    where
        M: LocalMethod + ?Sized;
}

impl MultistartMethod for TikTakConfig {
    fn minimize<M>(&self, local_method: &M, problem: &MinimizationProblem) -> Result<Outcome>
    where
        M: LocalMethod + ?Sized,
    {
        TikTakRunner::run(self, local_method, problem).map(|result| result.best)
    }
}

/// Multistart minimization with the given multistart and local methods.
///
/// # Errors
///
/// Returns a [`ConfigurationError`](crate::ConfigurationError) for an
/// invalid method configuration. If every candidate is infeasible the
/// call still succeeds and returns [`Outcome::NotFound`].
///
/// # Examples
///
/// ```
/// use u_multistart::local::NelderMead;
/// use u_multistart::problem::MinimizationProblem;
/// use u_multistart::tiktak::{multistart_minimization, TikTakConfig};
///
/// let problem = MinimizationProblem::new(
///     |x: &[f64]| x.iter().map(|v| (v - 1.0).powi(2)).sum(),
///     vec![-2.0; 4],
///     vec![2.0; 4],
/// )
/// .unwrap();
/// let p = multistart_minimization(&TikTakConfig::new(100), &NelderMead::default(), &problem)
///     .unwrap();
/// assert!(p.value() < 1e-6);
/// ```
pub fn multistart_minimization<S, M>(
    multistart_method: &S,
    local_method: &M,
    problem: &MinimizationProblem,
) -> Result<Outcome>
where
    S: MultistartMethod + ?Sized,
    M: LocalMethod + ?Sized,
{
    multistart_method.minimize(local_method, problem)
}
