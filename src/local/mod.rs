//! Local methods.
//!
//! A local method refines a single starting point. This module defines the
//! [`LocalMethod`] capability, the [`Outcome`] it returns, a registry of
//! named backends, and two built-in methods:
//!
//! - [`NelderMead`]: bounded derivative-free simplex search (any dimension)
//! - [`GoldenSection`]: exact bracketing search for 1-D problems
//!
//! Any closure `Fn(&MinimizationProblem, &[f64]) -> Outcome` is a local
//! method as well.

mod golden_section;
mod nelder_mead;
mod registry;
mod types;

pub use golden_section::GoldenSection;
pub use nelder_mead::NelderMead;
pub use registry::{LocalMethodChoice, LocalMethodRegistry, SharedLocalMethod};
pub use types::{LocalDiagnostics, LocalMethod, LocationValue, Outcome};

use crate::error::Result;
use crate::problem::MinimizationProblem;

/// Runs `local_method` on `problem` from `start`.
///
/// `start` is projected onto the bounds before the search. A returned
/// location of the wrong length or outside the bounds, or a NaN value, is
/// treated as infeasible and reported as [`Outcome::NotFound`].
///
/// # Errors
///
/// Returns a [`ConfigurationError`](crate::ConfigurationError) if `start`
/// does not have the problem's dimension.
///
/// # Examples
///
/// ```
/// use u_multistart::local::{local_minimization, NelderMead};
/// use u_multistart::problem::MinimizationProblem;
///
/// let problem =
///     MinimizationProblem::new(|x: &[f64]| (x[0] - 1.0).powi(2), vec![-2.0], vec![2.0]).unwrap();
/// let outcome = local_minimization(&NelderMead::default(), &problem, &[-1.0]).unwrap();
/// assert!(outcome.value() < 1e-10);
/// ```
pub fn local_minimization<M>(
    local_method: &M,
    problem: &MinimizationProblem,
    start: &[f64],
) -> Result<Outcome>
where
    M: LocalMethod + ?Sized,
{
    problem.check_point(start)?;
    let mut x = start.to_vec();
    problem.clamp(&mut x);
    Ok(refine_checked(local_method, problem, &x))
}

/// Runs a local method on an in-bounds start and discards unusable results.
pub(crate) fn refine_checked<M>(local_method: &M, problem: &MinimizationProblem, x: &[f64]) -> Outcome
where
    M: LocalMethod + ?Sized,
{
    let outcome = local_method.refine(problem, x);
    match outcome {
        Outcome::Found(ref lv) if lv.value.is_nan() => Outcome::NotFound,
        Outcome::Found(ref lv) if !problem.contains(&lv.location) => {
            tracing::debug!(
                method = local_method.name(),
                "discarding local result outside the bounds"
            );
            Outcome::NotFound
        }
        other => other,
    }
}
