//! Box-bounded minimization problems.
//!
//! A [`MinimizationProblem`] pairs an objective `ℝᴺ → ℝ` with per-coordinate
//! lower and upper bounds. The bounds define the dimension `N` and the
//! feasible hyper-rectangle that every multistart component respects.

mod types;

pub use types::{MinimizationProblem, Objective};
