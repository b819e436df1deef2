//! Multistart global optimization.
//!
//! Coordinates global minimization of a box-bounded objective by combining
//! a deterministic quasirandom first pass with repeated calls to an
//! arbitrary local method:
//!
//! - **Problem**: objective plus box bounds ([`MinimizationProblem`]).
//! - **Quasirandom sampling**: scrambled Sobol points scaled to the bounds.
//! - **Screening**: evaluate, rank, and keep the best fraction of points.
//! - **Local methods**: the [`LocalMethod`] capability, a registry of
//!   named backends, closures, and built-in Nelder-Mead and golden section
//!   searches.
//! - **TikTak**: the multistart method of Arnoud, Guvenen & Kleineberg
//!   (2019), mixing each start with the incumbent before refining it.
//!
//! # Example
//!
//! ```
//! use u_multistart::{local_minimization, multistart_minimization};
//! use u_multistart::local::NelderMead;
//! use u_multistart::problem::MinimizationProblem;
//! use u_multistart::tiktak::TikTakConfig;
//!
//! // ∑(xᵢ - 1)² over [-2, 2]⁴
//! let problem = MinimizationProblem::new(
//!     |x: &[f64]| x.iter().map(|v| (v - 1.0).powi(2)).sum(),
//!     vec![-2.0; 4],
//!     vec![2.0; 4],
//! )
//! .unwrap();
//!
//! let local_method = NelderMead::default();
//! let p = multistart_minimization(&TikTakConfig::new(100), &local_method, &problem).unwrap();
//! assert!(p.value() < 1e-6);
//!
//! let q = local_minimization(&local_method, &problem, &[0.0; 4]).unwrap();
//! assert!(q.value() < 1e-6);
//! ```
//!
//! # Failure model
//!
//! Only malformed problems and configurations are errors
//! ([`ConfigurationError`]). An infeasible point or a failed local search
//! is an [`Outcome::NotFound`], compared as `+inf`; a run in which nothing
//! feasible is found returns `NotFound` rather than failing.

pub mod error;
pub mod local;
pub mod problem;
pub mod quasirandom;
pub mod screening;
pub mod tiktak;

pub use error::ConfigurationError;
pub use local::{local_minimization, LocalDiagnostics, LocalMethod, LocationValue, Outcome};
pub use problem::MinimizationProblem;
pub use tiktak::{multistart_minimization, MultistartMethod, TikTakConfig};
