//! Golden section search for one-dimensional problems.

use super::types::{LocalDiagnostics, LocalMethod, LocationValue, Outcome};
use crate::problem::MinimizationProblem;

/// Golden section search over the whole bound interval of a 1-D problem.
///
/// Exact (to tolerance) for unimodal objectives. The starting point is
/// kept as a fallback: the result is whichever of the bracketed minimum
/// and the start has the lower value. Problems of any other dimension
/// yield [`Outcome::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoldenSection {
    max_iters: usize,
    x_abs_tol: f64,
    x_rel_tol: f64,
}

impl Default for GoldenSection {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
        }
    }
}

impl GoldenSection {
    pub fn with_max_iters(mut self, n: usize) -> Self {
        self.max_iters = n;
        self
    }

    /// Absolute bracket width at which the search stops.
    pub fn with_x_abs_tol(mut self, tol: f64) -> Self {
        self.x_abs_tol = if tol.is_finite() { tol.max(0.0) } else { 0.0 };
        self
    }

    /// Bracket width relative to the magnitude of the bracket ends.
    pub fn with_x_rel_tol(mut self, tol: f64) -> Self {
        self.x_rel_tol = if tol.is_finite() { tol.max(0.0) } else { 0.0 };
        self
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    pub fn x_rel_tol(&self) -> f64 {
        self.x_rel_tol
    }
}

impl LocalMethod for GoldenSection {
    fn name(&self) -> &str {
        "golden_section"
    }

    fn refine(&self, problem: &MinimizationProblem, start: &[f64]) -> Outcome {
        if problem.dimension() != 1 || start.len() != 1 {
            return Outcome::NotFound;
        }
        let f = |x: f64| problem.evaluate(&[x]);

        let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
        let inv_phi2 = 1.0 - inv_phi;

        let mut a = problem.lower_bounds()[0];
        let mut b = problem.upper_bounds()[0];
        let mut x1 = a + inv_phi2 * (b - a);
        let mut x2 = a + inv_phi * (b - a);
        let mut f1 = f(x1);
        let mut f2 = f(x2);
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..self.max_iters {
            let tol = self
                .x_abs_tol
                .max(self.x_rel_tol * a.abs().max(b.abs()).max(1.0));
            if b - a < tol {
                converged = true;
                break;
            }
            iterations += 1;
            if f1 < f2 {
                b = x2;
                x2 = x1;
                f2 = f1;
                x1 = a + inv_phi2 * (b - a);
                f1 = f(x1);
            } else {
                a = x1;
                x1 = x2;
                f1 = f2;
                x2 = a + inv_phi * (b - a);
                f2 = f(x2);
            }
        }

        let x_mid = 0.5 * (a + b);
        let f_mid = f(x_mid);
        let x_start = start[0].clamp(problem.lower_bounds()[0], problem.upper_bounds()[0]);
        let f_start = f(x_start);

        let (x, value) = if f_start < f_mid {
            (x_start, f_start)
        } else {
            (x_mid, f_mid)
        };
        if value.is_finite() {
            // Two evaluations open the bracket, one per step, two at the end.
            let diagnostics = LocalDiagnostics {
                iterations,
                evaluations: iterations + 4,
                converged,
            };
            LocationValue::new(vec![x], value)
                .with_diagnostics(diagnostics)
                .into()
        } else {
            Outcome::NotFound
        }
    }
}
