//! Bounded Nelder-Mead simplex search.

#![allow(clippy::needless_range_loop)]

use super::types::{LocalDiagnostics, LocalMethod, LocationValue, Outcome};
use crate::problem::MinimizationProblem;
use std::cmp::Ordering;

/// Derivative-free simplex search restricted to the problem's box.
///
/// Every trial vertex is projected onto the bounds before it is
/// evaluated, so the search never leaves the feasible region. The initial
/// simplex is spanned by steps of `initial_step` times the box width along
/// each axis.
///
/// # Examples
///
/// ```
/// use u_multistart::local::{LocalMethod, NelderMead};
/// use u_multistart::problem::MinimizationProblem;
///
/// let problem = MinimizationProblem::new(
///     |x: &[f64]| (x[0] - 0.3).powi(2) + (x[1] + 0.2).powi(2),
///     vec![-1.0, -1.0],
///     vec![1.0, 1.0],
/// )
/// .unwrap();
/// let outcome = NelderMead::default().refine(&problem, &[0.9, 0.9]);
/// assert!(outcome.value() < 1e-8);
/// ```
///
/// # References
///
/// Nelder & Mead (1965), "A Simplex Method for Function Minimization"
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NelderMead {
    max_iterations: usize,
    max_evaluations: usize,
    f_tol: f64,
    x_tol: f64,
    initial_step: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            max_evaluations: 10_000,
            f_tol: 1e-12,
            x_tol: 1e-10,
            initial_step: 0.1,
        }
    }
}

// Reflection, expansion, contraction, shrink.
const ALPHA: f64 = 1.0;
const GAMMA: f64 = 2.0;
const RHO: f64 = 0.5;
const SIGMA: f64 = 0.5;

impl NelderMead {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Budget of objective evaluations (at least one per vertex).
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    /// Stops when the spread of vertex values falls below `tol`.
    pub fn with_f_tol(mut self, tol: f64) -> Self {
        self.f_tol = non_negative(tol);
        self
    }

    /// Stops when the simplex diameter falls below `tol`.
    pub fn with_x_tol(mut self, tol: f64) -> Self {
        self.x_tol = non_negative(tol);
        self
    }

    /// Initial edge length as a fraction of the box width, in `(0, 1]`.
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = if step.is_finite() {
            step.clamp(f64::EPSILON, 1.0)
        } else {
            0.1
        };
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    pub fn f_tol(&self) -> f64 {
        self.f_tol
    }

    pub fn x_tol(&self) -> f64 {
        self.x_tol
    }

    pub fn initial_step(&self) -> f64 {
        self.initial_step
    }

    fn initial_simplex(&self, problem: &MinimizationProblem, start: &[f64]) -> Vec<Vec<f64>> {
        let n = start.len();
        let lower = problem.lower_bounds();
        let upper = problem.upper_bounds();

        let mut simplex = Vec::with_capacity(n + 1);
        simplex.push(start.to_vec());
        for i in 0..n {
            let step = self.initial_step * (upper[i] - lower[i]);
            let mut vertex = start.to_vec();
            // Step inward when the start sits on the upper face.
            vertex[i] = if start[i] + step <= upper[i] {
                start[i] + step
            } else {
                start[i] - step
            };
            problem.clamp(&mut vertex);
            simplex.push(vertex);
        }
        simplex
    }
}

impl LocalMethod for NelderMead {
    fn name(&self) -> &str {
        "nelder_mead"
    }

    fn refine(&self, problem: &MinimizationProblem, start: &[f64]) -> Outcome {
        let n = start.len();
        if n != problem.dimension() {
            return Outcome::NotFound;
        }
        let mut x0 = start.to_vec();
        problem.clamp(&mut x0);

        let mut simplex = self.initial_simplex(problem, &x0);
        let mut values: Vec<f64> = simplex.iter().map(|v| problem.evaluate(v)).collect();
        let mut evaluations = n + 1;

        let trial = |mut x: Vec<f64>, evaluations: &mut usize| -> (Vec<f64>, f64) {
            problem.clamp(&mut x);
            *evaluations += 1;
            let f = problem.evaluate(&x);
            (x, f)
        };

        let mut iterations = 0;
        let mut converged = false;
        for _ in 0..self.max_iterations {
            sort_simplex(&mut simplex, &mut values);

            if evaluations >= self.max_evaluations {
                break;
            }

            let f_range = values[n] - values[0];
            let diameter = (1..=n)
                .map(|i| distance(&simplex[0], &simplex[i]))
                .fold(0.0_f64, f64::max);
            // A collapsed simplex cannot move any further.
            if (f_range <= self.f_tol && diameter <= self.x_tol) || diameter == 0.0 {
                converged = true;
                break;
            }
            iterations += 1;

            let mut centroid = vec![0.0; n];
            for vertex in simplex.iter().take(n) {
                for j in 0..n {
                    centroid[j] += vertex[j];
                }
            }
            for c in &mut centroid {
                *c /= n as f64;
            }

            let (x_r, f_r) = trial(along(&centroid, &simplex[n], ALPHA), &mut evaluations);

            if f_r < values[0] {
                let (x_e, f_e) = trial(along(&centroid, &x_r, -GAMMA), &mut evaluations);
                if f_e < f_r {
                    simplex[n] = x_e;
                    values[n] = f_e;
                } else {
                    simplex[n] = x_r;
                    values[n] = f_r;
                }
                continue;
            }

            if f_r < values[n - 1] {
                simplex[n] = x_r;
                values[n] = f_r;
                continue;
            }

            let (x_c, f_c, accept) = if f_r < values[n] {
                let (x_c, f_c) = trial(along(&centroid, &x_r, -RHO), &mut evaluations);
                let ok = f_c <= f_r;
                (x_c, f_c, ok)
            } else {
                let (x_c, f_c) = trial(along(&centroid, &simplex[n], -RHO), &mut evaluations);
                let ok = f_c < values[n];
                (x_c, f_c, ok)
            };

            if accept {
                simplex[n] = x_c;
                values[n] = f_c;
                continue;
            }

            // Shrink towards the best vertex.
            let best = simplex[0].clone();
            for i in 1..=n {
                let shrunk: Vec<f64> = best
                    .iter()
                    .zip(&simplex[i])
                    .map(|(&b, &v)| b + SIGMA * (v - b))
                    .collect();
                let (x_s, f_s) = trial(shrunk, &mut evaluations);
                simplex[i] = x_s;
                values[i] = f_s;
            }
        }

        sort_simplex(&mut simplex, &mut values);
        if values[0].is_finite() {
            let diagnostics = LocalDiagnostics {
                iterations,
                evaluations,
                converged,
            };
            LocationValue::new(simplex.swap_remove(0), values[0])
                .with_diagnostics(diagnostics)
                .into()
        } else {
            Outcome::NotFound
        }
    }
}

/// `from + coef * (from - towards)`.
fn along(from: &[f64], towards: &[f64], coef: f64) -> Vec<f64> {
    from.iter()
        .zip(towards)
        .map(|(&c, &w)| c + coef * (c - w))
        .collect()
}

/// Reorders vertices by ascending value; the sort is stable.
fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn non_negative(tol: f64) -> f64 {
    if tol.is_finite() {
        tol.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rosenbrock() -> MinimizationProblem {
        MinimizationProblem::new(
            |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2),
            vec![-2.0, -2.0],
            vec![2.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn test_sphere_converges() {
        let problem = MinimizationProblem::new(
            |x: &[f64]| x.iter().map(|v| (v - 1.0).powi(2)).sum(),
            vec![-2.0; 3],
            vec![2.0; 3],
        )
        .unwrap();
        let outcome = NelderMead::default().refine(&problem, &[-1.5, 0.0, 1.9]);
        assert!(outcome.value() < 1e-8, "value {}", outcome.value());
        for &v in outcome.location().unwrap() {
            assert!((v - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rosenbrock_converges() {
        let outcome = NelderMead::default().refine(&rosenbrock(), &[-1.2, 1.0]);
        assert!(outcome.value() < 1e-6, "value {}", outcome.value());
    }

    #[test]
    fn test_minimum_on_boundary() {
        // Unconstrained minimum at x = 5, box ends at 1.
        let problem =
            MinimizationProblem::new(|x: &[f64]| (x[0] - 5.0).powi(2), vec![-1.0], vec![1.0])
                .unwrap();
        let outcome = NelderMead::default().refine(&problem, &[0.0]);
        let x = outcome.location().unwrap()[0];
        assert!((x - 1.0).abs() < 1e-6, "x = {x}");
        assert!(problem.contains(outcome.location().unwrap()));
    }

    #[test]
    fn test_start_on_upper_face() {
        let problem =
            MinimizationProblem::new(|x: &[f64]| x[0] * x[0], vec![-1.0], vec![1.0]).unwrap();
        let outcome = NelderMead::default().refine(&problem, &[1.0]);
        assert!(outcome.value() < 1e-10);
    }

    #[test]
    fn test_infeasible_everywhere_is_not_found() {
        let problem =
            MinimizationProblem::new(|_: &[f64]| f64::NAN, vec![-1.0], vec![1.0]).unwrap();
        let outcome = NelderMead::default()
            .with_max_iterations(20)
            .refine(&problem, &[0.0]);
        assert!(outcome.is_not_found());
    }

    #[test]
    fn test_wrong_dimension_is_not_found() {
        let outcome = NelderMead::default().refine(&rosenbrock(), &[0.0]);
        assert!(outcome.is_not_found());
    }

    #[test]
    fn test_evaluation_budget_respected() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let problem = MinimizationProblem::new(
            move |x: &[f64]| {
                counter.fetch_add(1, Ordering::Relaxed);
                x.iter().map(|v| v * v).sum()
            },
            vec![-1.0; 2],
            vec![1.0; 2],
        )
        .unwrap();
        NelderMead::default()
            .with_max_evaluations(30)
            .refine(&problem, &[0.7, -0.4]);
        // One iteration may overshoot by at most n + 2 evaluations (shrink).
        assert!(calls.load(Ordering::Relaxed) <= 30 + 4);
    }

    #[test]
    fn test_diagnostics() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let problem = MinimizationProblem::new(
            move |x: &[f64]| {
                counter.fetch_add(1, Ordering::Relaxed);
                x.iter().map(|v| (v - 1.0).powi(2)).sum()
            },
            vec![-2.0; 3],
            vec![2.0; 3],
        )
        .unwrap();
        let start = [-1.5, 0.0, 1.9];

        let lv = NelderMead::default()
            .refine(&problem, &start)
            .into_location_value()
            .unwrap();
        let diagnostics = lv.diagnostics.unwrap();
        assert!(diagnostics.converged);
        assert!(diagnostics.iterations > 0);
        assert_eq!(diagnostics.evaluations, calls.load(Ordering::Relaxed));

        let capped = NelderMead::default()
            .with_max_iterations(3)
            .refine(&problem, &start)
            .into_location_value()
            .unwrap()
            .diagnostics
            .unwrap();
        assert!(!capped.converged);
        assert_eq!(capped.iterations, 3);
    }

    #[test]
    fn test_setters_clamp() {
        let nm = NelderMead::default()
            .with_f_tol(-1.0)
            .with_x_tol(f64::NAN)
            .with_initial_step(3.0);
        assert_eq!(nm.f_tol(), 0.0);
        assert_eq!(nm.x_tol(), 0.0);
        assert_eq!(nm.initial_step(), 1.0);
    }
}
