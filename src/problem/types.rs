//! Problem definition and bound handling.

use crate::error::{ConfigurationError, Result};
use std::fmt;
use std::sync::Arc;

/// Shared, thread-safe objective function.
pub type Objective = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// An objective together with its box bounds.
///
/// Immutable after construction. Cloning is cheap: the objective is shared
/// and only the bound vectors are copied.
///
/// # Examples
///
/// ```
/// use u_multistart::problem::MinimizationProblem;
///
/// // ∑(xᵢ - 1)² over [-2, 2]⁴
/// let problem = MinimizationProblem::new(
///     |x: &[f64]| x.iter().map(|v| (v - 1.0).powi(2)).sum(),
///     vec![-2.0; 4],
///     vec![2.0; 4],
/// )
/// .unwrap();
/// assert_eq!(problem.dimension(), 4);
/// ```
#[derive(Clone)]
pub struct MinimizationProblem {
    objective: Objective,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl MinimizationProblem {
    /// Creates a problem, validating the bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the bound lengths differ, the
    /// bounds are empty, or any `lower[i] >= upper[i]` (non-finite bounds
    /// are rejected as well).
    pub fn new<F>(objective: F, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self::from_shared(Arc::new(objective), lower, upper)
    }

    /// Creates a problem from an already shared objective.
    pub fn from_shared(objective: Objective, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(ConfigurationError::DimensionMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(ConfigurationError::EmptyBounds);
        }
        for (index, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(ConfigurationError::InvalidBound {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self {
            objective,
            lower,
            upper,
        })
    }

    /// Number of coordinates `N`.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn lower_bounds(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper
    }

    /// Returns the shared objective.
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Evaluates the objective at `x`.
    ///
    /// NaN and `-inf` are not usable values and are reported as `+inf`;
    /// so is a point of the wrong length, which the objective is never
    /// called with.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        if x.len() != self.dimension() {
            return f64::INFINITY;
        }
        sanitize((self.objective)(x))
    }

    /// Whether `x` has the right length and lies inside the bounds.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }

    /// Projects `x` onto the box, coordinate by coordinate.
    pub fn clamp(&self, x: &mut [f64]) {
        for (v, (&lo, &hi)) in x.iter_mut().zip(self.lower.iter().zip(&self.upper)) {
            *v = if v.is_nan() { 0.5 * (lo + hi) } else { v.clamp(lo, hi) };
        }
    }

    /// Maps a point of the unit hypercube affinely onto the bounds.
    pub fn scale_unit(&self, unit: &[f64]) -> Vec<f64> {
        unit.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(&u, (&lo, &hi))| (lo + u * (hi - lo)).clamp(lo, hi))
            .collect()
    }

    /// Checks that a starting point has the problem's dimension.
    pub fn check_point(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.dimension() {
            return Err(ConfigurationError::StartDimension {
                expected: self.dimension(),
                got: x.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for MinimizationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinimizationProblem")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish_non_exhaustive()
    }
}

/// Maps unusable objective values to `+inf`.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_nan() || value == f64::NEG_INFINITY {
        f64::INFINITY
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere() -> MinimizationProblem {
        MinimizationProblem::new(
            |x: &[f64]| x.iter().map(|v| v * v).sum(),
            vec![-1.0, -2.0],
            vec![1.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new_ok() {
        let p = sphere();
        assert_eq!(p.dimension(), 2);
        assert_eq!(p.lower_bounds(), &[-1.0, -2.0]);
        assert_eq!(p.upper_bounds(), &[1.0, 2.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = MinimizationProblem::new(|_: &[f64]| 0.0, vec![0.0], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DimensionMismatch { lower: 1, upper: 2 }
        );
    }

    #[test]
    fn test_empty_bounds() {
        let err = MinimizationProblem::new(|_: &[f64]| 0.0, vec![], vec![]).unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyBounds);
    }

    #[test]
    fn test_inverted_bound() {
        let err =
            MinimizationProblem::new(|_: &[f64]| 0.0, vec![0.0, 3.0], vec![1.0, 3.0]).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidBound { index: 1, .. }));
    }

    #[test]
    fn test_infinite_bound_rejected() {
        let err = MinimizationProblem::new(|_: &[f64]| 0.0, vec![f64::NEG_INFINITY], vec![1.0])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidBound { index: 0, .. }));
    }

    #[test]
    fn test_evaluate_sanitizes() {
        let p = MinimizationProblem::new(|x: &[f64]| x[0].ln(), vec![-1.0], vec![1.0]).unwrap();
        assert_eq!(p.evaluate(&[-0.5]), f64::INFINITY); // NaN
        assert_eq!(p.evaluate(&[0.0]), f64::INFINITY); // -inf
        assert_eq!(p.evaluate(&[1.0, 2.0]), f64::INFINITY); // wrong length
        assert!((p.evaluate(&[1.0])).abs() < 1e-15);
    }

    #[test]
    fn test_contains_and_clamp() {
        let p = sphere();
        assert!(p.contains(&[0.5, -2.0]));
        assert!(!p.contains(&[1.5, 0.0]));
        assert!(!p.contains(&[0.0]));

        let mut x = vec![3.0, f64::NAN];
        p.clamp(&mut x);
        assert_eq!(x, vec![1.0, 0.0]);
    }

    #[test]
    fn test_scale_unit() {
        let p = sphere();
        assert_eq!(p.scale_unit(&[0.0, 1.0]), vec![-1.0, 2.0]);
        assert_eq!(p.scale_unit(&[0.5, 0.25]), vec![0.0, -1.0]);
    }

    #[test]
    fn test_check_point() {
        let p = sphere();
        assert!(p.check_point(&[0.0, 0.0]).is_ok());
        assert_eq!(
            p.check_point(&[0.0]).unwrap_err(),
            ConfigurationError::StartDimension {
                expected: 2,
                got: 1
            }
        );
    }
}
