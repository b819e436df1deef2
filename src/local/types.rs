//! Outcomes and the local method capability.

use crate::problem::MinimizationProblem;
use std::fmt;

/// Work done by a local search that produced a [`LocationValue`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalDiagnostics {
    pub iterations: usize,
    pub evaluations: usize,
    /// The method's own stopping tolerance was met before its budget ran
    /// out.
    pub converged: bool,
}

/// A location with the objective value found there.
///
/// `diagnostics` is filled in by the built-in local methods and is `None`
/// for plain evaluations and for callables that do not report it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationValue {
    pub location: Vec<f64>,
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub diagnostics: Option<LocalDiagnostics>,
}

impl LocationValue {
    pub fn new(location: Vec<f64>, value: f64) -> Self {
        Self {
            location,
            value,
            diagnostics: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: LocalDiagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}

/// Result of a local search or of a single objective evaluation.
///
/// `NotFound` marks infeasibility or a failed search. Wherever outcomes
/// are compared it counts as `value = +inf`; it is never an error.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Found(LocationValue),
    #[default]
    NotFound,
}

impl Outcome {
    pub fn found(location: Vec<f64>, value: f64) -> Self {
        Outcome::Found(LocationValue::new(location, value))
    }

    /// Objective value, `+inf` for `NotFound` or a NaN value.
    pub fn value(&self) -> f64 {
        match self {
            Outcome::Found(lv) if !lv.value.is_nan() => lv.value,
            _ => f64::INFINITY,
        }
    }

    pub fn location(&self) -> Option<&[f64]> {
        match self {
            Outcome::Found(lv) => Some(&lv.location),
            Outcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        !self.is_found()
    }

    /// Strictly lower value than `other`.
    pub fn improves_on(&self, other: &Outcome) -> bool {
        self.value() < other.value()
    }

    pub fn into_location_value(self) -> Option<LocationValue> {
        match self {
            Outcome::Found(lv) => Some(lv),
            Outcome::NotFound => None,
        }
    }
}

impl From<Option<LocationValue>> for Outcome {
    fn from(value: Option<LocationValue>) -> Self {
        value.map_or(Outcome::NotFound, Outcome::Found)
    }
}

impl From<LocationValue> for Outcome {
    fn from(value: LocationValue) -> Self {
        Outcome::Found(value)
    }
}

/// A local search: given a problem and a starting point, return an
/// [`Outcome`].
///
/// Implement this for a type to get value-type dispatch (the type carries
/// the solver's options). Closures with the signature
/// `Fn(&MinimizationProblem, &[f64]) -> Outcome` implement it too, so a
/// search can be written inline.
///
/// Implementations must not retry on failure. Returning
/// [`Outcome::NotFound`] is the way to report that nothing usable was
/// found.
///
/// # Examples
///
/// ```
/// use u_multistart::local::{LocalMethod, Outcome};
/// use u_multistart::problem::MinimizationProblem;
///
/// // "Local search" that only evaluates the start.
/// let evaluate_only = |p: &MinimizationProblem, x: &[f64]| {
///     Outcome::found(x.to_vec(), p.evaluate(x))
/// };
///
/// let problem =
///     MinimizationProblem::new(|x: &[f64]| x[0] * x[0], vec![-1.0], vec![1.0]).unwrap();
/// assert_eq!(evaluate_only.refine(&problem, &[0.5]).value(), 0.25);
/// ```
pub trait LocalMethod: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str {
        "callable"
    }

    /// Runs a local search from `start`.
    ///
    /// `start` has the problem's dimension and lies within its bounds.
    fn refine(&self, problem: &MinimizationProblem, start: &[f64]) -> Outcome;
}

impl fmt::Debug for dyn LocalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalMethod")
            .field("name", &self.name())
            .finish()
    }
}

impl<F> LocalMethod for F
where
    F: Fn(&MinimizationProblem, &[f64]) -> Outcome + Send + Sync,
{
    fn refine(&self, problem: &MinimizationProblem, start: &[f64]) -> Outcome {
        self(problem, start)
    }
}
