//! Evaluation, ranking, and pruning of sampled points.

use crate::error::{ConfigurationError, Result};
use crate::local::{LocationValue, Outcome};
use crate::problem::MinimizationProblem;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;

/// A sampled point with its objective value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Position in the sampling order.
    pub index: usize,

    pub point: Vec<f64>,

    /// Objective value; `+inf` for failed or non-finite evaluations.
    pub value: f64,
}

impl Candidate {
    /// The candidate as an unrefined outcome at its own location.
    ///
    /// An infinite value means the point was infeasible, which is
    /// [`Outcome::NotFound`].
    pub fn to_outcome(&self) -> Outcome {
        if self.value.is_finite() {
            Outcome::Found(LocationValue::new(self.point.clone(), self.value))
        } else {
            Outcome::NotFound
        }
    }
}

/// Retained candidates, best first.
///
/// Created once by [`CandidateScreener::screen`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSet {
    retained: Vec<Candidate>,
    screened: usize,
    best_pruned: Option<f64>,
}

impl RankedSet {
    pub fn len(&self) -> usize {
        self.retained.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.retained
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.retained.iter()
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.retained.first()
    }

    /// Number of points that were evaluated.
    pub fn screened(&self) -> usize {
        self.screened
    }

    /// Lowest value among the discarded points, if any were discarded.
    pub fn best_pruned_value(&self) -> Option<f64> {
        self.best_pruned
    }
}

impl<'a> IntoIterator for &'a RankedSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.retained.iter()
    }
}

/// Number of points kept from `count`: `ceil(keep_ratio * count)`, at least 1.
///
/// The product is lowered by `1e-9` before rounding up, so a product that
/// is an integer up to floating-point error keeps that integer
/// (`0.7 * 10` keeps 7, not 8). A product exceeding an integer by at most
/// `1e-9` therefore rounds down to it. Zero points keep zero.
pub fn retained_count(keep_ratio: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    // Absorb rounding in the product, e.g. 0.7 * 10 = 7.000000000000001.
    let kept = (keep_ratio * count as f64 - 1e-9).ceil() as usize;
    kept.clamp(1, count)
}

/// Evaluates, ranks, and prunes sampled points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScreener {
    keep_ratio: f64,
    parallel: bool,
}

impl CandidateScreener {
    /// Creates a screener keeping the best `keep_ratio` fraction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidKeepRatio`] unless
    /// `0 < keep_ratio <= 1`.
    pub fn new(keep_ratio: f64) -> Result<Self> {
        if !(keep_ratio > 0.0 && keep_ratio <= 1.0) {
            return Err(ConfigurationError::InvalidKeepRatio(keep_ratio));
        }
        Ok(Self {
            keep_ratio,
            parallel: false,
        })
    }

    /// Evaluates on the rayon pool when the `parallel` feature is enabled.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn keep_ratio(&self) -> f64 {
        self.keep_ratio
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Evaluates every point and keeps the best fraction.
    ///
    /// The sort is stable, so equal values stay in sampling order.
    pub fn screen(&self, problem: &MinimizationProblem, points: Vec<Vec<f64>>) -> RankedSet {
        let screened = points.len();
        let mut candidates = self.evaluate(problem, points);
        candidates.sort_by(compare_candidates);

        let keep = retained_count(self.keep_ratio, screened);
        let best_pruned = candidates.get(keep).map(|c| c.value);
        candidates.truncate(keep);

        RankedSet {
            retained: candidates,
            screened,
            best_pruned,
        }
    }

    fn evaluate(&self, problem: &MinimizationProblem, points: Vec<Vec<f64>>) -> Vec<Candidate> {
        let make = |(index, point): (usize, Vec<f64>)| {
            let value = problem.evaluate(&point);
            Candidate {
                index,
                point,
                value,
            }
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            // `collect` on an indexed parallel iterator preserves input order.
            return points.into_par_iter().enumerate().map(make).collect();
        }

        points.into_iter().enumerate().map(make).collect()
    }
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    // Values are never NaN after `MinimizationProblem::evaluate`.
    a.value
        .partial_cmp(&b.value)
        .unwrap_or(Ordering::Equal)
        .then(a.index.cmp(&b.index))
}
