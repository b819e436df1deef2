//! Candidate screening.
//!
//! Evaluates the objective at every quasirandom point, ranks the points by
//! value, and keeps the best fraction as starting candidates for the
//! iterative phase.
//!
//! Evaluations are independent of each other. With the `parallel` feature
//! they run on the rayon thread pool; results are re-associated with their
//! sampling index before sorting, so the ranking never depends on the
//! order in which evaluations complete.

mod screener;

pub use screener::{retained_count, Candidate, CandidateScreener, RankedSet};
