//! Quasirandom (low-discrepancy) sampling.
//!
//! Generates the deterministic Sobol points used for the first pass of a
//! multistart run. Sobol points cover the unit hypercube far more evenly
//! than pseudorandom draws, which matters most in higher dimensions where
//! random sampling leaves large regions unexplored.
//!
//! # References
//!
//! - Sobol' (1967), "On the distribution of points in a cube and the
//!   approximate evaluation of integrals"
//! - Burley (2020), "Practical Hash-based Owen Scrambling"

mod sampler;

pub use sampler::SobolSampler;
