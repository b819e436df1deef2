//! Configuration errors.
//!
//! Only malformed problems and malformed method configurations are errors.
//! A candidate that cannot be evaluated or refined is not: it is carried
//! through the run as [`Outcome::NotFound`](crate::local::Outcome::NotFound)
//! or as a value of `+inf`.

use thiserror::Error;

/// Errors raised when a problem, sampler, or method is constructed with
/// invalid parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("lower bounds have length {lower} but upper bounds have length {upper}")]
    DimensionMismatch { lower: usize, upper: usize },

    #[error("bounds are empty, the problem needs at least one dimension")]
    EmptyBounds,

    #[error("invalid bounds at index {index}: lower {lower} must be finite and below upper {upper}")]
    InvalidBound { index: usize, lower: f64, upper: f64 },

    #[error("quasirandom_N must be at least 1")]
    ZeroPoints,

    #[error("keep_ratio must be in (0, 1], got {0}")]
    InvalidKeepRatio(f64),

    #[error("weight bounds must satisfy 0 <= θ_min <= θ_max <= 1, got θ_min = {min}, θ_max = {max}")]
    InvalidWeightBounds { min: f64, max: f64 },

    #[error("θ_pow must be finite and positive, got {0}")]
    InvalidWeightPower(f64),

    #[error("no local method registered under {0:?}")]
    UnknownLocalMethod(String),

    #[error("starting point has length {got}, problem dimension is {expected}")]
    StartDimension { expected: usize, got: usize },
}

/// Result alias for fallible construction.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
