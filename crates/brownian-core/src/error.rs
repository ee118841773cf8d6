use thiserror::Error;

/// Errors raised when building a walk.
#[derive(Debug, Error, PartialEq)]
pub enum WalkError {
    #[error("axis probability must lie in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),
}

/// Errors raised by ensemble statistics.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("mean squared displacement of an empty ensemble is undefined")]
    EmptyEnsemble,

    #[error("coordinate sequences differ in length: {x} x-values, {y} y-values")]
    LengthMismatch { x: usize, y: usize },
}
