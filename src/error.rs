//! Error taxonomy for the planning pipeline.
//!
//! The pipeline never retries and never returns partial results: a stage
//! either completes with an invariant-respecting value or fails with one of
//! these variants. Retrying flaky collaborators (geocoding, persistence) is
//! the caller's job.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// Malformed input: out-of-range reference coordinate, non-positive
    /// radius, empty distance matrix, depot index out of bounds.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Fewer filtered POIs than the requested minimum. Kept distinct from
    /// `Validation` so callers can tell the user to widen the radius or add
    /// categories instead of showing a generic failure.
    #[error("not enough points of interest: {available} available, {required} required")]
    InsufficientData { available: usize, required: usize },

    /// The route solver could not build any tour. Only a malformed matrix
    /// triggers this; a well-formed matrix always yields a tour.
    #[error("no tour exists: {0}")]
    NoSolution(String),
}

impl PlannerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn no_solution(message: impl Into<String>) -> Self {
        Self::NoSolution(message.into())
    }
}
