use thiserror::Error;

use crate::allocation::Allocation;

/// Result type alias for guillo-rs operations.
pub type Result<T> = std::result::Result<T, CutError>;

/// Errors that can occur while consolidating or allocating layouts.
#[derive(Debug, Error)]
pub enum CutError {
    /// Malformed request: non-positive dimensions, duplicate ids, ...
    /// Rejected before any packing takes place.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A layout handed to the engine violates its preconditions
    /// (rectangle outside or taller than its container).
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// The packing oracle failed. Rectangle ownership for the call is ambiguous,
    /// so no partial state is returned.
    #[error("packing oracle failed: {0}")]
    OracleFailure(String),

    /// The allocation loop exceeded its round limit.
    #[error("allocation did not terminate within {limit} rounds (reached {rounds})")]
    NonTermination { rounds: usize, limit: usize },

    /// The time limit expired. Retryable: `partial` holds the containers computed so far,
    /// with every rectangle that was still pending reported as unplaced.
    #[error("time limit exceeded after {elapsed_ms}ms")]
    DeadlineExceeded {
        elapsed_ms: u64,
        partial: Box<Allocation>,
    },
}

impl CutError {
    /// Whether the caller may retry the request (possibly with a larger time budget).
    pub fn is_retryable(&self) -> bool {
        matches!(self, CutError::DeadlineExceeded { .. })
    }
}
