//! Error types for the termination decision pipeline.

use thiserror::Error;

/// Result type alias for decision operations.
pub type DecisionResult<T> = Result<T, DecisionError>;

/// Errors that abort a decision before any output is produced.
///
/// None of these are retryable; the caller is expected to surface them so
/// the orchestrator can fall back to its default termination policy. A
/// bucket that cannot be fully satisfied is not an error — it is reported
/// as a shortfall in the decision output.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("malformed scale-in event: {0}")]
    MalformedEvent(String),

    #[error("event exceeds instance limit: {count} instances, limit is {limit}")]
    OversizedEvent { count: usize, limit: usize },
}
