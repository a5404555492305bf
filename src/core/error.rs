use thiserror::Error;

/// Errors surfaced by the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    #[error("Matching cancelled")]
    Cancelled,
}
