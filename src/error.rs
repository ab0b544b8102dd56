// ABOUTME: Defines the error type for the dining library using thiserror.
// ABOUTME: Safety violations are panics; only setup and task plumbing errors live here.

/// Top-level error type for the dining library.
#[derive(Debug, thiserror::Error)]
pub enum DiningError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Arbiter unavailable to agent {agent}")]
    ArbiterUnavailable { agent: usize },

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for DiningError {
    fn from(err: tokio::task::JoinError) -> Self {
        DiningError::TaskFailed(err.to_string())
    }
}
