//! Error handling module
//!
//! Centralized error types for the command side.

use uuid::Uuid;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types, as command handlers surface them.
///
/// All errors are synchronous and deterministic given the same input and
/// state; none are retried automatically. Retry policy belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed command input (unparseable amount, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Mutation command references an account with no event history
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Open command targets an id that already has events
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(Uuid),

    /// Concurrent modification detected at append time
    #[error("Version conflict: concurrent modification detected")]
    VersionConflict,

    /// Business rule violation from the aggregate
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    /// Event store failure
    #[error("Event store error: {0}")]
    EventStore(crate::event_store::EventStoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<crate::event_store::EventStoreError> for AppError {
    fn from(err: crate::event_store::EventStoreError) -> Self {
        if err.is_concurrency_conflict() {
            AppError::VersionConflict
        } else {
            AppError::EventStore(err)
        }
    }
}
