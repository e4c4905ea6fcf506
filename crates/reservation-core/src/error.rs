//! Error types for the reservation commit engine

use thiserror::Error;

/// Errors raised by the Store and repositories.
///
/// `RESOURCE_FULL` / `RESOURCE_CLOSED` are deliberately absent here: they are
/// commit *outcomes*, not faults, and are represented by
/// [`crate::models::RejectionReason`] inside an `Ok(CommitOutcome)`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("invalid state transition: {0}")]
    InvalidState(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("concurrency conflict on resource {0}")]
    ConcurrencyConflict(String),

    #[error("store operation timed out: {0}")]
    Timeout(String),

    #[error("maintenance mode is active")]
    MaintenanceMode,
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// True when the caller may usefully retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::Timeout(_) | CoreError::ConcurrencyConflict(_)
        )
    }
}
