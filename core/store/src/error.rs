//! Error types for the skill journal store.

/// Store error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure or rolled-back transaction
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Input rejected before any write
    #[error("Validation error: {0}")]
    Validation(String),
    /// Domain rule violated
    #[error("Constraint error: {0}")]
    Constraint(String),
    /// Referenced row does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Store result type
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
