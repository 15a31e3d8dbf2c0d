//! Error types for the storage layer.

use library_core::ValidationError;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The submitted record is incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No identifier is left after the current maximum.
    #[error("book identifier space exhausted")]
    IdSpaceExhausted,
}
