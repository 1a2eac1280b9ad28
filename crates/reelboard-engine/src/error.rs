//! Error types for the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur in the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Storage or core error.
    #[error("Store error: {0}")]
    Store(#[from] reelboard_core::error::CoreError),

    /// Submission rejected before any file mutation.
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    /// Catalog row could not be appended after rating rows were written.
    #[error("Catalog append failed after rating rows were written: {0}")]
    PartialWrite(#[source] reelboard_core::error::CoreError),
}
