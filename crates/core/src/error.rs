//! Error types.

/// Error type for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors that can occur while configuring a progress counter.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Decimal precision below zero
    #[error("number of digits must be non-negative ({0})")]
    InvalidDigits(i32),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration document failed to parse
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
