//! Error types for HEAD operations.

use thiserror::Error;

/// Errors that can occur while reading or writing HEAD.
#[derive(Debug, Error)]
pub enum RefError {
    /// HEAD holds something that is not a digest.
    #[error("invalid HEAD content {content:?}: {reason}")]
    InvalidHead { content: String, reason: String },

    /// I/O error during file-based ref operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for ref operations.
pub type Result<T> = std::result::Result<T, RefError>;
