//! Error types for the index crate.

/// Errors that can occur during index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The index file exists but does not hold a valid entry list.
    #[error("corrupt index: {0}")]
    Corrupt(String),

    /// Serialization error while writing the index.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error reading or rewriting the index file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
