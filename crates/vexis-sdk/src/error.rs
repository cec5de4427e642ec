use thiserror::Error;
use vexis_types::ObjectId;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("repository not initialized at {0}")]
    NotInitialized(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("commit not found: {0}")]
    CommitNotFound(String),

    #[error("corrupt commit record {id}: {reason}")]
    CorruptRecord { id: ObjectId, reason: String },

    #[error("history revisits commit {0}")]
    CycleDetected(ObjectId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store error: {0}")]
    Store(#[from] vexis_store::StoreError),

    #[error("ref error: {0}")]
    Ref(#[from] vexis_refs::RefError),

    #[error("index error: {0}")]
    Index(#[from] vexis_index::IndexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
