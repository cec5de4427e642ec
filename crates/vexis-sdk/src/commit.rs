use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vexis_crypto::ContentHasher;
use vexis_index::IndexEntry;
use vexis_types::ObjectId;

use crate::error::{SdkError, SdkResult};

/// An immutable, self-addressed snapshot of the staging index.
///
/// Serialized as JSON with the field order below; the commit's ID is the
/// digest of exactly those bytes. `parent` is `null` for the root commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub files: Vec<IndexEntry>,
    pub parent: Option<ObjectId>,
}

impl Commit {
    /// Build a commit stamped with the current time.
    pub fn new(message: impl Into<String>, files: Vec<IndexEntry>, parent: Option<ObjectId>) -> Self {
        Self::with_timestamp(Utc::now(), message, files, parent)
    }

    pub fn with_timestamp(
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
        files: Vec<IndexEntry>,
        parent: Option<ObjectId>,
    ) -> Self {
        Self {
            timestamp,
            message: message.into(),
            files,
            parent,
        }
    }

    /// Returns `true` if this commit has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The canonical serialized form written to the object store.
    pub fn to_bytes(&self) -> SdkResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| SdkError::Serialization(e.to_string()))
    }

    /// Decode a record read from the store under `id`.
    pub fn from_bytes(id: &ObjectId, data: &[u8]) -> SdkResult<Self> {
        serde_json::from_slice(data).map_err(|e| SdkError::CorruptRecord {
            id: *id,
            reason: e.to_string(),
        })
    }

    /// The content-addressed ID of this commit.
    pub fn id(&self) -> SdkResult<ObjectId> {
        ContentHasher::hash_json(self).map_err(|e| SdkError::Serialization(e.to_string()))
    }

    /// First entry staged under `path`, in storage order.
    pub fn find_file(&self, path: &str) -> Option<&IndexEntry> {
        self.files.iter().find(|entry| entry.path == path)
    }
}
