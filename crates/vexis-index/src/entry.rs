//! Index entry type.

use serde::{Deserialize, Serialize};
use vexis_types::ObjectId;

/// A staged file: its path as given to `add` and the digest of its content.
///
/// Serialized as `{"path": ..., "hash": ...}` both in the index file and in
/// the `files` list of a commit record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub path: String,
    pub hash: ObjectId,
}

impl IndexEntry {
    pub fn new(path: impl Into<String>, hash: ObjectId) -> Self {
        Self {
            path: path.into(),
            hash,
        }
    }
}
