use vexis_types::ObjectId;

/// BLAKE3 content hasher.
///
/// The object store is kind-agnostic, so blobs and commit records share one
/// hash function: the digest of a commit is the digest of its serialized
/// bytes, exactly as they are written to the store.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> ObjectId {
        ObjectId::from_hash(*blake3::hash(data).as_bytes())
    }

    /// Hash a serializable value through its JSON encoding.
    pub fn hash_json<T: serde::Serialize>(value: &T) -> Result<ObjectId, HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(Self::hash(&data))
    }

    /// Verify that data produces the expected object ID.
    pub fn verify(data: &[u8], expected: &ObjectId) -> bool {
        Self::hash(data) == *expected
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
