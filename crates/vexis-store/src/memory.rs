use std::collections::HashMap;
use std::sync::RwLock;

use vexis_crypto::ContentHasher;
use vexis_types::ObjectId;

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. All objects are held in memory behind a
/// `RwLock`. Objects are cloned on read/write.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Replace the bytes stored under `id` without re-hashing.
    ///
    /// Only useful for simulating on-disk corruption in tests.
    #[cfg(any(test, feature = "test-support"))]
    pub fn overwrite_raw(&self, id: ObjectId, data: Vec<u8>) {
        self.objects.write().expect("lock poisoned").insert(id, data);
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn write(&self, data: &[u8]) -> StoreResult<ObjectId> {
        let id = ContentHasher::hash(data);
        let mut map = self.objects.write().expect("lock poisoned");
        map.entry(id).or_insert_with(|| data.to_vec());
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use proptest::prelude::*;

    #[test]
    fn write_and_read() {
        let store = InMemoryObjectStore::new();
        let id = store.write(b"hello world").unwrap();
        assert_eq!(store.read(&id).unwrap().unwrap(), b"hello world");
    }

    #[test]
    fn duplicate_write_is_idempotent() {
        let store = InMemoryObjectStore::new();
        let id1 = store.write(b"same").unwrap();
        let id2 = store.write(b"same").unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_object_reads_none() {
        let store = InMemoryObjectStore::new();
        let id = ContentHasher::hash(b"never written");
        assert!(store.read(&id).unwrap().is_none());
        assert!(!store.exists(&id).unwrap());
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = ContentHasher::hash(b"never written");
        assert!(matches!(store.get(&id), Err(StoreError::NotFound(x)) if x == id));
    }

    #[test]
    fn empty_content_is_storable() {
        let store = InMemoryObjectStore::new();
        let id = store.write(b"").unwrap();
        assert_eq!(store.get(&id).unwrap(), Vec::<u8>::new());
    }

    proptest! {
        #[test]
        fn get_returns_what_was_put(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let store = InMemoryObjectStore::new();
            let first = store.write(&content).unwrap();
            let second = store.write(&content).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(store.get(&first).unwrap(), content);
        }
    }
}
