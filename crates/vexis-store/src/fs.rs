use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use vexis_crypto::ContentHasher;
use vexis_types::ObjectId;

use crate::atomic::atomic_write;
use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// Filesystem object store: one file per object under a flat directory.
///
/// The filename is the full hex digest and the file holds the raw bytes.
/// New objects are written through a temp file and renamed into place.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    dir: PathBuf,
    verify_on_read: bool,
}

impl FsObjectStore {
    /// Open a store rooted at `dir`. The directory is not created.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            verify_on_read: true,
        }
    }

    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir)?;
        Ok(store)
    }

    /// Whether reads re-hash the content and reject mismatches.
    pub fn with_verification(mut self, verify_on_read: bool) -> Self {
        self.verify_on_read = verify_on_read;
        self
    }

    /// The directory holding the object files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.dir.join(id.to_hex())
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let data = match fs::read(self.object_path(id)) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if self.verify_on_read {
            let computed = ContentHasher::hash(&data);
            if computed != *id {
                warn!(id = %id, computed = %computed, "object content does not match its name");
                return Err(StoreError::HashMismatch { id: *id, computed });
            }
        }

        Ok(Some(data))
    }

    fn write(&self, data: &[u8]) -> StoreResult<ObjectId> {
        let id = ContentHasher::hash(data);
        let path = self.object_path(&id);

        if path.is_file() {
            debug!(id = %id.short_hex(), "object already stored");
            return Ok(id);
        }

        atomic_write(&path, data)?;
        debug!(id = %id.short_hex(), len = data.len(), "object written");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn temp_store() -> (tempfile::TempDir, FsObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::create(dir.path().join("objects")).unwrap();
        (dir, store)
    }

    #[test]
    fn write_creates_flat_hex_file() {
        let (_dir, store) = temp_store();
        let id = store.write(b"hello\n").unwrap();

        let path = store.dir().join(id.to_hex());
        assert!(path.is_file());
        assert_eq!(fs::read(path).unwrap(), b"hello\n");
    }

    #[test]
    fn write_and_read() {
        let (_dir, store) = temp_store();
        let id = store.write(b"content").unwrap();
        assert_eq!(store.get(&id).unwrap(), b"content");
        assert!(store.exists(&id).unwrap());
    }

    #[test]
    fn duplicate_write_returns_same_id() {
        let (_dir, store) = temp_store();
        let id1 = store.write(b"dup").unwrap();
        let id2 = store.write(b"dup").unwrap();
        assert_eq!(id1, id2);
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 1);
    }

    #[test]
    fn missing_object_is_none() {
        let (_dir, store) = temp_store();
        let id = ContentHasher::hash(b"absent");
        assert!(store.read(&id).unwrap().is_none());
        assert!(matches!(store.get(&id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn corrupted_object_is_rejected() {
        let (_dir, store) = temp_store();
        let id = store.write(b"original").unwrap();
        fs::write(store.dir().join(id.to_hex()), b"tampered").unwrap();

        assert!(matches!(
            store.read(&id),
            Err(StoreError::HashMismatch { id: bad, .. }) if bad == id
        ));
    }

    #[test]
    fn corruption_passes_when_verification_disabled() {
        let (_dir, store) = temp_store();
        let store = store.with_verification(false);
        let id = store.write(b"original").unwrap();
        fs::write(store.dir().join(id.to_hex()), b"tampered").unwrap();

        assert_eq!(store.get(&id).unwrap(), b"tampered");
    }

    #[test]
    fn write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path().join("nope"));
        assert!(matches!(store.write(b"x"), Err(StoreError::Io(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn get_returns_what_was_put(content in proptest::collection::vec(any::<u8>(), 0..256)) {
            let (_dir, store) = temp_store();
            let first = store.write(&content).unwrap();
            let second = store.write(&content).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(store.get(&first).unwrap(), content);
        }
    }
}
