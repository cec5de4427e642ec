use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use vexis_store::atomic_write;

use crate::entry::IndexEntry;
use crate::error::{IndexError, IndexResult};
use crate::traits::StagingArea;

/// Staging area persisted as a JSON array in a single file.
///
/// A missing or zero-length file reads as an empty index.
#[derive(Debug, Clone)]
pub struct FsIndex {
    path: PathBuf,
}

impl FsIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, entries: &[IndexEntry]) -> IndexResult<()> {
        let data =
            serde_json::to_vec(entries).map_err(|e| IndexError::Serialization(e.to_string()))?;
        atomic_write(&self.path, &data)?;
        Ok(())
    }
}

impl StagingArea for FsIndex {
    fn append(&self, entry: IndexEntry) -> IndexResult<()> {
        let mut entries = self.read_all()?;
        debug!(path = %entry.path, hash = %entry.hash.short_hex(), "staging entry");
        entries.push(entry);
        self.save(&entries)
    }

    fn read_all(&self) -> IndexResult<Vec<IndexEntry>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&data).map_err(|e| IndexError::Corrupt(e.to_string()))
    }

    fn clear(&self) -> IndexResult<()> {
        self.save(&[])?;
        debug!("index cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexis_types::ObjectId;

    fn temp_index() -> (tempfile::TempDir, FsIndex) {
        let dir = tempfile::tempdir().unwrap();
        let idx = FsIndex::new(dir.path().join("index"));
        (dir, idx)
    }

    fn entry(path: &str, seed: u8) -> IndexEntry {
        IndexEntry::new(path, ObjectId::from_hash([seed; 32]))
    }

    #[test]
    fn missing_file_reads_empty() {
        let (_dir, idx) = temp_index();
        assert!(idx.read_all().unwrap().is_empty());
    }

    #[test]
    fn append_grows_by_one_each_time() {
        let (_dir, idx) = temp_index();
        idx.append(entry("a.txt", 1)).unwrap();
        assert_eq!(idx.len().unwrap(), 1);
        idx.append(entry("a.txt", 1)).unwrap();
        assert_eq!(idx.len().unwrap(), 2);
        idx.append(entry("b.txt", 2)).unwrap();
        assert_eq!(idx.len().unwrap(), 3);
    }

    #[test]
    fn preserves_insertion_order() {
        let (_dir, idx) = temp_index();
        idx.append(entry("z.txt", 1)).unwrap();
        idx.append(entry("a.txt", 2)).unwrap();
        let paths: Vec<_> = idx.read_all().unwrap().into_iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["z.txt", "a.txt"]);
    }

    #[test]
    fn clear_writes_empty_array() {
        let (_dir, idx) = temp_index();
        idx.append(entry("a.txt", 1)).unwrap();
        idx.clear().unwrap();
        assert!(idx.read_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(idx.path()).unwrap(), "[]");
    }

    #[test]
    fn reads_file_written_by_hand() {
        let (_dir, idx) = temp_index();
        let id = ObjectId::from_hash([5; 32]);
        fs::write(
            idx.path(),
            format!(r#"[{{"path":"notes.md","hash":"{}"}}]"#, id.to_hex()),
        )
        .unwrap();
        assert_eq!(idx.read_all().unwrap(), vec![IndexEntry::new("notes.md", id)]);
    }

    #[test]
    fn malformed_file_is_corrupt() {
        let (_dir, idx) = temp_index();
        fs::write(idx.path(), "{not json").unwrap();
        assert!(matches!(idx.read_all(), Err(IndexError::Corrupt(_))));
        assert!(matches!(idx.append(entry("a", 1)), Err(IndexError::Corrupt(_))));
    }
}
