use std::sync::Mutex;

use crate::entry::IndexEntry;
use crate::error::IndexResult;
use crate::traits::StagingArea;

/// `Vec`-backed staging area for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    entries: Mutex<Vec<IndexEntry>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StagingArea for InMemoryIndex {
    fn append(&self, entry: IndexEntry) -> IndexResult<()> {
        self.entries.lock().expect("lock poisoned").push(entry);
        Ok(())
    }

    fn read_all(&self) -> IndexResult<Vec<IndexEntry>> {
        Ok(self.entries.lock().expect("lock poisoned").clone())
    }

    fn clear(&self) -> IndexResult<()> {
        self.entries.lock().expect("lock poisoned").clear();
        Ok(())
    }
}
