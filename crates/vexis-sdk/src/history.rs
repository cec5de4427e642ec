//! Lazy traversal of the parent-linked commit chain.

use std::collections::HashSet;

use vexis_index::IndexEntry;
use vexis_store::ObjectStore;
use vexis_types::ObjectId;

use crate::commit::Commit;
use crate::error::{SdkError, SdkResult};

/// Load and decode the commit stored under `id`.
pub(crate) fn load_commit(store: &dyn ObjectStore, id: &ObjectId) -> SdkResult<Commit> {
    let data = store
        .read(id)?
        .ok_or_else(|| SdkError::CommitNotFound(id.to_hex()))?;
    Commit::from_bytes(id, &data)
}

/// Iterator over commits from a starting digest back to the root.
///
/// Each step loads one record from the store. The first error (missing
/// object, undecodable record, or a digest seen twice) is yielded and ends
/// the walk.
pub struct History<'a> {
    store: &'a dyn ObjectStore,
    next: Option<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'a> History<'a> {
    /// Walk from `start`; `None` yields nothing.
    pub fn new(store: &'a dyn ObjectStore, start: Option<ObjectId>) -> Self {
        Self {
            store,
            next: start,
            seen: HashSet::new(),
        }
    }
}

impl Iterator for History<'_> {
    type Item = SdkResult<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;

        if !self.seen.insert(id) {
            return Some(Err(SdkError::CycleDetected(id)));
        }

        match load_commit(self.store, &id) {
            Ok(commit) => {
                self.next = commit.parent;
                Some(Ok((id, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// First entry for `path` in `commit`, if the file was part of it.
pub fn find_file_in_commit<'c>(commit: &'c Commit, path: &str) -> Option<&'c IndexEntry> {
    commit.find_file(path)
}
