use crate::entry::IndexEntry;
use crate::error::IndexResult;

/// The staging area between `add` and `commit`.
///
/// The persisted sequence is read, changed in memory, and rewritten whole.
/// There is no locking: a single writer is assumed.
pub trait StagingArea: Send + Sync {
    /// Append one entry. Prior entries for the same path are kept.
    fn append(&self, entry: IndexEntry) -> IndexResult<()>;

    /// All entries in insertion order.
    fn read_all(&self) -> IndexResult<Vec<IndexEntry>>;

    /// Replace the sequence with an empty one.
    fn clear(&self) -> IndexResult<()>;

    /// Number of staged entries.
    fn len(&self) -> IndexResult<usize> {
        Ok(self.read_all()?.len())
    }

    /// Returns `true` if nothing is staged.
    fn is_empty(&self) -> IndexResult<bool> {
        Ok(self.len()? == 0)
    }
}
