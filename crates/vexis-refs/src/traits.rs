//! The [`HeadStore`] trait defining the HEAD storage interface.

use vexis_types::ObjectId;

use crate::error::Result;

/// Storage backend for the HEAD pointer.
///
/// `commit` is the only writer. Readers are `commit` (to find the parent),
/// `log`, and any traversal that starts from the current tip.
pub trait HeadStore: Send + Sync {
    /// Read the current tip. `Ok(None)` means there are no commits yet.
    fn read_head(&self) -> Result<Option<ObjectId>>;

    /// Point HEAD at `id`.
    fn write_head(&self, id: &ObjectId) -> Result<()>;
}
