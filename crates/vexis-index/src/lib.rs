//! Staging index for Vexis.
//!
//! The index is an ordered list of `(path, digest)` entries recording which
//! file contents are queued for the next commit. `add` appends to it, and
//! `commit` snapshots it into the commit record and then clears it.
//!
//! Entries are never deduplicated: staging the same path twice before a
//! commit leaves two entries, in insertion order.
//!
//! # Key Types
//!
//! - [`IndexEntry`] -- A staged `(path, hash)` pair
//! - [`StagingArea`] -- Append/read/clear interface
//! - [`FsIndex`] -- JSON file backend
//! - [`InMemoryIndex`] -- `Vec`-backed store for tests

pub mod entry;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use entry::IndexEntry;
pub use error::{IndexError, IndexResult};
pub use fs::FsIndex;
pub use memory::InMemoryIndex;
pub use traits::StagingArea;
