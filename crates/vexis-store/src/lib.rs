//! Content-addressed object storage for Vexis.
//!
//! This crate implements a hash-keyed object store analogous to git's
//! `.git/objects/` directory, without sharding or compression. Blobs (file
//! contents) and commit records are stored side by side as immutable objects
//! named by the BLAKE3 digest of their bytes.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`] -- one file per object in a flat directory
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writing an object that already exists is a no-op.
//! 3. The store never interprets object contents -- callers know which digest
//!    names a blob and which names a commit.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod atomic;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use atomic::atomic_write;
pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
