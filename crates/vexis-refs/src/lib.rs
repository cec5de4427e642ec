//! HEAD pointer management for Vexis.
//!
//! Vexis keeps a single mutable reference: `HEAD`, the digest of the most
//! recently created commit. History is linear, so there are no branches or
//! tags. An absent or empty HEAD means no commit has been made yet.
//!
//! # Modules
//!
//! - [`error`] -- Error types for HEAD operations
//! - [`traits`] -- The [`HeadStore`] trait defining the storage interface
//! - [`fs`] -- Plain-text file backend [`FsHeadStore`]
//! - [`memory`] -- In-memory [`InMemoryHeadStore`] for tests

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{RefError, Result};
pub use fs::FsHeadStore;
pub use memory::InMemoryHeadStore;
pub use traits::HeadStore;
