//! High-level API for Vexis.
//!
//! Wires the object store, HEAD, and staging index together into the
//! operations a caller actually uses: `add`, `commit`, `log`, and the
//! per-commit diff. This is the main entry point for the CLI and for
//! applications embedding Vexis.

pub mod commit;
pub mod config;
pub mod error;
pub mod history;
pub mod repository;
pub mod show;

pub use commit::Commit;
pub use config::RepoConfig;
pub use error::{SdkError, SdkResult};
pub use history::{find_file_in_commit, History};
pub use repository::{InitOutcome, Vexis};
pub use show::{CommitDiff, FileChange, FileReport};

// Re-export key types
pub use vexis_diff::{ChangeKind, DiffRun, LineDiff};
pub use vexis_index::IndexEntry;
pub use vexis_types::ObjectId;
