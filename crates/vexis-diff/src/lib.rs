//! Diff engine for Vexis.
//!
//! Compares two versions of a file line by line and partitions them into
//! contiguous runs of unchanged, added, and removed lines.
//!
//! # Key Types
//!
//! - [`LineDiff`] -- The full edit script between two texts
//! - [`DiffRun`] / [`ChangeKind`] -- One contiguous run of lines

pub mod line_diff;

pub use line_diff::{diff_blobs, diff_text, ChangeKind, DiffRun, LineDiff};
