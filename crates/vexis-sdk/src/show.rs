//! Per-commit diff against the parent commit.
//!
//! The whole report is computed before anything is returned, so a caller
//! that prints it never emits partial output for a failing commit.

use serde::Serialize;
use tracing::debug;
use vexis_diff::{diff_blobs, LineDiff};
use vexis_store::ObjectStore;
use vexis_types::ObjectId;

use crate::commit::Commit;
use crate::error::SdkResult;
use crate::history::{find_file_in_commit, load_commit};

/// How a file in a commit relates to the parent commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "diff", rename_all = "snake_case")]
pub enum FileChange {
    /// The commit has no parent.
    FirstCommit,
    /// The parent commit does not list this path.
    NewFile,
    /// The parent has this path; the diff runs from its version to this one.
    Compared(LineDiff),
}

/// One file of a commit with its content and change against the parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub hash: ObjectId,
    /// Full content at this commit, decoded lossily as UTF-8.
    pub content: String,
    pub change: FileChange,
}

/// Everything shown for one commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitDiff {
    pub id: ObjectId,
    pub commit: Commit,
    pub files: Vec<FileReport>,
}

pub(crate) fn commit_diff(store: &dyn ObjectStore, id: &ObjectId) -> SdkResult<CommitDiff> {
    let commit = load_commit(store, id)?;
    let parent = match &commit.parent {
        Some(parent_id) => Some(load_commit(store, parent_id)?),
        None => None,
    };

    let mut files = Vec::with_capacity(commit.files.len());
    for entry in &commit.files {
        let current = store.get(&entry.hash)?;

        let change = match &parent {
            None => FileChange::FirstCommit,
            Some(parent) => match find_file_in_commit(parent, &entry.path) {
                None => FileChange::NewFile,
                Some(previous) => {
                    let old = store.get(&previous.hash)?;
                    FileChange::Compared(diff_blobs(&old, &current))
                }
            },
        };

        files.push(FileReport {
            path: entry.path.clone(),
            hash: entry.hash,
            content: String::from_utf8_lossy(&current).into_owned(),
            change,
        });
    }

    debug!(commit = %id.short_hex(), files = files.len(), "commit diff computed");
    Ok(CommitDiff {
        id: *id,
        commit,
        files,
    })
}
