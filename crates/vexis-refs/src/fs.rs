use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use vexis_store::atomic_write;
use vexis_types::ObjectId;

use crate::error::{RefError, Result};
use crate::traits::HeadStore;

/// HEAD stored as a plain-text file holding the tip digest.
///
/// Content is trimmed on read so a trailing newline written by another tool
/// does not break parent resolution. Writes never add one.
#[derive(Debug, Clone)]
pub struct FsHeadStore {
    path: PathBuf,
}

impl FsHeadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeadStore for FsHeadStore {
    fn read_head(&self) -> Result<Option<ObjectId>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let content = raw.trim();
        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::from_hex(content)
            .map(Some)
            .map_err(|e| RefError::InvalidHead {
                content: content.to_string(),
                reason: e.to_string(),
            })
    }

    fn write_head(&self, id: &ObjectId) -> Result<()> {
        atomic_write(&self.path, id.to_hex().as_bytes())?;
        debug!(head = %id.short_hex(), "HEAD updated");
        Ok(())
    }
}
