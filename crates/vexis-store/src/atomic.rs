use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace `target` with `data` via a temp file in the same directory.
///
/// The temp file is fsynced and then renamed over the target, so readers see
/// either the old content or the new content, never a torn write.
pub fn atomic_write(target: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
