use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SdkError, SdkResult};

/// Name of the metadata directory created under the repository root.
pub const DEFAULT_DIR_NAME: &str = ".vexis";

/// Name of the optional settings file inside the metadata directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where a repository lives and how it is opened.
///
/// The persisted layout under `<root>/<dir_name>` is:
///
/// ```text
/// objects/   one file per object, named by hex digest
/// HEAD       tip commit digest, or empty
/// index      JSON array of staged {path, hash} entries
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub root: PathBuf,
    pub dir_name: String,
    /// Re-hash objects on read and reject content that does not match.
    pub verify_on_read: bool,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            dir_name: DEFAULT_DIR_NAME.to_string(),
            verify_on_read: true,
        }
    }
}

/// Settings that may be overridden from `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    verify_on_read: Option<bool>,
}

impl RepoConfig {
    /// Defaults rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Defaults rooted at `root`, overridden by `config.toml` if present.
    pub fn load(root: impl Into<PathBuf>) -> SdkResult<Self> {
        let mut config = Self::new(root);
        let path = config.config_path();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(config),
            Err(e) => return Err(e.into()),
        };

        let file: FileConfig = toml::from_str(&text)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))?;
        if let Some(verify) = file.verify_on_read {
            config.verify_on_read = verify;
        }
        debug!(path = %path.display(), "loaded repository config");
        Ok(config)
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(&self.dir_name)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.meta_dir().join("objects")
    }

    pub fn head_path(&self) -> PathBuf {
        self.meta_dir().join("HEAD")
    }

    pub fn index_path(&self) -> PathBuf {
        self.meta_dir().join("index")
    }

    pub fn config_path(&self) -> PathBuf {
        self.meta_dir().join(CONFIG_FILE_NAME)
    }

    /// Returns `true` if `path` names the metadata directory.
    pub fn is_meta_dir(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == self.dir_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let c = RepoConfig::new("/repo");
        assert_eq!(c.meta_dir(), PathBuf::from("/repo/.vexis"));
        assert_eq!(c.objects_dir(), PathBuf::from("/repo/.vexis/objects"));
        assert_eq!(c.head_path(), PathBuf::from("/repo/.vexis/HEAD"));
        assert_eq!(c.index_path(), PathBuf::from("/repo/.vexis/index"));
        assert!(c.verify_on_read);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = RepoConfig::load(dir.path()).unwrap();
        assert_eq!(c, RepoConfig::new(dir.path()));
    }

    #[test]
    fn load_reads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let meta = dir.path().join(DEFAULT_DIR_NAME);
        fs::create_dir_all(&meta).unwrap();
        fs::write(meta.join(CONFIG_FILE_NAME), "verify_on_read = false\n").unwrap();

        let c = RepoConfig::load(dir.path()).unwrap();
        assert!(!c.verify_on_read);
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let meta = dir.path().join(DEFAULT_DIR_NAME);
        fs::create_dir_all(&meta).unwrap();
        fs::write(meta.join(CONFIG_FILE_NAME), "compression = true\n").unwrap();

        assert!(matches!(RepoConfig::load(dir.path()), Err(SdkError::Config(_))));
    }

    #[test]
    fn recognizes_meta_dir() {
        let c = RepoConfig::default();
        assert!(c.is_meta_dir(Path::new("some/where/.vexis")));
        assert!(!c.is_meta_dir(Path::new("some/where/src")));
    }
}
