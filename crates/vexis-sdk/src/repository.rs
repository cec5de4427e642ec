use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};
use vexis_index::{FsIndex, InMemoryIndex, IndexEntry, StagingArea};
use vexis_refs::{FsHeadStore, HeadStore, InMemoryHeadStore};
use vexis_store::{FsObjectStore, InMemoryObjectStore, ObjectStore};
use vexis_types::ObjectId;
use walkdir::WalkDir;

use crate::commit::Commit;
use crate::config::RepoConfig;
use crate::error::{SdkError, SdkResult};
use crate::history::{load_commit, History};
use crate::show::{commit_diff, CommitDiff};

/// Result of [`Vexis::init`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyInitialized,
}

/// High-level Vexis repository API.
pub struct Vexis {
    config: RepoConfig,
    store: Arc<dyn ObjectStore>,
    head: Arc<dyn HeadStore>,
    index: Arc<dyn StagingArea>,
}

impl std::fmt::Debug for Vexis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vexis")
            .field("root", &self.config.root)
            .field("dir_name", &self.config.dir_name)
            .finish()
    }
}

impl Vexis {
    /// Create the on-disk layout and open the repository.
    ///
    /// Existing files are left untouched; if nothing had to be created the
    /// outcome is [`InitOutcome::AlreadyInitialized`].
    pub fn init(config: RepoConfig) -> SdkResult<(Self, InitOutcome)> {
        fs::create_dir_all(config.objects_dir())?;
        let created_head = create_new(&config.head_path(), b"")?;
        let created_index = create_new(&config.index_path(), b"[]")?;

        let outcome = if created_head || created_index {
            info!(path = %config.meta_dir().display(), "initialized repository");
            InitOutcome::Created
        } else {
            info!(path = %config.meta_dir().display(), "repository already initialized");
            InitOutcome::AlreadyInitialized
        };

        Ok((Self::open(config)?, outcome))
    }

    /// Open an initialized repository with filesystem backends.
    pub fn open(config: RepoConfig) -> SdkResult<Self> {
        if !config.objects_dir().is_dir() {
            return Err(SdkError::NotInitialized(config.root.display().to_string()));
        }

        let store = FsObjectStore::new(config.objects_dir()).with_verification(config.verify_on_read);
        let head = FsHeadStore::new(config.head_path());
        let index = FsIndex::new(config.index_path());

        Ok(Self::with_backends(
            config,
            Arc::new(store),
            Arc::new(head),
            Arc::new(index),
        ))
    }

    /// A repository held entirely in memory.
    pub fn in_memory() -> Self {
        Self::with_backends(
            RepoConfig::default(),
            Arc::new(InMemoryObjectStore::new()),
            Arc::new(InMemoryHeadStore::new()),
            Arc::new(InMemoryIndex::new()),
        )
    }

    /// Assemble a repository from explicit backends.
    pub fn with_backends(
        config: RepoConfig,
        store: Arc<dyn ObjectStore>,
        head: Arc<dyn HeadStore>,
        index: Arc<dyn StagingArea>,
    ) -> Self {
        Self {
            config,
            store,
            head,
            index,
        }
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Digest of the current tip, or `None` before the first commit.
    pub fn head(&self) -> SdkResult<Option<ObjectId>> {
        Ok(self.head.read_head()?)
    }

    /// Entries currently staged, in insertion order.
    pub fn staged(&self) -> SdkResult<Vec<IndexEntry>> {
        Ok(self.index.read_all()?)
    }

    // ---- Content operations ----

    pub fn write_blob(&self, data: &[u8]) -> SdkResult<ObjectId> {
        Ok(self.store.write(data)?)
    }

    /// Raw bytes of any stored object.
    pub fn read_object(&self, id: &ObjectId) -> SdkResult<Vec<u8>> {
        Ok(self.store.get(id)?)
    }

    // ---- Staging ----

    /// Store `content` as a blob and stage it under `path`.
    pub fn stage_bytes(&self, path: &str, content: &[u8]) -> SdkResult<ObjectId> {
        let id = self.store.write(content)?;
        self.index.append(IndexEntry::new(path, id))?;
        debug!(path, hash = %id.short_hex(), "staged");
        Ok(id)
    }

    /// Read the file at `path` and stage its current content.
    pub fn stage_file(&self, path: &Path) -> SdkResult<ObjectId> {
        let content = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SdkError::FileNotFound(path.display().to_string()),
            _ => SdkError::Io(e),
        })?;
        self.stage_bytes(&path_key(path), &content)
    }

    /// Stage a file, or every regular file beneath a directory.
    ///
    /// Directory entries are visited in name order and the metadata
    /// directory is skipped. Returns the staged `(path, digest)` pairs.
    pub fn stage_path(&self, path: &Path) -> SdkResult<Vec<(String, ObjectId)>> {
        if !path.is_dir() {
            let id = self.stage_file(path)?;
            return Ok(vec![(path_key(path), id)]);
        }

        let mut staged = Vec::new();
        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && self.config.is_meta_dir(e.path())));

        for entry in walker {
            let entry = entry.map_err(|e| SdkError::Io(e.into()))?;
            if entry.file_type().is_file() {
                let id = self.stage_file(entry.path())?;
                staged.push((path_key(entry.path()), id));
            }
        }
        Ok(staged)
    }

    // ---- Commits ----

    /// Snapshot the staging index into a new commit and advance HEAD.
    ///
    /// Steps run in this order: write the commit object, point HEAD at it,
    /// clear the index. They are not transactional. A crash after the first
    /// step leaves an unreachable object; a crash after the second leaves the
    /// old entries staged for the next commit.
    pub fn commit(&self, message: &str) -> SdkResult<ObjectId> {
        let files = self.index.read_all()?;
        let parent = self.head.read_head()?;
        let commit = Commit::new(message, files, parent);

        let bytes = commit.to_bytes()?;
        let id = self.store.write(&bytes)?;
        debug!(commit = %id.short_hex(), "commit object written");

        self.head.write_head(&id)?;
        self.index.clear()?;

        info!(
            commit = %id.short_hex(),
            files = commit.files.len(),
            root = commit.is_root(),
            "commit created"
        );
        Ok(id)
    }

    pub fn load_commit(&self, id: &ObjectId) -> SdkResult<Commit> {
        load_commit(self.store.as_ref(), id)
    }

    /// Turn user input into a commit digest.
    ///
    /// Accepts a full hex digest or `HEAD`. Anything that cannot name a
    /// commit is reported as `CommitNotFound`.
    pub fn resolve_commit(&self, rev: &str) -> SdkResult<ObjectId> {
        let rev = rev.trim();
        if rev.eq_ignore_ascii_case("HEAD") {
            return self
                .head()?
                .ok_or_else(|| SdkError::CommitNotFound("HEAD".to_string()));
        }
        ObjectId::from_hex(rev).map_err(|_| SdkError::CommitNotFound(rev.to_string()))
    }

    // ---- History ----

    /// Walk from HEAD to the root commit.
    pub fn history(&self) -> SdkResult<History<'_>> {
        Ok(self.walk_from(self.head()?))
    }

    pub fn walk_from(&self, start: Option<ObjectId>) -> History<'_> {
        History::new(self.store.as_ref(), start)
    }

    /// Up to `limit` commits from HEAD, newest first.
    pub fn log(&self, limit: Option<usize>) -> SdkResult<Vec<(ObjectId, Commit)>> {
        self.history()?
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Every file of the commit with its diff against the parent.
    pub fn show_commit_diff(&self, id: &ObjectId) -> SdkResult<CommitDiff> {
        commit_diff(self.store.as_ref(), id)
    }
}

/// Create `path` holding `content` unless it already exists.
fn create_new(path: &Path, content: &[u8]) -> SdkResult<bool> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(content)?;
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// The path string recorded in the index.
///
/// `.` components are dropped so that `./a.txt` from a directory walk and
/// `a.txt` named directly map to the same key.
fn path_key(path: &Path) -> String {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    normalized.to_string_lossy().into_owned()
}
