use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Directory,
    File,
    Other,
}

impl EntryType {
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub entry_type: EntryType,
}

/// Filesystem calls the locator, tree and entry operations are built on.
///
/// Every method is a single host call. Implementations attach the path to
/// their errors; callers decide whether a failure is swallowed or surfaced.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Follows symlinks.
    async fn stat(&self, path: &Path) -> anyhow::Result<EntryType>;

    /// Entry types are taken from the listing itself and do not follow symlinks.
    async fn read_dir(&self, path: &Path) -> anyhow::Result<Vec<DirEntryInfo>>;

    async fn create_dir_all(&self, path: &Path) -> anyhow::Result<()>;

    async fn write(&self, path: &Path, contents: &[u8]) -> anyhow::Result<()>;

    /// Fails if `path` already exists.
    async fn create_new(&self, path: &Path, contents: &[u8]) -> anyhow::Result<()>;

    /// Never overwrites an existing `to`.
    async fn rename(&self, from: &Path, to: &Path) -> anyhow::Result<()>;

    /// Recursive.
    async fn remove(&self, path: &Path, use_trash: bool) -> anyhow::Result<()>;

    async fn exists(&self, path: &Path) -> bool {
        self.stat(path).await.is_ok()
    }
}
