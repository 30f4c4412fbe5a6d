use crate::traits::{DirEntryInfo, EntryType, FileSystem};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// `FileSystem` backed by the local disk through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn entry_type(file_type: std::fs::FileType) -> EntryType {
    if file_type.is_dir() {
        EntryType::Directory
    } else if file_type.is_file() {
        EntryType::File
    } else {
        EntryType::Other
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> Result<EntryType> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        Ok(entry_type(metadata.file_type()))
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>> {
        let mut entries = tokio::fs::read_dir(path)
            .await
            .with_context(|| format!("Failed to read directory {}", path.display()))?;

        let mut listing = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("Failed to read entry in {}", path.display()))?
        {
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            listing.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                entry_type: entry_type(file_type),
            });
        }

        Ok(listing)
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory {}", path.display()))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    async fn create_new(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    // Check-then-rename: a target created between the two calls is replaced.
    // Acceptable for single-user edits; std has no portable no-replace rename.
    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let taken = tokio::fs::try_exists(to)
            .await
            .with_context(|| format!("Failed to check {}", to.display()))?;
        if taken {
            anyhow::bail!("{} already exists", to.display());
        }

        tokio::fs::rename(from, to).await.with_context(|| {
            format!("Failed to rename {} to {}", from.display(), to.display())
        })
    }

    async fn remove(&self, path: &Path, use_trash: bool) -> Result<()> {
        if use_trash {
            let target = path.to_path_buf();
            return tokio::task::spawn_blocking(move || trash::delete(&target))
                .await
                .context("Trash task panicked")?
                .with_context(|| format!("Failed to move {} to trash", path.display()));
        }

        let metadata = tokio::fs::symlink_metadata(path)
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))?;

        let removed = if metadata.is_dir() {
            tokio::fs::remove_dir_all(path).await
        } else {
            tokio::fs::remove_file(path).await
        };
        removed.with_context(|| format!("Failed to delete {}", path.display()))
    }
}
