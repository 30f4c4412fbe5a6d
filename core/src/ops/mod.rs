use crate::traits::FileSystem;
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "Folder"),
            Self::File => write!(f, "File"),
        }
    }
}

fn has_separator(name: &str) -> bool {
    name.contains('/') || name.contains('\\')
}

pub fn validate_new_name(name: &str, entry_kind: EntryKind) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("{} name cannot be empty", entry_kind);
    }
    if has_separator(name) {
        anyhow::bail!("{} name cannot contain slashes", entry_kind);
    }
    if name.starts_with('.') {
        anyhow::bail!("{} name cannot start with a dot", entry_kind);
    }
    Ok(())
}

pub fn validate_rename(current_name: &str, new_name: &str) -> Result<()> {
    if new_name.trim().is_empty() {
        anyhow::bail!("Name cannot be empty");
    }
    if has_separator(new_name) {
        anyhow::bail!("Name cannot contain slashes");
    }
    if new_name == current_name {
        anyhow::bail!("Name must be different from current name");
    }
    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Invalid path: {}", path.display()))
}

/// Create, rename and delete for entries inside the config folders.
///
/// Names are validated before any filesystem call. Each operation is then a
/// single call whose failure is returned as is.
#[derive(Clone)]
pub struct EntryOps {
    fs: Arc<dyn FileSystem>,
    use_trash: bool,
}

impl EntryOps {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            use_trash: true,
        }
    }

    pub fn with_trash(mut self, use_trash: bool) -> Self {
        self.use_trash = use_trash;
        self
    }

    pub async fn create_folder(&self, parent: &Path, name: &str) -> Result<PathBuf> {
        validate_new_name(name, EntryKind::Folder)?;

        let path = parent.join(name);
        self.fs
            .create_dir_all(&path)
            .await
            .context("Failed to create folder")?;

        tracing::info!(path = %path.display(), "Folder created");
        Ok(path)
    }

    /// Creates an empty file. An existing file is never overwritten.
    pub async fn create_file(&self, parent: &Path, name: &str) -> Result<PathBuf> {
        validate_new_name(name, EntryKind::File)?;

        let path = parent.join(name);
        self.fs
            .create_new(&path, b"")
            .await
            .context("Failed to create file")?;

        tracing::info!(path = %path.display(), "File created");
        Ok(path)
    }

    /// Renames within the same parent directory.
    pub async fn rename(&self, path: &Path, new_name: &str) -> Result<PathBuf> {
        let current_name = file_name(path)?;
        validate_rename(&current_name, new_name)?;

        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Invalid path: {}", path.display()))?;
        let target = parent.join(new_name);
        self.fs
            .rename(path, &target)
            .await
            .context("Failed to rename")?;

        tracing::info!(from = %path.display(), to = %target.display(), "Renamed");
        Ok(target)
    }

    /// Recursive. Goes to the trash unless trash is disabled.
    pub async fn delete(&self, path: &Path) -> Result<()> {
        self.fs
            .remove(path, self.use_trash)
            .await
            .context("Failed to delete")?;

        tracing::info!(path = %path.display(), trash = self.use_trash, "Deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::testing::RecordingFs;
    use tempfile::TempDir;

    fn ops() -> (Arc<RecordingFs>, EntryOps) {
        let fs = Arc::new(RecordingFs::new());
        let ops = EntryOps::new(fs.clone()).with_trash(false);
        (fs, ops)
    }

    #[test]
    fn new_name_rules() {
        assert!(validate_new_name("my-skill", EntryKind::Folder).is_ok());
        assert_eq!(
            validate_new_name("  ", EntryKind::Folder).unwrap_err().to_string(),
            "Folder name cannot be empty"
        );
        assert_eq!(
            validate_new_name("a/b", EntryKind::File).unwrap_err().to_string(),
            "File name cannot contain slashes"
        );
        assert_eq!(
            validate_new_name("a\\b", EntryKind::File).unwrap_err().to_string(),
            "File name cannot contain slashes"
        );
        assert_eq!(
            validate_new_name(".env", EntryKind::File).unwrap_err().to_string(),
            "File name cannot start with a dot"
        );
    }

    #[test]
    fn rename_rules() {
        assert!(validate_rename("a.md", "b.md").is_ok());
        assert!(validate_rename("a.md", ".hidden").is_ok());
        assert_eq!(
            validate_rename("a.md", "").unwrap_err().to_string(),
            "Name cannot be empty"
        );
        assert_eq!(
            validate_rename("a.md", "x/y").unwrap_err().to_string(),
            "Name cannot contain slashes"
        );
    }

    #[tokio::test]
    async fn rename_to_same_name_never_touches_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("SKILL.md");
        std::fs::write(&path, "# skill").unwrap();
        let (fs, ops) = ops();

        let err = ops.rename(&path, "SKILL.md").await.unwrap_err();
        assert_eq!(err.to_string(), "Name must be different from current name");
        assert!(fs.calls().is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn invalid_new_names_never_touch_disk() {
        let tmp = TempDir::new().unwrap();
        let (fs, ops) = ops();

        assert!(ops.create_folder(tmp.path(), ".git").await.is_err());
        assert!(ops.create_file(tmp.path(), "a/b.md").await.is_err());
        assert!(fs.calls().is_empty());
    }

    #[tokio::test]
    async fn create_folder_and_file() {
        let tmp = TempDir::new().unwrap();
        let (fs, ops) = ops();

        let folder = ops.create_folder(tmp.path(), "pdf").await.unwrap();
        assert!(folder.is_dir());

        let file = ops.create_file(&folder, "SKILL.md").await.unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "");
        assert_eq!(fs.calls().len(), 2);
    }

    #[tokio::test]
    async fn create_file_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("notes.md"), "keep me").unwrap();
        let (_, ops) = ops();

        let err = ops.create_file(tmp.path(), "notes.md").await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to create file"));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("notes.md")).unwrap(),
            "keep me"
        );
    }

    #[tokio::test]
    async fn rename_keeps_parent() {
        let tmp = TempDir::new().unwrap();
        let old = tmp.path().join("draft");
        std::fs::create_dir(&old).unwrap();
        let (_, ops) = ops();

        let renamed = ops.rename(&old, "final").await.unwrap();
        assert_eq!(renamed, tmp.path().join("final"));
        assert!(renamed.is_dir());
        assert!(!old.exists());
    }

    #[tokio::test]
    async fn rename_onto_existing_fails() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a"), "").unwrap();
        std::fs::write(tmp.path().join("b"), "").unwrap();
        let (_, ops) = ops();

        let err = ops.rename(&tmp.path().join("a"), "b").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to rename");
        assert!(format!("{err:#}").contains("already exists"));
    }

    #[tokio::test]
    async fn delete_is_recursive() {
        let tmp = TempDir::new().unwrap();
        let skill = tmp.path().join("skill");
        std::fs::create_dir_all(skill.join("scripts")).unwrap();
        std::fs::write(skill.join("scripts/run.sh"), "").unwrap();
        let (_, ops) = ops();

        ops.delete(&skill).await.unwrap();
        assert!(!skill.exists());
        assert!(ops.delete(&skill).await.is_err());
    }
}
