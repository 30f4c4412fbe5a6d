pub mod templates;

pub use templates::config_template;

use crate::traits::FileSystem;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

const CLAUDE_DIR: &str = ".claude";
const PROJECT_CONFIG_FILE: &str = "CLAUDE.md";
const GLOBAL_CONFIG_FILE: &str = "settings.json";
const SKILLS_DIR: &str = "skills";
const MCP_DIR: &str = "mcp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Global,
    Project,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Project => write!(f, "project"),
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Self::Global),
            "project" => Ok(Self::Project),
            other => Err(format!("Unknown scope: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKind {
    Config,
    ClaudeFolder,
    Skills,
    Mcp,
}

impl ConfigKind {
    pub fn display_name(self, scope: Scope) -> &'static str {
        match (scope, self) {
            (Scope::Global, Self::Config) => "settings.json",
            (Scope::Project, Self::Config) => "CLAUDE.md",
            (Scope::Global, Self::ClaudeFolder) => "~/.claude folder",
            (Scope::Project, Self::ClaudeFolder) => ".claude/ folder",
            (Scope::Global, Self::Skills) => "~/.claude/skills/ folder",
            (Scope::Project, Self::Skills) => ".claude/skills/ folder",
            (Scope::Global, Self::Mcp) => "~/.claude/mcp/ folder",
            (Scope::Project, Self::Mcp) => ".claude/mcp/ folder",
        }
    }
}

/// Existence snapshot for one scope. Never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfigPresence {
    pub has_claude_folder: bool,
    pub has_config_file: bool,
    pub has_skills_folder: bool,
    pub has_mcp_folder: bool,
}

/// Resolves and checks the global (`~/.claude`) and project (`<root>/.claude`)
/// config locations.
///
/// The project root is held explicitly; `None` means no workspace is open and
/// every project query answers false / `None`.
#[derive(Clone)]
pub struct ConfigLocator {
    fs: Arc<dyn FileSystem>,
    global_dir: PathBuf,
    project_root: Option<PathBuf>,
}

impl ConfigLocator {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        global_dir: impl Into<PathBuf>,
        project_root: Option<PathBuf>,
    ) -> Self {
        Self {
            fs,
            global_dir: global_dir.into(),
            project_root,
        }
    }

    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub fn global_dir(&self) -> &Path {
        &self.global_dir
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    pub fn set_project_root(&mut self, project_root: Option<PathBuf>) {
        self.project_root = project_root;
    }

    pub fn has_workspace(&self) -> bool {
        self.project_root.is_some()
    }

    fn claude_dir(&self, scope: Scope) -> Option<PathBuf> {
        match scope {
            Scope::Global => Some(self.global_dir.clone()),
            Scope::Project => self.project_root.as_ref().map(|root| root.join(CLAUDE_DIR)),
        }
    }

    /// Where `kind` lives for `scope`, whether or not it exists.
    ///
    /// The project config resolves to `<root>/CLAUDE.md`, the location new
    /// files are created at.
    pub fn resolve_path(&self, scope: Scope, kind: ConfigKind) -> Option<PathBuf> {
        match kind {
            ConfigKind::Config => match scope {
                Scope::Global => Some(self.global_dir.join(GLOBAL_CONFIG_FILE)),
                Scope::Project => self
                    .project_root
                    .as_ref()
                    .map(|root| root.join(PROJECT_CONFIG_FILE)),
            },
            ConfigKind::ClaudeFolder => self.claude_dir(scope),
            ConfigKind::Skills => self.claude_dir(scope).map(|dir| dir.join(SKILLS_DIR)),
            ConfigKind::Mcp => self.claude_dir(scope).map(|dir| dir.join(MCP_DIR)),
        }
    }

    fn config_candidates(&self, scope: Scope) -> Vec<PathBuf> {
        match scope {
            Scope::Global => vec![self.global_dir.join(GLOBAL_CONFIG_FILE)],
            Scope::Project => match &self.project_root {
                Some(root) => vec![
                    root.join(PROJECT_CONFIG_FILE),
                    root.join(CLAUDE_DIR).join(PROJECT_CONFIG_FILE),
                ],
                None => vec![],
            },
        }
    }

    async fn is_dir(&self, path: Option<PathBuf>) -> bool {
        let Some(path) = path else {
            return false;
        };

        match self.fs.stat(&path).await {
            Ok(entry_type) => entry_type.is_dir(),
            Err(e) => {
                tracing::debug!("Treating {} as absent: {:#}", path.display(), e);
                false
            }
        }
    }

    /// The config file that actually exists, preferring `<root>/CLAUDE.md`
    /// over `<root>/.claude/CLAUDE.md` for the project.
    pub async fn existing_config_file(&self, scope: Scope) -> Option<PathBuf> {
        for candidate in self.config_candidates(scope) {
            if self.fs.exists(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }

    pub async fn has_config_file(&self, scope: Scope) -> bool {
        self.existing_config_file(scope).await.is_some()
    }

    pub async fn has_claude_folder(&self, scope: Scope) -> bool {
        self.is_dir(self.resolve_path(scope, ConfigKind::ClaudeFolder))
            .await
    }

    pub async fn has_skills_dir(&self, scope: Scope) -> bool {
        self.is_dir(self.resolve_path(scope, ConfigKind::Skills)).await
    }

    pub async fn has_mcp_dir(&self, scope: Scope) -> bool {
        self.is_dir(self.resolve_path(scope, ConfigKind::Mcp)).await
    }

    pub async fn has(&self, scope: Scope, kind: ConfigKind) -> bool {
        match kind {
            ConfigKind::Config => self.has_config_file(scope).await,
            ConfigKind::ClaudeFolder => self.has_claude_folder(scope).await,
            ConfigKind::Skills => self.has_skills_dir(scope).await,
            ConfigKind::Mcp => self.has_mcp_dir(scope).await,
        }
    }

    pub async fn presence(&self, scope: Scope) -> ConfigPresence {
        let (has_claude_folder, has_config_file, has_skills_folder, has_mcp_folder) = tokio::join!(
            self.has_claude_folder(scope),
            self.has_config_file(scope),
            self.has_skills_dir(scope),
            self.has_mcp_dir(scope),
        );

        ConfigPresence {
            has_claude_folder,
            has_config_file,
            has_skills_folder,
            has_mcp_folder,
        }
    }

    fn require(&self, scope: Scope, kind: ConfigKind) -> Result<PathBuf> {
        self.resolve_path(scope, kind)
            .ok_or_else(|| anyhow::anyhow!("No workspace folder open"))
    }

    /// Creates the directory backing `kind`, recursively. For
    /// `ConfigKind::Config` that is the directory holding the config file.
    pub async fn ensure_dir(&self, scope: Scope, kind: ConfigKind) -> Result<PathBuf> {
        let path = self.require(scope, kind)?;
        let dir = match kind {
            ConfigKind::Config => path
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| anyhow::anyhow!("{} has no parent directory", path.display()))?,
            _ => path,
        };

        self.fs.create_dir_all(&dir).await.with_context(|| {
            format!("Failed to create {}", kind.display_name(scope))
        })?;

        tracing::info!(scope = %scope, path = %dir.display(), "Directory ready");
        Ok(dir)
    }

    pub fn config_template(&self, scope: Scope) -> &'static str {
        config_template(scope)
    }

    /// Writes the scope's template to its config path.
    pub async fn create_config_file(&self, scope: Scope) -> Result<PathBuf> {
        let path = self.require(scope, ConfigKind::Config)?;
        self.ensure_dir(scope, ConfigKind::Config).await?;

        self.fs
            .write(&path, config_template(scope).as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(scope = %scope, path = %path.display(), "Config file created");
        Ok(path)
    }

    /// Skills and MCP directories of every open scope, whether or not they exist.
    fn entry_roots(&self) -> Vec<PathBuf> {
        [Scope::Global, Scope::Project]
            .into_iter()
            .flat_map(|scope| {
                [ConfigKind::Skills, ConfigKind::Mcp]
                    .into_iter()
                    .filter_map(move |kind| self.resolve_path(scope, kind))
            })
            .collect()
    }

    /// True for entries strictly inside a skills or MCP directory, the only
    /// paths that may be renamed or deleted. Config files, `.claude` folders
    /// and the skills/MCP directories themselves are never managed entries.
    pub fn is_managed_path(&self, path: &Path) -> bool {
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }

        self.entry_roots()
            .iter()
            .any(|root| path != root && path.starts_with(root))
    }

    /// True where new entries may be created: a skills or MCP directory or
    /// any managed entry below one.
    pub fn is_managed_parent(&self, path: &Path) -> bool {
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }

        self.entry_roots().iter().any(|root| path == root) || self.is_managed_path(path)
    }

    /// Name of the skill when `path` is a directory directly under a skills
    /// directory.
    pub async fn skill_folder_name(&self, path: &Path) -> Option<String> {
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }

        let parent = path.parent()?;
        let under_skills = [Scope::Global, Scope::Project]
            .into_iter()
            .filter_map(|scope| self.resolve_path(scope, ConfigKind::Skills))
            .any(|skills| skills == parent);
        if !under_skills || !self.is_dir(Some(path.to_path_buf())).await {
            return None;
        }

        path.file_name().map(|n| n.to_string_lossy().into_owned())
    }
}
