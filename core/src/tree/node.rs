use crate::locator::{ConfigKind, Scope};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Stable identity the host uses to ask for a node's children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum NodeId {
    GlobalFolder,
    GlobalConfig,
    ProjectConfig,
    ProjectFolder,
    GlobalSkills,
    GlobalMcp,
    ProjectSkills,
    ProjectMcp,
    Entry(PathBuf),
}

impl NodeId {
    pub fn container(scope: Scope, kind: ConfigKind) -> Option<Self> {
        match (scope, kind) {
            (Scope::Global, ConfigKind::ClaudeFolder) => Some(Self::GlobalFolder),
            (Scope::Project, ConfigKind::ClaudeFolder) => Some(Self::ProjectFolder),
            (Scope::Global, ConfigKind::Skills) => Some(Self::GlobalSkills),
            (Scope::Project, ConfigKind::Skills) => Some(Self::ProjectSkills),
            (Scope::Global, ConfigKind::Mcp) => Some(Self::GlobalMcp),
            (Scope::Project, ConfigKind::Mcp) => Some(Self::ProjectMcp),
            (_, ConfigKind::Config) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Self::GlobalFolder => "global-folder",
            Self::GlobalConfig => "global-config",
            Self::ProjectConfig => "project-md",
            Self::ProjectFolder => "project-folder",
            Self::GlobalSkills => "global-skills",
            Self::GlobalMcp => "global-mcp",
            Self::ProjectSkills => "project-skills",
            Self::ProjectMcp => "project-mcp",
            Self::Entry(path) => return write!(f, "{}", path.display()),
        };
        f.write_str(id)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl FromStr for NodeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "global-folder" => Self::GlobalFolder,
            "global-config" => Self::GlobalConfig,
            "project-md" => Self::ProjectConfig,
            "project-folder" => Self::ProjectFolder,
            "global-skills" => Self::GlobalSkills,
            "global-mcp" => Self::GlobalMcp,
            "project-skills" => Self::ProjectSkills,
            "project-mcp" => Self::ProjectMcp,
            path => Self::Entry(PathBuf::from(path)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    RootFolder,
    Config,
    Skills,
    Mcp,
    /// A directory directly under a Skills root.
    SkillsSubFolder,
    Folder,
    File,
}

impl NodeKind {
    pub fn is_folder(self) -> bool {
        matches!(self, Self::Folder | Self::SkillsSubFolder)
    }

    /// Tag the host keys its context menus on.
    pub fn context_value(self) -> Option<&'static str> {
        match self {
            Self::Config => Some("config"),
            Self::Folder => Some("folder"),
            Self::SkillsSubFolder => Some("skill-folder"),
            Self::File => Some("file"),
            Self::RootFolder | Self::Skills | Self::Mcp => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandState {
    None,
    Collapsed,
}

/// Host command a node triggers when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    EditConfig { scope: Scope },
    CreateFolder { scope: Scope, kind: ConfigKind },
    OpenFile,
}

impl Action {
    pub fn command_id(self) -> &'static str {
        match self {
            Self::EditConfig {
                scope: Scope::Global,
            } => "claudeman.editGlobalConfig",
            Self::EditConfig {
                scope: Scope::Project,
            } => "claudeman.editProjectConfig",
            Self::CreateFolder { scope, kind } => match (scope, kind) {
                (Scope::Global, ConfigKind::Skills) => "claudeman.createGlobalSkills",
                (Scope::Global, ConfigKind::Mcp) => "claudeman.createGlobalMcp",
                (Scope::Global, _) => "claudeman.createGlobalClaudeFolder",
                (Scope::Project, ConfigKind::Skills) => "claudeman.createProjectSkills",
                (Scope::Project, ConfigKind::Mcp) => "claudeman.createProjectMcp",
                (Scope::Project, _) => "claudeman.createProjectClaudeFolder",
            },
            Self::OpenFile => "claudeman.openFile",
        }
    }
}

/// One row of the tree. Built fresh on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    pub status: String,
    pub action: Action,
    pub expand: ExpandState,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl TreeNode {
    pub fn is_expandable(&self) -> bool {
        self.expand == ExpandState::Collapsed
    }

    /// The click command. Expandable rows expand instead.
    pub fn command(&self) -> Option<Action> {
        match self.expand {
            ExpandState::None => Some(self.action),
            ExpandState::Collapsed => None,
        }
    }
}
