pub mod badge;
pub mod listing;
pub mod node;
pub mod presentation;

pub use badge::{Badge, compute_badge};
pub use listing::{list_directory, sort_entries};
pub use node::{Action, ExpandState, NodeId, NodeKind, TreeNode};
pub use presentation::{IconColor, Presentation, presentation, tooltip};

use crate::locator::{ConfigKind, ConfigLocator, ConfigPresence, Scope};
use serde::Serialize;
use std::path::PathBuf;

const EXISTS: &str = "✓ Exists";
const NOT_FOUND: &str = "✗ Not found";
const CONFIGURED: &str = "✓ Configured";
const NOT_CONFIGURED: &str = "✗ Not configured";

fn exists_status(exists: bool) -> String {
    (if exists { EXISTS } else { NOT_FOUND }).to_string()
}

fn expand_state(exists: bool) -> ExpandState {
    if exists {
        ExpandState::Collapsed
    } else {
        ExpandState::None
    }
}

/// Root rows plus badge, computed from one batch of existence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub roots: Vec<TreeNode>,
    pub badge: Option<Badge>,
}

/// Builds the config tree on demand from the filesystem. Holds no state
/// besides the locator, so every call reflects the disk as it is now.
#[derive(Clone)]
pub struct ConfigTree {
    locator: ConfigLocator,
}

impl ConfigTree {
    pub fn new(locator: ConfigLocator) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &ConfigLocator {
        &self.locator
    }

    pub fn set_project_root(&mut self, project_root: Option<PathBuf>) {
        self.locator.set_project_root(project_root);
    }

    async fn presences(&self) -> (ConfigPresence, ConfigPresence) {
        tokio::join!(
            self.locator.presence(Scope::Global),
            self.locator.presence(Scope::Project),
        )
    }

    pub async fn refresh(&self) -> TreeSnapshot {
        let (global, project) = self.presences().await;
        TreeSnapshot {
            roots: self.roots_from(&global, &project),
            badge: compute_badge(self.locator.has_workspace(), &project),
        }
    }

    pub async fn root_nodes(&self) -> Vec<TreeNode> {
        let (global, project) = self.presences().await;
        self.roots_from(&global, &project)
    }

    pub async fn badge(&self) -> Option<Badge> {
        let project = self.locator.presence(Scope::Project).await;
        compute_badge(self.locator.has_workspace(), &project)
    }

    fn existing_path(&self, scope: Scope, kind: ConfigKind, exists: bool) -> Option<PathBuf> {
        if exists {
            self.locator.resolve_path(scope, kind)
        } else {
            None
        }
    }

    fn roots_from(&self, global: &ConfigPresence, project: &ConfigPresence) -> Vec<TreeNode> {
        vec![
            TreeNode {
                id: NodeId::GlobalFolder,
                label: "Global ~/.claude Folder".to_string(),
                status: exists_status(global.has_claude_folder),
                action: Action::CreateFolder {
                    scope: Scope::Global,
                    kind: ConfigKind::ClaudeFolder,
                },
                expand: expand_state(global.has_claude_folder),
                kind: NodeKind::RootFolder,
                path: self.existing_path(
                    Scope::Global,
                    ConfigKind::ClaudeFolder,
                    global.has_claude_folder,
                ),
            },
            TreeNode {
                id: NodeId::GlobalConfig,
                label: "Global Configuration".to_string(),
                status: if global.has_config_file {
                    CONFIGURED
                } else {
                    NOT_CONFIGURED
                }
                .to_string(),
                action: Action::EditConfig {
                    scope: Scope::Global,
                },
                expand: ExpandState::None,
                kind: NodeKind::Config,
                path: self.existing_path(Scope::Global, ConfigKind::Config, global.has_config_file),
            },
            TreeNode {
                id: NodeId::ProjectConfig,
                label: "Project CLAUDE.md".to_string(),
                status: exists_status(project.has_config_file),
                action: Action::EditConfig {
                    scope: Scope::Project,
                },
                expand: ExpandState::None,
                kind: NodeKind::Config,
                path: None,
            },
            TreeNode {
                id: NodeId::ProjectFolder,
                label: "Project .claude/ Folder".to_string(),
                status: exists_status(project.has_claude_folder),
                action: Action::CreateFolder {
                    scope: Scope::Project,
                    kind: ConfigKind::ClaudeFolder,
                },
                expand: expand_state(project.has_claude_folder),
                kind: NodeKind::RootFolder,
                path: self.existing_path(
                    Scope::Project,
                    ConfigKind::ClaudeFolder,
                    project.has_claude_folder,
                ),
            },
        ]
    }

    /// Skills and MCP rows for a `.claude` folder, present or not.
    async fn containers(&self, scope: Scope) -> Vec<TreeNode> {
        let (has_skills, has_mcp) = tokio::join!(
            self.locator.has_skills_dir(scope),
            self.locator.has_mcp_dir(scope),
        );

        [
            (ConfigKind::Skills, "Skills", NodeKind::Skills, has_skills),
            (ConfigKind::Mcp, "MCP", NodeKind::Mcp, has_mcp),
        ]
        .into_iter()
        .filter_map(|(kind, label, node_kind, exists)| {
            Some(TreeNode {
                id: NodeId::container(scope, kind)?,
                label: label.to_string(),
                status: exists_status(exists),
                action: Action::CreateFolder { scope, kind },
                expand: expand_state(exists),
                kind: node_kind,
                path: self.existing_path(scope, kind, exists),
            })
        })
        .collect()
    }

    async fn list_config_dir(&self, scope: Scope, kind: ConfigKind) -> Vec<TreeNode> {
        match self.locator.resolve_path(scope, kind) {
            Some(dir) => {
                list_directory(
                    self.locator.filesystem().as_ref(),
                    &dir,
                    kind == ConfigKind::Skills,
                )
                .await
            }
            None => vec![],
        }
    }

    /// Children of `node`. Leaves and unknown nodes have none; read errors
    /// come back as an empty list.
    pub async fn children(&self, node: &TreeNode) -> Vec<TreeNode> {
        match &node.id {
            NodeId::GlobalFolder => self.containers(Scope::Global).await,
            NodeId::ProjectFolder => self.containers(Scope::Project).await,
            NodeId::GlobalSkills => self.list_config_dir(Scope::Global, ConfigKind::Skills).await,
            NodeId::ProjectSkills => {
                self.list_config_dir(Scope::Project, ConfigKind::Skills)
                    .await
            }
            NodeId::GlobalMcp => self.list_config_dir(Scope::Global, ConfigKind::Mcp).await,
            NodeId::ProjectMcp => self.list_config_dir(Scope::Project, ConfigKind::Mcp).await,
            NodeId::Entry(_) if node.kind.is_folder() => match &node.path {
                Some(path) => {
                    list_directory(self.locator.filesystem().as_ref(), path, false).await
                }
                None => vec![],
            },
            NodeId::Entry(_) | NodeId::GlobalConfig | NodeId::ProjectConfig => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::LocalFileSystem;
    use crate::filesystem::testing::RecordingFs;
    use crate::traits::FileSystem;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn tree_with(fs: Arc<dyn FileSystem>, global: &Path, project: Option<&Path>) -> ConfigTree {
        ConfigTree::new(ConfigLocator::new(
            fs,
            global,
            project.map(Path::to_path_buf),
        ))
    }

    fn tree(global: &Path, project: Option<&Path>) -> ConfigTree {
        tree_with(Arc::new(LocalFileSystem::new()), global, project)
    }

    fn labels(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.label.as_str()).collect()
    }

    fn find<'a>(nodes: &'a [TreeNode], id: &NodeId) -> &'a TreeNode {
        nodes.iter().find(|n| &n.id == id).unwrap()
    }

    #[tokio::test]
    async fn roots_are_fixed_and_ordered() {
        let tmp = TempDir::new().unwrap();
        let tree = tree(&tmp.path().join("home/.claude"), None);

        let roots = tree.root_nodes().await;
        let ids: Vec<_> = roots.iter().map(|n| n.id.to_string()).collect();
        assert_eq!(
            ids,
            ["global-folder", "global-config", "project-md", "project-folder"]
        );
        assert!(roots.iter().all(|n| n.expand == ExpandState::None));
        assert_eq!(roots[1].status, "✗ Not configured");
        assert_eq!(
            roots[0].command(),
            Some(Action::CreateFolder {
                scope: Scope::Global,
                kind: ConfigKind::ClaudeFolder
            })
        );
    }

    #[tokio::test]
    async fn existing_folders_are_expandable() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("home/.claude");
        let root = tmp.path().join("repo");
        std::fs::create_dir_all(&global).unwrap();
        std::fs::create_dir_all(root.join(".claude")).unwrap();
        std::fs::write(global.join("settings.json"), "{}").unwrap();

        let roots = tree(&global, Some(&root)).root_nodes().await;
        let global_folder = find(&roots, &NodeId::GlobalFolder);
        assert!(global_folder.is_expandable());
        assert_eq!(global_folder.path.as_deref(), Some(global.as_path()));
        assert_eq!(global_folder.command(), None);

        let global_config = find(&roots, &NodeId::GlobalConfig);
        assert_eq!(global_config.status, "✓ Configured");
        assert!(!global_config.is_expandable());

        assert!(find(&roots, &NodeId::ProjectFolder).is_expandable());
        assert_eq!(find(&roots, &NodeId::ProjectConfig).status, "✗ Not found");
    }

    #[tokio::test]
    async fn project_folder_always_has_skills_and_mcp() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("repo");
        std::fs::create_dir_all(root.join(".claude/skills")).unwrap();
        let tree = tree(&tmp.path().join("home/.claude"), Some(&root));

        let roots = tree.root_nodes().await;
        let children = tree.children(find(&roots, &NodeId::ProjectFolder)).await;
        assert_eq!(labels(&children), ["Skills", "MCP"]);
        assert!(children[0].is_expandable());
        assert!(!children[1].is_expandable());
        assert_eq!(children[1].status, "✗ Not found");

        let no_workspace = tree_with(
            Arc::new(LocalFileSystem::new()),
            &tmp.path().join("home/.claude"),
            None,
        );
        let children = no_workspace
            .children(find(&roots, &NodeId::ProjectFolder))
            .await;
        assert_eq!(labels(&children), ["Skills", "MCP"]);
        assert!(children.iter().all(|n| !n.is_expandable()));
    }

    #[tokio::test]
    async fn skills_listing_tags_only_top_level_folders() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join(".claude");
        let skills = global.join("skills");
        std::fs::create_dir_all(skills.join("pdf/scripts")).unwrap();
        std::fs::write(skills.join("pdf/SKILL.md"), "# pdf").unwrap();
        std::fs::write(skills.join("README.md"), "").unwrap();

        let tree = tree(&global, None);
        let containers = tree
            .children(&tree.root_nodes().await[0])
            .await;
        let skills_node = find(&containers, &NodeId::GlobalSkills);
        let top = tree.children(skills_node).await;

        assert_eq!(labels(&top), ["pdf", "README.md"]);
        assert_eq!(top[0].kind, NodeKind::SkillsSubFolder);
        assert_eq!(top[0].id, NodeId::Entry(skills.join("pdf")));
        assert_eq!(top[1].kind, NodeKind::File);
        assert_eq!(top[1].command(), Some(Action::OpenFile));

        let nested = tree.children(&top[0]).await;
        assert_eq!(labels(&nested), ["scripts", "SKILL.md"]);
        assert_eq!(nested[0].kind, NodeKind::Folder);
        assert_eq!(nested[1].kind, NodeKind::File);
    }

    #[tokio::test]
    async fn mcp_listing_uses_plain_folders() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join(".claude");
        std::fs::create_dir_all(global.join("mcp/servers")).unwrap();

        let tree = tree(&global, None);
        let containers = tree.children(&tree.root_nodes().await[0]).await;
        let listing = tree.children(find(&containers, &NodeId::GlobalMcp)).await;
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].kind, NodeKind::Folder);
    }

    #[tokio::test]
    async fn listing_failure_yields_empty() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join(".claude");
        std::fs::create_dir_all(global.join("skills/a")).unwrap();

        let fs = Arc::new(RecordingFs::failing_read_dir());
        let tree = tree_with(fs.clone(), &global, None);
        let containers = tree.children(&tree.root_nodes().await[0]).await;
        let skills = find(&containers, &NodeId::GlobalSkills);
        assert!(skills.is_expandable());

        assert!(tree.children(skills).await.is_empty());
        assert!(fs.calls().iter().any(|(op, _)| *op == "read_dir"));
    }

    #[tokio::test]
    async fn vanished_directory_yields_empty() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join(".claude");
        let dir = global.join("skills/gone");
        std::fs::create_dir_all(&dir).unwrap();

        let tree = tree(&global, None);
        let node = TreeNode {
            id: NodeId::Entry(dir.clone()),
            label: "gone".into(),
            status: String::new(),
            action: Action::OpenFile,
            expand: ExpandState::Collapsed,
            kind: NodeKind::Folder,
            path: Some(dir.clone()),
        };
        std::fs::remove_dir(&dir).unwrap();

        assert!(tree.children(&node).await.is_empty());
    }

    #[tokio::test]
    async fn leaves_have_no_children() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join(".claude");
        std::fs::create_dir_all(&global).unwrap();
        std::fs::write(global.join("settings.json"), "{}").unwrap();

        let tree = tree(&global, None);
        let roots = tree.root_nodes().await;
        assert!(tree.children(find(&roots, &NodeId::GlobalConfig)).await.is_empty());

        let file = TreeNode {
            id: NodeId::Entry(global.join("settings.json")),
            label: "settings.json".into(),
            status: String::new(),
            action: Action::OpenFile,
            expand: ExpandState::None,
            kind: NodeKind::File,
            path: Some(global.join("settings.json")),
        };
        assert!(tree.children(&file).await.is_empty());
    }

    #[tokio::test]
    async fn refresh_badges_missing_project_artifacts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("repo");
        std::fs::create_dir_all(&root).unwrap();
        let mut tree = tree(&tmp.path().join("home/.claude"), Some(&root));

        let snapshot = tree.refresh().await;
        assert_eq!(snapshot.roots.len(), 4);
        assert_eq!(snapshot.badge.as_ref().map(|b| b.count), Some(2));

        std::fs::create_dir_all(root.join(".claude")).unwrap();
        let badge = tree.badge().await.unwrap();
        assert_eq!(badge.count, 1);
        assert_eq!(badge.tooltip, "Missing: CLAUDE.md");

        std::fs::write(root.join(".claude/CLAUDE.md"), "# x").unwrap();
        assert_eq!(tree.badge().await, None);

        std::fs::remove_dir_all(root.join(".claude")).unwrap();
        tree.set_project_root(None);
        assert_eq!(tree.refresh().await.badge, None);
    }
}
