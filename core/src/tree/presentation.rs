use super::node::{NodeKind, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconColor {
    Blue,
    Purple,
    Green,
    Orange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// Codicon name.
    pub icon: &'static str,
    pub color: Option<IconColor>,
}

pub fn presentation(kind: NodeKind) -> Presentation {
    let (icon, color) = match kind {
        NodeKind::RootFolder | NodeKind::Folder | NodeKind::SkillsSubFolder => {
            ("folder", Some(IconColor::Blue))
        }
        NodeKind::Skills => ("symbol-method", Some(IconColor::Purple)),
        NodeKind::Mcp => ("plug", Some(IconColor::Green)),
        NodeKind::Config => ("gear", Some(IconColor::Orange)),
        NodeKind::File => ("file", None),
    };
    Presentation { icon, color }
}

pub fn tooltip(node: &TreeNode) -> String {
    if !node.status.is_empty() {
        return format!("{} - {}", node.label, node.status);
    }
    match &node.path {
        Some(path) => format!("{}\n{}", node.label, path.display()),
        None => node.label.clone(),
    }
}
