use crate::locator::ConfigPresence;
use serde::Serialize;

/// Count of required project artifacts that are missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub count: usize,
    pub tooltip: String,
}

/// No badge without a workspace, or when nothing is missing.
pub fn compute_badge(has_workspace: bool, project: &ConfigPresence) -> Option<Badge> {
    if !has_workspace {
        return None;
    }

    let mut missing = vec![];
    if !project.has_config_file {
        missing.push("CLAUDE.md");
    }
    if !project.has_claude_folder {
        missing.push(".claude/ folder");
    }

    if missing.is_empty() {
        return None;
    }

    Some(Badge {
        count: missing.len(),
        tooltip: format!("Missing: {}", missing.join(", ")),
    })
}
