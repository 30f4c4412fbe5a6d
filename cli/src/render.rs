use claudeman_core::tree::{IconColor, presentation, tooltip};
use claudeman_core::{Action, Badge, ConfigTree, TreeNode};
use console::{Style, style};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RenderedNode {
    #[serde(flatten)]
    pub node: TreeNode,
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'static str>,
    /// What clicking the row runs; expandable rows have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedNode>,
}

#[derive(Debug, Serialize)]
pub struct RenderedTree {
    pub roots: Vec<RenderedNode>,
    pub badge: Option<Badge>,
}

async fn expand_node(tree: &ConfigTree, node: TreeNode, depth: Option<usize>) -> RenderedNode {
    let mut children = vec![];

    if node.is_expandable() && depth != Some(0) {
        for child in tree.children(&node).await {
            children.push(Box::pin(expand_node(tree, child, depth.map(|d| d - 1))).await);
        }
    }

    RenderedNode {
        tooltip: tooltip(&node),
        context: node.kind.context_value(),
        command: node.command().map(Action::command_id),
        node,
        children,
    }
}

/// Refreshes the tree and expands every expandable node down to `depth`.
pub async fn build(tree: &ConfigTree, depth: Option<usize>) -> RenderedTree {
    let snapshot = tree.refresh().await;

    let mut roots = vec![];
    for node in snapshot.roots {
        roots.push(expand_node(tree, node, depth).await);
    }

    RenderedTree {
        roots,
        badge: snapshot.badge,
    }
}

fn glyph(icon: &str) -> &'static str {
    match icon {
        "folder" => "📁",
        "symbol-method" => "🧩",
        "plug" => "🔌",
        "gear" => "⚙️ ",
        _ => "📄",
    }
}

fn label_style(color: Option<IconColor>) -> Style {
    match color {
        Some(IconColor::Blue) => Style::new().blue().bold(),
        Some(IconColor::Purple) => Style::new().magenta().bold(),
        Some(IconColor::Green) => Style::new().green().bold(),
        Some(IconColor::Orange) => Style::new().yellow().bold(),
        None => Style::new(),
    }
}

fn status_style(status: &str) -> Style {
    if status.starts_with('✓') {
        Style::new().green()
    } else {
        Style::new().red().dim()
    }
}

fn print_node(node: &RenderedNode, prefix: &str, connector: &str) {
    let look = presentation(node.node.kind);
    let label = label_style(look.color).apply_to(&node.node.label);

    if node.node.status.is_empty() {
        println!("{}{}{} {}", prefix, connector, glyph(look.icon), label);
    } else {
        println!(
            "{}{}{} {}  {}",
            prefix,
            connector,
            glyph(look.icon),
            label,
            status_style(&node.node.status).apply_to(&node.node.status)
        );
    }

    let child_prefix = match connector {
        "" => prefix.to_string(),
        "└── " => format!("{}    ", prefix),
        _ => format!("{}│   ", prefix),
    };

    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let connector = if i == last { "└── " } else { "├── " };
        print_node(child, &child_prefix, connector);
    }
}

pub fn print_badge(badge: Option<&Badge>) {
    if let Some(badge) = badge {
        println!(
            "{} {}",
            style(format!("[{}]", badge.count)).yellow().bold(),
            style(&badge.tooltip).yellow()
        );
    }
}

pub fn print_tree(rendered: &RenderedTree) {
    for root in &rendered.roots {
        print_node(root, "", "");
    }

    if rendered.badge.is_some() {
        println!();
        print_badge(rendered.badge.as_ref());
    }
}

pub fn print_json(rendered: &RenderedTree) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(rendered)?);
    Ok(())
}
