use crate::commands::{App, print_warning};
use anyhow::Result;
use claudeman_core::{ConfigKind, Scope};
use console::style;

const STEPS: [ConfigKind; 4] = [
    ConfigKind::ClaudeFolder,
    ConfigKind::Config,
    ConfigKind::Skills,
    ConfigKind::Mcp,
];

fn print_step(step: usize, total: usize, title: &str) {
    println!();
    println!(
        "{}",
        style(format!("[{}/{}] {}", step, total, title))
            .cyan()
            .bold()
    );
}

async fn ensure(app: &App, scope: Scope, kind: ConfigKind) -> Result<bool> {
    let locator = app.locator();
    let name = kind.display_name(scope);

    if locator.has(scope, kind).await {
        println!("  {} {} already exists", style("✓").green(), name);
        return Ok(false);
    }

    if !app.confirm(&format!("  Create {}?", name))? {
        println!("  {} Skipped {}", style("-").dim(), name);
        return Ok(false);
    }

    let path = match kind {
        ConfigKind::Config => locator.create_config_file(scope).await?,
        _ => locator.ensure_dir(scope, kind).await?,
    };
    println!(
        "  {} Created {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(true)
}

/// Walks through every artifact of `scope`, creating the missing ones.
pub async fn run_setup(app: &App, scope: Scope) -> Result<()> {
    if scope == Scope::Project && !app.locator().has_workspace() {
        print_warning("No workspace folder open");
        return Ok(());
    }

    println!(
        "  {}",
        style(format!("Setting up {} Claude configuration", scope))
            .white()
            .bold()
    );

    let mut created = 0;
    for (i, kind) in STEPS.iter().enumerate() {
        print_step(i + 1, STEPS.len(), kind.display_name(scope));

        match ensure(app, scope, *kind).await {
            Ok(true) => created += 1,
            Ok(false) => {}
            Err(e) => {
                eprintln!(
                    "  {} Warning: Could not create {}: {:#}",
                    style("!").yellow(),
                    kind.display_name(scope),
                    e
                );
            }
        }
    }

    println!();
    println!(
        "  {} Setup complete ({} created)",
        style("✓").green().bold(),
        created
    );

    if scope == Scope::Project
        && let Some(badge) = app.tree.badge().await
    {
        println!("  {} {}", style("!").yellow(), badge.tooltip);
    }

    Ok(())
}
