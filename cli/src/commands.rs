use anyhow::{Context, Result};
use claudeman_core::ops::{validate_new_name, validate_rename};
use claudeman_core::{
    Config, ConfigKind, ConfigLocator, ConfigTree, EntryKind, EntryOps, Scope, config,
    create_filesystem,
};
use console::style;
use dialoguer::{Confirm, Input};
use std::path::{Path, PathBuf};

pub struct App {
    pub config: Config,
    pub tree: ConfigTree,
    pub ops: EntryOps,
    pub assume_yes: bool,
}

impl App {
    pub fn new(config: Config, project_root: Option<PathBuf>, assume_yes: bool) -> Self {
        let fs = create_filesystem();
        let locator = ConfigLocator::new(fs.clone(), config.global_dir(), project_root);
        let ops = EntryOps::new(fs).with_trash(config.use_trash);

        Self {
            config,
            tree: ConfigTree::new(locator),
            ops,
            assume_yes,
        }
    }

    pub fn locator(&self) -> &ConfigLocator {
        self.tree.locator()
    }

    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    }

    /// Absolute form of `path`, refused unless it is an entry inside a skills
    /// or MCP folder.
    fn managed_entry(&self, path: &Path) -> Result<PathBuf> {
        let path = absolute(path)?;
        if !self.locator().is_managed_path(&path) {
            anyhow::bail!(
                "{} is not an entry inside a skills or MCP folder",
                path.display()
            );
        }
        Ok(path)
    }

    /// Absolute form of `parent`, refused unless new entries may live there.
    fn managed_parent(&self, parent: &Path) -> Result<PathBuf> {
        let parent = absolute(parent)?;
        if !self.locator().is_managed_parent(&parent) {
            anyhow::bail!(
                "{} is not a skills or MCP folder",
                parent.display()
            );
        }
        Ok(parent)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path: {}", path.display()))
}

pub fn print_success(message: impl std::fmt::Display) {
    println!("{} {}", style("✓").green().bold(), message);
}

pub fn print_info(message: impl std::fmt::Display) {
    println!("{} {}", style("→").cyan(), message);
}

pub fn print_warning(message: impl std::fmt::Display) {
    println!("{} {}", style("!").yellow(), message);
}

pub fn open_file(app: &App, path: &Path) -> Result<()> {
    let editor = app.config.editor_command();
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| anyhow::anyhow!("No editor configured"))?;

    tracing::debug!("Opening {} with {}", path.display(), editor);
    let status = std::process::Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to open file: could not run '{}'", program))?;

    if !status.success() {
        anyhow::bail!("Failed to open file: {} exited with {}", program, status);
    }

    Ok(())
}

pub async fn edit_config(app: &App, scope: Scope) -> Result<()> {
    let locator = app.locator();

    if scope == Scope::Project && !locator.has_workspace() {
        print_warning("No workspace folder open");
        return Ok(());
    }

    if let Some(path) = locator.existing_config_file(scope).await {
        return open_file(app, &path);
    }

    let prompt = match scope {
        Scope::Global => "Global Claude config not found. Create it?",
        Scope::Project => "CLAUDE.md not found. Create it?",
    };
    if !app.confirm(prompt)? {
        return Ok(());
    }

    let path = locator.create_config_file(scope).await?;
    print_success(format!("Created {}", path.display()));
    open_file(app, &path)
}

pub async fn create_folder(app: &App, scope: Scope, kind: ConfigKind) -> Result<()> {
    let locator = app.locator();
    let name = kind.display_name(scope);

    if scope == Scope::Project && !locator.has_workspace() {
        print_warning("No workspace folder open");
        return Ok(());
    }

    if locator.has(scope, kind).await {
        print_info(format!("{} already exists", name));
        return Ok(());
    }

    if !app.confirm(&format!("Create {}?", name))? {
        return Ok(());
    }

    locator
        .ensure_dir(scope, kind)
        .await
        .with_context(|| format!("Failed to create {}", name))?;
    print_success(format!("Created {}", name));
    Ok(())
}

fn prompt_new_name(kind: EntryKind) -> Result<String> {
    let (prompt, placeholder) = match kind {
        EntryKind::Folder => ("Enter folder name", "my-folder"),
        EntryKind::File => ("Enter file name", "file.txt"),
    };

    Input::<String>::new()
        .with_prompt(format!("{} (e.g. {})", prompt, placeholder))
        .validate_with(move |input: &String| -> Result<(), String> {
            validate_new_name(input, kind).map_err(|e| e.to_string())
        })
        .interact_text()
        .context("Failed to read name")
}

pub async fn new_entry(
    app: &App,
    parent: &Path,
    name: Option<String>,
    kind: EntryKind,
) -> Result<()> {
    let parent = app.managed_parent(parent)?;
    let name = match name {
        Some(name) => name,
        None => prompt_new_name(kind)?,
    };

    match kind {
        EntryKind::Folder => {
            app.ops.create_folder(&parent, &name).await?;
            print_success(format!("Created folder: {}", name));
        }
        EntryKind::File => {
            let path = app.ops.create_file(&parent, &name).await?;
            print_success(format!("Created file: {}", name));
            open_file(app, &path)?;
        }
    }

    Ok(())
}

pub async fn rename(app: &App, path: &Path, new_name: Option<String>) -> Result<()> {
    let path = app.managed_entry(path)?;
    let current_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("Cannot rename: invalid item"))?;

    let new_name = match new_name {
        Some(name) => name,
        None => {
            let current = current_name.clone();
            Input::<String>::new()
                .with_prompt("Enter new name")
                .with_initial_text(current_name.clone())
                .validate_with(move |input: &String| -> Result<(), String> {
                    validate_rename(&current, input).map_err(|e| e.to_string())
                })
                .interact_text()
                .context("Failed to read name")?
        }
    };

    app.ops.rename(&path, &new_name).await?;
    print_success(format!("Renamed to: {}", new_name));
    Ok(())
}

pub async fn delete(app: &App, path: &Path) -> Result<()> {
    let path = app.managed_entry(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("Cannot delete: invalid item"))?;
    let item_type = if path.is_dir() { "folder" } else { "file" };

    if !app.confirm(&format!(
        "Are you sure you want to delete {} \"{}\"?",
        item_type, name
    ))? {
        return Ok(());
    }

    app.ops.delete(&path).await?;
    print_success(format!("Deleted: {}", name));
    Ok(())
}

pub async fn copy_skill_name(app: &App, path: &Path) -> Result<()> {
    let path = absolute(path)?;
    let name = app
        .locator()
        .skill_folder_name(&path)
        .await
        .ok_or_else(|| anyhow::anyhow!("{} is not a skill folder", path.display()))?;

    let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(name.as_str())
        .context("Failed to copy to clipboard")?;

    print_success(format!("Copied skill name: {}", name));
    Ok(())
}

pub fn settings(app: &App) {
    let locator = app.locator();

    println!("{}", style("Claude Config Manager").white().bold());
    println!();
    println!("  Settings file:  {}", config::get_config_path().display());
    println!("  Global folder:  {}", locator.global_dir().display());
    match locator.project_root() {
        Some(root) => println!("  Workspace:      {}", root.display()),
        None => println!("  Workspace:      {}", style("none").dim()),
    }
    println!("  Editor:         {}", app.config.editor_command());
    println!(
        "  Delete mode:    {}",
        if app.config.use_trash {
            "move to trash"
        } else {
            "permanent"
        }
    );
}
