use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use claudeman_core::{Config, ConfigKind, EntryKind, RefreshWatcher, Scope};
use console::{Term, style};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod setup;

use commands::App;

#[derive(Parser)]
#[command(name = "claudeman")]
#[command(about = "claudeman - Browse and manage Claude config folders", long_about = None)]
struct Cli {
    /// Workspace folder (defaults to the current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    /// Run as if no workspace folder were open
    #[arg(long, global = true, conflicts_with = "project")]
    no_project: bool,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Global,
    Project,
}

impl From<ScopeArg> for Scope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Global => Scope::Global,
            ScopeArg::Project => Scope::Project,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FolderArg {
    Claude,
    Skills,
    Mcp,
}

impl From<FolderArg> for ConfigKind {
    fn from(folder: FolderArg) -> Self {
        match folder {
            FolderArg::Claude => ConfigKind::ClaudeFolder,
            FolderArg::Skills => ConfigKind::Skills,
            FolderArg::Mcp => ConfigKind::Mcp,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the config tree
    Tree {
        #[arg(short, long)]
        depth: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Show what exists for each scope
    Status,
    /// Show claudeman settings
    Settings,
    /// Open the config file, creating it from a template if missing
    Edit { scope: ScopeArg },
    /// Create a .claude, skills or mcp folder
    Create { scope: ScopeArg, folder: FolderArg },
    /// Create every missing artifact for a scope
    Setup {
        #[arg(value_enum, default_value = "project")]
        scope: ScopeArg,
    },
    /// Open a file in the editor
    Open { path: PathBuf },
    NewFolder {
        parent: PathBuf,
        name: Option<String>,
    },
    NewFile {
        parent: PathBuf,
        name: Option<String>,
    },
    Rename {
        path: PathBuf,
        new_name: Option<String>,
    },
    Delete { path: PathBuf },
    /// Copy a skill folder's name to the clipboard
    CopyName { path: PathBuf },
    /// Redraw the tree whenever the config folders change
    Watch {
        #[arg(short, long)]
        depth: Option<usize>,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "claudeman_core=debug,claudeman=debug"
        } else {
            "warn"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn project_root(cli: &Cli) -> Result<Option<PathBuf>> {
    if cli.no_project {
        return Ok(None);
    }

    let root = match &cli.project {
        Some(path) => std::path::absolute(path)?,
        None => std::env::current_dir()?,
    };
    Ok(Some(root))
}

async fn status(app: &App) {
    let locator = app.locator();

    for scope in [Scope::Global, Scope::Project] {
        println!("{}", style(format!("{} scope", scope)).white().bold());

        if scope == Scope::Project && !locator.has_workspace() {
            println!("  {}", style("No workspace folder open").dim());
            continue;
        }

        let presence = locator.presence(scope).await;
        for (kind, exists) in [
            (ConfigKind::ClaudeFolder, presence.has_claude_folder),
            (ConfigKind::Config, presence.has_config_file),
            (ConfigKind::Skills, presence.has_skills_folder),
            (ConfigKind::Mcp, presence.has_mcp_folder),
        ] {
            let mark = if exists {
                style("✓").green()
            } else {
                style("✗").red()
            };
            println!("  {} {}", mark, kind.display_name(scope));
        }
    }

    if let Some(badge) = app.tree.badge().await {
        println!();
        render::print_badge(Some(&badge));
    }
}

async fn watch(app: &App, depth: Option<usize>) -> Result<()> {
    let mut watcher = RefreshWatcher::start(app.locator())?;
    let term = Term::stdout();

    loop {
        let _ = term.clear_screen();
        render::print_tree(&render::build(&app.tree, depth).await);
        println!();
        println!("{}", style("Watching for changes (Ctrl+C to exit)").dim());

        tokio::select! {
            request = watcher.next() => match request {
                Some(request) => {
                    let pending = watcher.drain();
                    tracing::debug!(
                        "Refreshing after change to {} ({} more pending)",
                        request.path.display(),
                        pending
                    );
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_init()?;
    let app = App::new(config, project_root(&cli)?, cli.yes);

    let command = cli.command.unwrap_or(Commands::Tree {
        depth: None,
        json: false,
    });

    match command {
        Commands::Tree { depth, json } => {
            let rendered = render::build(&app.tree, depth).await;
            if json {
                render::print_json(&rendered)?;
            } else {
                render::print_tree(&rendered);
            }
        }
        Commands::Status => status(&app).await,
        Commands::Settings => commands::settings(&app),
        Commands::Edit { scope } => commands::edit_config(&app, scope.into()).await?,
        Commands::Create { scope, folder } => {
            commands::create_folder(&app, scope.into(), folder.into()).await?
        }
        Commands::Setup { scope } => setup::run_setup(&app, scope.into()).await?,
        Commands::Open { path } => commands::open_file(&app, &path)?,
        Commands::NewFolder { parent, name } => {
            commands::new_entry(&app, &parent, name, EntryKind::Folder).await?
        }
        Commands::NewFile { parent, name } => {
            commands::new_entry(&app, &parent, name, EntryKind::File).await?
        }
        Commands::Rename { path, new_name } => commands::rename(&app, &path, new_name).await?,
        Commands::Delete { path } => commands::delete(&app, &path).await?,
        Commands::CopyName { path } => commands::copy_skill_name(&app, &path).await?,
        Commands::Watch { depth } => watch(&app, depth).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("✗").red().bold(), e);
        std::process::exit(1);
    }
}
