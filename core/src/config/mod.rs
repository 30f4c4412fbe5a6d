use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CLAUDEMAN_DIR: &str = ".claudeman";
const CLAUDE_DIR: &str = ".claude";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Overrides `~/.claude` as the global config directory.
    pub global_dir: Option<PathBuf>,
    pub use_trash: bool,
    pub editor: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            global_dir: None,
            use_trash: true,
            editor: None,
        }
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        load_or_init_from(&get_config_path())
    }

    pub fn global_dir(&self) -> PathBuf {
        self.global_dir.clone().unwrap_or_else(default_global_dir)
    }

    /// Editor command used to open files: config, then `$VISUAL`, `$EDITOR`, `vi`.
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_global_dir() -> PathBuf {
    home_dir().join(CLAUDE_DIR)
}

pub fn get_claudeman_dir() -> PathBuf {
    home_dir().join(CLAUDEMAN_DIR)
}

pub fn get_config_path() -> PathBuf {
    get_claudeman_dir().join("config.toml")
}

pub fn load_config_from(config_path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(config_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!("Config file not found at {}", config_path.display())
        } else {
            anyhow::anyhow!("Failed to read config from {}: {}", config_path.display(), e)
        }
    })?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", config_path.display()))
}

/// Loads the config at `config_path`, writing the defaults there first when
/// it does not exist yet. A failed write only costs persistence.
pub fn load_or_init_from(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        return load_config_from(config_path);
    }

    let config = Config::default();
    match write_new_config(&config, config_path) {
        Ok(()) => tracing::info!(path = %config_path.display(), "Created default config"),
        Err(e) => tracing::warn!("Could not create default config: {:#}", e),
    }
    Ok(config)
}

fn write_new_config(config: &Config, config_path: &Path) -> Result<()> {
    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| {
            format!("Failed to create claudeman directory at {}", dir.display())
        })?;
    }
    save_config_to(config, config_path)
}

pub fn save_config_to(config: &Config, config_path: &Path) -> Result<()> {
    let content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config to TOML")?;

    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
}
