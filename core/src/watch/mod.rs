use crate::locator::ConfigLocator;
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequest {
    pub path: PathBuf,
}

/// Decides which filesystem events should refresh the tree.
#[derive(Debug, Clone)]
pub struct RefreshFilter {
    global_dir: PathBuf,
    project_root: Option<PathBuf>,
}

impl RefreshFilter {
    pub fn new(global_dir: impl Into<PathBuf>, project_root: Option<PathBuf>) -> Self {
        Self {
            global_dir: global_dir.into(),
            project_root,
        }
    }

    pub fn from_locator(locator: &ConfigLocator) -> Self {
        Self::new(
            locator.global_dir(),
            locator.project_root().map(Path::to_path_buf),
        )
    }

    pub fn is_relevant(&self, path: &Path) -> bool {
        if path.starts_with(&self.global_dir) {
            return true;
        }

        let Some(root) = &self.project_root else {
            return false;
        };
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };

        relative.file_name() == Some(OsStr::new("CLAUDE.md"))
            || relative
                .components()
                .any(|c| c.as_os_str() == OsStr::new(".claude"))
    }

    /// Trees watched recursively once they exist: the global dir and the
    /// project's `.claude` folder.
    pub fn recursive_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![self.global_dir.clone()];
        if let Some(root) = &self.project_root {
            roots.push(root.join(".claude"));
        }
        roots
    }

    /// Existing recursive roots, plus the parent of a missing global dir and
    /// the project root itself, both shallow, so creations are seen.
    pub fn targets(&self) -> Vec<(PathBuf, RecursiveMode)> {
        let mut targets = vec![];

        if !self.global_dir.is_dir()
            && let Some(parent) = self.global_dir.parent()
            && parent.is_dir()
        {
            targets.push((parent.to_path_buf(), RecursiveMode::NonRecursive));
        }

        if let Some(root) = &self.project_root
            && root.is_dir()
        {
            targets.push((root.clone(), RecursiveMode::NonRecursive));
        }

        for dir in self.recursive_roots() {
            if dir.is_dir() {
                targets.push((dir, RecursiveMode::Recursive));
            }
        }

        targets
    }
}

/// Turns filesystem events under the config locations into refresh requests.
pub struct RefreshWatcher {
    watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<RefreshRequest>,
    recursive_roots: Vec<PathBuf>,
    armed: HashSet<PathBuf>,
}

impl RefreshWatcher {
    pub fn start(locator: &ConfigLocator) -> Result<Self> {
        let filter = RefreshFilter::from_locator(locator);
        let targets = filter.targets();
        let recursive_roots = filter.recursive_roots();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Watch error: {}", e);
                    return;
                }
            };
            if matches!(event.kind, EventKind::Access(_)) {
                return;
            }
            if let Some(path) = event.paths.into_iter().find(|p| filter.is_relevant(p)) {
                tracing::debug!("Refresh requested by {}", path.display());
                let _ = tx.send(RefreshRequest { path });
            }
        })
        .context("Failed to create filesystem watcher")?;

        let mut armed = HashSet::new();
        for (path, mode) in &targets {
            watcher
                .watch(path, *mode)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
            tracing::debug!("Watching {} ({:?})", path.display(), mode);
            if *mode == RecursiveMode::Recursive {
                armed.insert(path.clone());
            }
        }

        tracing::info!(targets = targets.len(), "Watcher started");

        Ok(Self {
            watcher,
            rx,
            recursive_roots,
            armed,
        })
    }

    pub async fn next(&mut self) -> Option<RefreshRequest> {
        let request = self.rx.recv().await?;
        self.rearm();
        Some(request)
    }

    /// Discards requests already queued, returning how many there were.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while self.rx.try_recv().is_ok() {
            drained += 1;
        }
        self.rearm();
        drained
    }

    /// Starts recursive watches on roots created since the last look and
    /// forgets roots that were removed, so a recreated one is watched again.
    fn rearm(&mut self) {
        for dir in &self.recursive_roots {
            if !dir.is_dir() {
                self.armed.remove(dir);
                continue;
            }
            if self.armed.contains(dir) {
                continue;
            }

            match self.watcher.watch(dir, RecursiveMode::Recursive) {
                Ok(()) => {
                    tracing::debug!("Watching {} (Recursive)", dir.display());
                    self.armed.insert(dir.clone());
                }
                Err(e) => tracing::warn!("Failed to watch {}: {}", dir.display(), e),
            }
        }
    }
}
