//! File system watcher for watch mode

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

const DEBOUNCE_MS: u64 = 300;

/// Directories never worth re-analyzing
const SKIPPED_DIRS: [&str; 3] = [".git", "target", "node_modules"];

/// Check if the path names a requirements document, by file-name suffix
pub fn is_requirement_file(p: &Path, patterns: &[&str]) -> bool {
    let Some(name) = p.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if p
        .components()
        .any(|c| SKIPPED_DIRS.iter().any(|d| c.as_os_str() == *d))
    {
        return false;
    }
    patterns.iter().any(|suffix| name.ends_with(suffix))
}

fn is_create_or_modify(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

/// Watches a file or directory for requirement document changes
pub struct RequirementWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<notify::Event>>,
    patterns: Vec<String>,
    /// Set when watching a single file: only that file is reported
    only: Option<PathBuf>,
}

impl RequirementWatcher {
    /// Start watching the given path (file or directory)
    pub fn watch(path: &Path, patterns: &[&str]) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_millis(DEBOUNCE_MS)),
        )?;

        let only = if path.is_dir() {
            watcher.watch(path, RecursiveMode::Recursive)?;
            None
        } else {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
            Some(path.file_name().map(PathBuf::from).unwrap_or_default())
        };
        tracing::debug!(path = %path.display(), "watching for changes");

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            only,
        })
    }

    fn wants(&self, p: &Path) -> bool {
        match self.only {
            Some(ref name) => p.file_name() == Some(name.as_os_str()),
            None => {
                let patterns: Vec<&str> = self.patterns.iter().map(String::as_str).collect();
                is_requirement_file(p, &patterns)
            }
        }
    }

    /// Collect requirement paths from an event
    fn paths_from_event(&self, event: &notify::Event) -> Vec<PathBuf> {
        if !is_create_or_modify(&event.kind) {
            return vec![];
        }
        event
            .paths
            .iter()
            .filter(|p| self.wants(p))
            .cloned()
            .collect()
    }

    /// Wait for the next batch of changes (debounced). Blocks until at least one change, then drains for DEBOUNCE_MS.
    pub fn next_changes(&self) -> Vec<PathBuf> {
        let mut all = HashSet::new();

        match self.receiver.recv_timeout(Duration::from_secs(3600)) {
            Ok(Ok(event)) => all.extend(self.paths_from_event(&event)),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "watch error");
                return vec![];
            }
            Err(_) => return vec![],
        }

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS));
        while let Ok(ev) = self.receiver.try_recv() {
            if let Ok(event) = ev {
                all.extend(self.paths_from_event(&event));
            }
        }

        let mut paths: Vec<PathBuf> = all.into_iter().collect();
        paths.sort();
        paths
    }
}
