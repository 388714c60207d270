//! Repository discovery.
//!
//! Walks a directory tree looking for directories with a `.git` directory as an
//! immediate child. Excluded directories and anything deeper than the depth
//! limit are pruned: the walk never descends below them.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::git::Repository;

/// Directory names that are never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "vendor", ".git"];

/// Default traversal depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Deepest directory level that may be a repository root (root itself is 0)
    pub max_depth: usize,
    /// Directory names pruned wherever they appear
    pub excluded: HashSet<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            excluded: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DiscoveryOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Add directory names to prune, on top of the defaults.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    fn is_excluded(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.excluded.contains(name))
    }
}

/// Find repository roots under `root`, in a stable (file-name sorted) order.
///
/// Unreadable entries are skipped with a warning; discovery itself never fails.
/// Each repository appears once, identified by its canonical path.
pub fn find_repositories(root: &Path, options: &DiscoveryOptions) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    discover_repo_roots(root, 0, options, &mut candidates);

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|path| canonicalize_best_effort(&path))
        .filter(|path| seen.insert(path.clone()))
        .inspect(|path| log::info!("Found repository: {}", path.display()))
        .collect()
}

fn discover_repo_roots(dir: &Path, depth: usize, options: &DiscoveryOptions, out: &mut Vec<PathBuf>) {
    if Repository::is_repo_root(dir) {
        out.push(dir.to_path_buf());
        return;
    }
    if depth >= options.max_depth {
        return;
    }

    let read_dir = match std::fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) => {
            log::warn!("Cannot access {}: {}", dir.display(), err);
            return;
        }
    };

    let mut entries: Vec<_> = read_dir
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("Cannot read entry in {}: {}", dir.display(), err);
                None
            }
        })
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(err) => {
                log::warn!("Cannot access {}: {}", entry.path().display(), err);
                continue;
            }
        };
        // file_type() doesn't follow symlinks, so symlinked directories are skipped here
        if !file_type.is_dir() {
            continue;
        }
        if options.is_excluded(&entry.file_name()) {
            continue;
        }

        discover_repo_roots(&entry.path(), depth + 1, options, out);
    }
}

fn canonicalize_best_effort(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
