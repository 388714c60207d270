//! Per-repository mutual exclusion.
//!
//! Inspecting a repository checks out each of its branches in turn, so two
//! inspections of the same working tree must never interleave. Every
//! inspection holds its repository's lock for its whole duration.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use dashmap::DashMap;

use crate::sync::{OwnedLock, OwnedLockGuard};

static GLOBAL: OnceLock<RepoLocks> = OnceLock::new();

/// Registry of locks keyed by canonical repository path.
#[derive(Default)]
pub struct RepoLocks {
    locks: DashMap<PathBuf, OwnedLock>,
}

impl RepoLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`super::GitInspector`].
    pub fn global() -> &'static RepoLocks {
        GLOBAL.get_or_init(RepoLocks::new)
    }

    /// Block until no other holder has `repo_path`, then hold it until the guard drops.
    ///
    /// Paths are canonicalized first so `repo` and `repo/../repo` share a lock.
    pub fn acquire(&self, repo_path: &Path) -> OwnedLockGuard {
        let key = dunce::canonicalize(repo_path).unwrap_or_else(|_| repo_path.to_path_buf());
        // Clone out of the map so the shard lock isn't held while waiting
        let lock = self.locks.entry(key).or_default().clone();
        lock.lock()
    }

    /// Number of repositories that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
