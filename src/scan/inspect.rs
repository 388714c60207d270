//! Branch status inspection for a single repository.
//!
//! Inspection checks out every local branch in turn to read its working-tree
//! status, then puts HEAD back where it was. Steps within one repository are
//! strictly sequential because each checkout changes what the next step reads.

use std::path::Path;
use std::time::Duration;

use crate::git::{ChangeCounts, HeadState, Repository};
use crate::shell_exec::set_command_timeout;

use super::lock::RepoLocks;
use super::model::{BranchStatus, CHECKOUT_FAILED, RepoStatus, STATUS_FAILED};

/// Produces a [`RepoStatus`] for one repository.
///
/// Implementations report failures inside the returned record, never by panicking,
/// so one bad repository can't stop a scan.
pub trait Inspector: Send + Sync {
    fn inspect(&self, repo_path: &Path) -> RepoStatus;
}

/// [`Inspector`] backed by the `git` command-line tool.
#[derive(Debug, Clone, Default)]
pub struct GitInspector {
    include_clean: bool,
    command_timeout: Option<Duration>,
}

impl GitInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep clean branches in the result, not only dirty ones.
    pub fn include_clean(mut self, include_clean: bool) -> Self {
        self.include_clean = include_clean;
        self
    }

    /// Kill any single git command that runs longer than `timeout`.
    pub fn command_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.command_timeout = timeout;
        self
    }

    fn inspect_branch(
        &self,
        repo: &Repository,
        branch: &str,
        head: &HeadState,
        checked_out: &mut Option<String>,
    ) -> BranchStatus {
        let mut status = BranchStatus::clean(branch, head.branch() == Some(branch));

        if checked_out.as_deref() != Some(branch) {
            if let Err(e) = repo.checkout(branch) {
                log::warn!(
                    "Cannot checkout {} in {}: {}",
                    branch,
                    repo.path().display(),
                    e
                );
                status.status = CHECKOUT_FAILED.to_string();
                return status;
            }
            *checked_out = Some(branch.to_string());
        }

        match repo.porcelain_status() {
            Ok(output) if output.is_empty() => {}
            Ok(output) => {
                status.is_dirty = true;
                status.status = ChangeCounts::from_porcelain(&output).summary();
            }
            Err(e) => {
                log::warn!(
                    "Cannot get status for {} in {}: {}",
                    branch,
                    repo.path().display(),
                    e
                );
                status.status = STATUS_FAILED.to_string();
                return status;
            }
        }

        match repo.upstream_ahead_behind(branch) {
            Ok((ahead, behind)) => {
                status.ahead = ahead;
                status.behind = behind;
            }
            // No upstream configured is the common case, not a problem
            Err(e) => log::debug!("No upstream comparison for {}: {}", branch, e),
        }

        status
    }
}

impl Inspector for GitInspector {
    fn inspect(&self, repo_path: &Path) -> RepoStatus {
        set_command_timeout(self.command_timeout);
        let _guard = RepoLocks::global().acquire(repo_path);

        log::info!("Scanning {}", repo_path.display());
        let repo = Repository::at(repo_path);
        let mut result = RepoStatus::new(repo_path);

        let head = match repo.head_state() {
            Ok(head) => head,
            Err(e) => {
                log::warn!(
                    "Cannot get current branch for {}: {}",
                    repo_path.display(),
                    e
                );
                return result.failed(format!("Error getting current branch: {e}"));
            }
        };
        result.current_branch = head.label().to_string();

        let branches = match repo.local_branches() {
            Ok(branches) => branches,
            Err(e) => {
                log::warn!("Cannot list branches for {}: {}", repo_path.display(), e);
                return result.failed(format!("Error getting branches: {e}"));
            }
        };

        let mut checked_out = head.branch().map(str::to_owned);
        for branch in &branches {
            let status = self.inspect_branch(&repo, branch, &head, &mut checked_out);
            if status.is_dirty || self.include_clean {
                result.branches.push(status);
            }
        }

        // Best effort: the results are already computed either way
        if checked_out.as_deref() != head.branch()
            && let Err(e) = repo.restore_head(&head)
        {
            log::warn!(
                "Cannot return to {} in {}: {}",
                head.label(),
                repo_path.display(),
                e
            );
        }

        result
    }
}
