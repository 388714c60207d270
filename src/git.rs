//! Git access through the `git` command-line tool.
//!
//! Every query runs `git` inside the repository directory and parses its
//! text output. Nothing here holds state beyond the repository path.

use std::path::{Path, PathBuf};

use crate::shell_exec::Cmd;

mod error;
pub mod status;

pub use error::GitError;
pub use status::{ChangeCounts, ChangeKind};

/// What HEAD pointed at when a repository was first looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    /// A local branch is checked out
    Branch(String),
    /// Detached HEAD at the given commit
    Detached(String),
}

impl HeadState {
    /// The checked-out branch name, if any.
    pub fn branch(&self) -> Option<&str> {
        match self {
            HeadState::Branch(name) => Some(name),
            HeadState::Detached(_) => None,
        }
    }

    /// Name shown for the current branch; git's own `HEAD` when detached.
    pub fn label(&self) -> &str {
        match self {
            HeadState::Branch(name) => name,
            HeadState::Detached(_) => "HEAD",
        }
    }
}

/// Repository context for git operations.
///
/// ```no_run
/// use gsw::git::Repository;
///
/// let repo = Repository::at("/path/to/repo");
/// let branches = repo.local_branches()?;
/// # Ok::<(), gsw::git::GitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path this repository context operates on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether `dir` has a `.git` directory as an immediate child.
    pub fn is_repo_root(dir: &Path) -> bool {
        dir.join(".git")
            .metadata()
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Get what HEAD currently points at.
    ///
    /// Fails on repositories without commits (unborn HEAD) or with corrupted state.
    pub fn head_state(&self) -> Result<HeadState, GitError> {
        // Full ref name: `--abbrev-ref` turns into `heads/<name>` when a tag shares the name
        let stdout = self.run_command(&["rev-parse", "--symbolic-full-name", "HEAD"])?;
        let name = stdout.trim();

        if let Some(branch) = name.strip_prefix("refs/heads/") {
            return Ok(HeadState::Branch(branch.to_string()));
        }
        if name != "HEAD" {
            return Err(GitError::ParseError(format!(
                "unexpected HEAD reference: {name:?}"
            )));
        }

        let sha = self.run_command(&["rev-parse", "HEAD"])?;
        Ok(HeadState::Detached(sha.trim().to_string()))
    }

    /// List all local branches, in git's (refname) order.
    pub fn local_branches(&self) -> Result<Vec<String>, GitError> {
        // lstrip=2 instead of refname:short - short names gain a "heads/" prefix
        // when a remote-tracking ref has the same name
        let stdout = self.run_command(&[
            "for-each-ref",
            "--format=%(refname:lstrip=2)",
            "refs/heads/",
        ])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect())
    }

    /// Check out a local branch, quietly.
    pub fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run_command(&["checkout", "-q", branch]).map(drop)
    }

    /// Put HEAD back where [`Repository::head_state`] found it.
    pub fn restore_head(&self, head: &HeadState) -> Result<(), GitError> {
        match head {
            HeadState::Branch(name) => self.checkout(name),
            HeadState::Detached(sha) => self
                .run_command(&["checkout", "-q", "--detach", sha])
                .map(drop),
        }
    }

    /// Raw `git status --porcelain` output for the working tree.
    pub fn porcelain_status(&self) -> Result<String, GitError> {
        self.run_command(&["status", "--porcelain"])
    }

    /// Commits `branch` is ahead of and behind its configured upstream.
    ///
    /// Fails when no upstream is configured; callers treat that as `(0, 0)`.
    pub fn upstream_ahead_behind(&self, branch: &str) -> Result<(usize, usize), GitError> {
        // Left side fully qualified so a tag with the branch's name can't shadow it;
        // `@{u}` already resolves through the branch config
        let range = format!("refs/heads/{branch}...{branch}@{{u}}");
        let stdout = self.run_command(&["rev-list", "--left-right", "--count", &range])?;
        parse_left_right_counts(&stdout)
    }

    /// Run a git command in this repository and return its stdout.
    pub fn run_command(&self, args: &[&str]) -> Result<String, GitError> {
        let cmd = Cmd::new("git")
            .args(args.iter().copied())
            .current_dir(&self.path)
            .context(self.log_context())
            // Keep git's messages in English so they read the same in every record
            .env("LC_ALL", "C");
        let command = cmd.display();

        let output = cmd
            .run()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn log_context(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Parse `git rev-list --left-right --count` output ("<left>\t<right>").
fn parse_left_right_counts(output: &str) -> Result<(usize, usize), GitError> {
    let mut fields = output.split_whitespace().map(str::parse::<usize>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(ahead)), Some(Ok(behind)), None) => Ok((ahead, behind)),
        _ => Err(GitError::ParseError(format!(
            "unexpected rev-list count output: {:?}",
            output.trim()
        ))),
    }
}
