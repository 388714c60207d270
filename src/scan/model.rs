//! Scan result records.
//!
//! Field names serialize to the JSON shape the presenter emits.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};

/// Status message for a branch that could not be checked out.
pub const CHECKOUT_FAILED: &str = "Error checking out branch";

/// Status message for a branch whose working-tree status could not be read.
pub const STATUS_FAILED: &str = "Error getting status";

/// One local branch's observed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStatus {
    pub name: String,
    pub current: bool,
    #[serde(rename = "dirty")]
    pub is_dirty: bool,
    pub ahead: usize,
    pub behind: usize,
    pub status: String,
}

impl BranchStatus {
    /// A clean branch with no upstream difference.
    pub fn clean(name: impl Into<String>, current: bool) -> Self {
        Self {
            name: name.into(),
            current,
            is_dirty: false,
            ahead: 0,
            behind: 0,
            status: "Clean".to_string(),
        }
    }

    pub fn has_upstream_difference(&self) -> bool {
        self.ahead > 0 || self.behind > 0
    }
}

/// One repository's aggregate result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatus {
    /// Non-UTF-8 bytes are replaced with U+FFFD when serialized
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub current_branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub branches: Vec<BranchStatus>,
}

impl RepoStatus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current_branch: String::new(),
            error: None,
            branches: Vec::new(),
        }
    }

    /// A repository-level failure: the message is kept, branch data is dropped.
    pub fn failed(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self.branches.clear();
        self
    }

    pub fn has_dirty_branch(&self) -> bool {
        self.branches.iter().any(|b| b.is_dirty)
    }
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
