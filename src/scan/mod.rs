//! Repository scanning: inspection, scheduling and result records.

mod inspect;
mod lock;
mod model;
mod orchestrate;

pub use inspect::{GitInspector, Inspector};
pub use lock::RepoLocks;
pub use model::{BranchStatus, CHECKOUT_FAILED, RepoStatus, STATUS_FAILED};
pub use orchestrate::{ScanMode, scan_repositories};
