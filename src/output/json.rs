//! JSON rendering for scripting.

use crate::scan::RepoStatus;

/// Pretty-printed array with one object per repository, newline-terminated.
pub fn render(statuses: &[RepoStatus]) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(statuses)?;
    out.push('\n');
    Ok(out)
}
