//! Human-readable rendering.

use color_print::cformat;

use crate::scan::{BranchStatus, RepoStatus};
use crate::styling::{
    AHEAD, AHEAD_ARROW, BEHIND, BEHIND_ARROW, CLEAN, CLEAN_SYMBOL, CURRENT, DIRTY_SYMBOL, ERROR,
    HINT, REPO, REPO_EMOJI, StyledLine, WARNING,
};

/// Render all records, with a header counting them.
///
/// Output carries ANSI styling; print it through `anstream` so the styling
/// is dropped when stdout isn't a terminal.
pub fn render(statuses: &[RepoStatus], show_clean: bool) -> String {
    if statuses.is_empty() {
        return "No git repositories found.\n".to_string();
    }

    let count = statuses.len();
    let noun = if count == 1 { "repository" } else { "repositories" };
    let mut out = format!("Found {count} git {noun}:\n\n");
    for status in statuses {
        out.push_str(&render_repo(status, show_clean));
    }
    out
}

/// Render one repository block, including its trailing blank line.
pub fn render_repo(status: &RepoStatus, show_clean: bool) -> String {
    let mut header = StyledLine::new();
    header.push_raw(format!("{REPO_EMOJI} "));
    header.push_styled(status.path.display().to_string(), REPO);

    if let Some(error) = &status.error {
        header.push_styled(format!(" - ERROR: {error}"), ERROR);
        return format!("{}\n\n", header.render());
    }

    let mut out = format!("{}\n", header.render());
    if status.branches.is_empty() || (!status.has_dirty_branch() && !show_clean) {
        out.push_str(&cformat!("   <green>✓</> All branches clean\n\n"));
        return out;
    }

    for branch in &status.branches {
        out.push_str(&branch_line(branch).render());
        out.push('\n');
    }
    out.push('\n');
    out
}

/// `   ⚠️  feature * [↑3 ↓1] - 2 modified`
pub fn branch_line(branch: &BranchStatus) -> StyledLine {
    let mut line = StyledLine::new();
    line.push_raw("   ");
    if branch.is_dirty {
        line.push_styled(DIRTY_SYMBOL, WARNING);
    } else {
        line.push_styled(CLEAN_SYMBOL, CLEAN);
    }
    line.push_raw(" ");

    if branch.current {
        line.push_styled(format!("{} *", branch.name), CURRENT);
    } else {
        line.push_raw(branch.name.as_str());
    }

    if branch.has_upstream_difference() {
        line.push_raw(" [");
        if branch.ahead > 0 {
            line.push_styled(format!("{AHEAD_ARROW}{}", branch.ahead), AHEAD);
        }
        if branch.ahead > 0 && branch.behind > 0 {
            line.push_raw(" ");
        }
        if branch.behind > 0 {
            line.push_styled(format!("{BEHIND_ARROW}{}", branch.behind), BEHIND);
        }
        line.push_raw("]");
    }

    line.push_raw(" - ");
    let status_style = if branch.is_dirty {
        WARNING
    } else if branch.status == "Clean" {
        HINT
    } else {
        ERROR
    };
    line.push_styled(branch.status.as_str(), status_style);
    line
}
