//! Presenting scan results.

pub mod json;
pub mod text;

use crate::scan::RepoStatus;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render records in the requested format.
pub fn render(
    statuses: &[RepoStatus],
    format: OutputFormat,
    show_clean: bool,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => text::render(statuses, show_clean),
        OutputFormat::Json => json::render(statuses)?,
    })
}
