//! Styling for terminal output.
//!
//! This module uses the anstyle ecosystem:
//! - anstream for auto-detecting color support
//! - anstyle for composable styling
//! - Semantic style constants for domain-specific use

use anstyle::{AnsiColor, Color, Style};

// ============================================================================
// Re-exports from anstream (auto-detecting output)
// ============================================================================

/// Auto-detecting print that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::print;

/// Auto-detecting println that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::println;

/// Auto-detecting eprintln that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprintln;

// ============================================================================
// Semantic Style Constants
// ============================================================================

/// Error style (red) - use as `{ERROR}text{ERROR:#}`
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Warning style (yellow) - use as `{WARNING}text{WARNING:#}`
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Hint style (dimmed) - use as `{HINT}text{HINT:#}`
pub const HINT: Style = Style::new().dimmed();

/// Repository path header (bold)
pub const REPO: Style = Style::new().bold();

/// Current branch style (magenta + bold)
pub const CURRENT: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Magenta)));

/// Clean branch marker (green)
pub const CLEAN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Commits ahead of upstream (green)
pub const AHEAD: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Commits behind upstream (red)
pub const BEHIND: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

// ============================================================================
// Symbols
// ============================================================================

/// Prefix of every repository header line
pub const REPO_EMOJI: &str = "📁";

/// Dirty branch marker. Rendered with a trailing space so the emoji's
/// variation selector doesn't swallow the column.
pub const DIRTY_SYMBOL: &str = "⚠️ ";

/// Clean branch marker
pub const CLEAN_SYMBOL: &str = "✓ ";

/// Error emoji: `eprintln!("{ERROR_EMOJI} {ERROR}message{ERROR:#}")`
pub const ERROR_EMOJI: &str = "❌";

/// Warning emoji: `eprintln!("{WARNING_EMOJI} {WARNING}message{WARNING:#}")`
pub const WARNING_EMOJI: &str = "🟡";

pub const AHEAD_ARROW: &str = "↑";
pub const BEHIND_ARROW: &str = "↓";

// ============================================================================
// Styled Output Types
// ============================================================================

/// A piece of text with an optional style
#[derive(Clone, Debug)]
pub struct StyledString {
    pub text: String,
    pub style: Option<Style>,
}

impl StyledString {
    pub fn new(text: impl Into<String>, style: Option<Style>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::new(text, Some(style))
    }

    /// Renders to a string with ANSI escape codes
    pub fn render(&self) -> String {
        if let Some(style) = &self.style {
            format!("{}{}{}", style.render(), self.text, style.render_reset())
        } else {
            self.text.clone()
        }
    }
}

/// A line composed of multiple styled strings
#[derive(Clone, Debug, Default)]
pub struct StyledLine {
    pub segments: Vec<StyledString>,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw (unstyled) segment
    pub fn push_raw(&mut self, text: impl Into<String>) {
        self.segments.push(StyledString::raw(text));
    }

    /// Add a styled segment
    pub fn push_styled(&mut self, text: impl Into<String>, style: Style) {
        self.segments.push(StyledString::styled(text, style));
    }

    /// Renders the entire line with ANSI escape codes
    pub fn render(&self) -> String {
        self.segments.iter().map(|s| s.render()).collect()
    }

    /// The line's text with all styling dropped
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}
