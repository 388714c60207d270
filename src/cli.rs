use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "gsw",
    version,
    about = "Find git repositories under a directory and report branches with uncommitted changes",
    long_about = None,
    after_help = "Long options take two dashes (--dir, --show-clean, --json). \
Single-dash spellings such as -dir or -json are rejected."
)]
pub struct Cli {
    /// Directory to scan.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Also list branches without uncommitted changes.
    #[arg(long, overrides_with = "no_show_clean")]
    pub show_clean: bool,

    /// Only list dirty branches, even if the config file sets `show_clean`.
    #[arg(long, overrides_with = "show_clean")]
    pub no_show_clean: bool,

    /// Print progress to stderr (-vv also logs every git command).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Maximum directory depth to search (default 10).
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Inspect repositories concurrently.
    #[arg(short, long)]
    pub parallel: bool,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Worker threads for --parallel (defaults to the CPU count).
    #[arg(
        short,
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..),
    )]
    pub jobs: Option<u16>,

    /// Directory name to skip during discovery (may be repeated).
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Path to the config TOML (defaults to `~/.config/gsw/config.toml`).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `Some` when a flag decided whether clean branches are listed; the last one given wins.
    pub fn show_clean_flag(&self) -> Option<bool> {
        match (self.show_clean, self.no_show_clean) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
