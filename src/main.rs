use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gsw::config::Settings;
use gsw::discovery::{DiscoveryOptions, find_repositories};
use gsw::output::{self, OutputFormat};
use gsw::scan::{GitInspector, ScanMode, scan_repositories};
use gsw::styling::{ERROR, ERROR_EMOJI, HINT, WARNING, WARNING_EMOJI, eprintln, print};

mod cli;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{ERROR_EMOJI} {ERROR}{err:#}{ERROR:#}");
        std::process::exit(1);
    }
}

/// Errors only by default; `-v` adds progress, `-vv` every git command.
/// `RUST_LOG` takes precedence over both.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Error => writeln!(
                buf,
                "{ERROR_EMOJI} {ERROR}{}{ERROR:#}",
                record.args()
            ),
            log::Level::Warn => writeln!(
                buf,
                "{WARNING_EMOJI} {WARNING}{}{WARNING:#}",
                record.args()
            ),
            log::Level::Info => writeln!(buf, "{}", record.args()),
            _ => writeln!(buf, "{HINT}{}{HINT:#}", record.args()),
        })
        .init();
}

/// Effective options after layering CLI flags over the loaded settings.
struct Options {
    root: PathBuf,
    discovery: DiscoveryOptions,
    mode: ScanMode,
    format: OutputFormat,
    show_clean: bool,
    settings: Settings,
}

impl Options {
    fn resolve(cli: Cli) -> anyhow::Result<Self> {
        let settings = Settings::load(cli.config.as_deref())?;
        let show_clean = cli.show_clean_flag().unwrap_or(settings.show_clean);

        let root = dunce::canonicalize(&cli.dir)
            .with_context(|| format!("Cannot resolve directory {}", cli.dir.display()))?;
        if !root.is_dir() {
            anyhow::bail!("{} is not a directory", root.display());
        }

        let discovery = DiscoveryOptions::default()
            .with_max_depth(cli.max_depth.unwrap_or(settings.max_depth))
            .exclude(settings.exclude.iter().cloned())
            .exclude(cli.exclude);

        let mode = if cli.parallel {
            ScanMode::Parallel {
                jobs: cli.jobs.map(usize::from).or(settings.jobs),
            }
        } else {
            ScanMode::Sequential
        };

        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Ok(Self {
            root,
            discovery,
            mode,
            format,
            show_clean,
            settings,
        })
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = Options::resolve(cli)?;
    which::which("git").context("git was not found on PATH")?;

    log::info!("Scanning directory: {}", options.root.display());
    log::info!("Show clean branches: {}", options.show_clean);
    log::info!("Parallel processing: {}", options.mode != ScanMode::Sequential);
    log::info!("Output format: {}", options.format);

    let repos = find_repositories(&options.root, &options.discovery);
    log::info!("Found {} repositories", repos.len());

    let inspector = GitInspector::new()
        .include_clean(options.show_clean)
        .command_timeout(options.settings.command_timeout());
    let statuses = scan_repositories(&repos, options.mode, &inspector)?;

    print!(
        "{}",
        output::render(&statuses, options.format, options.show_clean)?
    );
    Ok(())
}
