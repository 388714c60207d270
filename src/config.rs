//! User configuration
//!
//! Settings are layered, later sources winning:
//! 1. Built-in defaults
//! 2. `<config dir>/gsw/config.toml` (or the file given with `--config`)
//! 3. `GSW_*` environment variables (`GSW_MAX_DEPTH=4`, `GSW_EXCLUDE=target,dist`)
//! 4. Command-line flags, applied by the caller
//!
//! ```toml
//! max_depth = 6
//! jobs = 8
//! exclude = ["target", "dist"]
//! show_clean = false
//! command_timeout = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use etcetera::BaseStrategy;
use serde::Deserialize;

use crate::discovery::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Traversal depth limit
    pub max_depth: usize,
    /// Worker threads for parallel scans; unset means one per CPU
    pub jobs: Option<usize>,
    /// Directory names to prune in addition to the built-in ones
    pub exclude: Vec<String>,
    /// Include clean branches in the output
    pub show_clean: bool,
    /// Seconds before a single git command is killed; unset means no limit
    pub command_timeout: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            jobs: None,
            exclude: Vec::new(),
            show_clean: false,
            command_timeout: None,
        }
    }
}

impl Settings {
    /// Load settings from the config file and the environment.
    ///
    /// An explicitly named file must exist; the default one is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let file = match explicit {
            Some(path) => Some((path.to_path_buf(), true)),
            None => default_config_path().map(|path| (path, false)),
        };
        Self::load_from(file.as_ref().map(|(p, req)| (p.as_path(), *req)), "GSW")
    }

    fn load_from(file: Option<(&Path, bool)>, env_prefix: &str) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some((path, required)) = file {
            log::debug!("Loading config from {}", path.display());
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        // No nesting separator, so GSW_MAX_DEPTH maps to the flat `max_depth` key
        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("exclude"),
        );

        let config = builder.build().context("Failed to load configuration")?;
        let settings: Settings = config
            .try_deserialize()
            .context("Invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.jobs == Some(0) {
            anyhow::bail!("jobs must be at least 1");
        }
        if self.command_timeout == Some(0) {
            anyhow::bail!("command_timeout must be at least 1 second");
        }
        Ok(())
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout.map(Duration::from_secs)
    }
}

/// `$XDG_CONFIG_HOME/gsw/config.toml`, or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("gsw").join("config.toml"))
}
