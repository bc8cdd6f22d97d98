//! Command-line interface for wpreadme.
//!
//! # Available Commands
//!
//! - `show` - Print one or more named segments of a readme
//! - `document` - Print the whole readme as HTML
//! - `contributors` - Resolve the `Contributors` header to profiles
//! - `config` - Manage the global configuration file
//! - `cache` - Manage the profile and response cache
//!
//! Every readme command takes exactly one source flag: `--file`, `--url`,
//! `--wpsvn` or `--github` (plus `--token` for private repositories).
//!
//! # Examples
//!
//! ```bash
//! wpreadme show title,version --wpsvn my-plugin/trunk/readme.txt
//! wpreadme document --github owner/repo/main/readme.txt > readme.html
//! wpreadme contributors --file ./readme.txt --json
//! wpreadme --no-cache show changelog --url https://example.com/readme.txt
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a custom config file
//! - `--no-cache` - Keep every cache in memory for this run

mod cache;
pub mod common;
mod config;
mod contributors;
mod document;
mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use common::CommandContext;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can run commands with a chosen
/// configuration without touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Custom path to the global configuration file.
    pub config_path: Option<PathBuf>,

    /// Keep every cache in memory for this run.
    pub no_cache: bool,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global `tracing` subscriber.
    ///
    /// `RUST_LOG` wins over the flag-derived level. Calling this twice is
    /// harmless; the second subscriber is ignored.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Parse WordPress readme.txt files into addressable, rendered segments.
#[derive(Parser, Debug)]
#[command(
    name = "wpreadme",
    about = "Parse WordPress readme.txt files into addressable, rendered segments",
    version,
    long_about = "wpreadme reads a WordPress-style readme.txt from a file, a URL, the plugin SVN or GitHub \
                  and prints its title, headers, sections, contributors or the whole document as HTML."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to custom global configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not read or write the on-disk cache
    #[arg(long, global = true)]
    no_cache: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one or more named segments.
    Show(show::ShowCommand),

    /// Print the whole readme as HTML.
    Document(document::DocumentCommand),

    /// Resolve the contributors to profiles.
    Contributors(contributors::ContributorsCommand),

    /// Manage the global configuration.
    Config(config::ConfigCommand),

    /// Manage the profile and response cache.
    Cache(cache::CacheCommand),
}

impl Cli {
    /// Execute the CLI with the configuration built from its flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            no_cache: self.no_cache,
        }
    }

    /// Execute the CLI with a specific configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let context = || CommandContext::load(config.config_path.clone(), config.no_cache);

        match self.command {
            Commands::Show(cmd) => cmd.execute(&context().await?).await,
            Commands::Document(cmd) => cmd.execute(&context().await?).await,
            Commands::Contributors(cmd) => cmd.execute(&context().await?).await,
            Commands::Cache(cmd) => cmd.execute(&context().await?).await,
            Commands::Config(cmd) => cmd.execute(config.config_path.clone()).await,
        }
    }
}
