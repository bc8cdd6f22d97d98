//! Manage the global wpreadme configuration.
//!
//! The file lives at `~/.wpreadme/config.toml` (`%LOCALAPPDATA%\wpreadme\config.toml`
//! on Windows) unless `--config` points elsewhere. It holds the default
//! code language, extra translations, cache settings and an optional
//! GitHub token, so it should never be committed.
//!
//! # Examples
//!
//! ```bash
//! wpreadme config init            # write an example configuration
//! wpreadme config init --force    # overwrite an existing one
//! wpreadme config                 # same as `config show`
//! wpreadme config path
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::GlobalConfig;

/// Command to manage the global configuration file.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Configuration management operation to perform
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Write an example configuration.
    ///
    /// Refuses to overwrite an existing file unless `--force` is given.
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Display the current configuration with the token masked.
    ///
    /// This is the default when no subcommand is given.
    Show,

    /// Print the configuration file path.
    Path,
}

impl ConfigCommand {
    /// Execute the config command with an optional config path.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config_path = resolve_path(config_path);
        match self.command {
            Some(ConfigSubcommands::Init {
                force,
            }) => Self::init(force, &config_path).await,
            Some(ConfigSubcommands::Show) | None => Self::show(&config_path).await,
            Some(ConfigSubcommands::Path) => {
                println!("{}", config_path.display());
                Ok(())
            }
        }
    }

    async fn init(force: bool, config_path: &Path) -> Result<()> {
        if config_path.exists() && !force {
            println!("❌ Global config already exists at: {}", config_path.display());
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let config = GlobalConfig::init_example();
        config.save_to(config_path).await?;

        println!("✅ Created global config at: {}", config_path.display());
        println!("\n{}", "Example configuration:".bold());
        println!("{}", toml::to_string_pretty(&config)?);
        println!("\n{}", "Next steps:".yellow());
        println!("  1. Set code_language to the language of your plugin's code samples");
        println!("  2. Add github_token if you read readmes from private repositories");
        Ok(())
    }

    async fn show(config_path: &Path) -> Result<()> {
        let config = GlobalConfig::load_with_optional(Some(config_path.to_path_buf())).await?;

        println!("{}", "Global Configuration".bold());
        println!("Location: {}\n", config_path.display());

        if !config_path.exists() {
            println!("No configuration file; using defaults.");
            println!("\n{}", "Tip:".yellow());
            println!("  Run 'wpreadme config init' to create an example configuration");
        }
        println!("{}", toml::to_string_pretty(&masked(config))?);
        Ok(())
    }
}

fn resolve_path(config_path: Option<PathBuf>) -> PathBuf {
    config_path.unwrap_or_else(|| {
        GlobalConfig::default_path().unwrap_or_else(|_| PathBuf::from("~/.wpreadme/config.toml"))
    })
}

fn masked(mut config: GlobalConfig) -> GlobalConfig {
    if let Some(token) = &config.github_token {
        let visible: String = token.chars().take(4).collect();
        config.github_token = Some(format!("{visible}***"));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_init() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("nested").join("config.toml");

        ConfigCommand::init(false, &config_path).await.unwrap();
        assert!(config_path.exists());

        let mut edited = GlobalConfig::load_from(&config_path).await.unwrap();
        edited.code_language = Some("js".to_string());
        edited.save_to(&config_path).await.unwrap();

        // Without --force the edited file is left alone
        ConfigCommand::init(false, &config_path).await.unwrap();
        let loaded = GlobalConfig::load_from(&config_path).await.unwrap();
        assert_eq!(loaded.code_language.as_deref(), Some("js"));

        ConfigCommand::init(true, &config_path).await.unwrap();
        let loaded = GlobalConfig::load_from(&config_path).await.unwrap();
        assert_eq!(loaded.code_language.as_deref(), Some("php"));
    }

    #[tokio::test]
    async fn test_config_show_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigCommand::show(&temp.path().join("config.toml")).await.is_ok());
    }

    #[test]
    fn test_token_is_masked() {
        let config = GlobalConfig {
            github_token: Some("ghp_secretvalue".to_string()),
            ..GlobalConfig::default()
        };
        assert_eq!(masked(config).github_token.as_deref(), Some("ghp_***"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/custom.toml");
        assert_eq!(resolve_path(Some(path.clone())), path);
    }
}
