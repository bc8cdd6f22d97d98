//! Manage the on-disk profile and response cache.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::common::CommandContext;
use crate::cache::{FileCache, ObjectCache};

/// Inspect or clear the cache directory.
#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    command: CacheSubcommands,
}

#[derive(Subcommand, Debug)]
enum CacheSubcommands {
    /// Remove every cached profile and rendered response.
    Clear,
    /// Print the cache directory.
    Path,
}

impl CacheCommand {
    /// Execute against the configured cache directory.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let cache = FileCache::with_dir(ctx.config.cache_dir()?);
        match self.command {
            CacheSubcommands::Clear => {
                cache.clear().await?;
                println!("✅ Cleared cache at: {}", cache.cache_dir().display().to_string().green());
            }
            CacheSubcommands::Path => println!("{}", cache.cache_dir().display()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheConfig, GlobalConfig};
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clear_empties_configured_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");
        let ctx = CommandContext {
            config: GlobalConfig {
                cache: CacheConfig {
                    dir: Some(dir.clone()),
                    ..CacheConfig::default()
                },
                ..GlobalConfig::default()
            },
            config_path: None,
            no_cache: false,
        };

        let cache = FileCache::with_dir(dir.clone());
        cache.set("profile:github:alice", serde_json::json!({}), Duration::from_secs(60)).await.unwrap();
        assert!(cache.get("profile:github:alice").await.is_some());

        CacheCommand {
            command: CacheSubcommands::Clear,
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert!(cache.get("profile:github:alice").await.is_none());
    }
}
