//! Global configuration management for wpreadme.
//!
//! This module handles the user configuration file (`~/.wpreadme/config.toml`) which
//! stores per-user defaults: the code-highlighting language, extra segment-name
//! translations, cache lifetimes and an optional GitHub token for private
//! repositories.
//!
//! # Configuration File Location
//!
//! - **Unix/macOS**: `~/.wpreadme/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\wpreadme\config.toml`
//!
//! The location can be overridden with the global `--config` flag.
//!
//! # File Format
//!
//! ```toml
//! code_language = "php"
//! github_token = "ghp_xxxxxxxxxxxx"
//!
//! [translations]
//! "Tested up to" = "Tested with WordPress"
//!
//! [cache]
//! enabled = true
//! profile_ttl = 86400
//! response_ttl = 3600
//! ```
//!
//! A missing file is not an error: every field has a default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::constants::{DEFAULT_PROFILE_TTL_SECS, DEFAULT_RESPONSE_TTL_SECS, GITHUB_TOKEN_ENV};

/// Cache settings for resolved profiles and rendered responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Whether the on-disk cache is used at all.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Lifetime of a resolved contributor profile, in seconds.
    #[serde(default = "default_profile_ttl")]
    pub profile_ttl: u64,

    /// Lifetime of a rendered `show` response, in seconds.
    #[serde(default = "default_response_ttl")]
    pub response_ttl: u64,

    /// Cache directory; defaults to `<config dir>/cache`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            profile_ttl: default_profile_ttl(),
            response_ttl: default_response_ttl(),
            dir: None,
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_profile_ttl() -> u64 {
    DEFAULT_PROFILE_TTL_SECS
}

fn default_response_ttl() -> u64 {
    DEFAULT_RESPONSE_TTL_SECS
}

fn is_default_cache_config(config: &CacheConfig) -> bool {
    *config == CacheConfig::default()
}

impl CacheConfig {
    /// Profile lifetime as a [`Duration`].
    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_ttl)
    }

    /// Response lifetime as a [`Duration`].
    pub fn response_ttl(&self) -> Duration {
        Duration::from_secs(self.response_ttl)
    }
}

/// Global configuration structure for wpreadme.
///
/// # Security Considerations
///
/// `github_token` is a credential. The file is written with `0600`
/// permissions on Unix and should never be committed.
///
/// # Examples
///
/// ```rust,no_run
/// use wpreadme_cli::config::GlobalConfig;
///
/// let mut config = GlobalConfig::default();
/// config.code_language = Some("php".to_string());
/// config.translations.insert("Changelog".to_string(), "History".to_string());
/// assert!(config.cache.enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlobalConfig {
    /// Default language added to plain `<code>` tags (`language-<x>` class).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,

    /// Token sent as `Authorization: Token <x>` for GitHub sources and as a
    /// bearer token to the GitHub users API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// User agent for outbound requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Extra segment-name translations, merged over the built-in table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,

    /// Cache settings.
    #[serde(default, skip_serializing_if = "is_default_cache_config")]
    pub cache: CacheConfig,
}

impl GlobalConfig {
    /// Load global configuration from the default platform-specific location.
    ///
    /// Returns a default configuration when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the default path cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an optional path, falling back to the default location.
    ///
    /// A missing file yields the default configuration.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(|| {
            Self::default_path().unwrap_or_else(|_| PathBuf::from("~/.wpreadme/config.toml"))
        });
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load global configuration from a specific file path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save to a specific path, creating parent directories.
    ///
    /// On Unix the file is restricted to the owner since it may hold a token.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(path)
                .await
                .with_context(|| format!("Failed to read permissions for {}", path.display()))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).await.with_context(|| {
                format!("Failed to set secure permissions on {}", path.display())
            })?;
        }

        Ok(())
    }

    /// Directory holding the configuration file and the default cache.
    ///
    /// - **Windows**: `%LOCALAPPDATA%\wpreadme`
    /// - **Unix/macOS**: `~/.wpreadme`
    pub fn config_dir() -> Result<PathBuf> {
        let dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("wpreadme")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".wpreadme")
        };
        Ok(dir)
    }

    /// Default file path for the global configuration.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Effective cache directory: `cache.dir` when set, else `<config dir>/cache`.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache.dir {
            Some(dir) => Ok(PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).as_ref())),
            None => Ok(Self::config_dir()?.join("cache")),
        }
    }

    /// Resolve the GitHub token: explicit value, then `GITHUB_ACCESS_TOKEN`, then config.
    #[must_use]
    pub fn github_token(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var(GITHUB_TOKEN_ENV).ok())
            .or_else(|| self.github_token.clone())
            .filter(|t| !t.trim().is_empty())
    }

    /// Example configuration written by `wpreadme config init`.
    #[must_use]
    pub fn init_example() -> Self {
        let mut translations = BTreeMap::new();
        translations.insert("Tested up to".to_string(), "Tested with WordPress".to_string());

        Self {
            code_language: Some("php".to_string()),
            github_token: None,
            user_agent: None,
            translations,
            cache: CacheConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_global_config_default() {
        let config = GlobalConfig::default();
        assert!(config.code_language.is_none());
        assert!(config.translations.is_empty());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.profile_ttl, 86_400);
    }

    #[tokio::test]
    async fn test_global_config_save_load() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("nested").join("config.toml");

        let mut config = GlobalConfig::init_example();
        config.cache.response_ttl = 120;
        config.save_to(&config_path).await.unwrap();

        let loaded = GlobalConfig::load_from(&config_path).await.unwrap();
        assert_eq!(loaded.code_language.as_deref(), Some("php"));
        assert_eq!(
            loaded.translations.get("Tested up to").map(String::as_str),
            Some("Tested with WordPress")
        );
        assert_eq!(loaded.cache.response_ttl, 120);
        assert_eq!(loaded.cache.profile_ttl, 86_400);
    }

    #[tokio::test]
    async fn test_missing_file_yields_default() {
        let temp = TempDir::new().unwrap();
        let config =
            GlobalConfig::load_with_optional(Some(temp.path().join("absent.toml"))).await.unwrap();
        assert!(config.github_token.is_none());
    }

    #[tokio::test]
    async fn test_invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "code_language = [").await.unwrap();
        assert!(GlobalConfig::load_from(&path).await.is_err());
    }

    #[test]
    fn test_default_cache_section_is_omitted() {
        let content = toml::to_string_pretty(&GlobalConfig::default()).unwrap();
        assert!(!content.contains("[cache]"));
    }

    #[test]
    fn test_explicit_cache_dir_wins() {
        let mut config = GlobalConfig::default();
        config.cache.dir = Some(PathBuf::from("/var/tmp/wpreadme"));
        assert_eq!(config.cache_dir().unwrap(), PathBuf::from("/var/tmp/wpreadme"));
    }

    #[test]
    fn test_explicit_token_has_precedence() {
        let config = GlobalConfig {
            github_token: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(config.github_token(Some("flag")).as_deref(), Some("flag"));
    }
}
