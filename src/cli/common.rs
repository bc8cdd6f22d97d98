//! Common utilities for CLI commands

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::cache::{FileCache, MemoryCache, ObjectCache};
use crate::config::GlobalConfig;
use crate::constants::DEFAULT_USER_AGENT;
use crate::contributors::ProviderConfig;
use crate::core::ReadmeError;
use crate::readme::{ParserOptions, ReadmeParser};
use crate::source::{HttpFetcher, SourceLocator};

/// Where to read the readme from. Exactly one source flag is accepted.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Local readme file (`~` is expanded)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["url", "wpsvn", "github"])]
    pub file: Option<String>,

    /// Readme at any HTTP(S) URL
    #[arg(long, value_name = "URL", conflicts_with_all = ["wpsvn", "github"])]
    pub url: Option<String>,

    /// Path in the WordPress plugin SVN, e.g. `my-plugin/trunk/readme.txt`
    #[arg(long, value_name = "PATH", conflicts_with = "github")]
    pub wpsvn: Option<String>,

    /// Path in a GitHub repository, e.g. `owner/repo/main/readme.txt`
    #[arg(long, value_name = "PATH")]
    pub github: Option<String>,

    /// GitHub token for private repositories and the users API
    ///
    /// Falls back to `GITHUB_ACCESS_TOKEN`, then to `github_token` in the
    /// global configuration.
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,
}

impl SourceArgs {
    /// Turn the flags into a locator.
    ///
    /// # Errors
    ///
    /// [`ReadmeError::InvalidLocator`] when no source flag was given.
    pub fn locator(&self, config: &GlobalConfig) -> Result<SourceLocator> {
        let candidates = [
            ("file", &self.file),
            ("url", &self.url),
            ("wpsvn", &self.wpsvn),
            ("github", &self.github),
        ];
        let Some((kind, value)) =
            candidates.into_iter().find_map(|(kind, value)| value.as_deref().map(|v| (kind, v)))
        else {
            return Err(ReadmeError::InvalidLocator {
                locator: "no source given".to_string(),
            }
            .into());
        };
        SourceLocator::from_kind(kind, value, config.github_token(self.token.as_deref()))
    }
}

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct CommandContext {
    /// Loaded global configuration (defaults when the file is missing).
    pub config: GlobalConfig,
    /// `--config` override, if any.
    pub config_path: Option<PathBuf>,
    /// `--no-cache`: keep every cache in memory for this run only.
    pub no_cache: bool,
}

impl CommandContext {
    /// Load the global configuration.
    pub async fn load(config_path: Option<PathBuf>, no_cache: bool) -> Result<Self> {
        let config = GlobalConfig::load_with_optional(config_path.clone())
            .await
            .context("Failed to load global configuration")?;
        Ok(Self {
            config,
            config_path,
            no_cache,
        })
    }

    /// The cache used for profiles and rendered responses.
    ///
    /// On disk unless caching is disabled by flag or configuration.
    pub fn cache(&self) -> Result<Arc<dyn ObjectCache>> {
        if self.no_cache || !self.config.cache.enabled {
            debug!("Using an in-memory cache for this run");
            return Ok(Arc::new(MemoryCache::new()));
        }
        Ok(Arc::new(FileCache::with_dir(self.config.cache_dir()?)))
    }

    /// User agent for outbound requests.
    pub fn user_agent(&self) -> &str {
        self.config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// A parsing session configured from the global configuration.
    pub fn parser(&self, cache: Arc<dyn ObjectCache>, token: Option<&str>) -> Result<ReadmeParser> {
        let fetcher = HttpFetcher::new(self.user_agent())?;

        let mut options = ParserOptions::default();
        if let Some(language) = &self.config.code_language {
            options.set_code_language(language);
        }
        options.translations.merge_map(&self.config.translations);

        let providers = ProviderConfig {
            user_agent: self.user_agent().to_string(),
            github_token: self.config.github_token(token),
            profile_ttl: self.config.cache.profile_ttl(),
        };

        Ok(ReadmeParser::new(Arc::new(fetcher), cache)
            .with_provider_config(providers)
            .with_options(options))
    }

    /// Load the readme named by `source` into a fresh session.
    pub async fn load_readme(
        &self,
        source: &SourceArgs,
        cache: Arc<dyn ObjectCache>,
    ) -> Result<ReadmeParser> {
        let locator = source.locator(&self.config)?;
        let mut parser = self.parser(cache, source.token.as_deref())?;
        parser.load(&locator).await?;
        Ok(parser)
    }
}
