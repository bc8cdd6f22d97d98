//! Contributor identity resolution.
//!
//! The `Contributors` header is a comma-separated list of free-form
//! references: WordPress.org usernames, e-mail addresses, `id@provider`
//! handles and inline markdown links. Each token is classified
//! ([`classify`]), resolved against one provider with caching, and the
//! results are merged in token order.
//!
//! Resolution never fails. A provider that is unreachable, answers with an
//! error status or returns something unreadable yields a placeholder record
//! built from the best text available, and that placeholder is not cached.
//!
//! # Cache keys
//!
//! `profile:<provider>:<identifier>`, e.g. `profile:github:alice`. The
//! record is stored without any display-name override so a later lookup of
//! the same identity from a different token is not affected by it.

pub mod classify;
pub mod profile;
pub mod providers;

pub use classify::{ContributorRef, classify, email_hash};
pub use profile::{ProfileRecord, ProviderKind, RawProfile};
pub use providers::{ProfileProvider, ProviderConfig, provider_for};

use futures::future::join_all;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{ObjectCache, get_json, set_json};
use crate::markdown::{MarkdownRenderer, render_inline};
use crate::source::TextFetcher;

/// Ordered `canonical key → record` mapping.
pub type ProfileMap = IndexMap<String, ProfileRecord>;

/// Shared cache/fetch/placeholder wrapper around the providers.
#[derive(Clone)]
pub struct ContributorResolver {
    fetcher: Arc<dyn TextFetcher>,
    cache: Arc<dyn ObjectCache>,
    config: ProviderConfig,
}

impl std::fmt::Debug for ContributorResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContributorResolver").field("config", &self.config).finish_non_exhaustive()
    }
}

impl ContributorResolver {
    /// Create a resolver over a fetcher and a cache.
    pub fn new(
        fetcher: Arc<dyn TextFetcher>,
        cache: Arc<dyn ObjectCache>,
        config: ProviderConfig,
    ) -> Self {
        Self {
            fetcher,
            cache,
            config,
        }
    }

    /// Provider settings in use.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Same fetcher and cache, different provider settings.
    #[must_use]
    pub fn with_config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve `key` with one provider.
    ///
    /// `text` is the readable identifier used for a placeholder, `hint` a
    /// display name that wins over the provider's.
    pub async fn resolve(
        &self,
        provider: &dyn ProfileProvider,
        key: &str,
        text: &str,
        hint: Option<&str>,
    ) -> ProfileRecord {
        let kind = provider.kind();
        let cache_key = format!("profile:{kind}:{key}");

        let record = match get_json::<ProfileRecord>(self.cache.as_ref(), &cache_key).await {
            Some(cached) => {
                debug!("Profile cache hit for {cache_key}");
                Some(cached)
            }
            None => self.lookup(provider, key, &cache_key).await,
        };

        let mut record = record.unwrap_or_else(|| placeholder(kind, key, text, hint));
        if let Some(hint) = hint {
            record.display_name = hint.to_string();
        }
        record
    }

    async fn lookup(
        &self,
        provider: &dyn ProfileProvider,
        key: &str,
        cache_key: &str,
    ) -> Option<ProfileRecord> {
        let request = provider.request(key, &self.config);
        let body = match self.fetcher.fetch(&request).await {
            Ok(body) => body,
            Err(e) => {
                debug!("{} lookup for {key} failed: {e:#}", provider.kind());
                return None;
            }
        };

        let Some(raw) = provider.parse(key, &body) else {
            debug!("{} returned no usable profile for {key}", provider.kind());
            return None;
        };
        let record = raw.into_record(key);

        if let Err(e) =
            set_json(self.cache.as_ref(), cache_key, &record, self.config.profile_ttl).await
        {
            warn!("Failed to cache profile {cache_key}: {e:#}");
        }
        Some(record)
    }

    /// Resolve one classified reference.
    pub async fn resolve_ref(&self, reference: &ContributorRef) -> ProfileRecord {
        match reference {
            ContributorRef::Direct(record) => record.clone(),
            ContributorRef::Lookup {
                provider,
                key,
                text,
                hint,
            } => self.resolve(provider_for(*provider), key, text, hint.as_deref()).await,
        }
    }

    /// Resolve every token of a `Contributors` header value.
    ///
    /// Lookups run concurrently; the result keeps token order and the first
    /// record seen for each canonical key.
    pub async fn resolve_all(&self, header: &str) -> ProfileMap {
        let references: Vec<ContributorRef> = header.split(',').filter_map(classify).collect();
        let records = join_all(references.iter().map(|r| self.resolve_ref(r))).await;
        merge_first_wins(records)
    }

    /// Comma-separated display form: `[name](profile)` rendered inline, or
    /// the bare name when there is no profile URL.
    pub async fn display(&self, header: &str, renderer: &dyn MarkdownRenderer) -> String {
        display_profiles(&self.resolve_all(header).await, renderer)
    }
}

fn placeholder(kind: ProviderKind, key: &str, text: &str, hint: Option<&str>) -> ProfileRecord {
    let text = if text.is_empty() { key } else { text };
    let name = match hint {
        Some(hint) => hint,
        None if kind == ProviderKind::Gravatar => text.split('@').next().unwrap_or(text),
        None => text,
    };
    debug!("Using placeholder profile for {kind}:{key}");
    ProfileRecord::placeholder(text, name)
}

/// Merge records in order; a later record never replaces an earlier one
/// with the same canonical key.
pub fn merge_first_wins(records: impl IntoIterator<Item = ProfileRecord>) -> ProfileMap {
    let mut merged = ProfileMap::new();
    for record in records {
        merged.entry(record.canonical_key.clone()).or_insert(record);
    }
    merged
}

/// Render a profile map as the comma-separated display string.
pub fn display_profiles(profiles: &ProfileMap, renderer: &dyn MarkdownRenderer) -> String {
    profiles
        .values()
        .map(|p| {
            if p.profile_url.is_empty() {
                p.display_name.clone()
            } else {
                render_inline(renderer, &format!("[{}]({})", p.display_name, p.profile_url))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
