//! Identity providers.
//!
//! Each provider only knows how to build its lookup request and how to read
//! the response. Caching, fetching and placeholder fallback are shared and
//! live in [`ContributorResolver`](super::ContributorResolver).

mod github;
mod gravatar;
mod wordpress;

pub use github::GitHub;
pub use gravatar::Gravatar;
pub use wordpress::WordPress;

use std::time::Duration;

use super::profile::{ProviderKind, RawProfile};
use crate::constants::{DEFAULT_PROFILE_TTL_SECS, DEFAULT_USER_AGENT};
use crate::source::FetchRequest;

/// Settings shared by every provider lookup.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// User agent sent to providers that reject anonymous clients.
    pub user_agent: String,
    /// Optional GitHub API token.
    pub github_token: Option<String>,
    /// How long a resolved profile stays cached.
    pub profile_ttl: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            github_token: None,
            profile_ttl: Duration::from_secs(DEFAULT_PROFILE_TTL_SECS),
        }
    }
}

/// One identity source.
pub trait ProfileProvider: Send + Sync {
    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// The single request that looks `key` up.
    fn request(&self, key: &str, config: &ProviderConfig) -> FetchRequest;

    /// Read a response body. `None` when it holds no usable profile.
    fn parse(&self, key: &str, body: &str) -> Option<RawProfile>;
}

/// The provider implementation for `kind`.
pub fn provider_for(kind: ProviderKind) -> &'static dyn ProfileProvider {
    match kind {
        ProviderKind::Gravatar => &Gravatar,
        ProviderKind::GitHub => &GitHub,
        ProviderKind::WordPress => &WordPress,
    }
}

fn endpoint(template: &str, key: &str) -> String {
    template.replace("{key}", key)
}
