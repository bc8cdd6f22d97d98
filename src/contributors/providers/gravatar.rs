use serde::Deserialize;
use tracing::debug;

use super::{ProfileProvider, ProviderConfig, endpoint};
use crate::constants::GRAVATAR_PROFILE_URL;
use crate::contributors::profile::{ProviderKind, RawProfile};
use crate::source::FetchRequest;

/// gravatar.com JSON profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gravatar;

#[derive(Debug, Deserialize)]
struct GravatarResponse {
    #[serde(default)]
    entry: Vec<GravatarEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GravatarEntry {
    preferred_username: Option<String>,
    display_name: Option<String>,
    profile_url: Option<String>,
    thumbnail_url: Option<String>,
}

impl ProfileProvider for Gravatar {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gravatar
    }

    fn request(&self, key: &str, config: &ProviderConfig) -> FetchRequest {
        FetchRequest::new(endpoint(GRAVATAR_PROFILE_URL, key))
            .with_header("Accept", "application/json")
            .with_header("User-Agent", config.user_agent.as_str())
    }

    fn parse(&self, key: &str, body: &str) -> Option<RawProfile> {
        let response: GravatarResponse = match serde_json::from_str(body) {
            Ok(response) => response,
            Err(e) => {
                debug!("Unreadable Gravatar profile for {key}: {e}");
                return None;
            }
        };
        let entry = response.entry.into_iter().next()?;

        Some(RawProfile {
            canonical_key: entry.preferred_username,
            display_name: entry.display_name,
            profile_url: entry.profile_url,
            avatar_url: entry.thumbnail_url,
        })
    }
}
