use regex::Regex;
use std::sync::LazyLock;

use super::{ProfileProvider, ProviderConfig, endpoint};
use crate::constants::WORDPRESS_PROFILE_URL;
use crate::contributors::profile::{ProviderKind, RawProfile};
use crate::source::FetchRequest;

static OG_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta property="og:title" content="([^"]*?) \(([^"]*)\)"#).unwrap()
});
static OG_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta property="og:url" content="([^"]*)""#).unwrap());
static OG_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta property="og:image" content="([^"?]*)"#).unwrap());

/// profiles.wordpress.org pages, read through their Open Graph tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordPress;

fn capture(re: &Regex, body: &str) -> Option<String> {
    re.captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

impl ProfileProvider for WordPress {
    fn kind(&self) -> ProviderKind {
        ProviderKind::WordPress
    }

    fn request(&self, key: &str, config: &ProviderConfig) -> FetchRequest {
        FetchRequest::new(endpoint(WORDPRESS_PROFILE_URL, key))
            .with_header("User-Agent", config.user_agent.as_str())
    }

    fn parse(&self, key: &str, body: &str) -> Option<RawProfile> {
        let title = capture(&OG_TITLE, body);
        let url = capture(&OG_URL, body);
        if title.is_none() && url.is_none() {
            return None;
        }

        Some(RawProfile {
            canonical_key: Some(key.to_string()),
            display_name: title,
            profile_url: url.or_else(|| Some(endpoint(WORDPRESS_PROFILE_URL, key))),
            avatar_url: capture(&OG_IMAGE, body),
        })
    }
}
