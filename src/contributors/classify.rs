//! Contributor reference classification.
//!
//! One token of the `Contributors` header is matched, in priority order,
//! against:
//!
//! 1. an inline link `[Name](target)`; the target picks the provider
//!    (`mailto:`, gravatar.com, github.com, wordpress.org) or, for
//!    any other URL, yields a record directly;
//! 2. `id@gravatar`, `id@github` or `id@wordpress`;
//! 3. a bare e-mail address, looked up on Gravatar by its MD5;
//! 4. anything else, taken as a WordPress.org username.

use md5::{Digest, Md5};
use regex::Regex;
use std::sync::LazyLock;

use super::profile::{ProfileRecord, ProviderKind};
use crate::constants::PLACEHOLDER_AVATAR;

static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\]\((.*)\)$").unwrap());
static MAILTO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^mailto:(.+)$").unwrap());
static GRAVATAR_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[\w-]+\.)*gravatar\.com/([^/?#]+)").unwrap()
});
static GITHUB_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.)?github\.com/([^/?#]+)").unwrap()
});
static WORDPRESS_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[\w-]+\.)*wordpress\.org/([^/?#]+)").unwrap()
});

/// What one contributor token turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributorRef {
    /// Needs a provider lookup.
    Lookup {
        /// Provider to ask.
        provider: ProviderKind,
        /// Provider identifier (username, slug or e-mail MD5).
        key: String,
        /// Readable form of the identifier, used for placeholders.
        text: String,
        /// Display name that overrides whatever the provider returns.
        hint: Option<String>,
    },
    /// Fully described by the token itself.
    Direct(ProfileRecord),
}

impl ContributorRef {
    fn lookup(provider: ProviderKind, key: &str, text: &str, hint: Option<&str>) -> Self {
        Self::Lookup {
            provider,
            key: key.trim().trim_end_matches('/').to_lowercase(),
            text: text.trim().to_string(),
            hint: hint.map(str::trim).filter(|h| !h.is_empty()).map(str::to_string),
        }
    }
}

/// Hex MD5 of a trimmed, lower-cased e-mail address (Gravatar's hash).
pub fn email_hash(email: &str) -> String {
    hex::encode(Md5::digest(email.trim().to_lowercase().as_bytes()))
}

/// Classify one token. Empty tokens yield `None`.
pub fn classify(token: &str) -> Option<ContributorRef> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Some(caps) = INLINE_LINK.captures(token) {
        let display = caps.get(1).map_or("", |m| m.as_str()).trim();
        let target = caps.get(2).map_or("", |m| m.as_str()).trim();
        return Some(classify_link(display, target));
    }

    if let Some((id, suffix)) = token.rsplit_once('@') {
        let provider = ProviderKind::from_suffix(&suffix.to_lowercase());
        if let (Some(provider), false) = (provider, id.is_empty()) {
            return Some(ContributorRef::lookup(provider, id, id, None));
        }
    }

    match token.find('@') {
        Some(pos) if pos > 0 => {
            Some(ContributorRef::lookup(ProviderKind::Gravatar, &email_hash(token), token, None))
        }
        Some(_) => {
            let handle = token.trim_start_matches('@');
            (!handle.is_empty())
                .then(|| ContributorRef::lookup(ProviderKind::WordPress, handle, handle, None))
        }
        None => Some(ContributorRef::lookup(ProviderKind::WordPress, token, token, None)),
    }
}

fn classify_link(display: &str, target: &str) -> ContributorRef {
    if let Some(email) = MAILTO.captures(target).and_then(|c| c.get(1)) {
        let email = email.as_str().trim();
        return ContributorRef::lookup(ProviderKind::Gravatar, &email_hash(email), email, Some(display));
    }

    let providers = [
        (&*GRAVATAR_LINK, ProviderKind::Gravatar),
        (&*GITHUB_LINK, ProviderKind::GitHub),
        (&*WORDPRESS_LINK, ProviderKind::WordPress),
    ];
    for (pattern, provider) in providers {
        if let Some(segment) = pattern.captures(target).and_then(|c| c.get(1)) {
            let segment = segment.as_str();
            return ContributorRef::lookup(provider, segment, segment, Some(display));
        }
    }

    let key: String = display.to_lowercase().chars().filter(|c| !matches!(c, ' ' | '@' | '.')).collect();
    ContributorRef::Direct(ProfileRecord::new(key, display, target, PLACEHOLDER_AVATAR))
}
