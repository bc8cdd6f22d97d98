use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::PLACEHOLDER_AVATAR;

/// Identity provider a contributor reference is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// gravatar.com profiles, keyed by username or e-mail MD5.
    Gravatar,
    /// GitHub users.
    GitHub,
    /// profiles.wordpress.org users.
    WordPress,
}

impl ProviderKind {
    /// Lower-case name, as used in cache keys and `id@provider` suffixes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gravatar => "gravatar",
            Self::GitHub => "github",
            Self::WordPress => "wordpress",
        }
    }

    /// Parse an `id@provider` suffix (already lower-cased).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "gravatar" => Some(Self::Gravatar),
            "github" => Some(Self::GitHub),
            "wordpress" => Some(Self::WordPress),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized contributor identity.
///
/// Serialized in the plugin-directory API shape: `display_name`, `profile`
/// and `avatar`, plus the `canonical_key` used for de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// De-duplication key: preferred username, slug, or the raw text.
    pub canonical_key: String,
    /// Never empty.
    pub display_name: String,
    /// Profile page; empty when unknown.
    #[serde(rename = "profile", default)]
    pub profile_url: String,
    /// Never empty; the placeholder avatar when the provider has none.
    #[serde(rename = "avatar")]
    pub avatar_url: String,
}

impl ProfileRecord {
    /// Build a record, filling an empty display name from the key and an
    /// empty avatar with the placeholder.
    pub fn new(
        canonical_key: impl Into<String>,
        display_name: impl Into<String>,
        profile_url: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        let canonical_key = canonical_key.into();
        let display_name = non_empty(display_name.into()).unwrap_or_else(|| canonical_key.clone());
        let avatar_url = non_empty(avatar_url.into()).unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string());
        Self {
            canonical_key,
            display_name,
            profile_url: profile_url.into().trim().to_string(),
            avatar_url,
        }
    }

    /// A record for an identity nobody could resolve.
    pub fn placeholder(canonical_key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(canonical_key, display_name, "", PLACEHOLDER_AVATAR)
    }

    /// Whether this record carries the placeholder avatar.
    pub fn has_placeholder_avatar(&self) -> bool {
        self.avatar_url == PLACEHOLDER_AVATAR
    }
}

/// Provider data before normalization; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProfile {
    /// Provider-specific canonical key.
    pub canonical_key: Option<String>,
    /// Human-readable name.
    pub display_name: Option<String>,
    /// Profile page URL.
    pub profile_url: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

impl RawProfile {
    /// Normalize into a record, using `key` for a missing canonical key.
    pub fn into_record(self, key: &str) -> ProfileRecord {
        let canonical = self.canonical_key.and_then(non_empty).unwrap_or_else(|| key.to_string());
        ProfileRecord::new(
            canonical,
            self.display_name.unwrap_or_default(),
            self.profile_url.unwrap_or_default(),
            self.avatar_url.unwrap_or_default(),
        )
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
