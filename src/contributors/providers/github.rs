use serde::Deserialize;
use tracing::debug;

use super::{ProfileProvider, ProviderConfig, endpoint};
use crate::constants::GITHUB_USER_API_URL;
use crate::contributors::profile::{ProviderKind, RawProfile};
use crate::source::FetchRequest;

/// GitHub users API.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHub;

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
    name: Option<String>,
    html_url: Option<String>,
    avatar_url: Option<String>,
}

impl ProfileProvider for GitHub {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitHub
    }

    fn request(&self, key: &str, config: &ProviderConfig) -> FetchRequest {
        let request = FetchRequest::new(endpoint(GITHUB_USER_API_URL, key))
            .with_header("Accept", "application/vnd.github+json")
            .with_header("User-Agent", config.user_agent.as_str());

        match config.github_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => {
                request.with_header("Authorization", format!("Bearer {token}"))
            }
            _ => request,
        }
    }

    fn parse(&self, key: &str, body: &str) -> Option<RawProfile> {
        let user: GitHubUser = serde_json::from_str(body)
            .map_err(|e| debug!("Unreadable GitHub user for {key}: {e}"))
            .ok()?;

        Some(RawProfile {
            display_name: user.name.or_else(|| Some(user.login.clone())),
            canonical_key: Some(user.login),
            profile_url: user.html_url,
            avatar_url: user.avatar_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user() {
        let body = r#"{"login":"alice","id":1,"name":null,
            "html_url":"https://github.com/alice","avatar_url":"https://avatars.githubusercontent.com/u/1"}"#;
        let raw = GitHub.parse("alice", body).unwrap();
        assert_eq!(raw.canonical_key.as_deref(), Some("alice"));
        assert_eq!(raw.display_name.as_deref(), Some("alice"));
        assert_eq!(raw.profile_url.as_deref(), Some("https://github.com/alice"));
    }

    #[test]
    fn test_error_payload_is_unusable() {
        assert!(GitHub.parse("ghost", r#"{"message":"Not Found"}"#).is_none());
    }

    #[test]
    fn test_token_is_sent_as_bearer() {
        let config = ProviderConfig {
            github_token: Some("t0k".to_string()),
            ..ProviderConfig::default()
        };
        let request = GitHub.request("alice", &config);
        assert_eq!(request.target, "https://api.github.com/users/alice");
        assert_eq!(request.header("authorization"), Some("Bearer t0k"));
        assert_eq!(request.header("accept"), Some("application/vnd.github+json"));

        assert!(GitHub.request("alice", &ProviderConfig::default()).header("authorization").is_none());
    }
}
