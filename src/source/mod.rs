//! Readme sources and the text fetch contract.
//!
//! A readme is loaded from a [`SourceLocator`]: a local path, an arbitrary
//! HTTP(S) URL, a path in the WordPress plugin SVN, or a path in a GitHub
//! repository. Each locator is normalized into a [`FetchRequest`], a target
//! plus the extra headers that host wants, and handed to a [`TextFetcher`].
//!
//! The same fetch contract serves the identity providers, so tests can swap
//! every network access for a canned fetcher in one place.
//!
//! # Normalization
//!
//! | Kind     | Input                                        | Fetched from                                  |
//! |----------|----------------------------------------------|-----------------------------------------------|
//! | `file`   | `~/plugins/x/readme.txt`                     | the expanded local path                       |
//! | `url`    | `https://example.com/readme.txt`             | as given                                      |
//! | `wpsvn`  | `plugins.svn.wordpress.org/x/trunk/readme.txt` | `https://ps.w.org/x/trunk/readme.txt`       |
//! | `github` | `github.com/o/r/blob/main/readme.txt`        | `https://raw.githubusercontent.com/o/r/main/readme.txt` |

use anyhow::Result;
use futures::future::BoxFuture;
use std::fmt;
use tracing::debug;

use crate::constants::{GITHUB_RAW_BASE_URL, HTTP_TIMEOUT, WPSVN_BASE_URL};
use crate::core::ReadmeError;

/// Where a readme comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// Local filesystem path; `~` is expanded.
    File(String),
    /// Any HTTP(S) URL.
    Url(String),
    /// Path inside the WordPress plugin SVN (`<slug>/trunk/readme.txt`).
    WpSvn(String),
    /// Path inside a GitHub repository (`<owner>/<repo>/<branch>/readme.txt`).
    GitHub {
        /// Repository path or URL.
        path: String,
        /// Optional token for private repositories.
        token: Option<String>,
    },
}

impl SourceLocator {
    /// Build a locator from a kind name (`file`, `url`, `wpsvn`, `github`) and value.
    ///
    /// # Errors
    ///
    /// [`ReadmeError::InvalidLocator`] for an unknown kind or an empty value.
    pub fn from_kind(kind: &str, value: &str, token: Option<String>) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ReadmeError::InvalidLocator {
                locator: format!("{kind}="),
            }
            .into());
        }

        let locator = match kind.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File(value.to_string()),
            "url" => Self::Url(value.to_string()),
            "wpsvn" => Self::WpSvn(value.to_string()),
            "github" => Self::GitHub {
                path: value.to_string(),
                token,
            },
            other => {
                return Err(ReadmeError::InvalidLocator {
                    locator: format!("{other}={value}"),
                }
                .into());
            }
        };
        Ok(locator)
    }

    /// Normalized fetch target: an absolute URL or a local path.
    pub fn target(&self) -> String {
        match self {
            Self::File(path) => shellexpand::tilde(path).into_owned(),
            Self::Url(url) => url.clone(),
            Self::WpSvn(path) => {
                let stripped = strip_all(path, &["https://", "http://", "plugins.svn.wordpress.org", "ps.w.org"]);
                format!("{WPSVN_BASE_URL}{}", stripped.trim_start_matches('/'))
            }
            Self::GitHub {
                path, ..
            } => {
                let stripped = strip_all(
                    path,
                    &["https://", "http://", "raw.githubusercontent.com", "github.com", "/blob"],
                );
                format!("{GITHUB_RAW_BASE_URL}{}", stripped.trim_start_matches('/'))
            }
        }
    }

    /// Build the fetch request, adding the headers each host expects.
    pub fn to_request(&self, user_agent: &str) -> FetchRequest {
        let request = FetchRequest::new(self.target());
        match self {
            Self::WpSvn(_) => {
                request.with_header("Accept", "text/plain").with_header("User-Agent", user_agent)
            }
            Self::GitHub {
                token: Some(token),
                ..
            } if !token.trim().is_empty() => {
                request.with_header("Authorization", format!("Token {}", token.trim()))
            }
            _ => request,
        }
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file:{path}"),
            Self::Url(url) => write!(f, "url:{url}"),
            Self::WpSvn(path) => write!(f, "wpsvn:{path}"),
            Self::GitHub {
                path, ..
            } => write!(f, "github:{path}"),
        }
    }
}

fn strip_all(input: &str, needles: &[&str]) -> String {
    needles.iter().fold(input.to_string(), |acc, needle| acc.replace(needle, ""))
}

/// A single text fetch: target plus extra request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Absolute `http(s)://` URL, `file://` URL, or local path.
    pub target: String,
    /// Extra request headers, in insertion order.
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    /// Request `target` with no extra headers.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            headers: Vec::new(),
        }
    }

    /// Add a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// Whether the target is fetched over HTTP.
    pub fn is_remote(&self) -> bool {
        let lower = self.target.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

/// "Fetch text from a locator with custom headers."
///
/// Implementations must report every failure (I/O, DNS, timeout, non-success
/// status) as an error; callers decide whether that is fatal.
pub trait TextFetcher: Send + Sync {
    /// Fetch the body of `request` as text.
    fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<String>>;
}

/// [`TextFetcher`] backed by `reqwest` for URLs and `tokio::fs` for paths.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the shared timeout and the given user agent.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| ReadmeError::NetworkError {
                operation: "build HTTP client".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
        })
    }

    async fn fetch_remote(&self, request: &FetchRequest) -> Result<String> {
        debug!("GET {}", request.target);

        let mut builder = self.client.get(&request.target);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| ReadmeError::NetworkError {
            operation: format!("GET {}", request.target),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReadmeError::NetworkError {
                operation: format!("GET {}", request.target),
                reason: format!("HTTP {status}"),
            }
            .into());
        }

        response.text().await.map_err(|e| {
            ReadmeError::NetworkError {
                operation: format!("read body of {}", request.target),
                reason: e.to_string(),
            }
            .into()
        })
    }

    async fn fetch_local(request: &FetchRequest) -> Result<String> {
        let path = request.target.strip_prefix("file://").unwrap_or(&request.target);
        debug!("Reading {path}");

        let bytes = tokio::fs::read(path).await.map_err(|e| ReadmeError::SourceUnreadable {
            locator: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl TextFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            if request.is_remote() {
                self.fetch_remote(request).await
            } else {
                Self::fetch_local(request).await
            }
        })
    }
}
