//! Global constants used throughout the wpreadme codebase.
//!
//! Marker strings, provider endpoints, and cache lifetimes live here so the
//! scanner, the resolvers and the CLI agree on the same values.

use std::time::Duration;

/// Synthetic end-of-document marker appended to every loaded buffer.
///
/// It gives the final section a closing boundary: section scans end at the
/// next `\n==`, which this marker always provides.
pub const END_MARKER: &str = "\n== [###]\n";

/// Generic "mystery person" avatar used for placeholder profile records.
pub const PLACEHOLDER_AVATAR: &str = "https://secure.gravatar.com/avatar/?d=mp";

/// Default lifetime of a resolved contributor profile (one day).
pub const DEFAULT_PROFILE_TTL_SECS: u64 = 86_400;

/// Default lifetime of a cached rendered response (one day).
pub const DEFAULT_RESPONSE_TTL_SECS: u64 = 86_400;

/// Rendered responses are never cached for less than a minute.
pub const MIN_RESPONSE_TTL_SECS: u64 = 60;

/// Timeout applied to every outbound HTTP request.
///
/// There is no other cancellation: a stalled fetch is bounded only by this.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

/// User agent sent to providers that reject anonymous clients (GitHub, Gravatar).
pub const DEFAULT_USER_AGENT: &str = concat!("wpreadme/", env!("CARGO_PKG_VERSION"));

/// Base URL that WordPress plugin SVN paths are normalized onto.
pub const WPSVN_BASE_URL: &str = "https://ps.w.org/";

/// Base URL that GitHub repository paths are normalized onto.
pub const GITHUB_RAW_BASE_URL: &str = "https://raw.githubusercontent.com/";

/// Gravatar profile endpoint (JSON flavour), `{key}` is a hash or username.
pub const GRAVATAR_PROFILE_URL: &str = "https://en.gravatar.com/{key}.json";

/// GitHub users API endpoint.
pub const GITHUB_USER_API_URL: &str = "https://api.github.com/users/{key}";

/// WordPress.org profile page, parsed for Open Graph tags.
pub const WORDPRESS_PROFILE_URL: &str = "https://profiles.wordpress.org/{key}/";

/// Environment variable consulted for a GitHub token when none is passed.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";
