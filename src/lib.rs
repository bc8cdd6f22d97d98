//! wpreadme - WordPress readme.txt parser
//!
//! Loads a WordPress-style `readme.txt` from a local file, a URL, the
//! plugin SVN or a GitHub repository and exposes it as addressable
//! segments: title, banner, headers, short description, sections and
//! nested subsections, the resolved contributor list, or the whole
//! document as HTML.
//!
//! # Architecture Overview
//!
//! - A [`readme::ReadmeParser`] session owns one loaded document and
//!   re-scans it on every access; only the header block is memoized.
//! - Segment text is rendered through a [`markdown::MarkdownRenderer`]
//!   after the readme heading markers (`= x =`) are rewritten to markdown.
//! - `Contributors` tokens are classified and resolved against Gravatar,
//!   GitHub or WordPress.org by [`contributors::ContributorResolver`],
//!   which caches profiles and never fails.
//! - [`invocation::Invocation`] answers comma-separated segment requests
//!   and caches the concatenated output.
//!
//! # Core Modules
//!
//! - [`readme`] - Marker scanning, header block, segment accessors, assembled views
//! - [`markdown`] - Heading rewrite, code-language injection, the renderer seam
//! - [`contributors`] - Identity classification and the three profile providers
//! - [`source`] - Source locators and the text fetch contract
//! - [`cache`] - TTL object cache, in memory or on disk
//! - [`invocation`] - Segment requests and the response cache
//! - [`config`] - Global configuration (`~/.wpreadme/config.toml`)
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `wpreadme` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wpreadme_cli::cache::MemoryCache;
//! use wpreadme_cli::readme::ReadmeParser;
//! use wpreadme_cli::source::{HttpFetcher, SourceLocator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut parser = ReadmeParser::new(
//!     Arc::new(HttpFetcher::new("wpreadme")?),
//!     Arc::new(MemoryCache::new()),
//! );
//! parser.load(&SourceLocator::WpSvn("my-plugin/trunk/readme.txt".into())).await?;
//! println!("{} {}", parser.title(), parser.version());
//! println!("{}", parser.contributors().await);
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! wpreadme show "title,Requires at least,Changelog" --wpsvn my-plugin/trunk/readme.txt
//! wpreadme document --file ./readme.txt --no-tags
//! wpreadme contributors --github owner/repo/main/readme.txt --json
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod contributors;
pub mod core;
pub mod invocation;
pub mod markdown;
pub mod readme;
pub mod source;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
