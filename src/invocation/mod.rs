//! Segment requests against a parsing session.
//!
//! A [`RenderRequest`] names a source, a comma-separated list of segments
//! and the per-request settings. [`Invocation::render`] loads the source
//! (or reuses the session's current document when none is given), renders
//! each segment in order and concatenates the results. A segment that
//! comes back empty is replaced by `<em>NAME not found</em>`.
//!
//! The concatenated output is cached under `render:<sha256 of the request>`
//! for the request TTL, never less than a minute. The key covers the
//! session's code language and translations, and for local files their size
//! and modification time, so an edited file is rendered afresh. Requests
//! against text loaded from memory have no stable identity and are not cached.
//!
//! # Segment names
//!
//! Names are matched case-insensitively with spaces and a `get` prefix
//! ignored, so `Short Description`, `shortdescription` and
//! `getShortDescription` are the same request. Anything that is not one of
//! the named views below is looked up as a header, then a section:
//!
//! | Name            | View                                   |
//! |-----------------|----------------------------------------|
//! | `title`         | title, else `Plugin Name`              |
//! | `banner`        | rendered banner                        |
//! | `short description` | short description                   |
//! | `version`       | `Stable tag`, else `Version`           |
//! | `homepage`      | `Homepage`, else `Plugin URI`          |
//! | `author`        | linked author                          |
//! | `tags`          | raw `Tags` header                      |
//! | `contributors`  | resolved contributor links             |
//! | `code file`     | whole document as a code block         |
//! | `header block`  | the raw header lines                   |
//! | `all headers`   | tagged header list                     |
//! | `all sections`  | tagged sections with navigation        |
//! | `document`      | the complete document                  |

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};
use tracing::{debug, warn};

use crate::cache::{ObjectCache, digest_hex, get_json, set_json};
use crate::constants::{DEFAULT_RESPONSE_TTL_SECS, MIN_RESPONSE_TTL_SECS};
use crate::readme::{ParserOptions, ReadmeParser, naming};
use crate::source::SourceLocator;

/// One request for rendered segments.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Document to load; `None` reuses the session's current document.
    pub source: Option<SourceLocator>,
    /// Comma-separated segment names.
    pub segments: String,
    /// Force rendering on or off for views that take a parse flag.
    pub parse: Option<bool>,
    /// Translation entries merged into the session table first.
    pub translate: Option<String>,
    /// Default code language for the session.
    pub lang: Option<String>,
    /// Response cache lifetime; the invocation default when `None`.
    pub ttl: Option<Duration>,
}

impl RenderRequest {
    /// Request `segments` from `source`.
    pub fn new(source: Option<SourceLocator>, segments: impl Into<String>) -> Self {
        Self {
            source,
            segments: segments.into(),
            ..Self::default()
        }
    }

    /// Segment names, trimmed, empty entries dropped.
    pub fn segment_names(&self) -> impl Iterator<Item = &str> {
        self.segments.split(',').map(str::trim).filter(|s| !s.is_empty())
    }

    /// Cache identity: the source and its revision, the segments, the parse
    /// flag and the session options in effect after this request is applied.
    fn fingerprint(&self, source: &SourceLocator, revision: &str, options: &ParserOptions) -> String {
        let translations: Vec<String> =
            options.translations.iter().map(|(from, to)| format!("{from}={to}")).collect();
        format!(
            "{source}@{revision}|{}|{:?}|{:?}|{}",
            self.segments,
            self.parse,
            options.code_language,
            translations.join(";")
        )
    }
}

/// Size and modification time of a local file; empty for remote sources.
async fn revision(source: &SourceLocator) -> String {
    if !matches!(source, SourceLocator::File(_)) {
        return String::new();
    }
    match tokio::fs::metadata(source.target()).await {
        Ok(meta) => {
            let modified = meta
                .modified()
                .ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |since| since.as_nanos());
            format!("{}:{modified}", meta.len())
        }
        Err(_) => String::new(),
    }
}

/// A parsing session plus a response cache.
pub struct Invocation {
    parser: ReadmeParser,
    cache: Arc<dyn ObjectCache>,
    response_ttl: Duration,
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("parser", &self.parser)
            .field("response_ttl", &self.response_ttl)
            .finish_non_exhaustive()
    }
}

impl Invocation {
    /// Wrap a session; rendered responses go to `cache`.
    pub fn new(parser: ReadmeParser, cache: Arc<dyn ObjectCache>) -> Self {
        Self {
            parser,
            cache,
            response_ttl: Duration::from_secs(DEFAULT_RESPONSE_TTL_SECS),
        }
    }

    /// Default response lifetime for requests without a TTL.
    #[must_use]
    pub fn with_response_ttl(mut self, ttl: Duration) -> Self {
        self.response_ttl = ttl;
        self
    }

    /// The underlying session.
    pub fn parser(&self) -> &ReadmeParser {
        &self.parser
    }

    /// Mutable access to the underlying session.
    pub fn parser_mut(&mut self) -> &mut ReadmeParser {
        &mut self.parser
    }

    /// Render every requested segment and concatenate the results.
    ///
    /// # Errors
    ///
    /// Only loading can fail. The session keeps its previous document in
    /// that case.
    pub async fn render(&mut self, request: &RenderRequest) -> Result<String> {
        if let Some(lang) = &request.lang {
            self.parser.options_mut().set_code_language(lang);
        }
        if let Some(table) = &request.translate {
            self.parser.options_mut().translations.merge_str(table);
        }

        let cache_key = match request.source.as_ref().or_else(|| self.parser.source()) {
            Some(source) => {
                let revision = revision(source).await;
                let fingerprint = request.fingerprint(source, &revision, self.parser.options());
                Some(format!("render:{}", digest_hex(&fingerprint)))
            }
            None => None,
        };

        if let Some(key) = &cache_key {
            if let Some(cached) = get_json::<String>(self.cache.as_ref(), key).await {
                debug!("Response cache hit for {key}");
                return Ok(cached);
            }
        }

        if let Some(source) = &request.source {
            self.parser.load(source).await?;
        }

        let mut out = String::new();
        for name in request.segment_names() {
            let value = self.segment(name, request.parse).await;
            if value.trim().is_empty() {
                out.push_str(&format!("<em>{name} not found</em>"));
            } else {
                out.push_str(&value);
            }
        }

        if let Some(key) = &cache_key {
            let ttl = request
                .ttl
                .unwrap_or(self.response_ttl)
                .max(Duration::from_secs(MIN_RESPONSE_TTL_SECS));
            if let Err(e) = set_json(self.cache.as_ref(), key, &out, ttl).await {
                warn!("Failed to cache response {key}: {e:#}");
            }
        }
        Ok(out)
    }

    /// Render a single named segment.
    pub async fn segment(&self, name: &str, parse: Option<bool>) -> String {
        let p = &self.parser;
        match naming::accessor_key(&naming::camel_to_phrase(name)).as_str() {
            "title" => p.title(),
            "banner" => p.banner(),
            "shortdescription" => p.short_description(),
            "version" => p.version(),
            "homepage" => p.homepage(parse.unwrap_or(false)),
            "author" => p.author(),
            "tags" => p.tags(),
            "contributors" => p.contributors().await,
            "codefile" => p.code_file(),
            "headerblock" => p.header_block(parse.unwrap_or(false), true),
            "allheaders" => p.all_headers(parse.unwrap_or(true), true).await,
            "allsections" => p.all_sections(true),
            "document" => p.document(true).await,
            _ => p.lookup(name, parse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::source::HttpFetcher;
    use crate::test_utils::{MockFetcher, fixtures, init_test_logging};

    const README_URL: &str = "https://example.com/readme.txt";

    fn invocation(fetcher: &MockFetcher, cache: &MemoryCache) -> Invocation {
        init_test_logging(None);
        let parser = ReadmeParser::new(Arc::new(fetcher.clone()), Arc::new(cache.clone()));
        Invocation::new(parser, Arc::new(cache.clone()))
    }

    fn url() -> SourceLocator {
        SourceLocator::Url(README_URL.to_string())
    }

    #[tokio::test]
    async fn test_segments_are_concatenated_in_order() {
        let fetcher = MockFetcher::new().with_response(README_URL, fixtures::MINIMAL_README);
        let cache = MemoryCache::new();
        let mut inv = invocation(&fetcher, &cache);

        let out = inv
            .render(&RenderRequest::new(Some(url()), "title, version, Description"))
            .await
            .unwrap();
        assert_eq!(out, "T1.0<p>Body text.</p>");
    }

    #[tokio::test]
    async fn test_missing_segment_placeholder() {
        let fetcher = MockFetcher::new().with_response(README_URL, fixtures::MINIMAL_README);
        let cache = MemoryCache::new();
        let mut inv = invocation(&fetcher, &cache);

        let out = inv
            .render(&RenderRequest::new(Some(url()), "title, Other Notes ,banner"))
            .await
            .unwrap();
        assert_eq!(out, "T<em>Other Notes not found</em><em>banner not found</em>");
    }

    #[tokio::test]
    async fn test_named_views_ignore_case_spaces_and_get() {
        let fetcher = MockFetcher::new();
        let cache = MemoryCache::new();
        let mut inv = invocation(&fetcher, &cache);
        inv.parser_mut().load_str(fixtures::PLUGIN_README);

        for name in ["Short Description", "shortdescription", "getShortDescription"] {
            assert_eq!(
                inv.segment(name, None).await,
                "A *sample* plugin for exercising the parser."
            );
        }
        assert_eq!(inv.segment("getRequiresAtLeast", None).await, "5.8");
        assert_eq!(inv.segment("homepage", None).await, "https://example.com/sample");
        assert!(inv.segment("all sections", None).await.starts_with("<nav id='readme-nav'"));
        assert!(inv.segment("code file", None).await.starts_with("<pre><code>"));
    }

    #[tokio::test]
    async fn test_sourceless_request_reuses_document() {
        let fetcher = MockFetcher::new().with_response(README_URL, fixtures::PLUGIN_README);
        let cache = MemoryCache::new();
        let mut inv = invocation(&fetcher, &cache);

        inv.render(&RenderRequest::new(Some(url()), "title")).await.unwrap();
        let out = inv.render(&RenderRequest::new(None, "version")).await.unwrap();
        assert_eq!(out, "2.1.0");
        assert_eq!(fetcher.calls(README_URL), 1);
    }

    #[tokio::test]
    async fn test_sourceless_request_without_document() {
        let cache = MemoryCache::new();
        let mut inv = invocation(&MockFetcher::new(), &cache);

        let out = inv.render(&RenderRequest::new(None, "title,Description")).await.unwrap();
        assert_eq!(out, "<em>title not found</em><em>Description not found</em>");
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_response_cache_skips_load() {
        let fetcher = MockFetcher::new().with_response(README_URL, fixtures::MINIMAL_README);
        let cache = MemoryCache::new();

        let request = RenderRequest {
            ttl: Some(Duration::from_secs(5)),
            ..RenderRequest::new(Some(url()), "title")
        };
        let first = invocation(&fetcher, &cache).render(&request).await.unwrap();
        let second = invocation(&fetcher, &cache).render(&request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.calls(README_URL), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_session_options_are_part_of_the_cache_key() {
        let fetcher = MockFetcher::new().with_response(README_URL, fixtures::PLUGIN_README);
        let cache = MemoryCache::new();
        let request = RenderRequest {
            parse: Some(true),
            ..RenderRequest::new(Some(url()), "Description/Shortcodes")
        };

        let plain = invocation(&fetcher, &cache).render(&request).await.unwrap();
        assert_eq!(plain, "<p>Use <code>[readme]</code> anywhere.</p>");

        let mut php = invocation(&fetcher, &cache);
        php.parser_mut().options_mut().set_code_language("php");
        let out = php.render(&request).await.unwrap();
        assert_eq!(out, "<p>Use <code class='language-php'>[readme]</code> anywhere.</p>");

        let mut translated = invocation(&fetcher, &cache);
        translated.parser_mut().options_mut().translations.merge_str("Installation=Setup");
        translated.render(&request).await.unwrap();
        assert_eq!(cache.len(), 3);
        assert_eq!(fetcher.calls(README_URL), 3);
    }

    #[tokio::test]
    async fn test_edited_local_file_is_rendered_again() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("readme.txt");
        tokio::fs::write(&path, "=== First ===\nVersion: 1.0\n").await.unwrap();

        let cache = MemoryCache::new();
        let fetcher = HttpFetcher::new("wpreadme-test").unwrap();
        let parser = ReadmeParser::new(Arc::new(fetcher), Arc::new(cache.clone()));
        let mut inv = Invocation::new(parser, Arc::new(cache.clone()));
        let request = RenderRequest::new(Some(SourceLocator::File(path.display().to_string())), "title");

        assert_eq!(inv.render(&request).await.unwrap(), "First");
        assert_eq!(inv.render(&request).await.unwrap(), "First");
        assert_eq!(cache.len(), 1);

        tokio::fs::write(&path, "=== Second title ===\nVersion: 2.0\n").await.unwrap();
        assert_eq!(inv.render(&request).await.unwrap(), "Second title");
    }

    #[tokio::test]
    async fn test_in_memory_documents_are_not_cached() {
        let cache = MemoryCache::new();
        let mut inv = invocation(&MockFetcher::new(), &cache);
        inv.parser_mut().load_str(fixtures::MINIMAL_README);

        assert_eq!(inv.render(&RenderRequest::new(None, "title")).await.unwrap(), "T");
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_lang_and_translate_update_the_session() {
        let fetcher = MockFetcher::new().with_response(README_URL, fixtures::PLUGIN_README);
        let cache = MemoryCache::new();
        let mut inv = invocation(&fetcher, &cache);

        let request = RenderRequest {
            lang: Some("PHP".to_string()),
            translate: Some("none; Installation=Setup".to_string()),
            parse: Some(true),
            ..RenderRequest::new(Some(url()), "Description/Shortcodes")
        };
        let out = inv.render(&request).await.unwrap();

        assert_eq!(out, "<p>Use <code class='language-php'>[readme]</code> anywhere.</p>");
        assert_eq!(inv.parser().translate("Installation"), "Setup");
        assert_eq!(inv.parser().translate("Changelog"), "Changelog");
    }

    #[tokio::test]
    async fn test_failed_load_propagates() {
        let cache = MemoryCache::new();
        let mut inv = invocation(&MockFetcher::new(), &cache);
        let result = inv.render(&RenderRequest::new(Some(url()), "title")).await;
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
