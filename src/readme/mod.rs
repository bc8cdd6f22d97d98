//! Readme parsing session.
//!
//! A [`ReadmeParser`] owns one loaded document and the per-session settings
//! (default code language, translation table). Every accessor re-scans the
//! loaded text on demand; nothing but the header region is cached, and that
//! cache is dropped with the document on the next load.
//!
//! # Document layout
//!
//! ```text
//! === Plugin Name ===            title
//! ![banner](...)                 banner (optional)
//! Contributors: alice, bob       header block
//! Stable tag: 1.0
//!
//! Short description.             short description
//!
//! == Description ==              section
//! = Features =                   subsection ("Description/Features")
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wpreadme_cli::cache::MemoryCache;
//! use wpreadme_cli::readme::ReadmeParser;
//! use wpreadme_cli::source::HttpFetcher;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut parser = ReadmeParser::new(
//!     Arc::new(HttpFetcher::new("wpreadme")?),
//!     Arc::new(MemoryCache::new()),
//! );
//! parser.load_str("=== T ===\nVersion: 1.0\n\nShort desc.\n\n== Description ==\nBody text.\n");
//! assert_eq!(parser.title(), "T");
//! assert_eq!(parser.version(), "1.0");
//! assert_eq!(parser.section("Description", true), "<p>Body text.</p>");
//! # Ok(())
//! # }
//! ```

mod document;
pub mod headers;
pub mod naming;
pub mod scanner;
pub mod translate;

pub use headers::HeaderRegion;
pub use translate::TranslationTable;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, OnceLock};
use tracing::{debug, info};

use crate::cache::ObjectCache;
use crate::constants::END_MARKER;
use crate::contributors::{ContributorResolver, ProviderConfig};
use crate::core::ReadmeError;
use crate::markdown::{self, CmarkRenderer, MarkdownRenderer};
use crate::source::{SourceLocator, TextFetcher};

static SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^== (.*) ==$").unwrap());

/// Per-session rendering settings.
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    /// Language added to bare `<code>` tags; always lower-case.
    pub code_language: Option<String>,
    /// Segment-name display labels.
    pub translations: TranslationTable,
}

impl ParserOptions {
    /// Set the default code language. `none`, `disabled` or an empty value clears it.
    pub fn set_code_language(&mut self, language: &str) {
        let language = language.trim().to_lowercase();
        self.code_language = match language.as_str() {
            "" | "none" | "disabled" => None,
            _ => Some(language),
        };
    }
}

/// One loaded document plus its lazily split header region.
#[derive(Debug, Default)]
struct LoadedDocument {
    text: String,
    source: Option<SourceLocator>,
    loaded: bool,
    header: OnceLock<HeaderRegion>,
    scans: AtomicUsize,
}

impl LoadedDocument {
    fn new(raw: &str, source: Option<SourceLocator>) -> Self {
        let normalized = raw.replace("\r\n", "\n");
        Self {
            text: format!("\n{normalized}{END_MARKER}"),
            source,
            loaded: true,
            ..Self::default()
        }
    }

    /// The document text without the synthetic end marker.
    fn body(&self) -> &str {
        self.text.strip_suffix(END_MARKER).unwrap_or(&self.text)
    }
}

/// A parsing session over one readme at a time.
///
/// Loading takes `&mut self`; every accessor takes `&self`, so once a
/// document is loaded accessors may run concurrently.
pub struct ReadmeParser {
    options: ParserOptions,
    renderer: Arc<dyn MarkdownRenderer>,
    fetcher: Arc<dyn TextFetcher>,
    resolver: ContributorResolver,
    document: LoadedDocument,
}

impl std::fmt::Debug for ReadmeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadmeParser")
            .field("options", &self.options)
            .field("source", &self.document.source)
            .field("loaded", &self.document.loaded)
            .finish_non_exhaustive()
    }
}

impl ReadmeParser {
    /// A session with the `pulldown-cmark` renderer and default provider settings.
    pub fn new(fetcher: Arc<dyn TextFetcher>, cache: Arc<dyn ObjectCache>) -> Self {
        let resolver = ContributorResolver::new(fetcher.clone(), cache, ProviderConfig::default());
        Self {
            options: ParserOptions::default(),
            renderer: Arc::new(CmarkRenderer::new()),
            fetcher,
            resolver,
            document: LoadedDocument::default(),
        }
    }

    /// Replace the markdown renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the provider settings (user agent, GitHub token, profile TTL).
    #[must_use]
    pub fn with_provider_config(mut self, config: ProviderConfig) -> Self {
        self.resolver = self.resolver.with_config(config);
        self
    }

    /// Replace the rendering options.
    #[must_use]
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Session options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Session options, for changing the code language or translations.
    pub fn options_mut(&mut self) -> &mut ParserOptions {
        &mut self.options
    }

    /// Whether a document has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.document.loaded
    }

    /// Where the current document came from; `None` for text loaded directly.
    pub fn source(&self) -> Option<&SourceLocator> {
        self.document.source.as_ref()
    }

    /// Number of marker scans performed on the current document.
    pub fn scan_count(&self) -> usize {
        self.document.scans.load(Ordering::Relaxed)
    }

    /// Fetch and load a document, replacing the current one.
    ///
    /// # Errors
    ///
    /// Fails when the source cannot be fetched or is empty. The previously
    /// loaded document is kept in that case.
    pub async fn load(&mut self, locator: &SourceLocator) -> Result<()> {
        let request = locator.to_request(&self.resolver.config().user_agent);
        let text = self
            .fetcher
            .fetch(&request)
            .await
            .with_context(|| format!("Failed to load readme from {locator}"))?;

        if text.trim().is_empty() {
            return Err(ReadmeError::SourceUnreadable {
                locator: locator.to_string(),
                reason: "the document is empty".to_string(),
            }
            .into());
        }

        info!("Loaded readme from {locator} ({} bytes)", text.len());
        self.document = LoadedDocument::new(&text, Some(locator.clone()));
        Ok(())
    }

    /// Load a document from text already in memory.
    pub fn load_str(&mut self, text: &str) {
        self.document = LoadedDocument::new(text, None);
    }

    fn count_scan(&self) {
        self.document.scans.fetch_add(1, Ordering::Relaxed);
    }

    fn scan_in<'a>(&self, content: &'a str, start: &str, end: &str) -> &'a str {
        self.count_scan();
        scanner::extract(content, start, end)
    }

    fn scan(&self, start: &str, end: &str) -> &str {
        self.scan_in(&self.document.text, start, end)
    }

    /// Render a segment through the markdown transform when `parse` is set.
    fn render(&self, text: &str, parse: bool, inline: bool) -> String {
        if !parse || text.is_empty() {
            return text.to_string();
        }
        let html = if inline {
            markdown::render_inline(self.renderer.as_ref(), text)
        } else {
            markdown::render_block(self.renderer.as_ref(), text)
        };
        markdown::apply_code_language(&html, self.options.code_language.as_deref())
    }

    /// Text between two literal markers in the loaded document.
    ///
    /// Empty when either marker is missing.
    pub fn segment(&self, start: &str, end: &str, parse: bool, inline: bool) -> String {
        let text = self.scan(start, end);
        self.render(text, parse, inline)
    }

    fn header_region(&self) -> &HeaderRegion {
        self.document.header.get_or_init(|| {
            self.count_scan();
            debug!("Splitting header region");
            HeaderRegion::extract(&self.document.text)
        })
    }

    /// The `Name: value` lines of the document, computed once per load.
    pub fn header_block(&self, parse: bool, inline: bool) -> String {
        self.render(&self.header_region().block, parse, inline)
    }

    /// Header `(name, value)` pairs in document order, unrendered.
    pub fn headers(&self) -> Vec<(String, String)> {
        self.header_region().pairs.clone()
    }

    /// Free text between the title and the first header, rendered.
    pub fn banner(&self) -> String {
        self.render(&self.header_region().banner, true, false)
    }

    /// One header value; `parse` renders it as inline markdown.
    pub fn header(&self, name: &str, parse: bool) -> String {
        let block = &self.header_region().block;
        if block.is_empty() || name.trim().is_empty() {
            return String::new();
        }
        let content = format!("\n{block}\n");
        let value = self.scan_in(&content, &format!("\n{}:", name.trim()), "\n");
        self.render(value, parse, parse)
    }

    /// `=== Title ===`, else the `Plugin Name` header.
    pub fn title(&self) -> String {
        let title = self.segment("=== ", " ===\n", false, false);
        if title.is_empty() { self.header("Plugin Name", false) } else { title }
    }

    /// The paragraph between the headers and the first section, else the
    /// `Description` header. Not rendered.
    pub fn short_description(&self) -> String {
        let short = self.header_region().short_description();
        if short.is_empty() { self.header("Description", false) } else { short.to_string() }
    }

    /// `Stable tag`, else `Version`.
    pub fn version(&self) -> String {
        let version = self.header("Stable tag", false);
        if version.is_empty() { self.header("Version", false) } else { version }
    }

    /// `Homepage`, else `Plugin URI`.
    pub fn homepage(&self, parse: bool) -> String {
        let homepage = self.header("Homepage", parse);
        if homepage.is_empty() { self.header("Plugin URI", parse) } else { homepage }
    }

    /// `[Author Name](Author URI)` when both exist, else the `Author` header,
    /// both rendered inline.
    pub fn author(&self) -> String {
        let uri = self.header("Author URI", false);
        let name = self.header("Author Name", false);
        if !uri.is_empty() && !name.is_empty() {
            return markdown::render_inline(self.renderer.as_ref(), &format!("[{name}]({uri})"));
        }
        self.header("Author", true)
    }

    /// The raw `Tags` header.
    pub fn tags(&self) -> String {
        self.header("Tags", false)
    }

    /// `slug → tag` for every tag, in header order.
    pub fn tag_map(&self) -> IndexMap<String, String> {
        self.tags()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .filter_map(|tag| {
                let slug = naming::tag_slug(tag);
                (!slug.is_empty()).then(|| (slug, tag.to_string()))
            })
            .collect()
    }

    /// One section, or one subsection when `name` is `Parent/Child`.
    ///
    /// A subsection is only searched inside its parent's body.
    pub fn section(&self, name: &str, parse: bool) -> String {
        let name = name.trim();
        if let Some((parent, child)) = name.split_once('/') {
            let body = self.scan(&format!("\n== {} ==\n", parent.trim()), "\n==");
            let content = format!("\n{body}\n=");
            let text = self.scan_in(&content, &format!("\n= {} =\n", child.trim()), "\n=");
            return self.render(text, parse, false);
        }

        self.segment(&format!("\n== {name} ==\n"), "\n==", parse, false)
    }

    /// Every `== Section ==` name, in document order.
    pub fn section_names(&self) -> Vec<String> {
        SECTION_MARKER
            .captures_iter(&self.document.text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// The whole document as one fenced code block.
    pub fn code_file(&self) -> String {
        let body = self.document.body().trim();
        if body.is_empty() {
            return String::new();
        }
        let html = self.renderer.render_block(&format!("```\n{body}\n```"));
        markdown::apply_code_language(html.trim(), self.options.code_language.as_deref())
    }

    /// Any header or section by name.
    ///
    /// Accessor-style names (`getRequiresAtLeast`, `TestedUpTo`) are turned
    /// into phrases first. The header is tried before the section; `parse`
    /// defaults to raw for headers and rendered for sections.
    pub fn lookup(&self, name: &str, parse: Option<bool>) -> String {
        let phrase = naming::camel_to_phrase(name);
        if phrase.is_empty() {
            return String::new();
        }
        let header = self.header(&phrase, parse.unwrap_or(false));
        if !header.is_empty() {
            return header;
        }
        self.section(&phrase, parse.unwrap_or(true))
    }

    /// Display label for a segment name.
    pub fn translate(&self, name: &str) -> String {
        self.options.translations.translate(name).to_string()
    }
}
