//! Markdown transform for readme segments.
//!
//! Readme files mark headings with `=`: `=== Title ===`, `== Section ==` and
//! `= Subsection =`. Before a segment reaches the renderer those markers are
//! rewritten to ATX headings of levels 2, 3 and 4, so any CommonMark renderer
//! produces the same outline.
//!
//! After rendering, plain `<code>` tags can be tagged with a default
//! highlighting class (`<code class='language-php'>`) for client-side syntax
//! highlighters.
//!
//! The renderer itself sits behind [`MarkdownRenderer`]; [`CmarkRenderer`] is
//! the `pulldown-cmark` implementation used by the CLI.

mod renderer;

pub use renderer::{CmarkRenderer, MarkdownRenderer};

use regex::Regex;
use std::sync::LazyLock;

static H2_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^=== (.*?) ===$").unwrap());
static H3_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^== (.*?) ==$").unwrap());
static H4_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^= (.*?) =$").unwrap());

/// Rewrite `===`/`==`/`=` heading markers to `##`/`###`/`####`.
///
/// Markers must occupy a whole line. Order matters: the three-sign form is
/// rewritten first so it is never mistaken for a two-sign one.
pub fn rewrite_heading_markers(text: &str) -> String {
    let text = H2_MARKER.replace_all(text, "## $1");
    let text = H3_MARKER.replace_all(&text, "### $1");
    H4_MARKER.replace_all(&text, "#### $1").into_owned()
}

/// Add `class='language-<lang>'` to every bare `<code>` tag.
///
/// A `None` language leaves the HTML untouched.
pub fn apply_code_language(html: &str, language: Option<&str>) -> String {
    match language {
        Some(lang) => html.replace("<code>", &format!("<code class='language-{lang}'>")),
        None => html.to_string(),
    }
}

/// Render a multi-line block: heading markers rewritten, output trimmed.
pub fn render_block(renderer: &dyn MarkdownRenderer, text: &str) -> String {
    renderer.render_block(&rewrite_heading_markers(text)).trim().to_string()
}

/// Render a single line without a wrapping paragraph, output trimmed.
pub fn render_inline(renderer: &dyn MarkdownRenderer, text: &str) -> String {
    renderer.render_inline(text).trim().to_string()
}
