use pulldown_cmark::{Options, Parser, html};

/// Black-box markdown to HTML service.
///
/// Implementations must handle headings, emphasis, links, lists, fenced
/// code and images. Escaping rules are the renderer's business.
pub trait MarkdownRenderer: Send + Sync {
    /// Render a block of markdown (paragraphs, lists, headings).
    fn render_block(&self, text: &str) -> String;

    /// Render one line of markdown without block-level wrapping.
    fn render_inline(&self, text: &str) -> String;
}

/// `pulldown-cmark` renderer.
#[derive(Debug, Clone)]
pub struct CmarkRenderer {
    options: Options,
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CmarkRenderer {
    /// Tables and strikethrough enabled, as seen on wordpress.org readmes.
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH,
        }
    }

    fn to_html(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.options);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render_block(&self, text: &str) -> String {
        self.to_html(text)
    }

    fn render_inline(&self, text: &str) -> String {
        let rendered = self.to_html(text.trim());
        let trimmed = rendered.trim_end();

        // A single paragraph is unwrapped; anything else is returned as rendered.
        match trimmed.strip_prefix("<p>").and_then(|s| s.strip_suffix("</p>")) {
            Some(inner) if !inner.contains("<p>") => inner.to_string(),
            _ => trimmed.to_string(),
        }
    }
}
