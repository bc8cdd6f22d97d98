//! Assembled views: all headers, all sections, the whole document, and the
//! resolved contributor list.
//!
//! With tags, sections become open `<details>` blocks with a navigation bar
//! of anchors, and headers become a `<details id='readme-head'>` block of
//! name/value spans with the contributors resolved to profile links.

use super::{ReadmeParser, naming};
use crate::contributors::{ProfileMap, display_profiles};

impl ReadmeParser {
    /// Resolved contributors as a comma-separated display string.
    pub async fn contributors(&self) -> String {
        let profiles = self.contributor_profiles().await;
        display_profiles(&profiles, self.renderer.as_ref())
    }

    /// Resolved contributors as an ordered `canonical key → record` map.
    pub async fn contributor_profiles(&self) -> ProfileMap {
        let header = self.header("Contributors", false);
        if header.is_empty() {
            return ProfileMap::new();
        }
        self.resolver.resolve_all(&header).await
    }

    /// Every header.
    ///
    /// Without tags this is the header block, rendered inline when `parse`
    /// is set. With tags each header becomes a translated name span and a
    /// value span, and `Contributors` is replaced by its resolved form.
    pub async fn all_headers(&self, parse: bool, add_tags: bool) -> String {
        if !add_tags {
            return self.header_block(parse, true);
        }

        let mut out = format!(
            "<details id='readme-head' class='readme'><summary>{}</summary><p>",
            self.translate("Headers")
        );
        for (name, value) in self.headers() {
            let value = if name.eq_ignore_ascii_case("contributors") {
                self.contributors().await
            } else {
                self.render(&value, parse, true)
            };
            out.push_str(&format!(
                "<span class='readme-head-name'>{}:</span><span class='readme-head-value'>{}</span>\n",
                self.translate(&name),
                value.trim()
            ));
        }
        out.push_str("</p></details>");
        out
    }

    /// Every section, rendered, in document order.
    pub fn all_sections(&self, add_tags: bool) -> String {
        let names = self.section_names();

        if !add_tags {
            return names
                .iter()
                .map(|name| format!("<h3 class='readme'>{name}</h3>{}", self.section(name, true)))
                .collect();
        }

        let mut nav = String::new();
        let mut content = String::new();
        for name in &names {
            let id = naming::section_id(name);
            let label = self.translate(name);
            nav.push_str(&format!(
                "<a href='#readme-{id}' class='readme' title='{label}'>{label}</a>\n"
            ));
            content.push_str(&format!(
                "<details id='readme-{id}' class='readme' open><summary>{label}</summary>{}</details>\n<a href='#readme-top'>Top</a>\n",
                self.section(name, true)
            ));
        }

        if nav.is_empty() {
            return content;
        }
        format!("<nav id='readme-nav' class='readme'>{nav}</nav><div id='readme-content'>{content}</div>")
    }

    /// Top anchor, banner, short description, tagged headers and all sections.
    pub async fn document(&self, add_tags: bool) -> String {
        let mut out = String::from("<a id='readme-top'></a>");
        out.push_str(&self.banner());
        out.push_str(&format!(
            "<p id='readme-short' class='readme'>{}</p>",
            self.short_description()
        ));
        out.push_str(&self.all_headers(true, true).await);
        out.push_str(&self.all_sections(add_tags));
        out
    }
}
