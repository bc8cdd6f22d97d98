//! Header block extraction.
//!
//! Between the `=== Title ===` line and the first `== Section ==` a readme
//! carries, in order: an optional banner, a contiguous run of `Name: value`
//! header lines, and the short description. [`HeaderRegion::extract`] splits
//! that region once per loaded document.
//!
//! Some readmes wrap their headers in a foldable `<details>` element. When the
//! banner opens such an element and it is closed further down, everything from
//! the opening tag on is dropped from the banner, and a leading or trailing
//! `</details>` is stripped from the short description. This is a heuristic
//! and can cut a banner that uses `<details>` for something else.

use regex::Regex;
use std::sync::LazyLock;

use super::scanner;

static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][\w .\-]*):(?:\s+(.*))?$").unwrap());

const TITLE_CLOSE: &str = " ===";
const SECTION_OPEN: &str = "\n== ";
const DETAILS_OPEN: &str = "<details";
const DETAILS_CLOSE: &str = "</details>";

/// The pre-section region of a document, split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRegion {
    /// Raw banner text (may be empty).
    pub banner: String,
    /// Header lines joined with `\n`, exactly as written.
    pub block: String,
    /// `(name, value)` pairs in document order.
    pub pairs: Vec<(String, String)>,
    /// Raw text after the header lines, up to the first section.
    pub tail: String,
}

impl HeaderRegion {
    /// Split the region after the title marker (or from the start when there
    /// is no title) up to the first section marker.
    ///
    /// The title marker stops short of its newline so that a section opening
    /// on the very next line still ends the region.
    pub fn extract(text: &str) -> Self {
        let region = scanner::locate(text, TITLE_CLOSE, SECTION_OPEN)
            .map(|r| &text[r])
            .or_else(|| scanner::locate(text, "", SECTION_OPEN).map(|r| &text[r]))
            .unwrap_or("");

        Self::split(region.strip_prefix('\n').unwrap_or(region))
    }

    fn split(region: &str) -> Self {
        let lines: Vec<&str> = region.split('\n').collect();

        let Some(first) = lines.iter().position(|l| HEADER_LINE.is_match(l.trim_end())) else {
            return Self {
                tail: region.to_string(),
                ..Self::default()
            };
        };

        let count = lines[first..]
            .iter()
            .take_while(|l| HEADER_LINE.is_match(l.trim_end()))
            .count();
        let header_lines = &lines[first..first + count];

        let pairs = header_lines
            .iter()
            .filter_map(|line| {
                let caps = HEADER_LINE.captures(line.trim_end())?;
                let name = caps.get(1)?.as_str().trim().to_string();
                let value = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
                Some((name, value))
            })
            .collect();

        let banner_raw = lines[..first].join("\n");
        let tail = lines[first + count..].join("\n");
        let banner = cut_at_details(&banner_raw, region).trim().to_string();

        Self {
            banner,
            block: header_lines.iter().map(|l| l.trim_end()).collect::<Vec<_>>().join("\n"),
            pairs,
            tail,
        }
    }

    /// The short description: the tail with wrapper tags removed.
    pub fn short_description(&self) -> &str {
        let text = self.tail.trim();
        let text = text.strip_prefix(DETAILS_CLOSE).unwrap_or(text).trim_start();
        text.strip_suffix(DETAILS_CLOSE).unwrap_or(text).trim_end()
    }

    /// Whether any header line was found.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Keep only what precedes `<details` when the region closes the element later.
fn cut_at_details<'a>(banner: &'a str, region: &str) -> &'a str {
    let Some(open) = banner.to_ascii_lowercase().find(DETAILS_OPEN) else {
        return banner;
    };
    let closed_later =
        region.to_ascii_lowercase().find(DETAILS_CLOSE).is_some_and(|close| close > open);
    if closed_later { &banner[..open] } else { banner }
}
