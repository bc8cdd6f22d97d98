//! Segment-name translation.
//!
//! Header and section names are shown under display labels: `Stable tag`
//! becomes `Current Version`, `Changelog` becomes `Change Log`. The table is
//! owned by one parser session and only ever grows through merges, except for
//! an explicit reset.

use indexmap::IndexMap;
use regex::RegexBuilder;
use std::collections::BTreeMap;
use tracing::debug;

const DEFAULT_TRANSLATIONS: &[(&str, &str)] = &[
    ("Headers", "Document Header"),
    ("Plugin URI", "Homepage"),
    ("Stable tag", "Current Version"),
    ("Requires at least", "Requires WordPress Version"),
    ("Tested up to", "Compatible up to"),
    ("Requires PHP", "Requires PHP Version"),
    ("WC requires at least", "Requires WooCommerce"),
    ("Requires EAC", "Requires {eac}Doojigger"),
    ("Changelog", "Change Log"),
    ("Screenshots", "Screen Shots"),
];

const RESET_SENTINELS: &[&str] = &["no", "none", "false"];

/// Ordered mapping from canonical segment name to display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    entries: IndexMap<String, String>,
}

impl Default for TranslationTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_TRANSLATIONS
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        }
    }
}

impl TranslationTable {
    /// A table with no entries; every name passes through unchanged.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Exact-match translation, falling back to the name itself.
    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map_or(name, String::as_str)
    }

    /// Exact match first, then each key as an anchored case-insensitive
    /// pattern (first matching entry wins, replaced once), then the name.
    ///
    /// Keys that are not valid patterns are skipped.
    pub fn translate_with_patterns(&self, name: &str) -> String {
        if let Some(exact) = self.entries.get(name) {
            return exact.clone();
        }

        for (from, to) in &self.entries {
            let re = match RegexBuilder::new(&format!("^(?:{from})$")).case_insensitive(true).build()
            {
                Ok(re) => re,
                Err(_) => {
                    debug!("Skipping translation key {from:?}: not a valid pattern");
                    continue;
                }
            };
            if re.is_match(name) {
                return re.replace(name, to.as_str()).into_owned();
            }
        }

        name.to_string()
    }

    /// Insert or overwrite a single entry.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.entries.insert(from.into(), to.into());
    }

    /// Merge structured entries over the table.
    pub fn merge_map(&mut self, table: &BTreeMap<String, String>) {
        for (from, to) in table {
            self.insert(from.trim(), to.trim());
        }
    }

    /// Merge a compact `from=to` list over the table.
    ///
    /// Entries are separated by `,`, `;`, `|` or newlines. An entry of `no`,
    /// `none` or `false` (any case) empties the table at that point; entries
    /// after it are still merged. An entirely empty string also empties it.
    /// Entries without `=` are ignored.
    pub fn merge_str(&mut self, input: &str) {
        if input.trim().is_empty() {
            self.entries.clear();
            return;
        }

        for entry in input.split([',', ';', '|', '\n']) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if RESET_SENTINELS.contains(&entry.to_ascii_lowercase().as_str()) {
                self.entries.clear();
                continue;
            }
            match entry.split_once('=') {
                Some((from, to)) if !from.trim().is_empty() => self.insert(from.trim(), to.trim()),
                _ => debug!("Ignoring translation entry without a key: {entry:?}"),
            }
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_then_identity() {
        let table = TranslationTable::default();
        assert_eq!(table.translate("Changelog"), "Change Log");
        assert_eq!(table.translate("Unknown"), "Unknown");
        assert_eq!(table.translate("changelog"), "changelog");
    }

    #[test]
    fn test_reset_then_merge() {
        let mut table = TranslationTable::default();
        table.merge_str("none");
        assert!(table.is_empty());
        table.merge_str("Foo=Bar");
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("Foo", "Bar")]);
    }

    #[test]
    fn test_reset_inside_one_string() {
        let mut table = TranslationTable::default();
        table.merge_str("A=1; FALSE | B = 2\nC=3");
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("B", "2"), ("C", "3")]);
    }

    #[test]
    fn test_merge_is_additive() {
        let mut table = TranslationTable::default();
        let before = table.len();
        table.merge_str("Changelog=History, FAQ=Questions, bare, =orphan,,");
        assert_eq!(table.len(), before + 1);
        assert_eq!(table.translate("Changelog"), "History");
        assert_eq!(table.translate("FAQ"), "Questions");
    }

    #[test]
    fn test_empty_input_resets() {
        let mut table = TranslationTable::default();
        table.merge_str("   ");
        assert!(table.is_empty());
        assert_eq!(table.translate("Changelog"), "Changelog");
    }

    #[test]
    fn test_merge_map() {
        let mut table = TranslationTable::empty();
        let mut map = BTreeMap::new();
        map.insert(" Tested up to ".to_string(), "Tested with".to_string());
        table.merge_map(&map);
        assert_eq!(table.translate("Tested up to"), "Tested with");
    }

    #[test]
    fn test_pattern_fallback() {
        let mut table = TranslationTable::empty();
        table.insert("[", "never");
        table.insert("requires (.*)", "Needs $1");
        table.insert("requires php", "unreachable");

        assert_eq!(table.translate_with_patterns("Requires PHP"), "Needs PHP");
        assert_eq!(table.translate_with_patterns("requires php"), "unreachable");
        assert_eq!(table.translate_with_patterns("Other"), "Other");
    }
}
