//! Marker scanner: the primitive every segment accessor is built on.
//!
//! A segment is the text between the first occurrence of a start marker and
//! the first occurrence of an end marker after it. Markers are literal text,
//! matched case-insensitively, and the capture may span lines. No match is a
//! normal outcome and yields an empty string.

use regex::RegexBuilder;
use std::ops::Range;
use tracing::trace;

/// Byte range of the text between `start` and the next `end` in `buffer`.
///
/// `start` may be empty, in which case the capture begins at offset 0.
pub fn locate(buffer: &str, start: &str, end: &str) -> Option<Range<usize>> {
    let pattern = format!("{}(.*?){}", regex::escape(start), regex::escape(end));
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).dot_matches_new_line(true).build()
    {
        Ok(re) => re,
        Err(e) => {
            trace!("Unusable marker pair {start:?}/{end:?}: {e}");
            return None;
        }
    };

    re.captures(buffer).and_then(|caps| caps.get(1)).map(|m| m.range())
}

/// Trimmed text between `start` and the next `end`, or `""`.
pub fn extract<'a>(buffer: &'a str, start: &str, end: &str) -> &'a str {
    locate(buffer, start, end).map_or("", |range| buffer[range].trim())
}
