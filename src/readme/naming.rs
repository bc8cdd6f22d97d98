//! Name normalization helpers.

/// Turn an accessor-style name into the phrase used for lookups.
///
/// A leading `get` is dropped and a space is inserted before an upper-case
/// letter that follows a lower-case one, or that sits between a letter and a
/// lower-case letter. Names already containing spaces are only trimmed.
///
/// `getRequiresAtLeast` → `Requires At Least`, `RequiresPHP` → `Requires PHP`,
/// `LicenseURI` → `License URI`, `PHPVersion` → `PHP Version`.
pub fn camel_to_phrase(name: &str) -> String {
    let name = name.trim();
    if name.contains(' ') {
        return name.to_string();
    }

    let name = match name.strip_prefix("get") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => rest,
        _ => name,
    };

    let chars: Vec<char> = name.chars().collect();
    let mut phrase = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let after_lower = prev.is_ascii_lowercase();
            let starts_word =
                prev.is_ascii_alphabetic() && next.is_some_and(|n| n.is_ascii_lowercase());
            if after_lower || starts_word {
                phrase.push(' ');
            }
        }
        phrase.push(c);
    }
    phrase
}

/// Element id for a section anchor: lower-cased, spaces as dashes.
pub fn section_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Tag slug: lower-cased, `[ _.]` as dashes, anything outside `[a-z0-9_-]` dropped.
pub fn tag_slug(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .replace([' ', '_', '.'], "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Accessor dispatch key: lower-cased with whitespace removed.
pub fn accessor_key(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase()
}
