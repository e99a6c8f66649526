//! Version token extraction from fingerprint text.

/// Characters allowed inside a version token: lowercase alphanumerics and `.`.
pub fn is_version_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.'
}

/// Scan `text` forward from byte offset `start` while characters are legal
/// version characters and return the scanned span.
///
/// Returns `None` when `start` is out of range, not on a char boundary, or the
/// first character is already outside the allowed class.
pub fn extract_version(text: &str, start: usize) -> Option<String> {
    extract_with(text, start, is_version_char)
}

/// Same as [`extract_version`] with a caller supplied character class.
pub fn extract_with<F>(text: &str, start: usize, legal: F) -> Option<String>
where
    F: Fn(char) -> bool,
{
    let tail = text.get(start..)?;
    let end = tail.find(|c: char| !legal(c)).unwrap_or(tail.len());
    if end == 0 {
        None
    } else {
        Some(tail[..end].to_string())
    }
}
