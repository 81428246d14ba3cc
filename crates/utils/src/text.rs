//! Text utilities

/// Check whether a raw source line is a comment
///
/// Only the very first character counts: an indented `#` is data.
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

/// Normalize a source line: lower-case and trim surrounding whitespace
pub fn normalize_line(line: &str) -> String {
    line.to_lowercase().trim().to_string()
}

/// Truncate text to max length, trying to break at word boundary
pub fn truncate_smart(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    let mut cut = max_len.saturating_sub(3);
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }

    // Prefer the last space before the cut
    match text[..cut].rfind(' ') {
        Some(last_space) if last_space > 0 => text[..last_space].to_string() + "...",
        _ => text[..cut].to_string() + "...",
    }
}
