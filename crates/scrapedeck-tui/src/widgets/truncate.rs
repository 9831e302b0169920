//! Cell truncation for long free-text fields (description, address).

/// Truncate `text` to at most `max` characters, appending `…` when cut.
/// Counts chars, not bytes, so multi-byte text never splits mid-codepoint.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_passes_through() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn long_text_gets_an_ellipsis() {
        assert_eq!(truncate("hello world", 8), "hello w…");
    }

    #[test]
    fn multibyte_text_counts_chars_not_bytes() {
        assert_eq!(truncate("über längliche Straße", 9), "über län…");
    }
}
