//! Text helpers shared by history entries and responses.

/// Longest string (in characters) kept verbatim in a history entry.
pub const DISPLAY_LIMIT: usize = 100;

/// Marker appended to strings cut at [`DISPLAY_LIMIT`].
pub const ELLIPSIS: &str = "...";

/// Shortens `text` to [`DISPLAY_LIMIT`] characters, appending [`ELLIPSIS`]
/// when anything was cut.
///
/// Counts Unicode scalar values, never splitting a multi-byte character.
pub fn truncate_for_display(text: &str) -> String {
    match text.char_indices().nth(DISPLAY_LIMIT) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Number of whitespace-delimited, non-empty tokens in `text`.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        let text = "a".repeat(80);
        assert_eq!(truncate_for_display(&text), text);
    }

    #[test]
    fn text_at_limit_is_unchanged() {
        let text = "b".repeat(DISPLAY_LIMIT);
        assert_eq!(truncate_for_display(&text), text);
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        let text = "c".repeat(150);
        let truncated = truncate_for_display(&text);
        assert_eq!(truncated, format!("{}...", "c".repeat(100)));
        assert_eq!(truncated.chars().count(), 103);
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let text = "你".repeat(150);
        let truncated = truncate_for_display(&text);
        assert_eq!(truncated, format!("{}...", "你".repeat(100)));
    }

    #[test]
    fn word_count_ignores_repeated_whitespace() {
        assert_eq!(word_count("Hola  mundo"), 2);
        assert_eq!(word_count("  leading and trailing \n"), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count(" \t\n"), 0);
    }
}
