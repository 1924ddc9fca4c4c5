/// Keep only the last `window_size` whitespace-separated words of `text`,
/// joined by single spaces. A window of 0 returns the text unchanged.
pub fn context_window(text: &str, window_size: usize) -> String {
    if window_size == 0 {
        return text.to_string();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let start = words.len().saturating_sub(window_size);
    words[start..].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_trailing_words() {
        assert_eq!(context_window("a b c d e", 2), "d e");
    }

    #[test]
    fn short_text_is_normalized_not_truncated() {
        assert_eq!(context_window("one\n\ntwo  three", 10), "one two three");
    }

    #[test]
    fn empty_context_stays_empty() {
        assert_eq!(context_window("", 500), "");
        assert_eq!(context_window("   ", 500), "");
    }

    #[test]
    fn zero_window_disables_truncation() {
        assert_eq!(context_window("keep\n\nas is", 0), "keep\n\nas is");
    }
}
