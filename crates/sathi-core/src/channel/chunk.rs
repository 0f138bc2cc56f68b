//! Message chunking for Telegram.
//!
//! Telegram limits text messages to 4096 characters. Long replies are split
//! at line boundaries where possible, falling back to a hard cut on a
//! character boundary.

/// Telegram hard limit for text messages.
pub const TELEGRAM_MAX_LEN: usize = 4096;

/// Split `text` into chunks of at most `max_len` characters (default
/// [`TELEGRAM_MAX_LEN`]). Splits prefer paragraph breaks, then line breaks;
/// the newline at a split point is dropped.
pub fn chunk_text(text: &str, max_len: Option<usize>) -> Vec<String> {
    let limit = max_len.unwrap_or(TELEGRAM_MAX_LEN).max(1);

    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.chars().count() <= limit {
            chunks.push(remaining.to_string());
            break;
        }

        // Byte offset just past the `limit`-th character.
        let window_end = remaining
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        let window = &remaining[..window_end];

        let (split_at, skip) = find_split_point(window);
        chunks.push(remaining[..split_at].to_string());
        remaining = &remaining[split_at + skip..];
    }

    chunks
}

/// Returns (byte offset of the split, bytes of separator to skip).
fn find_split_point(window: &str) -> (usize, usize) {
    if let Some(pos) = window.rfind("\n\n")
        && pos > 0
    {
        return (pos, 2);
    }

    if let Some(pos) = window.rfind('\n')
        && pos > 0
    {
        return (pos, 1);
    }

    (window.len(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(chunk_text("", None).is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        assert_eq!(chunk_text("hello", None), vec!["hello".to_string()]);
    }

    #[test]
    fn test_exact_limit_is_single_chunk() {
        let text = "a".repeat(TELEGRAM_MAX_LEN);
        assert_eq!(chunk_text(&text, None).len(), 1);
    }

    #[test]
    fn test_splits_at_line_boundary() {
        let text = "line one\nline two\nline three";
        let chunks = chunk_text(text, Some(18));
        assert_eq!(chunks, vec!["line one\nline two", "line three"]);
    }

    #[test]
    fn test_prefers_paragraph_boundary() {
        let text = "para one\n\npara two\nmore";
        let chunks = chunk_text(text, Some(20));
        assert_eq!(chunks[0], "para one");
        assert_eq!(chunks[1], "para two\nmore");
    }

    #[test]
    fn test_hard_cut_without_newlines() {
        let text = "x".repeat(10);
        let chunks = chunk_text(&text, Some(4));
        assert_eq!(chunks, vec!["xxxx", "xxxx", "xx"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Devanagari characters are three bytes each in UTF-8
        let text = "नमस्ते".repeat(1000);
        let chunks = chunk_text(&text, None);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= TELEGRAM_MAX_LEN);
        }
        assert_eq!(chunks.concat(), text);
    }
}
