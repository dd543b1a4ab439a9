use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `s` to at most `max_width` display columns, ending in `...` when
/// anything was removed. Newlines are flattened to spaces.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let flat = s.replace('\n', " ");
    if flat.width() <= max_width {
        return flat;
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut out = String::new();
    let mut width = 0;
    for ch in flat.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Short string", 20), "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let result = truncate_string("This is a very long string that should be truncated", 20);
        assert_eq!(result, "This is a very lo...");
        assert_eq!(result.width(), 20);
    }

    #[test]
    fn test_truncate_string_empty() {
        assert_eq!(truncate_string("", 20), "");
    }

    #[test]
    fn test_truncate_string_wide_chars() {
        // each CJK char is two columns wide
        let result = truncate_string("日本語のテキストです", 9);
        assert_eq!(result, "日本語...");
        assert!(result.width() <= 9);
    }

    #[test]
    fn test_truncate_string_flattens_newlines() {
        assert_eq!(truncate_string("a\nb", 10), "a b");
    }

    #[test]
    fn test_truncate_string_tiny_width() {
        assert_eq!(truncate_string("abcdef", 2), "..");
    }
}
