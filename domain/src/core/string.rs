//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// First `max_chars` characters of a string, without ellipsis
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        let s = "日本語のテキスト";
        let t = truncate(s, 10);
        assert!(t.ends_with("..."));
        assert!(t.len() <= 10);
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("hello", 10), "hello");
        assert_eq!(char_prefix("hello", 2), "he");
        assert_eq!(char_prefix("日本語", 2), "日本");
        assert_eq!(char_prefix("", 5), "");
    }
}
