use unicode_width::UnicodeWidthStr;

/// Safely truncate string to max characters, appending "…" if truncated 🛡️
pub fn truncate(s: &str, max_width: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_width {
        chars
            .into_iter()
            .take(max_width.saturating_sub(1))
            .collect::<String>()
            + "…"
    } else {
        s.to_string()
    }
}

/// Drop characters from the front until the string fits `max_width` display
/// columns. Keeps the cursor end of a long URL visible in the input popup.
pub fn fit_tail(s: &str, max_width: usize) -> &str {
    let mut slice = s;
    while UnicodeWidthStr::width(slice) > max_width {
        let mut chars = slice.chars();
        chars.next();
        slice = chars.as_str();
    }
    slice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("short", 8), "short");
    }

    #[test]
    fn fit_tail_keeps_the_end() {
        assert_eq!(fit_tail("abcdef", 4), "cdef");
        assert_eq!(fit_tail("abc", 4), "abc");
    }
}
