//! Character-level helpers shared by handles and message text.

/// Cuts `s` at its first `\r` or `\n`.
///
/// Anything after the first line ending is discarded along with it, so a
/// stray `\r` in the middle of a line also ends it.
pub fn strip_line_ending(s: &str) -> &str {
    s.find(['\r', '\n']).map_or(s, |end| &s[..end])
}

/// Returns the first `max` characters of `s`.
///
/// Always cuts on a character boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(end, _)| &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_lf_and_crlf() {
        assert_eq!(strip_line_ending("hello\n"), "hello");
        assert_eq!(strip_line_ending("hello\r\n"), "hello");
        assert_eq!(strip_line_ending("hello"), "hello");
        assert_eq!(strip_line_ending("\n"), "");
    }

    #[test]
    fn embedded_carriage_return_ends_the_line() {
        assert_eq!(strip_line_ending("ab\rcd\n"), "ab");
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_chars("alexanderthegreat", 10), "alexandert");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
        assert_eq!(truncate_chars("", 3), "");
    }
}
