//! Character classification helpers used by the cursor.

/// Check if a character terminates a line (`\n` or `\r`).
///
/// Only `\n` moves the cursor's line counter; `\r` is classified here so
/// that [`skip_eol`](crate::Cursor::skip_eol) can step over either.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// Check if a character is inline whitespace: space or tab, never a
/// line break.
#[inline]
pub fn is_inline_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Check if a character is any whitespace the cursor skips, line breaks
/// included.
#[inline]
pub fn is_whitespace(ch: char) -> bool {
    is_inline_whitespace(ch) || is_line_break(ch)
}

/// Check if a character can appear in a plain variable name: `[a-zA-Z0-9_]`.
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Check if a character is one of the quote characters tracked by
/// [`consume_code_while`](crate::Cursor::consume_code_while).
#[inline]
pub fn is_quote_char(ch: char) -> bool {
    matches!(ch, '\'' | '"' | '`')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_whitespace_excludes_line_breaks() {
        assert!(is_inline_whitespace(' '));
        assert!(is_inline_whitespace('\t'));
        assert!(!is_inline_whitespace('\n'));
        assert!(!is_inline_whitespace('\r'));
    }

    #[test]
    fn test_whitespace_includes_line_breaks() {
        assert!(is_whitespace('\n'));
        assert!(is_whitespace('\r'));
        assert!(is_whitespace(' '));
        assert!(!is_whitespace('x'));
    }

    #[test]
    fn test_word_chars() {
        assert!(is_word_char('a'));
        assert!(is_word_char('Z'));
        assert!(is_word_char('7'));
        assert!(is_word_char('_'));
        assert!(!is_word_char('$'));
        assert!(!is_word_char('-'));
    }

    #[test]
    fn test_quote_chars() {
        assert!(is_quote_char('\''));
        assert!(is_quote_char('"'));
        assert!(is_quote_char('`'));
        assert!(!is_quote_char('/'));
    }
}
