//! Immutable source buffers shared between cursors.

use std::fmt;
use std::sync::Arc;

/// An immutable buffer of source characters.
///
/// Positions throughout srcwalk are char offsets, not byte offsets, so
/// the text is stored as a `Vec<char>` for direct indexing. Buffers are
/// handed around behind an [`Arc`]: nested cursors and lookahead copies
/// share the same allocation and never duplicate text.
pub struct SourceBuffer {
    chars: Vec<char>,
}

impl SourceBuffer {
    /// Create a buffer from source text.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Create a buffer ready to be shared between cursors.
    pub fn shared(text: &str) -> Arc<Self> {
        Arc::new(Self::new(text))
    }

    /// Number of characters in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the buffer holds no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at a char offset; `None` past the end.
    #[inline]
    pub fn get(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Substring between two char offsets, clamped to the buffer.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let s = start.min(self.chars.len());
        let e = end.min(self.chars.len()).max(s);
        self.chars[s..e].iter().collect()
    }

    /// The full text.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Offset of the next `\n` at or after `from`, if any.
    pub fn next_newline(&self, from: usize) -> Option<usize> {
        let from = from.min(self.chars.len());
        self.chars[from..]
            .iter()
            .position(|&ch| ch == '\n')
            .map(|i| from + i)
    }
}

impl From<&str> for SourceBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for SourceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceBuffer({} chars)", self.chars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_len() {
        let buf = SourceBuffer::new("abc");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.get(0), Some('a'));
        assert_eq!(buf.get(2), Some('c'));
        assert_eq!(buf.get(3), None);
    }

    #[test]
    fn test_slice_clamps() {
        let buf = SourceBuffer::new("hello");
        assert_eq!(buf.slice(1, 4), "ell");
        assert_eq!(buf.slice(3, 100), "lo");
        assert_eq!(buf.slice(4, 2), "");
        assert_eq!(buf.slice(100, 200), "");
    }

    #[test]
    fn test_char_offsets_not_bytes() {
        let buf = SourceBuffer::new("aé✓b");
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.get(1), Some('é'));
        assert_eq!(buf.slice(1, 3), "é✓");
    }

    #[test]
    fn test_next_newline() {
        let buf = SourceBuffer::new("ab\ncd\n");
        assert_eq!(buf.next_newline(0), Some(2));
        assert_eq!(buf.next_newline(2), Some(2));
        assert_eq!(buf.next_newline(3), Some(5));
        assert_eq!(buf.next_newline(6), None);
    }

    #[test]
    fn test_shared_buffer_is_one_allocation() {
        let buf = SourceBuffer::shared("shared text");
        let other = Arc::clone(&buf);
        assert_eq!(Arc::strong_count(&buf), 2);
        assert_eq!(other.text(), "shared text");
    }
}
