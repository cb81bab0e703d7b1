//! Span and position types for source location tracking.
//!
//! These types are used by the cursor and by the tooling above it to
//! report where slices and diagnostics originate in the source text.

use std::fmt;
use std::ops::Range;

use crate::buffer::SourceBuffer;

/// A half-open span of char offsets into a source buffer.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The char offset where this span starts (inclusive).
    pub start: usize,
    /// The char offset where this span ends (exclusive).
    pub end: usize,
}

impl TextSpan {
    /// Create a new span.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// The number of characters covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this span contains the given offset.
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Convert to a char-offset range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Return a new span covering both this span and the other.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        TextSpan::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A human-facing position: 1-based line and column plus the absolute
/// char offset in the outermost document.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Location {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column.
    pub col: u32,
    /// Absolute char offset in the outermost document.
    pub offset: usize,
}

impl Location {
    pub fn new(line: u32, col: u32, offset: usize) -> Self {
        Self { line, col, offset }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A map from char offsets to line/column positions, built by indexing a
/// buffer's newlines. Used to recompute a cursor position from scratch
/// after an explicit seek.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Char offsets of the start of each line.
    line_starts: Vec<usize>,
}

impl LineMap {
    /// Build a line map from a source buffer.
    pub fn new(buffer: &SourceBuffer) -> Self {
        let mut line_starts = vec![0];
        for i in 0..buffer.len() {
            if buffer.get(i) == Some('\n') {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Build a line map directly from text.
    pub fn from_text(text: &str) -> Self {
        Self::new(&SourceBuffer::new(text))
    }

    /// The 1-based line number for a char offset.
    pub fn line_of(&self, offset: usize) -> u32 {
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        };
        idx as u32 + 1
    }

    /// The full position for a char offset. The offset is echoed back
    /// unchanged; the caller decides whether it is local or absolute.
    pub fn location_of(&self, offset: usize) -> Location {
        let line = self.line_of(offset);
        let line_start = self.line_starts[(line - 1) as usize];
        Location {
            line,
            col: (offset - line_start) as u32 + 1,
            offset,
        }
    }

    /// The char offset at which a 1-based line starts.
    pub fn line_start(&self, line: u32) -> usize {
        self.line_starts[(line - 1) as usize]
    }

    /// Total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
