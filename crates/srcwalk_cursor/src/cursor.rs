//! The context-aware source cursor.
//!
//! A cursor owns a mutable position (char offset, 1-based line/column,
//! lexical context, bracket depth) over an immutable shared buffer. It
//! advances one character at a time; every advancement updates position,
//! depth (in plain code only), and the lexical context driven by the
//! cursor's [`LexOptions`]. Higher-level consume combinators and
//! position/slice utilities are built on that single primitive.

use std::sync::Arc;

use srcwalk_core::{LineMap, Location, SourceBuffer, TextSpan};

use crate::chars::{is_inline_whitespace, is_line_break, is_quote_char, is_whitespace, is_word_char};
use crate::context::{Depth, LexContext, LexOptions};
use crate::error::CursorError;

/// Everything needed to construct a cursor mid-flight: resuming after a
/// pause, or nesting a cursor over an excerpt of a containing document.
#[derive(Debug, Clone)]
pub struct CursorState {
    /// The buffer the cursor iterates.
    pub buffer: Arc<SourceBuffer>,
    /// The containing document, when `buffer` is an excerpt of it.
    pub absolute: Option<Arc<SourceBuffer>>,
    /// Lexical configuration; `None` disables all lexical detection.
    pub options: Option<LexOptions>,
    /// Added to `offset` to produce positions in the containing document.
    pub nested_offset: usize,
    /// Starting char offset into `buffer`.
    pub offset: usize,
    /// Starting line, 1-based.
    pub line: u32,
    /// Starting column, 1-based.
    pub col: u32,
    /// Starting lexical context.
    pub context: LexContext,
    /// Starting depth counters.
    pub depth: Depth,
}

impl CursorState {
    /// State at the start of `buffer`: offset 0, line 1, column 1, code
    /// context, zero depths, no options.
    pub fn new(buffer: Arc<SourceBuffer>) -> Self {
        Self {
            buffer,
            absolute: None,
            options: None,
            nested_offset: 0,
            offset: 0,
            line: 1,
            col: 1,
            context: LexContext::Code,
            depth: Depth::default(),
        }
    }
}

/// The scan state handed to [`Cursor::consume_code_while`] predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeScan {
    /// Char offset of the character under inspection.
    pub index: usize,
    /// The character under inspection.
    pub current: char,
    /// The character before it, if any.
    pub previous: Option<char>,
    /// The quote character currently open, if any. Both the opening and
    /// the closing quote character are reported as inside the quote.
    pub quote: Option<char>,
    /// Whether `previous` is an escaping backslash.
    pub escaped: bool,
}

/// One step of incremental close-sequence matching, for block comments
/// and regex literals. `matched` characters of `close` have been seen on
/// previous advances.
fn step_close(close: &str, matched: usize, cur: char, escaped: bool) -> CloseStep {
    let len = close.chars().count();
    if !escaped && close.chars().nth(matched) == Some(cur) {
        if matched + 1 >= len {
            CloseStep::Closed
        } else {
            CloseStep::Matched(matched + 1)
        }
    } else if !escaped && close.chars().next() == Some(cur) {
        // A mismatch can still restart the close sequence.
        if len == 1 {
            CloseStep::Closed
        } else {
            CloseStep::Matched(1)
        }
    } else {
        CloseStep::Matched(0)
    }
}

enum CloseStep {
    Matched(usize),
    Closed,
}

/// Context-aware cursor over an immutable source buffer.
///
/// Cloning a cursor copies all scalar and context state and gives the
/// clone fresh depth counters, while the underlying buffer stays shared
/// behind its `Arc`, so speculative lookahead costs nothing relative to
/// document size.
#[derive(Debug, Clone)]
pub struct Cursor {
    data: Arc<SourceBuffer>,
    absolute: Option<Arc<SourceBuffer>>,
    options: Option<LexOptions>,
    nested_offset: usize,
    offset: usize,
    line: u32,
    col: u32,
    at_line_start: bool,
    context: LexContext,
    depth: Depth,
}

impl Cursor {
    /// Cursor over a fresh buffer with no lexical options: position and
    /// depth tracking only.
    pub fn new(text: &str) -> Self {
        Self::from_buffer(SourceBuffer::shared(text), None)
    }

    /// Cursor over a fresh buffer with lexical options.
    pub fn with_options(text: &str, options: LexOptions) -> Self {
        Self::from_buffer(SourceBuffer::shared(text), Some(options))
    }

    /// Cursor over an existing shared buffer.
    pub fn from_buffer(buffer: Arc<SourceBuffer>, options: Option<LexOptions>) -> Self {
        Self {
            data: buffer,
            absolute: None,
            options,
            nested_offset: 0,
            offset: 0,
            line: 1,
            col: 1,
            at_line_start: true,
            context: LexContext::Code,
            depth: Depth::default(),
        }
    }

    /// Cursor from a full starting state, for resuming or nesting.
    ///
    /// Rejects a starting offset past the end of the buffer and
    /// zero-valued line/column; everything else is taken as given.
    pub fn from_state(state: CursorState) -> Result<Self, CursorError> {
        if state.offset > state.buffer.len() {
            return Err(CursorError::OffsetOutOfBounds {
                offset: state.offset,
                len: state.buffer.len(),
            });
        }
        if state.line == 0 || state.col == 0 {
            return Err(CursorError::PositionNotOneBased {
                line: state.line,
                col: state.col,
            });
        }
        Ok(Self {
            data: state.buffer,
            absolute: state.absolute,
            options: state.options,
            nested_offset: state.nested_offset,
            offset: state.offset,
            line: state.line,
            col: state.col,
            at_line_start: state.col == 1,
            context: state.context,
            depth: state.depth,
        })
    }

    /// Drive a fresh cursor to exhaustion, calling `f` once per loop
    /// iteration with the live cursor. If `f` leaves the offset where it
    /// found it, the loop advances one character itself, so a no-op
    /// callback cannot spin forever.
    pub fn walk(text: &str, options: Option<LexOptions>, mut f: impl FnMut(&mut Cursor)) -> Cursor {
        let mut cursor = Self::from_buffer(SourceBuffer::shared(text), options);
        while cursor.has_more() {
            let before = cursor.offset;
            f(&mut cursor);
            if cursor.offset == before {
                cursor.advance();
            }
        }
        cursor
    }

    // ========================================================================
    // State accessors
    // ========================================================================

    /// Char offset into the local buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Constant translation from local to containing-document offsets.
    #[inline]
    pub fn nested_offset(&self) -> usize {
        self.nested_offset
    }

    /// Position in the containing document: `nested_offset + offset`.
    #[inline]
    pub fn absolute_offset(&self) -> usize {
        self.nested_offset + self.offset
    }

    /// 1-based line number.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column.
    #[inline]
    pub fn col(&self) -> u32 {
        self.col
    }

    /// True between a consumed newline and the first non-inline-whitespace
    /// character after it.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// The lexical context the cursor is currently inside.
    #[inline]
    pub fn context(&self) -> &LexContext {
        &self.context
    }

    /// Current bracket depth counters.
    #[inline]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// The cursor's lexical options, if any.
    #[inline]
    pub fn options(&self) -> Option<&LexOptions> {
        self.options.as_ref()
    }

    /// The local buffer.
    #[inline]
    pub fn buffer(&self) -> &Arc<SourceBuffer> {
        &self.data
    }

    /// The containing document's buffer, when nested.
    #[inline]
    pub fn absolute_buffer(&self) -> Option<&Arc<SourceBuffer>> {
        self.absolute.as_ref()
    }

    /// Length of the local buffer in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the local buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the cursor is in plain code.
    #[inline]
    pub fn is_code(&self) -> bool {
        self.context.is_code()
    }

    /// Whether the cursor is inside a string literal.
    #[inline]
    pub fn in_string(&self) -> bool {
        self.context.in_string()
    }

    /// Whether the cursor is inside a comment.
    #[inline]
    pub fn in_comment(&self) -> bool {
        self.context.in_comment()
    }

    /// Whether the cursor is inside a regex literal.
    #[inline]
    pub fn in_regex(&self) -> bool {
        self.context.in_regex()
    }

    // ========================================================================
    // Character access (side-effect-free)
    // ========================================================================

    /// The character under the cursor, or `None` at end of buffer.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.data.get(self.offset)
    }

    /// The character one past the cursor.
    #[inline]
    pub fn peek_next(&self) -> Option<char> {
        self.data.get(self.offset + 1)
    }

    /// The character one before the cursor.
    #[inline]
    pub fn peek_prev(&self) -> Option<char> {
        self.offset.checked_sub(1).and_then(|i| self.data.get(i))
    }

    /// The character at a signed offset relative to the cursor; `None`
    /// out of range.
    pub fn char_at(&self, relative: isize) -> Option<char> {
        let idx = self.offset.checked_add_signed(relative)?;
        self.data.get(idx)
    }

    /// True while the cursor has characters left.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.offset < self.data.len()
    }

    /// True once the cursor has consumed the whole buffer.
    #[inline]
    pub fn is_eof(&self) -> bool {
        !self.has_more()
    }

    /// Whether the current character ends the line; end of buffer counts.
    pub fn at_eol(&self) -> bool {
        self.current_char().map_or(true, is_line_break)
    }

    /// Whether the current character is inline whitespace.
    pub fn at_inline_whitespace(&self) -> bool {
        self.current_char().is_some_and(is_inline_whitespace)
    }

    /// Whether the current character is a word character.
    pub fn at_word_char(&self) -> bool {
        self.current_char().is_some_and(is_word_char)
    }

    // ========================================================================
    // Advancement
    // ========================================================================

    /// Consume exactly one character, updating position, lexical context,
    /// and depth counters. Does nothing at end of buffer.
    pub fn advance(&mut self) {
        let Some(cur) = self.current_char() else {
            return;
        };
        let escaped = self.peek_prev() == Some('\\');

        // Newlines first: position reset and line-comment termination. An
        // escaped newline falls through to the plain advance below.
        if cur == '\n' && !escaped {
            self.offset += 1;
            self.line += 1;
            self.col = 1;
            self.at_line_start = true;
            if matches!(self.context, LexContext::LineComment) {
                self.context = LexContext::Code;
            }
            return;
        }

        if self.at_line_start && !is_inline_whitespace(cur) {
            self.at_line_start = false;
        }

        // Depth moves only in plain code, with or without lexical options.
        if self.context.is_code() {
            match cur {
                '(' => self.depth.parens += 1,
                ')' => self.depth.parens -= 1,
                '[' => self.depth.brackets += 1,
                ']' => self.depth.brackets -= 1,
                '{' => self.depth.braces += 1,
                '}' => self.depth.braces -= 1,
                '<' => self.depth.angles += 1,
                '>' => self.depth.angles -= 1,
                _ => {}
            }
        }

        if self.options.is_some() {
            let ctx = std::mem::take(&mut self.context);
            self.context = match ctx {
                LexContext::String { delim } => {
                    if cur == delim && !escaped {
                        LexContext::Code
                    } else {
                        LexContext::String { delim }
                    }
                }
                // Cleared by the newline branch above, never here.
                LexContext::LineComment => LexContext::LineComment,
                LexContext::BlockComment {
                    open,
                    close,
                    matched,
                } => match step_close(&close, matched, cur, escaped) {
                    CloseStep::Closed => LexContext::Code,
                    CloseStep::Matched(m) => LexContext::BlockComment {
                        open,
                        close,
                        matched: m,
                    },
                },
                LexContext::Regex {
                    open,
                    close,
                    matched,
                } => match step_close(&close, matched, cur, escaped) {
                    CloseStep::Closed => LexContext::Code,
                    CloseStep::Matched(m) => LexContext::Regex {
                        open,
                        close,
                        matched: m,
                    },
                },
                LexContext::Code => self.detect_entry(cur, escaped).unwrap_or(LexContext::Code),
            };
        }

        self.offset += 1;
        self.col += 1;
    }

    /// Which literal, if any, the character being consumed opens. Open
    /// sequences are matched eagerly by prefix against the remaining
    /// buffer; only close sequences are matched incrementally.
    fn detect_entry(&self, cur: char, escaped: bool) -> Option<LexContext> {
        let options = self.options.as_ref()?;
        if !escaped && options.string_delims.contains(&cur) {
            return Some(LexContext::String { delim: cur });
        }
        if let Some(marker) = &options.line_comment {
            if self.rest_starts_with(marker) {
                return Some(LexContext::LineComment);
            }
        }
        for (open, close) in &options.block_comments {
            if self.rest_starts_with(open) {
                return Some(LexContext::BlockComment {
                    open: open.clone(),
                    close: close.clone(),
                    matched: 0,
                });
            }
        }
        for (open, close) in &options.regexes {
            if self.rest_starts_with(open) {
                return Some(LexContext::Regex {
                    open: open.clone(),
                    close: close.clone(),
                    matched: 0,
                });
            }
        }
        None
    }

    /// Whether the text at the cursor starts with `literal`.
    fn rest_starts_with(&self, literal: &str) -> bool {
        !literal.is_empty()
            && literal
                .chars()
                .enumerate()
                .all(|(i, ch)| self.data.get(self.offset + i) == Some(ch))
    }

    // ========================================================================
    // Consuming combinators
    // ========================================================================

    /// Call [`advance`](Self::advance) up to `n` times.
    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.is_eof() {
                break;
            }
            self.advance();
        }
    }

    /// Advance while `predicate(current_char, offset)` holds or until end
    /// of buffer; returns the consumed span.
    pub fn consume_while(&mut self, mut predicate: impl FnMut(char, usize) -> bool) -> TextSpan {
        let start = self.offset;
        while let Some(ch) = self.current_char() {
            if !predicate(ch, self.offset) {
                break;
            }
            self.advance();
        }
        TextSpan::new(start, self.offset)
    }

    /// [`consume_while`](Self::consume_while), returning the consumed text.
    pub fn consume_while_sliced(
        &mut self,
        predicate: impl FnMut(char, usize) -> bool,
    ) -> String {
        let span = self.consume_while(predicate);
        self.data.slice(span.start, span.end)
    }

    /// Advance until `predicate(current_char, offset)` holds or until end
    /// of buffer; the negation of [`consume_while`](Self::consume_while).
    pub fn consume_until(&mut self, predicate: impl FnMut(char, usize) -> bool) -> TextSpan {
        let mut predicate = predicate;
        self.consume_while(move |ch, at| !predicate(ch, at))
    }

    /// [`consume_until`](Self::consume_until), returning the consumed text.
    pub fn consume_until_sliced(
        &mut self,
        predicate: impl FnMut(char, usize) -> bool,
    ) -> String {
        let span = self.consume_until(predicate);
        self.data.slice(span.start, span.end)
    }

    /// Advance while the predicate holds, tracking single/double/backtick
    /// quoting independently of the cursor's own lexical options.
    ///
    /// Lets a caller run a one-off scan that respects string boundaries
    /// without configuring full options: the predicate sees the current
    /// index, character, previous character, open quote, and escape flag
    /// through [`CodeScan`].
    pub fn consume_code_while(
        &mut self,
        mut predicate: impl FnMut(&CodeScan) -> bool,
    ) -> TextSpan {
        let start = self.offset;
        let mut quote: Option<char> = None;
        while let Some(cur) = self.current_char() {
            let previous = self.peek_prev();
            let escaped = previous == Some('\\');
            let mut closing = false;
            match quote {
                None => {
                    if is_quote_char(cur) && !escaped {
                        quote = Some(cur);
                    }
                }
                Some(q) => {
                    if cur == q && !escaped {
                        closing = true;
                    }
                }
            }
            let scan = CodeScan {
                index: self.offset,
                current: cur,
                previous,
                quote,
                escaped,
            };
            if !predicate(&scan) {
                break;
            }
            self.advance();
            if closing {
                quote = None;
            }
        }
        TextSpan::new(start, self.offset)
    }

    /// [`consume_code_while`](Self::consume_code_while), returning the
    /// consumed text.
    pub fn consume_code_while_sliced(
        &mut self,
        predicate: impl FnMut(&CodeScan) -> bool,
    ) -> String {
        let span = self.consume_code_while(predicate);
        self.data.slice(span.start, span.end)
    }

    /// Advance until the predicate holds, with the same quote tracking as
    /// [`consume_code_while`](Self::consume_code_while).
    pub fn consume_code_until(
        &mut self,
        predicate: impl FnMut(&CodeScan) -> bool,
    ) -> TextSpan {
        let mut predicate = predicate;
        self.consume_code_while(move |scan| !predicate(scan))
    }

    /// [`consume_code_until`](Self::consume_code_until), returning the
    /// consumed text.
    pub fn consume_code_until_sliced(
        &mut self,
        predicate: impl FnMut(&CodeScan) -> bool,
    ) -> String {
        let span = self.consume_code_until(predicate);
        self.data.slice(span.start, span.end)
    }

    /// Consume spaces and tabs, stopping at line breaks.
    pub fn consume_inline_whitespace(&mut self) -> TextSpan {
        self.consume_while(|ch, _| is_inline_whitespace(ch))
    }

    /// Consume whitespace, line breaks included.
    pub fn consume_whitespace(&mut self) -> TextSpan {
        self.consume_while(|ch, _| is_whitespace(ch))
    }

    /// Consume up to (not including) the next `\n`.
    pub fn consume_until_eol(&mut self) -> TextSpan {
        self.consume_while(|ch, _| ch != '\n')
    }

    /// [`consume_until_eol`](Self::consume_until_eol), returning the
    /// consumed text.
    pub fn consume_until_eol_sliced(&mut self) -> String {
        let span = self.consume_until_eol();
        self.data.slice(span.start, span.end)
    }

    /// Step past exactly one `\n` or `\r` if the cursor is on one.
    pub fn skip_eol(&mut self) {
        if matches!(self.current_char(), Some('\n') | Some('\r')) {
            self.advance();
        }
    }

    /// If the text at the cursor matches `literal`, advance past all of
    /// it and return true; otherwise leave the cursor where it is.
    pub fn consume_optional(&mut self, literal: &str) -> bool {
        let count = literal.chars().count();
        if count == 1 {
            if self.current_char() == literal.chars().next() {
                self.advance();
                return true;
            }
            return false;
        }
        if count > 0 && self.rest_starts_with(literal) {
            self.advance_n(count);
            return true;
        }
        false
    }

    /// Skip a shebang line (e.g. `#!/usr/bin/env node`) at the very
    /// start of the buffer, stopping at (not consuming) the newline.
    pub fn skip_shebang(&mut self) {
        if self.offset == 0 && self.data.get(0) == Some('#') && self.data.get(1) == Some('!') {
            let end = self.data.next_newline(0).unwrap_or(self.data.len());
            self.offset = end;
            self.col = end as u32 + 1;
            self.at_line_start = false;
        }
    }

    // ========================================================================
    // Position & slicing utilities
    // ========================================================================

    /// Snapshot the position for diagnostics. The offset is absolute
    /// (`nested_offset + offset`), so it references the containing
    /// document even from a nested cursor.
    pub fn capture_location(&self) -> Location {
        Location {
            line: self.line,
            col: self.col,
            offset: self.absolute_offset(),
        }
    }

    /// Char offset of the start of the current line, derived from the
    /// column: `offset - (col - 1)`.
    #[inline]
    pub fn line_start_offset(&self) -> usize {
        self.offset.saturating_sub(self.col as usize - 1)
    }

    /// Text of the current line up to (not including) the cursor.
    pub fn line_to_cursor(&self) -> String {
        self.data.slice(self.line_start_offset(), self.offset)
    }

    /// Full text of the current line, from line start to the next `\n`
    /// or end of buffer.
    pub fn current_line(&self) -> String {
        let start = self.line_start_offset();
        let end = self.data.next_newline(self.offset).unwrap_or(self.data.len());
        self.data.slice(start, end)
    }

    /// Remaining text from the cursor to the next `\n` or end of buffer.
    pub fn rest_of_line(&self) -> String {
        let end = self.data.next_newline(self.offset).unwrap_or(self.data.len());
        self.data.slice(self.offset, end)
    }

    /// Walk an exclusive end boundary backward over whitespace (newlines
    /// included) down to `min_index`. With `plus_one_if_trimmed`, one
    /// position is added back when any trimming happened, so the slice
    /// keeps a single trailing separator.
    pub fn decrement_on_trim(
        &self,
        min_index: usize,
        index: usize,
        plus_one_if_trimmed: bool,
    ) -> usize {
        let mut index = index.min(self.data.len());
        let floor = min_index.min(index);
        let original = index;
        while index > floor {
            match self.data.get(index - 1) {
                Some(ch) if is_whitespace(ch) => index -= 1,
                _ => break,
            }
        }
        if plus_one_if_trimmed && index < original {
            index + 1
        } else {
            index
        }
    }

    /// Raw substring between two char offsets, clamped to the buffer. A
    /// pure read; the cursor position is ignored.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.data.slice(start, end)
    }

    /// Substring covered by a span.
    pub fn slice_span(&self, span: TextSpan) -> String {
        self.data.slice(span.start, span.end)
    }

    // ========================================================================
    // Seek & lookahead
    // ========================================================================

    /// Move to an arbitrary offset (clamped to the buffer), recomputing
    /// line and column from the buffer's newlines. Context and depth are
    /// left as they are; their meaning across a seek belongs to the caller.
    pub fn seek(&mut self, offset: usize) {
        let offset = offset.min(self.data.len());
        let loc = LineMap::new(&self.data).location_of(offset);
        self.offset = offset;
        self.line = loc.line;
        self.col = loc.col;
        self.at_line_start = self.col == 1;
    }

    /// Move to an offset with a caller-supplied line/column checkpoint,
    /// skipping the newline rescan.
    pub fn seek_with(&mut self, offset: usize, line: u32, col: u32) {
        self.offset = offset.min(self.data.len());
        self.line = line.max(1);
        self.col = col.max(1);
        self.at_line_start = self.col == 1;
    }

    /// Run `f` against the live cursor, then restore the prior state and
    /// return `f`'s result. The buffer is shared, so the snapshot is
    /// cheap regardless of document size.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.clone();
        let result = f(self);
        *self = saved;
        result
    }

    /// Run `f`; keep the advanced state if it returns `Some`, restore the
    /// prior state otherwise.
    pub fn try_consume<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let saved = self.clone();
        let result = f(self);
        if result.is_none() {
            *self = saved;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_plain_char() {
        let mut c = Cursor::new("ab");
        c.advance();
        assert_eq!(c.offset(), 1);
        assert_eq!(c.line(), 1);
        assert_eq!(c.col(), 2);
    }

    #[test]
    fn test_advance_at_eof_is_noop() {
        let mut c = Cursor::new("a");
        c.advance();
        c.advance();
        c.advance();
        assert_eq!(c.offset(), 1);
        assert!(c.is_eof());
    }

    #[test]
    fn test_newline_resets_column() {
        let mut c = Cursor::new("a\nb");
        c.advance(); // a
        c.advance(); // \n
        assert_eq!(c.line(), 2);
        assert_eq!(c.col(), 1);
        assert!(c.at_line_start());
        c.advance(); // b
        assert_eq!(c.col(), 2);
        assert!(!c.at_line_start());
    }

    #[test]
    fn test_escaped_newline_does_not_bump_line() {
        let mut c = Cursor::new("a\\\nb");
        c.advance_n(4);
        assert_eq!(c.line(), 1);
        assert_eq!(c.col(), 5);
    }

    #[test]
    fn test_at_line_start_survives_inline_whitespace() {
        let mut c = Cursor::new("a\n  b");
        c.advance_n(2); // a, \n
        assert!(c.at_line_start());
        c.advance(); // space
        assert!(c.at_line_start());
        c.advance(); // space
        assert!(c.at_line_start());
        c.advance(); // b
        assert!(!c.at_line_start());
    }

    #[test]
    fn test_depth_all_bracket_kinds() {
        let mut c = Cursor::new("([{<");
        c.advance_n(4);
        let d = c.depth();
        assert_eq!(d.parens, 1);
        assert_eq!(d.brackets, 1);
        assert_eq!(d.braces, 1);
        assert_eq!(d.angles, 1);
    }

    #[test]
    fn test_depth_goes_negative_without_clamping() {
        let mut c = Cursor::new(")]");
        c.advance_n(2);
        assert_eq!(c.depth().parens, -1);
        assert_eq!(c.depth().brackets, -1);
    }

    #[test]
    fn test_string_open_and_close() {
        let opts = LexOptions::new().with_strings(&['"']);
        let mut c = Cursor::with_options("\"x\"", opts);
        c.advance();
        assert!(c.in_string());
        assert_eq!(c.context().string_delim(), Some('"'));
        c.advance(); // x
        assert!(c.in_string());
        c.advance(); // closing quote
        assert!(c.is_code());
    }

    #[test]
    fn test_escaped_delimiter_stays_in_string() {
        let opts = LexOptions::new().with_strings(&['"']);
        let mut c = Cursor::with_options(r#""a\"b""#, opts);
        c.advance_n(4); // ", a, \, "
        assert!(c.in_string());
        c.advance_n(2); // b, closing "
        assert!(c.is_code());
    }

    #[test]
    fn test_line_comment_cleared_at_newline() {
        let opts = LexOptions::new().with_line_comment("//");
        let mut c = Cursor::with_options("x // c\ny", opts);
        c.advance_n(3); // x, space, first slash
        assert!(c.in_comment());
        c.advance_n(4); // /, space, c, \n
        assert!(c.is_code());
        assert_eq!(c.line(), 2);
    }

    #[test]
    fn test_block_comment_close_restarts_mid_match() {
        let opts = LexOptions::new().with_block_comment("/*", "*/");
        let mut c = Cursor::with_options("/* ** */x", opts);
        c.advance_n(8);
        assert_eq!(c.current_char(), Some('x'));
        assert!(c.is_code());
    }

    #[test]
    fn test_regex_escaped_close_is_ignored() {
        let opts = LexOptions::new().with_regex("/", "/");
        let mut c = Cursor::with_options(r"/a\/b/ (", opts);
        c.advance_n(5); // /, a, \, /, b
        assert!(c.in_regex());
        c.advance(); // closing /
        assert!(c.is_code());
        c.advance_n(2); // space, (
        assert_eq!(c.depth().parens, 1);
    }

    #[test]
    fn test_line_comment_wins_over_regex() {
        let opts = LexOptions::new().with_line_comment("//").with_regex("/", "/");
        let mut c = Cursor::with_options("// x", opts.clone());
        c.advance();
        assert!(c.in_comment());

        let mut c = Cursor::with_options("/x", opts);
        c.advance();
        assert!(c.in_regex());
    }

    #[test]
    fn test_no_options_skips_lexical_detection() {
        let mut c = Cursor::new("\"(\"");
        c.advance_n(3);
        assert!(c.is_code());
        assert_eq!(c.depth().parens, 1);
    }

    #[test]
    fn test_peeks() {
        let mut c = Cursor::new("abc");
        assert_eq!(c.current_char(), Some('a'));
        assert_eq!(c.peek_next(), Some('b'));
        assert_eq!(c.peek_prev(), None);
        c.advance();
        assert_eq!(c.peek_prev(), Some('a'));
        assert_eq!(c.char_at(-1), Some('a'));
        assert_eq!(c.char_at(1), Some('c'));
        assert_eq!(c.char_at(2), None);
        assert_eq!(c.char_at(-2), None);
    }

    #[test]
    fn test_consume_optional() {
        let mut c = Cursor::new("lets");
        assert!(!c.consume_optional("lex"));
        assert_eq!(c.offset(), 0);
        assert!(c.consume_optional("let"));
        assert_eq!(c.offset(), 3);
        assert!(c.consume_optional("s"));
        assert!(c.is_eof());
        assert!(!c.consume_optional("x"));
    }

    #[test]
    fn test_rest_starts_with_stops_at_eof() {
        let mut c = Cursor::new("ab");
        c.advance();
        assert!(!c.consume_optional("bc"));
        assert_eq!(c.offset(), 1);
    }

    #[test]
    fn test_skip_shebang() {
        let mut c = Cursor::new("#!/usr/bin/env node\nconst x = 1;");
        c.skip_shebang();
        assert_eq!(c.current_char(), Some('\n'));
        assert_eq!(c.line(), 1);
        c.skip_eol();
        assert_eq!(c.line(), 2);
    }

    #[test]
    fn test_skip_shebang_only_at_start() {
        let mut c = Cursor::new("x#!y");
        c.advance();
        c.skip_shebang();
        assert_eq!(c.offset(), 1);
    }

    #[test]
    fn test_depth_char_can_still_open_a_literal() {
        // An angle bracket both counts toward depth and opens a
        // configured comment whose marker starts with it.
        let opts = LexOptions::new().with_block_comment("<!--", "-->");
        let mut c = Cursor::with_options("<!-- x --> y", opts);
        c.advance();
        assert!(c.in_comment());
        assert_eq!(c.depth().angles, 1);
    }
}
