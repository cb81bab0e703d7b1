//! Lexical context, bracket depth, and per-cursor lexical configuration.

/// Running balance of open versus close brackets of each kind.
///
/// Counters move only while the cursor is in plain code. They are signed
/// and may go negative on partial or malformed input: the cursor counts
/// brackets, it does not match them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Depth {
    pub parens: i32,
    pub brackets: i32,
    pub braces: i32,
    pub angles: i32,
}

impl Depth {
    /// Whether every counter is back at zero.
    pub fn is_balanced(&self) -> bool {
        self.parens == 0 && self.brackets == 0 && self.braces == 0 && self.angles == 0
    }
}

/// The two comment shapes the cursor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// The lexical context a cursor is currently inside.
///
/// A single enum rather than separate optional flags, so a cursor is in
/// exactly one context at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexContext {
    /// Plain code, the only context in which depth counters move.
    #[default]
    Code,
    /// Inside a string literal opened (and eventually closed) by `delim`.
    String { delim: char },
    /// Inside a line comment; cleared at the next newline.
    LineComment,
    /// Inside a block comment. `matched` counts how many characters of
    /// `close` have been seen so far.
    BlockComment {
        open: String,
        close: String,
        matched: usize,
    },
    /// Inside a regex literal; the close sequence is matched
    /// incrementally exactly as for block comments.
    Regex {
        open: String,
        close: String,
        matched: usize,
    },
}

impl LexContext {
    /// Whether the cursor is in plain code.
    #[inline]
    pub fn is_code(&self) -> bool {
        matches!(self, LexContext::Code)
    }

    /// Whether the cursor is inside a string literal.
    #[inline]
    pub fn in_string(&self) -> bool {
        matches!(self, LexContext::String { .. })
    }

    /// Whether the cursor is inside a line or block comment.
    #[inline]
    pub fn in_comment(&self) -> bool {
        matches!(self, LexContext::LineComment | LexContext::BlockComment { .. })
    }

    /// Whether the cursor is inside a regex literal.
    #[inline]
    pub fn in_regex(&self) -> bool {
        matches!(self, LexContext::Regex { .. })
    }

    /// The delimiter of the string the cursor is inside, if any.
    pub fn string_delim(&self) -> Option<char> {
        match self {
            LexContext::String { delim } => Some(*delim),
            _ => None,
        }
    }

    /// The kind of comment the cursor is inside, if any.
    pub fn comment_kind(&self) -> Option<CommentKind> {
        match self {
            LexContext::LineComment => Some(CommentKind::Line),
            LexContext::BlockComment { .. } => Some(CommentKind::Block),
            _ => None,
        }
    }
}

/// Which literals a cursor recognizes while advancing.
///
/// A cursor constructed without options skips lexical detection entirely
/// and only tracks position and depth, which is the fast path for
/// plain-text line splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexOptions {
    /// Characters that open and close string literals.
    pub string_delims: Vec<char>,
    /// Line comment marker, e.g. `//`.
    pub line_comment: Option<String>,
    /// Block comment open/close pairs, e.g. `("/*", "*/")`.
    pub block_comments: Vec<(String, String)>,
    /// Regex literal open/close pairs.
    pub regexes: Vec<(String, String)>,
}

impl LexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The JavaScript/TypeScript setup: `'`, `"` and backtick strings,
    /// `//` line comments, `/* */` block comments. Regex delimiters are
    /// left to the caller; a bare `/` pair would also match division.
    pub fn javascript() -> Self {
        Self {
            string_delims: vec!['\'', '"', '`'],
            line_comment: Some("//".to_string()),
            block_comments: vec![("/*".to_string(), "*/".to_string())],
            regexes: Vec::new(),
        }
    }

    /// Add string delimiters.
    pub fn with_strings(mut self, delims: &[char]) -> Self {
        self.string_delims.extend_from_slice(delims);
        self
    }

    /// Set the line comment marker.
    pub fn with_line_comment(mut self, marker: &str) -> Self {
        self.line_comment = Some(marker.to_string());
        self
    }

    /// Add a block comment open/close pair.
    pub fn with_block_comment(mut self, open: &str, close: &str) -> Self {
        self.block_comments.push((open.to_string(), close.to_string()));
        self
    }

    /// Add a regex literal open/close pair.
    pub fn with_regex(mut self, open: &str, close: &str) -> Self {
        self.regexes.push((open.to_string(), close.to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_is_code() {
        let ctx = LexContext::default();
        assert!(ctx.is_code());
        assert!(!ctx.in_string());
        assert!(!ctx.in_comment());
        assert!(!ctx.in_regex());
    }

    #[test]
    fn test_context_accessors() {
        let s = LexContext::String { delim: '`' };
        assert_eq!(s.string_delim(), Some('`'));
        assert!(s.in_string());

        let c = LexContext::BlockComment {
            open: "/*".to_string(),
            close: "*/".to_string(),
            matched: 0,
        };
        assert_eq!(c.comment_kind(), Some(CommentKind::Block));
        assert!(c.in_comment());
        assert_eq!(LexContext::LineComment.comment_kind(), Some(CommentKind::Line));
    }

    #[test]
    fn test_depth_balance() {
        let mut depth = Depth::default();
        assert!(depth.is_balanced());
        depth.parens += 1;
        assert!(!depth.is_balanced());
        depth.parens -= 1;
        depth.angles -= 2;
        assert!(!depth.is_balanced());
    }

    #[test]
    fn test_javascript_preset() {
        let opts = LexOptions::javascript();
        assert_eq!(opts.string_delims, vec!['\'', '"', '`']);
        assert_eq!(opts.line_comment.as_deref(), Some("//"));
        assert_eq!(opts.block_comments.len(), 1);
        assert!(opts.regexes.is_empty());
    }

    #[test]
    fn test_builder_helpers() {
        let opts = LexOptions::new()
            .with_strings(&['"'])
            .with_line_comment("#")
            .with_block_comment("<!--", "-->")
            .with_regex("/", "/");
        assert_eq!(opts.string_delims, vec!['"']);
        assert_eq!(opts.line_comment.as_deref(), Some("#"));
        assert_eq!(opts.block_comments[0], ("<!--".to_string(), "-->".to_string()));
        assert_eq!(opts.regexes[0], ("/".to_string(), "/".to_string()));
    }
}
