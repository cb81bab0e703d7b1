//! srcwalk_cursor: context-aware cursor over JavaScript/TypeScript-like
//! source text.
//!
//! The cursor walks character by character while tracking:
//! - lexical context: string / line comment / block comment / regex / code
//! - nested bracket depth for parens, brackets, braces, and angle brackets
//! - 1-based line/column and char offset, with nested-offset translation
//!   for cursors running over an excerpt of a larger document
//!
//! It is the foundation for tooling that edits source files without a
//! full parser: template fillers, header inserters, format converters.
//! Malformed input never errors: an unterminated string or comment
//! simply leaves its context set at end of buffer for callers to inspect.

pub mod chars;
pub mod context;
mod cursor;
mod error;

pub use context::{CommentKind, Depth, LexContext, LexOptions};
pub use cursor::{CodeScan, Cursor, CursorState};
pub use error::CursorError;
