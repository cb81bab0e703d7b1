//! Cursor construction errors.

use thiserror::Error;

/// Invalid construction input.
///
/// Advancement itself never fails: a malformed or unterminated construct
/// simply leaves the corresponding lexical context set through end of
/// buffer, where callers can inspect it. Only explicitly invalid
/// starting state is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("start offset {offset} is past the end of a {len}-character buffer")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("line and column are 1-based, got {line}:{col}")]
    PositionNotOneBased { line: u32, col: u32 },
}
