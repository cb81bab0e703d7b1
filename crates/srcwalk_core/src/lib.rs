//! srcwalk_core: buffer and position primitives for the srcwalk cursor.
//!
//! Provides the shared immutable source buffer, span and location types,
//! and the newline index used to recompute positions on explicit seeks.

pub mod buffer;
pub mod text;

// Re-export commonly used types
pub use buffer::SourceBuffer;
pub use text::{LineMap, Location, TextSpan};
