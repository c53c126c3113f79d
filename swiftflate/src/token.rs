//! Literal/copy tokens produced by the match finder.

/// One unit of the LZ77 token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single literal byte, emitted verbatim.
    Literal(u8),
    /// A back-reference copying previously seen bytes.
    Copy {
        /// Number of bytes to copy (3-258).
        len: u16,
        /// Distance back into the window (1-32768).
        dist: u16,
    },
}
