//! Error types for swiftflate operations.
//!
//! The encoder's error surface is deliberately narrow: every byte sequence
//! is encodable, so the only failure modes are caller misuse and
//! undersized output buffers. I/O errors can only arise in front ends that
//! drive the encoder over files or sockets.

use std::io;
use thiserror::Error;

/// The main error type for swiftflate operations.
#[derive(Debug, Error)]
pub enum SwiftflateError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output buffer too small for the documented worst case.
    #[error("Output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// The stream has already been finished.
    #[error("Stream is closed: encode/finish called after finish")]
    StreamClosed,
}

/// Result type alias for swiftflate operations.
pub type Result<T> = std::result::Result<T, SwiftflateError>;

impl SwiftflateError {
    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }
}
