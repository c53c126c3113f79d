//! # swiftflate-core
//!
//! Core components for the swiftflate streaming encoder.
//!
//! This crate provides the leaf building blocks the encoder is assembled
//! from:
//!
//! - [`bits`]: bounded LSB-first bit packing into a caller-owned buffer
//! - [`crc`]: incremental CRC-32 (ISO 3309) as used by gzip framing
//! - [`adler`]: incremental Adler-32 (RFC 1950) as used by zlib framing
//! - [`error`]: error types
//!
//! All checksum and code tables are computed at compile time, so there is
//! no process-wide initialization step to run before first use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adler;
pub mod bits;
pub mod crc;
pub mod error;

// Re-exports for convenience
pub use adler::Adler32;
pub use bits::BitSink;
pub use crc::Crc32;
pub use error::{Result, SwiftflateError};
