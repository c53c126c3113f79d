//! # swiftflate
//!
//! A fast, single-pass streaming encoder for the DEFLATE family of formats:
//! raw DEFLATE (RFC 1951), zlib (RFC 1950), and gzip (RFC 1952).
//!
//! swiftflate trades compression ratio for speed: it emits only fixed
//! Huffman blocks (never dynamic tables), searches for matches greedily
//! with bounded effort, and keeps no output buffering of its own — every
//! call appends directly into a caller-owned buffer. It is meant for
//! latency-sensitive pipelines such as compressing network responses on
//! the fly, not for maximal-ratio archival.
//!
//! ## Streaming
//!
//! A [`Stream`] is driven through any number of [`Stream::encode`] calls
//! with arbitrarily chunked input, then exactly one [`Stream::finish`].
//! Back-references reach up to 32 KiB across call boundaries, and the
//! format checksum is chunking-invariant.
//!
//! ```
//! use swiftflate::{Format, Stream, encode_bound};
//!
//! let input = b"Hello, World! Hello, World!";
//! let mut out = vec![0u8; encode_bound(input.len()) + encode_bound(0)];
//!
//! let mut stream = Stream::new(6, Format::Gzip);
//! let mut n = stream.encode(&mut out, input, false).unwrap();
//! n += stream.finish(&mut out[n..]).unwrap();
//! out.truncate(n);
//! // `out` is now a well-formed gzip member.
//! ```
//!
//! ## One-shot
//!
//! ```
//! let compressed = swiftflate::compress(b"some bytes", 6, swiftflate::Format::Zlib).unwrap();
//! ```
//!
//! ## Levels
//!
//! - Level 0: no matching; input is carried in stored blocks
//! - Levels 1-4: greedy matching with increasing search effort
//! - Levels 5-9: greedy matching with one-position lazy lookahead

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod frame;
pub mod lz77;
pub mod packer;
pub mod stream;
pub mod tables;
pub mod token;

// Re-exports
pub use frame::Format;
pub use lz77::MatchFinder;
pub use stream::{Stream, compress, encode_bound};
pub use swiftflate_core::error::{Result, SwiftflateError};
pub use token::Token;
