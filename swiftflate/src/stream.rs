//! The streaming state machine: `new` / `encode` / `finish`.
//!
//! One [`Stream`] is one compression session. The caller feeds input in
//! chunks of any size (including empty) through [`Stream::encode`] and
//! closes the session with exactly one [`Stream::finish`]. Every call
//! appends into a caller-owned output buffer and returns the number of
//! bytes written; the engine allocates no output storage of its own.
//!
//! The format header is emitted lazily by the first call that produces
//! output, so a stream that is created and immediately finished still
//! yields a well-formed empty-payload member. Between calls the stream
//! carries at most 7 buffered bits; a full byte always goes straight to
//! the output.
//!
//! A `Stream` is single-threaded state: drive it from one thread at a
//! time. Independent streams share nothing but compile-time constant
//! tables and may run concurrently.

use crate::frame::{self, Format};
use crate::lz77::MatchFinder;
use crate::packer;
use swiftflate_core::adler::Adler32;
use swiftflate_core::bits::BitSink;
use swiftflate_core::crc::Crc32;
use swiftflate_core::error::{Result, SwiftflateError};

/// Worst-case number of bytes a single [`Stream::encode`] call may write
/// for `input_len` bytes of input.
///
/// Fixed-Huffman literals cost at most 9 bits each, so compressed output
/// is bounded by the input plus one eighth; the constant covers the
/// format header, block framing, and a carried partial byte. The same
/// value at `input_len == 0` bounds [`Stream::finish`]. Callers size
/// their output buffers with this; the engine never writes past it.
pub const fn encode_bound(input_len: usize) -> usize {
    input_len + input_len / 8 + 24
}

/// Lifecycle phase of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Created; no output produced yet.
    Idle,
    /// At least one `encode` call has run.
    Active,
    /// `finish` has run; the stream is spent.
    Closed,
}

/// Per-format checksum engine over the raw input bytes.
#[derive(Debug)]
enum Check {
    Crc32(Crc32),
    Adler32(Adler32),
}

impl Check {
    fn for_format(format: Format) -> Self {
        match format {
            // Raw framing emits no checksum, but the CRC is still tracked
            // so callers can read it for diagnostics.
            Format::Gzip | Format::Raw => Self::Crc32(Crc32::new()),
            Format::Zlib => Self::Adler32(Adler32::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Crc32(crc) => crc.update(data),
            Self::Adler32(adler) => adler.update(data),
        }
    }

    fn value(&self) -> u32 {
        match self {
            Self::Crc32(crc) => crc.finalize(),
            Self::Adler32(adler) => adler.finalize(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Crc32(crc) => crc.reset(),
            Self::Adler32(adler) => adler.reset(),
        }
    }
}

/// A single-pass streaming encoder session.
#[derive(Debug)]
pub struct Stream {
    level: u8,
    format: Format,
    phase: Phase,
    header_sent: bool,
    /// Partial byte carried between calls (LSB-first, < 8 bits).
    pending_bits: u32,
    pending_count: u32,
    check: Check,
    /// Raw input bytes seen; the gzip trailer stores this mod 2^32.
    total_in: u64,
    /// Absent at level 0, where matching is disabled entirely.
    finder: Option<MatchFinder>,
}

impl Stream {
    /// Create a stream for the given compression level (0-9, clamped) and
    /// output format.
    ///
    /// Level 0 disables matching: input is carried in stored blocks with
    /// zero match-finding cost. All lookup tables are compile-time
    /// constants, so no further setup is needed before encoding.
    pub fn new(level: u8, format: Format) -> Self {
        let level = level.min(9);
        Self {
            level,
            format,
            phase: Phase::Idle,
            header_sent: false,
            pending_bits: 0,
            pending_count: 0,
            check: Check::for_format(format),
            total_in: 0,
            finder: (level >= 1).then(|| MatchFinder::new(level)),
        }
    }

    /// The configured compression level.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// The configured output format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// The checksum over all input seen so far (CRC-32 for gzip and raw,
    /// Adler-32 for zlib). For raw streams this is diagnostic only; it is
    /// never written to the output.
    pub fn checksum(&self) -> u32 {
        self.check.value()
    }

    /// Raw input bytes submitted so far.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Whether `finish` has completed.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// Compress one chunk of input, appending to `output`.
    ///
    /// `output` must hold at least [`encode_bound`]`(input.len())` bytes
    /// or the call fails with `BufferTooSmall` before writing anything.
    /// The first byte-producing call also emits the format header.
    /// Empty input is legal and writes nothing beyond that header.
    ///
    /// `more` hints that further input follows. It is only a hint: the
    /// encoded stream is correct for any chunking and any value of the
    /// flag, since blocks written here are never marked final — the
    /// closing block comes from [`Stream::finish`].
    ///
    /// Returns the number of bytes written. Fails with `StreamClosed`
    /// after `finish`.
    pub fn encode(&mut self, output: &mut [u8], input: &[u8], more: bool) -> Result<usize> {
        let _ = more;

        if self.phase == Phase::Closed {
            return Err(SwiftflateError::StreamClosed);
        }
        let needed = encode_bound(input.len());
        if output.len() < needed {
            return Err(SwiftflateError::buffer_too_small(needed, output.len()));
        }

        let mut sink = BitSink::with_pending(output, self.pending_bits, self.pending_count);
        if !self.header_sent {
            frame::write_header(&mut sink, self.format, self.level)?;
            self.header_sent = true;
        }

        self.check.update(input);
        self.total_in += input.len() as u64;

        if !input.is_empty() {
            match self.finder.as_mut() {
                None => packer::write_stored(&mut sink, input, false)?,
                Some(finder) => {
                    packer::open_fixed_block(&mut sink, false)?;
                    finder.feed(input, &mut |token| packer::write_token(&mut sink, token))?;
                    packer::end_block(&mut sink)?;
                }
            }
        }

        self.phase = Phase::Active;
        let (bits, count) = sink.pending();
        self.pending_bits = bits;
        self.pending_count = count;
        Ok(sink.written())
    }

    /// Close the stream: emit the final block, flush buffered bits, and
    /// append the format trailer.
    ///
    /// `output` must hold at least [`encode_bound`]`(0)` bytes. The final
    /// block is an empty fixed-Huffman block, emitted even for an empty
    /// stream; if no `encode` call ever produced the header it is written
    /// here first, so the member is well-formed either way.
    ///
    /// Returns the number of bytes written. A second `finish`, like any
    /// later `encode`, fails with `StreamClosed`.
    pub fn finish(&mut self, output: &mut [u8]) -> Result<usize> {
        if self.phase == Phase::Closed {
            return Err(SwiftflateError::StreamClosed);
        }
        let needed = encode_bound(0);
        if output.len() < needed {
            return Err(SwiftflateError::buffer_too_small(needed, output.len()));
        }

        let mut sink = BitSink::with_pending(output, self.pending_bits, self.pending_count);
        if !self.header_sent {
            frame::write_header(&mut sink, self.format, self.level)?;
            self.header_sent = true;
        }

        packer::open_fixed_block(&mut sink, true)?;
        packer::end_block(&mut sink)?;
        sink.align()?;
        frame::write_trailer(&mut sink, self.format, self.check.value(), self.total_in)?;

        self.phase = Phase::Closed;
        self.pending_bits = 0;
        self.pending_count = 0;
        Ok(sink.written())
    }

    /// Reset for a fresh session with the same level and format, reusing
    /// the window and hash table allocations.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.header_sent = false;
        self.pending_bits = 0;
        self.pending_count = 0;
        self.check.reset();
        self.total_in = 0;
        if let Some(finder) = self.finder.as_mut() {
            finder.reset();
        }
    }
}

/// Compress `input` in one shot.
///
/// Convenience wrapper that drives a [`Stream`] through a single
/// `encode` + `finish` pair into a freshly allocated buffer.
pub fn compress(input: &[u8], level: u8, format: Format) -> Result<Vec<u8>> {
    let mut stream = Stream::new(level, format);
    let mut out = vec![0u8; encode_bound(input.len()) + encode_bound(0)];
    let mut n = stream.encode(&mut out, input, false)?;
    n += stream.finish(&mut out[n..])?;
    out.truncate(n);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_errors() {
        let mut out = vec![0u8; 256];
        let mut stream = Stream::new(6, Format::Gzip);
        stream.encode(&mut out, b"abc", true).unwrap();
        stream.finish(&mut out).unwrap();
        assert!(stream.is_finished());

        assert!(matches!(
            stream.encode(&mut out, b"more", false),
            Err(SwiftflateError::StreamClosed)
        ));
        assert!(matches!(
            stream.finish(&mut out),
            Err(SwiftflateError::StreamClosed)
        ));
    }

    #[test]
    fn test_undersized_output_is_rejected_up_front() {
        let input = vec![0u8; 1000];
        let mut out = vec![0u8; encode_bound(input.len()) - 1];
        let mut stream = Stream::new(6, Format::Gzip);
        let err = stream.encode(&mut out, &input, false).unwrap_err();
        assert!(matches!(err, SwiftflateError::BufferTooSmall { .. }));
        // The failed call wrote nothing and the stream is still usable.
        let mut out = vec![0u8; encode_bound(input.len())];
        stream.encode(&mut out, &input, false).unwrap();
    }

    #[test]
    fn test_header_is_lazy_and_exactly_once() {
        let mut out = vec![0u8; 256];
        let mut stream = Stream::new(6, Format::Gzip);

        // Zero-length calls: the first one carries the header, later
        // ones write nothing.
        let n0 = stream.encode(&mut out, &[], true).unwrap();
        assert_eq!(n0, 10);
        assert_eq!(&out[..2], &frame::GZIP_MAGIC);
        let n1 = stream.encode(&mut out, &[], true).unwrap();
        assert_eq!(n1, 0);
    }

    #[test]
    fn test_empty_stream_emits_header_and_trailer() {
        // header + 2-byte empty final block + trailer
        for (format, framing) in [(Format::Gzip, 20), (Format::Zlib, 8), (Format::Raw, 2)] {
            let mut out = vec![0u8; 64];
            let mut stream = Stream::new(6, format);
            let n = stream.finish(&mut out).unwrap();
            assert_eq!(n, framing, "empty {format:?} member size");
        }
    }

    #[test]
    fn test_gzip_empty_trailer_fields() {
        let mut out = vec![0u8; 64];
        let mut stream = Stream::new(6, Format::Gzip);
        let n = stream.finish(&mut out).unwrap();
        // CRC of nothing is 0 and so is the length field.
        assert_eq!(&out[n - 8..n], &[0; 8]);
    }

    #[test]
    fn test_pending_bits_invariant() {
        let mut stream = Stream::new(6, Format::Raw);
        let mut out = vec![0u8; 4096];
        for chunk in [b"abcab".as_slice(), b"cabca", b"x", b"", b"yzyzyzyz"] {
            stream
                .encode(&mut out, chunk, true)
                .expect("encode must succeed");
            assert!(stream.pending_count < 8, "full bytes must be flushed");
        }
        stream.finish(&mut out).unwrap();
        assert_eq!(stream.pending_count, 0);
    }

    #[test]
    fn test_checksum_tracks_raw_input() {
        let mut out = vec![0u8; 4096];
        let mut stream = Stream::new(9, Format::Raw);
        stream.encode(&mut out, b"Hello, ", true).unwrap();
        stream.encode(&mut out, b"World!", false).unwrap();
        assert_eq!(stream.checksum(), Crc32::checksum(b"Hello, World!"));
        assert_eq!(stream.total_in(), 13);
    }

    #[test]
    fn test_reset_reuses_stream() {
        let input = b"reset me, reset me, reset me";
        let first = {
            let mut stream = Stream::new(6, Format::Zlib);
            let mut out = vec![0u8; 256];
            let mut n = stream.encode(&mut out, input, false).unwrap();
            n += stream.finish(&mut out[n..]).unwrap();
            out.truncate(n);
            out
        };

        let mut stream = Stream::new(6, Format::Zlib);
        let mut scratch = vec![0u8; 256];
        stream.encode(&mut scratch, b"unrelated garbage", false).unwrap();
        stream.finish(&mut scratch).unwrap();
        stream.reset();

        let mut out = vec![0u8; 256];
        let mut n = stream.encode(&mut out, input, false).unwrap();
        n += stream.finish(&mut out[n..]).unwrap();
        out.truncate(n);
        assert_eq!(out, first);
    }

    #[test]
    fn test_level_is_clamped() {
        let stream = Stream::new(42, Format::Gzip);
        assert_eq!(stream.level(), 9);
    }
}
