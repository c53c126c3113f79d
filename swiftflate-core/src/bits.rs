//! Bounded LSB-first bit packing.
//!
//! DEFLATE packs variable-length codes least-significant-bit first within
//! each output byte. [`BitSink`] implements that packing over a
//! caller-owned `&mut [u8]`: it never allocates, tracks a cursor, and
//! refuses to write past the end of the slice.
//!
//! A sink holds at most 7 buffered bits at any point; a full byte is
//! shifted out to the buffer as soon as 8 bits accumulate. The buffered
//! remainder can be extracted with [`BitSink::pending`] and re-seeded into
//! a fresh sink with [`BitSink::with_pending`], which is how a streaming
//! encoder carries a partial byte across calls.
//!
//! # Example
//!
//! ```
//! use swiftflate_core::bits::BitSink;
//!
//! let mut buf = [0u8; 4];
//! let mut sink = BitSink::new(&mut buf);
//! sink.push(0b101, 3).unwrap();
//! sink.push(0b11001, 5).unwrap();
//! assert_eq!(sink.written(), 1);
//! assert_eq!(buf[0], 0xCD); // 11001_101
//! ```

use crate::error::{Result, SwiftflateError};

/// Maximum number of bits accepted by a single [`BitSink::push`].
///
/// Large enough for the widest unit the encoder emits in one call
/// (a 5-bit distance code followed by up to 13 extra bits).
pub const MAX_PUSH_BITS: u32 = 24;

/// An LSB-first bit packer over a caller-owned byte slice.
#[derive(Debug)]
pub struct BitSink<'a> {
    /// Destination buffer, owned by the caller.
    out: &'a mut [u8],
    /// Number of complete bytes written so far.
    pos: usize,
    /// Bit accumulator (LSB-first).
    acc: u32,
    /// Number of valid bits in the accumulator, always < 8 between pushes.
    nbits: u32,
}

impl<'a> BitSink<'a> {
    /// Create a sink with an empty accumulator.
    pub fn new(out: &'a mut [u8]) -> Self {
        Self::with_pending(out, 0, 0)
    }

    /// Create a sink seeded with up to 7 bits left over from a previous one.
    pub fn with_pending(out: &'a mut [u8], bits: u32, count: u32) -> Self {
        debug_assert!(count <= 7, "at most 7 bits may be carried over");
        Self {
            out,
            pos: 0,
            acc: bits & (1u32 << count).wrapping_sub(1),
            nbits: count,
        }
    }

    /// Number of complete bytes written into the buffer so far.
    pub fn written(&self) -> usize {
        self.pos
    }

    /// The buffered partial byte as `(bits, count)`, with `count` in `[0, 7]`.
    pub fn pending(&self) -> (u32, u32) {
        (self.acc, self.nbits)
    }

    /// Append `count` bits of `value`, LSB first.
    ///
    /// Bits of `value` above `count` are ignored. `count` must not exceed
    /// [`MAX_PUSH_BITS`].
    #[inline]
    pub fn push(&mut self, value: u32, count: u32) -> Result<()> {
        debug_assert!(count <= MAX_PUSH_BITS);

        let value = value & (1u32 << count).wrapping_sub(1);
        self.acc |= value << self.nbits;
        self.nbits += count;

        while self.nbits >= 8 {
            if self.pos == self.out.len() {
                return Err(SwiftflateError::buffer_too_small(
                    self.pos + 1,
                    self.out.len(),
                ));
            }
            self.out[self.pos] = (self.acc & 0xFF) as u8;
            self.pos += 1;
            self.acc >>= 8;
            self.nbits -= 8;
        }

        Ok(())
    }

    /// Zero-pad the accumulator to the next byte boundary.
    ///
    /// A no-op when already aligned.
    pub fn align(&mut self) -> Result<()> {
        if self.nbits > 0 {
            self.push(0, 8 - self.nbits)?;
        }
        Ok(())
    }

    /// Append whole bytes. The sink must be byte-aligned.
    pub fn put_bytes(&mut self, data: &[u8]) -> Result<()> {
        debug_assert_eq!(self.nbits, 0, "put_bytes requires byte alignment");

        let end = self.pos + data.len();
        if end > self.out.len() {
            return Err(SwiftflateError::buffer_too_small(end, self.out.len()));
        }
        self.out[self.pos..end].copy_from_slice(data);
        self.pos = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bits() {
        let mut buf = [0u8; 1];
        let mut sink = BitSink::new(&mut buf);
        // 0b10110101 written LSB first
        for bit in [1u32, 0, 1, 0, 1, 1, 0, 1] {
            sink.push(bit, 1).unwrap();
        }
        assert_eq!(sink.written(), 1);
        assert_eq!(sink.pending(), (0, 0));
        assert_eq!(buf[0], 0xB5);
    }

    #[test]
    fn test_multi_bit_groups() {
        let mut buf = [0u8; 2];
        let mut sink = BitSink::new(&mut buf);
        sink.push(0b101, 3).unwrap();
        sink.push(0b1111, 4).unwrap();
        sink.push(0b10, 2).unwrap();
        sink.push(0b110011, 6).unwrap();
        let (bits, count) = sink.pending(); // 15 bits total, 7 pending
        assert_eq!(sink.written(), 1);
        assert_eq!(count, 7);
        assert_eq!(buf[0] as u32 | (bits << 8), 0b110011_10_1111_101);
    }

    #[test]
    fn test_pending_roundtrip() {
        let mut buf1 = [0u8; 4];
        let mut sink = BitSink::new(&mut buf1);
        sink.push(0b11010, 5).unwrap();
        let (bits, count) = sink.pending();
        assert_eq!(sink.written(), 0);

        // Re-seed a second sink and complete the byte.
        let mut buf2 = [0u8; 4];
        let mut sink = BitSink::with_pending(&mut buf2, bits, count);
        sink.push(0b101, 3).unwrap();
        assert_eq!(sink.written(), 1);
        assert_eq!(buf2[0], 0b101_11010);
    }

    #[test]
    fn test_align_pads_with_zeros() {
        let mut buf = [0xFFu8; 2];
        let mut sink = BitSink::new(&mut buf);
        sink.push(0b111, 3).unwrap();
        sink.align().unwrap();
        assert_eq!(sink.written(), 1);
        assert_eq!(sink.pending(), (0, 0));
        assert_eq!(buf[0], 0b00000111);
    }

    #[test]
    fn test_put_bytes() {
        let mut buf = [0u8; 4];
        let mut sink = BitSink::new(&mut buf);
        sink.push(0b1, 1).unwrap();
        sink.align().unwrap();
        sink.put_bytes(&[0xAB, 0xCD]).unwrap();
        assert_eq!(sink.written(), 3);
        assert_eq!(&buf[..3], &[0x01, 0xAB, 0xCD]);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut buf = [0u8; 1];
        let mut sink = BitSink::new(&mut buf);
        sink.push(0xFF, 8).unwrap();
        let err = sink.push(0xFF, 8).unwrap_err();
        assert!(matches!(
            err,
            SwiftflateError::BufferTooSmall {
                needed: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn test_put_bytes_overflow() {
        let mut buf = [0u8; 2];
        let mut sink = BitSink::new(&mut buf);
        assert!(sink.put_bytes(&[1, 2, 3]).is_err());
    }
}
