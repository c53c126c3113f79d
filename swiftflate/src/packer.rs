//! Fixed-Huffman block framing and token packing.
//!
//! This encoder only ever emits two of DEFLATE's block types: fixed
//! Huffman blocks (BTYPE=01) for compressed payload and stored blocks
//! (BTYPE=00) when compression is disabled. Dynamic code tables are
//! deliberately not supported; the small ratio loss buys a simpler and
//! faster encoder.
//!
//! All bit groups go through [`BitSink`] LSB-first, per RFC 1951.

use crate::tables::{FIXED_DIST, FIXED_LITLEN, distance_symbol, length_symbol};
use crate::token::Token;
use swiftflate_core::bits::BitSink;
use swiftflate_core::error::Result;

/// Largest payload of one stored block (16-bit LEN field).
const MAX_STORED_BLOCK: usize = 65535;

/// End-of-block symbol.
const EOB: usize = 256;

/// Write a fixed-Huffman block header: BFINAL plus BTYPE=01.
pub fn open_fixed_block(sink: &mut BitSink<'_>, last: bool) -> Result<()> {
    sink.push(last as u32, 1)?;
    sink.push(0b01, 2)
}

/// Pack one token with the fixed code tables.
#[inline]
pub fn write_token(sink: &mut BitSink<'_>, token: Token) -> Result<()> {
    match token {
        Token::Literal(byte) => {
            let (code, bits) = FIXED_LITLEN[byte as usize];
            sink.push(code as u32, bits as u32)
        }
        Token::Copy { len, dist } => {
            let (sym, extra_bits, extra) = length_symbol(len);
            let (code, bits) = FIXED_LITLEN[sym as usize];
            sink.push(code as u32, bits as u32)?;
            if extra_bits > 0 {
                sink.push(extra, extra_bits)?;
            }

            let (dsym, dextra_bits, dextra) = distance_symbol(dist);
            let (dcode, dbits) = FIXED_DIST[dsym as usize];
            sink.push(dcode as u32, dbits as u32)?;
            if dextra_bits > 0 {
                sink.push(dextra, dextra_bits)?;
            }
            Ok(())
        }
    }
}

/// Close the current fixed block with the end-of-block symbol.
pub fn end_block(sink: &mut BitSink<'_>) -> Result<()> {
    let (code, bits) = FIXED_LITLEN[EOB];
    sink.push(code as u32, bits as u32)
}

/// Write `data` as one or more stored blocks (BTYPE=00).
///
/// Stored blocks are byte-aligned: the 3 header bits are zero-padded to a
/// boundary, then LEN/NLEN and the raw payload follow. With empty `data`
/// and `last` set, this emits the canonical empty final stored block.
pub fn write_stored(sink: &mut BitSink<'_>, data: &[u8], last: bool) -> Result<()> {
    let mut rest = data;
    loop {
        let take = rest.len().min(MAX_STORED_BLOCK);
        let (chunk, tail) = rest.split_at(take);
        let final_block = last && tail.is_empty();

        sink.push(final_block as u32, 1)?;
        sink.push(0b00, 2)?;
        sink.align()?;

        let len = chunk.len() as u16;
        sink.push(len as u32, 16)?;
        sink.push(!len as u32, 16)?;
        sink.put_bytes(chunk)?;

        rest = tail;
        if rest.is_empty() {
            break;
        }
    }
    Ok(())
}
