//! Fixed Huffman code tables for DEFLATE (RFC 1951).
//!
//! Everything in this module is evaluated at compile time, so the encoder
//! has no process-wide table initialization step and all `Stream`
//! instances share the same read-only data.
//!
//! The fixed literal/length and distance codes are stored already
//! bit-reversed, ready for LSB-first emission. Length and distance values
//! map to their code symbols through small lookup tables rather than
//! comparison ladders.

/// Length code base values for symbols 257-285 (RFC 1951 Section 3.2.5).
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, // 257-264: 0 extra bits
    11, 13, 15, 17, // 265-268: 1 extra bit
    19, 23, 27, 31, // 269-272: 2 extra bits
    35, 43, 51, 59, // 273-276: 3 extra bits
    67, 83, 99, 115, // 277-280: 4 extra bits
    131, 163, 195, 227, // 281-284: 5 extra bits
    258, // 285: 0 extra bits (special case)
];

/// Number of extra bits for length symbols 257-285.
pub const LENGTH_EXTRA: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, // 257-264
    1, 1, 1, 1, // 265-268
    2, 2, 2, 2, // 269-272
    3, 3, 3, 3, // 273-276
    4, 4, 4, 4, // 277-280
    5, 5, 5, 5, // 281-284
    0, // 285
];

/// Distance code base values for symbols 0-29 (RFC 1951 Section 3.2.5).
pub const DIST_BASE: [u16; 30] = [
    1, 2, 3, 4, // 0-3: 0 extra bits
    5, 7, // 4-5: 1 extra bit
    9, 13, // 6-7: 2 extra bits
    17, 25, // 8-9: 3 extra bits
    33, 49, // 10-11: 4 extra bits
    65, 97, // 12-13: 5 extra bits
    129, 193, // 14-15: 6 extra bits
    257, 385, // 16-17: 7 extra bits
    513, 769, // 18-19: 8 extra bits
    1025, 1537, // 20-21: 9 extra bits
    2049, 3073, // 22-23: 10 extra bits
    4097, 6145, // 24-25: 11 extra bits
    8193, 12289, // 26-27: 12 extra bits
    16385, 24577, // 28-29: 13 extra bits
];

/// Number of extra bits for distance symbols 0-29.
pub const DIST_EXTRA: [u8; 30] = [
    0, 0, 0, 0, // 0-3
    1, 1, // 4-5
    2, 2, // 6-7
    3, 3, // 8-9
    4, 4, // 10-11
    5, 5, // 12-13
    6, 6, // 14-15
    7, 7, // 16-17
    8, 8, // 18-19
    9, 9, // 20-21
    10, 10, // 22-23
    11, 11, // 24-25
    12, 12, // 26-27
    13, 13, // 28-29
];

/// Maps `length - 3` to its length slot (0-28, i.e. symbol - 257).
const LENGTH_SLOT: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut slot = 0usize;
    // Slots 0-27 cover lengths 3-257 contiguously.
    while slot < 28 {
        let start = LENGTH_BASE[slot] as usize - 3;
        let span = 1usize << LENGTH_EXTRA[slot];
        let mut i = 0;
        while i < span {
            table[start + i] = slot as u8;
            i += 1;
        }
        slot += 1;
    }
    // Length 258 has its own zero-extra slot.
    table[255] = 28;
    table
};

/// Maps distances to their distance slot (0-29).
///
/// Distances 1-256 index the low half directly by `distance - 1`;
/// larger distances index the high half by `(distance - 1) >> 7`.
const DIST_SLOT: [u8; 512] = {
    let mut table = [0u8; 512];
    let mut slot = 0usize;
    while slot < 16 {
        let start = DIST_BASE[slot] as usize - 1;
        let span = 1usize << DIST_EXTRA[slot];
        let mut i = 0;
        while i < span {
            table[start + i] = slot as u8;
            i += 1;
        }
        slot += 1;
    }
    while slot < 30 {
        let start = (DIST_BASE[slot] as usize - 1) >> 7;
        let end = if slot == 29 {
            256
        } else {
            (DIST_BASE[slot + 1] as usize - 1) >> 7
        };
        let mut i = start;
        while i < end {
            table[256 + i] = slot as u8;
            i += 1;
        }
        slot += 1;
    }
    table
};

/// Reverse the low `len` bits of `code` (canonical Huffman codes are
/// defined MSB-first; DEFLATE emits them LSB-first).
const fn reverse_bits(mut code: u16, len: u8) -> u16 {
    let mut out = 0u16;
    let mut i = 0;
    while i < len {
        out = (out << 1) | (code & 1);
        code >>= 1;
        i += 1;
    }
    out
}

/// Fixed literal/length codes as `(code, bits)`, bit-reversed for
/// LSB-first emission (RFC 1951 Section 3.2.6).
///
/// - Symbols 0-143: 8 bits
/// - Symbols 144-255: 9 bits
/// - Symbols 256-279: 7 bits
/// - Symbols 280-287: 8 bits
pub const FIXED_LITLEN: [(u16, u8); 288] = {
    let mut lengths = [0u8; 288];
    let mut i = 0;
    while i < 288 {
        lengths[i] = if i < 144 {
            8
        } else if i < 256 {
            9
        } else if i < 280 {
            7
        } else {
            8
        };
        i += 1;
    }

    // Canonical code assignment (RFC 1951 Section 3.2.2).
    let mut bl_count = [0u16; 10];
    let mut i = 0;
    while i < 288 {
        bl_count[lengths[i] as usize] += 1;
        i += 1;
    }
    let mut next_code = [0u16; 10];
    let mut code = 0u16;
    let mut bits = 1;
    while bits < 10 {
        code = (code + bl_count[bits - 1]) << 1;
        next_code[bits] = code;
        bits += 1;
    }

    let mut codes = [(0u16, 0u8); 288];
    let mut sym = 0;
    while sym < 288 {
        let len = lengths[sym];
        codes[sym] = (reverse_bits(next_code[len as usize], len), len);
        next_code[len as usize] += 1;
        sym += 1;
    }
    codes
};

/// Fixed distance codes as `(code, bits)`, bit-reversed: all 30 symbols
/// are plain 5-bit values (RFC 1951 Section 3.2.6).
pub const FIXED_DIST: [(u16, u8); 30] = {
    let mut codes = [(0u16, 0u8); 30];
    let mut sym = 0;
    while sym < 30 {
        codes[sym] = (reverse_bits(sym as u16, 5), 5);
        sym += 1;
    }
    codes
};

/// Map a match length (3-258) to `(symbol, extra_bits, extra_value)`.
#[inline]
pub fn length_symbol(length: u16) -> (u16, u32, u32) {
    debug_assert!((3..=258).contains(&length), "length out of range: {length}");
    let slot = LENGTH_SLOT[(length - 3) as usize] as usize;
    (
        257 + slot as u16,
        LENGTH_EXTRA[slot] as u32,
        (length - LENGTH_BASE[slot]) as u32,
    )
}

/// Map a match distance (1-32768) to `(symbol, extra_bits, extra_value)`.
#[inline]
pub fn distance_symbol(distance: u16) -> (u16, u32, u32) {
    debug_assert!(distance >= 1, "distance out of range: {distance}");
    let slot = if distance <= 256 {
        DIST_SLOT[(distance - 1) as usize]
    } else {
        DIST_SLOT[256 + ((distance as usize - 1) >> 7)]
    } as usize;
    (
        slot as u16,
        DIST_EXTRA[slot] as u32,
        (distance - DIST_BASE[slot]) as u32,
    )
}
