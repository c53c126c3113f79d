//! Incremental CRC-32 (ISO 3309), as used by gzip framing (RFC 1952).
//!
//! - Polynomial: 0x04C11DB7 (reflected: 0xEDB88320)
//! - Initial value: 0xFFFFFFFF
//! - Final XOR: 0xFFFFFFFF
//! - Reflected input and output
//!
//! The lookup tables are evaluated at compile time, so no runtime setup is
//! required before first use. Data of 8 bytes or more goes through a
//! slicing-by-4 path that folds 4 input bytes per table round; shorter
//! data uses the plain byte-at-a-time loop.
//!
//! The update is resumable: feeding data in any chunking produces the same
//! final value as one contiguous update.

/// CRC-32 slicing-by-4 lookup tables (polynomial 0xEDB88320, reflected).
///
/// Table 0 is the standard byte-at-a-time CRC-32 table; table `t` maps a
/// byte to its CRC contribution `t` positions further along.
const CRC32_TABLES: [[u32; 256]; 4] = {
    let mut tables = [[0u32; 256]; 4];

    let mut i = 0usize;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB88320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        tables[0][i] = crc;
        i += 1;
    }

    let mut t = 1;
    while t < 4 {
        let mut i = 0usize;
        while i < 256 {
            let prev = tables[t - 1][i];
            tables[t][i] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
            i += 1;
        }
        t += 1;
    }

    tables
};

/// Incremental CRC-32 accumulator.
///
/// # Example
///
/// ```
/// use swiftflate_core::crc::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"Hello, World!");
/// assert_eq!(crc.finalize(), 0xEC4AC3D0);
/// ```
#[derive(Debug, Clone)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Create a new accumulator in its seed state.
    pub fn new() -> Self {
        Self { state: 0xFFFFFFFF }
    }

    /// Reset to the seed state.
    pub fn reset(&mut self) {
        self.state = 0xFFFFFFFF;
    }

    /// Fold more data into the checksum.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        let mut crc = self.state;
        let mut rest = data;

        if rest.len() >= 8 {
            while rest.len() >= 4 {
                let word = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
                crc ^= word;
                crc = CRC32_TABLES[3][(crc & 0xFF) as usize]
                    ^ CRC32_TABLES[2][((crc >> 8) & 0xFF) as usize]
                    ^ CRC32_TABLES[1][((crc >> 16) & 0xFF) as usize]
                    ^ CRC32_TABLES[0][(crc >> 24) as usize];
                rest = &rest[4..];
            }
        }

        for &byte in rest {
            crc = CRC32_TABLES[0][((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
        }

        self.state = crc;
    }

    /// The checksum over all data seen so far (complemented per RFC 1952).
    ///
    /// Does not consume the accumulator; more data may still be fed.
    pub fn finalize(&self) -> u32 {
        !self.state
    }

    /// Compute the CRC-32 of `data` in one shot.
    pub fn checksum(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(Crc32::checksum(&[]), 0);
    }

    #[test]
    fn test_check_value() {
        // The standard CRC-32 check value.
        assert_eq!(Crc32::checksum(b"123456789"), 0xCBF43926);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(Crc32::checksum(b"Hello, World!"), 0xEC4AC3D0);
        assert_eq!(Crc32::checksum(b"a"), 0xE8B7BE43);
    }

    #[test]
    fn test_chunking_invariance() {
        let data: Vec<u8> = (0..4096).map(|i| (i * 31 % 251) as u8).collect();
        let one_shot = Crc32::checksum(&data);

        // Byte-at-a-time
        let mut crc = Crc32::new();
        for byte in &data {
            crc.update(std::slice::from_ref(byte));
        }
        assert_eq!(crc.finalize(), one_shot);

        // Uneven splits, including sizes below and above the slicing cutoff
        let mut crc = Crc32::new();
        let mut rest = &data[..];
        let mut step = 1;
        while !rest.is_empty() {
            let n = step.min(rest.len());
            crc.update(&rest[..n]);
            rest = &rest[n..];
            step = step * 2 + 1;
        }
        assert_eq!(crc.finalize(), one_shot);
    }

    #[test]
    fn test_reset() {
        let mut crc = Crc32::new();
        crc.update(b"garbage");
        crc.reset();
        crc.update(b"123456789");
        assert_eq!(crc.finalize(), 0xCBF43926);
    }

    #[test]
    fn test_finalize_is_non_destructive() {
        let mut crc = Crc32::new();
        crc.update(b"1234");
        let _ = crc.finalize();
        crc.update(b"56789");
        assert_eq!(crc.finalize(), 0xCBF43926);
    }
}
