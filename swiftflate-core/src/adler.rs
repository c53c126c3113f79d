//! Incremental Adler-32 (RFC 1950), as used by zlib framing.
//!
//! Adler-32 keeps two rolling sums modulo 65521 (the largest prime below
//! 2^16). The reduction is deferred for up to [`NMAX`] bytes at a time,
//! the largest run for which the 32-bit accumulators cannot overflow.
//!
//! Like the CRC engine, the update is resumable: chunk boundaries never
//! affect the final value.

/// Largest prime smaller than 65536.
const ADLER_MOD: u32 = 65521;

/// Largest number of bytes that can be summed before `b` must be reduced.
const NMAX: usize = 5552;

/// Incremental Adler-32 accumulator.
///
/// # Example
///
/// ```
/// use swiftflate_core::adler::Adler32;
///
/// let mut adler = Adler32::new();
/// adler.update(b"Hello");
/// assert_eq!(adler.finalize(), 0x058C01F5);
/// ```
#[derive(Debug, Clone)]
pub struct Adler32 {
    a: u32,
    b: u32,
}

impl Adler32 {
    /// Create a new accumulator (value 1 over empty input).
    pub fn new() -> Self {
        Self { a: 1, b: 0 }
    }

    /// Reset to the initial state.
    pub fn reset(&mut self) {
        self.a = 1;
        self.b = 0;
    }

    /// Fold more data into the checksum.
    pub fn update(&mut self, data: &[u8]) {
        let mut a = self.a;
        let mut b = self.b;
        let mut rest = data;

        while rest.len() >= NMAX {
            let (chunk, tail) = rest.split_at(NMAX);
            rest = tail;
            for &byte in chunk {
                a += byte as u32;
                b += a;
            }
            a %= ADLER_MOD;
            b %= ADLER_MOD;
        }

        for &byte in rest {
            a += byte as u32;
            b += a;
        }

        self.a = a % ADLER_MOD;
        self.b = b % ADLER_MOD;
    }

    /// The checksum over all data seen so far.
    ///
    /// Does not consume the accumulator; more data may still be fed.
    pub fn finalize(&self) -> u32 {
        (self.b << 16) | self.a
    }

    /// Compute the Adler-32 of `data` in one shot.
    pub fn checksum(data: &[u8]) -> u32 {
        let mut adler = Self::new();
        adler.update(data);
        adler.finalize()
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}
