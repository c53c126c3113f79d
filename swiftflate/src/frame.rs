//! Format framing: gzip/zlib/raw headers and trailers.
//!
//! The framing around the DEFLATE payload is the only difference between
//! the three output formats:
//!
//! | Format | Header                      | Trailer                      |
//! |--------|-----------------------------|------------------------------|
//! | raw    | none                        | none                         |
//! | zlib   | 2 bytes CMF/FLG             | Adler-32, big-endian         |
//! | gzip   | 10 bytes magic/flags/OS     | CRC-32 + length, little-endian |

use swiftflate_core::bits::BitSink;
use swiftflate_core::error::Result;

/// gzip magic bytes (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Compression method: DEFLATE.
const CM_DEFLATE: u8 = 8;

/// gzip XFL: maximum compression effort was used.
const XFL_SLOWEST: u8 = 2;

/// gzip XFL: fastest algorithm was used.
const XFL_FASTEST: u8 = 4;

/// gzip OS identifier: unknown.
const OS_UNKNOWN: u8 = 255;

/// Output framing format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Raw DEFLATE bitstream (RFC 1951), no framing bytes at all.
    Raw,
    /// zlib wrapper (RFC 1950): 2-byte header, Adler-32 trailer.
    Zlib,
    /// gzip wrapper (RFC 1952): 10-byte header, CRC-32 + length trailer.
    #[default]
    Gzip,
}

/// Write the format header. The sink must be byte-aligned (headers are
/// only ever emitted before any payload bits).
pub fn write_header(sink: &mut BitSink<'_>, format: Format, level: u8) -> Result<()> {
    match format {
        Format::Raw => Ok(()),
        Format::Gzip => {
            let xfl = if level >= 7 { XFL_SLOWEST } else { XFL_FASTEST };
            // magic, CM, FLG=0, MTIME=0, XFL, OS
            sink.put_bytes(&[
                GZIP_MAGIC[0],
                GZIP_MAGIC[1],
                CM_DEFLATE,
                0,
                0,
                0,
                0,
                0,
                xfl,
                OS_UNKNOWN,
            ])
        }
        Format::Zlib => {
            // CMF: CM=8 (DEFLATE), CINFO=7 (32 KiB window).
            let cmf: u8 = 0x78;
            // FLG carries a level hint and check bits so that
            // (CMF * 256 + FLG) is a multiple of 31. FDICT is never set.
            let flevel: u8 = match level {
                0..=2 => 0,
                3..=5 => 1,
                6 => 2,
                _ => 3,
            };
            let base = u16::from(cmf) * 256 + u16::from(flevel << 6);
            let fcheck = ((31 - base % 31) % 31) as u8;
            sink.put_bytes(&[cmf, (flevel << 6) | fcheck])
        }
    }
}

/// Write the format trailer. The sink must already be byte-aligned.
pub fn write_trailer(
    sink: &mut BitSink<'_>,
    format: Format,
    checksum: u32,
    total_in: u64,
) -> Result<()> {
    match format {
        Format::Raw => Ok(()),
        Format::Gzip => {
            sink.put_bytes(&checksum.to_le_bytes())?;
            sink.put_bytes(&(total_in as u32).to_le_bytes())
        }
        Format::Zlib => sink.put_bytes(&checksum.to_be_bytes()),
    }
}
