//! szip - streaming gzip/zlib/deflate compressor
//!
//! Reads a file (or stdin), compresses it in a single pass, and writes
//! the result to stdout. Designed for pipe use, like gzip.

use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use swiftflate::{Format, Stream, encode_bound};

#[derive(Parser)]
#[command(name = "szip")]
#[command(author, version, about = "Single-pass streaming compressor (gzip/zlib/deflate)")]
#[command(long_about = "
szip compresses its input in one pass with bounded memory and writes the
result to stdout. With no file argument it reads from stdin.

Examples:
  szip file.txt > file.txt.gz
  szip -F zlib file.bin > file.bin.zz
  tar c dir | szip -l 1 > dir.tar.gz
  szip -t -v -n 10 big.bin     # benchmark without writing output
")]
struct Cli {
    /// Input file (stdin if omitted)
    file: Option<PathBuf>,

    /// Compression level: 0 disables matching, 9 compresses best
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=9))]
    level: u8,

    /// Output framing format
    #[arg(short = 'F', long, value_enum, default_value = "gzip")]
    format: CliFormat,

    /// Only use this many bytes from the input file
    #[arg(short, long)]
    bytes: Option<u64>,

    /// Loop this many times over the same input (for benchmarking)
    #[arg(short = 'n', long, default_value_t = 1)]
    loops: u32,

    /// Test mode: compress but do not emit anything
    #[arg(short, long)]
    test: bool,

    /// Force writing compressed data to a terminal
    #[arg(short, long)]
    force: bool,

    /// Print input/output totals and the checksum to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliFormat {
    /// Raw DEFLATE bitstream (RFC 1951)
    Raw,
    /// zlib wrapper (RFC 1950)
    Zlib,
    /// gzip wrapper (RFC 1952)
    Gzip,
}

impl From<CliFormat> for Format {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Raw => Format::Raw,
            CliFormat::Zlib => Format::Zlib,
            CliFormat::Gzip => Format::Gzip,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if io::stdout().is_terminal() && !cli.test && !cli.force {
        eprintln!("Refusing to write compressed data to a terminal; use -f to override.");
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Input block size per round. Larger levels spend more time per byte,
/// so they amortize over bigger reads.
fn block_size(level: u8) -> usize {
    let mut size = 32 * 1024;
    if level > 1 {
        size *= 4; // 128 kB
    }
    if level > 2 {
        size *= 8; // 1 MB
    }
    size
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let format = Format::from(cli.format);
    let block = block_size(cli.level);

    let mut totin: u64 = 0;
    let mut totout: u64 = 0;
    let mut checksum: u32 = 0;

    let mut inbuf = vec![0u8; block];
    let mut outbuf = vec![0u8; encode_bound(block) + encode_bound(0)];
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut stream = Stream::new(cli.level, format);
    for loop_idx in 0..cli.loops {
        let mut input = open_input(cli)?;
        let mut remaining = cli.bytes;
        if loop_idx > 0 {
            stream.reset();
        }

        loop {
            let want = match remaining {
                Some(left) => block.min(left as usize),
                None => block,
            };
            let n = read_block(&mut input, &mut inbuf[..want])?;
            if let Some(left) = remaining.as_mut() {
                *left -= n as u64;
            }
            totin += n as u64;
            let more = n == want && want > 0 && remaining != Some(0);

            let written = stream.encode(&mut outbuf, &inbuf[..n], more)?;
            totout += written as u64;
            if !cli.test {
                out.write_all(&outbuf[..written])?;
            }
            if !more {
                break;
            }
        }

        let written = stream.finish(&mut outbuf)?;
        totout += written as u64;
        checksum = stream.checksum();
        if !cli.test {
            out.write_all(&outbuf[..written])?;
        }
    }
    if !cli.test {
        out.flush()?;
    }

    if cli.verbose {
        let ratio = if totin > 0 {
            totout as f64 * 100.0 / totin as f64
        } else {
            0.0
        };
        eprintln!("totin={totin} totout={totout} ratio={ratio:.2}% checksum={checksum:08x}");
    }
    Ok(())
}

fn open_input(cli: &Cli) -> Result<Box<dyn Read>, Box<dyn std::error::Error>> {
    match &cli.file {
        Some(path) => Ok(Box::new(File::open(path)?)),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Read until `buf` is full or the input is exhausted. A short return
/// therefore means end of input.
fn read_block(input: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size_scales_with_level() {
        assert_eq!(block_size(0), 32 * 1024);
        assert_eq!(block_size(1), 32 * 1024);
        assert_eq!(block_size(2), 128 * 1024);
        assert_eq!(block_size(3), 1024 * 1024);
        assert_eq!(block_size(9), 1024 * 1024);
    }

    #[test]
    fn test_read_block_fills_from_short_reads() {
        struct OneByte<'a>(&'a [u8]);
        impl Read for OneByte<'_> {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.0.is_empty() || buf.is_empty() {
                    return Ok(0);
                }
                buf[0] = self.0[0];
                self.0 = &self.0[1..];
                Ok(1)
            }
        }

        let mut src = OneByte(b"hello");
        let mut buf = [0u8; 3];
        assert_eq!(read_block(&mut src, &mut buf).unwrap(), 3);
        assert_eq!(&buf, b"hel");
        let mut buf = [0u8; 8];
        assert_eq!(read_block(&mut src, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"lo");
    }
}
