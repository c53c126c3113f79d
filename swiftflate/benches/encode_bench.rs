//! Benchmarks for streaming encoder throughput.

use swiftflate::{Format, Stream, encode_bound};

fn main() {
    let test_cases = vec![
        ("small_random", generate_random(1024)),
        ("medium_random", generate_random(64 * 1024)),
        ("large_random", generate_random(256 * 1024)),
        ("small_repeated", generate_repeated(1024)),
        ("medium_repeated", generate_repeated(64 * 1024)),
        ("large_repeated", generate_repeated(256 * 1024)),
        ("small_text", generate_text_like(1024)),
        ("medium_text", generate_text_like(64 * 1024)),
        ("large_text", generate_text_like(256 * 1024)),
    ];

    println!("Streaming Encoder Benchmarks (gzip framing)");
    println!("===========================================\n");

    for (name, data) in &test_cases {
        println!("Test: {} ({} bytes)", name, data.len());

        for level in [0, 1, 5, 9] {
            let mut out = vec![0u8; encode_bound(data.len()) + encode_bound(0)];
            let mut stream = Stream::new(level, Format::Gzip);

            let start = std::time::Instant::now();
            let mut written = stream.encode(&mut out, data, false).unwrap();
            written += stream.finish(&mut out[written..]).unwrap();
            let elapsed = start.elapsed();

            let throughput = data.len() as f64 / elapsed.as_secs_f64() / 1024.0 / 1024.0;
            let ratio = data.len() as f64 / written as f64;

            println!(
                "  Level {}: {:6.2} MB/s, {:7} -> {:7} bytes, {:.2}x ratio, {:7.2} µs",
                level,
                throughput,
                data.len(),
                written,
                ratio,
                elapsed.as_micros()
            );

            // Sanity check
            assert!(written <= out.len());
        }
        println!();
    }

    println!("Chunked streaming (64 KiB chunks, level 6)");
    println!("==========================================\n");

    let data = generate_text_like(4 * 1024 * 1024);
    let chunk_size = 64 * 1024;
    let mut out = vec![0u8; encode_bound(chunk_size)];
    let mut total_out = 0usize;
    let mut stream = Stream::new(6, Format::Gzip);

    let start = std::time::Instant::now();
    for chunk in data.chunks(chunk_size) {
        total_out += stream.encode(&mut out, chunk, true).unwrap();
    }
    total_out += stream.finish(&mut out).unwrap();
    let elapsed = start.elapsed();

    let throughput = data.len() as f64 / elapsed.as_secs_f64() / 1024.0 / 1024.0;
    println!(
        "  {:6.2} MB/s, {} -> {} bytes, {:.2}x ratio",
        throughput,
        data.len(),
        total_out,
        data.len() as f64 / total_out as f64
    );
}

fn generate_random(size: usize) -> Vec<u8> {
    // Simple LCG random number generator
    let mut data = Vec::with_capacity(size);
    let mut seed = 12345u32;
    for _ in 0..size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((seed >> 16) as u8);
    }
    data
}

fn generate_repeated(size: usize) -> Vec<u8> {
    let pattern = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        data.extend_from_slice(pattern);
    }
    data.truncate(size);
    data
}

fn generate_text_like(size: usize) -> Vec<u8> {
    // Simulates English text with word-like patterns
    let words: &[&[u8]] = &[
        b"the", b"quick", b"brown", b"fox", b"jumps", b"over", b"lazy", b"dog", b"and", b"runs",
        b"through", b"forest", b"near", b"river", b"under", b"blue", b"sky", b"with", b"wind",
        b"blowing",
    ];
    let mut data = Vec::with_capacity(size);
    let mut seed = 42u32;

    while data.len() < size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        let word_idx = (seed as usize) % words.len();
        data.extend_from_slice(words[word_idx]);
        data.push(b' ');
    }
    data.truncate(size);
    data
}
