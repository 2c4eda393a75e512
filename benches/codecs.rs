//! Benchmarks for lzdict codec throughput.
//!
//! Tests each codec across data patterns and sizes, with DEFLATE (flate2) as
//! a reference point.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use lzdict::{build_codec, BenchJob, BenchRunner, Codec, CodecConfig, CodecKind, Lz77Codec};
use std::io::Write;

/// Generate random (incompressible) data
fn generate_random_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut data = Vec::with_capacity(size);
    let mut hasher = DefaultHasher::new();

    for i in 0..size {
        i.hash(&mut hasher);
        data.push((hasher.finish() & 0xFF) as u8);
    }
    data
}

/// Generate repetitive (highly compressible) data
fn generate_repetitive_data(size: usize) -> Vec<u8> {
    let pattern = b"ABCDABCDABCDABCD";
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        let remaining = size - data.len();
        let chunk_size = remaining.min(pattern.len());
        data.extend_from_slice(&pattern[..chunk_size]);
    }
    data
}

/// Generate sensor-log-like text: timestamped readings with small variation
fn generate_log_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut i = 0u64;
    while data.len() < size {
        let line = format!(
            "ts={} voltage={} current={} temp={}\n",
            1_700_000_000 + i * 60,
            3300 + (i * 7) % 13,
            120 + (i * 3) % 5,
            21 + i % 3
        );
        data.extend_from_slice(line.as_bytes());
        i += 1;
    }
    data.truncate(size);
    data
}

fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for size in [1024, 64 * 1024, 256 * 1024].iter() {
        let data = generate_log_data(*size);
        group.throughput(Throughput::Bytes(*size as u64));

        for kind in CodecKind::ALL {
            let codec = build_codec(kind, &CodecConfig::default()).unwrap();
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &data, |b, data| {
                b.iter(|| codec.compress(data));
            });
        }

        group.bench_with_input(BenchmarkId::new("deflate", size), &data, |b, data| {
            b.iter(|| deflate(data));
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let size = 256 * 1024;
    let data = generate_log_data(size);

    group.throughput(Throughput::Bytes(size as u64));

    for kind in CodecKind::ALL {
        let codec = build_codec(kind, &CodecConfig::default()).unwrap();
        let compressed = codec.compress(&data);
        group.bench_with_input(BenchmarkId::new(kind.name(), size), &compressed, |b, compressed| {
            b.iter(|| codec.decompress(compressed).unwrap());
        });
    }

    group.finish();
}

fn bench_data_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_patterns");
    let size = 256 * 1024; // 256KB

    let patterns = [
        ("random", generate_random_data(size)),
        ("repetitive", generate_repetitive_data(size)),
        ("log", generate_log_data(size)),
    ];

    group.throughput(Throughput::Bytes(size as u64));

    for (name, data) in &patterns {
        for kind in CodecKind::ALL {
            let codec = build_codec(kind, &CodecConfig::default()).unwrap();
            group.bench_with_input(BenchmarkId::new(kind.name(), name), data, |b, data| {
                b.iter(|| codec.compress(data));
            });
        }
    }

    group.finish();
}

fn bench_lz77_window_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lz77_window");
    let size = 256 * 1024;
    let data = generate_log_data(size);

    group.throughput(Throughput::Bytes(size as u64));

    for window in [256, 4096, 32 * 1024].iter() {
        let codec = Lz77Codec::new(*window, 258).unwrap();
        group.bench_with_input(BenchmarkId::new("window", window), &data, |b, data| {
            b.iter(|| codec.compress(data));
        });
    }

    group.finish();
}

fn bench_runner_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("bench_runner");

    let inputs: Vec<Vec<u8>> = (0..8).map(|i| generate_log_data(64 * 1024 + i * 1024)).collect();
    let labels: Vec<String> = (0..inputs.len()).map(|i| format!("input{}", i)).collect();
    let mut jobs = Vec::new();
    for (label, data) in labels.iter().zip(&inputs) {
        for codec in CodecKind::ALL {
            jobs.push(BenchJob { label: label.as_str(), codec, data: data.as_slice() });
        }
    }

    for threads in [1, 2, 4].iter() {
        group.bench_with_input(BenchmarkId::new("threads", threads), &jobs, |b, jobs| {
            let runner = BenchRunner::new(CodecConfig::default(), *threads);
            b.iter(|| runner.run(jobs).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compress,
    bench_decompress,
    bench_data_patterns,
    bench_lz77_window_sizes,
    bench_runner_threads,
);
criterion_main!(benches);
