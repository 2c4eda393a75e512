//! Compression measurements and a worker pool that runs them concurrently.
//!
//! Architecture of [`BenchRunner::run`]:
//! - Dispatcher thread: sends job indices into a bounded channel
//! - Worker pool: each worker builds its own codec and measures one job
//! - Main thread: collects results and restores submission order
//!
//! Every individual compress/decompress call stays single-threaded.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::error::{Error, Result};
use crate::{build_codec, Codec, CodecConfig, CodecKind};

/// Column names matching [`CodecStats::csv_row`]
pub const CSV_HEADER: &str =
    "file,codec,original_size,compressed_size,ratio,compress_us,decompress_us";

/// Statistics from one compress + decompress cycle
#[derive(Clone, Debug)]
pub struct CodecStats {
    pub codec: CodecKind,
    pub original_size: usize,
    pub compressed_size: usize,
    pub compress_time: Duration,
    pub decompress_time: Duration,
}

impl CodecStats {
    /// Original size divided by compressed size (1.0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 1.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    /// Compression throughput in MB/s of input
    pub fn compress_throughput(&self) -> f64 {
        let secs = self.compress_time.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.original_size as f64 / secs / 1_000_000.0
    }

    /// One CSV line, see [`CSV_HEADER`]
    pub fn csv_row(&self, label: &str) -> String {
        format!(
            "{},{},{},{},{:.4},{},{}",
            label,
            self.codec,
            self.original_size,
            self.compressed_size,
            self.ratio(),
            self.compress_time.as_micros(),
            self.decompress_time.as_micros()
        )
    }
}

/// Compress and decompress `input`, verifying exact reconstruction
pub fn measure(codec: &dyn Codec, input: &[u8]) -> Result<CodecStats> {
    let start = Instant::now();
    let compressed = codec.compress(input);
    let compress_time = start.elapsed();

    let start = Instant::now();
    let restored = codec.decompress(&compressed)?;
    let decompress_time = start.elapsed();

    if restored != input {
        return Err(Error::RoundTripMismatch {
            codec: codec.kind().name(),
            expected: input.len(),
            found: restored.len(),
        });
    }

    Ok(CodecStats {
        codec: codec.kind(),
        original_size: input.len(),
        compressed_size: compressed.len(),
        compress_time,
        decompress_time,
    })
}

/// One input to measure with one codec
#[derive(Clone, Copy, Debug)]
pub struct BenchJob<'a> {
    /// Name reported in output (typically the file path)
    pub label: &'a str,
    pub codec: CodecKind,
    pub data: &'a [u8],
}

/// Outcome of a [`BenchJob`]
#[derive(Debug)]
pub struct BenchRecord {
    pub label: String,
    pub codec: CodecKind,
    pub result: Result<CodecStats>,
}

/// Runs benchmark jobs on a pool of worker threads
pub struct BenchRunner {
    config: CodecConfig,
    /// Number of worker threads (0 = auto)
    num_threads: usize,
}

impl BenchRunner {
    pub fn new(config: CodecConfig, num_threads: usize) -> Self {
        Self { config, num_threads }
    }

    fn effective_threads(&self) -> usize {
        match self.num_threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        }
    }

    /// Measure every job; records come back in submission order
    pub fn run(&self, jobs: &[BenchJob<'_>]) -> Result<Vec<BenchRecord>> {
        self.config.validate()?;

        let num_threads = self.effective_threads().min(jobs.len().max(1));
        if num_threads == 1 {
            return Ok(jobs.iter().map(|job| record(job, run_job(&self.config, job))).collect());
        }

        let channel_capacity = num_threads * 4;
        let (job_tx, job_rx): (Sender<usize>, Receiver<usize>) = bounded(channel_capacity);
        let (result_tx, result_rx): (
            Sender<(usize, Result<CodecStats>)>,
            Receiver<(usize, Result<CodecStats>)>,
        ) = bounded(channel_capacity);

        let config = &self.config;

        let result = crossbeam::scope(|scope| {
            for _ in 0..num_threads {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();

                scope.spawn(move |_| {
                    for id in job_rx.iter() {
                        let outcome = run_job(config, &jobs[id]);
                        if result_tx.send((id, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }

            // Drop our copies of the channels that workers use
            drop(job_rx);
            drop(result_tx);

            scope.spawn(move |_| {
                for id in 0..jobs.len() {
                    if job_tx.send(id).is_err() {
                        break;
                    }
                }
            });

            let mut pending: BTreeMap<usize, Result<CodecStats>> = BTreeMap::new();
            for (id, outcome) in result_rx.iter() {
                pending.insert(id, outcome);
            }
            pending
        });

        let mut pending =
            result.map_err(|_| Error::Internal("Benchmark worker panicked".to_string()))?;

        jobs.iter()
            .enumerate()
            .map(|(id, job)| {
                let outcome = pending.remove(&id).ok_or_else(|| {
                    Error::Internal(format!("No result for benchmark job {}", id))
                })?;
                Ok(record(job, outcome))
            })
            .collect()
    }
}

fn run_job(config: &CodecConfig, job: &BenchJob<'_>) -> Result<CodecStats> {
    let codec = build_codec(job.codec, config)?;
    measure(codec.as_ref(), job.data)
}

fn record(job: &BenchJob<'_>, result: Result<CodecStats>) -> BenchRecord {
    BenchRecord { label: job.label.to_string(), codec: job.codec, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lz78Codec;

    /// Decompresses to the wrong bytes
    struct Broken;

    impl Codec for Broken {
        fn kind(&self) -> CodecKind {
            CodecKind::Lz78
        }

        fn compress(&self, input: &[u8]) -> Vec<u8> {
            input.to_vec()
        }

        fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
            Ok(data[1..].to_vec())
        }
    }

    #[test]
    fn test_measure_sizes() {
        let input = b"ABABABAB".repeat(64);
        let stats = measure(&Lz78Codec, &input).unwrap();
        assert_eq!(stats.codec, CodecKind::Lz78);
        assert_eq!(stats.original_size, input.len());
        assert_eq!(stats.compressed_size, Lz78Codec.compress(&input).len());
        assert!(stats.ratio() > 1.0);
    }

    #[test]
    fn test_measure_detects_mismatch() {
        let err = measure(&Broken, b"abc").unwrap_err();
        assert!(matches!(err, Error::RoundTripMismatch { expected: 3, found: 2, .. }));
    }

    #[test]
    fn test_empty_ratio() {
        let stats = measure(&Lz78Codec, b"").unwrap();
        assert_eq!(stats.ratio(), 1.0);
        assert!(stats.csv_row("empty").starts_with("empty,lz78,0,0,1.0000,"));
    }

    #[test]
    fn test_compress_throughput() {
        let stats = CodecStats {
            codec: CodecKind::Lzw,
            original_size: 4_000_000,
            compressed_size: 1_000_000,
            compress_time: Duration::from_millis(500),
            decompress_time: Duration::from_millis(100),
        };
        assert!((stats.compress_throughput() - 8.0).abs() < 1e-9);

        let instant = CodecStats { compress_time: Duration::ZERO, ..stats };
        assert_eq!(instant.compress_throughput(), 0.0);
    }

    #[test]
    fn test_runner_preserves_order() {
        let inputs: Vec<Vec<u8>> = (0..12usize)
            .map(|i| (0..500 + i * 37).map(|j| (j % (i + 2)) as u8).collect())
            .collect();
        let labels: Vec<String> = (0..inputs.len()).map(|i| format!("input{}", i)).collect();

        let mut jobs = Vec::new();
        for (label, data) in labels.iter().zip(&inputs) {
            for codec in CodecKind::ALL {
                jobs.push(BenchJob { label: label.as_str(), codec, data: data.as_slice() });
            }
        }

        for threads in [1, 4] {
            let runner = BenchRunner::new(CodecConfig::default(), threads);
            let records = runner.run(&jobs).unwrap();
            assert_eq!(records.len(), jobs.len());
            for (job, record) in jobs.iter().zip(&records) {
                assert_eq!(record.label, job.label);
                assert_eq!(record.codec, job.codec);
                let stats = record.result.as_ref().unwrap();
                assert_eq!(stats.original_size, job.data.len());
            }
        }
    }

    #[test]
    fn test_runner_rejects_bad_config() {
        let config = CodecConfig { window_size: 0, ..Default::default() };
        let runner = BenchRunner::new(config, 2);
        assert!(matches!(runner.run(&[]), Err(Error::InvalidConfig(_))));
    }
}
