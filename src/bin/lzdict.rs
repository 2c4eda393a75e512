use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use lzdict::bench::CSV_HEADER;
use lzdict::{build_codec, BenchJob, BenchRunner, CodecConfig, CodecKind, Error};
use memmap2::Mmap;

#[derive(Parser, Debug)]
#[command(name = "lzdict")]
#[command(about = "Compress and decompress files with LZ77, LZ78 or LZW")]
#[command(version)]
struct Args {
    /// Input file (use - for stdin); repeat for --bench
    #[arg(short, long, required = true)]
    input: Vec<PathBuf>,

    /// Output file (use - for stdout)
    #[arg(short, long, required_unless_present = "bench")]
    output: Option<PathBuf>,

    /// Codec to use (default: lz77; --bench runs all when omitted)
    #[arg(short, long, value_enum)]
    codec: Option<CodecKind>,

    /// Decompress instead of compress
    #[arg(short, long)]
    decompress: bool,

    /// LZ77 history window in bytes
    #[arg(long, default_value = "4096")]
    window_size: usize,

    /// LZ77 maximum match length
    #[arg(long, default_value = "258")]
    lookahead_size: usize,

    /// LZW dictionary size including the 256 single-byte entries
    #[arg(long, default_value = "4096")]
    max_table_size: u32,

    /// Measure every input with the selected codecs and print CSV to stdout
    #[arg(long)]
    bench: bool,

    /// Number of benchmark threads (0 = auto)
    #[arg(short = 't', long, default_value = "0")]
    threads: usize,

    /// Show verbose statistics
    #[arg(short, long)]
    verbose: bool,
}

/// Exit codes
const EXIT_OK: u8 = 0;
const EXIT_BAD_DATA: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_data_error() {
                ExitCode::from(EXIT_BAD_DATA)
            } else {
                ExitCode::from(EXIT_ERROR)
            }
        }
    }
}

fn run() -> Result<u8, Error> {
    let args = Args::parse();

    let config = CodecConfig {
        window_size: args.window_size,
        lookahead_size: args.lookahead_size,
        max_table_size: args.max_table_size,
    };
    config.validate()?;

    if args.bench {
        return run_bench_mode(&args, config);
    }

    if args.input.len() != 1 {
        return Err(Error::InvalidConfig("exactly one --input is required".to_string()));
    }
    let input_path = &args.input[0];
    let output_path = args
        .output
        .as_ref()
        .ok_or_else(|| Error::InvalidConfig("--output is required".to_string()))?;

    let kind = args.codec.unwrap_or(CodecKind::Lz77);
    let codec = build_codec(kind, &config)?;

    let input = read_input(input_path)?;
    let input_len = input.len();

    let start = std::time::Instant::now();
    let result = if args.decompress { codec.decompress(&input)? } else { codec.compress(&input) };
    let elapsed = start.elapsed();

    // Unmap before writing: the output may be the input file
    drop(input);
    write_output(output_path, &result)?;

    if args.verbose {
        let verb = if args.decompress { "Decompression" } else { "Compression" };
        eprintln!("{} complete ({}):", verb, kind);
        eprintln!("  Input bytes:      {}", input_len);
        eprintln!("  Output bytes:     {}", result.len());
        if !args.decompress && !result.is_empty() {
            eprintln!("  Ratio:            {:.3}", input_len as f64 / result.len() as f64);
        }
        eprintln!("  Time:             {:.2?}", elapsed);
        eprintln!(
            "  Throughput:       {:.1} MB/s",
            input_len as f64 / elapsed.as_secs_f64() / 1_000_000.0
        );
    }

    Ok(EXIT_OK)
}

fn run_bench_mode(args: &Args, config: CodecConfig) -> Result<u8, Error> {
    let codecs: Vec<CodecKind> = match args.codec {
        Some(kind) => vec![kind],
        None => CodecKind::ALL.to_vec(),
    };

    let labels: Vec<String> = args.input.iter().map(|p| p.display().to_string()).collect();
    let mut inputs = Vec::with_capacity(args.input.len());
    for path in &args.input {
        inputs.push(read_input(path)?);
    }

    let mut jobs = Vec::with_capacity(inputs.len() * codecs.len());
    for (label, data) in labels.iter().zip(&inputs) {
        for &codec in &codecs {
            jobs.push(BenchJob { label: label.as_str(), codec, data: &data[..] });
        }
    }

    if args.verbose {
        eprintln!(
            "Running {} measurements ({} inputs x {} codecs)",
            jobs.len(),
            inputs.len(),
            codecs.len()
        );
    }

    let runner = BenchRunner::new(config, args.threads);
    let start = std::time::Instant::now();
    let records = runner.run(&jobs)?;
    let elapsed = start.elapsed();

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", CSV_HEADER)?;

    let mut failures = 0;
    for record in &records {
        match &record.result {
            Ok(stats) => {
                writeln!(stdout, "{}", stats.csv_row(&record.label))?;
                if args.verbose {
                    eprintln!(
                        "  {} {}: ratio {:.3}, {:.1} MB/s",
                        record.label,
                        record.codec,
                        stats.ratio(),
                        stats.compress_throughput()
                    );
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error: {} with {}: {}", record.label, record.codec, e);
            }
        }
    }
    stdout.flush()?;

    if args.verbose {
        eprintln!("Benchmark complete:");
        eprintln!("  Measurements:     {}", records.len());
        eprintln!("  Failures:         {}", failures);
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    if failures > 0 {
        Ok(EXIT_BAD_DATA)
    } else {
        Ok(EXIT_OK)
    }
}

/// Input bytes, either memory-mapped from a file or buffered from stdin
enum InputData {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl Deref for InputData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputData::Mapped(map) => &map[..],
            InputData::Buffered(buf) => &buf[..],
        }
    }
}

fn read_input(path: &Path) -> Result<InputData, Error> {
    if path.to_str() == Some("-") {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(InputData::Buffered(buf));
    }

    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        // Zero-length files cannot be mapped on every platform
        return Ok(InputData::Buffered(Vec::new()));
    }

    // SAFETY: the mapping is read-only and is dropped before any output is
    // written, so this process never truncates a file it has mapped.
    let map = unsafe { Mmap::map(&file)? };
    Ok(InputData::Mapped(map))
}

fn write_output(path: &Path, data: &[u8]) -> Result<(), Error> {
    if path.to_str() == Some("-") {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()?;
    } else {
        let mut output = BufWriter::new(File::create(path)?);
        output.write_all(data)?;
        output.flush()?;
    }
    Ok(())
}
