pub mod bench;
pub mod bits;
pub mod error;
pub mod lz77;
pub mod lz78;
pub mod lzw;

pub use bench::{measure, BenchJob, BenchRecord, BenchRunner, CodecStats};
pub use error::{Error, ErrorKind, Result};
pub use lz77::{Lz77Codec, Token};
pub use lz78::Lz78Codec;
pub use lzw::LzwCodec;

use std::fmt;
use std::str::FromStr;

/// Default LZ77 history window
pub const DEFAULT_WINDOW_SIZE: usize = 4096;

/// Default LZ77 lookahead (longest match)
pub const DEFAULT_LOOKAHEAD_SIZE: usize = 258;

/// The dictionary-substitution algorithms provided by this crate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum CodecKind {
    /// Sliding-window back-references
    Lz77,
    /// Unbounded growing phrase dictionary
    Lz78,
    /// Bounded dictionary with 16-bit codes
    Lzw,
}

impl CodecKind {
    pub const ALL: [CodecKind; 3] = [CodecKind::Lz77, CodecKind::Lz78, CodecKind::Lzw];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lz77 => "lz77",
            Self::Lz78 => "lz78",
            Self::Lzw => "lzw",
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lz77" => Ok(Self::Lz77),
            "lz78" => Ok(Self::Lz78),
            "lzw" => Ok(Self::Lzw),
            other => Err(Error::InvalidConfig(format!("unknown codec '{}'", other))),
        }
    }
}

/// Codec parameters. Fields a codec does not use are ignored by it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// LZ77 history window in bytes (default: 4096)
    pub window_size: usize,
    /// LZ77 maximum match length (default: 258)
    pub lookahead_size: usize,
    /// LZW dictionary cap including the 256 seed entries (default: 4096)
    pub max_table_size: u32,
}

impl CodecConfig {
    /// Check every parameter is in range
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::InvalidConfig("window size must be at least 1".to_string()));
        }
        if self.lookahead_size == 0 {
            return Err(Error::InvalidConfig("lookahead size must be at least 1".to_string()));
        }
        if self.max_table_size <= lzw::FIRST_CODE || self.max_table_size > 1 << 16 {
            return Err(Error::InvalidConfig(format!(
                "max table size {} outside 257..=65536",
                self.max_table_size
            )));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            lookahead_size: DEFAULT_LOOKAHEAD_SIZE,
            max_table_size: lzw::DEFAULT_MAX_TABLE_SIZE,
        }
    }
}

/// A lossless byte-buffer compressor.
///
/// Each call owns its window or dictionary for its duration only, so one
/// codec may be shared across threads.
pub trait Codec: Send + Sync {
    fn kind(&self) -> CodecKind;

    /// Compress `input`; `decompress` of the result reproduces it exactly
    fn compress(&self, input: &[u8]) -> Vec<u8>;

    /// Reconstruct the original bytes, failing on malformed or corrupt input
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Construct the codec for `kind` from a validated configuration
pub fn build_codec(kind: CodecKind, config: &CodecConfig) -> Result<Box<dyn Codec>> {
    config.validate()?;
    Ok(match kind {
        CodecKind::Lz77 => Box::new(Lz77Codec::from_config(config)?),
        CodecKind::Lz78 => Box::new(Lz78Codec),
        CodecKind::Lzw => Box::new(LzwCodec::from_config(config)?),
    })
}
