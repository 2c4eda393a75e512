//! LZW bounded-dictionary codec.
//!
//! The dictionary starts with the 256 single-byte phrases and grows until it
//! holds `max_table_size` entries, after which it is frozen (never reset) on
//! both sides. Wire format: big-endian 16-bit codes, no header.

pub mod decoder;
pub mod encoder;

pub use decoder::LzwDecoder;
pub use encoder::LzwEncoder;

use crate::bits::{bytes_to_codes, codes_to_bytes};
use crate::error::{Error, Result};
use crate::{Codec, CodecConfig, CodecKind};

/// First code assigned to a multi-byte phrase
pub const FIRST_CODE: u32 = 256;

/// Default table size: a 12-bit code space
pub const DEFAULT_MAX_TABLE_SIZE: u32 = 4096;

/// Compress `input` to a code stream
pub fn encode(input: &[u8], max_table_size: u32) -> Vec<u16> {
    let mut encoder = LzwEncoder::new(max_table_size);
    encoder.push_bytes(input);
    encoder.finish()
}

/// Decode a code stream. Zero codes is an error: the encoder never produces
/// an empty stream for non-empty input.
pub fn decode(codes: &[u16], max_table_size: u32) -> Result<Vec<u8>> {
    if codes.is_empty() {
        return Err(Error::EmptyStream);
    }
    let mut decoder = LzwDecoder::new(max_table_size);
    for &code in codes {
        decoder.push_code(code)?;
    }
    Ok(decoder.finish())
}

/// LZW codec with fixed-width 16-bit output codes
#[derive(Clone, Copy, Debug)]
pub struct LzwCodec {
    max_table_size: u32,
}

impl LzwCodec {
    pub fn new(max_table_size: u32) -> Result<Self> {
        let config = CodecConfig { max_table_size, ..Default::default() };
        Self::from_config(&config)
    }

    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { max_table_size: config.max_table_size })
    }

    pub fn max_table_size(&self) -> u32 {
        self.max_table_size
    }
}

impl Default for LzwCodec {
    fn default() -> Self {
        Self { max_table_size: DEFAULT_MAX_TABLE_SIZE }
    }
}

impl Codec for LzwCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Lzw
    }

    fn compress(&self, input: &[u8]) -> Vec<u8> {
        codes_to_bytes(&encode(input, self.max_table_size))
    }

    /// An empty byte stream decodes to empty output; a non-empty one must
    /// hold at least one whole code.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        decode(&bytes_to_codes(data)?, self.max_table_size)
    }
}
