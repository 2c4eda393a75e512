//! LZ78 growing-dictionary codec.
//!
//! Wire format: concatenated `(varint index)(literal byte)` pairs, no header.
//! The dictionary is unbounded; memory grows with input size.

pub mod decoder;
pub mod encoder;

pub use decoder::Lz78Decoder;
pub use encoder::Lz78Encoder;

use crate::error::Result;
use crate::{Codec, CodecKind};

/// Compress `input` to LZ78 wire bytes
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut encoder = Lz78Encoder::with_capacity(input.len() / 2);
    encoder.push_bytes(input);
    encoder.finish()
}

/// Decompress LZ78 wire bytes
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = Lz78Decoder::new();
    decoder.decode_all(data)?;
    Ok(decoder.finish())
}

/// LZ78 codec
#[derive(Clone, Copy, Debug, Default)]
pub struct Lz78Codec;

impl Codec for Lz78Codec {
    fn kind(&self) -> CodecKind {
        CodecKind::Lz78
    }

    fn compress(&self, input: &[u8]) -> Vec<u8> {
        encode(input)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decode(data)
    }
}
