//! LZ77 sliding-window codec.
//!
//! The encoder walks the input emitting `(distance, length, next_symbol)`
//! tokens found by the [`Matcher`]; the decoder replays them against its own
//! output.

pub mod matcher;
pub mod tokens;

pub use matcher::{Match, Matcher};
pub use tokens::{tokens_to_bytes, Token, TokenReader};

use crate::error::{Error, Result};
use crate::{Codec, CodecConfig, CodecKind};

/// LZ77 codec over a bounded window and lookahead
#[derive(Clone, Debug)]
pub struct Lz77Codec {
    matcher: Matcher,
}

impl Lz77Codec {
    /// Create a codec, rejecting a zero window or lookahead
    pub fn new(window_size: usize, lookahead_size: usize) -> Result<Self> {
        let config = CodecConfig { window_size, lookahead_size, ..Default::default() };
        Self::from_config(&config)
    }

    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { matcher: Matcher::new(config.window_size, config.lookahead_size) })
    }

    pub fn window_size(&self) -> usize {
        self.matcher.window_size()
    }

    pub fn lookahead_size(&self) -> usize {
        self.matcher.lookahead_size()
    }

    /// Tokenize `input`. Each token consumes `length + 1` bytes, except a
    /// final reference that runs to the end of input and has no literal.
    pub fn encode_tokens(&self, input: &[u8]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut cursor = 0;
        while let Some(token) = self.matcher.token_at(input, cursor) {
            cursor += token.uncompressed_size();
            tokens.push(token);
        }
        tokens
    }

    /// Reconstruct bytes from in-memory tokens.
    ///
    /// Tokens must respect this codec's window and lookahead: a stream is
    /// only readable by a codec configured like the one that wrote it.
    pub fn decode_tokens(&self, tokens: &[Token]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        for token in tokens {
            self.apply(&mut output, token)?;
        }
        Ok(output)
    }

    fn apply(&self, output: &mut Vec<u8>, token: &Token) -> Result<()> {
        if token.length > self.lookahead_size() {
            return Err(Error::MatchTooLong {
                length: token.length as u64,
                max: self.lookahead_size(),
            });
        }
        if token.length > 0 {
            // Only the last `window_size` bytes are addressable
            let reachable = output.len().min(self.window_size());
            if token.distance == 0 || token.distance > reachable {
                return Err(Error::InvalidBackReference {
                    distance: token.distance as u64,
                    available: reachable,
                });
            }
            copy_back(output, token.distance, token.length);
        }
        if let Some(byte) = token.next_symbol {
            output.push(byte);
        }
        Ok(())
    }
}

impl Default for Lz77Codec {
    fn default() -> Self {
        let config = CodecConfig::default();
        Self { matcher: Matcher::new(config.window_size, config.lookahead_size) }
    }
}

impl Codec for Lz77Codec {
    fn kind(&self) -> CodecKind {
        CodecKind::Lz77
    }

    fn compress(&self, input: &[u8]) -> Vec<u8> {
        tokens_to_bytes(&self.encode_tokens(input))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() * 2);
        for token in TokenReader::new(data) {
            self.apply(&mut output, &token?)?;
        }
        Ok(output)
    }
}

/// Append `length` bytes starting `distance` bytes back.
///
/// Byte by byte: when `distance < length` the source run includes bytes this
/// call has just appended.
#[inline]
fn copy_back(output: &mut Vec<u8>, distance: usize, length: usize) {
    let start = output.len() - distance;
    output.reserve(length);
    for i in 0..length {
        let byte = output[start + i];
        output.push(byte);
    }
}
