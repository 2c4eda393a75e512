use std::ops::Range;

use crate::bits::decode_varint;
use crate::error::{Error, Result};

/// LZ78 decoder.
///
/// Every phrase is a contiguous run of the output already produced, so the
/// dictionary stores ranges into `output` instead of owned byte strings.
pub struct Lz78Decoder {
    /// code -> span of output; code 0 is the empty phrase
    phrases: Vec<Range<usize>>,
    output: Vec<u8>,
}

impl Lz78Decoder {
    pub fn new() -> Self {
        Self { phrases: vec![0..0], output: Vec::new() }
    }

    /// Number of phrases known, counting the empty phrase
    pub fn dictionary_len(&self) -> usize {
        self.phrases.len()
    }

    /// Decode one `(varint index, literal)` pair at `offset`, returning the
    /// offset of the next pair.
    pub fn decode_pair(&mut self, data: &[u8], offset: usize) -> Result<usize> {
        let (index, pos) = decode_varint(data, offset)?;
        let literal = *data.get(pos).ok_or(Error::MissingLiteral { offset: pos })?;

        let prefix = usize::try_from(index)
            .ok()
            .and_then(|i| self.phrases.get(i))
            .cloned()
            .ok_or(Error::UnknownPhraseIndex { index, dictionary_len: self.phrases.len() })?;

        let start = self.output.len();
        self.output.extend_from_within(prefix);
        self.output.push(literal);
        self.phrases.push(start..self.output.len());

        Ok(pos + 1)
    }

    /// Decode an entire stream
    pub fn decode_all(&mut self, data: &[u8]) -> Result<()> {
        let mut offset = 0;
        while offset < data.len() {
            offset = self.decode_pair(data, offset)?;
        }
        Ok(())
    }

    /// Return the decoded bytes
    pub fn finish(self) -> Vec<u8> {
        self.output
    }
}

impl Default for Lz78Decoder {
    fn default() -> Self {
        Self::new()
    }
}
