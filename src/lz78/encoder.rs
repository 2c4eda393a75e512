use std::collections::HashMap;

use crate::bits::write_varint;

/// Incremental LZ78 encoder.
///
/// Phrases are stored as a trie keyed by `(prefix_code, byte)`; code 0 is the
/// empty phrase. Every emitted `(index, literal)` pair inserts exactly one new
/// phrase.
pub struct Lz78Encoder {
    dictionary: HashMap<(u64, u8), u64>,
    /// Code of the phrase matched so far (0 = empty)
    current: u64,
    /// Prefix code and final byte of `current`, needed to flush it at the end
    current_prefix: u64,
    current_last: u8,
    next_code: u64,
    output: Vec<u8>,
}

impl Lz78Encoder {
    pub fn new() -> Self {
        Self {
            dictionary: HashMap::new(),
            current: 0,
            current_prefix: 0,
            current_last: 0,
            next_code: 1,
            output: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), ..Self::new() }
    }

    /// Feed one input byte
    pub fn push(&mut self, byte: u8) {
        if let Some(&code) = self.dictionary.get(&(self.current, byte)) {
            self.current_prefix = self.current;
            self.current_last = byte;
            self.current = code;
            return;
        }

        write_varint(&mut self.output, self.current);
        self.output.push(byte);
        self.dictionary.insert((self.current, byte), self.next_code);
        self.next_code += 1;
        self.current = 0;
    }

    /// Feed a run of input bytes
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// Number of phrases known, counting the empty phrase
    pub fn dictionary_len(&self) -> usize {
        self.next_code as usize
    }

    /// Flush and return the wire bytes.
    ///
    /// Input that ends inside a known phrase re-emits that phrase as
    /// `(prefix, last_byte)`, so the decoder still sees only complete pairs.
    pub fn finish(mut self) -> Vec<u8> {
        if self.current != 0 {
            write_varint(&mut self.output, self.current_prefix);
            self.output.push(self.current_last);
        }
        self.output
    }
}

impl Default for Lz78Encoder {
    fn default() -> Self {
        Self::new()
    }
}
