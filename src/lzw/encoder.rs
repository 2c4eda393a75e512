use std::collections::HashMap;

use super::FIRST_CODE;

/// Incremental LZW encoder with a frozen-when-full dictionary.
///
/// Codes 0-255 are the single-byte phrases and are never stored; longer
/// phrases are keyed by `(prefix_code, byte)`.
pub struct LzwEncoder {
    dictionary: HashMap<(u16, u8), u16>,
    /// Code of the phrase matched so far
    current: Option<u16>,
    next_code: u32,
    max_table_size: u32,
    codes: Vec<u16>,
}

impl LzwEncoder {
    /// `max_table_size` must lie in `257..=65536`
    pub fn new(max_table_size: u32) -> Self {
        debug_assert!(max_table_size > FIRST_CODE && max_table_size <= 1 << 16);
        Self {
            dictionary: HashMap::new(),
            current: None,
            next_code: FIRST_CODE,
            max_table_size,
            codes: Vec::new(),
        }
    }

    /// Feed one input byte
    pub fn push(&mut self, byte: u8) {
        let prefix = match self.current {
            Some(prefix) => prefix,
            None => {
                self.current = Some(byte as u16);
                return;
            }
        };

        if let Some(&code) = self.dictionary.get(&(prefix, byte)) {
            self.current = Some(code);
            return;
        }

        self.codes.push(prefix);
        if self.next_code < self.max_table_size {
            self.dictionary.insert((prefix, byte), self.next_code as u16);
            self.next_code += 1;
        }
        self.current = Some(byte as u16);
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// Number of phrases known, including the 256 seeds
    pub fn dictionary_len(&self) -> usize {
        self.next_code as usize
    }

    /// Whether the table has reached its cap
    pub fn is_full(&self) -> bool {
        self.next_code >= self.max_table_size
    }

    /// Emit the pending phrase and return the code stream
    pub fn finish(mut self) -> Vec<u16> {
        if let Some(code) = self.current.take() {
            self.codes.push(code);
        }
        self.codes
    }
}
