use std::ops::Range;

use super::FIRST_CODE;
use crate::error::{Error, Result};

/// LZW decoder mirroring [`LzwEncoder`](super::LzwEncoder)'s insertion cap.
///
/// A new phrase is always `previous + entry[0]`, and `entry` is written
/// directly after `previous`, so each phrase is one contiguous span of output.
pub struct LzwDecoder {
    /// code - 256 -> span of output
    entries: Vec<Range<usize>>,
    previous: Option<Range<usize>>,
    max_table_size: u32,
    output: Vec<u8>,
}

impl LzwDecoder {
    /// `max_table_size` must match the encoder's
    pub fn new(max_table_size: u32) -> Self {
        debug_assert!(max_table_size > FIRST_CODE && max_table_size <= 1 << 16);
        Self { entries: Vec::new(), previous: None, max_table_size, output: Vec::new() }
    }

    fn next_code(&self) -> u32 {
        FIRST_CODE + self.entries.len() as u32
    }

    /// Number of phrases known, including the 256 seeds
    pub fn dictionary_len(&self) -> usize {
        self.next_code() as usize
    }

    /// Decode one code
    pub fn push_code(&mut self, code: u16) -> Result<()> {
        let start = self.output.len();
        let next_code = self.next_code();
        let has_room = next_code < self.max_table_size;

        let previous = match self.previous.clone() {
            Some(previous) => previous,
            None => {
                if code as u32 >= FIRST_CODE {
                    return Err(Error::InvalidCode { code, next_code });
                }
                self.output.push(code as u8);
                self.previous = Some(start..start + 1);
                return Ok(());
            }
        };

        if (code as u32) < FIRST_CODE {
            self.output.push(code as u8);
        } else if let Some(span) = self.entries.get(code as usize - FIRST_CODE as usize) {
            self.output.extend_from_within(span.clone());
        } else if has_room && code as u32 == next_code {
            // Phrase the encoder created on its previous step: previous + previous[0]
            let first = self.output[previous.start];
            self.output.extend_from_within(previous.clone());
            self.output.push(first);
        } else {
            return Err(Error::InvalidCode { code, next_code });
        }

        if has_room {
            self.entries.push(previous.start..start + 1);
        }
        self.previous = Some(start..self.output.len());
        Ok(())
    }

    /// Return the decoded bytes
    pub fn finish(self) -> Vec<u8> {
        self.output
    }
}
