//! Longest-match search over a bounded history window.
//!
//! Candidates are located with `memrchr` on the first lookahead byte, which
//! visits them from the nearest to the farthest. Only a strictly longer match
//! replaces the current best, so among equally long matches the smallest
//! distance wins.

use memchr::memrchr;

use super::tokens::Token;

/// A back-reference found by the matcher. `length == 0` means no match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Match {
    pub distance: usize,
    pub length: usize,
}

/// Sliding-window matcher with window size `W` and lookahead size `L`
#[derive(Clone, Debug)]
pub struct Matcher {
    window_size: usize,
    lookahead_size: usize,
}

impl Matcher {
    pub fn new(window_size: usize, lookahead_size: usize) -> Self {
        debug_assert!(window_size >= 1 && lookahead_size >= 1);
        Self { window_size, lookahead_size }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn lookahead_size(&self) -> usize {
        self.lookahead_size
    }

    /// Find the longest match for `input[cursor..]` within the window.
    ///
    /// The match may overlap the cursor (distance < length); the decoder
    /// reproduces such runs by copying byte by byte.
    pub fn find(&self, input: &[u8], cursor: usize) -> Match {
        let max_len = self.lookahead_size.min(input.len().saturating_sub(cursor));
        if cursor == 0 || max_len == 0 {
            return Match::default();
        }

        let window_start = cursor.saturating_sub(self.window_size);
        let first = input[cursor];
        let mut best = Match::default();
        let mut end = cursor;

        while let Some(rel) = memrchr(first, &input[window_start..end]) {
            let candidate = window_start + rel;
            let length = common_prefix(input, candidate, cursor, max_len);
            if length > best.length {
                best = Match { distance: cursor - candidate, length };
                if length == max_len {
                    break;
                }
            }
            end = candidate;
        }

        best
    }

    /// Build the token for `cursor`: the best match plus the byte after it.
    /// `None` once `cursor` is past the end of input.
    pub fn token_at(&self, input: &[u8], cursor: usize) -> Option<Token> {
        let &byte = input.get(cursor)?;
        let m = self.find(input, cursor);
        if m.length == 0 {
            return Some(Token::literal(byte));
        }
        Some(Token::reference(m.distance, m.length, input.get(cursor + m.length).copied()))
    }
}

/// Length of the common run of `input[src..]` and `input[dst..]`, capped at
/// `max_len`. Requires `src < dst` and `dst + max_len <= input.len()`.
#[inline]
fn common_prefix(input: &[u8], src: usize, dst: usize, max_len: usize) -> usize {
    let mut k = 0;
    while k < max_len && input[src + k] == input[dst + k] {
        k += 1;
    }
    k
}
