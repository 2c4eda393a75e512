use crate::bits::{decode_varint, write_varint};
use crate::error::{Error, Result};

/// A single LZ77 token: copy `length` bytes from `distance` bytes back, then
/// emit `next_symbol` if present.
///
/// `distance == 0` if and only if `length == 0` (a pure literal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub distance: usize,
    pub length: usize,
    pub next_symbol: Option<u8>,
}

impl Token {
    /// A literal-only token
    pub fn literal(byte: u8) -> Self {
        Self { distance: 0, length: 0, next_symbol: Some(byte) }
    }

    /// A back-reference, optionally followed by a literal
    pub fn reference(distance: usize, length: usize, next_symbol: Option<u8>) -> Self {
        debug_assert!(distance > 0 && length > 0);
        Self { distance, length, next_symbol }
    }

    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        self.length + usize::from(self.next_symbol.is_some())
    }

    /// Append the wire form of this token to `out`.
    ///
    /// Layout: `varint((length << 1) | has_literal)`, then `varint(distance)`
    /// when `length > 0`, then the literal byte when present.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        let has_literal = self.next_symbol.is_some() as u64;
        write_varint(out, ((self.length as u64) << 1) | has_literal);
        if self.length > 0 {
            write_varint(out, self.distance as u64);
        }
        if let Some(byte) = self.next_symbol {
            out.push(byte);
        }
    }
}

/// Serialize a token sequence; an empty sequence yields an empty buffer
pub fn tokens_to_bytes(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        token.write_to(&mut out);
    }
    out
}

/// Iterates the tokens of a serialized LZ77 stream.
///
/// Checks framing only; whether back-references are satisfiable is decided
/// by the decoder, which knows how much output exists.
pub struct TokenReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset of the next unread token
    pub fn position(&self) -> usize {
        self.pos
    }

    fn read_token(&mut self) -> Result<Token> {
        let start = self.pos;
        let (header, mut pos) = decode_varint(self.data, start)?;
        if header == 0 {
            return Err(Error::EmptyToken { offset: start });
        }

        let length = header >> 1;
        let length_usize =
            usize::try_from(length).map_err(|_| Error::MatchTooLong { length, max: usize::MAX })?;

        let mut distance = 0usize;
        if length > 0 {
            let (d, next) = decode_varint(self.data, pos)?;
            distance = match usize::try_from(d) {
                Ok(d) if d > 0 => d,
                _ => return Err(Error::InvalidDistance { distance: d, offset: start }),
            };
            pos = next;
        }

        let next_symbol = if header & 1 == 1 {
            let byte = *self.data.get(pos).ok_or(Error::MissingLiteral { offset: pos })?;
            pos += 1;
            Some(byte)
        } else {
            None
        };

        self.pos = pos;
        Ok(Token { distance, length: length_usize, next_symbol })
    }
}

impl Iterator for TokenReader<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        let item = self.read_token();
        if item.is_err() {
            // Stop after the first framing error
            self.pos = self.data.len();
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_wire_form() {
        let mut out = Vec::new();
        Token::literal(b'A').write_to(&mut out);
        assert_eq!(out, vec![0x01, b'A']);
    }

    #[test]
    fn test_reference_wire_form() {
        let mut out = Vec::new();
        Token::reference(2, 5, None).write_to(&mut out);
        assert_eq!(out, vec![0x0A, 0x02]);

        out.clear();
        Token::reference(300, 3, Some(b'z')).write_to(&mut out);
        assert_eq!(out, vec![0x07, 0xAC, 0x02, b'z']);
    }

    #[test]
    fn test_reader_sequence() {
        let tokens = vec![
            Token::literal(b'A'),
            Token::literal(b'B'),
            Token::reference(2, 4, Some(b'A')),
            Token::reference(1, 2, None),
        ];
        let bytes = tokens_to_bytes(&tokens);
        let parsed: Vec<Token> = TokenReader::new(&bytes).collect::<Result<_>>().unwrap();
        assert_eq!(parsed, tokens);
    }

    #[test]
    fn test_uncompressed_size() {
        assert_eq!(Token::literal(0).uncompressed_size(), 1);
        assert_eq!(Token::reference(3, 7, Some(1)).uncompressed_size(), 8);
        assert_eq!(Token::reference(3, 7, None).uncompressed_size(), 7);
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut reader = TokenReader::new(&[0x00]);
        assert!(matches!(reader.next(), Some(Err(Error::EmptyToken { offset: 0 }))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_missing_literal() {
        let mut reader = TokenReader::new(&[0x01]);
        assert!(matches!(reader.next(), Some(Err(Error::MissingLiteral { offset: 1 }))));
    }

    #[test]
    fn test_zero_distance_rejected() {
        // A literal, then a length-2 reference with distance 0 at offset 2
        let mut reader = TokenReader::new(&[0x01, b'A', 0x04, 0x00]);
        assert_eq!(reader.next().unwrap().unwrap(), Token::literal(b'A'));
        assert_eq!(reader.position(), 2);
        assert!(matches!(
            reader.next(),
            Some(Err(Error::InvalidDistance { distance: 0, offset: 2 }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_position_tracks_tokens() {
        let bytes = tokens_to_bytes(&[Token::literal(b'x'), Token::reference(300, 3, Some(b'z'))]);
        let mut reader = TokenReader::new(&bytes);
        assert_eq!(reader.position(), 0);
        reader.next().unwrap().unwrap();
        assert_eq!(reader.position(), 2);
        reader.next().unwrap().unwrap();
        assert_eq!(reader.position(), bytes.len());
    }

    #[test]
    fn test_truncated_distance() {
        let mut reader = TokenReader::new(&[0x04]);
        assert!(matches!(reader.next(), Some(Err(Error::TruncatedVarint { offset: 1 }))));
    }
}
