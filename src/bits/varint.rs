use crate::error::{Error, Result};

/// Maximum encoded length of a u64 (ceil(64 / 7))
pub const MAX_VARINT_LEN: usize = 10;

/// Encode `value` as a base-128 varint.
///
/// Seven payload bits per byte, least-significant group first. The high bit
/// is set on every byte except the last.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_len(value));
    write_varint(&mut out, value);
    out
}

/// Append the varint encoding of `value` to `out`
#[inline]
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Number of bytes `write_varint` produces for `value`
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    (bits.max(1) + 6) / 7
}

/// Decode a varint from `data` starting at `offset`.
///
/// Returns the value and the offset of the first byte after it.
pub fn decode_varint(data: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0u32;
    let mut pos = offset;

    loop {
        let byte = *data.get(pos).ok_or(Error::TruncatedVarint { offset })?;
        pos += 1;

        let payload = (byte & 0x7F) as u64;
        // The tenth byte may only contribute the single remaining bit
        if (shift == 63 && payload > 1) || shift > 63 {
            return Err(Error::VarintOverflow { offset });
        }
        value |= payload << shift;

        if byte & 0x80 == 0 {
            return Ok((value, pos));
        }
        shift += 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_single_byte_values() {
        assert_eq!(encode_varint(0), vec![0x00]);
        assert_eq!(encode_varint(1), vec![0x01]);
        assert_eq!(encode_varint(127), vec![0x7F]);
    }

    #[test]
    fn test_multi_byte_values() {
        assert_eq!(encode_varint(128), vec![0x80, 0x01]);
        assert_eq!(encode_varint(300), vec![0xAC, 0x02]);
        assert_eq!(encode_varint(16384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_decode_at_offset() {
        let data = [0xFF, 0xAC, 0x02, 0x05];
        assert_eq!(decode_varint(&data, 1).unwrap(), (300, 3));
        assert_eq!(decode_varint(&data, 3).unwrap(), (5, 4));
    }

    #[test]
    fn test_boundary_values_round_trip() {
        for value in [0, 127, 128, 16383, 16384, u32::MAX as u64, u64::MAX - 1, u64::MAX] {
            let encoded = encode_varint(value);
            assert_eq!(encoded.len(), varint_len(value), "length for {}", value);
            assert_eq!(decode_varint(&encoded, 0).unwrap(), (value, encoded.len()));
        }
        assert_eq!(encode_varint(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn test_truncated() {
        let err = decode_varint(&[0x80, 0x80], 0).unwrap_err();
        assert!(matches!(err, Error::TruncatedVarint { offset: 0 }));
        assert_eq!(err.kind(), ErrorKind::MalformedInput);

        let err = decode_varint(&[0x01], 1).unwrap_err();
        assert!(matches!(err, Error::TruncatedVarint { offset: 1 }));
    }

    #[test]
    fn test_overflow() {
        // 2^64 needs a 2 in the tenth group
        let mut data = vec![0x80; 9];
        data.push(0x02);
        assert!(matches!(decode_varint(&data, 0), Err(Error::VarintOverflow { offset: 0 })));

        let data = vec![0xFF; 11];
        assert!(matches!(decode_varint(&data, 0), Err(Error::VarintOverflow { .. })));
    }
}
