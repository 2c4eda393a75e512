use crate::error::{Error, Result};

/// Serialize codes as concatenated big-endian 16-bit words
pub fn codes_to_bytes(codes: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(codes.len() * 2);
    for &code in codes {
        out.extend_from_slice(&code.to_be_bytes());
    }
    out
}

/// Parse concatenated big-endian 16-bit words.
///
/// Fails with `OddCodeStreamLength` if a trailing half-word is present.
pub fn bytes_to_codes(data: &[u8]) -> Result<Vec<u16>> {
    if data.len() % 2 != 0 {
        return Err(Error::OddCodeStreamLength(data.len()));
    }
    Ok(data.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]])).collect())
}
