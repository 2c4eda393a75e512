pub mod varint;
pub mod words;

pub use varint::{decode_varint, encode_varint, varint_len, write_varint, MAX_VARINT_LEN};
pub use words::{bytes_to_codes, codes_to_bytes};
