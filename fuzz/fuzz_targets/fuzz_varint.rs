#![no_main]

use libfuzzer_sys::fuzz_target;
use lzdict::bits::{decode_varint, encode_varint};

fuzz_target!(|data: &[u8]| {
    let mut offset = 0;
    while offset < data.len() {
        match decode_varint(data, offset) {
            Ok((value, next)) => {
                assert!(next > offset);
                // Canonical encodings re-encode to the same bytes
                let encoded = encode_varint(value);
                if encoded.len() == next - offset {
                    assert_eq!(&encoded[..], &data[offset..next]);
                }
                offset = next;
            }
            Err(_) => break,
        }
    }
});
