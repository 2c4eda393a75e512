#![no_main]

use libfuzzer_sys::fuzz_target;
use lzdict::{build_codec, CodecConfig, CodecKind};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce Ok or a typed error, never a panic
    let config = CodecConfig::default();
    for kind in CodecKind::ALL {
        let codec = build_codec(kind, &config).unwrap();
        if let Err(e) = codec.decompress(data) {
            assert!(e.is_data_error(), "{}: unexpected error {}", kind, e);
        }
    }
});
