#![no_main]

use libfuzzer_sys::fuzz_target;
use lzdict::{build_codec, CodecConfig, CodecKind};

fuzz_target!(|data: &[u8]| {
    // First byte picks the LZ77 window so small windows get exercised too
    let (window_size, data) = match data.split_first() {
        Some((&w, rest)) => (w as usize + 1, rest),
        None => (1, data),
    };

    // Limit data size to avoid slowdowns
    let data = if data.len() > 64 * 1024 { &data[..64 * 1024] } else { data };

    let config = CodecConfig { window_size, lookahead_size: 32, max_table_size: 512 };
    for kind in CodecKind::ALL {
        let codec = build_codec(kind, &config).unwrap();
        let compressed = codec.compress(data);
        let restored = codec.decompress(&compressed).expect("decoding own output");
        assert_eq!(restored, data, "{} round-trip mismatch", kind);
    }
});
