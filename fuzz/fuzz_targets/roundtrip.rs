#![no_main]
use libfuzzer_sys::fuzz_target;

use dan3::CompressOptions;

fuzz_target!(|data: &[u8]| {
    // The fuzzer's first byte selects the option set; the rest is payload.
    let (selector, payload) = match data.split_first() {
        Some(split) => split,
        None => return,
    };
    let options = CompressOptions {
        max_offset_bits: 9 + u32::from(selector & 0x07),
        rle: selector & 0x08 != 0,
        fast: selector & 0x10 != 0,
    };

    let compressed = match dan3::compress(payload, &options) {
        Ok(compressed) => compressed,
        // Only oversized inputs may fail, and the fuzzer cannot build those.
        Err(e) => panic!("compression failed: {e}"),
    };

    let recovered = dan3::decompress(&compressed)
        .expect("decompression of a freshly compressed stream failed");
    assert_eq!(
        recovered, payload,
        "round-trip mismatch with {options:?}: {} bytes -> {} -> {}",
        payload.len(),
        compressed.len(),
        recovered.len()
    );
});
