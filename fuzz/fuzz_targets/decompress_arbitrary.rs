#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes through the decoder.  Err results are expected
    // and fine; what we verify is the absence of panics and of output
    // beyond the block ceiling.
    if let Ok(out) = dan3::decompress(data) {
        assert!(out.len() <= dan3::MAX_INPUT_SIZE);
    }

    // Exercise the caller-supplied-buffer path with a tight destination.
    let mut dst = [0u8; 256];
    let _ = dan3::decompress_into(data, &mut dst);
});
