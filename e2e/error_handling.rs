//! E2E Test Suite 03: Error handling
//!
//! The decoder treats the stream as hostile input: every truncation and
//! malformation must surface as a typed error, never a panic and never
//! silently-wrong output.  The encoder enforces the input ceiling and the
//! destination capacity.

extern crate dan3;

use dan3::{
    compress, compress_bound, compress_into, decompress, decompress_into, CompressError,
    CompressOptions, DecompressError, MAX_INPUT_SIZE,
};

fn sample_stream(src: &[u8]) -> Vec<u8> {
    compress(src, &CompressOptions::default()).expect("sample compression")
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: every non-empty proper prefix of a valid stream fails
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_streams_always_error() {
    let corpora: [&[u8]; 4] = [
        b"a",
        b"The quick brown fox jumps over the lazy dog.",
        &[0u8; 220],
        &[7, 7, 7, 9, 9, 9, 7, 7, 7, 9, 9, 9, 1, 2, 3, 4, 5, 6, 7, 8],
    ];
    for src in corpora {
        let stream = sample_stream(src);
        for cut in 1..stream.len() {
            let result = decompress(&stream[..cut]);
            assert!(
                matches!(
                    result,
                    Err(DecompressError::TruncatedStream) | Err(DecompressError::InvalidStream)
                ),
                "prefix {cut}/{} of a {}-byte input decoded to {:?}",
                stream.len(),
                src.len(),
                result.map(|v| v.len())
            );
        }
        // The zero-length prefix is the empty stream, which is valid.
        assert!(decompress(&stream[..0]).unwrap().is_empty());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: over-long regime selector
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_overlong_selector_rejected() {
    // 0xFF opens with eight consecutive one-bits; valid selectors stop at
    // seven.
    for tail in [vec![], vec![0x00], vec![0x41, 0x00, 0x00]] {
        let mut stream = vec![0xFFu8];
        stream.extend_from_slice(&tail);
        assert_eq!(decompress(&stream), Err(DecompressError::InvalidStream));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: back-reference reaching before the output start
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_backreference_before_start_rejected() {
    // Hand-built stream: selector "0", raw byte, then a doublet with
    // length 2 and the 5-bit offset form encoding distance 3 — but only one
    // byte has been produced, so the copy source lies before the output.
    // Bit byte 0: 0 | 0 | 11 (gamma len 2) | 1 0 (5-bit offset class) | 0…
    // Bit byte 2 continues the offset bits and the stream just ends.
    let stream = [0b0011_1000u8, 0x41, 0b0100_0000];
    let result = decompress(&stream);
    assert!(
        matches!(
            result,
            Err(DecompressError::InvalidStream) | Err(DecompressError::TruncatedStream)
        ),
        "got {result:?}"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: arbitrary byte soup never panics
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_garbage_streams_never_panic() {
    let mut state = 0xBAD5EEDu64;
    for _ in 0..512 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let len = (state >> 48) as usize % 64;
        let soup: Vec<u8> = (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (state >> 33) as u8
            })
            .collect();
        // Any outcome is fine except a panic; decoded output can never
        // exceed the block ceiling.
        if let Ok(out) = decompress(&soup) {
            assert!(out.len() <= MAX_INPUT_SIZE);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: encoder input ceiling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_input_too_large_both_directions() {
    let oversized = vec![0u8; MAX_INPUT_SIZE + 1];
    assert_eq!(
        compress(&oversized, &CompressOptions::default()),
        Err(CompressError::InputTooLarge)
    );
    assert_eq!(decompress(&oversized), Err(DecompressError::InputTooLarge));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: destination capacity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_destination_capacity_errors() {
    let src = b"capacity capacity capacity capacity".to_vec();
    let opts = CompressOptions::default();

    // Encoder: a buffer below the bound may overflow; at the bound never.
    let mut tiny = [0u8; 2];
    assert_eq!(compress_into(&src, &mut tiny, &opts), Err(CompressError::OutputOverflow));
    let mut full = vec![0u8; compress_bound(src.len())];
    let written = compress_into(&src, &mut full, &opts).unwrap();

    // Decoder: output buffer one byte short.
    let mut short = vec![0u8; src.len() - 1];
    assert_eq!(
        decompress_into(&full[..written], &mut short),
        Err(DecompressError::OutputOverflow)
    );
    let mut exact = vec![0u8; src.len()];
    assert_eq!(decompress_into(&full[..written], &mut exact).unwrap(), src.len());
    assert_eq!(exact, src);
}
