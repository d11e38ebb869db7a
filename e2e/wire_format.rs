//! E2E Test Suite 02: Bit-exact wire format
//!
//! Pins down the stream layout byte-for-byte on small inputs where the
//! expected bit sequence can be derived by hand, plus the structural
//! corner cases of the format (regime selector width, split bit/byte
//! cursor, the 254-length cap forcing token splits).

extern crate dan3;

use dan3::{compress, decompress, CompressOptions};

fn slow() -> CompressOptions {
    CompressOptions { max_offset_bits: 16, rle: true, fast: false }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: empty input → empty stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_empty_stream() {
    let compressed = compress(&[], &slow()).unwrap();
    assert!(compressed.is_empty());
    assert!(decompress(&compressed).unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: single byte — selector, raw byte, end marker
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_byte_stream_bytes() {
    // Bit sequence: selector "0"; then the raw data byte, byte-aligned at
    // position 1; then the end marker "0 0000000 0".  The selector and the
    // first eight end-marker bits share the bit byte at position 0; the
    // ninth spills into a fresh bit byte at position 2.
    let compressed = compress(&[0x41], &slow()).unwrap();
    assert_eq!(compressed, [0x00, 0x41, 0x00]);
    assert_eq!(decompress(&compressed).unwrap(), [0x41]);

    // All regimes are equivalent for one byte, so every window width picks
    // regime 0 and emits the identical stream.
    for bits in 9..=16 {
        let opts = CompressOptions { max_offset_bits: bits, ..slow() };
        assert_eq!(compress(&[0x41], &opts).unwrap(), compressed);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: two distinct bytes — literal token layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_two_byte_stream_bytes() {
    // Bit byte 0 collects: selector "0", the literal flag "1", and the
    // first six end-marker bits; the raw bytes 0x41 and 0x42 stay
    // byte-aligned; the remaining two end-marker bits open bit byte 3.
    let compressed = compress(&[0x41, 0x42], &slow()).unwrap();
    assert_eq!(compressed, [0b0100_0000, 0x41, 0x42, 0x00]);
    assert_eq!(decompress(&compressed).unwrap(), [0x41, 0x42]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: constant run — fast and slow parses both round-trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_constant_run_fast_and_slow() {
    let src = vec![0u8; 300];
    for fast in [false, true] {
        let opts = CompressOptions { fast, ..slow() };
        let compressed = compress(&src, &opts).unwrap();
        assert!(
            compressed.len() < 32,
            "constant run should collapse (fast={fast}, got {} bytes)",
            compressed.len()
        );
        assert_eq!(decompress(&compressed).unwrap(), src, "fast={fast}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: doubled 256-byte ramp — copy length exceeds the gamma cap
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_doubled_ramp_splits_long_copy() {
    // The second half is a 256-byte repeat at distance 256, but a single
    // back-reference tops out at length 254, so the encoder must split it.
    let mut src: Vec<u8> = (0u32..256).map(|v| v as u8).collect();
    let first_half = src.clone();
    src.extend_from_slice(&first_half);

    let compressed = compress(&src, &slow()).unwrap();
    assert!(compressed.len() < src.len());
    assert_eq!(decompress(&compressed).unwrap(), src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: far repetition — only the 16-bit regime reaches it
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_far_match_selects_widest_regime() {
    // Filler whose adjacent byte pairs are all distinct (a 16-bit counter
    // written out big-endian), so the only repetition in the input is the
    // 64-byte block planted ~40 000 bytes after its first occurrence.  That
    // distance is representable only with a 16-bit long offset, so the
    // winning regime is 7 and the stream opens with seven one-bits and a
    // zero — exactly 0xFE.
    let mut src = Vec::with_capacity(40_064);
    for counter in 0u16..20_000 {
        src.extend_from_slice(&counter.to_be_bytes());
    }
    let block = src[2..66].to_vec();
    src.extend_from_slice(&block);

    let opts = CompressOptions { max_offset_bits: 16, rle: false, fast: false };
    let compressed = compress(&src, &opts).unwrap();
    assert_eq!(compressed[0], 0xFE);
    assert_eq!(decompress(&compressed).unwrap(), src);

    // Capping the window at 9 bits hides the far match; the stream then
    // opens with regime 0 (first bit clear) and ends up no smaller.
    let narrow = CompressOptions { max_offset_bits: 9, rle: false, fast: false };
    let narrow_compressed = compress(&src, &narrow).unwrap();
    assert_eq!(narrow_compressed[0] & 0x80, 0);
    assert!(compressed.len() < narrow_compressed.len());
    assert_eq!(decompress(&narrow_compressed).unwrap(), src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: seeded 4096-byte block — stable size and exact recovery
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_random_block_roundtrip_and_size() {
    let mut state = 4096u64;
    let src: Vec<u8> = (0..4096)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect();
    let compressed = compress(&src, &slow()).unwrap();
    // Random data does not compress; it must still fit the published bound.
    assert!(compressed.len() <= dan3::compress_bound(src.len()));
    assert_eq!(decompress(&compressed).unwrap(), src);
}
