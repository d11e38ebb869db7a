//! E2E Test Suite 01: Round-trip & determinism properties
//!
//! Universal codec properties across the whole option space:
//! - decompress(compress(x)) == x for every option combination
//! - compression is a pure function of (input, options)
//! - widening the regime window never grows the output
//! - boundary sizes: empty, single byte, full 1 MiB block

extern crate dan3;

use dan3::{compress, decompress, CompressOptions, MAX_INPUT_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Tiny deterministic PRNG so the suite needs no RNG dependency.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed.wrapping_mul(2862933555777941757).wrapping_add(3037000493))
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.next_u32() as u8).collect()
    }
}

fn all_option_combinations() -> Vec<CompressOptions> {
    let mut combos = Vec::new();
    for max_offset_bits in [9u32, 12, 16] {
        for rle in [false, true] {
            for fast in [false, true] {
                combos.push(CompressOptions { max_offset_bits, rle, fast });
            }
        }
    }
    combos
}

fn assert_roundtrip(src: &[u8], opts: &CompressOptions) {
    let compressed = compress(src, opts).expect("compression should succeed");
    let recovered = decompress(&compressed).expect("decompression should succeed");
    assert_eq!(
        recovered, src,
        "round-trip mismatch for {} bytes with {:?}",
        src.len(),
        opts
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: boundary sizes round-trip under every option combination
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_boundary_sizes_all_options() {
    for opts in all_option_combinations() {
        assert_roundtrip(&[], &opts);
        assert_roundtrip(&[0x41], &opts);
        assert_roundtrip(&[0x00, 0x00], &opts);
        assert_roundtrip(&[1, 2, 3], &opts);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: representative corpora round-trip under every option combination
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_corpora_all_options() {
    let text = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let zeros = vec![0u8; 300];
    let ramp: Vec<u8> = (0u32..512).map(|v| (v % 256) as u8).collect();
    let random = Lcg::new(0xDA3).bytes(4096);

    for opts in all_option_combinations() {
        assert_roundtrip(&text, &opts);
        assert_roundtrip(&zeros, &opts);
        assert_roundtrip(&ramp, &opts);
        assert_roundtrip(&random, &opts);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: determinism — two runs are byte-identical
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compression_is_deterministic() {
    let src = Lcg::new(42).bytes(2048);
    for opts in all_option_combinations() {
        let first = compress(&src, &opts).unwrap();
        let second = compress(&src, &opts).unwrap();
        assert_eq!(first, second, "non-deterministic output with {opts:?}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: monotone cost — widening the regime set never grows the output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_wider_window_never_grows_output() {
    let mut sources = vec![
        b"TILETILETILETILETILE".repeat(64),
        Lcg::new(7).bytes(8192),
    ];
    // Far-apart repetition that only wide regimes can exploit.
    let mut far = Lcg::new(9).bytes(40_000);
    let block = far[2..66].to_vec();
    far.extend_from_slice(&block);
    sources.push(far);

    for src in &sources {
        let mut previous = usize::MAX;
        for bits in [9u32, 12, 16] {
            let opts = CompressOptions { max_offset_bits: bits, rle: false, fast: false };
            let size = compress(src, &opts).unwrap().len();
            assert!(
                size <= previous,
                "window {bits} bits grew output: {size} > {previous}"
            );
            previous = size;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: full 1 MiB block — no overflow, exact recovery
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_full_size_block() {
    let src = Lcg::new(0xB10C).bytes(MAX_INPUT_SIZE);
    let opts = CompressOptions { max_offset_bits: 16, rle: false, fast: false };
    let compressed = compress(&src, &opts).unwrap();
    assert!(compressed.len() <= dan3::compress_bound(src.len()));
    assert_eq!(decompress(&compressed).unwrap(), src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: seeded fuzz — random blocks, cycling option sets
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_fuzz_random_blocks_roundtrip() {
    let combos = all_option_combinations();
    let mut rng = Lcg::new(0xF00D);
    for round in 0..48 {
        let len = (rng.next_u32() as usize) % 1200;
        let src = rng.bytes(len);
        let opts = &combos[round % combos.len()];
        let compressed = compress(&src, opts).unwrap();
        let recovered = decompress(&compressed).unwrap();
        assert_eq!(recovered, src, "round {round} len {len} opts {opts:?}");
        assert_eq!(compress(&src, opts).unwrap(), compressed, "round {round} determinism");
    }
}
