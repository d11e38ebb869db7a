//! DAN3 block compression — the optimal-parse LZSS encoder.
//!
//! Encoding is a three-phase pipeline:
//!
//! 1. **Scan** — a forward pass over the input relaxes every candidate
//!    emission into the cost table: single literal, literal run, length-1
//!    back-reference against the last three bytes, and longer
//!    back-references found through the two-byte match index.  Candidates
//!    are costed independently per offset regime (long-offset widths
//!    9..=16 bits).
//! 2. **Select + trim** — the regime with the fewest total bits at the last
//!    position wins (ties to the narrowest); the chosen regime's token
//!    chain is walked backwards and shadowed positions are cleared.
//! 3. **Emit** — the regime selector, the raw first byte, the surviving
//!    tokens, and the end marker are written through the split-cursor bit
//!    writer.
//!
//! The scan is exhaustive, so compression is slow by design: the codec
//! targets small, pattern-heavy payloads where ratio is worth CPU.  The
//! `fast` option short-circuits the match walk inside constant runs by
//! extending the previous offset-1 token instead; see
//! [`CompressOptions::fast`] for the trade-off.

use core::fmt;

use super::bitio::BitWriter;
use super::codes::{write_gamma, write_offset};
use super::matches::{MatchIndex, NIL};
use super::optimal::CostTable;
use super::types::{
    compress_bound, long_offset_bits, CompressOptions, BIT_GOLOMB_MAX, MAX_GAMMA,
    MAX_INPUT_SIZE, MAX_OFFSET, MAX_OFFSET0, RAW_MAX, RAW_MIN,
};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by DAN3 block compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressError {
    /// The input exceeds [`MAX_INPUT_SIZE`].
    InputTooLarge,
    /// The destination buffer cannot hold the compressed stream.  Never
    /// occurs when the destination holds [`compress_bound`] bytes.
    OutputOverflow,
    /// No regime produced a finite cost for the final position.  Cannot
    /// happen for well-formed inputs; reported instead of panicking.
    Unreachable,
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressError::InputTooLarge => write!(f, "input exceeds the 1 MiB block limit"),
            CompressError::OutputOverflow => write!(f, "destination buffer too small"),
            CompressError::Unreachable => write!(f, "internal parse state unreachable"),
        }
    }
}

impl std::error::Error for CompressError {}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into a freshly allocated buffer.
///
/// Empty input yields empty output.
pub fn compress(src: &[u8], options: &CompressOptions) -> Result<Vec<u8>, CompressError> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let written = compress_into(src, &mut dst, options)?;
    dst.truncate(written);
    Ok(dst)
}

/// Compress `src` into `dst`, returning the number of bytes written.
///
/// `dst` must hold at least [`compress_bound`]`(src.len())` bytes to rule
/// out [`CompressError::OutputOverflow`].
pub fn compress_into(
    src: &[u8],
    dst: &mut [u8],
    options: &CompressOptions,
) -> Result<usize, CompressError> {
    if src.len() > MAX_INPUT_SIZE {
        return Err(CompressError::InputTooLarge);
    }
    if src.is_empty() {
        return Ok(0);
    }

    let mut table = CostTable::new(src.len(), options.regime_count());
    scan(src, options, &mut table);

    let (regime, _) = table.best_regime().ok_or(CompressError::Unreachable)?;
    table.trim(regime);
    emit(src, &table, regime, dst)
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 1: forward scan
// ─────────────────────────────────────────────────────────────────────────────

fn scan(src: &[u8], options: &CompressOptions, table: &mut CostTable) {
    let mut index = MatchIndex::new();
    let mut prev_key: i32 = -1;

    table.update(0, 1, 0);

    for i in 1..src.len() {
        // Single literal.
        table.update(i, 1, 0);

        // Literal run, longest first.
        if options.rle {
            let top = RAW_MAX.min(i as u32);
            let mut run = top;
            while run > RAW_MIN {
                table.update(i, run, 0);
                run -= 1;
            }
        }

        // Length-1 back-reference against the nearest three bytes.
        let reach = u32::min(MAX_OFFSET0, i as u32);
        for distance in 1..=reach {
            if src[i] == src[i - distance as usize] {
                table.update(i, 1, distance);
            }
        }

        // Length >= 2 back-references via the match index.
        let key = (u16::from(src[i - 1]) << 8) | u16::from(src[i]);
        let run_before = table.token_len(i - 1, 0);
        if options.fast
            && prev_key == i32::from(key)
            && table.token_offset(i - 1, 0) == 1
            && run_before > 2
        {
            // Constant run continues: extend the previous offset-1 token by
            // one byte and skip the match walk entirely.
            if run_before < MAX_GAMMA && i > run_before as usize {
                table.update(i, run_before + 1, 1);
            }
        } else {
            walk_matches(src, i, key, &mut index, table);
        }
        prev_key = i32::from(key);
        index.insert(key, i as u32);
    }
}

/// Walk `key`'s chain newest-first, relaxing every match length reachable
/// from each candidate position.  Candidates beyond the maximum window prune
/// the rest of the chain.
fn walk_matches(src: &[u8], i: usize, key: u16, index: &mut MatchIndex, table: &mut CostTable) {
    let mut prev_slot = NIL;
    let mut slot = index.head(key);
    while slot != NIL {
        let offset = i as u32 - index.pos(slot);
        if offset > MAX_OFFSET {
            index.truncate(key, slot, prev_slot);
            break;
        }
        // The key match guarantees two bytes; try to grow backwards from
        // there.  The window never reaches back past position 1, so a copy
        // source is always strictly inside the already-parsed prefix.
        let mut len = 2u32;
        while len <= MAX_GAMMA {
            if len as usize + offset as usize > i {
                break;
            }
            table.update(i, len, offset);
            if src[i - len as usize] != src[i - len as usize - offset as usize] {
                break;
            }
            len += 1;
        }
        prev_slot = slot;
        slot = index.next(slot);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 3: emission
// ─────────────────────────────────────────────────────────────────────────────

fn emit(
    src: &[u8],
    table: &CostTable,
    regime: usize,
    dst: &mut [u8],
) -> Result<usize, CompressError> {
    let long_bits = long_offset_bits(regime);
    let mut w = BitWriter::new(dst);

    // Regime selector: `regime` one-bits, then a zero.
    w.write_bits(0xFE, regime as u32 + 1)?;
    w.write_byte(src[0])?;

    for i in 1..src.len() {
        let len = table.token_len(i, regime);
        if len == 0 {
            continue;
        }
        let start = i + 1 - len as usize;
        let offset = table.token_offset(i, regime);
        if offset == 0 {
            if len == 1 {
                write_literal(&mut w, src[i])?;
            } else {
                write_run(&mut w, &src[start..=i])?;
            }
        } else {
            write_doublet(&mut w, len, offset, long_bits)?;
        }
    }

    write_end(&mut w)?;
    Ok(w.position())
}

/// Flag bit `1` + the raw byte.
fn write_literal(w: &mut BitWriter<'_>, byte: u8) -> Result<(), CompressError> {
    w.write_bit(1)?;
    w.write_byte(byte)
}

/// Sentinel + `1` + biased length byte + the raw bytes.
fn write_run(w: &mut BitWriter<'_>, bytes: &[u8]) -> Result<(), CompressError> {
    w.write_bit(0)?;
    w.write_bits(0, BIT_GOLOMB_MAX)?;
    w.write_bit(1)?;
    w.write_byte((bytes.len() as u32 - RAW_MIN) as u8)?;
    for &byte in bytes {
        w.write_byte(byte)?;
    }
    Ok(())
}

/// Flag bit `0` + gamma length + offset.
fn write_doublet(
    w: &mut BitWriter<'_>,
    len: u32,
    offset: u32,
    long_bits: u32,
) -> Result<(), CompressError> {
    w.write_bit(0)?;
    write_gamma(w, len)?;
    write_offset(w, offset, len, long_bits)
}

/// Sentinel + `0`: end of stream.
fn write_end(w: &mut BitWriter<'_>) -> Result<(), CompressError> {
    w.write_bit(0)?;
    w.write_bits(0, BIT_GOLOMB_MAX)?;
    w.write_bit(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_compresses_to_nothing() {
        assert_eq!(compress(&[], &CompressOptions::default()).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn single_byte_stream_layout() {
        // Selector "0" shares the first bit byte with the 9-bit end marker;
        // the data byte sits byte-aligned in between.
        let compressed = compress(&[0x41], &CompressOptions::default()).unwrap();
        assert_eq!(compressed, [0x00, 0x41, 0x00]);
    }

    #[test]
    fn compression_is_deterministic() {
        let src: Vec<u8> = (0..200u32).map(|v| (v * 7 % 61) as u8).collect();
        let opts = CompressOptions::default();
        assert_eq!(compress(&src, &opts).unwrap(), compress(&src, &opts).unwrap());
    }

    #[test]
    fn repetitive_input_shrinks() {
        let src = b"TILETILETILETILETILETILETILETILE".repeat(16);
        let compressed = compress(&src, &CompressOptions::default()).unwrap();
        assert!(compressed.len() < src.len() / 4);
    }

    #[test]
    fn emitted_size_matches_cost_table() {
        // The stream is exactly the selector, the parsed cost, and the end
        // marker, rounded up to whole bytes.
        let sources: [&[u8]; 4] = [
            b"x",
            b"abcabcabcabcabcabc",
            b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            b"literal heavy 0123456789 abcdefghijklmnopqrstuvwxyz",
        ];
        for src in sources {
            let opts = CompressOptions::default();
            let mut table = CostTable::new(src.len(), opts.regime_count());
            scan(src, &opts, &mut table);
            let (regime, bits) = table.best_regime().unwrap();
            let total_bits = (regime as u32 + 1) + bits + (1 + BIT_GOLOMB_MAX + 1);
            let compressed = compress(src, &opts).unwrap();
            assert_eq!(
                compressed.len(),
                total_bits.div_ceil(8) as usize,
                "size mismatch for {} bytes",
                src.len()
            );
        }
    }

    #[test]
    fn oversized_input_is_rejected() {
        let src = vec![0u8; MAX_INPUT_SIZE + 1];
        assert_eq!(
            compress(&src, &CompressOptions::default()),
            Err(CompressError::InputTooLarge)
        );
    }

    #[test]
    fn undersized_destination_overflows() {
        let src = b"no room at all".repeat(4);
        let mut dst = [0u8; 4];
        assert_eq!(
            compress_into(&src, &mut dst, &CompressOptions::default()),
            Err(CompressError::OutputOverflow)
        );
    }
}
