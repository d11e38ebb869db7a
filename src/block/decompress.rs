//! DAN3 block decompression.
//!
//! This module is the security boundary of the codec: the stream is
//! untrusted input.  Every read and every copy is bounds-checked, and all
//! malformed, truncated, or oversized streams come back as a typed error —
//! decoding never panics and never writes outside the destination.
//!
//! Stream walk: read the unary regime selector, copy the first byte raw,
//! then dispatch tokens until the end marker:
//!
//! - flag `1` → one literal byte,
//! - flag `0` + gamma length → back-reference (copy `length` bytes from
//!   `distance` behind the output cursor, byte-by-byte so overlapping runs
//!   self-extend),
//! - flag `0` + sentinel + `1` → literal run (biased length byte + raw
//!   bytes),
//! - flag `0` + sentinel + `0` → end of stream.

use core::fmt;

use super::bitio::BitReader;
use super::codes::{read_gamma, read_offset};
use super::types::{long_offset_bits, BIT_OFFSET_NBR, MAX_INPUT_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by DAN3 block decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// The compressed input exceeds [`MAX_INPUT_SIZE`].
    InputTooLarge,
    /// The stream ended in the middle of a token (no end marker reached).
    TruncatedStream,
    /// The stream is structurally invalid: over-long regime selector, a
    /// zero token length, or a back-reference reaching before the start of
    /// the output.
    InvalidStream,
    /// The destination buffer cannot hold the decoded output.
    OutputOverflow,
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::InputTooLarge => write!(f, "input exceeds the 1 MiB block limit"),
            DecompressError::TruncatedStream => write!(f, "compressed stream is truncated"),
            DecompressError::InvalidStream => write!(f, "compressed stream is malformed"),
            DecompressError::OutputOverflow => write!(f, "destination buffer too small"),
        }
    }
}

impl std::error::Error for DecompressError {}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress `src` into a freshly allocated buffer.
///
/// Empty input yields empty output.  The decoded size is bounded by
/// [`MAX_INPUT_SIZE`]; streams claiming more are rejected.
pub fn decompress(src: &[u8]) -> Result<Vec<u8>, DecompressError> {
    if src.is_empty() {
        return Ok(Vec::new());
    }
    let mut dst = vec![0u8; MAX_INPUT_SIZE];
    let written = decompress_into(src, &mut dst)?;
    dst.truncate(written);
    Ok(dst)
}

/// Decompress `src` into `dst`, returning the number of bytes produced.
pub fn decompress_into(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    if src.len() > MAX_INPUT_SIZE {
        return Err(DecompressError::InputTooLarge);
    }
    if src.is_empty() {
        return Ok(0);
    }

    let mut r = BitReader::new(src);

    // Unary regime selector: one-bits count the regime, 0..=7.
    let mut regime = 0usize;
    while r.read_bit()? != 0 {
        regime += 1;
        if regime >= BIT_OFFSET_NBR {
            return Err(DecompressError::InvalidStream);
        }
    }
    let long_bits = long_offset_bits(regime);

    let mut out = 0usize;
    put(dst, &mut out, r.read_byte()?)?;

    loop {
        if r.read_bit()? != 0 {
            // Literal.
            let byte = r.read_byte()?;
            put(dst, &mut out, byte)?;
            continue;
        }
        let len = match read_gamma(&mut r)? {
            None => {
                if r.read_bit()? == 0 {
                    // End marker.
                    break;
                }
                // Literal run.
                let run = usize::from(r.read_byte()?) + 1;
                for _ in 0..run {
                    let byte = r.read_byte()?;
                    put(dst, &mut out, byte)?;
                }
                continue;
            }
            Some(0) => return Err(DecompressError::InvalidStream),
            Some(len) => len,
        };

        // Back-reference.
        let distance = read_offset(&mut r, len, long_bits)? as usize;
        let len = len as usize;
        if distance > out {
            return Err(DecompressError::InvalidStream);
        }
        if out + len > dst.len() {
            return Err(DecompressError::OutputOverflow);
        }
        let from = out - distance;
        // Byte-by-byte: distance < len copies re-read freshly written bytes.
        for step in 0..len {
            dst[out + step] = dst[from + step];
        }
        out += len;
    }

    Ok(out)
}

#[inline]
fn put(dst: &mut [u8], out: &mut usize, value: u8) -> Result<(), DecompressError> {
    if *out >= dst.len() {
        return Err(DecompressError::OutputOverflow);
    }
    dst[*out] = value;
    *out += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::compress::compress;
    use crate::block::types::CompressOptions;

    #[test]
    fn empty_stream_decodes_to_nothing() {
        assert_eq!(decompress(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn single_byte_stream_decodes() {
        assert_eq!(decompress(&[0x00, 0x41, 0x00]).unwrap(), [0x41]);
    }

    #[test]
    fn overlong_selector_is_invalid() {
        // 0xFF opens with eight one-bits: regime out of range.
        assert_eq!(decompress(&[0xFF, 0xFF, 0x00]), Err(DecompressError::InvalidStream));
    }

    #[test]
    fn lone_selector_is_truncated() {
        // Selector consumed, then no byte remains for the raw first byte.
        assert_eq!(decompress(&[0x00]), Err(DecompressError::TruncatedStream));
    }

    #[test]
    fn overlapping_runs_reproduce() {
        let src = vec![7u8; 600];
        let opts = CompressOptions { fast: true, ..CompressOptions::default() };
        let compressed = compress(&src, &opts).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), src);
    }

    #[test]
    fn tight_destination_overflows() {
        let src = b"overflow check".to_vec();
        let compressed = compress(&src, &CompressOptions::default()).unwrap();
        let mut dst = vec![0u8; src.len() - 1];
        assert_eq!(
            decompress_into(&compressed, &mut dst),
            Err(DecompressError::OutputOverflow)
        );
    }

    #[test]
    fn oversized_input_is_rejected() {
        let src = vec![0u8; MAX_INPUT_SIZE + 1];
        assert_eq!(decompress(&src), Err(DecompressError::InputTooLarge));
    }
}
