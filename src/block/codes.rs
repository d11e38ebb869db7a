//! Variable-length integer codes of the DAN3 bitstream.
//!
//! Two families live here:
//!
//! - the **Golomb-gamma** integer used for token lengths: a capped unary
//!   prefix of zero bits followed by the significant bits of `value + 1`.
//!   A full-length prefix (seven zeros) is not a number but the sentinel
//!   that introduces the end marker and the literal-run token.
//! - the **offset** forms used for back-reference distances, keyed by the
//!   token's length class and the distance magnitude:
//!
//!   | Length | Prefix | Payload                              | Distances        |
//!   |--------|--------|--------------------------------------|------------------|
//!   | 1      | `0`    | none                                 | 1                |
//!   | 1      | `1`    | 1 bit                                | 2..=3            |
//!   | > 1    | `1 0`  | 5 bits                               | 1..=32           |
//!   | > 1    | `0`    | byte-aligned byte                    | 33..=288         |
//!   | > 1    | `1 1`  | `long_bits − 8` bits + aligned byte  | 289..=regime max |
//!
//! Distances are 1-based; the wire carries `distance − 1` (minus the bucket
//! base).  The byte-aligned payloads rely on the split cursor of
//! [`super::bitio`].

use super::bitio::{BitReader, BitWriter};
use super::compress::CompressError;
use super::decompress::DecompressError;
use super::types::{
    BIT_GOLOMB_MAX, BIT_OFFSET0, BIT_OFFSET00, BIT_OFFSET1, BIT_OFFSET2, MAX_OFFSET00,
    MAX_OFFSET1, MAX_OFFSET2,
};

// ─────────────────────────────────────────────────────────────────────────────
// Golomb-gamma integers
// ─────────────────────────────────────────────────────────────────────────────

/// Emit `value` as a Golomb-gamma integer (valid range 0..=[`MAX_GAMMA`]).
///
/// [`MAX_GAMMA`]: super::types::MAX_GAMMA
pub(crate) fn write_gamma(w: &mut BitWriter<'_>, value: u32) -> Result<(), CompressError> {
    let v = value + 1;
    let mut i = 4u32;
    while i <= v {
        w.write_bit(0)?;
        i <<= 1;
    }
    i >>= 1;
    while i > 0 {
        w.write_bit(v & i)?;
        i >>= 1;
    }
    Ok(())
}

/// Emitted size of a Golomb-gamma integer, in bits.
#[inline]
pub(crate) fn gamma_bits(value: u32) -> u32 {
    let mut bits = 0;
    let mut v = value + 1;
    while v > 1 {
        bits += 2;
        v >>= 1;
    }
    bits
}

/// Decode a Golomb-gamma integer.  `None` is the sentinel prefix
/// ([`BIT_GOLOMB_MAX`] zeros), which carries no numeric value.
pub(crate) fn read_gamma(r: &mut BitReader<'_>) -> Result<Option<u32>, DecompressError> {
    let mut zeros = 0;
    while zeros < BIT_GOLOMB_MAX && r.read_bit()? == 0 {
        zeros += 1;
    }
    if zeros == BIT_GOLOMB_MAX {
        return Ok(None);
    }
    let mut v = 1u32;
    for _ in 0..=zeros {
        v = (v << 1) | r.read_bit()?;
    }
    Ok(Some(v - 1))
}

// ─────────────────────────────────────────────────────────────────────────────
// Offsets
// ─────────────────────────────────────────────────────────────────────────────

/// Emit a back-reference distance (1-based) for a token of length `len`.
/// `long_bits` is the stream's long-offset width (9..=16).
pub(crate) fn write_offset(
    w: &mut BitWriter<'_>,
    offset: u32,
    len: u32,
    long_bits: u32,
) -> Result<(), CompressError> {
    let v = offset - 1;
    if len == 1 {
        if v >= MAX_OFFSET00 {
            w.write_bit(1)?;
            w.write_bits(v - MAX_OFFSET00, BIT_OFFSET0)?;
        } else {
            w.write_bit(0)?;
            w.write_bits(v, BIT_OFFSET00)?;
        }
    } else if v >= MAX_OFFSET2 {
        w.write_bit(1)?;
        w.write_bit(1)?;
        let v = v - MAX_OFFSET2;
        w.write_bits(v >> BIT_OFFSET2, long_bits - BIT_OFFSET2)?;
        w.write_byte((v & 0xFF) as u8)?;
    } else if v >= MAX_OFFSET1 {
        w.write_bit(0)?;
        w.write_byte(((v - MAX_OFFSET1) & 0xFF) as u8)?;
    } else {
        w.write_bit(1)?;
        w.write_bit(0)?;
        w.write_bits(v, BIT_OFFSET1)?;
    }
    Ok(())
}

/// Decode a back-reference distance (1-based) for a token of length `len`.
pub(crate) fn read_offset(
    r: &mut BitReader<'_>,
    len: u32,
    long_bits: u32,
) -> Result<u32, DecompressError> {
    let v = if len == 1 {
        if r.read_bit()? != 0 {
            r.read_bit()? + MAX_OFFSET00
        } else {
            0
        }
    } else if r.read_bit()? == 0 {
        u32::from(r.read_byte()?) + MAX_OFFSET1
    } else if r.read_bit()? != 0 {
        let mut high = 0u32;
        for _ in 0..(long_bits - BIT_OFFSET2) {
            high = (high << 1) | r.read_bit()?;
        }
        ((high << BIT_OFFSET2) | u32::from(r.read_byte()?)) + MAX_OFFSET2
    } else {
        let mut v = 0u32;
        for _ in 0..BIT_OFFSET1 {
            v = (v << 1) | r.read_bit()?;
        }
        v
    };
    Ok(v + 1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Token costs
// ─────────────────────────────────────────────────────────────────────────────

/// Exact emitted size of a back-reference token, in bits: flag bit + gamma
/// length + offset prefix + offset payload.  Used by the parser's relaxation,
/// so it must agree with [`write_gamma`] + [`write_offset`] to the bit.
pub(crate) fn token_bits(offset: u32, len: u32, long_bits: u32) -> u32 {
    let bits = 1 + gamma_bits(len);
    if len == 1 {
        return bits + 1 + if offset > MAX_OFFSET00 { BIT_OFFSET0 } else { BIT_OFFSET00 };
    }
    let offset_cost = if offset > MAX_OFFSET2 {
        1 + long_bits
    } else if offset > MAX_OFFSET1 {
        BIT_OFFSET2
    } else {
        1 + BIT_OFFSET1
    };
    bits + 1 + offset_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::types::MAX_GAMMA;

    fn gamma_stream(value: u32) -> (Vec<u8>, usize) {
        let mut buf = vec![0u8; 8];
        let len = {
            let mut w = BitWriter::new(&mut buf);
            write_gamma(&mut w, value).unwrap();
            w.position()
        };
        buf.truncate(len);
        (buf, len)
    }

    #[test]
    fn gamma_bit_patterns() {
        // A four-one marker after the gamma code pins down its exact width.
        // value 0 → "01", value 1 → "10", value 2 → "11", value 3 → "0100"
        for (value, expected) in [
            (0u32, 0b0111_1100u8),
            (1, 0b1011_1100),
            (2, 0b1111_1100),
            (3, 0b0100_1111),
        ] {
            let mut buf = vec![0u8; 4];
            let used = {
                let mut w = BitWriter::new(&mut buf);
                write_gamma(&mut w, value).unwrap();
                w.write_bits(0xF, 4).unwrap();
                w.position()
            };
            assert_eq!(used, 1, "value {value}");
            assert_eq!(buf[0], expected, "value {value}");
        }
    }

    #[test]
    fn gamma_roundtrip_full_range() {
        for value in 0..=MAX_GAMMA {
            let (buf, _) = gamma_stream(value);
            let mut r = BitReader::new(&buf);
            assert_eq!(read_gamma(&mut r).unwrap(), Some(value));
        }
    }

    #[test]
    fn gamma_sentinel_is_not_a_number() {
        // Seven zero bits, then anything.
        let buf = [0b0000_0001];
        let mut r = BitReader::new(&buf);
        assert_eq!(read_gamma(&mut r).unwrap(), None);
        // The bit after the sentinel is left for the caller.
        assert_eq!(r.read_bit().unwrap(), 1);
    }

    #[test]
    fn gamma_bits_matches_decoder_consumption() {
        // Encode the value followed by a 9-bit tail pattern; the decoder must
        // consume exactly the encoded width for the tail to survive intact.
        for value in 1..=MAX_GAMMA {
            let mut buf = vec![0u8; 8];
            let used = {
                let mut w = BitWriter::new(&mut buf);
                write_gamma(&mut w, value).unwrap();
                w.write_bits(0x155, 9).unwrap();
                w.position()
            };
            let mut r = BitReader::new(&buf[..used]);
            assert_eq!(read_gamma(&mut r).unwrap(), Some(value));
            let mut tail = 0u32;
            for _ in 0..9 {
                tail = (tail << 1) | r.read_bit().unwrap();
            }
            assert_eq!(tail, 0x155, "value {value}");
        }
        assert_eq!(gamma_bits(1), 2);
        assert_eq!(gamma_bits(3), 4);
        assert_eq!(gamma_bits(MAX_GAMMA), 14);
    }

    #[test]
    fn offset_roundtrip_at_bucket_boundaries() {
        for long_bits in 9..=16u32 {
            let max = (1u32 << long_bits) + MAX_OFFSET2;
            let cases: &[(u32, u32)] = &[
                (1, 1),
                (2, 1),
                (3, 1),
                (1, 2),
                (32, 2),
                (33, 2),
                (288, 2),
                (289, 2),
                (max, 2),
                (4096.min(max), 17),
            ];
            for &(offset, len) in cases {
                let mut buf = vec![0u8; 8];
                let used = {
                    let mut w = BitWriter::new(&mut buf);
                    write_offset(&mut w, offset, len, long_bits).unwrap();
                    w.position()
                };
                let mut r = BitReader::new(&buf[..used]);
                assert_eq!(
                    read_offset(&mut r, len, long_bits).unwrap(),
                    offset,
                    "offset {offset} len {len} long_bits {long_bits}"
                );
            }
        }
    }

    #[test]
    fn token_bits_counts_prefix_and_payload() {
        // len 1: flag + gamma(1) + short-offset form
        assert_eq!(token_bits(1, 1, 16), 1 + 2 + 1);
        assert_eq!(token_bits(2, 1, 16), 1 + 2 + 1 + 1);
        // len > 1 buckets
        assert_eq!(token_bits(32, 4, 16), 1 + 4 + 1 + 1 + 5);
        assert_eq!(token_bits(33, 4, 16), 1 + 4 + 1 + 8);
        assert_eq!(token_bits(289, 4, 9), 1 + 4 + 1 + 1 + 9);
        assert_eq!(token_bits(289, 4, 16), 1 + 4 + 1 + 1 + 16);
    }
}
