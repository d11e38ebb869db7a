// config.rs — Compile-time configuration defaults for the dan3 tool.
//
// Runtime options flow through `CompressOptions`; nothing here is process
// state.  The environment override exists so build scripts that invoke the
// tool in bulk can pin a window width without editing every command line.

use crate::block::types::{BIT_OFFSET_MAX, BIT_OFFSET_MIN};

/// Default widest long-offset regime, in bits.
/// Can be overridden by the `DAN3_MAXBITS` environment variable at runtime,
/// or by the `-b#` command-line flag.
pub const MAXBITS_DEFAULT: u32 = BIT_OFFSET_MAX;

/// Literal-run coding is on unless `-n` disables it.
pub const RLE_DEFAULT: bool = true;

/// Full optimal parse by default; `-s` trades ratio for speed.
pub const FAST_DEFAULT: bool = false;

/// Environment variable consulted for the default of `-b#`.
pub const MAXBITS_ENV: &str = "DAN3_MAXBITS";

/// Resolve the default max-offset-bits, honoring `DAN3_MAXBITS` when it
/// parses as an integer (clamped to 9..=16; anything else is ignored).
pub fn default_max_offset_bits() -> u32 {
    match std::env::var(MAXBITS_ENV) {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(bits) => bits.clamp(BIT_OFFSET_MIN, BIT_OFFSET_MAX),
            Err(_) => MAXBITS_DEFAULT,
        },
        Err(_) => MAXBITS_DEFAULT,
    }
}
