// DAN3 — optimal-parse LZSS codec and CLI

pub mod block;
pub mod cli;
pub mod config;
pub mod io;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// One-shot compression into a fresh buffer.
pub use block::compress::compress;
/// One-shot compression into a caller-supplied buffer.
pub use block::compress::compress_into;
/// One-shot decompression into a fresh buffer.
pub use block::decompress::decompress;
/// One-shot decompression into a caller-supplied buffer.
pub use block::decompress::decompress_into;

/// Error type for compression operations.
pub use block::compress::CompressError;
/// Error type for decompression operations.
pub use block::decompress::DecompressError;

/// Caller-supplied compression options (`max_offset_bits`, `rle`, `fast`).
pub use block::types::CompressOptions;

/// Worst-case compressed size for a given input size.
pub use block::types::compress_bound;

/// Maximum input size for a single DAN3 block (1 MiB).
pub use block::types::MAX_INPUT_SIZE;

// ─────────────────────────────────────────────────────────────────────────────
// Version API
// ─────────────────────────────────────────────────────────────────────────────

pub const DAN3_VERSION_MAJOR: i32 = 1;
pub const DAN3_VERSION_MINOR: i32 = 0;
pub const DAN3_VERSION_RELEASE: i32 = 0;
pub const DAN3_VERSION_STRING: &str = "1.0.0";

/// Returns the library version string (e.g. `"1.0.0"`).
pub fn version_string() -> &'static str {
    DAN3_VERSION_STRING
}
