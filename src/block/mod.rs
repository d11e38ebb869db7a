//! The DAN3 block codec.
//!
//! Submodules, leaves first: split-cursor bit I/O, the variable-length
//! integer codes, the two-byte match index, the per-regime cost table, and
//! the encoder / decoder built on top of them.

pub mod compress;
pub mod decompress;
pub mod types;

mod bitio;
mod codes;
mod matches;
mod optimal;

pub use compress::{compress, compress_into, CompressError};
pub use decompress::{decompress, decompress_into, DecompressError};
pub use types::{compress_bound, CompressOptions, MAX_INPUT_SIZE};
