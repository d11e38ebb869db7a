//! File-level operations for the `dan3` binary.
//!
//! Whole-file in, whole-file out: the codec is a single-block format, so
//! each operation reads the entire source into memory, runs the in-memory
//! codec, and writes the result in one piece.  Streaming is deliberately
//! absent.

use std::fs;
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::block::compress::compress;
use crate::block::decompress::decompress;
use crate::block::types::{CompressOptions, MAX_INPUT_SIZE};
use crate::cli::constants::{DAN3_EXTENSION, RAW_EXTENSION};
use crate::displaylevel;

// ─────────────────────────────────────────────────────────────────────────────
// Output-name derivation
// ─────────────────────────────────────────────────────────────────────────────

/// `file` → `file.dan3`
pub fn default_compressed_name(input: &str) -> String {
    format!("{input}{DAN3_EXTENSION}")
}

/// `file.dan3` → `file`; anything else → `file.other.bin`
pub fn default_decompressed_name(input: &str) -> String {
    match input.strip_suffix(DAN3_EXTENSION) {
        Some(stem) if !stem.is_empty() => stem.to_owned(),
        _ => format!("{input}{RAW_EXTENSION}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overwrite confirmation
// ─────────────────────────────────────────────────────────────────────────────

/// Refuse to clobber an existing `path` unless `force` is set or the user
/// confirms interactively.  A non-interactive session never overwrites.
fn check_overwrite(path: &str, force: bool) -> Result<()> {
    if force || !Path::new(path).exists() {
        return Ok(());
    }
    if !std::io::stdin().is_terminal() || !std::io::stderr().is_terminal() {
        bail!("{path} already exists; use -f to overwrite");
    }
    eprint!("{path} already exists; overwrite (y/N) ? ");
    std::io::stderr().flush().ok();
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer).context("reading confirmation")?;
    if !matches!(answer.trim(), "y" | "Y") {
        bail!("not overwriting {path}");
    }
    Ok(())
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read {path}"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `input` into `output` (default `input.dan3`).
pub fn compress_filename(
    input: &str,
    output: Option<&str>,
    options: &CompressOptions,
    force: bool,
) -> Result<()> {
    let data = read_input(input)?;
    if data.len() > MAX_INPUT_SIZE {
        bail!("{input}: {} bytes exceeds the {MAX_INPUT_SIZE}-byte block limit", data.len());
    }

    let output = output.map(str::to_owned).unwrap_or_else(|| default_compressed_name(input));
    check_overwrite(&output, force)?;

    let compressed =
        compress(&data, options).with_context(|| format!("compressing {input}"))?;
    fs::write(&output, &compressed).with_context(|| format!("cannot write {output}"))?;

    let ratio = if data.is_empty() { 0.0 } else { compressed.len() as f64 * 100.0 / data.len() as f64 };
    displaylevel!(
        2,
        "Compressed {} bytes into {} bytes ({:.2}%) : {}\n",
        data.len(),
        compressed.len(),
        ratio,
        output
    );
    Ok(())
}

/// Decompress `input` into `output` (default: strip `.dan3`, else append
/// `.bin`).
pub fn decompress_filename(input: &str, output: Option<&str>, force: bool) -> Result<()> {
    let data = read_input(input)?;

    let output = output.map(str::to_owned).unwrap_or_else(|| default_decompressed_name(input));
    check_overwrite(&output, force)?;

    let decoded = decompress(&data).map_err(|e| anyhow!("{input}: {e}"))?;
    fs::write(&output, &decoded).with_context(|| format!("cannot write {output}"))?;

    displaylevel!(
        2,
        "Decompressed {} bytes into {} bytes : {}\n",
        data.len(),
        decoded.len(),
        output
    );
    Ok(())
}

/// Decode `input` and discard the result, verifying stream integrity.
pub fn test_filename(input: &str) -> Result<()> {
    let data = read_input(input)?;
    let decoded = decompress(&data).map_err(|e| anyhow!("{input}: {e}"))?;
    displaylevel!(2, "{} : decoded {} bytes OK\n", input, decoded.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_name_appends_extension() {
        assert_eq!(default_compressed_name("tiles.bin"), "tiles.bin.dan3");
    }

    #[test]
    fn decompressed_name_strips_or_appends() {
        assert_eq!(default_decompressed_name("tiles.bin.dan3"), "tiles.bin");
        assert_eq!(default_decompressed_name("archive"), "archive.bin");
        // A bare ".dan3" would leave an empty name; fall back to appending.
        assert_eq!(default_decompressed_name(".dan3"), ".dan3.bin");
    }
}
