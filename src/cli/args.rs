//! Command-line argument parsing for the `dan3` tool.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit tests).
//! Short options may be aggregated (e.g. `-dfv`).  A bare `--` marks the end
//! of options; all subsequent arguments are treated as file paths regardless
//! of whether they start with `-`.
//!
//! Bad or unrecognised options return an `Err` whose message begins with
//! `"bad usage: "`.

use anyhow::{anyhow, Result};

use crate::block::types::{BIT_OFFSET_MAX, BIT_OFFSET_MIN, CompressOptions};
use crate::cli::constants::{set_display_level, DAN3_EXTENSION};
use crate::cli::help::{print_long_help, print_usage_advanced, print_version};
use crate::config;

/// Resolved operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Compress,
    Decompress,
    /// Decompress and discard, verifying integrity only.
    Test,
}

/// Complete set of options and filenames produced by the argument loop.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Resolved operation mode.
    pub op_mode: OpMode,
    /// Codec options assembled from `-b#` / `-n` / `-s` and the defaults.
    pub options: CompressOptions,
    /// Overwrite existing destination files without prompting.
    pub force_overwrite: bool,
    /// Input filename.
    pub input: Option<String>,
    /// Output filename (`None` = derive from the input name).
    pub output: Option<String>,
    /// When `true`, a help/version flag was processed; the caller should
    /// exit 0 without performing any I/O operation.
    pub exit_early: bool,
    /// Program name (argv[0] basename), used by help functions.
    pub program: String,
}

/// Parse `std::env::args()`.
pub fn parse_args() -> Result<ParsedArgs> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args)
}

/// Parse an explicit argument vector (`args[0]` is the program name).
pub fn parse_args_from(args: &[String]) -> Result<ParsedArgs> {
    let program = args
        .first()
        .map(|a| {
            a.rsplit(['/', '\\'])
                .next()
                .unwrap_or(a.as_str())
                .to_owned()
        })
        .unwrap_or_else(|| "dan3".to_owned());

    let mut mode: Option<OpMode> = None;
    let mut options = CompressOptions {
        max_offset_bits: config::default_max_offset_bits(),
        rle: config::RLE_DEFAULT,
        fast: config::FAST_DEFAULT,
    };
    let mut force_overwrite = false;
    let mut exit_early = false;
    let mut display = 2u32;
    let mut files: Vec<String> = Vec::new();
    let mut no_more_options = false;

    for arg in &args[1..] {
        if no_more_options || !arg.starts_with('-') || arg == "-" {
            files.push(arg.clone());
            continue;
        }
        if arg == "--" {
            no_more_options = true;
            continue;
        }

        let mut chars = arg[1..].chars().peekable();
        while let Some(flag) = chars.next() {
            match flag {
                'z' => mode = Some(OpMode::Compress),
                'd' => mode = Some(OpMode::Decompress),
                't' => mode = Some(OpMode::Test),
                'f' => force_overwrite = true,
                'n' => options.rle = false,
                's' => options.fast = true,
                'v' => display = (display + 1).min(4),
                'q' => display = display.saturating_sub(1),
                'V' => {
                    print_version();
                    exit_early = true;
                }
                'h' => {
                    print_usage_advanced(&program);
                    exit_early = true;
                }
                'H' => {
                    print_long_help(&program);
                    exit_early = true;
                }
                'b' => {
                    let mut digits = String::new();
                    while let Some(d) = chars.peek().copied() {
                        if !d.is_ascii_digit() {
                            break;
                        }
                        digits.push(d);
                        chars.next();
                    }
                    let bits: u32 = digits
                        .parse()
                        .map_err(|_| anyhow!("bad usage: -b requires a bit count (9-16)"))?;
                    if !(BIT_OFFSET_MIN..=BIT_OFFSET_MAX).contains(&bits) {
                        return Err(anyhow!(
                            "bad usage: -b{bits} out of range ({BIT_OFFSET_MIN}-{BIT_OFFSET_MAX})"
                        ));
                    }
                    options.max_offset_bits = bits;
                }
                other => return Err(anyhow!("bad usage: unknown option -{other}")),
            }
        }
    }

    set_display_level(display);

    if files.len() > 2 {
        return Err(anyhow!("bad usage: too many filenames"));
    }
    let mut files = files.into_iter();
    let input = files.next();
    let output = files.next();

    // Without an explicit mode, the input extension decides.
    let op_mode = mode.unwrap_or_else(|| match &input {
        Some(name) if name.ends_with(DAN3_EXTENSION) => OpMode::Decompress,
        _ => OpMode::Compress,
    });

    Ok(ParsedArgs { op_mode, options, force_overwrite, input, output, exit_early, program })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ParsedArgs> {
        let owned: Vec<String> =
            std::iter::once("dan3").chain(args.iter().copied()).map(String::from).collect();
        parse_args_from(&owned)
    }

    #[test]
    fn defaults_compress_with_full_window() {
        let parsed = parse(&["rom.bin"]).unwrap();
        assert_eq!(parsed.op_mode, OpMode::Compress);
        assert_eq!(parsed.options, CompressOptions::default());
        assert_eq!(parsed.input.as_deref(), Some("rom.bin"));
        assert_eq!(parsed.output, None);
        assert!(!parsed.force_overwrite);
    }

    #[test]
    fn dan3_extension_implies_decompression() {
        let parsed = parse(&["rom.bin.dan3"]).unwrap();
        assert_eq!(parsed.op_mode, OpMode::Decompress);
        // ...unless compression is forced.
        let parsed = parse(&["-z", "rom.bin.dan3"]).unwrap();
        assert_eq!(parsed.op_mode, OpMode::Compress);
    }

    #[test]
    fn aggregated_short_options() {
        let parsed = parse(&["-dfs", "a.dan3", "b"]).unwrap();
        assert_eq!(parsed.op_mode, OpMode::Decompress);
        assert!(parsed.force_overwrite);
        assert!(parsed.options.fast);
        assert_eq!(parsed.output.as_deref(), Some("b"));
    }

    #[test]
    fn offset_bits_option() {
        assert_eq!(parse(&["-b12", "f"]).unwrap().options.max_offset_bits, 12);
        assert!(parse(&["-b8", "f"]).is_err());
        assert!(parse(&["-b17", "f"]).is_err());
        assert!(parse(&["-b", "f"]).is_err());
    }

    #[test]
    fn rle_toggle() {
        assert!(!parse(&["-n", "f"]).unwrap().options.rle);
    }

    #[test]
    fn double_dash_ends_options() {
        let parsed = parse(&["--", "-weird", "-out"]).unwrap();
        assert_eq!(parsed.input.as_deref(), Some("-weird"));
        assert_eq!(parsed.output.as_deref(), Some("-out"));
    }

    #[test]
    fn unknown_option_is_bad_usage() {
        let err = parse(&["-x"]).unwrap_err();
        assert!(err.to_string().starts_with("bad usage: "));
    }

    #[test]
    fn three_filenames_are_rejected() {
        assert!(parse(&["a", "b", "c"]).is_err());
    }
}
