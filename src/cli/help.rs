// cli/help.rs — usage, long help, and the version banner.

use crate::cli::constants::{AUTHOR, COMPRESSOR_NAME, DAN3_EXTENSION};
use crate::DAN3_VERSION_STRING;

/// Print the welcome/version banner to stderr.
pub fn print_version() {
    eprintln!(
        "*** {} v{} {}-bit, by {} ***",
        COMPRESSOR_NAME,
        DAN3_VERSION_STRING,
        usize::BITS,
        AUTHOR
    );
}

/// Print brief usage to stderr.
pub fn print_usage(program: &str) {
    eprintln!("Usage : ");
    eprintln!("      {} [arg] [input] [output] ", program);
    eprintln!();
    eprintln!("input   : a filename (at most 1 MiB when compressing)");
    eprintln!("output  : a filename (default: input{} / stripped)", DAN3_EXTENSION);
    eprintln!("Arguments : ");
    eprintln!(" -z     : force compression (default for unrecognized extensions)");
    eprintln!(" -d     : decompression ");
    eprintln!(" -t     : test compressed file integrity");
    eprintln!(" -f     : overwrite output without prompting ");
    eprintln!(" -h/-H  : display help/long help and exit ");
}

/// Print advanced usage to stderr.
pub fn print_usage_advanced(program: &str) {
    print_version();
    print_usage(program);
    eprintln!();
    eprintln!("Advanced arguments :");
    eprintln!(" -V     : display version number and exit ");
    eprintln!(" -v     : verbose mode ");
    eprintln!(" -q     : suppress warnings; specify twice to suppress errors too");
    eprintln!(" -b#    : widest back-reference offset, in bits (9-16, default 16)");
    eprintln!(" -n     : disable the literal-run coder");
    eprintln!(" -s     : fast parse (speed over ratio inside constant runs)");
    eprintln!(" --     : treat all following arguments as filenames");
}

/// Print the long help to stderr.
pub fn print_long_help(program: &str) {
    print_usage_advanced(program);
    eprintln!();
    eprintln!("Compression ratio :");
    eprintln!("  The encoder performs an exhaustive optimal parse: for each input");
    eprintln!("  position it costs every viable literal, literal run, and");
    eprintln!("  back-reference under eight offset-width regimes, then emits the");
    eprintln!("  cheapest stream.  This is deliberately CPU-heavy; payloads are");
    eprintln!("  expected to be small (ROMs, graphic tiles).");
    eprintln!();
    eprintln!("  -b# narrows the regimes considered.  Smaller windows can help");
    eprintln!("  decoders on constrained targets; they never help ratio.");
    eprintln!();
    eprintln!("  -s extends a constant run one byte at a time instead of");
    eprintln!("  re-searching it, which may miss the optimal parse inside the run.");
    eprintln!();
    eprintln!("Output naming :");
    eprintln!("  compress   : file        -> file{}", DAN3_EXTENSION);
    eprintln!("  decompress : file{} -> file", DAN3_EXTENSION);
    eprintln!("  decompress : file.other  -> file.other.bin");
}
