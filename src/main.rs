//! Binary entry point for the `dan3` command-line tool.
//!
//! Control flow: parse arguments, resolve the operation mode, dispatch to
//! the file-level operation, map any failure to a non-zero exit code.

use dan3::cli::args::{parse_args, OpMode, ParsedArgs};
use dan3::cli::help::print_usage;
use dan3::displaylevel;
use dan3::io::{compress_filename, decompress_filename, test_filename};

/// Execute the operation selected by argument parsing.
/// Returns the process exit code (0 = success, non-zero = error).
fn run(args: ParsedArgs) -> i32 {
    if args.exit_early {
        return 0;
    }

    let Some(input) = args.input.as_deref() else {
        print_usage(&args.program);
        return 1;
    };

    let result = match args.op_mode {
        OpMode::Compress => {
            compress_filename(input, args.output.as_deref(), &args.options, args.force_overwrite)
        }
        OpMode::Decompress => {
            decompress_filename(input, args.output.as_deref(), args.force_overwrite)
        }
        OpMode::Test => test_filename(input),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            displaylevel!(1, "{}: error: {:#}\n", args.program, err);
            1
        }
    }
}

fn main() {
    let code = match parse_args() {
        Ok(args) => run(args),
        Err(err) => {
            eprintln!("{err}");
            1
        }
    };
    std::process::exit(code);
}
