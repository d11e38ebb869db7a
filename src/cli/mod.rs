//! Command-line front end: argument parsing, help text, display plumbing.

pub mod args;
pub mod constants;
pub mod help;
