//! E2E Test Suite 04: CLI integration
//!
//! Drives the `dan3` binary as a black box with std::process::Command:
//! compress/decompress dispatch, output naming, exit codes, test mode, and
//! overwrite protection.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `dan3` binary produced by Cargo.
fn dan3_bin() -> PathBuf {
    // CARGO_BIN_EXE_dan3 is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_dan3") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("dan3");
    p
}

/// Create a TempDir containing a tile-like input file of ~4 KB.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("tiles.bin");
    let content: Vec<u8> = (0u32..4096).map(|i| ((i / 7) % 13) as u8).collect();
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

// ── 1. Compress / decompress roundtrip with default naming ───────────────────

#[test]
fn test_cli_roundtrip_default_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let status = Command::new(dan3_bin())
        .arg(input.to_str().unwrap())
        .current_dir(dir.path())
        .status()
        .expect("failed to run dan3 compress");
    assert!(status.success(), "compress step should exit 0");

    let compressed = dir.path().join("tiles.bin.dan3");
    assert!(compressed.exists(), "default output name should be input + .dan3");
    assert!(fs::metadata(&compressed).unwrap().len() < original.len() as u64);

    // Decompressing the .dan3 file restores the stripped name; the original
    // is already present, so overwrite requires -f.
    let status = Command::new(dan3_bin())
        .args(["-f", compressed.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .expect("failed to run dan3 decompress");
    assert!(status.success(), "decompress step should exit 0");

    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 2. Explicit output names and option flags ────────────────────────────────

#[test]
fn test_cli_explicit_names_and_options() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let packed = dir.path().join("packed");
    let unpacked = dir.path().join("unpacked");

    let status = Command::new(dan3_bin())
        .args(["-z", "-b12", "-s", input.to_str().unwrap(), packed.to_str().unwrap()])
        .status()
        .expect("run compress");
    assert!(status.success());

    let status = Command::new(dan3_bin())
        .args(["-d", packed.to_str().unwrap(), unpacked.to_str().unwrap()])
        .status()
        .expect("run decompress");
    assert!(status.success());

    assert_eq!(fs::read(&unpacked).unwrap(), original);
    drop(dir);
}

// ── 3. Test mode verifies without producing output ───────────────────────────

#[test]
fn test_cli_test_mode() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("packed.dan3");

    assert!(Command::new(dan3_bin())
        .args([input.to_str().unwrap(), packed.to_str().unwrap()])
        .status()
        .unwrap()
        .success());

    let before = fs::read_dir(dir.path()).unwrap().count();
    assert!(Command::new(dan3_bin())
        .args(["-t", packed.to_str().unwrap()])
        .status()
        .unwrap()
        .success());
    let after = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(before, after, "-t must not create files");

    // A corrupt stream must fail the test mode.
    let mut bytes = fs::read(&packed).unwrap();
    bytes.truncate(bytes.len() / 2);
    fs::write(&packed, &bytes).unwrap();
    assert!(!Command::new(dan3_bin())
        .args(["-q", "-t", packed.to_str().unwrap()])
        .status()
        .unwrap()
        .success());
}

// ── 4. Exit codes: missing input, bad usage, overwrite refusal ───────────────

#[test]
fn test_cli_failure_exit_codes() {
    let dir = TempDir::new().unwrap();

    // Missing input file.
    assert!(!Command::new(dan3_bin())
        .args(["-q", dir.path().join("absent").to_str().unwrap()])
        .status()
        .unwrap()
        .success());

    // Unknown option.
    assert!(!Command::new(dan3_bin()).args(["-x"]).status().unwrap().success());

    // No filename at all.
    assert!(!Command::new(dan3_bin()).arg("-q").status().unwrap().success());
}

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let target = dir.path().join("tiles.bin.dan3");
    fs::write(&target, b"precious").unwrap();

    // stdin is not a terminal here, so the prompt is refused automatically.
    let status = Command::new(dan3_bin())
        .args(["-q", input.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(!status.success(), "must not clobber without -f");
    assert_eq!(fs::read(&target).unwrap(), b"precious");

    // With -f the file is replaced.
    assert!(Command::new(dan3_bin())
        .args(["-f", "-q", input.to_str().unwrap()])
        .status()
        .unwrap()
        .success());
    assert_ne!(fs::read(&target).unwrap(), b"precious");
}

// ── 5. Version and help exit cleanly ─────────────────────────────────────────

#[test]
fn test_cli_version_and_help() {
    assert!(Command::new(dan3_bin()).arg("-V").status().unwrap().success());
    assert!(Command::new(dan3_bin()).arg("-h").status().unwrap().success());
    assert!(Command::new(dan3_bin()).arg("-H").status().unwrap().success());
}
