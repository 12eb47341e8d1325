use assert_cmd::Command;
use clap::Parser;
use hashverify::config::{CheckConfig, CliArgs, Comparison, HashAlgorithm};
use hashverify::core::{IntegrityChecker, Verdict};
use std::ffi::OsString;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_cli_defaults() {
    let cli = CliArgs::parse_from(["hashverify", "image.iso", "-p", "abc"]);

    assert_eq!(cli.source_file, PathBuf::from("image.iso"));
    assert_eq!(cli.algorithm, HashAlgorithm::Md5);
    assert_eq!(cli.threads, None);
    assert_eq!(cli.provided_hash.as_deref(), Some("abc"));
    assert_eq!(cli.copy_file, None);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn test_cli_long_flags() {
    let cli = CliArgs::parse_from([
        "hashverify",
        "image.iso",
        "--algorithm",
        "sha256",
        "--threads",
        "8",
        "--copy-file",
        "backup.iso",
    ]);

    assert_eq!(cli.algorithm, HashAlgorithm::Sha256);
    assert_eq!(cli.threads, Some(8));
    assert_eq!(cli.copy_file, Some(PathBuf::from("backup.iso")));
}

#[test]
fn test_cli_negative_threads() {
    let cli = CliArgs::parse_from(["hashverify", "a", "-t", "-2", "-p", "abc"]);
    assert_eq!(cli.threads, Some(-2));

    let config = CheckConfig::from_cli(&cli, Some(8)).unwrap();
    assert_eq!(config.threads.workers, 4);
}

#[test]
fn test_cli_requires_a_comparator() {
    let result = CliArgs::try_parse_from(["hashverify", "image.iso"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_comparators_are_exclusive() {
    let result = CliArgs::try_parse_from(["hashverify", "image.iso", "-p", "abc", "-c", "copy.iso"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_unknown_algorithm() {
    let result = CliArgs::try_parse_from(["hashverify", "image.iso", "-a", "sha1", "-p", "abc"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_requires_source() {
    let result = CliArgs::try_parse_from(["hashverify", "-p", "abc"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_end_to_end_copy() {
    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("a.bin");
    let copy = dir.path().join("b.bin");
    std::fs::write(&source, b"byte-for-byte").unwrap();
    std::fs::write(&copy, b"byte-for-byte").unwrap();

    let argv: Vec<OsString> = vec![
        "hashverify".into(),
        source.clone().into(),
        "-c".into(),
        copy.clone().into(),
    ];
    let cli = CliArgs::parse_from(argv);
    let config = CheckConfig::from_cli(&cli, Some(2)).unwrap();
    hashverify::config::validate(&config).unwrap();
    assert_eq!(config.comparison, Comparison::CopyFile(copy));

    let report = IntegrityChecker::from_config(&config)
        .check(&config.source, &config.comparison)
        .unwrap();
    assert_eq!(report.verdict, Verdict::MatchesCopyFile);
}

#[test]
fn test_cli_missing_source_is_validation_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("missing.bin");

    let argv: Vec<OsString> = vec!["hashverify".into(), source.clone().into(), "-p".into(), "abc".into()];
    let cli = CliArgs::parse_from(argv);
    let config = CheckConfig::from_cli(&cli, Some(2)).unwrap();
    let err = hashverify::config::validate(&config).unwrap_err();

    assert!(err.is_precondition());
    assert!(err.to_string().starts_with("The specified source file does not exist"));
}

fn hashverify() -> Command {
    let mut cmd = Command::cargo_bin("hashverify").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Run with the given comparator flag and expect a single `Error: ` line
fn assert_error_line(source: &Path, flag: &str, value: &std::ffi::OsStr, prefix: &str) {
    let assert = hashverify().arg(source).arg(flag).arg(value).assert().code(2);
    let stdout = stdout_of(&assert);

    assert_eq!(stdout.lines().count(), 1, "{:?}", stdout);
    assert!(stdout.starts_with(prefix), "{:?}", stdout);
}

#[test]
fn test_binary_matches_provided_hash() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "a.bin", b"download payload");
    let digest = hashverify::hash::hash_bytes(b"download payload", HashAlgorithm::Md5).hash;

    hashverify()
        .arg(&source)
        .args(["-p", digest.as_str()])
        .assert()
        .code(0)
        .stdout("Source file hash matches provided hash.\n");
}

#[test]
fn test_binary_matches_copy_file() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "a.bin", b"backup payload");
    let copy = write(&dir, "b.bin", b"backup payload");

    hashverify()
        .arg(&source)
        .args(["-a", "sha256", "-c"])
        .arg(&copy)
        .assert()
        .code(0)
        .stdout("Source file hash matches copy file hash.\n");
}

#[test]
fn test_binary_mismatch() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "a.bin", b"original");
    let copy = write(&dir, "b.bin", b"modified");

    hashverify()
        .arg(&source)
        .arg("-c")
        .arg(&copy)
        .assert()
        .code(1)
        .stdout("Source file hash does not match provided hash or copy file hash.\n");
}

#[test]
fn test_binary_missing_source() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("missing.bin");

    assert_error_line(
        &source,
        "-p",
        "abc".as_ref(),
        "Error: The specified source file does not exist",
    );
}

#[test]
fn test_binary_unreadable_copy() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "a.bin", b"data");
    let subdir = dir.path().join("not-a-file");
    std::fs::create_dir(&subdir).unwrap();

    assert_error_line(&source, "-c", subdir.as_os_str(), "Error: I/O error at");
}

#[test]
fn test_binary_empty_provided_hash() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "a.bin", b"data");

    assert_error_line(
        &source,
        "-p",
        "".as_ref(),
        "Error: Either a copy file or a provided hash must be specified.",
    );
}

#[test]
fn test_binary_logs_stay_on_stderr() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "a.bin", b"same");
    let copy = write(&dir, "b.bin", b"same");

    hashverify()
        .arg(&source)
        .arg("-vv")
        .arg("-c")
        .arg(&copy)
        .assert()
        .code(0)
        .stdout("Source file hash matches copy file hash.\n")
        .stderr(predicate::str::contains("hashed file"));
}

#[test]
fn test_binary_quiet_stderr_by_default() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "a.bin", b"same");
    let copy = write(&dir, "b.bin", b"same");

    hashverify()
        .arg(&source)
        .arg("-c")
        .arg(&copy)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
