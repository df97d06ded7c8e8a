//! Integration tests for py7z-cli that do not need a 7-Zip executable.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn py7z_cmd() -> Command {
    cargo_bin_cmd!("py7z")
}

#[test]
fn test_version_flag() {
    py7z_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("py7z"));
}

#[test]
fn test_help_flag() {
    py7z_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("7-Zip"))
        .stdout(predicate::str::contains("PY7Z_7Z_PATH"));
}

#[test]
fn test_add_help_lists_friendly_options() {
    py7z_cmd()
        .args(["add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--compression-level"))
        .stdout(predicate::str::contains("--pass"));
}

#[test]
fn test_unknown_archive_format_is_usage_error() {
    py7z_cmd()
        .args(["add", "--archive-format", "rar", "out.rar", "docs"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rar"));
}

#[test]
fn test_bad_solid_block_size_is_usage_error() {
    py7z_cmd()
        .args(["add", "--solid-block-size", "64", "out.7z"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_archive_operand_is_usage_error() {
    py7z_cmd().arg("extract").assert().code(2);
}

#[test]
fn test_override_to_missing_file_is_not_found() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let missing = temp.path().join("no-such-7z");

    py7z_cmd()
        .env("PY7Z_7Z_PATH", &missing)
        .args(["x", "archive.7z"])
        .assert()
        .code(127)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("HINT: PY7Z_7Z_PATH is set to"));
}

#[test]
fn test_nothing_on_search_path_is_not_found() {
    let empty = TempDir::new().expect("failed to create temp dir");

    py7z_cmd()
        .env_remove("PY7Z_7Z_PATH")
        .env("PATH", empty.path())
        .args(["ls", "archive.7z"])
        .assert()
        .code(127)
        .stderr(predicate::str::contains("7z, 7zz, 7za"));
}

#[test]
fn test_override_to_directory_is_not_found() {
    let temp = TempDir::new().expect("failed to create temp dir");

    py7z_cmd()
        .env("PY7Z_7Z_PATH", temp.path())
        .args(["hash", "file.bin"])
        .assert()
        .code(127);
}

#[test]
fn test_completion_bash() {
    py7z_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("py7z"));
}
