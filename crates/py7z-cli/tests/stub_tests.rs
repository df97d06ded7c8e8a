//! End-to-end tests against a stub `7z` shell script.
//!
//! The stub is selected through `PY7Z_7Z_PATH`, prints or records the
//! arguments it receives, and exits with `STUB_EXIT` (default 0).

#![cfg(unix)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A stub executable in its own temporary directory.
struct Stub {
    dir: TempDir,
    path: PathBuf,
}

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("7z");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("failed to write stub");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("failed to mark stub executable");
    path
}

impl Stub {
    fn new(body: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = write_script(dir.path(), body);
        Self { dir, path }
    }

    /// Prints each argument on its own line.
    fn echo() -> Self {
        Self::new("for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done\nexit \"${STUB_EXIT:-0}\"")
    }

    /// Records its arguments in `args.txt`, then prints `fixture`.
    fn listing(fixture: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let record = dir.path().join("args.txt");
        let body = format!(
            "for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > '{}'\ncat '{}'\nexit \"${{STUB_EXIT:-0}}\"",
            record.display(),
            fixture_path(fixture).display()
        );
        let path = write_script(dir.path(), &body);
        Self { dir, path }
    }

    fn recorded_args(&self) -> String {
        fs::read_to_string(self.dir.path().join("args.txt")).expect("stub was not run")
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("py7z");
        cmd.env("PY7Z_7Z_PATH", &self.path);
        cmd
    }
}

fn lines(args: &[&str]) -> String {
    args.iter().map(|a| format!("{a}\n")).collect()
}

#[test]
fn test_add_forwards_translated_arguments() {
    let stub = Stub::echo();
    stub.cmd()
        .args(["add", "-c", "9", "--pass", "-mqs=on", "-t", "7z", "out.7z", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["a", "-mx=9", "-mqs=on", "-t7z", "--", "out.7z", "docs"])));
}

#[test]
fn test_extract_keyword_first_regardless_of_flag_order() {
    let stub = Stub::echo();
    stub.cmd()
        .args(["extract", "archive.7z", "--out-dir", "/tmp/x"])
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["x", "-o/tmp/x", "--", "archive.7z"])));
}

#[test]
fn test_operands_starting_with_dash_follow_separator() {
    let stub = Stub::echo();
    stub.cmd()
        .args(["x", "--", "-weird.7z"])
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["x", "--", "-weird.7z"])));
}

#[test]
fn test_exit_code_is_forwarded() {
    let stub = Stub::echo();
    for code in [1, 2, 7, 255] {
        stub.cmd()
            .env("STUB_EXIT", code.to_string())
            .args(["x", "archive.7z"])
            .assert()
            .code(code)
            .stderr(predicate::str::is_empty());
    }
}

#[test]
fn test_password_is_masked_in_logs() {
    let stub = Stub::echo();
    stub.cmd()
        .env("PY7Z_LOG", "debug")
        .args(["x", "-p", "hunter2", "a.7z"])
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["x", "-phunter2", "--", "a.7z"])))
        .stderr(predicate::str::contains("executing 7-Zip"))
        .stderr(predicate::str::contains("-p***"))
        .stderr(predicate::str::contains("hunter2").not());
}

#[test]
fn test_relative_override_resolves_against_current_dir() {
    let stub = Stub::echo();
    let mut cmd = cargo_bin_cmd!("py7z");
    cmd.current_dir(stub.dir.path())
        .env("PY7Z_7Z_PATH", "./7z")
        .args(["x", "a.7z"])
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["x", "--", "a.7z"])));
}

#[test]
fn test_hash_translation() {
    let stub = Stub::echo();
    stub.cmd()
        .args(["hash", "-a", "crc32", "a.bin"])
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["h", "-ba", "-bd", "-bsp0", "-scrccrc32", "--", "a.bin"])));
}

#[test]
fn test_hash_archive_contents_needs_one_file() {
    let stub = Stub::echo();
    stub.cmd()
        .args(["hash", "--archive-contents", "a.7z", "b.7z"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("exactly 1 file"));
}

#[test]
fn test_ls_prints_names() {
    let stub = Stub::listing("list_docs.txt");
    stub.cmd()
        .args(["ls", "docs.7z"])
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["docs", "docs/readme.txt", "docs/release notes.md"])));

    assert_eq!(stub.recorded_args(), lines(&["l", "-bd", "-sccUTF-8", "--", "docs.7z"]));
}

#[test]
fn test_ls_null_terminated_files_only() {
    let stub = Stub::listing("list_docs.txt");
    stub.cmd()
        .args(["list", "-0", "--type", "file", "docs.7z"])
        .assert()
        .success()
        .stdout("docs/readme.txt\0docs/release notes.md\0");
}

#[test]
fn test_ls_long_format() {
    let stub = Stub::listing("list_docs.txt");
    stub.cmd()
        .args(["ls", "-l", "docs.7z"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "file\t....A\t2024-01-15 10:30:00\t12\t192\tdocs/readme.txt\n",
        ))
        .stdout(predicate::str::contains("Total: 2 files, 1 folders, 1,036"));
}

#[test]
fn test_ls_long_totals_follow_type_filter() {
    let stub = Stub::listing("list_docs.txt");
    stub.cmd()
        .args(["ls", "-l", "--type", "dir", "docs.7z"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "dir\tD....\t2024-01-15 10:30:00\t0\t0\tdocs\n\nTotal: 0 files, 1 folders, 0\n",
        ));

    stub.cmd()
        .args(["ls", "-l", "--type", "file", "docs.7z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 files, 0 folders, 1,036\n"));
}

#[test]
fn test_ls_raw_passes_listing_through() {
    let stub = Stub::echo();
    stub.cmd()
        .args(["ls", "--raw", "-i", "*.txt", "docs.7z"])
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&[
            "l", "-bd", "-sccUTF-8", "-ir!*.txt", "--", "docs.7z",
        ])));

    stub.cmd()
        .env("STUB_EXIT", "2")
        .args(["ls", "--raw", "docs.7z"])
        .assert()
        .code(2)
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_ls_json_output() {
    let stub = Stub::listing("list_docs.txt");
    let output = stub.cmd().args(["ls", "--json", "docs.7z"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "list");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["archive_type"], "7z");
    assert_eq!(value["data"]["entries"].as_array().unwrap().len(), 3);
    assert_eq!(value["data"]["entries"][2]["path"], "docs/release notes.md");
    assert_eq!(value["data"]["entries"][1]["modified"], "2024-01-15T10:30:00");
    assert_eq!(value["data"]["summary"]["folders"], 1);
}

#[test]
fn test_ls_filters_are_forwarded() {
    let stub = Stub::listing("list_docs.txt");
    stub.cmd()
        .args(["ls", "-i", "*.txt", "-x", "tmp/*", "docs.7z"])
        .assert()
        .success();

    assert_eq!(
        stub.recorded_args(),
        lines(&["l", "-bd", "-sccUTF-8", "-ir!*.txt", "-xr!tmp/*", "--", "docs.7z"])
    );
}

#[test]
fn test_ls_truncated_output_is_malformed() {
    let stub = Stub::listing("list_truncated.txt");
    stub.cmd()
        .args(["ls", "docs.7z"])
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed listing output"));
}

#[test]
fn test_ls_failure_reports_listing_failed() {
    let stub = Stub::new("echo 'ERROR: docs.7z : Can not open the file as archive' >&2\nexit 2");
    stub.cmd()
        .args(["ls", "docs.7z"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Can not open the file as archive"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_ls_failure_with_json_reports_error_envelope() {
    let stub = Stub::new("echo 'ERROR: broken' >&2\nexit 2");
    let output = stub.cmd().args(["ls", "--json", "docs.7z"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "error");
    assert!(value["error"].as_str().unwrap().contains("broken"));
}

#[test]
fn test_override_that_is_not_executable() {
    let stub = Stub::echo();
    fs::set_permissions(&stub.path, fs::Permissions::from_mode(0o644)).unwrap();
    stub.cmd().args(["x", "a.7z"]).assert().code(127);
}
