//! Integration tests driving the mkpatch binary.
//!
//! These tests check path resolution, exit status, and output layout. Most of
//! them use `true` as the diff program so the output is only the preambles.

use std::{fs, path::Path, process::Command};

use assert_cmd::prelude::*;
use tempfile::tempdir;

fn mkpatch(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mkpatch"));
    cmd.current_dir(dir).env_remove("MKPATCH_DIFF");
    cmd
}

fn gnu_diff_available() -> bool {
    Command::new("diff")
        .arg("--version")
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains("GNU"))
        .unwrap_or(false)
}

/// Test: a directory walk yields only suffixed files, sorted
#[cfg(unix)]
#[test]
fn test_directory_pairs_in_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.py.orig"), "b\n").unwrap();
    fs::write(dir.path().join("b.py"), "B\n").unwrap();
    fs::write(dir.path().join("a.txt.orig"), "a\n").unwrap();
    fs::write(dir.path().join("a.txt"), "A\n").unwrap();
    fs::write(dir.path().join("c.txt"), "unrelated\n").unwrap();

    let output = mkpatch(dir.path())
        .args(["--diff-program", "true"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Index: a.txt\ntrue -u a.txt.orig a.txt\nIndex: b.py\ntrue -u -p b.py.orig b.py\n"
    );
}

/// Test: a missing path is a warning and a nonzero status, not a crash
#[test]
fn test_missing_path_exit_status() {
    let dir = tempdir().unwrap();

    let assert = mkpatch(dir.path()).arg("does-not-exist").assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("warning:"), "stderr was: {stderr}");
    assert!(stderr.contains("does-not-exist"), "stderr was: {stderr}");
    assert!(assert.get_output().stdout.is_empty());
}

/// Test: a path that is neither file nor directory is a warning and status 1
#[cfg(unix)]
#[test]
fn test_device_path_exit_status() {
    let dir = tempdir().unwrap();

    let assert = mkpatch(dir.path()).arg("/dev/null").assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(
        stderr.contains("warning: Not file nor directory: '/dev/null'"),
        "stderr was: {stderr}"
    );
    assert!(assert.get_output().stdout.is_empty());
}

/// Test: the remaining paths are still patched after a missing one
#[cfg(unix)]
#[test]
fn test_missing_path_does_not_stop_run() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Makefile.orig"), "all:\n").unwrap();
    fs::write(dir.path().join("Makefile"), "all: build\n").unwrap();

    let assert = mkpatch(dir.path())
        .args(["--diff-program", "true", "gone", "Makefile"])
        .assert()
        .code(1);
    assert_eq!(
        String::from_utf8_lossy(&assert.get_output().stdout),
        "Index: Makefile\ntrue -u Makefile.orig Makefile\n"
    );
}

/// Test: a fatal error stops the run with a message
#[test]
fn test_unreadable_read_file_is_fatal() {
    let dir = tempdir().unwrap();

    let assert = mkpatch(dir.path())
        .args(["-r", "missing.diff"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("fatal:"), "stderr was: {stderr}");
}

#[test]
fn test_version() {
    let dir = tempdir().unwrap();
    mkpatch(dir.path()).arg("--version").assert().success();
}

/// Test: ports format with GNU diff, including a removed file
#[cfg(unix)]
#[test]
fn test_ports_format_with_gnu_diff() {
    if !gnu_diff_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let files = dir.path().join("files");
    fs::create_dir(&files).unwrap();
    fs::write(files.join("hello.c.orig"), "int x = 1;\n").unwrap();
    fs::write(files.join("hello.c"), "int x = 2;\n").unwrap();
    fs::write(files.join("obsolete.h.orig"), "#define OLD 1\n").unwrap();

    let assert = mkpatch(dir.path())
        .args(["-P", "./files/"])
        .env("TZ", "Asia/Tokyo")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let lines: Vec<&str> = stdout.lines().collect();

    assert!(!stdout.contains("Index:"));
    assert!(lines[0].starts_with("--- files/hello.c.orig\t"));
    assert!(lines[0].ends_with(" UTC"), "header was: {}", lines[0]);
    assert_eq!(lines[1], "+++ files/hello.c");
    assert!(lines.contains(&"-int x = 1;"));
    assert!(lines.contains(&"+int x = 2;"));
    assert!(lines.contains(&"+++ files/obsolete.h"));
    assert!(lines.contains(&"-#define OLD 1"));
    // the stand-in for the removed file is gone again
    assert!(fs::symlink_metadata(files.join("obsolete.h")).is_err());
}
