//! End-to-end tests for the tfswap CLI
//!
//! These tests run the compiled binary in throwaway directories and only
//! cover flows that fail before any network access: flag parsing, the
//! version format gate, and malformed configuration files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tfswap_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tfswap").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_help_shows_usage() {
    let dir = TempDir::new().unwrap();
    tfswap_in(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terraform version switcher"))
        .stdout(predicate::str::contains("--list-all"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    tfswap_in(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_version_format_fails_fast() {
    let dir = TempDir::new().unwrap();
    tfswap_in(&dir)
        .arg("0.11")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid terraform version format"))
        .stderr(predicate::str::contains("0.11.9-beta1"));
}

#[test]
fn test_invalid_pin_file_fails_fast() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".terraform-version"), "latest\n").unwrap();

    tfswap_in(&dir)
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid terraform version format"));
}

#[test]
fn test_invalid_rc_file_fails_fast() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".tfswaprc"), "v0.11.7\n").unwrap();

    tfswap_in(&dir)
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid terraform version format"));
}

#[test]
fn test_malformed_toml_fails_fast() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".tfswap.toml"), "version = [broken\n").unwrap();

    tfswap_in(&dir)
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse TOML"));
}

#[test]
fn test_malformed_constraint_fails_fast() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("main.tf"),
        "terraform { required_version = \">>0.12\" }\n",
    )
    .unwrap();

    tfswap_in(&dir)
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse constraint"));
}
