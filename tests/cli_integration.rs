//! CLI integration tests for plinth.
//!
//! The binary ships with the git plugin only, so resolution inside a
//! project stops at generator discovery.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the plinth binary command, isolated from the user's home.
fn plinth(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("plinth").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("PLINTH_MANIFEST_PATH")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_pyproject(dir: &std::path::Path) {
    fs::write(
        dir.join("pyproject.toml"),
        "[project]\nname = \"demo\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();
}

// ============================================================================
// plinth plugins
// ============================================================================

#[test]
fn test_plugins_lists_builtin_scm() {
    let tmp = temp_dir();

    plinth(&tmp)
        .arg("plugins")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("git"));
}

#[test]
fn test_plugins_json() {
    let tmp = temp_dir();

    let output = plinth(&tmp)
        .args(["plugins", "--json", "--group", "scm"])
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["plugins"][0]["name"], "git");
    assert_eq!(json["plugins"][0]["group"], "scm");
}

#[test]
fn test_plugins_generator_group_empty() {
    let tmp = temp_dir();

    plinth(&tmp)
        .args(["plugins", "--group", "generator"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No plugins found."));
}

#[test]
fn test_plugins_rejects_unknown_group() {
    let tmp = temp_dir();

    plinth(&tmp)
        .args(["plugins", "--group", "compiler"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown plugin group"));
}

// ============================================================================
// plinth resolve
// ============================================================================

#[test]
fn test_resolve_without_manifest_fails() {
    let tmp = temp_dir();

    plinth(&tmp)
        .arg("resolve")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `pyproject.toml`"));
}

#[test]
fn test_resolve_missing_explicit_manifest_fails() {
    let tmp = temp_dir();

    plinth(&tmp)
        .args(["resolve", "--manifest-path", "nope/pyproject.toml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_resolve_without_generators_fails() {
    let tmp = temp_dir();
    write_pyproject(tmp.path());

    plinth(&tmp)
        .arg("resolve")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no generator plugins found"))
        .stderr(predicate::str::contains("plinth plugins"));
}

#[test]
fn test_install_without_generators_fails() {
    let tmp = temp_dir();
    write_pyproject(tmp.path());

    plinth(&tmp)
        .arg("install")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no generator plugins found"));
}

#[test]
fn test_build_without_generators_fails() {
    let tmp = temp_dir();
    write_pyproject(tmp.path());

    plinth(&tmp)
        .arg("build")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no generator plugins found"));
}

#[test]
fn test_resolve_invalid_manifest_fails() {
    let tmp = temp_dir();
    fs::write(tmp.path().join("pyproject.toml"), "[project\n").unwrap();

    plinth(&tmp)
        .arg("resolve")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse manifest"));
}

// ============================================================================
// plinth completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    plinth(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plinth"));
}
