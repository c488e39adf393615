//! Integration tests for the synsim binary.
//!
//! These tests verify end-to-end behavior including:
//! - Field mutation and persistence
//! - Monovision toggling and manual-lens preservation
//! - Range clamping at the input boundary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("synsim"))
}

fn read_session(data_dir: &std::path::Path) -> serde_json::Value {
    let contents =
        fs::read_to_string(data_dir.join("session.json")).expect("Failed to read session file");
    serde_json::from_str(&contents).expect("Session file is not valid JSON")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Binocular defocus simulator",
        ));
}

#[test]
fn test_show_defaults() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("show")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: binocular"))
        .stdout(predicate::str::contains("Far (∞)"))
        .stdout(predicate::str::contains("RIGHT EYE"))
        .stdout(predicate::str::contains("LEFT EYE"));
}

#[test]
fn test_set_persists_field() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("set")
        .arg("right-r0")
        .arg("-2.0")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("right-r0 = -2.00 D"));

    let session = read_session(temp_dir.path());
    assert_eq!(session["right_r0"], -2.0);

    // With lens 0, the residual shows up in the right-eye table
    cli()
        .arg("show")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-2.00 D"));
}

#[test]
fn test_set_unknown_field_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("set")
        .arg("pupil-size")
        .arg("3.0")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_monovision_preserves_manual_lens() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for args in [
        vec!["set", "left-r0", "-3.0"],
        vec!["set", "left-lens", "-1.5"],
        vec!["set", "dominant-eye", "right"],
        vec!["set", "monovision", "on"],
    ] {
        cli()
            .args(&args)
            .arg("--data-dir")
            .arg(data_dir)
            .assert()
            .success();
    }

    // Left eye is the near eye; auto lens = −3.0 − (−1.25) = −1.75
    cli()
        .arg("show")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: monovision"))
        .stdout(predicate::str::contains("(near eye)"))
        .stdout(predicate::str::contains("Near-eye auto lens: -1.75 D"));

    // The stored manual value is untouched by the override
    let session = read_session(data_dir);
    assert_eq!(session["left_lens_manual"], -1.5);

    cli()
        .args(["set", "monovision", "off"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    // Back in binocular mode the manual lens applies again:
    // residual = −3.0 − (−1.5) = −1.5
    cli()
        .arg("show")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: binocular"))
        .stdout(predicate::str::contains("-1.50 D"));
}

#[test]
fn test_out_of_range_value_is_clamped() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["set", "accommodation", "20"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("clamped"));

    let session = read_session(temp_dir.path());
    assert_eq!(session["accommodation"], 12.0);
}

#[test]
fn test_reset_restores_defaults() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["set", "right-r0", "3.0"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("reset")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("reset"));

    let session = read_session(data_dir);
    assert_eq!(session["right_r0"], 0.0);
    assert_eq!(session["accommodation"], 12.0);
    assert_eq!(session["is_monovision"], false);
}
