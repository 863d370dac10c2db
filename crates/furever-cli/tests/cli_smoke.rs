// crates/furever-cli/tests/cli_smoke.rs
// ============================================================================
// Module: CLI Smoke Tests
// Description: Runs the furever binary end to end against a scratch store.
// Purpose: Ensure configuration loading, pet management, and projections
//          work through the real command-line surface.
// Dependencies: tempfile and the compiled furever binary.
// ============================================================================

//! ## Overview
//! Drives the compiled `furever` binary with a temporary configuration file
//! and `SQLite` database:
//! - Configuration validation accepts good files and rejects bad ones.
//! - Pet add/list/update/delete round-trips through the store.
//! - The dashboard renders JSON that parses and carries the counters.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes a minimal configuration file into the scratch directory.
fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let config_path = dir.path().join("furever.toml");
    let db_path = dir.path().join("shelter.db");
    let images_dir = dir.path().join("images");
    let body = format!(
        "[store]\npath = {:?}\n\n[photos]\nimages_dir = {:?}\n",
        db_path.to_string_lossy(),
        images_dir.to_string_lossy()
    );
    fs::write(&config_path, body).expect("write config");
    config_path
}

/// Runs the furever binary with the given arguments.
fn run_furever(config_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_furever"))
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .expect("run furever binary")
}

/// Asserts success and returns captured stdout as text.
fn run_ok(config_path: &Path, args: &[&str]) -> String {
    let output = run_furever(config_path, args);
    assert!(
        output.status.success(),
        "command {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms config validation accepts a well-formed file.
#[test]
fn config_validate_accepts_good_file() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = write_config(&dir);
    let stdout = run_ok(&config_path, &["config", "validate"]);
    assert!(stdout.contains("configuration is valid"));
}

/// Confirms a missing config file fails with a nonzero exit code.
#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = dir.path().join("absent.toml");
    let output = run_furever(&config_path, &["dashboard"]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}

/// Confirms pets round-trip through add, list, update, and delete.
#[test]
fn pets_round_trip_through_the_binary() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = write_config(&dir);

    let added = run_ok(
        &config_path,
        &[
            "pets", "add", "--name", "Biscuit", "--category", "dog", "--breed", "Beagle", "--age",
            "3", "--sex", "Male", "--vaccinated",
        ],
    );
    assert!(added.contains("added pet #1"));

    let listed = run_ok(&config_path, &["pets", "list"]);
    assert!(listed.contains("Biscuit"));
    assert!(listed.contains("Beagle"));

    run_ok(&config_path, &["pets", "update", "--id", "1", "--name", "Bixby"]);
    let renamed = run_ok(&config_path, &["pets", "list", "--category", "dog"]);
    assert!(renamed.contains("Bixby"));
    assert!(!renamed.contains("Biscuit"));

    run_ok(&config_path, &["pets", "delete", "--id", "1"]);
    let emptied = run_ok(&config_path, &["pets", "list"]);
    assert!(!emptied.contains("Bixby"));
}

/// Confirms updating a pet that does not exist fails loudly.
#[test]
fn updating_a_missing_pet_fails() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = write_config(&dir);
    let output = run_furever(&config_path, &["pets", "update", "--id", "42", "--name", "Ghost"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("42"));
}

/// Confirms the dashboard emits parseable JSON with the counters.
#[test]
fn dashboard_emits_json() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = write_config(&dir);
    run_ok(
        &config_path,
        &[
            "pets", "add", "--name", "Clover", "--category", "cat", "--breed", "Tabby", "--age",
            "2", "--sex", "Female",
        ],
    );
    let stdout = run_ok(&config_path, &["--json", "dashboard"]);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("parse dashboard json");
    assert_eq!(report["snapshot"]["stats"]["available_pets"], 1);
    assert_eq!(report["snapshot"]["stats"]["total_requests"], 0);
    assert_eq!(report["snapshot"]["pets_by_category"]["Cat"], 1);
}

/// Confirms notification and staging lists start empty without errors.
#[test]
fn empty_projections_render_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = write_config(&dir);
    let pending = run_ok(&config_path, &["--json", "admins", "pending"]);
    assert_eq!(pending.trim(), "[]");
    let inbox = run_ok(
        &config_path,
        &["--json", "notifications", "list", "--user", "1", "--role", "adopter"],
    );
    assert_eq!(inbox.trim(), "[]");
    let history = run_ok(&config_path, &["--json", "history"]);
    assert_eq!(history.trim(), "[]");
}
