// crates/furever-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Loading and validation tests for the deployment config.
// Purpose: Validate parse defaults, field validation, and size limits.
// ============================================================================

//! ## Overview
//! Tests for configuration loading:
//! - Full and minimal files parse with serde defaults applied
//! - Field validation rejects empty paths and malformed smtp tables
//! - Missing and oversized files are rejected before parsing

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;
use std::path::PathBuf;

use furever_config::AppConfig;
use furever_config::ConfigError;
use furever_store_sqlite::SqliteStoreMode;
use furever_store_sqlite::SqliteSyncMode;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("furever.toml");
    fs::write(&path, content).expect("write config");
    path
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn full_config_loads() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(
        &dir,
        r#"
        [store]
        path = "data/adoption.db"
        busy_timeout_ms = 2500
        journal_mode = "delete"
        sync_mode = "normal"

        [photos]
        images_dir = "data/images"

        [smtp]
        host = "smtp.example.com"
        port = 587
        user = "noreply@example.com"
        sender = "FurEver Home <noreply@example.com>"
        "#,
    );
    let config = AppConfig::load(&path).expect("load");
    assert_eq!(config.store.path, PathBuf::from("data/adoption.db"));
    assert_eq!(config.store.busy_timeout_ms, 2_500);
    assert_eq!(config.store.journal_mode, SqliteStoreMode::Delete);
    assert_eq!(config.store.sync_mode, SqliteSyncMode::Normal);
    assert_eq!(config.photos.images_dir, PathBuf::from("data/images"));
    let smtp = config.smtp.expect("smtp table");
    assert_eq!(smtp.port, 587);
}

#[test]
fn minimal_config_applies_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(
        &dir,
        r#"
        [store]
        path = "data/adoption.db"

        [photos]
        images_dir = "data/images"
        "#,
    );
    let config = AppConfig::load(&path).expect("load");
    assert_eq!(config.store.busy_timeout_ms, 5_000);
    assert_eq!(config.store.journal_mode, SqliteStoreMode::Wal);
    assert_eq!(config.store.sync_mode, SqliteSyncMode::Full);
    assert!(config.smtp.is_none());
}

#[test]
fn empty_file_uses_legacy_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(&dir, "");
    let config = AppConfig::load(&path).expect("load");
    assert_eq!(config.store.path, PathBuf::from("fureverhome.db"));
    assert_eq!(config.photos.images_dir, PathBuf::from("images"));
    assert!(config.smtp.is_none());
}

#[test]
fn empty_store_path_is_invalid() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(
        &dir,
        r#"
        [store]
        path = ""

        [photos]
        images_dir = "data/images"
        "#,
    );
    let result = AppConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn zero_smtp_port_is_invalid() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(
        &dir,
        r#"
        [store]
        path = "data/adoption.db"

        [photos]
        images_dir = "data/images"

        [smtp]
        host = "smtp.example.com"
        port = 0
        user = "noreply@example.com"
        sender = "noreply@example.com"
        "#,
    );
    let result = AppConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn incomplete_smtp_table_is_a_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(
        &dir,
        r#"
        [store]
        path = "data/adoption.db"

        [photos]
        images_dir = "data/images"

        [smtp]
        port = 587
        "#,
    );
    let result = AppConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let result = AppConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn oversized_file_is_rejected_before_parsing() {
    let dir = TempDir::new().expect("tempdir");
    let padding = "# padding\n".repeat(120_000);
    let path = write_config(&dir, &padding);
    let result = AppConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::TooLarge(_))));
}
