// crates/furever-config/src/lib.rs
// ============================================================================
// Module: FurEver Home Config
// Description: TOML configuration loading and validation.
// Purpose: Provide the deployment configuration for store, photos, and mail.
// Dependencies: furever-store-sqlite, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Deployment configuration is one TOML file with a `[store]` table for the
//! `SQLite` database, a `[photos]` table for the images directory, and an
//! optional `[smtp]` table for password-reset mail. Loading is size-limited
//! and every loaded config is validated before use.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Configuration types, loading, and validation.
pub mod config;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use config::AppConfig;
pub use config::ConfigError;
pub use config::PhotosConfig;
pub use config::SmtpConfig;
