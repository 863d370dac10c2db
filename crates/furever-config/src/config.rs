// crates/furever-config/src/config.rs
// ============================================================================
// Module: Config Types
// Description: Deployment configuration schema and loader.
// Purpose: Parse and validate the TOML configuration file.
// Dependencies: furever-store-sqlite, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The configuration schema mirrors the deployment surface: the store table
//! reuses [`SqliteStoreConfig`] directly so pragma settings are declared in
//! one place, the photos table names the images directory, and the optional
//! smtp table enables one-time-code delivery. `load` rejects oversized files
//! before parsing and validates the result before returning it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use furever_store_sqlite::SqliteStoreConfig;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted configuration file size in bytes.
const MAX_CONFIG_BYTES: u64 = 1_048_576;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Messages name the offending field or file, never credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Configuration file is not valid TOML for the schema.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Configuration file exceeds the size limit.
    #[error("config file too large: {0} bytes (limit {MAX_CONFIG_BYTES})")]
    TooLarge(u64),
    /// Configuration content failed validation.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Top-level deployment configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `SQLite` store settings.
    #[serde(default)]
    pub store: SqliteStoreConfig,
    /// Photo storage settings.
    #[serde(default)]
    pub photos: PhotosConfig,
    /// Mail settings for password-reset codes; absent disables resets.
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
}

/// Photo storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotosConfig {
    /// Directory holding managed photo files.
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
        }
    }
}

/// Returns the legacy default images directory.
fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

/// SMTP settings for one-time-code delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// Mail server host name.
    pub host: String,
    /// Mail server port.
    pub port: u16,
    /// Login user for the mail server.
    pub user: String,
    /// Sender address placed on outgoing mail.
    pub sender: String,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl AppConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized,
    /// unparseable, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::TooLarge(metadata.len()));
        }
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        let config: Self =
            toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store.path must not be empty".to_string()));
        }
        if self.photos.images_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("photos.images_dir must not be empty".to_string()));
        }
        if let Some(smtp) = &self.smtp {
            if smtp.host.trim().is_empty() {
                return Err(ConfigError::Invalid("smtp.host must not be empty".to_string()));
            }
            if smtp.port == 0 {
                return Err(ConfigError::Invalid("smtp.port must not be zero".to_string()));
            }
            if smtp.user.trim().is_empty() {
                return Err(ConfigError::Invalid("smtp.user must not be empty".to_string()));
            }
            if smtp.sender.trim().is_empty() {
                return Err(ConfigError::Invalid("smtp.sender must not be empty".to_string()));
            }
        }
        Ok(())
    }
}
