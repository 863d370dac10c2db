// crates/furever-core/src/core/time.rs
// ============================================================================
// Module: FurEver Home Time Model
// Description: Canonical timestamp representation for stored rows.
// Purpose: Provide the legacy-compatible wall-clock stamp format used by the store.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Stored rows carry local wall-clock stamps in the legacy
//! `YYYY-MM-DD HH:MM:SS` text form so databases written by earlier releases
//! remain readable and sortable alongside new rows. [`Timestamp`] wraps that
//! text form and owns its generation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::macros::format_description;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp stored with requests, history, and notifications.
///
/// # Invariants
/// - Text form is `YYYY-MM-DD HH:MM:SS` for stamps generated by this type.
/// - Values read from legacy databases are carried verbatim, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Returns the current local wall-clock stamp.
    ///
    /// Falls back to UTC when the local offset cannot be determined.
    #[must_use]
    pub fn now() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        match now.format(format) {
            Ok(text) => Self(text),
            Err(_) => Self(now.unix_timestamp().to_string()),
        }
    }

    /// Wraps a stored stamp value verbatim.
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the stamp as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the calendar-date prefix (`YYYY-MM-DD`) of the stamp.
    #[must_use]
    pub fn date(&self) -> &str {
        self.0.split(' ').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
