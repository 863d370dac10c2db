// crates/furever-core/src/core/notification.rs
// ============================================================================
// Module: FurEver Home Notifications
// Description: User-facing notification rows and recipient roles.
// Purpose: Provide notification records with explicit recipient roles.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Notifications are append-only messages targeted at one account. Because
//! adopter and admin identifiers live in separate tables, a notification row
//! carries an explicit [`Role`] alongside the raw recipient id. Earlier
//! databases encoded admin recipients by offsetting the id instead; that
//! convention is decoded once during schema upgrade and never appears at
//! runtime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::NotificationId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Role
// ============================================================================

/// Account role distinguishing the two identifier spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Adopter account.
    #[default]
    Adopter,
    /// Admin account.
    Admin,
}

impl Role {
    /// Parses a stored or user-supplied role value (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Adopter
        }
    }

    /// Returns the canonical stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adopter => "adopter",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// A notification row as stored.
///
/// # Invariants
/// - `user_id` is interpreted against `role` (adopter or admin id space).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification identifier.
    pub id: NotificationId,
    /// Raw recipient identifier within the `role` id space.
    pub user_id: u64,
    /// Recipient role.
    pub role: Role,
    /// Message body.
    pub message: String,
    /// Creation stamp.
    pub created_at: Timestamp,
    /// Read flag, set by the recipient.
    pub is_read: bool,
}
