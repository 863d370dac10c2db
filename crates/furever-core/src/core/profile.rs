// crates/furever-core/src/core/profile.rs
// ============================================================================
// Module: FurEver Home Accounts
// Description: Adopter, admin, and pending-admin account records.
// Purpose: Provide account profile types and signup payloads.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Accounts come in two roles. Adopters browse pets and submit requests;
//! admins decide them. Admin signups past the first are staged in a
//! pending-admin table until an existing admin approves or declines them.
//! Profile types never carry the stored password; authentication returns a
//! profile only after the store has checked credentials.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AdminId;
use crate::core::identifiers::AdopterId;
use crate::core::identifiers::PendingAdminId;
use crate::core::notification::Role;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Profiles
// ============================================================================

/// An adopter account profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdopterProfile {
    /// Adopter identifier.
    pub id: AdopterId,
    /// Display name.
    pub name: String,
    /// Login email (unique among adopters).
    pub email: String,
    /// Age in years, when on file.
    pub age: Option<u32>,
    /// Birthdate as free text.
    pub birthdate: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
}

/// An admin account profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Admin identifier.
    pub id: AdminId,
    /// Display name.
    pub name: String,
    /// Login email (unique among admins).
    pub email: String,
    /// Age in years, when on file.
    pub age: Option<u32>,
    /// Birthdate as free text.
    pub birthdate: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
    /// Facebook profile link.
    pub facebook_url: Option<String>,
    /// Instagram profile link.
    pub instagram_url: Option<String>,
}

/// An admin signup staged for approval by an existing admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAdmin {
    /// Staging row identifier.
    pub id: PendingAdminId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Birthdate as free text.
    pub birthdate: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
    /// Facebook profile link.
    pub facebook_url: Option<String>,
    /// Instagram profile link.
    pub instagram_url: Option<String>,
    /// Submission stamp.
    pub created_at: Timestamp,
}

/// An authenticated account of either role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Account {
    /// Adopter login.
    Adopter(AdopterProfile),
    /// Admin login.
    Admin(AdminProfile),
}

impl Account {
    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Adopter(_) => Role::Adopter,
            Self::Admin(_) => Role::Admin,
        }
    }

    /// Returns the raw account identifier.
    #[must_use]
    pub const fn raw_id(&self) -> u64 {
        match self {
            Self::Adopter(profile) => profile.id.get(),
            Self::Admin(profile) => profile.id.get(),
        }
    }
}

// ============================================================================
// SECTION: Signup Payloads
// ============================================================================

/// Payload for creating an adopter account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdopter {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
    /// Birthdate as free text.
    pub birthdate: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
}

/// Payload for creating an admin account or staging an admin signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdmin {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Birthdate as free text.
    pub birthdate: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
    /// Facebook profile link.
    pub facebook_url: Option<String>,
    /// Instagram profile link.
    pub instagram_url: Option<String>,
}

// ============================================================================
// SECTION: Profile Updates
// ============================================================================

/// Field updates applied to an adopter profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdopterUpdate {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Birthdate as free text.
    pub birthdate: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
}

/// Field updates applied to an admin profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUpdate {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: Option<u32>,
    /// Login email.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Birthdate as free text.
    pub birthdate: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
    /// Facebook profile link.
    pub facebook_url: Option<String>,
    /// Instagram profile link.
    pub instagram_url: Option<String>,
}
