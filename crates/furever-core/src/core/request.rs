// crates/furever-core/src/core/request.rs
// ============================================================================
// Module: FurEver Home Adoption Requests
// Description: Adoption request rows, lifecycle statuses, and projections.
// Purpose: Provide the request state machine types and status normalization.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An adoption request binds an adopter to a pet and walks a small lifecycle:
//! `pending -> approved | rejected | cancelled`. Legacy databases spell the
//! rejected state inconsistently (`declined`, `Rejected`, padded whitespace),
//! so every read path funnels stored text through
//! [`RequestStatus::normalize`] and every write path uses the canonical
//! spelling from [`RequestStatus::as_str`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AdopterId;
use crate::core::identifiers::PetId;
use crate::core::identifiers::RequestId;
use crate::core::pet::PetCategory;
use crate::core::pet::PetStatus;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Adoption request lifecycle status.
///
/// # Invariants
/// - `Approved` is terminal; approved rows are immutable and survive deletion
///   unless explicitly overridden.
/// - `Cancelled` is reachable only from `Pending`.
/// - The canonical stored spelling for the declined state is `rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted and awaiting an admin decision.
    #[default]
    Pending,
    /// Approved by an admin; the pet is adopted.
    Approved,
    /// Declined by an admin, with an optional reason.
    Rejected,
    /// Withdrawn by the owning adopter before a decision.
    Cancelled,
}

impl RequestStatus {
    /// Normalizes stored or user-supplied status text into a bucket.
    ///
    /// Trims whitespace and ignores case. `declined` and `rejected` fold into
    /// the same bucket; empty or unrecognized text classifies as `Pending`.
    #[must_use]
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" | "declined" => Self::Rejected,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    /// Returns the canonical stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// An adoption request row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRequest {
    /// Request identifier.
    pub id: RequestId,
    /// Requesting adopter.
    pub adopter_id: AdopterId,
    /// Requested pet.
    pub pet_id: PetId,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Submission stamp.
    pub created_at: Timestamp,
    /// Adopter note on submission, or the rejection reason after a decline.
    pub note: Option<String>,
}

/// The (adopter, pet) pair captured when a request is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    /// Adopter whose request was approved.
    pub adopter_id: AdopterId,
    /// Pet that was adopted.
    pub pet_id: PetId,
}

/// A request joined with its adopter and pet rows for display.
///
/// # Invariants
/// - Pet photo references are raw stored values; filesystem resolution is a
///   caller concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    /// The underlying request row.
    pub request: AdoptionRequest,
    /// Adopter display name.
    pub adopter_name: String,
    /// Adopter email.
    pub adopter_email: String,
    /// Adopter phone, when on file.
    pub adopter_phone: Option<String>,
    /// Adopter photo reference.
    pub adopter_photo: Option<String>,
    /// Pet display name.
    pub pet_name: String,
    /// Pet category bucket.
    pub category: PetCategory,
    /// Pet breed.
    pub breed: String,
    /// Pet age in years.
    pub age: u32,
    /// Pet sex as free text.
    pub sex: String,
    /// Pet vaccination flag.
    pub vaccinated: bool,
    /// Pet availability status.
    pub pet_status: PetStatus,
    /// Pet photo reference.
    pub pet_photo: Option<String>,
}
