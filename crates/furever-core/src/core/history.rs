// crates/furever-core/src/core/history.rs
// ============================================================================
// Module: FurEver Home Adoption History
// Description: Denormalized adoption snapshot records.
// Purpose: Preserve adoption facts independently of live pet and account rows.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! When a request is approved, the store captures a denormalized snapshot of
//! the adoption so reports survive later edits or deletions of the pet and
//! adopter rows. Projections join snapshots back against live rows and prefer
//! the snapshot value when both exist; a fully removed pet renders as
//! `(Removed Pet)`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AdopterId;
use crate::core::identifiers::PetId;
use crate::core::pet::PetCategory;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Records
// ============================================================================

/// One adoption, as snapshotted at approval time and joined with live rows.
///
/// # Invariants
/// - At most one entry exists per (adopter, pet) pair; duplicate snapshot
///   writes are silently dropped.
/// - Snapshot fields are frozen at approval; later pet edits do not reflect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionHistoryEntry {
    /// Adopter identifier, when recorded.
    pub adopter_id: Option<AdopterId>,
    /// Pet identifier, when recorded.
    pub pet_id: Option<PetId>,
    /// Pet name (`(Removed Pet)` when neither snapshot nor live row has one).
    pub pet_name: String,
    /// Category bucket, snapshot-first.
    pub category: Option<PetCategory>,
    /// Breed, snapshot-first.
    pub breed: Option<String>,
    /// Sex as free text, snapshot-first.
    pub sex: Option<String>,
    /// Adoption stamp.
    pub adopted_at: Option<Timestamp>,
    /// Adopter name, snapshot-first.
    pub adopter_name: Option<String>,
    /// Adopter email from the live row, when the account still exists.
    pub adopter_email: Option<String>,
    /// Live pet photo reference, when the pet row still exists.
    pub pet_photo: Option<String>,
}
