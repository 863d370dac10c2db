// crates/furever-core/src/core/summary.rs
// ============================================================================
// Module: FurEver Home Summaries
// Description: Read-side aggregate projections for dashboards and reports.
// Purpose: Provide counting and grouping types computed from full scans.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Summary projections are computed on demand with full scans; nothing here
//! is cached or incrementally maintained. Status groupings use normalized
//! request status buckets and category groupings use title-cased category
//! labels with `Other` as the default bucket.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::history::AdoptionHistoryEntry;
use crate::core::pet::Pet;
use crate::core::request::RequestDetails;

// ============================================================================
// SECTION: Aggregates
// ============================================================================

/// Headline counters for the landing views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Pets currently listed as available.
    pub available_pets: u64,
    /// Adoption requests ever submitted, across all statuses.
    pub total_requests: u64,
    /// Requests currently in the approved bucket.
    pub total_adoptions: u64,
}

/// Adoption count for one breed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedCount {
    /// Breed as stored on the pet row.
    pub breed: String,
    /// Approved requests for pets of this breed.
    pub adoptions: u64,
}

/// Approved requests grouped by submission date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Approved requests submitted on that date.
    pub approvals: u64,
}

/// Everything the admin dashboard renders, assembled in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Pets currently available for adoption.
    pub available_pets: Vec<Pet>,
    /// All adoption requests with joined display fields.
    pub requests: Vec<RequestDetails>,
    /// Adoption history entries, newest first.
    pub history: Vec<AdoptionHistoryEntry>,
    /// Headline counters.
    pub stats: SummaryStats,
    /// Request counts keyed by normalized status value.
    pub requests_by_status: BTreeMap<String, u64>,
    /// Available-pet counts keyed by title-cased category label.
    pub pets_by_category: BTreeMap<String, u64>,
}
