// crates/furever-core/src/core/mod.rs
// ============================================================================
// Module: FurEver Home Core Types
// Description: Canonical adoption domain structures.
// Purpose: Provide stable, serializable types for pets, requests, and accounts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the adoption domain model: pets, adopter and admin
//! accounts, adoption requests with their lifecycle statuses, denormalized
//! history snapshots, notifications, and read-side summary projections.
//! These types are the canonical source of truth for any derived surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod history;
pub mod identifiers;
pub mod notification;
pub mod pet;
pub mod profile;
pub mod request;
pub mod summary;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use history::AdoptionHistoryEntry;
pub use identifiers::AdminId;
pub use identifiers::AdopterId;
pub use identifiers::NotificationId;
pub use identifiers::PendingAdminId;
pub use identifiers::PetId;
pub use identifiers::RequestId;
pub use notification::Notification;
pub use notification::Role;
pub use pet::NewPet;
pub use pet::Pet;
pub use pet::PetCategory;
pub use pet::PetStatus;
pub use pet::PetUpdate;
pub use profile::Account;
pub use profile::AdminProfile;
pub use profile::AdminUpdate;
pub use profile::AdopterProfile;
pub use profile::AdopterUpdate;
pub use profile::NewAdmin;
pub use profile::NewAdopter;
pub use profile::PendingAdmin;
pub use request::AdoptionRequest;
pub use request::ApprovalRecord;
pub use request::RequestDetails;
pub use request::RequestStatus;
pub use summary::BreedCount;
pub use summary::DashboardSnapshot;
pub use summary::SummaryStats;
pub use summary::TrendPoint;
pub use time::Timestamp;
