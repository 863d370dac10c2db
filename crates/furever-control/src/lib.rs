// crates/furever-control/src/lib.rs
// ============================================================================
// Module: FurEver Home Control
// Description: Lifecycle flows for adoption requests, accounts, and photos.
// Purpose: Coordinate store mutations with notification fanout and cleanup.
// Dependencies: furever-core, rand, serde, thiserror
// ============================================================================

//! ## Overview
//! Control flows sit between callers and the store. Each flow performs its
//! primary mutation through the store traits and then runs secondary effects
//! (notifications, photo cleanup) whose outcomes are reported as typed
//! [`SideEffect`] records instead of being swallowed: a failed notification
//! never undoes a committed approval, but the caller can always see it.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Admin-facing flows: pet inventory, request decisions, dashboard.
pub mod admin;
/// Adopter-facing flows: submissions, cancellations, profile, ratings.
pub mod adopter;
/// Authentication flows: login, signup, password reset.
pub mod auth;
/// Flow error taxonomy.
pub mod error;
/// Store-backed notifier and side-effect reporting.
pub mod notify;
/// Directory-backed photo storage.
pub mod photos;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use admin::AdminFlows;
pub use admin::ApproveOutcome;
pub use admin::DeletePetOutcome;
pub use admin::PendingDecisionOutcome;
pub use admin::RejectOutcome;
pub use adopter::AdopterFlows;
pub use adopter::RatingOutcome;
pub use adopter::SubmitOutcome;
pub use auth::AdminSignup;
pub use auth::AuthFlows;
pub use error::FlowError;
pub use notify::SideEffect;
pub use notify::SideEffectKind;
pub use notify::SideEffectStatus;
pub use notify::StoreNotifier;
pub use photos::DirPhotoStore;
