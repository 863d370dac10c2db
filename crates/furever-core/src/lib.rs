// crates/furever-core/src/lib.rs
// ============================================================================
// Module: FurEver Home Core Library
// Description: Public API surface for the FurEver Home adoption core.
// Purpose: Expose domain types, capability interfaces, and status handling.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! FurEver Home core provides the domain model and capability interfaces for
//! a pet-adoption back office: pets, adopters, adoption requests, history
//! snapshots, and notifications. It is backend-agnostic and integrates with
//! storage, photo handling, and mail delivery through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AdoptionStore;
pub use interfaces::DirectoryStore;
pub use interfaces::HistoryStore;
pub use interfaces::MailerError;
pub use interfaces::NotificationStore;
pub use interfaces::Notifier;
pub use interfaces::NotifyError;
pub use interfaces::OtpMailer;
pub use interfaces::PendingAdminStore;
pub use interfaces::PetStore;
pub use interfaces::PhotoError;
pub use interfaces::PhotoStore;
pub use interfaces::RequestStore;
pub use interfaces::StatsStore;
pub use interfaces::StoreError;
