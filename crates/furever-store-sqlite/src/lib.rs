// crates/furever-store-sqlite/src/lib.rs
// ============================================================================
// Module: FurEver Home SQLite Store Library
// Description: SQLite-backed adoption store.
// Purpose: Expose the durable store implementation and its configuration.
// Dependencies: crate::store
// ============================================================================

//! ## Overview
//! This crate implements the full adoption store capability set over a single
//! `SQLite` database file, including one-time schema upgrades for databases
//! written by the legacy application.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SCHEMA_VERSION;
pub use store::SqliteAdoptionStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
