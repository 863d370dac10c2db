// crates/furever-control/src/error.rs
// ============================================================================
// Module: Flow Errors
// Description: Error taxonomy for adoption lifecycle flows.
// Purpose: Classify flow failures for callers and surfaces.
// Dependencies: furever-core, thiserror
// ============================================================================

//! ## Overview
//! Flow errors separate caller mistakes (`Invalid`, `NotFound`, `Conflict`)
//! from infrastructure failures (`Store`, `Mailer`, `Internal`). Store errors
//! that already carry a caller-facing class are lifted into the matching flow
//! variant so surfaces only ever branch on one taxonomy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use furever_core::MailerError;
use furever_core::StoreError;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Adoption flow errors.
///
/// # Invariants
/// - `Invalid`, `NotFound`, and `Conflict` mean the primary mutation did not
///   occur.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Input rejected before any mutation.
    #[error("flow invalid input: {0}")]
    Invalid(String),
    /// Referenced record does not exist.
    #[error("flow not found: {0}")]
    NotFound(String),
    /// Operation conflicts with current record state.
    #[error("flow conflict: {0}")]
    Conflict(String),
    /// Store infrastructure failure.
    #[error("flow store error: {0}")]
    Store(StoreError),
    /// Mail delivery failure.
    #[error("flow mailer error: {0}")]
    Mailer(#[from] MailerError),
    /// Internal flow state failure.
    #[error("flow internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for FlowError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Invalid(message) => Self::Invalid(message),
            StoreError::NotFound(message) => Self::NotFound(message),
            StoreError::Conflict(message) => Self::Conflict(message),
            other => Self::Store(other),
        }
    }
}
