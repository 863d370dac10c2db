// crates/furever-control/src/notify.rs
// ============================================================================
// Module: Notification Fanout
// Description: Store-backed notifier and typed side-effect reporting.
// Purpose: Record notification outcomes without masking primary mutations.
// Dependencies: furever-core, serde
// ============================================================================

//! ## Overview
//! Flows treat notifications as secondary effects. The [`StoreNotifier`]
//! persists them through the notification store; each attempt is reported to
//! the caller as a [`SideEffect`] with a `Completed` or `Failed` status. A
//! failed side effect never rolls back or hides the mutation it followed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use furever_core::DirectoryStore;
use furever_core::NotificationStore;
use furever_core::Notifier;
use furever_core::NotifyError;
use furever_core::Role;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Side Effects
// ============================================================================

/// The kind of secondary effect a flow attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffectKind {
    /// A notification addressed to one account.
    DirectNotice,
    /// A notification fanned out to every admin.
    AdminBroadcast,
    /// Removal of a stored photo file.
    PhotoCleanup,
}

/// The outcome of one secondary effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffectStatus {
    /// The effect ran to completion.
    Completed,
    /// The effect failed; the primary mutation is unaffected.
    Failed {
        /// Failure description.
        message: String,
    },
}

/// A typed record of one secondary effect attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffect {
    /// What was attempted.
    pub kind: SideEffectKind,
    /// How it went.
    pub status: SideEffectStatus,
}

impl SideEffect {
    /// Records a completed effect.
    #[must_use]
    pub const fn completed(kind: SideEffectKind) -> Self {
        Self {
            kind,
            status: SideEffectStatus::Completed,
        }
    }

    /// Records a failed effect.
    #[must_use]
    pub const fn failed(kind: SideEffectKind, message: String) -> Self {
        Self {
            kind,
            status: SideEffectStatus::Failed { message },
        }
    }

    /// Reports whether the effect completed.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.status, SideEffectStatus::Completed)
    }

    /// Records a notify attempt as a side effect.
    pub(crate) fn from_notify(kind: SideEffectKind, result: Result<(), NotifyError>) -> Self {
        match result {
            Ok(()) => Self::completed(kind),
            Err(err) => Self::failed(kind, err.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Store Notifier
// ============================================================================

/// Notifier that persists messages through the notification store.
#[derive(Debug, Clone)]
pub struct StoreNotifier<S> {
    /// Backing store.
    store: S,
}

impl<S> StoreNotifier<S> {
    /// Wraps a store as a notifier.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> Notifier for StoreNotifier<S>
where
    S: NotificationStore + DirectoryStore,
{
    fn notify(&self, user_id: u64, role: Role, message: &str) -> Result<(), NotifyError> {
        self.store
            .create_notification(user_id, role, message)
            .map(|_| ())
            .map_err(|err| NotifyError::Delivery(err.to_string()))
    }

    fn notify_all_admins(&self, message: &str) -> Result<u64, NotifyError> {
        let admins =
            self.store.admin_profiles().map_err(|err| NotifyError::Delivery(err.to_string()))?;
        if admins.is_empty() {
            return Ok(0);
        }
        let mut delivered: u64 = 0;
        let mut last_failure = None;
        for admin in &admins {
            match self.store.create_notification(admin.id.get(), Role::Admin, message) {
                Ok(_) => delivered += 1,
                Err(err) => last_failure = Some(err.to_string()),
            }
        }
        if delivered == 0
            && let Some(failure) = last_failure
        {
            return Err(NotifyError::Delivery(failure));
        }
        Ok(delivered)
    }
}
