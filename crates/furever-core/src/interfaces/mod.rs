// crates/furever-core/src/interfaces/mod.rs
// ============================================================================
// Module: FurEver Home Interfaces
// Description: Backend-agnostic interfaces for storage, photos, and mail.
// Purpose: Define the capability surfaces used by adoption flows.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the adoption core integrates with storage, the
//! filesystem, and mail delivery without embedding backend-specific details.
//! Each capability is an explicit trait so flows can be tested against fakes
//! and failures can be classified: primary mutations fail loudly through
//! [`StoreError`], while secondary effects (notifications, photo cleanup)
//! surface their own error types and never mask a successful mutation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::Account;
use crate::core::AdminId;
use crate::core::AdminProfile;
use crate::core::AdminUpdate;
use crate::core::AdopterId;
use crate::core::AdopterProfile;
use crate::core::AdopterUpdate;
use crate::core::AdoptionHistoryEntry;
use crate::core::ApprovalRecord;
use crate::core::BreedCount;
use crate::core::NewAdmin;
use crate::core::NewAdopter;
use crate::core::NewPet;
use crate::core::Notification;
use crate::core::NotificationId;
use crate::core::PendingAdmin;
use crate::core::PendingAdminId;
use crate::core::Pet;
use crate::core::PetCategory;
use crate::core::PetId;
use crate::core::PetUpdate;
use crate::core::RequestDetails;
use crate::core::RequestId;
use crate::core::Role;
use crate::core::SummaryStats;
use crate::core::TrendPoint;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Adoption store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling: `Invalid` means the input
///   was rejected before any mutation, `NotFound` and `Conflict` mean the
///   store state is unchanged, and `Db`/`Io` are infrastructure failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before any store access.
    #[error("adoption store invalid data: {0}")]
    Invalid(String),
    /// Referenced row does not exist; no mutation occurred.
    #[error("adoption store not found: {0}")]
    NotFound(String),
    /// Operation conflicts with current row state; no mutation occurred.
    #[error("adoption store conflict: {0}")]
    Conflict(String),
    /// Store schema version is incompatible.
    #[error("adoption store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store I/O error.
    #[error("adoption store io error: {0}")]
    Io(String),
    /// Database engine error.
    #[error("adoption store db error: {0}")]
    Db(String),
}

// ============================================================================
// SECTION: Pet Store
// ============================================================================

/// Pet inventory operations.
pub trait PetStore {
    /// Inserts a new pet and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn add_pet(&self, pet: &NewPet) -> Result<PetId, StoreError>;

    /// Loads a pet by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn pet(&self, pet_id: PetId) -> Result<Option<Pet>, StoreError>;

    /// Lists pets currently available for adoption.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn available_pets(&self) -> Result<Vec<Pet>, StoreError>;

    /// Lists available pets within one category bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn pets_by_category(&self, category: PetCategory) -> Result<Vec<Pet>, StoreError>;

    /// Applies field updates to an existing pet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the pet does not exist.
    fn update_pet(&self, pet_id: PetId, update: &PetUpdate) -> Result<(), StoreError>;

    /// Deletes a pet, purging its non-approved requests first.
    ///
    /// Approved request rows are never removed by pet deletion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_pet(&self, pet_id: PetId) -> Result<(), StoreError>;
}

// ============================================================================
// SECTION: Request Store
// ============================================================================

/// Adoption request lifecycle operations.
pub trait RequestStore {
    /// Inserts a new pending request and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn submit_request(
        &self,
        adopter_id: AdopterId,
        pet_id: PetId,
        note: Option<&str>,
    ) -> Result<RequestId, StoreError>;

    /// Reports whether the adopter already has a pending request for the pet.
    ///
    /// Advisory only: the check and a following insert are separate
    /// transactions, so a concurrent writer can still slip a duplicate in.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn has_pending_request(&self, adopter_id: AdopterId, pet_id: PetId)
    -> Result<bool, StoreError>;

    /// Approves a request: status, pet availability, and history snapshot in
    /// one transaction.
    ///
    /// The pet status update is best-effort and the history snapshot is
    /// idempotent per (adopter, pet); re-approving never writes a second
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the request does not exist; no
    /// mutation occurs in that case.
    fn approve_request(&self, request_id: RequestId) -> Result<ApprovalRecord, StoreError>;

    /// Rejects a pending request, recording an optional reason.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the request does not exist and
    /// [`StoreError::Conflict`] when it is not pending.
    fn reject_request(&self, request_id: RequestId, reason: &str) -> Result<(), StoreError>;

    /// Cancels a pending request, enforcing ownership when `owner` is given.
    ///
    /// Returns whether a row changed; a wrong owner or non-pending status is
    /// a `false` report, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn cancel_request(
        &self,
        request_id: RequestId,
        owner: Option<AdopterId>,
    ) -> Result<bool, StoreError>;

    /// Hard-deletes a request row.
    ///
    /// Approved rows are excluded unless `allow_approved` is set. Returns
    /// whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_request(
        &self,
        request_id: RequestId,
        owner: Option<AdopterId>,
        allow_approved: bool,
    ) -> Result<bool, StoreError>;

    /// Loads one request joined with adopter and pet display fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn request_details(&self, request_id: RequestId)
    -> Result<Option<RequestDetails>, StoreError>;

    /// Lists all requests joined with display fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn all_requests(&self) -> Result<Vec<RequestDetails>, StoreError>;

    /// Lists one adopter's requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn adopter_requests(&self, adopter_id: AdopterId) -> Result<Vec<RequestDetails>, StoreError>;
}

// ============================================================================
// SECTION: History Store
// ============================================================================

/// Adoption history snapshot reads.
pub trait HistoryStore {
    /// Lists all adoption history entries, newest first.
    ///
    /// Backfills the history table from approved requests when it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn adoption_history(&self) -> Result<Vec<AdoptionHistoryEntry>, StoreError>;

    /// Lists one adopter's history entries, newest first.
    ///
    /// Backfills that adopter's entries from approved requests when none
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn adoption_history_for(
        &self,
        adopter_id: AdopterId,
    ) -> Result<Vec<AdoptionHistoryEntry>, StoreError>;
}

// ============================================================================
// SECTION: Notification Store
// ============================================================================

/// Notification persistence operations.
pub trait NotificationStore {
    /// Appends a notification for one recipient.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create_notification(
        &self,
        user_id: u64,
        role: Role,
        message: &str,
    ) -> Result<NotificationId, StoreError>;

    /// Lists notifications for one recipient, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn notifications_for(&self, user_id: u64, role: Role)
    -> Result<Vec<Notification>, StoreError>;

    /// Marks a notification read. Idempotent; a missing row is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn mark_notification_read(&self, notification_id: NotificationId) -> Result<(), StoreError>;

    /// Deletes all notifications for one recipient.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn clear_notifications_for(&self, user_id: u64, role: Role) -> Result<(), StoreError>;

    /// Deletes a single notification. A missing row is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_notification(&self, notification_id: NotificationId) -> Result<(), StoreError>;
}

// ============================================================================
// SECTION: Directory Store
// ============================================================================

/// Account directory and credential operations.
pub trait DirectoryStore {
    /// Authenticates an email/password pair against the role's table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn authenticate(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<Account>, StoreError>;

    /// Looks up an account by email within one role.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn account_by_email(&self, email: &str, role: Role) -> Result<Option<Account>, StoreError>;

    /// Creates an adopter account.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the email is already registered.
    fn create_adopter(&self, adopter: &NewAdopter) -> Result<AdopterId, StoreError>;

    /// Creates an admin account directly (first-admin bootstrap or staged
    /// approval).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the email is already registered.
    fn create_admin(&self, admin: &NewAdmin) -> Result<AdminId, StoreError>;

    /// Loads an adopter profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn adopter(&self, adopter_id: AdopterId) -> Result<Option<AdopterProfile>, StoreError>;

    /// Counts admin accounts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn admin_count(&self) -> Result<u64, StoreError>;

    /// Lists all admin profiles, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn admin_profiles(&self) -> Result<Vec<AdminProfile>, StoreError>;

    /// Applies field updates to an adopter profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the adopter does not exist.
    fn update_adopter(
        &self,
        adopter_id: AdopterId,
        update: &AdopterUpdate,
    ) -> Result<(), StoreError>;

    /// Applies field updates to an admin profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the admin does not exist.
    fn update_admin(&self, admin_id: AdminId, update: &AdminUpdate) -> Result<(), StoreError>;

    /// Updates the password for the account registered under an email.
    ///
    /// Returns whether a row changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn update_password_by_email(
        &self,
        email: &str,
        role: Role,
        new_password: &str,
    ) -> Result<bool, StoreError>;

    /// Deletes an adopter account along with that adopter's requests.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_adopter(&self, adopter_id: AdopterId) -> Result<(), StoreError>;

    /// Deletes an admin account.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_admin(&self, admin_id: AdminId) -> Result<(), StoreError>;
}

// ============================================================================
// SECTION: Pending Admin Store
// ============================================================================

/// Staged admin signup operations.
pub trait PendingAdminStore {
    /// Stages an admin signup for approval.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create_pending_admin(&self, admin: &NewAdmin) -> Result<PendingAdminId, StoreError>;

    /// Lists staged admin signups, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn pending_admins(&self) -> Result<Vec<PendingAdmin>, StoreError>;

    /// Promotes a staged signup into the admin table and removes the staging
    /// row, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the staging row does not exist.
    fn approve_pending_admin(&self, pending_id: PendingAdminId) -> Result<AdminId, StoreError>;

    /// Removes a staged signup. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn decline_pending_admin(&self, pending_id: PendingAdminId) -> Result<bool, StoreError>;
}

// ============================================================================
// SECTION: Stats Store
// ============================================================================

/// Aggregate reporting reads.
pub trait StatsStore {
    /// Returns the headline counters.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a count query fails.
    fn summary_stats(&self) -> Result<SummaryStats, StoreError>;

    /// Returns up to the five most adopted breeds, most adopted first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn most_adopted_breeds(&self) -> Result<Vec<BreedCount>, StoreError>;

    /// Returns approved requests grouped by submission date, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn adoption_trend(&self) -> Result<Vec<TrendPoint>, StoreError>;
}

// ============================================================================
// SECTION: Aggregate Store
// ============================================================================

/// The full adoption store capability set.
pub trait AdoptionStore:
    PetStore
    + RequestStore
    + HistoryStore
    + NotificationStore
    + DirectoryStore
    + PendingAdminStore
    + StatsStore
{
}

impl<T> AdoptionStore for T where
    T: PetStore
        + RequestStore
        + HistoryStore
        + NotificationStore
        + DirectoryStore
        + PendingAdminStore
        + StatsStore
{
}

// ============================================================================
// SECTION: Notifier
// ============================================================================

/// Notifier errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Notification delivery or persistence failed.
    #[error("notify error: {0}")]
    Delivery(String),
}

/// Notification fanout used by lifecycle flows.
///
/// Implementations are best-effort collaborators: flows record a notifier
/// failure as a failed side effect and continue.
pub trait Notifier {
    /// Sends a message to one recipient.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the notification cannot be recorded.
    fn notify(&self, user_id: u64, role: Role, message: &str) -> Result<(), NotifyError>;

    /// Sends a message to every admin. No admins is a successful no-op.
    ///
    /// Returns the number of admins notified.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when fanout fails entirely.
    fn notify_all_admins(&self, message: &str) -> Result<u64, NotifyError>;
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, user_id: u64, role: Role, message: &str) -> Result<(), NotifyError> {
        (**self).notify(user_id, role, message)
    }

    fn notify_all_admins(&self, message: &str) -> Result<u64, NotifyError> {
        (**self).notify_all_admins(message)
    }
}

// ============================================================================
// SECTION: Photo Store
// ============================================================================

/// Photo store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// Filesystem operation failed.
    #[error("photo store io error: {0}")]
    Io(String),
    /// Supplied path was not usable as a photo source.
    #[error("photo store invalid path: {0}")]
    Invalid(String),
}

/// Filesystem-backed photo handling.
///
/// The store persists only reference strings; bytes live on disk.
pub trait PhotoStore {
    /// Copies a source photo into managed storage and returns the stored
    /// reference.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoError`] when the source is unusable. Copy failures for
    /// a readable source degrade to returning the original path.
    fn store(&self, source: &Path) -> Result<String, PhotoError>;

    /// Removes a stored photo. Best-effort; missing files are ignored.
    fn remove(&self, reference: &str);

    /// Resolves a display path for a pet photo.
    ///
    /// Tries the stored reference, then the legacy image field, then a
    /// name-derived filename guess. Returns `None` when nothing exists; the
    /// placeholder is the caller's concern.
    fn resolve(&self, stored: Option<&str>, legacy: Option<&str>, name: &str) -> Option<PathBuf>;
}

// ============================================================================
// SECTION: OTP Mailer
// ============================================================================

/// Mailer errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum MailerError {
    /// Mail transport is not configured.
    #[error("mailer not configured: {0}")]
    NotConfigured(String),
    /// Mail delivery failed.
    #[error("mailer send error: {0}")]
    Send(String),
}

/// One-time-passcode delivery for password resets.
pub trait OtpMailer {
    /// Sends a reset code to the given address.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError`] when delivery fails; the caller surfaces this
    /// to the user rather than retrying.
    fn send_otp(&self, email: &str, code: &str) -> Result<(), MailerError>;
}

impl<T: OtpMailer + ?Sized> OtpMailer for &T {
    fn send_otp(&self, email: &str, code: &str) -> Result<(), MailerError> {
        (**self).send_otp(email, code)
    }
}
