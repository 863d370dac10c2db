// crates/furever-control/src/admin.rs
// ============================================================================
// Module: Admin Flows
// Description: Pet inventory, request decisions, staging, and dashboard.
// Purpose: Coordinate admin mutations with notices and photo cleanup.
// Dependencies: furever-core, crate::error, crate::notify
// ============================================================================

//! ## Overview
//! Admin flows decide the request lifecycle. Approval and rejection commit
//! their store mutation first and then attempt the adopter notice; the notice
//! outcome rides back to the caller as a [`SideEffect`] so a notification
//! failure is visible without undoing the decision. Deleting an approved
//! request is refused here because those rows feed adoption history.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use furever_core::AdminId;
use furever_core::AdminProfile;
use furever_core::AdminUpdate;
use furever_core::AdoptionHistoryEntry;
use furever_core::AdoptionStore;
use furever_core::ApprovalRecord;
use furever_core::DashboardSnapshot;
use furever_core::NewPet;
use furever_core::Notifier;
use furever_core::PendingAdmin;
use furever_core::PendingAdminId;
use furever_core::Pet;
use furever_core::PetId;
use furever_core::PetUpdate;
use furever_core::PhotoStore;
use furever_core::RequestDetails;
use furever_core::RequestId;
use furever_core::RequestStatus;
use furever_core::Role;
use serde::Deserialize;
use serde::Serialize;

use crate::error::FlowError;
use crate::notify::SideEffect;
use crate::notify::SideEffectKind;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of approving a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveOutcome {
    /// The adopter/pet pair that was approved.
    pub record: ApprovalRecord,
    /// Secondary-effect outcomes, in attempt order.
    pub side_effects: Vec<SideEffect>,
}

/// Result of rejecting a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectOutcome {
    /// Secondary-effect outcomes, in attempt order.
    pub side_effects: Vec<SideEffect>,
}

/// Result of deleting a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePetOutcome {
    /// Secondary-effect outcomes, in attempt order.
    pub side_effects: Vec<SideEffect>,
}

/// Result of deciding a staged admin signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecisionOutcome {
    /// The promoted admin, for approvals.
    pub admin_id: Option<AdminId>,
    /// Secondary-effect outcomes, in attempt order.
    pub side_effects: Vec<SideEffect>,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Rejects blank critical pet fields before any store access.
fn validate_pet_fields(name: &str, breed: &str, sex: &str) -> Result<(), FlowError> {
    if name.trim().is_empty() {
        return Err(FlowError::Invalid("pet name must not be blank".to_string()));
    }
    if breed.trim().is_empty() {
        return Err(FlowError::Invalid("pet breed must not be blank".to_string()));
    }
    if sex.trim().is_empty() {
        return Err(FlowError::Invalid("pet sex must not be blank".to_string()));
    }
    Ok(())
}

// ============================================================================
// SECTION: Admin Flows
// ============================================================================

/// Admin-facing adoption flows.
#[derive(Debug, Clone)]
pub struct AdminFlows<S, N> {
    /// Backing store.
    store: S,
    /// Notification fanout.
    notifier: N,
}

impl<S, N> AdminFlows<S, N>
where
    S: AdoptionStore,
    N: Notifier,
{
    /// Creates admin flows over a store and notifier.
    #[must_use]
    pub const fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    // ------------------------------------------------------------------
    // Pets
    // ------------------------------------------------------------------

    /// Adds a pet to the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] when critical fields are blank.
    pub fn add_pet(&self, pet: &NewPet) -> Result<PetId, FlowError> {
        validate_pet_fields(&pet.name, &pet.breed, &pet.sex)?;
        Ok(self.store.add_pet(pet)?)
    }

    /// Updates an existing pet.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] for blank fields and
    /// [`FlowError::NotFound`] when the pet does not exist.
    pub fn update_pet(&self, pet_id: PetId, update: &PetUpdate) -> Result<(), FlowError> {
        validate_pet_fields(&update.name, &update.breed, &update.sex)?;
        Ok(self.store.update_pet(pet_id, update)?)
    }

    /// Deletes a pet and cleans up its stored photo.
    ///
    /// The store purge removes the pet and its non-approved requests; the
    /// photo removal is a best-effort side effect reported in the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the pet does not exist.
    pub fn delete_pet<P>(&self, pet_id: PetId, photos: &P) -> Result<DeletePetOutcome, FlowError>
    where
        P: PhotoStore,
    {
        let pet = self
            .store
            .pet(pet_id)?
            .ok_or_else(|| FlowError::NotFound(format!("pet {pet_id} does not exist")))?;
        self.store.delete_pet(pet_id)?;
        let mut side_effects = Vec::new();
        if let Some(reference) = pet.photo.as_deref() {
            photos.remove(reference);
            side_effects.push(SideEffect::completed(SideEffectKind::PhotoCleanup));
        }
        Ok(DeletePetOutcome { side_effects })
    }

    /// Loads one pet.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the lookup fails.
    pub fn pet(&self, pet_id: PetId) -> Result<Option<Pet>, FlowError> {
        Ok(self.store.pet(pet_id)?)
    }

    // ------------------------------------------------------------------
    // Request decisions
    // ------------------------------------------------------------------

    /// Approves a pending request and notifies the adopter.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the request does not exist and
    /// [`FlowError::Conflict`] when it is no longer pending.
    pub fn approve_request(&self, request_id: RequestId) -> Result<ApproveOutcome, FlowError> {
        let details = self.require_request(request_id)?;
        if details.request.status != RequestStatus::Pending {
            return Err(FlowError::Conflict(format!(
                "request {request_id} is {} and cannot be approved",
                details.request.status
            )));
        }
        let record = self.store.approve_request(request_id)?;
        let message = format!(
            "Your adoption request for {} was approved. You can download the adoption form from \
             My Requests and follow the next steps provided.",
            details.pet_name
        );
        let notice = self.notifier.notify(record.adopter_id.get(), Role::Adopter, &message);
        Ok(ApproveOutcome {
            record,
            side_effects: vec![SideEffect::from_notify(SideEffectKind::DirectNotice, notice)],
        })
    }

    /// Rejects a pending request, recording the reason and notifying the
    /// adopter.
    ///
    /// The reason may be empty; it is stored as given after trimming.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the request does not exist and
    /// [`FlowError::Conflict`] when it is no longer pending.
    pub fn reject_request(
        &self,
        request_id: RequestId,
        reason: &str,
    ) -> Result<RejectOutcome, FlowError> {
        let reason = reason.trim();
        let details = self.require_request(request_id)?;
        self.store.reject_request(request_id, reason)?;
        let message = if reason.is_empty() {
            format!("Your adoption request for {} was rejected.", details.pet_name)
        } else {
            format!(
                "Your adoption request for {} was rejected. Reason: {reason}",
                details.pet_name
            )
        };
        let notice =
            self.notifier.notify(details.request.adopter_id.get(), Role::Adopter, &message);
        Ok(RejectOutcome {
            side_effects: vec![SideEffect::from_notify(SideEffectKind::DirectNotice, notice)],
        })
    }

    /// Deletes a non-approved request row.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the request does not exist and
    /// [`FlowError::Conflict`] for approved rows, which are kept for
    /// adoption history.
    pub fn delete_request(&self, request_id: RequestId) -> Result<(), FlowError> {
        let details = self.require_request(request_id)?;
        if details.request.status == RequestStatus::Approved {
            return Err(FlowError::Conflict(format!(
                "request {request_id} is approved; approved requests are kept for adoption history"
            )));
        }
        if !self.store.delete_request(request_id, None, false)? {
            return Err(FlowError::NotFound(format!("request {request_id} does not exist")));
        }
        Ok(())
    }

    /// Deletes a request row regardless of status. Returns whether a row was
    /// removed. History snapshots are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the delete fails.
    pub fn purge_request(&self, request_id: RequestId) -> Result<bool, FlowError> {
        Ok(self.store.delete_request(request_id, None, true)?)
    }

    /// Lists all requests with display fields.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the query fails.
    pub fn requests(&self) -> Result<Vec<RequestDetails>, FlowError> {
        Ok(self.store.all_requests()?)
    }

    /// Loads one request with display fields.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the query fails.
    pub fn request(&self, request_id: RequestId) -> Result<Option<RequestDetails>, FlowError> {
        Ok(self.store.request_details(request_id)?)
    }

    /// Loads one request, failing when it does not exist.
    fn require_request(&self, request_id: RequestId) -> Result<RequestDetails, FlowError> {
        self.store
            .request_details(request_id)?
            .ok_or_else(|| FlowError::NotFound(format!("request {request_id} does not exist")))
    }

    // ------------------------------------------------------------------
    // History + dashboard
    // ------------------------------------------------------------------

    /// Lists adoption history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the query fails.
    pub fn history(&self) -> Result<Vec<AdoptionHistoryEntry>, FlowError> {
        Ok(self.store.adoption_history()?)
    }

    /// Assembles the admin dashboard projection.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when any underlying query fails.
    pub fn dashboard(&self) -> Result<DashboardSnapshot, FlowError> {
        let available_pets = self.store.available_pets()?;
        let requests = self.store.all_requests()?;
        let history = self.store.adoption_history()?;
        let stats = self.store.summary_stats()?;
        let mut requests_by_status: BTreeMap<String, u64> = BTreeMap::new();
        for details in &requests {
            *requests_by_status.entry(details.request.status.as_str().to_string()).or_default() +=
                1;
        }
        let mut pets_by_category: BTreeMap<String, u64> = BTreeMap::new();
        for pet in &available_pets {
            *pets_by_category.entry(pet.category.label().to_string()).or_default() += 1;
        }
        Ok(DashboardSnapshot {
            available_pets,
            requests,
            history,
            stats,
            requests_by_status,
            pets_by_category,
        })
    }

    // ------------------------------------------------------------------
    // Staged admin signups
    // ------------------------------------------------------------------

    /// Lists staged admin signups, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the query fails.
    pub fn pending_admins(&self) -> Result<Vec<PendingAdmin>, FlowError> {
        Ok(self.store.pending_admins()?)
    }

    /// Promotes a staged admin signup and notifies the new admin.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the staging row does not exist.
    pub fn approve_pending_admin(
        &self,
        pending_id: PendingAdminId,
    ) -> Result<PendingDecisionOutcome, FlowError> {
        let admin_id = self.store.approve_pending_admin(pending_id)?;
        let notice = self.notifier.notify(
            admin_id.get(),
            Role::Admin,
            "Your admin account was approved. You can now sign in.",
        );
        Ok(PendingDecisionOutcome {
            admin_id: Some(admin_id),
            side_effects: vec![SideEffect::from_notify(SideEffectKind::DirectNotice, notice)],
        })
    }

    /// Removes a staged admin signup.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the staging row does not exist.
    pub fn decline_pending_admin(
        &self,
        pending_id: PendingAdminId,
    ) -> Result<PendingDecisionOutcome, FlowError> {
        if !self.store.decline_pending_admin(pending_id)? {
            return Err(FlowError::NotFound(format!(
                "pending admin {pending_id} does not exist"
            )));
        }
        Ok(PendingDecisionOutcome {
            admin_id: None,
            side_effects: Vec::new(),
        })
    }

    // ------------------------------------------------------------------
    // Admin accounts
    // ------------------------------------------------------------------

    /// Lists admin accounts ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the query fails.
    pub fn admins(&self) -> Result<Vec<AdminProfile>, FlowError> {
        Ok(self.store.admin_profiles()?)
    }

    /// Updates an admin profile.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] for blank name or email and
    /// [`FlowError::NotFound`] when the admin does not exist.
    pub fn update_profile(&self, admin_id: AdminId, update: &AdminUpdate) -> Result<(), FlowError> {
        if update.name.trim().is_empty() {
            return Err(FlowError::Invalid("name must not be blank".to_string()));
        }
        if update.email.trim().is_empty() {
            return Err(FlowError::Invalid("email must not be blank".to_string()));
        }
        Ok(self.store.update_admin(admin_id, update)?)
    }

    /// Deletes an admin account.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the delete fails.
    pub fn delete_account(&self, admin_id: AdminId) -> Result<(), FlowError> {
        Ok(self.store.delete_admin(admin_id)?)
    }
}
