// crates/furever-control/src/adopter.rs
// ============================================================================
// Module: Adopter Flows
// Description: Request submission, withdrawal, profile, and ratings.
// Purpose: Coordinate adopter mutations with notices and broadcasts.
// Dependencies: furever-core, crate::error, crate::notify
// ============================================================================

//! ## Overview
//! Adopter flows submit and withdraw adoption requests. Submission checks
//! availability and the duplicate-pending guard before inserting, then fans
//! out a confirmation to the adopter and a broadcast to every admin; both
//! attempts are reported as [`SideEffect`] records. Ownership is enforced on
//! cancellation and deletion so one adopter can never touch another's rows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use furever_core::AdopterId;
use furever_core::AdopterProfile;
use furever_core::AdopterUpdate;
use furever_core::AdoptionHistoryEntry;
use furever_core::AdoptionStore;
use furever_core::Notifier;
use furever_core::PetId;
use furever_core::PetStatus;
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

/// Result of submitting an adoption request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Identifier of the new pending request.
    pub request_id: RequestId,
    /// Secondary-effect outcomes, in attempt order.
    pub side_effects: Vec<SideEffect>,
}

/// Result of rating the shelter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingOutcome {
    /// Number of admins the rating reached.
    pub admins_notified: u64,
    /// Secondary-effect outcomes, in attempt order.
    pub side_effects: Vec<SideEffect>,
}

// ============================================================================
// SECTION: Adopter Flows
// ============================================================================

/// Adopter-facing adoption flows.
#[derive(Debug, Clone)]
pub struct AdopterFlows<S, N> {
    /// Backing store.
    store: S,
    /// Notification fanout.
    notifier: N,
}

impl<S, N> AdopterFlows<S, N>
where
    S: AdoptionStore,
    N: Notifier,
{
    /// Creates adopter flows over a store and notifier.
    #[must_use]
    pub const fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Submits an adoption request for an available pet.
    ///
    /// The duplicate-pending guard is advisory: it reports the common case
    /// synchronously but a concurrent submission can still race past it.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the pet does not exist and
    /// [`FlowError::Conflict`] when the pet is unavailable or the adopter
    /// already has a pending request for it.
    pub fn submit_request(
        &self,
        adopter_id: AdopterId,
        pet_id: PetId,
        note: Option<&str>,
    ) -> Result<SubmitOutcome, FlowError> {
        let pet = self
            .store
            .pet(pet_id)?
            .ok_or_else(|| FlowError::NotFound(format!("pet {pet_id} does not exist")))?;
        if pet.status != PetStatus::Available {
            return Err(FlowError::Conflict(format!(
                "pet {} is not available for adoption",
                pet.name
            )));
        }
        if self.store.has_pending_request(adopter_id, pet_id)? {
            return Err(FlowError::Conflict(format!(
                "a pending request for {} already exists",
                pet.name
            )));
        }
        let note = note.map(str::trim).filter(|text| !text.is_empty());
        let request_id = self.store.submit_request(adopter_id, pet_id, note)?;

        let confirmation = format!(
            "Your adoption request for {} was submitted and is awaiting review.",
            pet.name
        );
        let notice = self.notifier.notify(adopter_id.get(), Role::Adopter, &confirmation);
        let broadcast = format!("New adoption request for {}.", pet.name);
        let fanout = self.notifier.notify_all_admins(&broadcast).map(|_| ());
        Ok(SubmitOutcome {
            request_id,
            side_effects: vec![
                SideEffect::from_notify(SideEffectKind::DirectNotice, notice),
                SideEffect::from_notify(SideEffectKind::AdminBroadcast, fanout),
            ],
        })
    }

    /// Cancels the adopter's own pending request.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the request does not exist and
    /// [`FlowError::Conflict`] when it is not this adopter's pending row.
    pub fn cancel_request(
        &self,
        request_id: RequestId,
        adopter_id: AdopterId,
    ) -> Result<(), FlowError> {
        if self.store.cancel_request(request_id, Some(adopter_id))? {
            return Ok(());
        }
        match self.store.request_details(request_id)? {
            None => Err(FlowError::NotFound(format!("request {request_id} does not exist"))),
            Some(details) if details.request.adopter_id != adopter_id => Err(FlowError::Conflict(
                format!("request {request_id} belongs to another adopter"),
            )),
            Some(details) => Err(FlowError::Conflict(format!(
                "request {request_id} is {} and cannot be cancelled",
                details.request.status
            ))),
        }
    }

    /// Deletes the adopter's own non-approved request row.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the request does not exist and
    /// [`FlowError::Conflict`] when the row is approved or owned by another
    /// adopter.
    pub fn delete_request(
        &self,
        request_id: RequestId,
        adopter_id: AdopterId,
    ) -> Result<(), FlowError> {
        if self.store.delete_request(request_id, Some(adopter_id), false)? {
            return Ok(());
        }
        match self.store.request_details(request_id)? {
            None => Err(FlowError::NotFound(format!("request {request_id} does not exist"))),
            Some(details) if details.request.adopter_id != adopter_id => Err(FlowError::Conflict(
                format!("request {request_id} belongs to another adopter"),
            )),
            Some(details) if details.request.status == RequestStatus::Approved => {
                Err(FlowError::Conflict(format!(
                    "request {request_id} is approved; approved requests are kept for adoption \
                     history"
                )))
            }
            Some(_) => Err(FlowError::NotFound(format!("request {request_id} does not exist"))),
        }
    }

    /// Lists the adopter's requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the query fails.
    pub fn my_requests(&self, adopter_id: AdopterId) -> Result<Vec<RequestDetails>, FlowError> {
        Ok(self.store.adopter_requests(adopter_id)?)
    }

    /// Lists the adopter's adoption history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the query fails.
    pub fn my_history(
        &self,
        adopter_id: AdopterId,
    ) -> Result<Vec<AdoptionHistoryEntry>, FlowError> {
        Ok(self.store.adoption_history_for(adopter_id)?)
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    /// Loads the adopter's profile.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the adopter does not exist.
    pub fn profile(&self, adopter_id: AdopterId) -> Result<AdopterProfile, FlowError> {
        self.store
            .adopter(adopter_id)?
            .ok_or_else(|| FlowError::NotFound(format!("adopter {adopter_id} does not exist")))
    }

    /// Updates the adopter's profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] for blank name or email and
    /// [`FlowError::NotFound`] when the adopter does not exist.
    pub fn update_profile(
        &self,
        adopter_id: AdopterId,
        update: &AdopterUpdate,
    ) -> Result<(), FlowError> {
        if update.name.trim().is_empty() {
            return Err(FlowError::Invalid("name must not be blank".to_string()));
        }
        if update.email.trim().is_empty() {
            return Err(FlowError::Invalid("email must not be blank".to_string()));
        }
        Ok(self.store.update_adopter(adopter_id, update)?)
    }

    /// Deletes the adopter's account along with their requests.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the delete fails.
    pub fn delete_account(&self, adopter_id: AdopterId) -> Result<(), FlowError> {
        Ok(self.store.delete_adopter(adopter_id)?)
    }

    // ------------------------------------------------------------------
    // Ratings
    // ------------------------------------------------------------------

    /// Sends a star rating to every admin.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] when `stars` is outside `1..=5` or the
    /// adopter does not exist.
    pub fn rate_shelter(
        &self,
        adopter_id: AdopterId,
        stars: u8,
        comment: Option<&str>,
    ) -> Result<RatingOutcome, FlowError> {
        if !(1..=5).contains(&stars) {
            return Err(FlowError::Invalid("rating must be between 1 and 5 stars".to_string()));
        }
        let profile = self.profile(adopter_id)?;
        let mut message = format!("{} rated the shelter {stars}/5 stars.", profile.name);
        if let Some(comment) = comment.map(str::trim).filter(|text| !text.is_empty()) {
            message.push_str(&format!(" Comment: {comment}"));
        }
        match self.notifier.notify_all_admins(&message) {
            Ok(admins_notified) => Ok(RatingOutcome {
                admins_notified,
                side_effects: vec![SideEffect::completed(SideEffectKind::AdminBroadcast)],
            }),
            Err(err) => Ok(RatingOutcome {
                admins_notified: 0,
                side_effects: vec![SideEffect::failed(
                    SideEffectKind::AdminBroadcast,
                    err.to_string(),
                )],
            }),
        }
    }
}
