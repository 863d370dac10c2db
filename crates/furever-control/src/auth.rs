// crates/furever-control/src/auth.rs
// ============================================================================
// Module: Auth Flows
// Description: Login, signup, and OTP-based password reset.
// Purpose: Gate account access per role and stage admin signups.
// Dependencies: furever-core, rand, crate::error, crate::notify
// ============================================================================

//! ## Overview
//! Authentication is role-scoped: adopters and admins live in separate
//! tables, and credentials for one role never unlock the other. The first
//! admin signup is bootstrapped directly; later signups are staged for an
//! existing admin to approve. Password resets flow through a six-digit
//! one-time code, delivered by an [`OtpMailer`] and held in an in-process
//! cache until it is consumed or replaced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use furever_core::Account;
use furever_core::AdminId;
use furever_core::AdopterId;
use furever_core::AdoptionStore;
use furever_core::NewAdmin;
use furever_core::NewAdopter;
use furever_core::Notifier;
use furever_core::OtpMailer;
use furever_core::PendingAdminId;
use furever_core::Role;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::error::FlowError;
use crate::notify::SideEffect;
use crate::notify::SideEffectKind;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Required password length for new accounts.
const PASSWORD_LENGTH: usize = 8;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of an admin signup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdminSignup {
    /// The first admin was created directly.
    Bootstrapped {
        /// The new admin identifier.
        admin_id: AdminId,
    },
    /// The signup was staged for review by an existing admin.
    Staged {
        /// The staging row identifier.
        pending_id: PendingAdminId,
        /// Secondary-effect outcomes, in attempt order.
        side_effects: Vec<SideEffect>,
    },
}

// ============================================================================
// SECTION: Auth Flows
// ============================================================================

/// Login, signup, and password-reset flows.
pub struct AuthFlows<S, N, M> {
    /// Backing store.
    store: S,
    /// Notification fanout.
    notifier: N,
    /// Reset-code delivery.
    mailer: M,
    /// Outstanding reset codes keyed by email.
    otp_codes: Mutex<HashMap<String, (String, Role)>>,
}

impl<S, N, M> AuthFlows<S, N, M>
where
    S: AdoptionStore,
    N: Notifier,
    M: OtpMailer,
{
    /// Creates auth flows over a store, notifier, and mailer.
    #[must_use]
    pub fn new(store: S, notifier: N, mailer: M) -> Self {
        Self {
            store,
            notifier,
            mailer,
            otp_codes: Mutex::new(HashMap::new()),
        }
    }

    /// Locks the reset-code cache.
    fn lock_codes(&self) -> Result<MutexGuard<'_, HashMap<String, (String, Role)>>, FlowError> {
        self.otp_codes
            .lock()
            .map_err(|_| FlowError::Internal("reset code cache mutex poisoned".to_string()))
    }

    // ------------------------------------------------------------------
    // Login
    // ------------------------------------------------------------------

    /// Authenticates an email/password pair within one role.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] for blank credentials and
    /// [`FlowError::NotFound`] when no account matches.
    pub fn login(&self, email: &str, password: &str, role: Role) -> Result<Account, FlowError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(FlowError::Invalid("email and password are required".to_string()));
        }
        self.store.authenticate(email, password, role)?.ok_or_else(|| {
            FlowError::NotFound("no account matches that email and password".to_string())
        })
    }

    // ------------------------------------------------------------------
    // Signup
    // ------------------------------------------------------------------

    /// Creates an adopter account.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] for malformed fields or a mismatched
    /// confirmation and [`FlowError::Conflict`] when the email is already
    /// registered.
    pub fn signup_adopter(
        &self,
        adopter: &NewAdopter,
        password_confirm: &str,
    ) -> Result<AdopterId, FlowError> {
        validate_signup(&adopter.name, &adopter.email, &adopter.password, password_confirm)?;
        Ok(self.store.create_adopter(adopter)?)
    }

    /// Creates or stages an admin account.
    ///
    /// The first admin is bootstrapped directly so the system is never
    /// locked out; later signups are staged and broadcast to existing
    /// admins for review.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] for malformed fields or a mismatched
    /// confirmation and [`FlowError::Conflict`] when the email is already
    /// registered.
    pub fn signup_admin(
        &self,
        admin: &NewAdmin,
        password_confirm: &str,
    ) -> Result<AdminSignup, FlowError> {
        validate_signup(&admin.name, &admin.email, &admin.password, password_confirm)?;
        if self.store.admin_count()? == 0 {
            let admin_id = self.store.create_admin(admin)?;
            return Ok(AdminSignup::Bootstrapped { admin_id });
        }
        if self.store.account_by_email(&admin.email, Role::Admin)?.is_some() {
            return Err(FlowError::Conflict(format!(
                "admin email already registered: {}",
                admin.email
            )));
        }
        let pending_id = self.store.create_pending_admin(admin)?;
        let broadcast = format!("New admin signup request from {} awaits review.", admin.name);
        let fanout = self.notifier.notify_all_admins(&broadcast).map(|_| ());
        Ok(AdminSignup::Staged {
            pending_id,
            side_effects: vec![SideEffect::from_notify(SideEffectKind::AdminBroadcast, fanout)],
        })
    }

    // ------------------------------------------------------------------
    // Password reset
    // ------------------------------------------------------------------

    /// Generates a reset code for a registered email and mails it out.
    ///
    /// A newer code replaces any outstanding one for the same email.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFound`] when the email is not registered
    /// under the role and [`FlowError::Mailer`] when delivery fails.
    pub fn request_password_reset(&self, email: &str, role: Role) -> Result<(), FlowError> {
        let email = email.trim();
        if self.store.account_by_email(email, role)?.is_none() {
            return Err(FlowError::NotFound(format!(
                "no {role} account is registered under that email"
            )));
        }
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        self.mailer.send_otp(email, &code)?;
        self.lock_codes()?.insert(email.to_string(), (code, role));
        Ok(())
    }

    /// Consumes a reset code and sets the new password.
    ///
    /// The role must match the one the code was requested for; a code
    /// issued for one role cannot reset the other role's account.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Invalid`] for a wrong, expired, or
    /// wrong-role code or a malformed password, and [`FlowError::NotFound`]
    /// when the account row has disappeared since the code was issued.
    pub fn reset_password(
        &self,
        email: &str,
        role: Role,
        code: &str,
        new_password: &str,
    ) -> Result<(), FlowError> {
        let email = email.trim();
        validate_password(new_password)?;
        {
            let mut codes = self.lock_codes()?;
            match codes.get(email) {
                Some((expected, cached_role))
                    if expected == code.trim() && *cached_role == role =>
                {
                    codes.remove(email);
                }
                _ => {
                    return Err(FlowError::Invalid(
                        "reset code is wrong or no longer valid".to_string(),
                    ));
                }
            }
        }
        if !self.store.update_password_by_email(email, role, new_password)? {
            return Err(FlowError::NotFound(format!(
                "no {role} account is registered under that email"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Rejects malformed signup fields before any store access.
fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), FlowError> {
    if name.trim().is_empty() {
        return Err(FlowError::Invalid("name must not be blank".to_string()));
    }
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(FlowError::Invalid("a valid email address is required".to_string()));
    }
    if password != password_confirm {
        return Err(FlowError::Invalid("passwords do not match".to_string()));
    }
    validate_password(password)
}

/// Enforces the fixed password length rule.
fn validate_password(password: &str) -> Result<(), FlowError> {
    if password.chars().count() != PASSWORD_LENGTH {
        return Err(FlowError::Invalid(format!(
            "password must be exactly {PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
